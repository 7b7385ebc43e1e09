//! `pmask json compress|md`.

use anyhow::Result;
use tracing::{debug, instrument};

use crate::cli::{AppContext, JsonArgs, JsonCompressArgs, JsonMdArgs, JsonSubcommand};
use crate::core::markdown::render_markdown;
use crate::infra::io::{derived_output, read_json, to_json_text, write_text};

const DEFAULT_TITLE: &str = "JSON Data";

pub fn run(args: JsonArgs, ctx: &AppContext) -> Result<()> {
    match args.command {
        JsonSubcommand::Compress(args) => compress(args),
        JsonSubcommand::Md(args) => markdown(args, ctx),
    }
}

#[instrument(skip_all)]
fn compress(args: JsonCompressArgs) -> Result<()> {
    let data = read_json(args.input.as_deref())?;
    let output = args.output.or_else(|| {
        args.input
            .as_deref()
            .map(|input| derived_output(input, "compressed_", ".json"))
    });

    let text = to_json_text(&data, true)?;
    debug!(bytes = text.len(), "compressed");
    write_text(output.as_deref(), &text)
}

#[instrument(skip_all)]
fn markdown(args: JsonMdArgs, ctx: &AppContext) -> Result<()> {
    let data = read_json(args.input.as_deref())?;

    let title = args.title.unwrap_or_else(|| {
        args.input
            .as_deref()
            .and_then(|input| input.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    });
    let max_depth = args.max_depth.unwrap_or(ctx.config.markdown.max_depth);
    let output = args.output.or_else(|| {
        args.input
            .as_deref()
            .map(|input| derived_output(input, "", ".md"))
    });

    let text = render_markdown(&data, &title, max_depth);
    write_text(output.as_deref(), &text)
}
