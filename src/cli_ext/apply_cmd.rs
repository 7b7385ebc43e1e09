//! `pmask apply`: filter a document with paths given on the command line.

use std::path::Path;

use anyhow::Result;
use tracing::{instrument, warn};

use crate::cli::{AppContext, ApplyArgs};
use crate::core::collect::build_spec;
use crate::core::filter::{FilterSpec, filter_structure};
use crate::infra::io::{read_json, to_json_text, write_text};

#[instrument(skip_all)]
pub fn run(args: ApplyArgs, ctx: &AppContext) -> Result<()> {
    let spec = build_spec(&args.paths.keep, &args.paths.fields, &args.paths.exclude);
    if spec.is_none() {
        warn!("No filtering parameters provided. Use --keep, --exclude, or --fields.");
    }

    let compact = args.compact || ctx.config.output.compact;
    filter_and_write(
        spec.as_ref(),
        args.input.as_deref(),
        args.output.as_deref(),
        compact,
    )
}

/// Read, filter, and write one document. Shared with `filter apply`.
pub(crate) fn filter_and_write(
    spec: Option<&FilterSpec>,
    input: Option<&Path>,
    output: Option<&Path>,
    compact: bool,
) -> Result<()> {
    let data = read_json(input)?;
    let filtered = filter_structure(&data, spec);

    if spec.is_some() && filtered == data {
        warn!("Filter did not modify the input data.");
    }

    let text = to_json_text(&filtered, compact)?;
    write_text(output, &text)
}
