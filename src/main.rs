use anyhow::Result;
use clap::Parser;
use pathmask::cli::{AppContext, Cli, Commands};
use pathmask::cli_ext::{apply_cmd, filter_cmd, json_cmd};
use pathmask::infra::{config, logging};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::load_config(cli.config.as_deref())?;
    logging::init(cli.log_level.as_deref(), &config.log_level, cli.quiet, cli.no_color);

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        config,
    };

    match cli.command {
        Commands::Apply(args) => apply_cmd::run(args, &ctx),
        Commands::Filter(args) => filter_cmd::run(args, &ctx),
        Commands::Json(args) => json_cmd::run(args, &ctx),
        Commands::Init(args) => config::init(args, &ctx),
        Commands::Completions(args) => pathmask::completion::run(args),
    }
}
