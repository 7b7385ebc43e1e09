//! CLI command handlers for saved filters.
//!
//! `create` builds a spec from path flags and saves it (or prints it when no
//! name is given), `apply` runs a saved filter over a document, `list` and
//! `show` inspect the filter directory.

use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;
use serde_json::json;
use tabled::{Table, Tabled};
use tracing::{info, instrument, warn};

use crate::cli::{
    AppContext, FilterApplyArgs, FilterArgs, FilterCreateArgs, FilterListArgs, FilterShowArgs,
    FilterSubcommand, ListFormat,
};
use crate::cli_ext::apply_cmd::filter_and_write;
use crate::core::collect::build_spec;
use crate::core::store::{FilterListing, FilterStore, SavedFilter};

pub fn run(args: FilterArgs, ctx: &AppContext) -> Result<()> {
    match args.command {
        FilterSubcommand::Create(args) => create(args, ctx),
        FilterSubcommand::Apply(args) => apply(args, ctx),
        FilterSubcommand::List(args) => list(args, ctx),
        FilterSubcommand::Show(args) => show(args, ctx),
    }
}

/// `--filter-dir` if given, else the configured directory.
fn open_store(filter_dir: Option<&Path>, ctx: &AppContext) -> Result<FilterStore> {
    let dir = match filter_dir {
        Some(dir) => dir.to_path_buf(),
        None => ctx.config.filter_dir_path()?,
    };
    Ok(FilterStore::new(dir))
}

#[instrument(skip_all, fields(name = ?args.name))]
fn create(args: FilterCreateArgs, ctx: &AppContext) -> Result<()> {
    let Some(spec) = build_spec(&args.paths.keep, &args.paths.fields, &args.paths.exclude) else {
        warn!("No filtering parameters provided. Use --keep, --exclude, or --fields.");
        return Ok(());
    };

    match args.name {
        Some(name) => {
            let store = open_store(args.filter_dir.as_deref(), ctx)?;
            let filter = SavedFilter::new(spec, name, args.description);
            let path = store.save(&filter, args.force)?;
            info!("Filter saved to: {}", path.display());
        }
        None => {
            // Unnamed filters are printed, not saved
            let document = json!({
                "spec": spec,
                "metadata": {
                    "name": null,
                    "description": args.description,
                    "created_at": Utc::now(),
                },
            });
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }
    Ok(())
}

#[instrument(skip_all, fields(name = %args.filter_name))]
fn apply(args: FilterApplyArgs, ctx: &AppContext) -> Result<()> {
    let store = open_store(args.filter_dir.as_deref(), ctx)?;
    let filter = store.load(&args.filter_name)?;

    let compact = args.compact || ctx.config.output.compact;
    filter_and_write(
        Some(&filter.spec),
        args.input.as_deref(),
        args.output.as_deref(),
        compact,
    )
}

#[derive(Tabled)]
struct ListingRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Created")]
    created_at: String,
}

impl From<&FilterListing> for ListingRow {
    fn from(listing: &FilterListing) -> Self {
        Self {
            file: listing.file.clone(),
            name: listing.name.clone().unwrap_or_default(),
            description: listing.description.clone().unwrap_or_default(),
            created_at: listing.created_at.clone().unwrap_or_default(),
        }
    }
}

#[instrument(skip_all)]
fn list(args: FilterListArgs, ctx: &AppContext) -> Result<()> {
    let store = open_store(args.filter_dir.as_deref(), ctx)?;
    let filters = store.list()?;

    if args.format == ListFormat::Json {
        println!("{}", serde_json::to_string_pretty(&filters)?);
        return Ok(());
    }
    if filters.is_empty() {
        info!("No filter files found.");
        return Ok(());
    }

    match args.format {
        ListFormat::Table => {
            let rows: Vec<ListingRow> = filters.iter().map(ListingRow::from).collect();
            println!("{}", Table::new(rows));
        }
        _ => print_text_listing(&filters, ctx.no_color),
    }
    Ok(())
}

fn print_text_listing(filters: &[FilterListing], no_color: bool) {
    if no_color {
        println!("Available filters:");
    } else {
        println!("{}", "Available filters:".bold());
    }

    for filter in filters {
        if no_color {
            println!("  {}", filter.file);
        } else {
            println!("  {}", filter.file.green());
        }
        if let Some(name) = &filter.name {
            println!("    Name: {name}");
        }
        if let Some(description) = &filter.description {
            println!("    Description: {description}");
        }
        if let Some(created_at) = &filter.created_at {
            println!("    Created: {created_at}");
        }
        println!("    Path: {}", filter.path.display());
    }
}

/// Print the stored document exactly as saved.
#[instrument(skip_all, fields(name = %args.filter_name))]
fn show(args: FilterShowArgs, ctx: &AppContext) -> Result<()> {
    let store = open_store(args.filter_dir.as_deref(), ctx)?;
    let document = store.load_document(&args.filter_name)?;
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
