//! **pathmask** - Keep or exclude parts of JSON documents by path
//!
//! Bracket paths (`[authors][:][name]`) and dot shorthand (`authors[].name`)
//! compile into a mask tree that is applied in a single pass.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Core engine - path parsing, masks, and the keep/exclude passes
pub mod core {
    /// Bracket path parsing into typed segments
    pub mod path;
    pub use path::{CanonicalPath, PathSegment};

    /// Dot/bracket shorthand to canonical bracket paths
    pub mod shorthand;

    /// Raw flag values to canonical path lists
    pub mod collect;

    /// Mask tree with ancestor precedence
    pub mod mask;
    pub use mask::Mask;

    /// Owned JSON tree with insertion-ordered objects
    pub mod tree;
    pub use tree::{Scalar, Tree, TreeKind};

    /// Keep pass
    pub mod project;
    pub use project::apply_keep;

    /// Exclude pass
    pub mod subtract;
    pub use subtract::{Exclusion, apply_exclude};

    /// Filter specs and the `filter_structure` entry point
    pub mod filter;
    pub use filter::{FilterMode, FilterSpec, filter_structure};

    /// Named filters persisted as JSON files
    pub mod store;
    pub use store::{FilterListing, FilterMetadata, FilterStore, SavedFilter, StoreError};

    /// JSON to Markdown rendering
    pub mod markdown;
    pub use markdown::render_markdown;
}

/// Infrastructure - Configuration, I/O, and logging
pub mod infra {
    /// Layered configuration (defaults, pmask.toml, PMASK_* env)
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// JSON input/output on files or stdio
    pub mod io;
    pub use io::{read_json, to_json_text, write_text};

    /// tracing subscriber setup
    pub mod logging;
}

/// Subcommand handlers
pub mod cli_ext {
    /// `apply` with ad-hoc paths
    pub mod apply_cmd;

    /// `filter create|apply|list|show`
    pub mod filter_cmd;

    /// `json compress|md`
    pub mod json_cmd;
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use infra::{Config, load_config};

// Core types for external consumers
pub use core::{FilterSpec, Mask, Tree, filter_structure};
