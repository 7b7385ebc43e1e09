use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cli::{AppContext, InitArgs};
use crate::infra::io::write_atomic;

/// Config file names probed in the working directory, first hit wins.
const CONFIG_FILES: [&str; 4] = ["pmask.toml", ".pmask.toml", "pmask.yaml", "pmask.json"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Directory holding named filters (`~` and `$VAR` are expanded)
    pub filter_dir: String,

    /// Default log filter when neither RUST_LOG nor --log-level is set
    pub log_level: String,

    /// Default output settings
    pub output: OutputConfig,

    /// Default markdown rendering settings
    pub markdown: MarkdownConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig
{
    /// Emit minified JSON instead of pretty-printed
    pub compact: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig
{
    pub max_depth: usize,
}

impl Default for Config
{
    fn default() -> Self
    {
        Self {
            filter_dir: "filters".to_string(),
            log_level: "info".to_string(),
            output: OutputConfig::default(),
            markdown: MarkdownConfig::default(),
        }
    }
}

impl Default for OutputConfig
{
    fn default() -> Self
    {
        Self { compact: false }
    }
}

impl Default for MarkdownConfig
{
    fn default() -> Self
    {
        Self { max_depth: 6 }
    }
}

impl Config
{
    /// Filter directory with `~` and environment variables expanded.
    pub fn filter_dir_path(&self) -> Result<PathBuf>
    {
        let expanded = shellexpand::full(&self.filter_dir)
            .with_context(|| format!("Failed to expand filter_dir '{}'", self.filter_dir))?;
        Ok(PathBuf::from(expanded.as_ref()))
    }
}

/// Layer defaults, the first config file found (or `explicit`), and
/// `PMASK_*` environment variables (`PMASK_MARKDOWN__MAX_DEPTH=4`).
pub fn load_config(explicit: Option<&Path>) -> Result<Config>
{
    let defaults = config::Config::try_from(&Config::default())
        .context("Failed to seed default configuration")?;
    let mut builder = config::Config::builder().add_source(defaults);

    match explicit
    {
        Some(path) =>
        {
            if !path.exists()
            {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            builder = builder.add_source(config::File::from(path));
        }
        None =>
        {
            if let Some(path) = CONFIG_FILES
                .iter()
                .map(Path::new)
                .find(|p| p.exists())
            {
                builder = builder.add_source(config::File::from(path));
            }
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("PMASK")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

/// Write `pmask.toml` under `args.path` and create the filter directory it
/// names. A relative `filter_dir` is resolved against `args.path`.
pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join("pmask.toml");

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let mut config = Config::default();
    if let Some(dir) = args.filter_dir
    {
        config.filter_dir = dir;
    }
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    fs::create_dir_all(&args.path)
        .with_context(|| format!("Failed to create {}", args.path.display()))?;
    write_atomic(&config_path, toml_string.as_bytes()).context("Failed to write config file")?;

    let filter_dir = config.filter_dir_path()?;
    let filter_dir = if filter_dir.is_relative()
    {
        args.path
            .join(filter_dir)
    }
    else
    {
        filter_dir
    };
    fs::create_dir_all(&filter_dir)
        .with_context(|| format!("Failed to create filter directory {}", filter_dir.display()))?;
    info!(config = %config_path.display(), filters = %filter_dir.display(), "initialized");

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
        println!("Filters will be saved under {}", filter_dir.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml()
    {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(text.contains("filter_dir = \"filters\""));
        assert!(text.contains("[markdown]"));

        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.markdown.max_depth, 6);
        assert!(!parsed.output.compact);
    }

    #[test]
    fn partial_files_fall_back_to_defaults()
    {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("custom.toml");
        std::fs::write(&path, "filter_dir = \"saved\"\n[markdown]\nmax_depth = 3\n").unwrap();

        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.filter_dir, "saved");
        assert_eq!(cfg.markdown.max_depth, 3);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn missing_explicit_file_is_an_error()
    {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(load_config(Some(&tmp.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn filter_dir_expansion()
    {
        let cfg = Config {
            filter_dir: "~/filters".into(),
            ..Config::default()
        };
        assert!(cfg.filter_dir_path().unwrap().ends_with("filters"));

        let plain = Config {
            filter_dir: "data/filters".into(),
            ..Config::default()
        };
        assert_eq!(plain.filter_dir_path().unwrap(), PathBuf::from("data/filters"));

        let unknown = Config {
            filter_dir: "$PMASK_SURELY_UNSET_VARIABLE/x".into(),
            ..Config::default()
        };
        assert!(unknown.filter_dir_path().is_err());
    }

    #[test]
    fn init_writes_config_and_filter_dir()
    {
        let tmp = tempfile::TempDir::new().unwrap();
        let root = tmp.path().join("project");
        let ctx = AppContext {
            quiet: true,
            no_color: true,
            config: Config::default(),
        };
        let args = |force| InitArgs {
            path: root.clone(),
            filter_dir: Some("saved".into()),
            force,
        };

        init(args(false), &ctx).unwrap();
        let written: Config =
            toml::from_str(&std::fs::read_to_string(root.join("pmask.toml")).unwrap()).unwrap();
        assert_eq!(written.filter_dir, "saved");
        assert!(root.join("saved").is_dir());

        let err = init(args(false), &ctx).unwrap_err();
        assert!(err.to_string().contains("--force"));
        init(args(true), &ctx).unwrap();
    }
}
