use std::borrow::Cow;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::tree::Tree;

/// Read a JSON document from `input`, or from stdin when `None`.
pub fn read_json(input: Option<&Path>) -> Result<Tree> {
    match input {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file {}", path.display()))?;
            let tree: Tree = serde_json::from_str(&text)
                .with_context(|| format!("Invalid JSON in {}", path.display()))?;
            debug!(path = %path.display(), "input loaded");
            Ok(tree)
        }
        None => {
            info!("Reading from stdin...");
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            let tree: Tree = serde_json::from_str(&text).context("Invalid JSON on stdin")?;
            debug!("input loaded from stdin");
            Ok(tree)
        }
    }
}

/// Serialize a tree pretty-printed or minified.
pub fn to_json_text(tree: &Tree, compact: bool) -> Result<String> {
    let text = if compact {
        serde_json::to_string(tree)
    } else {
        serde_json::to_string_pretty(tree)
    };
    text.context("Failed to serialize JSON")
}

/// Write `text` to `output` atomically, or to stdout when `None`.
/// A trailing newline is added when missing.
pub fn write_text(output: Option<&Path>, text: &str) -> Result<()> {
    let text: Cow<'_, str> = if text.ends_with('\n') {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(format!("{text}\n"))
    };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            write_atomic(path, text.as_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "output written");
        }
        None => write_stream(io::stdout().lock(), text.as_bytes())?,
    }
    Ok(())
}

/// Write and flush; a closed pipe surfaces as an error.
fn write_stream<W: Write>(mut out: W, data: &[u8]) -> Result<()> {
    out.write_all(data).context("Failed to write stdout")?;
    out.flush().context("Failed to flush stdout")
}

/// `<prefix><stem><suffix>` next to the working directory, used when an
/// input file is given without an explicit output.
pub fn derived_output(input: &Path, prefix: &str, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    PathBuf::from(format!("{prefix}{stem}{suffix}"))
}

/// Atomic write with same-dir temp file strategy
pub fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;

    // Atomically replace the destination
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
