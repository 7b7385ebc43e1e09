//! Completion scripts for `pmask`, generated from the clap definition.

use std::path::{Path, PathBuf};
use std::{fs, io};

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{Shell, generate, generate_to};
use tracing::info;

use crate::cli::{Cli, CompletionsArgs};

/// Stdout by default so `pmask completions zsh > _pmask` works; with
/// `--out-dir` the script lands under the shell's conventional file name.
pub fn run(args: CompletionsArgs) -> Result<()> {
    match args.out_dir {
        Some(dir) => {
            let path = install(args.shell, &dir)?;
            info!(shell = %args.shell, path = %path.display(), "completion script written");
        }
        None => {
            let mut cmd = Cli::command();
            let bin = cmd.get_name().to_string();
            generate(args.shell, &mut cmd, bin, &mut io::stdout());
        }
    }
    Ok(())
}

/// Write the script for `shell` into `dir`, creating it if needed.
pub fn install(shell: Shell, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    generate_to(shell, &mut cmd, bin, dir)
        .with_context(|| format!("Failed to write {shell} completions to {}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_uses_shell_file_names() {
        let tmp = tempfile::TempDir::new().unwrap();

        let zsh = install(Shell::Zsh, &tmp.path().join("zsh")).unwrap();
        assert!(zsh.ends_with("_pmask"));

        let bash = install(Shell::Bash, tmp.path()).unwrap();
        assert!(bash.ends_with("pmask.bash"));
        assert!(fs::read_to_string(bash).unwrap().contains("pmask"));
    }
}
