//! Shell completion generation command.
//!
//! This module provides the `completions` command which generates shell completion
//! scripts for bash, zsh, fish, and PowerShell.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary.
const BIN_NAME: &str = "groundbook";

/// Generate shell completion scripts
#[derive(Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        if !global.quiet {
            eprintln!("# Generating {} completion script", self.shell);
            for line in install_hint(self.shell) {
                eprintln!("{line}");
            }
            eprintln!();
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());

        Ok(())
    }
}

/// Comment lines telling the user how to enable the generated script.
fn install_hint(shell: Shell) -> Vec<String> {
    let steps: &[&str] = match shell {
        Shell::Bash => &[
            "#   groundbook completions bash > ~/.local/share/bash-completion/completions/groundbook",
            "# Or source it directly in ~/.bashrc:",
            "#   eval \"$(groundbook completions bash)\"",
        ],
        Shell::Zsh => &[
            "#   groundbook completions zsh > ~/.zsh/completions/_groundbook",
            "# Make sure ~/.zsh/completions is in your $fpath",
        ],
        Shell::Fish => &[
            "#   groundbook completions fish > ~/.config/fish/completions/groundbook.fish",
            "# Or add to config.fish:",
            "#   groundbook completions fish | source",
        ],
        Shell::PowerShell => &[
            "#   groundbook completions powershell | Out-String | Invoke-Expression",
        ],
        _ => &[],
    };

    if steps.is_empty() {
        return Vec::new();
    }
    std::iter::once("# Run the following command to enable completions:")
        .chain(steps.iter().copied())
        .map(str::to_string)
        .collect()
}
