use std::io;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{Shell, generate};

/// Write a completion script for the given shell to stdout.
pub fn handle_completions<C: CommandFactory>(shell: Shell) -> Result<()> {
    let mut cmd = C::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
    Ok(())
}
