//! Shell completions generation.

use clap_complete::Shell;

/// Write completions for `shell` to stdout.
pub fn run(shell: Shell) {
    let mut cmd = <super::Cli as clap::CommandFactory>::command();
    clap_complete::generate(shell, &mut cmd, "bidet", &mut std::io::stdout());
}
