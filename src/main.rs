use clap::Parser;
use miette::Result;

use bidet::cli::Cli;
use bidet::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let printer = Printer::with_debug(cli.debug);
    bidet::cli::run(cli, &printer)?;

    Ok(())
}
