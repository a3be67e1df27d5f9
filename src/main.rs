use clap::Parser;
use miette::Result;
use storeart::cli::{Cli, Commands};
use storeart::logging::init_logging;
use storeart::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let printer = Printer::new().with_quiet(cli.quiet);

    match cli.command {
        Commands::Build(args) => storeart::cli::build::run(args, &printer)?,
        Commands::Check(args) => storeart::cli::check::run(args, &printer)?,
        Commands::Devices(args) => storeart::cli::devices::run(args, &printer)?,
        Commands::Init(args) => storeart::cli::init::run(args, &printer)?,
        Commands::Preview(args) => storeart::cli::preview::run(args, &printer)?,
        Commands::Completions(args) => storeart::cli::completions::run(args)?,
    }

    Ok(())
}
