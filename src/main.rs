use clap::Parser;
use miette::Result;
use retint::cli::{usage_exit_code, Cli, Commands};
use retint::output::Printer;

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(usage_exit_code(&err));
        }
    };
    let printer = Printer::new().with_verbose(cli.verbose);

    match cli.command {
        Commands::Build(args) => retint::cli::build::run(args, &printer)?,
        Commands::Colour(args) => retint::cli::colour::run(args)?,
        Commands::List(args) => retint::cli::list::run(args, &printer)?,
        Commands::Completions(args) => retint::cli::completions::run(args)?,
    }

    Ok(())
}
