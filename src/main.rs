use clap::Parser;
use postal_catalog::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(outcome) => {
            // Results have already been reported by the command
            process::exit(outcome.exit_code());
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Postal Catalog - National Postal Code Import and Lookup");
    println!("=======================================================");
    println!();
    println!("Load the national postal-code export into the catalog database and");
    println!("answer postal code, state, municipality and settlement lookups.");
    println!();
    println!("USAGE:");
    println!("    postal-catalog <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    import          Replace the catalog with the contents of the export");
    println!("    lookup          Resolve a postal code");
    println!("    states          List every state");
    println!("    municipalities  List the municipalities of a state");
    println!("    settlements     List the settlements of a municipality");
    println!("    reindex         Create the catalog table and indexes if missing");
    println!("    help            Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Import the default export (data/CP_CONSOLIDADO.csv):");
    println!("    postal-catalog import");
    println!();
    println!("    # Import a specific file into a specific database:");
    println!("    postal-catalog import --input /path/to/CP.csv --database /srv/catalog.sqlite3");
    println!();
    println!("    # Look up a postal code:");
    println!("    postal-catalog lookup 06700");
    println!();
    println!("    # Walk the hierarchy:");
    println!("    postal-catalog municipalities \"Ciudad de México\"");
    println!("    postal-catalog settlements \"Ciudad de México\" \"Cuauhtémoc\"");
    println!();
    println!("For detailed help on any command, use:");
    println!("    postal-catalog <COMMAND> --help");
}
