use clap::Parser;
use proffast_viewer::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(anyhow::anyhow!("Interrupted by user"))
            }
        }
    });

    if let Err(error) = result {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("PROFFAST Viewer - Retrieval Output Explorer");
    println!("===========================================");
    println!();
    println!("Inspect PROFFAST ground-based spectroscopy retrieval outputs:");
    println!("site metadata, XCO2/XCH4 series, summary statistics and axis ranges.");
    println!();
    println!("USAGE:");
    println!("    proffast-viewer <COMMAND> <FILE> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    inspect     Report metadata, series, statistics and ranges for a file");
    println!("    columns     List selectable axis columns and their defaults");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Inspect a retrieval file with the default axes:");
    println!("    proffast-viewer inspect comb_invparms_site_SN039_230101-230131.csv");
    println!();
    println!("    # Plot XCH4 against row position with a fixed y range:");
    println!("    proffast-viewer inspect results.csv -x index -y XCH4 --y-min 1.85 --y-max 1.95");
    println!();
    println!("    # Export the selected series for further analysis:");
    println!("    proffast-viewer inspect results.csv --output-format csv > series.csv");
    println!();
    println!("For detailed help on any command, use:");
    println!("    proffast-viewer <COMMAND> --help");
}
