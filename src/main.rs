mod error;
mod inline_script;
mod minifier;
mod report;
mod scanner;
mod stats;
mod types;

use clap::Parser;
use colored::Colorize;
use log::info;
use std::path::PathBuf;

const ORIGINAL_DIR: &str = "../dist";
const MINIFIED_DIR: &str = "../dist-minified";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the built assets (read only)
    #[arg(long, short = 'i', default_value = ORIGINAL_DIR)]
    input_dir: PathBuf,

    /// Directory receiving minified copies; wiped on every run
    #[arg(long, short = 'o', default_value = MINIFIED_DIR)]
    output_dir: PathBuf,

    /// Render the size report as a table with human readable sizes
    #[arg(long, short = 'p')]
    pretty: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("{} {e}", "Error:".red());
        std::process::exit(1);
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> error::Result<()> {
    let minifier = minifier::BundledMinifier::new();

    let processed = scanner::minify_dir(&minifier, &args.input_dir, &args.output_dir)?;
    info!(
        "Minified {} files into {}",
        processed.len(),
        args.output_dir.display()
    );

    let rows = stats::collect_rows(&args.input_dir, &args.output_dir, &processed)?;
    if rows.is_empty() {
        info!("No files in {}, nothing to report", args.input_dir.display());
        return Ok(());
    }

    if args.pretty {
        report::print_pretty(&rows);
    } else {
        report::print_plain(&rows);
    }

    Ok(())
}
