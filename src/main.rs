use std::path::PathBuf;

use clap::Parser;

use imgcheck::output;
use imgcheck::verify::{self, VerifyOptions};

#[derive(Parser)]
#[command(
    name = "imgcheck",
    version,
    about = "Check that a batch image pipeline wrote a non-empty output for every input"
)]
struct Cli {
    /// Directory holding the source images
    #[arg(long, default_value = verify::DEFAULT_INPUT_DIR)]
    input_dir: PathBuf,

    /// Directory expected to hold one output per input, same file name
    #[arg(long, default_value = verify::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// File suffix that marks an input image
    #[arg(long, default_value = verify::DEFAULT_SUFFIX)]
    ext: String,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Show per-file details on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn cmd_verify(cli: &Cli) -> anyhow::Result<i32> {
    // Exit codes: 0 = verified, 1 = verification failure, 2 = IO error.
    let opts = VerifyOptions {
        input_dir: cli.input_dir.clone(),
        output_dir: cli.output_dir.clone(),
        suffix: verify::normalize_suffix(&cli.ext),
        verbose: cli.verbose,
    };

    if cli.verbose {
        eprintln!(
            "[imgcheck] input: {}  output: {}",
            opts.input_dir.display(),
            opts.output_dir.display()
        );
    }

    let result = verify::verify_with(&opts)?;
    output::print_verification(&result, cli.json);
    Ok(result.exit_code())
}

fn main() {
    let cli = Cli::parse();
    let exit_code = cmd_verify(&cli).unwrap_or_else(|e| {
        eprintln!("[imgcheck] error: {e:#}");
        2
    });
    std::process::exit(exit_code);
}
