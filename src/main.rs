//! SeqResize CLI - Sequential Batch Image Resizer
//!
//! Resizes every image in a folder to one fixed size, numbering the copies
//! by file creation time.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use console::style;
use tracing::{error, info};

use seqresize::{
    init_with_config, BatchReport, BatchResizer, Config, ConsoleProgress, ProgressSink,
    SilentProgress, TargetSize,
};

/// SeqResize - Sequential Batch Image Resizer
#[derive(Parser)]
#[command(
    name = "seqresize",
    version,
    about = "Resize a folder of images to a fixed size, numbered by creation time",
    long_about = "SeqResize resizes every supported image directly inside the input folder \
                  (png, jpg, jpeg, gif, bmp, webp, tiff) to exactly the target size with a \
                  Lanczos filter. Outputs are written as '<n>_<name><ext>', where n ranks \
                  the files by creation time starting at 1."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input directory [default: img]
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Output directory [default: img_resized]
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Target size as WIDTHxHEIGHT [default: 100x100]
    #[arg(short, long, value_name = "WxH", value_parser = parse_dimensions)]
    size: Option<TargetSize>,

    /// Configuration file path (.toml or .yaml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output the batch report as JSON
    #[arg(long)]
    json: bool,

    /// Show a progress bar on stderr
    #[arg(long)]
    progress: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Only log errors (per-file lines are still printed)
    #[arg(short = 'Q', long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Validate configuration file
    Config {
        /// Configuration file to validate
        file: PathBuf,
    },
    /// Generate example configuration file
    ExampleConfig {
        /// Output file path
        #[arg(short, long, default_value = "seqresize.toml")]
        output: PathBuf,
        /// Use YAML format instead of TOML
        #[arg(long)]
        yaml: bool,
    },
}

/// Parse dimension string (e.g., "100x100")
fn parse_dimensions(s: &str) -> Result<TargetSize, String> {
    s.parse::<TargetSize>().map_err(|e| e.to_string())
}

fn main() {
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        if let Err(e) = handle_subcommand(command) {
            eprintln!("{}: {:#}", style("Error").red().bold(), e);
            process::exit(1);
        }
        return;
    }

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {:#}", style("Error").red().bold(), e);
            process::exit(1);
        }
    };

    init_with_config(&config.logging);

    match run_batch(&cli, config) {
        Ok(report) => print_summary(&report, cli.json),
        Err(e) => {
            error!("Batch aborted: {}", e);
            eprintln!("{}: {}", style("Error").red().bold(), e.user_message());
            process::exit(1);
        }
    }
}

/// Handle subcommands
fn handle_subcommand(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Config { file } => validate_config_file(&file),
        Commands::ExampleConfig { output, yaml } => generate_example_config(&output, yaml),
    }
}

/// Merge defaults, the optional config file and explicit flags
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(input) = &cli.input {
        config.input_folder = input.clone();
    }
    if let Some(output) = &cli.output {
        config.output_folder = output.clone();
    }
    if let Some(size) = cli.size {
        config.target_size = size;
    }

    if cli.quiet {
        config.logging.level = "error".to_string();
    } else if cli.verbose {
        config.logging.level = "debug".to_string();
    }

    config.validate()?;
    Ok(config)
}

/// Run batch processing
fn run_batch(cli: &Cli, config: Config) -> seqresize::Result<BatchReport> {
    info!("Starting batch processing");

    let mut progress: Box<dyn ProgressSink> = if cli.json {
        Box::new(SilentProgress)
    } else {
        Box::new(ConsoleProgress::new(cli.progress && !cli.quiet))
    };

    BatchResizer::new(config).run(progress.as_mut())
}

/// Validate configuration file
fn validate_config_file(file_path: &Path) -> anyhow::Result<()> {
    let config = Config::from_file(file_path)?;
    config.validate()?;

    println!("{}: Configuration file is valid", style("Success").green().bold());
    println!("Input: {}", config.input_folder.display());
    println!("Output: {}", config.output_folder.display());
    println!("Size: {}", config.target_size);

    Ok(())
}

/// Generate example configuration file
fn generate_example_config(output_path: &Path, use_yaml: bool) -> anyhow::Result<()> {
    let output_path = if use_yaml {
        output_path.with_extension("yaml")
    } else {
        output_path.to_path_buf()
    };

    Config::default().to_file(&output_path)?;

    let format = if use_yaml { "YAML" } else { "TOML" };
    println!("{}: Generated example {} configuration: {}",
             style("Success").green().bold(),
             format,
             output_path.display());

    Ok(())
}

/// Print processing summary
fn print_summary(report: &BatchReport, json_output: bool) {
    if json_output {
        match serde_json::to_string_pretty(report) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("{}: {}", style("Error").red().bold(), e),
        }
        return;
    }

    if report.is_empty() {
        return;
    }

    println!();
    println!("{}", style("Processing Summary:").bold());
    println!("  {}: {}", style("Processed").green(), report.succeeded);
    if report.failed > 0 {
        println!("  {}: {}", style("Failed").red(), report.failed);
        for outcome in report.failures() {
            println!("    {}", outcome.filename());
        }
    }
    println!("  {}: {:.2}s", style("Duration").blue(), report.duration.as_secs_f64());
}
