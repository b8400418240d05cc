use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use propenum::{Config, Generator};
use propenum_cli::{Overrides, expand_source_globs, load_config, logger};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored log output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    commands: Commands,
}

#[derive(ClapArgs, Debug)]
struct ConfigArgs {
    /// Configuration file (defaults to ./propenum.toml if present)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,
}

impl ConfigArgs {
    fn load(&self) -> Result<Config, String> {
        load_config(self.config.as_deref(), &self.overrides)
    }
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate enum sources for the configured properties files.
    Generate {
        /// Source files or glob patterns relative to the base directory; replaces `files` from the config
        files: Vec<String>,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Print the enum source generated for one properties file.
    Preview {
        /// Source file relative to the base directory
        file: String,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Print the enum model of one properties file as JSON.
    Inspect {
        /// Source file relative to the base directory
        file: String,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,

        #[command(flatten)]
        config: ConfigArgs,
    },
}

fn run_generate(files: Vec<String>, config: &ConfigArgs) -> Result<(), String> {
    let mut config = config.load()?;
    if !files.is_empty() {
        config.files = files;
    }
    config.files = expand_source_globs(&config.base_dir, &config.files)?;

    let generator = Generator::new(config).map_err(|e| e.to_string())?;
    let report = generator.generate().map_err(|e| e.to_string())?;

    for path in &report.generated {
        println!("Generated {}", path.display());
    }
    if report.is_success() {
        return Ok(());
    }
    for (source, err) in &report.failures {
        eprintln!("Failed {}: {}", source.display(), err);
    }
    Err(format!(
        "{} of {} source file(s) failed",
        report.failures.len(),
        report.failures.len() + report.generated.len()
    ))
}

fn preview_generator(config: &ConfigArgs) -> Result<Generator, String> {
    Generator::new(config.load()?).map_err(|e| e.to_string())
}

fn run_preview(file: &str, config: &ConfigArgs) -> Result<(), String> {
    let generator = preview_generator(config)?;
    let emission = generator
        .preview(&generator.source_path(file))
        .map_err(|e| e.to_string())?;
    print!("{}", emission.source);
    Ok(())
}

fn run_inspect(file: &str, pretty: bool, config: &ConfigArgs) -> Result<(), String> {
    let generator = preview_generator(config)?;
    let emission = generator
        .preview(&generator.source_path(file))
        .map_err(|e| e.to_string())?;
    let json = if pretty {
        serde_json::to_string_pretty(&emission.spec)
    } else {
        serde_json::to_string(&emission.spec)
    }
    .map_err(|e| format!("Failed to serialize enum model: {}", e))?;
    println!("{}", json);
    Ok(())
}

fn main() {
    let args = Args::parse();
    logger::init_logger(args.verbose, args.quiet, args.no_color);

    let result = match args.commands {
        Commands::Generate { files, config } => run_generate(files, &config),
        Commands::Preview { file, config } => run_preview(&file, &config),
        Commands::Inspect {
            file,
            pretty,
            config,
        } => run_inspect(&file, pretty, &config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
