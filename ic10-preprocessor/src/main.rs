use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ic10_preprocessor::config::{load_config, save_config};
use ic10_preprocessor::{
    hash, Diagnostic, HashFormat, Mode, Preprocessor, PreprocessorConfig, Replacement, TransformError,
};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "ic10pp", version, about = "Define/alias resolver and minifier for IC10 programs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve define and alias directives (writes compiled_<file>)
    Compile(TransformArgs),

    /// Also strip comments and blank lines and number labels (writes minified_<file>)
    Minify(TransformArgs),

    /// Print the HASH() value of a string
    Hash {
        text: String,

        /// Print as a signed 32-bit integer
        #[arg(long)]
        signed: bool,
    },

    /// Write the default configuration to a JSON file
    InitConfig { path: PathBuf },
}

#[derive(Args, Debug)]
struct TransformArgs {
    /// Input IC10 source file
    input: PathBuf,

    /// Output file (defaults to a prefixed file next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the result instead of writing a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Replace names even inside longer identifiers
    #[arg(long)]
    substring: bool,

    /// Write HASH() values as signed integers
    #[arg(long)]
    signed_hashes: bool,

    /// Treat lines of only periods as blank
    #[arg(long)]
    ignore_periods: bool,

    /// Skip the chip line-limit check
    #[arg(long)]
    no_limits: bool,
}

impl TransformArgs {
    /// Config file (or defaults) with command-line flags applied on top
    fn config(&self) -> Result<PreprocessorConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => PreprocessorConfig::default(),
        };
        if self.substring {
            config.replacement = Replacement::Substring;
        }
        if self.signed_hashes {
            config.hash_format = HashFormat::Signed;
        }
        if self.ignore_periods {
            config.ignore_periods = true;
        }
        if self.no_limits {
            config.check_limits = false;
        }
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let result = match &cli.command {
        Commands::Compile(args) => transform_file(args, Mode::Compile),
        Commands::Minify(args) => transform_file(args, Mode::Minify),
        Commands::Hash { text, signed } => {
            let format = if *signed { HashFormat::Signed } else { HashFormat::Unsigned };
            println!("{}", format.render(hash(text)));
            Ok(())
        }
        Commands::InitConfig { path } => init_config(path),
    };

    if let Err(e) = result {
        match e.downcast_ref::<TransformError>() {
            Some(err) => eprintln!("{}", Diagnostic::from(err)),
            None => eprintln!("Error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn transform_file(args: &TransformArgs, mode: Mode) -> Result<()> {
    let mut preprocessor = Preprocessor::with_config(args.config()?);
    preprocessor.set_filename(args.input.display().to_string());

    let input = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read file '{}'", args.input.display()))?;
    info!("Read {} bytes from {}", input.len(), args.input.display());

    let output = preprocessor.process(&input, mode)?;

    let report = preprocessor.diagnostics(&output, mode);
    for diagnostic in report.diagnostics() {
        warn!("{diagnostic}");
    }
    if !report.is_empty() {
        info!("{}", report.summary());
    }

    if args.stdout {
        print!("{output}");
        return Ok(());
    }

    let output_path = match &args.output {
        Some(path) => path.clone(),
        None => mode
            .output_path(&args.input)
            .with_context(|| format!("Cannot derive an output name from '{}'", args.input.display()))?,
    };
    fs::write(&output_path, &output)
        .with_context(|| format!("Failed to write file '{}'", output_path.display()))?;
    println!("File {} to {}", mode.past_tense(), output_path.display());
    Ok(())
}

fn init_config(path: &Path) -> Result<()> {
    save_config(&PreprocessorConfig::default(), path)?;
    println!("Default configuration written to {}", path.display());
    Ok(())
}
