// src/main.rs

use clap::Parser;
use log::LevelFilter;
use std::io::{self, Write};
use std::path::PathBuf;

use helpp::{FsLoader, HelppConfig, HelppError, Preprocessor, SourceLoader};

#[derive(Parser, Debug)]
#[command(name = "helpp", version, about = "Expand line-directive text macros")]
struct Args {
    /// File to process
    input: Option<PathBuf>,

    /// Config file (default: ./helpp.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Give up after this many passes
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    max_passes: Option<u64>,

    /// Do not load the <dir><ext>.help file
    #[arg(long, default_value_t = false)]
    no_help: bool,

    /// Write here instead of <input>.out
    #[arg(long, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Print the result instead of writing a file
    #[arg(long, default_value_t = false)]
    stdout: bool,

    /// More log output (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_config(args: &Args) -> Result<HelppConfig, HelppError> {
    let mut config = match &args.config {
        Some(path) => HelppConfig::load(path)?,
        None => HelppConfig::from_nearest()?,
    };
    config.merge(HelppConfig {
        max_passes: args.max_passes.map(|n| n as usize),
        help: args.no_help.then_some(false),
        ..HelppConfig::default()
    });
    Ok(config)
}

fn run(args: Args) -> Result<(), HelppError> {
    let input = args
        .input
        .clone()
        .ok_or_else(|| HelppError::Usage("input file required".to_string()))?;
    let config = load_config(&args)?;
    log::debug!("effective config: {:?}", config);

    let mut preprocessor = Preprocessor::new(config.into_settings()?);

    if args.stdout {
        let expansion = preprocessor.expand_file(&input)?;
        if let Some(help) = &expansion.help_file {
            log::info!("using help file {}", help.display());
        }
        let mut handle = io::stdout().lock();
        return handle
            .write_all(expansion.rendered().as_bytes())
            .and_then(|_| handle.flush())
            .map_err(|source| HelppError::Store {
                path: PathBuf::from("<stdout>"),
                source,
            });
    }

    let (output, expansion) = match &args.output {
        Some(output) => {
            let expansion = preprocessor.expand_file(&input)?;
            FsLoader.store(output, &expansion.rendered())?;
            (output.clone(), expansion)
        }
        None => preprocessor.process_file(&input)?,
    };
    if let Some(help) = &expansion.help_file {
        println!("Using help file {}", help.display());
    }
    log::info!(
        "{:?} -> {:?} after {} pass(es)",
        input,
        output,
        expansion.passes
    );
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
