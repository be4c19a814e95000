use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::warn;

use tagwatch::check::TagChecker;
use tagwatch::config::{self, Config, LogFormat};
use tagwatch::image::collect_images;
use tagwatch::registry::{Cache, OciRegistry};
use tagwatch::{logging, report};

#[derive(Parser)]
#[command(name = "tagwatch")]
#[command(
    version,
    about = "Report the newest tag of each image that follows the format of its current tag"
)]
struct Cli {
    /// The images to check
    images: Vec<String>,

    /// Only print images whose newest tag differs
    #[arg(short = 'd', long)]
    differences: bool,

    /// The maximum number of images to check concurrently at any one time
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    concurrency: Option<u16>,

    /// Read images from a file, one per line ("-" for stdin)
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,

    /// Path to the config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reuse tag lists fetched within the cache TTL (may miss tags pushed since)
    #[arg(long, conflicts_with = "no_cache")]
    cache: bool,

    /// Always fetch tags from the registry, even if the config enables the cache
    #[arg(long)]
    no_cache: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log output format
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let log_file = config.log.file.then(config::log_path);
    let _guard = logging::init(
        cli.verbose,
        cli.quiet,
        cli.log_format.unwrap_or(config.log.format),
        log_file.as_deref(),
    )?;

    let images = collect_images(
        &cli.images,
        cli.file.as_deref(),
        !io::stdin().is_terminal(),
        read_stdin,
    )?;
    if images.is_empty() {
        anyhow::bail!("no images given; pass them as arguments, with --file, or on stdin");
    }

    let concurrency = cli
        .concurrency
        .map(usize::from)
        .unwrap_or(config.concurrency);

    let checks = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let checker = build_checker(&config, use_cache(&cli, &config));
            checker.check_inputs(&images, concurrency).await
        });

    let has_error = match report::write_report(
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
        &checks,
        cli.differences,
    ) {
        Ok(has_error) => has_error,
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => return Ok(ExitCode::SUCCESS),
        Err(e) => return Err(e).context("failed to write report"),
    };

    Ok(if has_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn read_stdin() -> io::Result<String> {
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

fn use_cache(cli: &Cli, config: &Config) -> bool {
    !cli.no_cache && (cli.cache || config.cache.enabled)
}

fn build_checker(config: &Config, cache: bool) -> TagChecker {
    let checker = TagChecker::new(Arc::new(OciRegistry::new(&config.registry)));

    if !cache {
        return checker;
    }

    match Cache::new(&config::db_path(), config.cache.ttl) {
        Ok(cache) => checker.with_store(Arc::new(cache)),
        Err(e) => {
            warn!("Tag cache unavailable, fetching from registries: {}", e);
            checker
        }
    }
}
