//! mbb - multi-band image blending CLI
//!
//! Blends a source image into a target image under a mask, with either
//! Laplacian-pyramid (multi-band) blending or a per-pixel naive blend.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "mbb")]
#[command(author, version, about = "Multi-band (Laplacian pyramid) image blending")]
#[command(long_about = "
Blends a source image into a target image under a mask.
Mask value 1 keeps the target, 0 takes the source.

Examples:
  mbb blend target.jpg source.jpg mask.png -o out.png
  mbb blend target.jpg source.jpg mask.png -o out.png --levels 4
  mbb blend target.jpg source.jpg mask.png -o hard.png --method naive
  mbb compare target.jpg source.jpg mask.png --grid sheet.png
  mbb levels target.jpg
  RUST_LOG=mbb_ops=trace mbb blend t.png s.png m.png -o out.png
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Also write log lines to this file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Blend source into target under a mask
    #[command(visible_alias = "b")]
    Blend(BlendArgs),

    /// Run multi-band and naive blending and write both plus a comparison sheet
    #[command(visible_alias = "cmp")]
    Compare(CompareArgs),

    /// Show the pyramid level range for an image
    #[command(visible_alias = "l")]
    Levels(LevelsArgs),
}

/// Blending method.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Method {
    /// Laplacian-pyramid blending
    #[default]
    Multiband,
    /// Per-pixel weighted average
    Naive,
}

#[derive(Args)]
pub(crate) struct BlendArgs {
    /// Target image (kept where mask = 1)
    target: PathBuf,

    /// Source image (taken where mask = 0)
    source: PathBuf,

    /// Mask image, averaged to one channel
    mask: PathBuf,

    /// Output file (.png or .jpg)
    #[arg(short, long)]
    output: PathBuf,

    /// Pyramid levels (default: floor(log2(min(height, width))))
    #[arg(short = 'n', long)]
    levels: Option<usize>,

    /// Blending method
    #[arg(short, long, value_enum, default_value_t = Method::Multiband)]
    method: Method,

    /// Clip to [0, 1] instead of min-max normalizing before saving
    #[arg(long)]
    no_normalize: bool,
}

#[derive(Args)]
pub(crate) struct CompareArgs {
    /// Target image (kept where mask = 1)
    target: PathBuf,

    /// Source image (taken where mask = 0)
    source: PathBuf,

    /// Mask image, averaged to one channel
    mask: PathBuf,

    /// Multi-band result
    #[arg(long, default_value = "multiband.jpg")]
    multiband: PathBuf,

    /// Naive result
    #[arg(long, default_value = "naive.jpg")]
    naive: PathBuf,

    /// Comparison sheet: target, source, mask, multi-band, naive
    #[arg(short, long)]
    grid: Option<PathBuf>,

    /// Pyramid levels (default: floor(log2(min(height, width))))
    #[arg(short = 'n', long)]
    levels: Option<usize>,

    /// Sheet columns
    #[arg(long, default_value = "3")]
    columns: usize,

    /// Gap between sheet cells in pixels
    #[arg(long, default_value = "8")]
    gap: usize,
}

#[derive(Args)]
pub(crate) struct LevelsArgs {
    /// Input image
    image: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Blend(args) => commands::blend::run(args, cli.verbose),
        Commands::Compare(args) => commands::compare::run(args, cli.verbose),
        Commands::Levels(args) => commands::levels::run(args, cli.verbose),
    }
}

/// Installs the stderr logger and, if asked, a file logger.
///
/// `RUST_LOG` overrides the level picked from `-v`. The returned guard
/// flushes the file writer on drop and must live until exit.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("Log file has no file name: {}", path.display()))?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install logger")?;
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_blend() {
        let cli = Cli::try_parse_from([
            "mbb", "-vv", "blend", "t.png", "s.png", "m.png", "-o", "out.png", "--levels", "3",
            "--method", "naive",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Blend(args) => {
                assert_eq!(args.levels, Some(3));
                assert_eq!(args.method, Method::Naive);
                assert!(!args.no_normalize);
            }
            _ => panic!("expected blend"),
        }
    }

    #[test]
    fn test_negative_levels_rejected() {
        let res = Cli::try_parse_from([
            "mbb", "blend", "t.png", "s.png", "m.png", "-o", "o.png", "--levels", "-2",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn test_compare_defaults() {
        let cli = Cli::try_parse_from(["mbb", "compare", "t.jpg", "s.jpg", "m.jpg"]).unwrap();
        match cli.command {
            Commands::Compare(args) => {
                assert_eq!(args.multiband, PathBuf::from("multiband.jpg"));
                assert_eq!(args.naive, PathBuf::from("naive.jpg"));
                assert!(args.grid.is_none());
                assert_eq!(args.columns, 3);
            }
            _ => panic!("expected compare"),
        }
    }
}
