use std::cell::RefCell;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use photostrip::{
    BoothConfig, CaptureOutcome, CaptureSession, Countdown, FileFrameSource, FitStrategy,
    NoCountdown, SleepCountdown,
};

#[derive(Parser, Debug)]
#[command(name = "photostrip", version)]
struct Cli {
    /// Log every session transition.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a booth session over still images and write the finished strip as PNG.
    Compose(ComposeArgs),
    /// Validate a booth config and print it with defaults filled in.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Booth config JSON. Overlay paths are resolved next to it.
    #[arg(long)]
    config: PathBuf,

    /// Image files played back as camera frames, one per slot.
    #[arg(long, num_args = 1.., required = true)]
    frames: Vec<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Overlay index to print with.
    #[arg(long, default_value_t = 0)]
    overlay: usize,

    /// Override the config's fit strategy.
    #[arg(long, value_enum)]
    fit: Option<FitChoice>,

    /// Mirror frames like a front-facing camera preview.
    #[arg(long, default_value_t = false)]
    mirror: bool,

    /// Run the configured countdown before each capture.
    #[arg(long, default_value_t = false)]
    countdown: bool,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Booth config JSON. Prints the reference config when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FitChoice {
    Cover,
    Contain,
}

impl From<FitChoice> for FitStrategy {
    fn from(v: FitChoice) -> Self {
        match v {
            FitChoice::Cover => FitStrategy::Cover,
            FitChoice::Contain => FitStrategy::Contain,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let mut cfg = BoothConfig::from_path(&args.config)?;
    if let Some(fit) = args.fit {
        cfg.layout.fit = fit.into();
    }
    let assets_root = args.config.parent().unwrap_or_else(|| Path::new("."));

    let mut session = CaptureSession::from_config(&cfg, assets_root)?;
    pollster::block_on(session.select_overlay(args.overlay))
        .with_context(|| format!("load overlay {}", args.overlay))?;
    session.start();

    let slots = session.state().slot_count();
    if args.frames.len() != slots {
        tracing::warn!(
            frames = args.frames.len(),
            slots,
            "frame count does not match slot count"
        );
    }

    let cell = RefCell::new(session);
    let mut source = FileFrameSource::new(args.frames).mirrored(args.mirror);
    if args.countdown {
        capture_all(&cell, &mut SleepCountdown, &mut source)?;
    } else {
        capture_all(&cell, &mut NoCountdown, &mut source)?;
    }

    cell.borrow().write_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn capture_all<C: Countdown>(
    cell: &RefCell<CaptureSession>,
    countdown: &mut C,
    source: &mut FileFrameSource,
) -> anyhow::Result<()> {
    while cell.borrow().flags().can_capture {
        let outcome = pollster::block_on(photostrip::capture(cell, countdown, source))
            .context("capture frame")?;
        if let CaptureOutcome::Committed { slot } = outcome {
            tracing::debug!(slot, "slot filled");
        }
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let cfg = match &args.config {
        Some(path) => BoothConfig::from_path(path)?,
        None => BoothConfig::default(),
    };
    cfg.validate()?;
    println!("{}", serde_json::to_string_pretty(&cfg)?);
    Ok(())
}
