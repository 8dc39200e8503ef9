use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "walkthrough", version)]
struct Cli {
    /// Log debug events to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List phase groups and phases in navigation order.
    Phases,
    /// Play a phase from the start with a fixed frame delta and write a JSON trace.
    Run(RunArgs),
    /// Scrub to a time, run one frame and print its summary.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Phase name, e.g. `InputDetailTokEmbed`.
    #[arg(long)]
    phase: walkthrough::Phase,

    /// Seconds of playback to simulate.
    #[arg(long, default_value_t = 10.0)]
    seconds: f64,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Optional walkthrough config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output trace path. Printed to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[arg(long)]
    phase: walkthrough::Phase,

    /// Phase time in seconds.
    #[arg(long)]
    time: f64,

    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    match cli.cmd {
        Command::Phases => cmd_phases(),
        Command::Run(args) => cmd_run(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<walkthrough::WalkthroughConfig> {
    match path {
        Some(p) => walkthrough::WalkthroughConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(walkthrough::WalkthroughConfig::default()),
    }
}

/// Program state positioned at the start of `phase`, with the phase length measured.
fn start_at(
    cfg: &walkthrough::WalkthroughConfig,
    phase: walkthrough::Phase,
) -> anyhow::Result<walkthrough::ProgramState> {
    let mut state = walkthrough::ProgramState::new(cfg, None)?;
    state.set_phase(phase);
    Ok(state)
}

fn cmd_phases() -> anyhow::Result<()> {
    for group in walkthrough::phase_list() {
        println!("{}", group.title);
        for p in &group.phases {
            println!("  {:<22} {}", p.id.name(), p.title);
        }
    }
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    if args.fps == 0 {
        anyhow::bail!("--fps must be > 0");
    }
    if !(args.seconds.is_finite() && args.seconds >= 0.0) {
        anyhow::bail!("--seconds must be a non-negative number");
    }
    let cfg = load_config(args.config.as_deref())?;
    let mut state = start_at(&cfg, args.phase)?;
    state.walkthrough.play();

    let dt = 1.0 / f64::from(args.fps);
    let frames = (args.seconds * f64::from(args.fps)).ceil() as u64;
    let mut trace = Vec::with_capacity(frames as usize);
    for _ in 0..frames {
        trace.push(walkthrough::run_program(&mut state, dt));
    }

    let json = serde_json::to_string_pretty(&trace).context("serialize trace")?;
    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(out, json)
                .with_context(|| format!("write trace '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let mut state = start_at(&cfg, args.phase)?;
    state.walkthrough.scrub(args.time);
    let summary = walkthrough::run_program(&mut state, 0.0);

    println!(
        "{} t={:.3}/{:.3} draws={} fingerprint={}",
        summary.phase, summary.time, summary.phase_length, summary.draw_count, summary.fingerprint
    );
    if let Some(text) = &summary.commentary {
        println!("{text}");
    }
    for t in &summary.times {
        println!("  marker {:>7.3}s {}", t.time, t.name);
    }
    Ok(())
}
