use std::path::{Path, PathBuf};
use std::rc::Rc;

use clap::{Args, Parser, Subcommand};
use phonograph_core::{
    AudioClock, ControlPoints, FrameClock, Orientation, Phonograph, PhonographConfig,
    PhonographError, PhonographObserver, Record, RecordDescriptor, TonearmState,
};
use tracing_subscriber::EnvFilter;

fn main() -> phonograph_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Geometry { record, config } => run_geometry(&record, config.as_deref()),
        Commands::Simulate(args) => run_simulate(args),
    }
}

fn run_geometry(record: &Path, config: Option<&Path>) -> phonograph_core::Result<()> {
    let config = load_config(config)?;
    let layout = config.layout.to_layout()?;
    let record = load_record(record)?;
    tracing::info!(name = record.name(), "solving tonearm geometry");

    let side_a = ControlPoints::solve(&layout, &record.dimensions(Orientation::A, &layout))?;
    let side_b = ControlPoints::solve(&layout, &record.dimensions(Orientation::B, &layout))?;
    let report = serde_json::json!({ "a": side_a, "b": side_b });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_simulate(args: SimulateArgs) -> phonograph_core::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let layout = config.layout.to_layout()?;
    let record = load_record(&args.record)?;
    let frame_interval = 1.0 / f64::from(config.frames_per_second);
    let frames_per_second = u64::from(config.frames_per_second);

    let (mut phonograph, simulated) = Phonograph::simulated(config)?;
    let observer = Rc::new(LoggingObserver);
    phonograph.set_observer(&observer);
    phonograph.layout_did_change(layout)?;
    phonograph.enqueue_record(record)?;
    if args.flip {
        phonograph.flip(false, None)?;
    }
    phonograph.play(args.start_at, true, None)?;

    let frames = (args.seconds / frame_interval).ceil() as u64;
    tracing::info!(frames, "starting headless playback");
    for frame in 0..frames {
        let now = frame as f64 * frame_interval;
        if let Some(stall_at) = args.stall_at {
            simulated
                .audio
                .set_stalled(now >= stall_at && now < stall_at + args.stall_for);
        }

        simulated.audio.advance(frame_interval);
        if simulated.frame_clock.is_running() {
            phonograph.on_frame();
        }
        for id in simulated.surface.advance(frame_interval) {
            phonograph.finish_animation(id)?;
        }

        if frame % frames_per_second == 0 {
            tracing::debug!(
                seconds = now,
                state = ?phonograph.state(),
                angle = phonograph.tonearm_angle(),
                track = ?phonograph.current_track(),
                "tick"
            );
        }
    }

    tracing::info!(
        state = ?phonograph.state(),
        angle = phonograph.tonearm_angle(),
        audio_time = simulated.audio.current_time(),
        track = ?phonograph.current_track(),
        "simulation finished"
    );
    Ok(())
}

fn load_config(path: Option<&Path>) -> phonograph_core::Result<PhonographConfig> {
    match path {
        Some(path) => PhonographConfig::load(path),
        None => Ok(PhonographConfig::default()),
    }
}

fn load_record(path: &Path) -> phonograph_core::Result<Record> {
    RecordDescriptor::load(path)?.try_into()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

/// Forwards engine notifications to the log.
struct LoggingObserver;

impl PhonographObserver for LoggingObserver {
    fn tonearm_state_will_change(&self, old: TonearmState, new: TonearmState) {
        tracing::info!(?old, ?new, "tonearm moving");
    }

    fn is_assumed_buffering(&self, buffering: bool) {
        tracing::info!(buffering, "buffering");
    }

    fn media_error(&self, error: &PhonographError) {
        tracing::warn!(%error, "media error");
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless phonograph turntable", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the tonearm control points for both sides of a record.
    Geometry {
        /// Record descriptor in JSON.
        record: PathBuf,
        /// Engine configuration in JSON.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Play a record against simulated audio and log what happens.
    Simulate(SimulateArgs),
}

#[derive(Args, Debug)]
struct SimulateArgs {
    /// Record descriptor in JSON.
    record: PathBuf,
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Length of the run in seconds.
    #[arg(long, default_value_t = 30.0)]
    seconds: f64,
    /// Place the stylus this many seconds into the side.
    #[arg(long)]
    start_at: Option<f64>,
    /// Starve the audio clock starting at this point of the run.
    #[arg(long)]
    stall_at: Option<f64>,
    #[arg(long, default_value_t = 2.0)]
    stall_for: f64,
    /// Play side B.
    #[arg(long)]
    flip: bool,
}
