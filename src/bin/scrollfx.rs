use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "scrollfx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scenario and print its event log and final styles as JSON.
    Simulate(SimulateArgs),
    /// Print the frames of a scramble reveal, one per line.
    Scramble(ScrambleArgs),
    /// Print the values of a count-up, one per frame.
    Count(CountArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input scenario JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Motion config JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print compact JSON.
    #[arg(long)]
    compact: bool,
}

#[derive(Parser, Debug)]
struct ScrambleArgs {
    /// Text to reveal.
    #[arg(long)]
    text: String,

    /// Use the wavy block-glyph variant.
    #[arg(long)]
    wave: bool,

    /// Seed for decoy characters.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Parser, Debug)]
struct CountArgs {
    /// First value.
    #[arg(long, allow_hyphen_values = true)]
    from: i64,

    /// Last value.
    #[arg(long, allow_hyphen_values = true)]
    to: i64,

    /// Seconds.
    #[arg(long, default_value_t = 2.0)]
    duration: f64,

    /// GSAP ease name.
    #[arg(long, default_value = "power2.out")]
    ease: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Scramble(args) => cmd_scramble(args),
        Command::Count(args) => cmd_count(args),
    }
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => scrollfx::MotionConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => scrollfx::MotionConfig::default(),
    };
    let scenario = scrollfx::Scenario::from_path(&args.in_path)
        .with_context(|| format!("load scenario '{}'", args.in_path.display()))?;
    let report = scenario.run(&config).context("run scenario")?;

    let json = if args.compact {
        serde_json::to_string(&report)
    } else {
        serde_json::to_string_pretty(&report)
    }
    .context("serialize report")?;
    println!("{json}");
    Ok(())
}

fn cmd_scramble(args: ScrambleArgs) -> anyhow::Result<()> {
    let config = if args.wave {
        scrollfx::ScrambleConfig::wave()
    } else {
        scrollfx::ScrambleConfig::classic()
    }
    .seed(args.seed);
    let mut scrambler =
        scrollfx::Scrambler::new(&args.text, config).context("configure scramble")?;
    while let Some(frame) = scrambler.next_frame() {
        println!("{frame}");
    }
    Ok(())
}

fn cmd_count(args: CountArgs) -> anyhow::Result<()> {
    let ease = scrollfx::Ease::parse(&args.ease)
        .with_context(|| format!("parse ease '{}'", args.ease))?;
    let count = scrollfx::CountUp::new(args.from, args.to, args.duration).ease(ease);
    count.validate().context("configure count-up")?;
    for v in count.frames(scrollfx::Fps::display()) {
        println!("{v}");
    }
    Ok(())
}
