use clap::Parser;
use std::time::Instant;

use blinkbench::config::{DEFAULT_BAUD, DEFAULT_CPU_HZ};
use blinkbench::dhrystone::{self, Score};
use blinkbench::sim::{SimBoard, SimClock, StdSerial};
use blinkbench::{Sketch, SketchConfig};

use log::Level;

#[derive(Clone, clap::Subcommand, Debug)]
enum Mode {
    /// Run the blink-and-benchmark loop
    Blink {
        /// stop after this many reports
        #[arg(short = 'n', long)]
        reports: Option<u32>,
    },
    /// Count ticks over a number of RTC seconds
    RtcTicks {
        #[arg(short, long, default_value_t = 1)]
        seconds: u8,
    },
    /// Run the benchmark once and print its score
    Dhrystone,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    mode: Mode,

    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    /// simulated core clock
    #[arg(long, default_value_t = DEFAULT_CPU_HZ)]
    cpu_hz: u32,

    #[arg(long, default_value_t = DEFAULT_BAUD)]
    baud: u32,

    /// ticks between LED toggles, half a second by default
    #[arg(short, long)]
    interval: Option<u32>,

    /// Dhrystone runs per benchmark
    #[arg(short, long)]
    runs: Option<u32>,

    /// advance the tick counter by this much per read instead of following
    /// the wall clock
    #[arg(short, long)]
    step: Option<u32>,
}

#[derive(Debug)]
enum LocalErrors {
    IoError,
    InvalidDhrystone,
}

impl<E> From<blinkbench::Error<E>> for LocalErrors {
    fn from(_: blinkbench::Error<E>) -> Self {
        LocalErrors::IoError
    }
}

fn main() -> Result<(), LocalErrors> {
    let cli = Cli::parse();

    let log_level = match cli.debug {
        1 => Level::Info,
        2 => Level::Debug,
        3 => Level::Trace,
        _ => Level::Warn,
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level.to_string()),
    )
    .init();
    log::info!("Starting blinkbench simulation");

    let mut config = SketchConfig::from_env(cli.cpu_hz).with_baud(cli.baud);
    if let Some(interval) = cli.interval {
        config = config.with_led_interval(interval);
    }
    if let Some(runs) = cli.runs {
        config = config.with_dhrystone_runs(runs);
    }
    let clock = match cli.step {
        Some(step) => SimClock::Stepped { step },
        None => SimClock::wall(),
    };
    let board = SimBoard::new(clock, config.cpu_hz, config.baud, StdSerial::stdout());
    let mut sketch = Sketch::new(board, config);

    match cli.mode {
        Mode::Blink { reports } => {
            sketch.setup();
            let mut sent = 0;
            while reports.map_or(true, |limit| sent < limit) {
                if sketch.poll()?.is_some() {
                    sent += 1;
                }
            }
            let counts = sketch.board().toggle_counts();
            log::info!(
                "LED toggles: loop {} timers {:?}, level {}",
                counts.foreground,
                counts.timers,
                sketch.board().led_level()
            );
        }
        Mode::RtcTicks { seconds } => {
            let ticks = sketch.rtc_ticks(seconds);
            println!("{} seconds = {} ticks", seconds, ticks);
        }
        Mode::Dhrystone => {
            let runs = config.dhrystone_runs;
            let start = Instant::now();
            let outcome = dhrystone::run(runs);
            let nanos = start.elapsed().as_nanos();
            if !outcome.is_valid(runs) {
                log::error!("Dhrystone results don't match the reference values");
                return Err(LocalErrors::InvalidDhrystone);
            }
            let ticks = (nanos * config.cpu_hz as u128 / 1_000_000_000).min(u32::MAX as u128);
            let score = Score::from_ticks(runs, ticks as u32, config.cpu_hz);
            println!(
                "{} runs in {} ns: {} Dhrystones/s, {}.{:03} DMIPS",
                runs,
                nanos,
                score.dhrystones_per_second,
                score.milli_dmips / 1000,
                score.milli_dmips % 1000
            );
        }
    }
    Ok(())
}
