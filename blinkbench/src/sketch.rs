use super::{debug, info, trace, warn};

use crate::board::{BlinkTimer, Board};
use crate::config::SketchConfig;
use crate::dhrystone::{Dhrystone, Score, MAX_RUNS};
use crate::errors::Error;
use crate::report::Report;
use crate::schedule::{elapsed, Deadline};

type SerialError<B> = <<B as Board>::Serial as embedded_io::ErrorType>::Error;

/// The blink-and-benchmark loop.
///
/// Owns the board and all state the loop keeps between iterations.
pub struct Sketch<B: Board> {
    board: B,
    config: SketchConfig,
    deadline: Deadline,
    dhrystone: Dhrystone,
    last_bench_ticks: Option<u32>,
}

impl<B: Board> Sketch<B> {
    pub fn new(board: B, config: SketchConfig) -> Self {
        Self {
            board,
            config,
            deadline: Deadline::new(0, config.led_interval),
            dhrystone: Dhrystone::new(),
            last_bench_ticks: None,
        }
    }

    /// Starts both blink timers. Clocks, pins and the UART are expected to
    /// be configured by the board already.
    pub fn setup(&mut self) {
        info!(
            "Sketch setup: F_CPU={} baud={} interval={} runs={}",
            self.config.cpu_hz,
            self.config.baud,
            self.config.led_interval,
            self.config.dhrystone_runs
        );
        if self.config.dhrystone_runs > MAX_RUNS {
            warn!(
                "Dhrystone runs {} clamped to {}",
                self.config.dhrystone_runs,
                MAX_RUNS
            );
        }
        for timer in BlinkTimer::ALL {
            let period_us = self.config.blink_timer_periods_us[timer.index()];
            debug!("Starting blink timer {:?}, period {} us", timer, period_us);
            self.board.start_blink_timer(timer, period_us);
        }
    }

    /// One pass of the polling loop.
    ///
    /// Returns the report that was transmitted if the interval elapsed.
    pub fn poll(&mut self) -> Result<Option<Report>, Error<SerialError<B>>> {
        if !self.deadline.poll(self.board.ticks()) {
            return Ok(None);
        }
        self.board.toggle_led();

        let runs = self.config.dhrystone_runs;
        let start = self.board.ticks();
        let outcome = self.dhrystone.run(runs);
        let bench_ticks = elapsed(start, self.board.ticks());
        self.last_bench_ticks = Some(bench_ticks);

        if !outcome.is_valid(runs) {
            warn!("Dhrystone self check failed after {} runs", runs);
        }
        let score = Score::from_ticks(runs, bench_ticks, self.config.cpu_hz);
        debug!(
            "Dhrystone: {} runs in {} ticks, {} per second, {} mDMIPS",
            runs,
            bench_ticks,
            score.dhrystones_per_second,
            score.milli_dmips
        );

        let report = Report {
            bench_ticks,
            cpu_hz: self.config.cpu_hz,
            baud: self.board.measured_baud(),
        };
        report.write_to(self.board.serial())?;
        trace!("Next deadline at {}", self.deadline.next());
        Ok(Some(report))
    }

    /// Ticks elapsed over `seconds` RTC seconds, measured from a second
    /// boundary.
    pub fn rtc_ticks(&mut self, seconds: u8) -> u32 {
        // align to the start of a second
        self.board.wait_rtc_second();
        let start = self.board.ticks();
        for _ in 0..seconds {
            self.board.wait_rtc_second();
        }
        let ticks = elapsed(start, self.board.ticks());
        info!("{} RTC seconds took {} ticks", seconds, ticks);
        ticks
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    pub fn into_board(self) -> B {
        self.board
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn deadline(&self) -> &Deadline {
        &self.deadline
    }

    /// Duration of the most recent benchmark invocation
    pub fn last_bench_ticks(&self) -> Option<u32> {
        self.last_bench_ticks
    }
}
