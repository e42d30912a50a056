//! Host-side board model
//!
//! [SimBoard] runs the sketch without hardware. Its tick counter is either
//! stepped, advancing a fixed amount every time the board is observed, or
//! derived from the wall clock. The blink timers and the RTC are driven from
//! the same tick source.

use core::cell::Cell;
use std::time::Instant;

use crate::board::{BlinkTimer, Board};
use crate::schedule::elapsed;
use crate::uart;

/// Where simulated ticks come from
#[derive(Debug, Clone, Copy)]
pub enum SimClock {
    /// Advance by `step` ticks on every observation of the board
    Stepped { step: u32 },
    /// Ticks at the board's core clock rate, measured from `start`
    Wall { start: Instant },
}

impl SimClock {
    pub fn wall() -> Self {
        SimClock::Wall {
            start: Instant::now(),
        }
    }
}

/// How many times each source toggled the LED
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ToggleCounts {
    pub foreground: u32,
    pub timers: [u32; 2],
}

impl ToggleCounts {
    pub fn total(&self) -> u32 {
        self.foreground + self.timers[0] + self.timers[1]
    }
}

// Hardware timer: interrupt on every full period
#[derive(Debug, Clone, Copy)]
struct SimTimer {
    last: u32,
    period: u32,
}

impl SimTimer {
    // A pending interrupt fires once, however late it is served.
    fn expired(&mut self, now: u32) -> bool {
        let mut fired = false;
        while elapsed(self.last, now) >= self.period {
            self.last = self.last.wrapping_add(self.period);
            fired = true;
        }
        fired
    }
}

/// Simulated board. Serial output goes to `W`.
pub struct SimBoard<W> {
    clock: SimClock,
    cpu_hz: u32,
    // 64-bit total so RTC seconds survive tick wraparound
    total_ticks: Cell<u64>,
    tick_offset: u32,
    led: Cell<bool>,
    toggles: Cell<ToggleCounts>,
    timers: Cell<[Option<SimTimer>; 2]>,
    // rate the UART divisor really produces
    baud: u32,
    serial: W,
}

impl<W: embedded_io::Write> SimBoard<W> {
    /// Board with the core at `cpu_hz`, UART programmed for `baud`.
    pub fn new(clock: SimClock, cpu_hz: u32, baud: u32, serial: W) -> Self {
        Self {
            clock,
            cpu_hz,
            total_ticks: Cell::new(0),
            tick_offset: 0,
            led: Cell::new(false),
            toggles: Cell::new(ToggleCounts::default()),
            timers: Cell::new([None, None]),
            baud: uart::achieved_baud(cpu_hz, baud).unwrap_or(0),
            serial,
        }
    }

    /// Start the tick counter at `offset` instead of zero, to exercise
    /// wraparound.
    pub fn with_tick_offset(mut self, offset: u32) -> Self {
        self.tick_offset = offset;
        self
    }

    pub fn led_level(&self) -> bool {
        self.led.get()
    }

    pub fn toggle_counts(&self) -> ToggleCounts {
        self.toggles.get()
    }

    pub fn serial_ref(&self) -> &W {
        &self.serial
    }

    pub fn into_serial(self) -> W {
        self.serial
    }

    /// Total ticks elapsed, not wrapped.
    pub fn elapsed_ticks(&self) -> u64 {
        self.total_ticks.get()
    }

    fn counter(&self) -> u32 {
        (self.total_ticks.get() as u32).wrapping_add(self.tick_offset)
    }

    // Moves simulated time forward and fires any blink timers that expired.
    fn advance(&self) {
        let total = match self.clock {
            SimClock::Stepped { step } => self.total_ticks.get() + step as u64,
            SimClock::Wall { start } => {
                let nanos = start.elapsed().as_nanos();
                (nanos * self.cpu_hz as u128 / 1_000_000_000) as u64
            }
        };
        self.total_ticks.set(total.max(self.total_ticks.get()));
        self.run_timers();
    }

    fn run_timers(&self) {
        let now = self.counter();
        let mut timers = self.timers.get();
        for timer in BlinkTimer::ALL {
            if let Some(sim_timer) = timers[timer.index()].as_mut() {
                if sim_timer.expired(now) {
                    self.flip(Some(timer));
                }
            }
        }
        self.timers.set(timers);
    }

    fn flip(&self, source: Option<BlinkTimer>) {
        self.led.set(!self.led.get());
        let mut toggles = self.toggles.get();
        match source {
            Some(timer) => toggles.timers[timer.index()] += 1,
            None => toggles.foreground += 1,
        }
        self.toggles.set(toggles);
    }
}

impl<W: embedded_io::Write> Board for SimBoard<W> {
    type Serial = W;

    fn ticks(&self) -> u32 {
        self.advance();
        self.counter()
    }

    fn toggle_led(&self) {
        self.flip(None);
    }

    fn start_blink_timer(&mut self, timer: BlinkTimer, period_us: u32) {
        let period =
            (period_us as u64 * self.cpu_hz as u64 / 1_000_000).clamp(1, u32::MAX as u64);
        let mut timers = self.timers.get();
        timers[timer.index()] = Some(SimTimer {
            last: self.counter(),
            period: period as u32,
        });
        self.timers.set(timers);
    }

    fn serial(&mut self) -> &mut W {
        &mut self.serial
    }

    fn measured_baud(&self) -> u32 {
        self.baud
    }

    fn rtc_seconds(&self) -> u8 {
        self.advance();
        let seconds = self.total_ticks.get() / self.cpu_hz.max(1) as u64;
        (seconds % 60) as u8
    }
}

/// Standard output as a serial transmitter
pub struct StdSerial(std::io::Stdout);

impl StdSerial {
    pub fn stdout() -> Self {
        StdSerial(std::io::stdout())
    }
}

impl embedded_io::ErrorType for StdSerial {
    type Error = std::io::Error;
}

impl embedded_io::Write for StdSerial {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        std::io::Write::write(&mut self.0, buf)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        std::io::Write::flush(&mut self.0)
    }
}
