/// The two hardware timers that toggle the LED from interrupt context.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkTimer {
    First,
    Second,
}

impl BlinkTimer {
    pub const ALL: [BlinkTimer; 2] = [BlinkTimer::First, BlinkTimer::Second];

    pub fn index(self) -> usize {
        match self {
            BlinkTimer::First => 0,
            BlinkTimer::Second => 1,
        }
    }
}

/// Hardware primitives the sketch runs on.
///
/// Implementations own the LED, the serial transmitter, the blink timers,
/// the tick counter and the RTC second counter. Clock and pin setup happen
/// before the board value is handed to [crate::Sketch].
pub trait Board {
    /// Serial transmitter the report is written to
    type Serial: embedded_io::Write;

    /// Free-running tick counter, wraps at `u32::MAX`.
    ///
    /// Never reset after initialization. Safe to call from any context.
    fn ticks(&self) -> u32;

    /// Inverts the LED output level.
    ///
    /// Must be atomic with respect to the blink timer interrupts, which
    /// toggle the same pin.
    fn toggle_led(&self);

    /// Starts `timer` with a period of `period_us` microseconds, its
    /// interrupt handler toggles the LED.
    fn start_blink_timer(&mut self, timer: BlinkTimer, period_us: u32);

    fn serial(&mut self) -> &mut Self::Serial;

    /// Baud rate recovered from the UART divisor, not the requested rate.
    fn measured_baud(&self) -> u32;

    /// Current value of the RTC seconds counter.
    fn rtc_seconds(&self) -> u8;

    /// Blocks until the RTC seconds counter changes.
    fn wait_rtc_second(&self) {
        let start = self.rtc_seconds();
        while self.rtc_seconds() == start {
            core::hint::spin_loop();
        }
    }
}
