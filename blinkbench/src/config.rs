use core::str::FromStr;

/// Core clock the sketch assumes unless told otherwise
pub const DEFAULT_CPU_HZ: u32 = 48_000_000;
pub const DEFAULT_BAUD: u32 = 115_200;
pub const DEFAULT_DHRYSTONE_RUNS: u32 = 10_000;
/// Blink timer periods in microseconds. Slightly detuned so the two
/// interrupt toggles drift against each other.
pub const DEFAULT_BLINK_TIMER_PERIODS_US: [u32; 2] = [10_000, 10_100];

/// Compile-time configuration of the sketch.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SketchConfig {
    /// Core clock in Hz, reported as `F_CPU`
    pub cpu_hz: u32,
    /// Requested UART baud rate
    pub baud: u32,
    /// Ticks between two LED toggles of the polling loop
    pub led_interval: u32,
    pub blink_timer_periods_us: [u32; 2],
    pub dhrystone_runs: u32,
}

impl SketchConfig {
    /// Defaults for a core running at `cpu_hz`: the LED toggles every half
    /// second.
    pub const fn new(cpu_hz: u32) -> Self {
        Self {
            cpu_hz,
            baud: DEFAULT_BAUD,
            led_interval: cpu_hz / 2,
            blink_timer_periods_us: DEFAULT_BLINK_TIMER_PERIODS_US,
            dhrystone_runs: DEFAULT_DHRYSTONE_RUNS,
        }
    }

    pub const fn with_baud(mut self, baud: u32) -> Self {
        self.baud = baud;
        self
    }

    pub const fn with_led_interval(mut self, led_interval: u32) -> Self {
        self.led_interval = led_interval;
        self
    }

    pub const fn with_dhrystone_runs(mut self, runs: u32) -> Self {
        self.dhrystone_runs = runs;
        self
    }

    pub const fn with_blink_timer_periods_us(mut self, periods: [u32; 2]) -> Self {
        self.blink_timer_periods_us = periods;
        self
    }

    /// Defaults for `cpu_hz`, overridden by `BLINKBENCH_INTERVAL` and
    /// `BLINKBENCH_RUNS` if they were set when the crate was built.
    pub fn from_env(cpu_hz: u32) -> Self {
        let mut config = Self::new(cpu_hz);
        if let Some(interval) = parse_env(option_env!("BLINKBENCH_INTERVAL")) {
            config.led_interval = interval;
        }
        if let Some(runs) = parse_env(option_env!("BLINKBENCH_RUNS")) {
            config.dhrystone_runs = runs;
        }
        config
    }
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CPU_HZ)
    }
}

fn parse_env(value: Option<&str>) -> Option<u32> {
    value.and_then(|v| u32::from_str(v.trim()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SketchConfig::default();
        assert_eq!(config.cpu_hz, 48_000_000);
        assert_eq!(config.led_interval, 24_000_000);
        assert_eq!(config.baud, 115_200);
        assert_eq!(config.blink_timer_periods_us, [10_000, 10_100]);
    }

    #[test]
    fn test_builders() {
        let config = SketchConfig::new(4_000_000)
            .with_baud(9600)
            .with_led_interval(1000)
            .with_dhrystone_runs(5)
            .with_blink_timer_periods_us([1, 2]);
        assert_eq!(config.led_interval, 1000);
        assert_eq!(config.baud, 9600);
        assert_eq!(config.dhrystone_runs, 5);
        assert_eq!(config.blink_timer_periods_us, [1, 2]);
    }

    #[test]
    fn test_parse_env() {
        assert_eq!(parse_env(None), None);
        assert_eq!(parse_env(Some("1234")), Some(1234));
        assert_eq!(parse_env(Some(" 77 ")), Some(77));
        assert_eq!(parse_env(Some("lots")), None);
    }
}
