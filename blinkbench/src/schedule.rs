/// Ticks from `start` to `end`, correct across one counter wraparound.
pub fn elapsed(start: u32, end: u32) -> u32 {
    end.wrapping_sub(start)
}

/// Fixed-interval deadline on a wrapping tick counter.
///
/// Fires once `now - deadline > interval`, then moves the deadline forward by
/// exactly one interval. The deadline is never resynchronized to `now`, so
/// missed intervals are caught up one poll at a time instead of in a burst.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    next: u32,
    interval: u32,
}

impl Deadline {
    pub const fn new(start: u32, interval: u32) -> Self {
        Self {
            next: start,
            interval,
        }
    }

    pub fn next(&self) -> u32 {
        self.next
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn is_due(&self, now: u32) -> bool {
        elapsed(self.next, now) > self.interval
    }

    /// Returns true, and advances the deadline, when the interval has elapsed.
    pub fn poll(&mut self, now: u32) -> bool {
        if self.is_due(now) {
            self.next = self.next.wrapping_add(self.interval);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_wraps() {
        assert_eq!(elapsed(10, 25), 15);
        assert_eq!(elapsed(u32::MAX - 4, 5), 10);
        assert_eq!(elapsed(7, 7), 0);
    }

    #[test]
    fn test_fires_strictly_after_interval() {
        let mut deadline = Deadline::new(0, 100);
        assert!(!deadline.poll(0));
        assert!(!deadline.poll(100));
        assert!(deadline.poll(101));
        assert_eq!(deadline.next(), 100);
        assert!(!deadline.poll(101));
        assert!(!deadline.poll(200));
        assert!(deadline.poll(201));
        assert_eq!(deadline.next(), 200);
    }

    #[test]
    fn test_advances_by_interval_not_now() {
        let mut deadline = Deadline::new(0, 100);
        assert!(deadline.poll(150));
        assert_eq!(deadline.next(), 100);
        // 150 - 100 = 50, not due yet
        assert!(!deadline.poll(150));
    }

    #[test]
    fn test_stall_catches_up_one_per_poll() {
        let mut deadline = Deadline::new(0, 100);
        // Loop stalled for a bit more than five intervals
        let now = 550;
        let mut fired = 0;
        while deadline.poll(now) {
            fired += 1;
            assert!(fired <= 5);
        }
        // 550 - 400 = 150 > 100 fires, 550 - 500 = 50 doesn't
        assert_eq!(fired, 5);
        assert_eq!(deadline.next(), 500);
    }

    #[test]
    fn test_across_wraparound() {
        let start = u32::MAX - 150;
        let mut deadline = Deadline::new(start, 100);
        assert!(!deadline.poll(u32::MAX - 50));
        assert!(deadline.poll(u32::MAX - 49));
        assert_eq!(deadline.next(), u32::MAX - 50);
        // Counter has wrapped, 49 - (MAX - 50) = 100, not yet
        assert!(!deadline.poll(49));
        assert!(deadline.poll(50));
        assert_eq!(deadline.next(), 49);
    }

    #[test]
    fn test_fires_once_per_window_with_unit_steps() {
        let interval = 1_000;
        let mut deadline = Deadline::new(u32::MAX - 2_500, interval);
        let mut tick = u32::MAX - 2_500;
        let mut fired = 0;
        for _ in 0..10_000 {
            tick = tick.wrapping_add(1);
            if deadline.poll(tick) {
                fired += 1;
            }
        }
        // Windows end at 1001, 2001, .., 9001 ticks past the start
        assert_eq!(fired, 9);
        assert_eq!(deadline.next(), (u32::MAX - 2_500).wrapping_add(9 * interval));
    }
}
