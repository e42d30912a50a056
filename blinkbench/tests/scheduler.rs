use blinkbench::schedule::elapsed;
use blinkbench::Deadline;

struct UnitTicks(u32);

impl UnitTicks {
    fn next(&mut self) -> u32 {
        self.0 = self.0.wrapping_add(1);
        self.0
    }
}

#[test]
fn half_billion_interval_fires_once() {
    const INTERVAL: u32 = 500_000_000;
    let mut ticks = UnitTicks(0);
    let mut deadline = Deadline::new(0, INTERVAL);
    let mut fired = 0;
    for _ in 0..500_000_001u32 {
        if deadline.poll(ticks.next()) {
            fired += 1;
        }
    }
    assert_eq!(fired, 1);
    assert_eq!(deadline.next(), 500_000_000);
    assert!(!deadline.poll(ticks.next()));
}

#[test]
fn windows_across_wraparound() {
    const INTERVAL: u32 = 1 << 20;
    let start = u32::MAX - 3 * INTERVAL;
    let mut ticks = UnitTicks(start);
    let mut deadline = Deadline::new(start, INTERVAL);
    let mut fire_ticks = Vec::new();
    for _ in 0..(6 * INTERVAL + 10) {
        let now = ticks.next();
        if deadline.poll(now) {
            fire_ticks.push(now);
        }
    }
    assert_eq!(fire_ticks.len(), 6);
    for (k, tick) in fire_ticks.iter().enumerate() {
        // once per window, one tick after the window closes
        assert_eq!(elapsed(start, *tick), (k as u32 + 1) * INTERVAL + 1);
    }
    assert_eq!(deadline.next(), start.wrapping_add(6 * INTERVAL));
}
