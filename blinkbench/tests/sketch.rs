use blinkbench::report::{BAUD_LABEL, BENCH_LABEL, CPU_LABEL};
use blinkbench::sim::{SimBoard, SimClock};
use blinkbench::{Board, Error, Report, Sketch, SketchConfig};

const CPU_HZ: u32 = 48_000_000;

fn config(interval: u32) -> SketchConfig {
    SketchConfig::new(CPU_HZ)
        .with_led_interval(interval)
        .with_dhrystone_runs(20)
}

fn sketch(step: u32, interval: u32) -> Sketch<SimBoard<Vec<u8>>> {
    let config = config(interval);
    let board = SimBoard::new(SimClock::Stepped { step }, CPU_HZ, config.baud, Vec::new());
    Sketch::new(board, config)
}

fn poll_until_report(sketch: &mut Sketch<SimBoard<Vec<u8>>>, max_polls: u32) -> (u32, Report) {
    for polls in 1..=max_polls {
        if let Some(report) = sketch.poll().unwrap() {
            return (polls, report);
        }
    }
    panic!("no report after {} polls", max_polls);
}

#[test_log::test]
fn first_report_after_one_interval() {
    let mut sketch = sketch(1, 1_000);
    // tick n is observed on poll n, fires when n - 0 > 1000
    let (polls, report) = poll_until_report(&mut sketch, 2_000);
    assert_eq!(polls, 1_001);
    assert_eq!(sketch.deadline().next(), 1_000);
    assert_eq!(report.cpu_hz, CPU_HZ);
    assert_eq!(report.baud, 115_219);
    assert_eq!(sketch.board().toggle_counts().foreground, 1);
}

#[test_log::test]
fn bench_ticks_are_deterministic() {
    let mut first = sketch(250, 10_000);
    let mut second = sketch(250, 10_000);
    for _ in 0..5 {
        let (_, a) = poll_until_report(&mut first, 1_000);
        let (_, b) = poll_until_report(&mut second, 1_000);
        assert_eq!(a, b);
        // one observation between the two captures
        assert_eq!(a.bench_ticks, 250);
        assert_eq!(first.last_bench_ticks(), Some(250));
    }
}

#[test_log::test]
fn bench_ticks_across_counter_wrap() {
    let config = config(100);
    let board = SimBoard::new(SimClock::Stepped { step: 4 }, CPU_HZ, config.baud, Vec::new())
        .with_tick_offset(u32::MAX - 9);
    let mut sketch = Sketch::new(board, config);
    // poll sees MAX - 5, benchmark starts at MAX - 1 and ends at 2
    let report = sketch.poll().unwrap().unwrap();
    assert_eq!(report.bench_ticks, 4);
}

#[test_log::test]
fn serial_output_layout() {
    let mut sketch = sketch(100, 1_000);
    for _ in 0..3 {
        poll_until_report(&mut sketch, 100);
    }
    let text = String::from_utf8(sketch.into_board().into_serial()).unwrap();
    let bursts: Vec<&str> = text.split("\r\n\r\n").filter(|b| !b.is_empty()).collect();
    assert_eq!(bursts.len(), 3);
    for burst in bursts {
        let lines: Vec<&str> = burst.split("\r\n").collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with(BENCH_LABEL));
        assert!(lines[0].ends_with(" 100"));
        assert!(lines[1].starts_with(CPU_LABEL));
        assert!(lines[1].ends_with(" 48000000"));
        assert!(lines[2].starts_with(BAUD_LABEL));
        assert!(lines[2].ends_with(" 115219"));
    }
}

#[test_log::test]
fn stalled_loop_does_not_burst() {
    // each poll observes five intervals worth of ticks
    let mut sketch = sketch(5_000, 1_000);
    let mut reports = 0;
    for _ in 0..10 {
        if sketch.poll().unwrap().is_some() {
            reports += 1;
        }
    }
    assert_eq!(reports, 10);
    // deadline moved one interval per report, it lags behind the counter
    assert_eq!(sketch.deadline().next(), 10 * 1_000);
}

#[test_log::test]
fn blink_timers_toggle_same_led() {
    let mut sketch = sketch(48, 5_000);
    sketch.setup();
    // 48 ticks per observation is 1 us at 48 MHz
    for _ in 0..30_000 {
        sketch.poll().unwrap();
    }
    let board = sketch.board();
    let counts = board.toggle_counts();
    assert!(counts.foreground > 0);
    // 10 ms and 10.1 ms periods
    assert!(counts.timers[0] >= counts.timers[1]);
    assert!(counts.timers[1] > 0);
    assert_eq!(board.led_level(), counts.total() % 2 == 1);
}

#[test_log::test]
fn blink_timer_periods_follow_slow_clock() {
    // 100 kHz: 10 ms is 1000 ticks, 10.1 ms is 1010 ticks
    let config = SketchConfig::new(100_000).with_led_interval(u32::MAX / 2);
    let board = SimBoard::new(SimClock::Stepped { step: 1 }, 100_000, 9600, Vec::new());
    let mut sketch = Sketch::new(board, config);
    sketch.setup();
    for _ in 0..10_099 {
        assert!(sketch.poll().unwrap().is_none());
    }
    assert_eq!(sketch.board().toggle_counts().timers, [10, 9]);
    sketch.poll().unwrap();
    assert_eq!(sketch.board().toggle_counts().timers, [10, 10]);
}

#[test_log::test]
fn rtc_ticks_measures_clock_rate() {
    let config = SketchConfig::new(1_000);
    let board = SimBoard::new(SimClock::Stepped { step: 1 }, 1_000, 9600, Vec::new());
    let mut sketch = Sketch::new(board, config);
    assert_eq!(sketch.rtc_ticks(3), 3_000);
    assert_eq!(sketch.rtc_ticks(1), 1_000);
}

struct Unplugged;

impl embedded_io::ErrorType for Unplugged {
    type Error = embedded_io::ErrorKind;
}

impl embedded_io::Write for Unplugged {
    fn write(&mut self, _buf: &[u8]) -> Result<usize, Self::Error> {
        Err(embedded_io::ErrorKind::BrokenPipe)
    }
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[test_log::test]
fn serial_failure_is_returned() {
    let config = config(10);
    let board = SimBoard::new(SimClock::Stepped { step: 100 }, CPU_HZ, config.baud, Unplugged);
    let mut sketch = Sketch::new(board, config);
    let result = sketch.poll();
    assert_eq!(result, Err(Error::Write(embedded_io::ErrorKind::BrokenPipe)));
    // the LED was still toggled and the benchmark measured
    assert_eq!(sketch.board().toggle_counts().foreground, 1);
    assert_eq!(sketch.last_bench_ticks(), Some(100));
    assert_eq!(sketch.board_mut().ticks(), 400);
}
