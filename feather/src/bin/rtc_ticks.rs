//! Measures core cycles per RTC second, one line per second on the UART.

#![no_main]
#![no_std]

use feather::init::{init, FailureSource};
use feather::{error, info};

use blinkbench::report::write_line;
use blinkbench::{Board, Sketch, SketchConfig};

fn program() -> Result<(), FailureSource> {
    let board = init()?;
    let config = SketchConfig::new(board.cpu_hz());
    let mut sketch = Sketch::new(board, config);
    info!("Hello, RTC ticks");

    loop {
        let ticks = sketch.rtc_ticks(1);
        sketch.board().toggle_led();
        if let Err(err) = write_line(sketch.board_mut().serial(), "rtcTks(1) =", ticks) {
            error!("Serial write failed: {}", err);
        }
    }
}

#[cortex_m_rt::entry]
fn main() -> ! {
    if let Err(err) = program() {
        info!("Bad error {}", err);
        panic!("Error in main program");
    }
    loop {}
}
