//! Blinks the red LED every half second, benchmarking each toggle.
//!
//! Reports go out on the D1 UART pin at 115200 baud, logs over RTT.

#![no_main]
#![no_std]

use feather::init::{init, FailureSource};
use feather::{error, info};

use blinkbench::{Sketch, SketchConfig};

fn program() -> Result<(), FailureSource> {
    let board = init()?;
    let config = SketchConfig::from_env(board.cpu_hz());
    info!("Hello, blinkbench {}", config);

    let mut sketch = Sketch::new(board, config);
    sketch.setup();
    loop {
        match sketch.poll() {
            Ok(Some(report)) => feather::debug!("Sent {}", report),
            Ok(None) => {}
            Err(err) => error!("Report failed: {}", err),
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
