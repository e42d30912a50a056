//! Blink-and-benchmark bring-up sketch
//!
//! A periodic LED toggle driven by a free-running tick counter. Each time the
//! interval elapses the sketch runs a Dhrystone workload, measures how many
//! ticks it took and prints the result together with the configured core
//! clock and the measured UART baud rate.
//!
//! Everything board specific sits behind the [Board] trait, the Feather M0
//! board crate implements it on hardware and [sim::SimBoard] implements it on
//! the host.
//!
//! Basic usage:
//! ```no_run
//! # use blinkbench::{Sketch, SketchConfig};
//! # use blinkbench::sim::{SimBoard, SimClock};
//! let config = SketchConfig::default();
//! let board = SimBoard::new(SimClock::Stepped { step: 1_000 }, config.cpu_hz, config.baud, Vec::new());
//! let mut sketch = Sketch::new(board, config);
//! sketch.setup();
//! loop {
//!     sketch.poll().unwrap();
//! }
//! ```
#![no_std]
// Dual logging system compatibility: defmt doesn't support modern format syntax
#![allow(clippy::uninlined_format_args)]

// Compile-time checks for logging features
#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!("Features 'defmt' and 'log' are mutually exclusive. Enable only one for logging.");

#[cfg(not(any(feature = "defmt", feature = "log")))]
compile_error!("Must enable either 'defmt' or 'log' feature for logging support.");

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "defmt")]
pub(crate) use defmt::{debug, info, trace, warn};

#[cfg(feature = "log")]
pub(crate) use log::{debug, info, trace, warn};

pub mod board;
pub mod config;
pub mod dhrystone;
pub mod errors;
pub mod report;
pub mod schedule;
#[cfg(feature = "std")]
pub mod sim;
pub mod sketch;
pub mod uart;

pub use board::{BlinkTimer, Board};
pub use config::SketchConfig;
pub use errors::Error;
pub use report::Report;
pub use schedule::Deadline;
pub use sketch::Sketch;
