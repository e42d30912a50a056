#![cfg_attr(not(test), no_std)]

//! Provides a SysTick based free-running cycle counter.
//!
//! Cortex-M0/M0+ cores have no DWT cycle counter. This crate builds one out
//! of SysTick: the 24-bit down-counter supplies the low part, and the
//! SysTick exception counts reloads. The result counts core clock cycles
//! and wraps at `u32::MAX` like a hardware cycle counter would.
//!
//! Usage:
//! ```ignore
//! use systick_timer::CycleCounter;
//! // Reload every 10ms on a 48MHz core
//! static COUNTER: CycleCounter = CycleCounter::new(479_999);
//!
//! COUNTER.start(&mut cortex_m::Peripherals::take().unwrap().SYST);
//! let start = COUNTER.ticks();
//! // .. work ..
//! let cycles = COUNTER.ticks().wrapping_sub(start);
//! ```
//!
//! The SysTick exception handler must forward to the counter:
//!
//! ```ignore
//! #[exception]
//! fn SysTick() {
//!     COUNTER.systick_handler();
//! }
//! ```
//!
//! A larger reload value means fewer interrupts, the maximum is
//! `16_777_215`, which reloads about every 350ms at 48MHz.

mod counter;
pub use counter::CycleCounter;
pub use counter::MAX_RELOAD;
