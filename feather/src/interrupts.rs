//! Interrupt handlers and the state they share with the foreground loop

use super::bsp;
use super::hal;

use core::cell::RefCell;
use cortex_m::interrupt::{CriticalSection, Mutex};
use cortex_m_rt::exception;

use bsp::pac::interrupt;
use hal::ehal::digital::StatefulOutputPin;
use hal::timer::{TimerCounter4, TimerCounter5};
use hal::timer_traits::InterruptDrivenTimer;

use systick_timer::{CycleCounter, MAX_RELOAD};

/// Core cycle counter, one SysTick reload every 2^24 cycles
pub(crate) static COUNTER: CycleCounter = CycleCounter::new(MAX_RELOAD);

pub(crate) static LED: Mutex<RefCell<Option<bsp::RedLed>>> = Mutex::new(RefCell::new(None));
pub(crate) static TC4_TIMER: Mutex<RefCell<Option<TimerCounter4>>> =
    Mutex::new(RefCell::new(None));
pub(crate) static TC5_TIMER: Mutex<RefCell<Option<TimerCounter5>>> =
    Mutex::new(RefCell::new(None));

/// Inverts the LED. No-op until the initializer has stored the pin.
pub(crate) fn toggle_led(cs: &CriticalSection) {
    if let Some(led) = LED.borrow(cs).borrow_mut().as_mut() {
        let _ = led.toggle();
    }
}

#[exception]
fn SysTick() {
    COUNTER.systick_handler();
}

#[interrupt]
fn TC4() {
    cortex_m::interrupt::free(|cs| {
        // clears the overflow flag
        if let Some(timer) = TC4_TIMER.borrow(cs).borrow_mut().as_mut() {
            let _ = timer.wait();
        }
        toggle_led(cs);
    });
}

#[interrupt]
fn TC5() {
    cortex_m::interrupt::free(|cs| {
        if let Some(timer) = TC5_TIMER.borrow(cs).borrow_mut().as_mut() {
            let _ = timer.wait();
        }
        toggle_led(cs);
    });
}
