use super::bsp;
use super::hal;

use bsp::pac;

use pac::{CorePeripherals, Peripherals};

use bsp::periph_alias;
use bsp::pin_alias;
use core::convert::Infallible;
use hal::clock::GenericClockController;
use hal::rtc::Rtc;
use hal::time::Hertz;
use hal::timer::TimerCounter;

use hal::prelude::*;

use blinkbench::config::{DEFAULT_BAUD, DEFAULT_CPU_HZ};

use super::board::FeatherBoard;
use super::interrupts::{COUNTER, LED};
use super::shared::SerialPort;

#[derive(Debug, defmt::Format)]
pub enum FailureSource {
    Periph,
    Core,
    Clock,
}

impl From<Infallible> for FailureSource {
    fn from(v: Infallible) -> Self {
        match v {}
    }
}

/// Brings up clocks, LED, UART, RTC and the cycle counter.
///
/// The blink timers are clocked but not started, see
/// [blinkbench::Board::start_blink_timer].
pub fn init() -> Result<FeatherBoard, FailureSource> {
    let mut peripherals = Peripherals::take().ok_or(FailureSource::Periph)?;
    let mut core = CorePeripherals::take().ok_or(FailureSource::Core)?;

    let mut clocks = GenericClockController::with_internal_32kosc(
        peripherals.gclk,
        &mut peripherals.pm,
        &mut peripherals.sysctrl,
        &mut peripherals.nvmctrl,
    );

    let gclk0 = clocks.gclk0();
    let hertz: Hertz = clocks.gclk0().into();
    if hertz.raw() != DEFAULT_CPU_HZ {
        crate::warn!("Core clock {} Hz, expected {}", hertz.raw(), DEFAULT_CPU_HZ);
    }

    let pins = bsp::pins::Pins::new(peripherals.port);
    let mut red_led: bsp::RedLed = pin_alias!(pins.red_led).into();
    red_led.set_low()?;
    cortex_m::interrupt::free(|cs| LED.borrow(cs).replace(Some(red_led)));

    let uart = bsp::uart(
        &mut clocks,
        Hertz::from_raw(DEFAULT_BAUD),
        periph_alias!(peripherals.uart_sercom),
        &mut peripherals.pm,
        pins.d0,
        pins.d1,
    );

    let timer_clock = clocks.tc4_tc5(&gclk0).ok_or(FailureSource::Clock)?;
    let tc4 = TimerCounter::tc4_(&timer_clock, peripherals.tc4, &mut peripherals.pm);
    let tc5 = TimerCounter::tc5_(&timer_clock, peripherals.tc5, &mut peripherals.pm);

    // GCLK1 runs from the 32.768kHz oscillator
    let gclk1 = clocks.gclk1();
    let rtc_clock = clocks.rtc(&gclk1).ok_or(FailureSource::Clock)?;
    let rtc = Rtc::count32_mode(peripherals.rtc, rtc_clock.freq(), &mut peripherals.pm);

    COUNTER.start(&mut core.SYST);
    crate::debug!("Clocks at {} Hz, RTC at {} Hz", hertz.raw(), rtc_clock.freq().raw());

    Ok(FeatherBoard::new(
        SerialPort::new(uart),
        rtc,
        rtc_clock.freq().raw(),
        hertz.raw(),
        tc4,
        tc5,
    ))
}
