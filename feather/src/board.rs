use super::bsp;
use super::hal;

use bsp::pac;
use cortex_m::interrupt;
use cortex_m::peripheral::NVIC;

use hal::rtc::{Count32Mode, Rtc};
use hal::time::Nanoseconds;
use hal::timer::{TimerCounter4, TimerCounter5};
use hal::timer_traits::InterruptDrivenTimer;

use blinkbench::{uart, BlinkTimer, Board};

use super::interrupts::{self, COUNTER, TC4_TIMER, TC5_TIMER};
use super::shared::SerialPort;

pub type Serial = SerialPort<bsp::Uart>;

/// [Board] implementation for the Feather M0.
///
/// Ticks are core clock cycles. TC4 and TC5 are the two blink timers.
pub struct FeatherBoard {
    serial: Serial,
    rtc: Rtc<Count32Mode>,
    rtc_hz: u32,
    cpu_hz: u32,
    tc4: Option<TimerCounter4>,
    tc5: Option<TimerCounter5>,
}

impl FeatherBoard {
    pub(crate) fn new(
        serial: Serial,
        rtc: Rtc<Count32Mode>,
        rtc_hz: u32,
        cpu_hz: u32,
        tc4: TimerCounter4,
        tc5: TimerCounter5,
    ) -> Self {
        Self {
            serial,
            rtc,
            rtc_hz,
            cpu_hz,
            tc4: Some(tc4),
            tc5: Some(tc5),
        }
    }

    /// Core clock, also the SERCOM reference clock
    pub fn cpu_hz(&self) -> u32 {
        self.cpu_hz
    }
}

impl Board for FeatherBoard {
    type Serial = Serial;

    fn ticks(&self) -> u32 {
        COUNTER.ticks()
    }

    fn toggle_led(&self) {
        interrupt::free(interrupts::toggle_led);
    }

    fn start_blink_timer(&mut self, timer: BlinkTimer, period_us: u32) {
        let period = Nanoseconds::micros(period_us);
        match timer {
            BlinkTimer::First => {
                let Some(mut tc) = self.tc4.take() else {
                    crate::warn!("TC4 already running");
                    return;
                };
                tc.start(period);
                tc.enable_interrupt();
                interrupt::free(|cs| TC4_TIMER.borrow(cs).replace(Some(tc)));
                unsafe { NVIC::unmask(pac::Interrupt::TC4) };
            }
            BlinkTimer::Second => {
                let Some(mut tc) = self.tc5.take() else {
                    crate::warn!("TC5 already running");
                    return;
                };
                tc.start(period);
                tc.enable_interrupt();
                interrupt::free(|cs| TC5_TIMER.borrow(cs).replace(Some(tc)));
                unsafe { NVIC::unmask(pac::Interrupt::TC5) };
            }
        }
    }

    fn serial(&mut self) -> &mut Self::Serial {
        &mut self.serial
    }

    fn measured_baud(&self) -> u32 {
        // SERCOM0 carries the bsp UART
        let sercom = unsafe { &*pac::Sercom0::ptr() };
        let reg = sercom.usart().baud().read().bits();
        uart::baud_from_register(self.cpu_hz, reg)
    }

    fn rtc_seconds(&self) -> u8 {
        ((self.rtc.count32() / self.rtc_hz) % 60) as u8
    }
}
