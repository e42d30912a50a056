// SPDX-License-Identifier: Apache-2.0

use core::sync::atomic::{AtomicU32, Ordering};

/// Largest value the 24-bit SysTick reload register holds
pub const MAX_RELOAD: u32 = (1 << 24) - 1;

/// A free-running cycle counter based on SysTick.
///
/// Stores reload counts in 2 32-bit atomics, so the full cycle count is
/// 64 bits wide. [CycleCounter::ticks] truncates it to 32 bits.
pub struct CycleCounter {
    inner_wraps: AtomicU32, // Counts SysTick interrupts (lower 32 bits)
    outer_wraps: AtomicU32, // Counts overflows of inner_wraps (upper 32 bits)
    reload_value: u32,      // SysTick reload value (max 2^24 - 1)
    #[cfg(test)]
    current_systick: u32,
}

impl CycleCounter {
    /// Creates a counter for a SysTick reloading at `reload_value`.
    ///
    /// One reload period is `reload_value + 1` core cycles.
    ///
    /// # Panics
    ///
    /// * If `reload_value` is 0 or greater than [MAX_RELOAD]
    ///
    /// # Examples
    ///
    /// ```
    /// # use systick_timer::CycleCounter;
    /// // Reload every 10ms on a 48MHz core
    /// let counter = CycleCounter::new(479_999);
    /// assert_eq!(counter.reload_value(), 479_999);
    /// ```
    pub const fn new(reload_value: u32) -> Self {
        if reload_value > MAX_RELOAD {
            panic!("Reload value too large");
        }
        if reload_value == 0 {
            panic!("Reload value cannot be 0");
        }
        CycleCounter {
            inner_wraps: AtomicU32::new(0),
            outer_wraps: AtomicU32::new(0),
            reload_value,
            #[cfg(test)]
            current_systick: 0,
        }
    }

    pub const fn reload_value(&self) -> u32 {
        self.reload_value
    }

    /// SysTick handler.
    ///
    /// Call this from the SysTick exception handler.
    pub fn systick_handler(&self) {
        let inner = self.inner_wraps.load(Ordering::Relaxed);
        self.inner_wraps
            .store(inner.wrapping_add(1), Ordering::SeqCst);
        if inner == u32::MAX {
            let outer = self.outer_wraps.load(Ordering::Relaxed).wrapping_add(1);
            self.outer_wraps.store(outer, Ordering::SeqCst);
        }
    }

    /// Handler variant for nested interrupts.
    ///
    /// Call this instead of systick_handler from the exception handler if
    /// other interrupts can preempt SysTick.
    #[cfg(feature = "cortex-m")]
    pub fn systick_handler_for_nested(&self) {
        cortex_m::interrupt::free(|_| {
            self.systick_handler();
        })
    }

    /// Core cycles since [CycleCounter::start], 64 bits wide.
    pub fn cycles(&self) -> u64 {
        // Lock-free: retry if a reload happened between the two loads
        loop {
            let inner1 = self.inner_wraps.load(Ordering::SeqCst) as u64;
            let outer = self.outer_wraps.load(Ordering::SeqCst) as u64;
            let current = self.get_syst() as u64;
            let inner2 = self.inner_wraps.load(Ordering::SeqCst) as u64;
            if inner1 == inner2 {
                let reload = self.reload_value as u64;
                let total_interrupts = (outer << 32) | inner1;
                // SysTick counts down from reload to 0
                return total_interrupts
                    .wrapping_mul(reload + 1)
                    .wrapping_add(reload - current.min(reload));
            }
        }
    }

    /// Free-running 32-bit tick counter, one tick per core cycle.
    pub fn ticks(&self) -> u32 {
        self.cycles() as u32
    }

    fn get_syst(&self) -> u32 {
        #[cfg(test)]
        return self.current_systick;

        #[cfg(all(not(test), feature = "cortex-m"))]
        return cortex_m::peripheral::SYST::get_current();

        #[cfg(all(not(test), not(feature = "cortex-m")))]
        panic!("This module requires the cortex-m crate to be available");
    }

    /// Configures SysTick for the core clock and starts counting.
    #[cfg(feature = "cortex-m")]
    pub fn start(&self, syst: &mut cortex_m::peripheral::SYST) {
        syst.set_clock_source(cortex_m::peripheral::syst::SystClkSource::Core);
        syst.set_reload(self.reload_value);
        syst.clear_current();
        syst.enable_interrupt();
        syst.enable_counter();
    }
}
