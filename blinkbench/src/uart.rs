//! Baud arithmetic of the SERCOM USART arithmetic baud generator
//!
//! With 16x oversampling the generator is programmed with
//! `BAUD = 65536 * (1 - 16 * f_baud / f_ref)` and produces
//! `f_baud = f_ref * (65536 - BAUD) / (16 * 65536)`.

const OVERSAMPLING: u64 = 16;
const SCALE: u64 = 65536;

/// Register value for `baud` with a `ref_hz` SERCOM core clock.
///
/// `None` if the rate can't be generated from this clock.
pub fn baud_register(ref_hz: u32, baud: u32) -> Option<u16> {
    let ref_hz = ref_hz as u64;
    let sampled = OVERSAMPLING * baud as u64;
    if baud == 0 || sampled >= ref_hz {
        return None;
    }
    let reg = SCALE * (ref_hz - sampled) / ref_hz;
    u16::try_from(reg).ok()
}

/// Baud rate actually produced by register value `reg`.
pub fn baud_from_register(ref_hz: u32, reg: u16) -> u32 {
    let rate = ref_hz as u64 * (SCALE - reg as u64) / (OVERSAMPLING * SCALE);
    rate as u32
}

/// Rate the hardware really runs at when asked for `baud`.
pub fn achieved_baud(ref_hz: u32, baud: u32) -> Option<u32> {
    baud_register(ref_hz, baud).map(|reg| baud_from_register(ref_hz, reg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_115200_at_48mhz() {
        let reg = baud_register(48_000_000, 115_200).unwrap();
        assert_eq!(reg, 63019);
        assert_eq!(baud_from_register(48_000_000, reg), 115_219);
    }

    #[test]
    fn test_achieved_within_a_percent() {
        for baud in [9600, 19_200, 57_600, 115_200, 230_400, 1_000_000] {
            let achieved = achieved_baud(48_000_000, baud).unwrap();
            let error = achieved.abs_diff(baud);
            assert!(error * 100 < baud, "{} -> {}", baud, achieved);
        }
    }

    #[test]
    fn test_unreachable_rates() {
        assert_eq!(baud_register(48_000_000, 0), None);
        assert_eq!(baud_register(48_000_000, 3_000_000), None);
        assert_eq!(baud_register(0, 9600), None);
        assert_eq!(achieved_baud(1_000_000, 115_200), None);
    }

    #[test]
    fn test_register_extremes() {
        assert_eq!(baud_from_register(48_000_000, 0), 3_000_000);
        assert_eq!(baud_from_register(48_000_000, u16::MAX), 45);
    }
}
