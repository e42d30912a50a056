use crate::errors::Error;

/// Labels are padded to this many columns before the value
pub const LABEL_WIDTH: usize = 30;
pub const LINE_END: &str = "\r\n";

pub const BENCH_LABEL: &str = "ticks =";
pub const CPU_LABEL: &str = "F_CPU =";
pub const BAUD_LABEL: &str = "u0bps =";

/// One burst of diagnostic counters.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    /// Ticks spent in one benchmark invocation
    pub bench_ticks: u32,
    pub cpu_hz: u32,
    pub baud: u32,
}

impl Report {
    /// Label and value of each line, in transmission order.
    pub fn lines(&self) -> [(&'static str, u32); 3] {
        [
            (BENCH_LABEL, self.bench_ticks),
            (CPU_LABEL, self.cpu_hz),
            (BAUD_LABEL, self.baud),
        ]
    }

    /// Writes every line followed by a blank line.
    pub fn write_to<W: embedded_io::Write>(&self, out: &mut W) -> Result<(), Error<W::Error>> {
        for (label, value) in self.lines() {
            write_line(out, label, value)?;
        }
        out.write_all(LINE_END.as_bytes()).map_err(Error::Write)
    }
}

/// `<label><padding><value>\r\n`
pub fn write_line<W: embedded_io::Write>(
    out: &mut W,
    label: &str,
    value: u32,
) -> Result<(), Error<W::Error>> {
    write!(
        out,
        "{:<width$}{}{}",
        label,
        value,
        LINE_END,
        width = LABEL_WIDTH
    )?;
    Ok(())
}
