use embedded_io::WriteFmtError;

/// Errors while emitting the diagnostic report.
///
/// `E` is the error type of the board's serial transmitter.
#[derive(Debug, PartialEq)]
pub enum Error<E> {
    /// Serial transmitter failed
    Write(E),
    /// A report line could not be formatted
    Format,
}

impl<E> From<WriteFmtError<E>> for Error<E> {
    fn from(v: WriteFmtError<E>) -> Self {
        match v {
            WriteFmtError::Other(e) => Self::Write(e),
            WriteFmtError::FmtError => Self::Format,
        }
    }
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Write(_) => defmt::write!(f, "Serial write failed"),
            Self::Format => defmt::write!(f, "Report formatting failed"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Write(e) => write!(f, "serial write failed: {:?}", e),
            Self::Format => write!(f, "report formatting failed"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for Error<E> {}
