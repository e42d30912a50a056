use embedded_hal_nb::serial::{self, Error as _};

/// UART transmitter failure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SerialError(pub serial::ErrorKind);

impl embedded_io::Error for SerialError {
    fn kind(&self) -> embedded_io::ErrorKind {
        embedded_io::ErrorKind::Other
    }
}

impl defmt::Format for SerialError {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "UART error {}", defmt::Debug2Format(&self.0))
    }
}

/// Blocking [embedded_io::Write] over a non-blocking byte transmitter.
pub struct SerialPort<U> {
    uart: U,
}

impl<U: serial::Write<u8>> SerialPort<U> {
    pub fn new(uart: U) -> Self {
        Self { uart }
    }

    pub fn free(self) -> U {
        self.uart
    }
}

impl<U: serial::Write<u8>> embedded_io::ErrorType for SerialPort<U> {
    type Error = SerialError;
}

impl<U: serial::Write<u8>> embedded_io::Write for SerialPort<U> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        for byte in buf {
            nb::block!(self.uart.write(*byte)).map_err(|e| SerialError(e.kind()))?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        nb::block!(self.uart.flush()).map_err(|e| SerialError(e.kind()))
    }
}
