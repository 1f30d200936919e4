// src/hal.rs

use crate::errors::ReaderError;

/// Signal lines and byte link of the card reader module.
pub trait CardReader {
    /// A card is physically on the reader.
    fn card_present(&mut self) -> Result<bool, ReaderError>;

    /// The reader has a byte ready to be shifted out.
    fn data_ready(&mut self) -> Result<bool, ReaderError>;

    /// Send one byte and return the byte clocked in at the same time.
    fn transfer(&mut self, byte: u8) -> Result<u8, ReaderError>;
}

/// Interrupt control of the timer that paces byte acquisition.
pub trait PeriodicTimer {
    fn enable_periodic_interrupt(&mut self);
    fn disable_periodic_interrupt(&mut self);
}
