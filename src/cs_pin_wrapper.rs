// src/cs_pin_wrapper.rs

use embedded_hal::digital::OutputPin;

use crate::errors::ReaderError;

/// Active low chip select of the reader's SPI slave.
pub struct ChipSelect<CS> {
    cs: CS,
}

impl<CS> ChipSelect<CS>
where
    CS: OutputPin,
{
    pub fn new(cs: CS) -> Self {
        ChipSelect { cs }
    }

    pub fn select(&mut self) -> Result<(), ReaderError> {
        self.cs.set_low().map_err(|_| ReaderError::ChipSelect)
    }

    pub fn deselect(&mut self) -> Result<(), ReaderError> {
        self.cs.set_high().map_err(|_| ReaderError::ChipSelect)
    }

    pub fn release(self) -> CS {
        self.cs
    }
}
