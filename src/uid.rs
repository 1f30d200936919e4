use core::fmt::{Display, Formatter, Result};
use ufmt::{uDisplay, uWrite};

/// Number of bytes the reader streams per card.
pub const UID_LEN: usize = 8;

/// Serial number of a card as streamed by the reader.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Uid(pub [u8; UID_LEN]);

fn hex_digit(nibble: u8) -> char {
    match nibble {
        0..=9 => (b'0' + nibble) as char,
        _ => (b'A' + nibble - 10) as char,
    }
}

fn hex_digits(byte: u8) -> [char; 2] {
    [hex_digit(byte >> 4), hex_digit(byte & 0x0F)]
}

impl Uid {
    /// All bytes 0x00 or all 0xFF, which is what a stuck or floating bus reads.
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|&b| b == 0x00) || self.0.iter().all(|&b| b == 0xFF)
    }
}

impl Display for Uid {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for &byte in &self.0 {
            for c in hex_digits(byte) {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

impl uDisplay for Uid {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<W>) -> core::result::Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        for &byte in &self.0 {
            for c in hex_digits(byte) {
                f.write_char(c)?;
            }
        }
        Ok(())
    }
}
