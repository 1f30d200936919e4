use core::fmt::{Debug, Formatter, Result};
use ufmt::{uDebug, uWrite};

/// Failure of one of the reader link primitives.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ReaderError {
    /// The SPI transfer did not complete.
    Communication,
    /// Reading the presence or data-ready line failed.
    Pin,
    /// Driving the chip select line failed.
    ChipSelect,
}

/// Why an in-progress card read was given up.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ReadAbort {
    /// The reader never raised data-ready after the UID request.
    NoData,
    /// Byte acquisition stopped making progress.
    Stalled { received: u8 },
    /// The UID was all 0x00 or all 0xFF.
    BlankUid,
    Link(ReaderError),
}

impl From<ReaderError> for ReadAbort {
    fn from(err: ReaderError) -> Self {
        ReadAbort::Link(err)
    }
}

impl Debug for ReaderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ReaderError::Communication => write!(f, "CommunicationError"),
            ReaderError::Pin => write!(f, "PinError"),
            ReaderError::ChipSelect => write!(f, "ChipSelectError"),
        }
    }
}

impl uDebug for ReaderError {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<W>) -> core::result::Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        match self {
            ReaderError::Communication => f.write_str("CommunicationError"),
            ReaderError::Pin => f.write_str("PinError"),
            ReaderError::ChipSelect => f.write_str("ChipSelectError"),
        }
    }
}

impl Debug for ReadAbort {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ReadAbort::NoData => write!(f, "NoData"),
            ReadAbort::Stalled { received } => write!(f, "Stalled after {} bytes", received),
            ReadAbort::BlankUid => write!(f, "BlankUid"),
            ReadAbort::Link(err) => write!(f, "Link {:?}", err),
        }
    }
}

impl uDebug for ReadAbort {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<W>) -> core::result::Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        match self {
            ReadAbort::NoData => f.write_str("NoData"),
            ReadAbort::Stalled { received } => ufmt::uwrite!(f, "Stalled after {} bytes", *received),
            ReadAbort::BlankUid => f.write_str("BlankUid"),
            ReadAbort::Link(err) => ufmt::uwrite!(f, "Link {:?}", err),
        }
    }
}
