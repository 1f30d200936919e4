use ufmt::{uWrite, uwriteln};

use crate::errors::ReadAbort;
use crate::sequencer::SequencerState;
use crate::uid::Uid;

/// Where the sequencer delivers its results.
pub trait Reporter {
    /// A full UID was read and the card has been taken off the reader.
    fn card_read(&mut self, uid: &Uid);

    /// A read was given up before completion.
    fn read_aborted(&mut self, reason: ReadAbort);

    fn state_changed(&mut self, _from: SequencerState, _to: SequencerState) {}
}

/// Line based reporting on a serial port.
///
/// ```text
/// UID 04129A3C55667788
/// ABORT NoData
/// STATE Idle -> CardPresent
/// ```
pub struct SerialReporter<W> {
    serial: W,
    trace: bool,
}

impl<W: uWrite> SerialReporter<W> {
    pub fn new(serial: W) -> Self {
        SerialReporter {
            serial,
            trace: false,
        }
    }

    /// Also print every state transition.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn serial(&mut self) -> &mut W {
        &mut self.serial
    }

    pub fn release(self) -> W {
        self.serial
    }
}

impl<W: uWrite> Reporter for SerialReporter<W> {
    fn card_read(&mut self, uid: &Uid) {
        uwriteln!(self.serial, "UID {}\r", uid).ok();
    }

    fn read_aborted(&mut self, reason: ReadAbort) {
        uwriteln!(self.serial, "ABORT {:?}\r", reason).ok();
    }

    fn state_changed(&mut self, from: SequencerState, to: SequencerState) {
        if self.trace {
            uwriteln!(self.serial, "STATE {:?} -> {:?}\r", from, to).ok();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::ReaderError;
    use std::string::String;

    struct Line(String);

    impl uWrite for Line {
        type Error = core::convert::Infallible;

        fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
            self.0.push_str(s);
            Ok(())
        }
    }

    #[test]
    fn test_card_read() {
        let mut rep = SerialReporter::new(Line(String::new()));
        rep.card_read(&Uid([0x04, 0x12, 0x9A, 0x3C, 0x55, 0x66, 0x77, 0x88]));
        assert_eq!(rep.release().0, "UID 04129A3C55667788\r\n");
    }

    #[test]
    fn test_abort() {
        let mut rep = SerialReporter::new(Line(String::new()));
        rep.read_aborted(ReadAbort::NoData);
        rep.read_aborted(ReadAbort::Stalled { received: 3 });
        rep.read_aborted(ReadAbort::Link(ReaderError::Communication));
        assert_eq!(
            rep.release().0,
            "ABORT NoData\r\nABORT Stalled after 3 bytes\r\nABORT Link CommunicationError\r\n"
        );
    }

    #[test]
    fn test_trace() {
        let mut rep = SerialReporter::new(Line(String::new()));
        rep.state_changed(SequencerState::Idle, SequencerState::CardPresent);
        assert_eq!(rep.serial().0, "");

        let mut rep = rep.with_trace(true);
        rep.state_changed(SequencerState::Idle, SequencerState::CardPresent);
        assert_eq!(rep.release().0, "STATE Idle -> CardPresent\r\n");
    }
}
