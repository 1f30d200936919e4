use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiBus;

use crate::cs_pin_wrapper::ChipSelect;
use crate::errors::ReaderError;
use crate::hal::CardReader;

/// MicroRWD reader module on an SPI link plus its two status lines.
///
/// Both status lines are active high. Every byte is framed by its own
/// chip select pulse.
pub struct MicroRwd<SPI, CS, PRES, RDY> {
    spi: SPI,
    cs: ChipSelect<CS>,
    presence: PRES,
    ready: RDY,
}

impl<SPI, CS, PRES, RDY> MicroRwd<SPI, CS, PRES, RDY>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    PRES: InputPin,
    RDY: InputPin,
{
    pub fn new(spi: SPI, cs: CS, presence: PRES, ready: RDY) -> Self {
        MicroRwd {
            spi,
            cs: ChipSelect::new(cs),
            presence,
            ready,
        }
    }

    /// Deselect the slave so the first transfer starts a fresh frame.
    pub fn init(&mut self) -> Result<(), ReaderError> {
        self.cs.deselect()
    }

    pub fn release(self) -> (SPI, CS, PRES, RDY) {
        (self.spi, self.cs.release(), self.presence, self.ready)
    }
}

impl<SPI, CS, PRES, RDY> CardReader for MicroRwd<SPI, CS, PRES, RDY>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    PRES: InputPin,
    RDY: InputPin,
{
    fn card_present(&mut self) -> Result<bool, ReaderError> {
        self.presence.is_high().map_err(|_| ReaderError::Pin)
    }

    fn data_ready(&mut self) -> Result<bool, ReaderError> {
        self.ready.is_high().map_err(|_| ReaderError::Pin)
    }

    fn transfer(&mut self, byte: u8) -> Result<u8, ReaderError> {
        let mut buffer = [byte];
        self.cs.select()?;
        let result = self
            .spi
            .transfer_in_place(&mut buffer)
            .and_then(|_| self.spi.flush());
        // Release the slave even if the transfer failed.
        self.cs.deselect()?;
        result.map_err(|_| ReaderError::Communication)?;
        Ok(buffer[0])
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use core::cell::RefCell;
    use embedded_hal::digital::{self, ErrorType as PinErrorType};
    use embedded_hal::spi::{self, ErrorType as SpiErrorType};
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Default)]
    struct Bus {
        selected: bool,
        sent: Vec<u8>,
        replies: VecDeque<u8>,
        cs_edges: usize,
        fail_transfer: bool,
    }

    struct FakeSpi(Rc<RefCell<Bus>>);
    struct FakeCs(Rc<RefCell<Bus>>);
    struct FakeLine(Result<bool, digital::ErrorKind>);

    impl SpiErrorType for FakeSpi {
        type Error = spi::ErrorKind;
    }

    impl SpiBus<u8> for FakeSpi {
        fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            words.fill(0);
            Ok(())
        }

        fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
            read.copy_from_slice(write);
            Ok(())
        }

        fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            let mut bus = self.0.borrow_mut();
            assert!(bus.selected, "transfer outside of chip select frame");
            if bus.fail_transfer {
                return Err(spi::ErrorKind::ModeFault);
            }
            for word in words.iter_mut() {
                bus.sent.push(*word);
                *word = bus.replies.pop_front().unwrap_or(0xFF);
            }
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    impl PinErrorType for FakeCs {
        type Error = core::convert::Infallible;
    }

    impl OutputPin for FakeCs {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            let mut bus = self.0.borrow_mut();
            bus.selected = true;
            bus.cs_edges += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            let mut bus = self.0.borrow_mut();
            bus.selected = false;
            bus.cs_edges += 1;
            Ok(())
        }
    }

    impl PinErrorType for FakeLine {
        type Error = digital::ErrorKind;
    }

    impl InputPin for FakeLine {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            self.0
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            self.0.map(|high| !high)
        }
    }

    fn reader(
        bus: &Rc<RefCell<Bus>>,
        presence: Result<bool, digital::ErrorKind>,
        ready: Result<bool, digital::ErrorKind>,
    ) -> MicroRwd<FakeSpi, FakeCs, FakeLine, FakeLine> {
        MicroRwd::new(
            FakeSpi(bus.clone()),
            FakeCs(bus.clone()),
            FakeLine(presence),
            FakeLine(ready),
        )
    }

    #[test]
    fn test_transfer_framed() {
        let bus = Rc::new(RefCell::new(Bus::default()));
        bus.borrow_mut().replies.extend([0x00, 0x04]);
        let mut rwd = reader(&bus, Ok(true), Ok(true));
        rwd.init().unwrap();

        assert_eq!(rwd.transfer(0x55), Ok(0x00));
        assert_eq!(rwd.transfer(0xF5), Ok(0x04));

        let bus = bus.borrow();
        assert_eq!(bus.sent, [0x55, 0xF5]);
        assert!(!bus.selected);
        // init deselect + one select/deselect pair per byte
        assert_eq!(bus.cs_edges, 5);
    }

    #[test]
    fn test_transfer_error_releases_cs() {
        let bus = Rc::new(RefCell::new(Bus::default()));
        bus.borrow_mut().fail_transfer = true;
        let mut rwd = reader(&bus, Ok(true), Ok(true));

        assert_eq!(rwd.transfer(0xF5), Err(ReaderError::Communication));
        assert!(!bus.borrow().selected);
    }

    #[test]
    fn test_status_lines() {
        let bus = Rc::new(RefCell::new(Bus::default()));
        let mut rwd = reader(&bus, Ok(true), Ok(false));
        assert_eq!(rwd.card_present(), Ok(true));
        assert_eq!(rwd.data_ready(), Ok(false));

        let mut rwd = reader(&bus, Err(digital::ErrorKind::Other), Ok(true));
        assert_eq!(rwd.card_present(), Err(ReaderError::Pin));
        assert_eq!(rwd.data_ready(), Ok(true));
    }
}
