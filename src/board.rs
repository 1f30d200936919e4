//! Arduino Uno wiring of the card terminal.
//!
//! ```text
//!   d2  (PD2)  card presence, active high
//!   d3  (PD3)  data ready, active high
//!   d10 (PB2)  SPI chip select, active low
//!   d11 (PB3)  SPI MOSI
//!   d12 (PB4)  SPI MISO
//!   d13 (PB5)  SPI SCK
//!   d0/d1      serial report line
//! ```

use arduino_hal::hal::port::{PD2, PD3};
use arduino_hal::pac::TC0;
use arduino_hal::port::mode::{Floating, Input};
use arduino_hal::port::Pin;
use arduino_hal::spi;
use embedded_hal::spi::{Mode, Phase, Polarity};

use crate::hal::PeriodicTimer;

pub type PresencePin = Pin<Input<Floating>, PD2>;
pub type DataReadyPin = Pin<Input<Floating>, PD3>;

pub const SERIAL_BAUD: u32 = 9600;

// 16 MHz / 64 / (1 + 249) = 1 kHz byte pacing. The /64 prescaler is
// selected in `Timer0::new`.
const TICK_TOP: u8 = 249;

/// Mode 0, MSB first, fosc/16.
pub fn spi_settings() -> spi::Settings {
    spi::Settings {
        data_order: spi::DataOrder::MostSignificantFirst,
        mode: Mode {
            polarity: Polarity::IdleLow,
            phase: Phase::CaptureOnFirstTransition,
        },
        clock: spi::SerialClockRate::OscfOver16,
    }
}

/// Timer/counter 0 in CTC mode, raising `TIMER0_COMPA` once per period
/// while enabled.
pub struct Timer0 {
    tc0: TC0,
}

impl Timer0 {
    /// Starts the counter with the compare interrupt disabled.
    pub fn new(tc0: TC0) -> Self {
        tc0.tccr0a.write(|w| w.wgm0().ctc());
        tc0.ocr0a.write(|w| unsafe { w.bits(TICK_TOP) });
        tc0.tccr0b.write(|w| w.cs0().prescale_64());
        tc0.timsk0.write(|w| w.ocie0a().clear_bit());
        Timer0 { tc0 }
    }
}

impl PeriodicTimer for Timer0 {
    fn enable_periodic_interrupt(&mut self) {
        // Restart the period and drop a compare match that happened while
        // the interrupt was off, so the first tick is a full period away.
        self.tc0.tcnt0.write(|w| unsafe { w.bits(0) });
        self.tc0.tifr0.write(|w| w.ocf0a().set_bit());
        self.tc0.timsk0.write(|w| w.ocie0a().set_bit());
    }

    fn disable_periodic_interrupt(&mut self) {
        self.tc0.timsk0.write(|w| w.ocie0a().clear_bit());
    }
}
