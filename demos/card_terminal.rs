#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

use arduino_hal::default_serial;
use arduino_hal::spi;
use panic_halt as _;
use rfid_terminal::board::{self, Timer0};
use rfid_terminal::{MicroRwd, Sequencer, SequencerConfig, SerialReporter, TickFlag};
use ufmt::uwriteln;

static TIMER_TICK: TickFlag = TickFlag::new();

#[avr_device::interrupt(atmega328p)]
fn TIMER0_COMPA() {
    TIMER_TICK.raise();
}

#[arduino_hal::entry]
fn main() -> ! {
    let dp = arduino_hal::Peripherals::take().unwrap();
    let pins = arduino_hal::pins!(dp);

    // Report line
    let mut serial = default_serial!(dp, pins, board::SERIAL_BAUD);

    // Reader link
    let sclk = pins.d13.into_output();
    let mosi = pins.d11.into_output();
    let miso = pins.d12.into_pull_up_input();
    let cs = pins.d10.into_output();
    let (spi, cs_pin) = spi::Spi::new(dp.SPI, sclk, mosi, miso, cs, board::spi_settings());

    let presence: board::PresencePin = pins.d2.into_floating_input();
    let ready: board::DataReadyPin = pins.d3.into_floating_input();

    let mut reader = MicroRwd::new(spi, cs_pin, presence, ready);
    if let Err(err) = reader.init() {
        uwriteln!(&mut serial, "Reader init failed: {:?}\r", err).ok();
    }

    let timer = Timer0::new(dp.TC0);

    uwriteln!(&mut serial, "Scan card\r").ok();

    let reporter = SerialReporter::new(serial);
    let mut sequencer = Sequencer::new(reader, timer, reporter, &TIMER_TICK, SequencerConfig::new());

    // SAFETY: All state shared with the interrupt handler is initialized.
    unsafe { avr_device::interrupt::enable() };

    loop {
        sequencer.advance();
    }
}
