use core::fmt::{Debug, Formatter};
use ufmt::{uDebug, uWrite};

use crate::config::SequencerConfig;
use crate::errors::ReadAbort;
use crate::hal::{CardReader, PeriodicTimer};
use crate::report::Reporter;
use crate::tick::TickFlag;
use crate::uid::{Uid, UID_LEN};

#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SequencerState {
    /// No card on the reader.
    Idle,
    /// Card detected, UID request pending.
    CardPresent,
    /// UID requested, waiting for the reader to raise data-ready.
    WaitingForData,
    /// Data is ready, pacing timer not yet running.
    TimerArmed,
    /// Pulling one byte per timer tick.
    ReadingData,
    /// UID complete, waiting for the card to leave.
    WaitingForRemoval,
}

impl SequencerState {
    fn name(&self) -> &'static str {
        match self {
            SequencerState::Idle => "Idle",
            SequencerState::CardPresent => "CardPresent",
            SequencerState::WaitingForData => "WaitingForData",
            SequencerState::TimerArmed => "TimerArmed",
            SequencerState::ReadingData => "ReadingData",
            SequencerState::WaitingForRemoval => "WaitingForRemoval",
        }
    }
}

impl Debug for SequencerState {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl uDebug for SequencerState {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        f.write_str(self.name())
    }
}

/// Card read state machine.
///
/// Call [`Sequencer::advance`] from the main loop as often as possible.
/// No call blocks longer than one byte transfer on the reader link.
/// The periodic timer interrupt must raise `tick`.
pub struct Sequencer<'t, R, T, P> {
    reader: R,
    timer: T,
    reporter: P,
    tick: &'t TickFlag,
    config: SequencerConfig,
    state: SequencerState,
    buffer: [u8; UID_LEN],
    fill: u8,
    waited: u32,
}

impl<'t, R, T, P> Sequencer<'t, R, T, P>
where
    R: CardReader,
    T: PeriodicTimer,
    P: Reporter,
{
    pub fn new(reader: R, timer: T, reporter: P, tick: &'t TickFlag, config: SequencerConfig) -> Self {
        Sequencer {
            reader,
            timer,
            reporter,
            tick,
            config,
            state: SequencerState::Idle,
            buffer: [0; UID_LEN],
            fill: 0,
            waited: 0,
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Number of UID bytes received so far.
    pub fn fill_count(&self) -> usize {
        self.fill as usize
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer[..self.fill as usize]
    }

    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn reporter(&self) -> &P {
        &self.reporter
    }

    /// Run one step of the state machine.
    pub fn advance(&mut self) {
        if let Err(reason) = self.step() {
            self.abort(reason);
        }
    }

    fn step(&mut self) -> Result<(), ReadAbort> {
        match self.state {
            SequencerState::Idle => {
                // Nothing to abort yet, a failed presence read counts as
                // no card and is retried on the next call.
                if self.reader.card_present().unwrap_or(false) {
                    // Ticks from a previous read must not pace this one.
                    self.tick.clear();
                    self.enter(SequencerState::CardPresent);
                }
            }
            SequencerState::CardPresent => {
                self.reader.transfer(self.config.request_uid)?;
                self.enter(SequencerState::WaitingForData);
            }
            SequencerState::WaitingForData => {
                if self.reader.data_ready()? {
                    self.enter(SequencerState::TimerArmed);
                } else {
                    self.wait(ReadAbort::NoData)?;
                }
            }
            SequencerState::TimerArmed => {
                self.timer.enable_periodic_interrupt();
                self.enter(SequencerState::ReadingData);
            }
            SequencerState::ReadingData => {
                // At most one byte per observed tick.
                if self.reader.data_ready()? && self.tick.take() {
                    self.read_byte()?;
                } else {
                    self.wait(ReadAbort::Stalled { received: self.fill })?;
                }
            }
            SequencerState::WaitingForRemoval => {
                // The UID is complete. A failed presence read keeps it and
                // retries on the next call.
                if let Ok(false) = self.reader.card_present() {
                    self.reporter.card_read(&Uid(self.buffer));
                    self.fill = 0;
                    self.enter(SequencerState::Idle);
                }
            }
        }
        Ok(())
    }

    fn read_byte(&mut self) -> Result<(), ReadAbort> {
        let byte = self.reader.transfer(self.config.next_byte)?;
        self.buffer[self.fill as usize] = byte;
        self.fill += 1;
        self.waited = 0;

        if self.fill as usize == UID_LEN {
            self.timer.disable_periodic_interrupt();
            if self.config.reject_blank_uid && Uid(self.buffer).is_blank() {
                return Err(ReadAbort::BlankUid);
            }
            self.enter(SequencerState::WaitingForRemoval);
        }
        Ok(())
    }

    fn wait(&mut self, reason: ReadAbort) -> Result<(), ReadAbort> {
        self.waited = self.waited.saturating_add(1);
        match self.config.max_wait_polls {
            Some(limit) if self.waited >= limit => Err(reason),
            _ => Ok(()),
        }
    }

    fn enter(&mut self, state: SequencerState) {
        self.reporter.state_changed(self.state, state);
        self.state = state;
        self.waited = 0;
    }

    fn abort(&mut self, reason: ReadAbort) {
        if matches!(self.state, SequencerState::TimerArmed | SequencerState::ReadingData) {
            self.timer.disable_periodic_interrupt();
        }
        self.tick.clear();
        self.fill = 0;
        self.reporter.read_aborted(reason);
        self.enter(SequencerState::Idle);
    }
}
