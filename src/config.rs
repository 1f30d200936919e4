use crate::commands::{NEXT_BYTE, REQUEST_UID};

/// Calls to `advance()` a read may wait for the reader before it is aborted.
///
/// This is a poll count, not a duration. The wall-clock timeout depends on
/// how fast the main loop runs. A tight loop on a 16 MHz AVR polls many
/// times per 1 kHz pacing tick, so 60 000 polls is well under a second
/// there. Scale it to the loop if the main loop does other work.
pub const DEFAULT_MAX_WAIT_POLLS: u32 = 60_000;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SequencerConfig {
    /// Sent once when a card shows up.
    pub request_uid: u8,
    /// Sent for every data byte shifted out of the reader.
    pub next_byte: u8,
    /// `None` waits forever.
    pub max_wait_polls: Option<u32>,
    pub reject_blank_uid: bool,
}

impl SequencerConfig {
    pub const fn new() -> Self {
        SequencerConfig {
            request_uid: REQUEST_UID,
            next_byte: NEXT_BYTE,
            max_wait_polls: Some(DEFAULT_MAX_WAIT_POLLS),
            reject_blank_uid: true,
        }
    }

    pub const fn with_max_wait_polls(mut self, polls: Option<u32>) -> Self {
        self.max_wait_polls = polls;
        self
    }

    pub const fn with_reject_blank_uid(mut self, reject: bool) -> Self {
        self.reject_blank_uid = reject;
        self
    }

    pub const fn with_commands(mut self, request_uid: u8, next_byte: u8) -> Self {
        self.request_uid = request_uid;
        self.next_byte = next_byte;
        self
    }
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self::new()
    }
}
