// src/commands.rs

// Command bytes understood by the MicroRWD reader module
pub const REQUEST_UID: u8 = 0x55; // Start streaming the card serial number
pub const NEXT_BYTE: u8 = 0xF5; // Shift out the next buffered byte
