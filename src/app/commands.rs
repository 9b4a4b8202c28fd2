//! Inbound commands decoded from the serial link.
//!
//! One ASCII digit is one command. Anything else on the wire is noise and
//! never becomes a [`Command`].

/// Largest command index the wire protocol can carry.
pub const MAX_INDEX: u8 = 9;

/// A command decoded from a single inbound byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    raw: u8,
    index: u8,
}

impl Command {
    /// Decode `byte`. Returns `None` for anything outside `'0'..='9'`.
    pub const fn decode(byte: u8) -> Option<Self> {
        if byte.is_ascii_digit() {
            Some(Self { raw: byte, index: byte - b'0' })
        } else {
            None
        }
    }

    /// The byte as received; echoed back once the pulse completes.
    pub const fn raw(self) -> u8 {
        self.raw
    }

    /// Decoded index, 0-9.
    pub const fn index(self) -> u8 {
        self.index
    }

    /// Reader action wired to this index, if the front-end defines one.
    pub const fn rfid(self) -> Option<RfidCommand> {
        RfidCommand::from_index(self.index)
    }
}

/// Reader actions the RFID front-end decodes from the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RfidCommand {
    /// REQA short frame (0x26).
    Reqa = 0,
    /// WUPA short frame (0x52).
    Wupa = 1,
    /// Anticollision select, cascade level 1 (0x93 0x20).
    Select = 2,
    /// Full select with UID and CRC.
    LongSelect = 3,
    /// HLTA.
    Halt = 4,
}

impl RfidCommand {
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Reqa),
            1 => Some(Self::Wupa),
            2 => Some(Self::Select),
            3 => Some(Self::LongSelect),
            4 => Some(Self::Halt),
            _ => None,
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    /// ASCII digit sent on the wire for this action.
    pub const fn wire_byte(self) -> u8 {
        b'0' + self.index()
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Reqa => "REQA",
            Self::Wupa => "WUPA",
            Self::Select => "Select",
            Self::LongSelect => "Long Select",
            Self::Halt => "Halt",
        }
    }
}
