use thiserror::Error;

/// The label grammar rule that a candidate label broke.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Error)]
pub enum LabelError {
    #[error("label is empty")]
    Empty,
    #[error("label is {len} bytes, longer than 63")]
    TooLong { len: usize },
    #[error("byte {byte:#04x} at position {position} is not a letter, digit or hyphen")]
    InvalidByte { position: usize, byte: u8 },
    #[error("label starts with a hyphen")]
    LeadingHyphen,
    #[error("label ends with a hyphen")]
    TrailingHyphen,
    /// Positions 3 and 4 are hyphens but the label does not start with `xn`.
    #[error("label has hyphens in positions 3 and 4 without the \"xn\" prefix")]
    ReservedHyphens,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, Error)]
pub enum DnsError {
    #[error("read of {needed} bytes at offset {offset} overruns buffer of {available} bytes")]
    BufferUnderrun {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("invalid label: {0}")]
    InvalidLabel(LabelError),
    #[error("name is {size} bytes, longer than 255")]
    NameTooLong { size: usize },
    #[error("label of {length} bytes at offset {offset} overruns buffer of {buffer_len} bytes")]
    LabelOverrun {
        offset: usize,
        length: usize,
        buffer_len: usize,
    },
    #[error("second compression pointer at offset {offset}")]
    RecursivePointer { offset: usize },
    #[error("name has no labels")]
    EmptyName,
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("type {typ} record data is {actual} bytes, rdlength says {expected}")]
    InvalidRdata {
        typ: u16,
        expected: usize,
        actual: usize,
    },
    #[error("character-string is {len} bytes, longer than 255")]
    StringTooLong { len: usize },
    #[error("record data is {len} bytes, longer than 65535")]
    RdataTooLong { len: usize },
    #[error("output buffer is full")]
    ResponseBufferFull,
}

impl From<LabelError> for DnsError {
    fn from(e: LabelError) -> Self {
        DnsError::InvalidLabel(e)
    }
}

#[cfg(test)]
#[test]
fn test_display() {
    assert_eq!(
        "read of 2 bytes at offset 11 overruns buffer of 12 bytes",
        DnsError::BufferUnderrun {
            offset: 11,
            needed: 2,
            available: 12
        }
        .to_string()
    );
    assert_eq!(
        "invalid label: byte 0x5f at position 1 is not a letter, digit or hyphen",
        DnsError::from(LabelError::InvalidByte {
            position: 1,
            byte: b'_'
        })
        .to_string()
    );
    assert_eq!(
        "not implemented: message encoding",
        DnsError::NotImplemented("message encoding").to_string()
    );
}
