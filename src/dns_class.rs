use crate::{write_u16_be, DnsCursor, DnsError};
use fixed_buffer::FixedBuf;

/// > `CLASS` fields appear in resource records.  The following `CLASS` mnemonics and values are
/// > defined:
/// >
/// > - `IN` 1 the Internet
/// > - `CS` 2 the CSNET class (Obsolete - used only for examples in some obsolete RFCs)
/// > - `CH` 3 the CHAOS class
/// > - `HS` 4 Hesiod [Dyer 87]
/// >
/// >
/// > `QCLASS` fields appear in the question section of a query.  `QCLASS` values are a superset
/// > of `CLASS` values; every `CLASS` is a valid `QCLASS`.  In addition to `CLASS` values, the
/// > following `QCLASSes` are defined:
/// >
/// > - `*` 255 any class
///
/// <https://datatracker.ietf.org/doc/html/rfc1035#section-3.2.4>
///
/// `NONE` (254) is used by dynamic update,
/// <https://datatracker.ietf.org/doc/html/rfc2136#section-1.3>.
/// In an OPT pseudo-record the class field carries the sender's UDP payload size, so any value
/// may appear here and none is rejected.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DnsClass {
    Internet,
    Chaos,
    Hesiod,
    None,
    Any,
    Unknown(u16),
}
impl DnsClass {
    #[must_use]
    pub fn new(value: u16) -> Self {
        match value {
            1 => DnsClass::Internet,
            3 => DnsClass::Chaos,
            4 => DnsClass::Hesiod,
            254 => DnsClass::None,
            255 => DnsClass::Any,
            other => DnsClass::Unknown(other),
        }
    }

    #[must_use]
    pub fn num(&self) -> u16 {
        match self {
            DnsClass::Internet => 1,
            DnsClass::Chaos => 3,
            DnsClass::Hesiod => 4,
            DnsClass::None => 254,
            DnsClass::Any => 255,
            DnsClass::Unknown(other) => *other,
        }
    }

    /// # Errors
    /// Returns an error when fewer than two bytes remain.
    pub fn read(cursor: &mut DnsCursor<'_>) -> Result<Self, DnsError> {
        Ok(Self::new(cursor.read_u16_be()?))
    }

    /// # Errors
    /// Returns an error when `buf` is full.
    pub fn write<const N: usize>(&self, out: &mut FixedBuf<N>) -> Result<(), DnsError> {
        write_u16_be(out, self.num())
    }
}

#[cfg(test)]
#[test]
fn test_class() {
    for n in [1, 2, 3, 4, 254, 255, 4096] {
        assert_eq!(n, DnsClass::new(n).num());
    }
    assert_eq!(DnsClass::Unknown(2), DnsClass::new(2));
    let bytes = [0x00, 0xFF];
    assert_eq!(
        DnsClass::Any,
        DnsClass::read(&mut DnsCursor::new(&bytes)).unwrap()
    );
}
