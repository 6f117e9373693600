use crate::{write_u16_be, DnsCursor, DnsError};
use core::fmt::{Display, Formatter};
use fixed_buffer::FixedBuf;

/// > TYPE fields are used in resource records.  Note that these types are a subset of QTYPEs.
///
/// <https://datatracker.ietf.org/doc/html/rfc1035#section-3.2.2>
///
/// > QTYPE fields appear in the question part of a query.  QTYPES are a superset of TYPEs, hence
/// > all TYPEs are valid QTYPEs.
///
/// <https://datatracker.ietf.org/doc/html/rfc1035#section-3.2.3>
///
/// Codes outside RFC 1035 are cited on their variants.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum DnsType {
    /// IPv4 address
    A,
    /// Authoritative name server
    NS,
    /// The canonical name for an alias
    CNAME,
    /// Marks the start of a zone of authority
    SOA,
    /// Domain name pointer
    PTR,
    /// Mail exchange
    MX,
    /// Text string
    TXT,
    /// IPv6 address, <https://datatracker.ietf.org/doc/html/rfc3596#section-2.1>
    AAAA,
    /// Service location, <https://datatracker.ietf.org/doc/html/rfc2782>
    SRV,
    /// Naming authority pointer, <https://datatracker.ietf.org/doc/html/rfc3403#section-4>
    NAPTR,
    /// EDNS pseudo-record, <https://datatracker.ietf.org/doc/html/rfc6891#section-6.1.1>
    OPT,
    /// DANE certificate association, <https://datatracker.ietf.org/doc/html/rfc6698#section-2>
    TLSA,
    /// Certification authority authorization,
    /// <https://datatracker.ietf.org/doc/html/rfc8659#section-4>
    CAA,
    ANY,
    Unknown(u16),
}
impl DnsType {
    #[must_use]
    pub fn new(value: u16) -> Self {
        match value {
            1 => DnsType::A,
            2 => DnsType::NS,
            5 => DnsType::CNAME,
            6 => DnsType::SOA,
            12 => DnsType::PTR,
            15 => DnsType::MX,
            16 => DnsType::TXT,
            28 => DnsType::AAAA,
            33 => DnsType::SRV,
            35 => DnsType::NAPTR,
            41 => DnsType::OPT,
            52 => DnsType::TLSA,
            257 => DnsType::CAA,
            255 => DnsType::ANY,
            other => DnsType::Unknown(other),
        }
    }

    #[must_use]
    pub fn num(&self) -> u16 {
        match self {
            DnsType::A => 1,
            DnsType::NS => 2,
            DnsType::CNAME => 5,
            DnsType::SOA => 6,
            DnsType::PTR => 12,
            DnsType::MX => 15,
            DnsType::TXT => 16,
            DnsType::AAAA => 28,
            DnsType::SRV => 33,
            DnsType::NAPTR => 35,
            DnsType::OPT => 41,
            DnsType::TLSA => 52,
            DnsType::CAA => 257,
            DnsType::ANY => 255,
            DnsType::Unknown(other) => *other,
        }
    }

    /// # Errors
    /// Returns an error when fewer than two bytes remain.
    pub fn read(cursor: &mut DnsCursor<'_>) -> Result<Self, DnsError> {
        Ok(Self::new(cursor.read_u16_be()?))
    }

    /// # Errors
    /// Returns an error when `buf` fills up.
    pub fn write<const N: usize>(&self, out: &mut FixedBuf<N>) -> Result<(), DnsError> {
        write_u16_be(out, self.num())
    }
}
impl Display for DnsType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), core::fmt::Error> {
        match self {
            DnsType::A => write!(f, "A"),
            DnsType::NS => write!(f, "NS"),
            DnsType::CNAME => write!(f, "CNAME"),
            DnsType::SOA => write!(f, "SOA"),
            DnsType::PTR => write!(f, "PTR"),
            DnsType::MX => write!(f, "MX"),
            DnsType::TXT => write!(f, "TXT"),
            DnsType::AAAA => write!(f, "AAAA"),
            DnsType::SRV => write!(f, "SRV"),
            DnsType::NAPTR => write!(f, "NAPTR"),
            DnsType::OPT => write!(f, "OPT"),
            DnsType::TLSA => write!(f, "TLSA"),
            DnsType::CAA => write!(f, "CAA"),
            DnsType::ANY => write!(f, "ANY"),
            DnsType::Unknown(n) => write!(f, "TYPE{n}"),
        }
    }
}

#[cfg(test)]
#[test]
fn test_codes() {
    for n in [1, 2, 5, 6, 12, 15, 16, 28, 33, 35, 41, 52, 255, 257, 99, 65535] {
        assert_eq!(n, DnsType::new(n).num());
    }
    assert_eq!(DnsType::CAA, DnsType::new(257));
    assert_eq!(DnsType::Unknown(99), DnsType::new(99));
}

#[cfg(test)]
#[test]
fn test_display() {
    assert_eq!("NAPTR", DnsType::NAPTR.to_string());
    // RFC 3597 generic presentation for unknown types.
    assert_eq!("TYPE65280", DnsType::new(65280).to_string());
}
