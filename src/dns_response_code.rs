/// > `RCODE` Response code - this 4 bit field is set as part of responses.  The values have the
/// > following interpretation:
/// > - `0` No error condition
/// > - `1` Format error - The name server was unable to interpret the query.
/// > - `2` Server failure - The name server was unable to process this query due to a problem with
/// >   the name server.
/// > - `3` Name Error - Meaningful only for responses from an authoritative name server, this code
/// >   signifies that the domain name referenced in the query does not exist.
/// > - `4` Not Implemented - The name server does not support the requested kind of query.
/// > - `5` Refused - The name server refuses to perform the specified operation for policy reasons.
/// > - `6-15` Reserved for future use.
///
/// <https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.1>
///
/// Codes 6 through 10 were later assigned by
/// <https://datatracker.ietf.org/doc/html/rfc2136#section-2.2>.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DnsResponseCode {
    NoError,
    FormatError,
    ServerFailure,
    NameError,
    NotImplemented,
    Refused,
    /// Some name that ought not to exist, does exist.
    YXDomain,
    /// Some RRset that ought not to exist, does exist.
    YXRRSet,
    /// Some RRset that ought to exist, does not exist.
    NXRRSet,
    NotAuth,
    NotZone,
    Reserved(u8),
}
impl DnsResponseCode {
    /// Only the low four bits of `value` are meaningful.
    #[must_use]
    pub fn new(value: u8) -> Self {
        match value & 0xF {
            0 => DnsResponseCode::NoError,
            1 => DnsResponseCode::FormatError,
            2 => DnsResponseCode::ServerFailure,
            3 => DnsResponseCode::NameError,
            4 => DnsResponseCode::NotImplemented,
            5 => DnsResponseCode::Refused,
            6 => DnsResponseCode::YXDomain,
            7 => DnsResponseCode::YXRRSet,
            8 => DnsResponseCode::NXRRSet,
            9 => DnsResponseCode::NotAuth,
            10 => DnsResponseCode::NotZone,
            other => DnsResponseCode::Reserved(other),
        }
    }

    #[must_use]
    pub fn num(&self) -> u8 {
        match self {
            DnsResponseCode::NoError => 0,
            DnsResponseCode::FormatError => 1,
            DnsResponseCode::ServerFailure => 2,
            DnsResponseCode::NameError => 3,
            DnsResponseCode::NotImplemented => 4,
            DnsResponseCode::Refused => 5,
            DnsResponseCode::YXDomain => 6,
            DnsResponseCode::YXRRSet => 7,
            DnsResponseCode::NXRRSet => 8,
            DnsResponseCode::NotAuth => 9,
            DnsResponseCode::NotZone => 10,
            DnsResponseCode::Reserved(other) => *other,
        }
    }
}

#[cfg(test)]
#[test]
fn test_response_code() {
    for n in 0..16_u8 {
        assert_eq!(n, DnsResponseCode::new(n).num());
    }
    assert_eq!(DnsResponseCode::NotZone, DnsResponseCode::new(10));
    assert_eq!(DnsResponseCode::Reserved(15), DnsResponseCode::new(15));
}
