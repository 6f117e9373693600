/// > `OPCODE`  A four bit field that specifies kind of query in this message.
/// >         This value is set by the originator of a query and copied into
/// >         the response.  The values are:
/// > - `0` a standard query (`QUERY`)
/// > - `1` an inverse query (`IQUERY`)
/// > - `2` a server status request (`STATUS`)
/// > - `3-15` reserved for future use
///
/// <https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.1>
///
/// `NOTIFY` (4) comes from <https://datatracker.ietf.org/doc/html/rfc1996> and `UPDATE` (5) from
/// <https://datatracker.ietf.org/doc/html/rfc2136>.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DnsOpCode {
    Query,
    InverseQuery,
    Status,
    Notify,
    Update,
    Reserved(u8),
}
impl DnsOpCode {
    /// Only the low four bits of `value` are meaningful.
    #[must_use]
    pub fn new(value: u8) -> Self {
        match value & 0xF {
            0 => DnsOpCode::Query,
            1 => DnsOpCode::InverseQuery,
            2 => DnsOpCode::Status,
            4 => DnsOpCode::Notify,
            5 => DnsOpCode::Update,
            other => DnsOpCode::Reserved(other),
        }
    }

    #[must_use]
    pub fn num(&self) -> u8 {
        match self {
            DnsOpCode::Query => 0,
            DnsOpCode::InverseQuery => 1,
            DnsOpCode::Status => 2,
            DnsOpCode::Notify => 4,
            DnsOpCode::Update => 5,
            DnsOpCode::Reserved(other) => *other,
        }
    }
}

#[cfg(test)]
#[test]
fn test_op_code() {
    for n in 0..16_u8 {
        assert_eq!(n, DnsOpCode::new(n).num());
    }
    assert_eq!(DnsOpCode::Reserved(3), DnsOpCode::new(3));
    assert_eq!(DnsOpCode::Update, DnsOpCode::new(0x15));
}
