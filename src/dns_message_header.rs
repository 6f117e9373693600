use crate::{write_bytes, write_u16_be, DnsCursor, DnsError, DnsOpCode, DnsResponseCode, HEADER_LEN};
use fixed_buffer::FixedBuf;

/// > 4.1.1. Header section format
/// >
/// > The header contains the following fields:
/// >
/// > ```text
/// >                                 1  1  1  1  1  1
/// >   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// > +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// > |                      ID                       |
/// > +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// > |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
/// > +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// > |                    QDCOUNT                    |
/// > +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// > |                    ANCOUNT                    |
/// > +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// > |                    NSCOUNT                    |
/// > +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// > |                    ARCOUNT                    |
/// > +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// > ```
///
/// <https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.1>
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct DnsMessageHeader {
    /// > `ID` A 16 bit identifier assigned by the program that generates any kind of query.  This
    /// > identifier is copied the corresponding reply and can be used by the requester to match up
    /// > replies to outstanding queries.
    ///
    /// <https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.1>
    pub id: u16,
    /// > `QR` A one bit field that specifies whether this message is a query (`0`),
    /// > or a response (`1`).
    ///
    /// <https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.1>
    pub is_response: bool,
    /// > `OPCODE`  A four bit field that specifies kind of query in this message.
    /// >         This value is set by the originator of a query and copied into
    /// >         the response.  The values are:
    /// > - `0` a standard query (`QUERY`)
    /// > - `1` an inverse query (`IQUERY`)
    /// > - `2` a server status request (`STATUS`)
    /// > - `3-15` reserved for future use
    ///
    /// https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.1
    pub op_code: DnsOpCode,
    /// > `AA` Authoritative Answer - this bit is valid in responses, and specifies that the
    /// > responding name server is an authority for the domain name in question section.
    /// >
    /// > Note that the contents of the answer section may have multiple owner names because of
    /// > aliases.  The AA bit corresponds to the name which matches the query name, or the first
    /// > owner name in the answer section.
    ///
    /// <https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.1>
    pub authoritative_answer: bool,
    /// > `TC` TrunCation - specifies that this message was truncated due to length greater than
    /// > that permitted on the transmission channel.
    ///
    /// <https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.1>
    pub truncated: bool,
    /// > `RD` Recursion Desired - this bit may be set in a query and is copied into the response.
    /// > If RD is set, it directs the name server to pursue the query recursively.  Recursive query
    /// > support is optional.
    ///
    /// <https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.1>
    pub recursion_desired: bool,
    /// > `RA` Recursion Available - this be is set or cleared in a response, and denotes whether
    /// > recursive query support is available in the name server.
    ///
    /// <https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.1>
    pub recursion_available: bool,
    /// > `Z` Reserved for future use.  Must be zero in all queries and responses.
    ///
    /// <https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.1>
    ///
    /// Kept as read so a decoded header reports exactly what was on the wire.
    pub reserved: u8,
    pub response_code: DnsResponseCode,
    pub question_count: u16,
    pub answer_count: u16,
    pub name_server_count: u16,
    pub additional_count: u16,
}
impl DnsMessageHeader {
    /// Reads the fixed 12-byte header and leaves the cursor at the first question.
    ///
    /// # Errors
    /// Returns an error when fewer than 12 bytes remain.
    pub fn read(cursor: &mut DnsCursor<'_>) -> Result<Self, DnsError> {
        let bytes = cursor.read_bytes(HEADER_LEN)?;
        let count = |n: usize| u16::from_be_bytes([bytes[n], bytes[n + 1]]);
        let b = bytes[2];
        let is_response = (b >> 7) == 1;
        let op_code = DnsOpCode::new((b >> 3) & 0xF);
        let authoritative_answer = ((b >> 2) & 1) == 1;
        let truncated = ((b >> 1) & 1) == 1;
        let recursion_desired = (b & 1) == 1;
        let b = bytes[3];
        let recursion_available = (b >> 7) == 1;
        let reserved = (b >> 4) & 0x7;
        let response_code = DnsResponseCode::new(b & 0xF);
        Ok(Self {
            id: count(0),
            is_response,
            op_code,
            authoritative_answer,
            truncated,
            recursion_desired,
            recursion_available,
            reserved,
            response_code,
            question_count: count(4),
            answer_count: count(6),
            name_server_count: count(8),
            additional_count: count(10),
        })
    }

    /// # Errors
    /// Returns an error when `buf` fills up.
    pub fn write<const N: usize>(&self, out: &mut FixedBuf<N>) -> Result<(), DnsError> {
        write_u16_be(out, self.id)?;
        let b = (u8::from(self.is_response) << 7)
            | ((self.op_code.num() & 0xF) << 3)
            | (u8::from(self.authoritative_answer) << 2)
            | (u8::from(self.truncated) << 1)
            | u8::from(self.recursion_desired);
        let b2 = (u8::from(self.recursion_available) << 7)
            | ((self.reserved & 0x7) << 4)
            | (self.response_code.num() & 0xF);
        write_bytes(out, &[b, b2])?;
        for count in [
            self.question_count,
            self.answer_count,
            self.name_server_count,
            self.additional_count,
        ] {
            write_u16_be(out, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[test]
#[allow(clippy::unusual_byte_groupings)]
fn test_read() {
    let bytes = [
        // ID
        0x9A,
        0x9A,
        // is_response=0b1, opcode=0b0000 QUERY, authoritative=0b1, truncated=0b0,
        // recursion_desired=0b1
        0b1_0000_1_0_1,
        // recursion_available=0b1, reserved=0b010, response_code=0b0011 NXDOMAIN
        0b1_010_0011,
        // question_count=1
        0x00,
        0x01,
        // answer_count=2
        0x00,
        0x02,
        // name_server_count=3
        0x00,
        0x03,
        // additional_count=0x0104
        0x01,
        0x04,
        // first question
        0x00,
    ];
    let mut cursor = DnsCursor::new(&bytes);
    let header = DnsMessageHeader::read(&mut cursor).unwrap();
    assert_eq!(12, cursor.offset());
    assert_eq!(
        DnsMessageHeader {
            id: 0x9A9A,
            is_response: true,
            op_code: DnsOpCode::Query,
            authoritative_answer: true,
            truncated: false,
            recursion_desired: true,
            recursion_available: true,
            reserved: 2,
            response_code: DnsResponseCode::NameError,
            question_count: 1,
            answer_count: 2,
            name_server_count: 3,
            additional_count: 0x0104,
        },
        header
    );
    let mut out: FixedBuf<12> = FixedBuf::new();
    header.write(&mut out).unwrap();
    assert_eq!(&bytes[..12], out.readable());
}

#[cfg(test)]
#[test]
#[allow(clippy::unusual_byte_groupings)]
fn test_read_flags() {
    // ID=1, flags=0x0100 (RD), qdcount=1
    let bytes = [0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0, 0, 0, 0, 0, 0];
    let header = DnsMessageHeader::read(&mut DnsCursor::new(&bytes)).unwrap();
    assert_eq!(1, header.id);
    assert!(!header.is_response);
    assert_eq!(DnsOpCode::Query, header.op_code);
    assert!(header.recursion_desired);
    assert!(!header.recursion_available);
    assert_eq!(DnsResponseCode::NoError, header.response_code);
    assert_eq!(1, header.question_count);

    let bytes = [0x00, 0x00, 0b0_0101_0_1_0, 0x00, 0, 0, 0, 0, 0, 0, 0, 0];
    let header = DnsMessageHeader::read(&mut DnsCursor::new(&bytes)).unwrap();
    assert_eq!(DnsOpCode::Update, header.op_code);
    assert!(header.truncated);
}

#[cfg(test)]
#[test]
fn test_truncated() {
    let bytes = [0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0, 0, 0, 0, 0];
    let mut cursor = DnsCursor::new(&bytes);
    assert_eq!(
        Err(DnsError::BufferUnderrun {
            offset: 0,
            needed: 12,
            available: 11
        }),
        DnsMessageHeader::read(&mut cursor)
    );
    assert_eq!(0, cursor.offset());
}
