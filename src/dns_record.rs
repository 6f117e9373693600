use crate::{
    write_bytes, write_u16_be, write_u32_be, DnsClass, DnsCursor, DnsError, DnsName,
    DnsRecordData, DnsType,
};
use fixed_buffer::FixedBuf;
use std::net::{Ipv4Addr, Ipv6Addr};

/// > 4.1.3. Resource record format
/// >
/// > The answer, authority, and additional sections all share the same format: a variable number
/// > of resource records, where the number of records is specified in the corresponding count
/// > field in the header.  Each resource record has the following format:
/// >
/// > ```text
/// >                                 1  1  1  1  1  1
/// >   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// > +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// > |                                               |
/// > /                                               /
/// > /                      NAME                     /
/// > |                                               |
/// > +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// > |                      TYPE                     |
/// > +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// > |                     CLASS                     |
/// > +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// > |                      TTL                      |
/// > |                                               |
/// > +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// > |                   RDLENGTH                    |
/// > +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--|
/// > /                     RDATA                     /
/// > /                                               /
/// > +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// > ```
/// > where:
/// > - NAME: a domain name to which this resource record pertains.
/// > - TYPE: two octets containing one of the RR type codes.  This field specifies the meaning of
/// >   the data in the RDATA field.
/// > - CLASS: two octets which specify the class of the data in the RDATA field.
/// > - TTL:  a 32 bit unsigned integer that specifies the time interval (in seconds) that the
/// >   resource record may be cached before it should be discarded.  Zero values are interpreted
/// >   to mean that the RR can only be used for the transaction in progress, and should not be
/// >   cached.
/// > - RDLENGTH: an unsigned 16 bit integer that specifies the length in octets of the RDATA field.
/// > - RDATA:  a variable length string of octets that describes the resource.  The format of this
/// >   information varies according to the TYPE and CLASS of the resource record.  For example,
/// >   the if the TYPE is A and the CLASS is IN, the RDATA field is a 4 octet ARPA Internet
/// >   address.
///
/// <https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.3>
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct DnsRecord {
    pub name: DnsName,
    pub class: DnsClass,
    pub ttl: u32,
    pub data: DnsRecordData,
}
impl DnsRecord {
    #[must_use]
    pub fn new(name: DnsName, ttl: u32, data: DnsRecordData) -> Self {
        Self {
            name,
            class: DnsClass::Internet,
            ttl,
            data,
        }
    }

    /// # Errors
    /// Returns an error when `name` is not a valid DNS name.
    pub fn new_a(name: &str, ttl: u32, ipv4_addr: Ipv4Addr) -> Result<Self, DnsError> {
        Ok(Self::new(
            DnsName::new(name)?,
            ttl,
            DnsRecordData::A(ipv4_addr),
        ))
    }

    /// # Errors
    /// Returns an error when `name` is not a valid DNS name.
    pub fn new_aaaa(name: &str, ttl: u32, ipv6_addr: Ipv6Addr) -> Result<Self, DnsError> {
        Ok(Self::new(
            DnsName::new(name)?,
            ttl,
            DnsRecordData::AAAA(ipv6_addr),
        ))
    }

    /// # Errors
    /// Returns an error when `name` or `target` are not both valid DNS names.
    pub fn new_cname(name: &str, ttl: u32, target: &str) -> Result<Self, DnsError> {
        Ok(Self::new(
            DnsName::new(name)?,
            ttl,
            DnsRecordData::CNAME(DnsName::new(target)?),
        ))
    }

    #[must_use]
    pub fn typ(&self) -> DnsType {
        self.data.typ()
    }

    /// Reads one resource record and leaves the cursor at the byte after its RDATA.
    ///
    /// # Errors
    /// Returns an error when the packet does not contain a valid resource record at the cursor.
    pub fn read(cursor: &mut DnsCursor<'_>) -> Result<Self, DnsError> {
        let name = DnsName::read(cursor)?;
        let typ = DnsType::read(cursor)?;
        let class = DnsClass::read(cursor)?;
        let ttl = cursor.read_u32_be()?;
        let rdlength = usize::from(cursor.read_u16_be()?);
        let data = DnsRecordData::read(typ, cursor, rdlength)?;
        Ok(Self {
            name,
            class,
            ttl,
            data,
        })
    }

    /// # Errors
    /// Returns an error when `out` is full or `bytes` is longer than 65,535 bytes.
    pub fn write_rdata<const N: usize>(
        bytes: &[u8],
        out: &mut FixedBuf<N>,
    ) -> Result<(), DnsError> {
        let len =
            u16::try_from(bytes.len()).map_err(|_| DnsError::RdataTooLong { len: bytes.len() })?;
        write_u16_be(out, len)?;
        write_bytes(out, bytes)?;
        Ok(())
    }

    /// Writes the record with an uncompressed owner name.  The owner may be the root.
    ///
    /// # Errors
    /// Returns an error when `out` is full or the record cannot be encoded.
    pub fn write<const N: usize>(&self, out: &mut FixedBuf<N>) -> Result<(), DnsError> {
        write_bytes(out, &self.name.encode_allow_root()?)?;
        self.typ().write(out)?;
        self.class.write(out)?;
        write_u32_be(out, self.ttl)?;
        Self::write_rdata(&self.data.encode()?, out)
    }
}

#[cfg(test)]
#[test]
fn test_constructors() {
    assert_eq!(
        DnsRecord {
            name: DnsName::new("a.b").unwrap(),
            class: DnsClass::Internet,
            ttl: 300,
            data: DnsRecordData::A(Ipv4Addr::new(1, 2, 3, 4)),
        },
        DnsRecord::new_a("a.b", 300, Ipv4Addr::new(1, 2, 3, 4)).unwrap()
    );
    assert_eq!(
        DnsType::AAAA,
        DnsRecord::new_aaaa("a.b", 300, Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0))
            .unwrap()
            .typ()
    );
    assert_eq!(
        DnsRecordData::CNAME(DnsName::new("c.d").unwrap()),
        DnsRecord::new_cname("a.b", 60, "c.d").unwrap().data
    );
    DnsRecord::new_cname("a.b", 60, "c..d").unwrap_err();
}

#[cfg(test)]
#[test]
#[rustfmt::skip]
fn test_read_write() {
    let bytes = [
        // name=aaa.example.com
        0x03, 97, 97, 97, 0x07, 101, 120, 97, 109, 112, 108, 101, 0x03, 99, 111, 109, 0x00,
        // type=1 A
        0x00, 0x01,
        // class=1 IN
        0x00, 0x01,
        // ttl_seconds=300
        0x00, 0x00, 0x01, 0x2C,
        // rdlength=4
        0x00, 0x04,
        // ipv4_addr=10.0.0.1
        10, 0, 0, 1,
        // next record
        0xFF,
    ];
    let mut cursor = DnsCursor::new(&bytes);
    let record = DnsRecord::read(&mut cursor).unwrap();
    assert_eq!(
        DnsRecord::new_a("aaa.example.com", 300, Ipv4Addr::new(10, 0, 0, 1)).unwrap(),
        record
    );
    assert_eq!(bytes.len() - 1, cursor.offset());
    let mut out: FixedBuf<64> = FixedBuf::new();
    record.write(&mut out).unwrap();
    assert_eq!(&bytes[..bytes.len() - 1], out.readable());
}

#[cfg(test)]
#[test]
#[rustfmt::skip]
fn test_read_opt() {
    let bytes = [
        // name=root
        0x00,
        // type=41 OPT
        0x00, 0x29,
        // class=udp payload size 4096
        0x10, 0x00,
        // extended rcode and flags
        0x00, 0x00, 0x80, 0x00,
        // rdlength=0
        0x00, 0x00,
    ];
    let record = DnsRecord::read(&mut DnsCursor::new(&bytes)).unwrap();
    assert!(record.name.is_root());
    assert_eq!(DnsType::OPT, record.typ());
    assert_eq!(DnsClass::Unknown(4096), record.class);
    assert_eq!(0x8000, record.ttl);
    let mut out: FixedBuf<16> = FixedBuf::new();
    record.write(&mut out).unwrap();
    assert_eq!(bytes, out.readable());
}

#[cfg(test)]
#[test]
fn test_read_truncated_rdata() {
    // rdlength=4 but only two bytes follow.
    let bytes = [0x00, 0x00, 0x01, 0x00, 0x01, 0, 0, 0, 0, 0x00, 0x04, 10, 0];
    assert_eq!(
        Err(DnsError::BufferUnderrun {
            offset: 11,
            needed: 4,
            available: 13
        }),
        DnsRecord::read(&mut DnsCursor::new(&bytes))
    );
}

#[cfg(test)]
#[test]
fn test_write_rdata_too_long() {
    let mut out: FixedBuf<16> = FixedBuf::new();
    assert_eq!(
        Err(DnsError::RdataTooLong { len: 65536 }),
        DnsRecord::write_rdata(&vec![0; 65536], &mut out)
    );
}
