use crate::{DnsClass, DnsCursor, DnsError, DnsName, DnsType};
use fixed_buffer::FixedBuf;

/// > The question section is used to carry the "question" in most queries, i.e., the parameters
/// > that define what is being asked.  The section contains QDCOUNT (usually 1) entries, each of
/// > the following format:
/// >
/// > ```text
/// >                                 1  1  1  1  1  1
/// >   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// > +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// > |                                               |
/// > /                     QNAME                     /
/// > /                                               /
/// > +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// > |                     QTYPE                     |
/// > +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// > |                     QCLASS                    |
/// > +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// > ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct DnsQuestion {
    pub name: DnsName,
    pub typ: DnsType,
    pub class: DnsClass,
}
impl DnsQuestion {
    /// # Errors
    /// Returns an error when `name` is not a valid DNS name.
    pub fn new(name: &str, typ: DnsType) -> Result<Self, DnsError> {
        Ok(Self {
            name: DnsName::new(name)?,
            typ,
            class: DnsClass::Internet,
        })
    }

    /// Reads QNAME, QTYPE and QCLASS and leaves the cursor after them.
    ///
    /// # Errors
    /// Returns an error when the packet does not contain a valid question at the cursor.
    pub fn read(cursor: &mut DnsCursor<'_>) -> Result<Self, DnsError> {
        let name = DnsName::read(cursor)?;
        let typ = DnsType::read(cursor)?;
        let class = DnsClass::read(cursor)?;
        Ok(DnsQuestion { name, typ, class })
    }

    /// # Errors
    /// Returns an error when `buf` fills up or the name has no labels.
    pub fn write<const N: usize>(&self, out: &mut FixedBuf<N>) -> Result<(), DnsError> {
        self.name.write(out)?;
        self.typ.write(out)?;
        self.class.write(out)?;
        Ok(())
    }
}

#[cfg(test)]
#[test]
#[rustfmt::skip]
fn test_read() {
    let bytes = [
        // name=aaa.example.com
        0x03, 97, 97, 97, 0x07, 101, 120, 97, 109, 112, 108, 101, 0x03, 99, 111, 109, 0x00,
        // type=28 AAAA
        0x00, 0x1C,
        // class=3 CH
        0x00, 0x03,
    ];
    let mut cursor = DnsCursor::new(&bytes);
    let question = DnsQuestion::read(&mut cursor).unwrap();
    assert_eq!("aaa.example.com", question.name.to_string());
    assert_eq!(DnsType::AAAA, question.typ);
    assert_eq!(DnsClass::Chaos, question.class);
    assert!(cursor.is_empty());

    let mut out: FixedBuf<32> = FixedBuf::new();
    question.write(&mut out).unwrap();
    assert_eq!(bytes, out.readable());
}

#[cfg(test)]
#[test]
fn test_read_truncated() {
    // QCLASS is missing a byte.
    let bytes = [0x01, 97, 0x00, 0x00, 0x01, 0x00];
    assert_eq!(
        Err(DnsError::BufferUnderrun {
            offset: 5,
            needed: 2,
            available: 6
        }),
        DnsQuestion::read(&mut DnsCursor::new(&bytes))
    );
}

#[cfg(test)]
#[test]
fn test_new() {
    let question = DnsQuestion::new("Example.COM.", DnsType::MX).unwrap();
    assert_eq!("example.com", question.name.to_string());
    assert_eq!(DnsClass::Internet, question.class);
    DnsQuestion::new("", DnsType::A).unwrap_err();
}
