use crate::{
    write_bytes, DnsCursor, DnsError, DnsLabel, MAX_NAME_LEN, POINTER_MASK, POINTER_OFFSET_MASK,
};
use core::fmt::{Display, Formatter};
use fixed_buffer::FixedBuf;
use tracing::trace;

/// > Domain names in messages are expressed in terms of a sequence of labels.  Each label is
/// > represented as a one octet length field followed by that number of octets.  Since every
/// > domain name ends with the null label of the root, a domain name is terminated by a length
/// > byte of zero.  The high order two bits of every length octet must be zero, and the remaining
/// > six bits of the length field limit the label to 63 octets or less.
/// >
/// > To simplify implementations, the total length of a domain name (i.e., label octets and label
/// > length octets) is restricted to 255 octets or less.
///
/// <https://datatracker.ietf.org/doc/html/rfc1035#section-3.1>
///
/// > The pointer takes the form of a two octet sequence:
/// >
/// > ```text
/// >     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// >     | 1  1|                OFFSET                   |
/// >     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// > ```
/// >
/// > The first two bits are ones.  This allows a pointer to be distinguished from a label, since
/// > the label must begin with two zero bits because labels are restricted to 63 octets or less.
/// > The OFFSET field specifies an offset from the start of the message (i.e., the first octet of
/// > the ID field in the domain header).
///
/// <https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.4>
///
/// A decoded name may have no labels.  That is the root name, which is legal in record data but
/// cannot be encoded by [`DnsName::encode`].
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DnsName {
    labels: Vec<DnsLabel>,
}
impl DnsName {
    /// # Errors
    /// Returns an error when `value` is not a valid DNS name.
    pub fn new(value: &str) -> Result<Self, DnsError> {
        let trimmed = value.strip_suffix('.').unwrap_or(value);
        if trimmed.is_empty() {
            return Err(DnsError::EmptyName);
        }
        let labels = trimmed
            .split('.')
            .map(|label| DnsLabel::new(&label.to_ascii_lowercase()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_labels(labels)
    }

    /// # Errors
    /// Returns an error when the labels encode to more than 255 bytes.
    pub fn from_labels(labels: Vec<DnsLabel>) -> Result<Self, DnsError> {
        let name = Self { labels };
        let size = name.encoded_len();
        if size > MAX_NAME_LEN {
            return Err(DnsError::NameTooLong { size });
        }
        Ok(name)
    }

    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn labels(&self) -> &[DnsLabel] {
        &self.labels
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Size of the uncompressed wire form: label bytes, one length byte per label and the
    /// terminator.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        self.labels.iter().map(|label| label.len() + 1).sum::<usize>() + 1
    }

    /// Walks the labels starting at `cursor.offset()`.  Returns the name and the number of bytes
    /// the caller's position should move: up to and including the terminator, or up to and
    /// including the first pointer.
    ///
    /// Only one pointer is followed per name.  The sum of label bytes may not exceed 255.
    fn walk(cursor: &DnsCursor<'_>, follow_pointers: bool) -> Result<(Self, usize), DnsError> {
        let packet = cursor.packet();
        let start = cursor.offset();
        let mut pos = start;
        let mut labels = Vec::new();
        let mut size = 0_usize;
        let mut consumed: Option<usize> = None;
        loop {
            let len_byte = cursor.u8_at(pos)?;
            if follow_pointers && len_byte & POINTER_MASK == POINTER_MASK {
                if consumed.is_some() {
                    return Err(DnsError::RecursivePointer { offset: pos });
                }
                let target = usize::from(cursor.u16_at(pos)? & POINTER_OFFSET_MASK);
                trace!(from = pos, to = target, "following compression pointer");
                consumed = Some(pos + 2 - start);
                pos = target;
                continue;
            }
            let length = usize::from(len_byte);
            if length == 0 {
                pos += 1;
                break;
            }
            if pos + 1 + length > packet.len() {
                return Err(DnsError::LabelOverrun {
                    offset: pos,
                    length,
                    buffer_len: packet.len(),
                });
            }
            let label = DnsLabel::decode(&packet[pos + 1..pos + 1 + length])?;
            size += length;
            if size > MAX_NAME_LEN {
                return Err(DnsError::NameTooLong { size });
            }
            labels.push(label);
            pos += length + 1;
        }
        // After a pointer `pos` may sit before `start`.
        let consumed = match consumed {
            Some(consumed) => consumed,
            None => pos - start,
        };
        Ok((Self { labels }, consumed))
    }

    /// Decodes an uncompressed name at the start of `bytes`.  Returns the name and the offset of
    /// the byte after its terminator.  Pointer bytes are not special here; they read as oversized
    /// label lengths and fail.
    ///
    /// # Errors
    /// Returns an error when `bytes` is shorter than two bytes or does not start with a valid name.
    pub fn decode(bytes: &[u8]) -> Result<(Self, usize), DnsError> {
        if bytes.len() < 2 {
            return Err(DnsError::BufferUnderrun {
                offset: 0,
                needed: 2,
                available: bytes.len(),
            });
        }
        Self::walk(&DnsCursor::new(bytes), false)
    }

    /// Decodes the possibly-compressed name at `cursor.offset()`, resolving a pointer against the
    /// whole packet.  The cursor does not move; the second value is how far it should, which may
    /// be past the cursor's end.  [`DnsName::read`] rejects that.
    ///
    /// # Errors
    /// Returns an error when the packet does not contain a valid name at the cursor, or the name
    /// contains more than one pointer.
    pub fn decode_compressed(cursor: &DnsCursor<'_>) -> Result<(Self, usize), DnsError> {
        Self::walk(cursor, true)
    }

    /// Like [`DnsName::decode_compressed`], then moves the cursor past the name.
    ///
    /// # Errors
    /// Returns an error when the packet does not contain a valid name at the cursor.
    pub fn read(cursor: &mut DnsCursor<'_>) -> Result<Self, DnsError> {
        let (name, consumed) = Self::decode_compressed(cursor)?;
        cursor.advance(consumed)?;
        Ok(name)
    }

    /// Returns the uncompressed wire form.  This crate never emits pointers.
    ///
    /// # Errors
    /// Returns an error when the name has no labels or is longer than 255 bytes.
    pub fn encode(&self) -> Result<Vec<u8>, DnsError> {
        if self.labels.is_empty() {
            return Err(DnsError::EmptyName);
        }
        let mut out = Vec::with_capacity(self.encoded_len());
        for label in &self.labels {
            let bytes = label.encode()?;
            let size = out.len() + bytes.len() + 1;
            if size > MAX_NAME_LEN {
                return Err(DnsError::NameTooLong { size });
            }
            out.extend_from_slice(&bytes);
        }
        out.push(0);
        Ok(out)
    }

    /// # Errors
    /// Returns an error when the name cannot be encoded or `out` fills up.
    pub fn write<const N: usize>(&self, out: &mut FixedBuf<N>) -> Result<(), DnsError> {
        write_bytes(out, &self.encode()?)
    }

    /// Like [`DnsName::encode`] but the root name encodes as a lone terminator.  Record owners
    /// and record data (an OPT owner, an SRV target of `.`) may be the root; a question may not.
    pub(crate) fn encode_allow_root(&self) -> Result<Vec<u8>, DnsError> {
        if self.is_root() {
            Ok(vec![0])
        } else {
            self.encode()
        }
    }
}
impl Display for DnsName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), core::fmt::Error> {
        if self.labels.is_empty() {
            return write!(f, ".");
        }
        for (n, label) in self.labels.iter().enumerate() {
            if n > 0 {
                write!(f, ".")?;
            }
            write!(f, "{label}")?;
        }
        Ok(())
    }
}
impl TryFrom<&str> for DnsName {
    type Error = DnsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        DnsName::new(value)
    }
}

#[cfg(test)]
const EXAMPLE_COM: [u8; 13] = [
    7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0,
];

#[cfg(test)]
fn names(value: &DnsName) -> Vec<&str> {
    value.labels().iter().map(DnsLabel::as_str).collect()
}

#[cfg(test)]
#[test]
fn test_err() {
    assert_eq!(
        Err(DnsError::InvalidLabel(crate::LabelError::InvalidByte {
            position: 3,
            byte: b'!'
        })),
        DnsName::new("abc!")
    );
}

#[cfg(test)]
#[test]
fn test_new_label_separators() {
    assert_eq!(Err(DnsError::EmptyName), DnsName::new("."));
    assert_eq!(Err(DnsError::EmptyName), DnsName::new(""));
    assert_eq!("a", DnsName::new("a.").unwrap().to_string());
    DnsName::new("a..").unwrap_err();
    DnsName::new(".a").unwrap_err();
    DnsName::new("b..a").unwrap_err();
    DnsName::new(".b.a").unwrap_err();
}

#[cfg(test)]
#[test]
fn test_new_label_normalizing() {
    assert_eq!(
        "xyz321-654abc.def",
        DnsName::new("Xyz321-654abC.DeF").unwrap().to_string()
    );
    assert_eq!(
        vec!["a-b", "c"],
        names(&DnsName::new("a-b.c").unwrap())
    );
}

#[cfg(test)]
#[test]
fn test_new_name_length() {
    let label63 = "a".repeat(63);
    // 3 * 64 + 62 + 1 = 255
    DnsName::new(&format!("{label63}.{label63}.{label63}.{}", "a".repeat(61))).unwrap();
    assert_eq!(
        Err(DnsError::NameTooLong { size: 256 }),
        DnsName::new(&format!("{label63}.{label63}.{label63}.{}", "a".repeat(62)))
    );
    DnsName::new(&vec!["a"; 127].join(".")).unwrap();
    assert_eq!(
        Err(DnsError::NameTooLong { size: 257 }),
        DnsName::new(&vec!["a"; 128].join("."))
    );
}

#[cfg(test)]
#[test]
fn test_display() {
    assert_eq!(
        "example.com",
        format!("{}", DnsName::new("example.com").unwrap())
    );
    assert_eq!(".", DnsName::root().to_string());
}

#[cfg(test)]
#[test]
fn test_decode() {
    let (name, consumed) = DnsName::decode(&EXAMPLE_COM).unwrap();
    assert_eq!(vec!["example", "com"], names(&name));
    assert_eq!(13, consumed);
    assert_eq!(13, name.encoded_len());

    let mut trailing = EXAMPLE_COM.to_vec();
    trailing.extend_from_slice(&[0, 1, 0, 1]);
    assert_eq!((name, 13), DnsName::decode(&trailing).unwrap());

    let (root, consumed) = DnsName::decode(&[0, 0xFF]).unwrap();
    assert!(root.is_root());
    assert_eq!(1, consumed);
}

#[cfg(test)]
#[test]
fn test_decode_short_buffer() {
    let cases: [&[u8]; 3] = [&[], &[0], &[3]];
    for bytes in cases {
        assert_eq!(
            Err(DnsError::BufferUnderrun {
                offset: 0,
                needed: 2,
                available: bytes.len()
            }),
            DnsName::decode(bytes)
        );
    }
    // Missing terminator.
    assert_eq!(
        Err(DnsError::BufferUnderrun {
            offset: 2,
            needed: 1,
            available: 2
        }),
        DnsName::decode(&[1, b'a'])
    );
}

#[cfg(test)]
#[test]
fn test_decode_label_overrun() {
    assert_eq!(
        Err(DnsError::LabelOverrun {
            offset: 0,
            length: 5,
            buffer_len: 4
        }),
        DnsName::decode(&[5, b'a', b'b', 0])
    );
    assert_eq!(
        Err(DnsError::LabelOverrun {
            offset: 2,
            length: 63,
            buffer_len: 4
        }),
        DnsName::decode(&[1, b'a', 63, 0])
    );
    // Without compression a pointer is just a very long label.
    assert_eq!(
        Err(DnsError::LabelOverrun {
            offset: 0,
            length: 0xC0,
            buffer_len: 2
        }),
        DnsName::decode(&[0xC0, 0x00])
    );
}

#[cfg(test)]
#[test]
fn test_decode_invalid_label() {
    assert_eq!(
        Err(DnsError::InvalidLabel(crate::LabelError::ReservedHyphens)),
        DnsName::decode(&[6, b'a', b'b', b'-', b'-', b'c', b'd', 0])
    );
    let (name, _) = DnsName::decode(&[7, b'x', b'n', b'-', b'-', b'a', b'b', b'c', 0]).unwrap();
    assert_eq!(vec!["xn--abc"], names(&name));
}

#[cfg(test)]
#[test]
fn test_decode_name_too_long_fails_fast() {
    // Five 63-byte labels and no terminator: the limit trips on the fifth label, before the
    // missing terminator is noticed.
    let mut bytes = Vec::new();
    for _ in 0..5 {
        bytes.push(63);
        bytes.extend_from_slice(&[b'a'; 63]);
    }
    assert_eq!(
        Err(DnsError::NameTooLong { size: 315 }),
        DnsName::decode(&bytes)
    );
    // Four labels is 252 label bytes, which is fine.
    bytes.truncate(4 * 64);
    bytes.push(0);
    let (name, consumed) = DnsName::decode(&bytes).unwrap();
    assert_eq!(4, name.labels().len());
    assert_eq!(257, consumed);
}

#[cfg(test)]
#[test]
fn test_decode_compressed_pointer() {
    let mut packet = EXAMPLE_COM.to_vec();
    // offset 13: "www" then a pointer to offset 0
    packet.extend_from_slice(&[3, b'w', b'w', b'w', 0xC0, 0x00, 0xAA]);
    let mut cursor = DnsCursor::new(&packet);
    cursor.advance(13).unwrap();
    let (name, consumed) = DnsName::decode_compressed(&cursor).unwrap();
    assert_eq!(vec!["www", "example", "com"], names(&name));
    assert_eq!(6, consumed);
    assert_eq!(13, cursor.offset());
    assert_eq!(name, DnsName::read(&mut cursor).unwrap());
    assert_eq!(19, cursor.offset());
}

#[cfg(test)]
#[test]
fn test_decode_compressed_pointer_only() {
    // offset 10: example.com, offset 30: pointer to offset 10
    let mut packet = vec![0xAA_u8; 10];
    packet.extend_from_slice(&EXAMPLE_COM);
    packet.extend_from_slice(&[0xAA; 7]);
    packet.extend_from_slice(&[0xC0, 0x0A]);
    let mut cursor = DnsCursor::new(&packet);
    cursor.advance(30).unwrap();
    let (name, consumed) = DnsName::decode_compressed(&cursor).unwrap();
    assert_eq!(vec!["example", "com"], names(&name));
    assert_eq!(2, consumed);
    assert_eq!(name, DnsName::read(&mut cursor).unwrap());
    assert_eq!(32, cursor.offset());
}

#[cfg(test)]
#[test]
fn test_decode_compressed_literal() {
    let cursor = DnsCursor::new(&EXAMPLE_COM);
    assert_eq!(
        DnsName::decode(&EXAMPLE_COM).unwrap(),
        DnsName::decode_compressed(&cursor).unwrap()
    );
    // The root name needs only one byte in a packet.
    let packet = [0_u8];
    let (root, consumed) = DnsName::decode_compressed(&DnsCursor::new(&packet)).unwrap();
    assert!(root.is_root());
    assert_eq!(1, consumed);
}

#[cfg(test)]
#[test]
fn test_decode_compressed_recursive_pointer() {
    // Two pointers aimed at each other.
    let packet = [0xC0, 0x02, 0xC0, 0x00];
    assert_eq!(
        Err(DnsError::RecursivePointer { offset: 2 }),
        DnsName::decode_compressed(&DnsCursor::new(&packet))
    );
    // A pointer aimed at itself.
    let packet = [0xC0, 0x00];
    assert_eq!(
        Err(DnsError::RecursivePointer { offset: 0 }),
        DnsName::decode_compressed(&DnsCursor::new(&packet))
    );
    // A chain that would otherwise resolve is still refused.
    let mut packet = EXAMPLE_COM.to_vec();
    packet.extend_from_slice(&[1, b'a', 0xC0, 0x00, 0xC0, 0x0D]);
    let mut cursor = DnsCursor::new(&packet);
    cursor.advance(17).unwrap();
    assert_eq!(
        Err(DnsError::RecursivePointer { offset: 15 }),
        DnsName::decode_compressed(&cursor)
    );
}

#[cfg(test)]
#[test]
fn test_decode_compressed_bad_pointer() {
    // Pointer past the end of the packet.
    let packet = [0xC0, 0x10];
    assert_eq!(
        Err(DnsError::BufferUnderrun {
            offset: 0x10,
            needed: 1,
            available: 2
        }),
        DnsName::decode_compressed(&DnsCursor::new(&packet))
    );
    // Pointer cut in half.
    let packet = [1, b'a', 0xC0];
    assert_eq!(
        Err(DnsError::BufferUnderrun {
            offset: 2,
            needed: 2,
            available: 3
        }),
        DnsName::decode_compressed(&DnsCursor::new(&packet))
    );
    // Extended label types (01 and 10 prefixes) are not pointers.
    let packet = [0x41, 0x00];
    assert_eq!(
        Err(DnsError::LabelOverrun {
            offset: 0,
            length: 0x41,
            buffer_len: 2
        }),
        DnsName::decode_compressed(&DnsCursor::new(&packet))
    );
}

#[cfg(test)]
#[test]
fn test_encode() {
    assert_eq!(
        EXAMPLE_COM.to_vec(),
        DnsName::new("example.com").unwrap().encode().unwrap()
    );
    assert_eq!(Err(DnsError::EmptyName), DnsName::root().encode());
    let too_long = DnsName {
        labels: vec![DnsLabel::new(&"a".repeat(63)).unwrap(); 4],
    };
    assert_eq!(Err(DnsError::NameTooLong { size: 257 }), too_long.encode());
}

#[cfg(test)]
#[test]
fn test_round_trip() {
    let label63 = "b".repeat(63);
    let longest = format!("{label63}.{label63}.{label63}.{}", "c".repeat(61));
    for value in [
        "a",
        "example.com",
        "xn--bcher-kva.example",
        "a.b.c.d.e.f.g",
        longest.as_str(),
    ] {
        let name = DnsName::new(value).unwrap();
        let encoded = name.encode().unwrap();
        assert_eq!(name.encoded_len(), encoded.len());
        assert_eq!((name, encoded.len()), DnsName::decode(&encoded).unwrap());
    }
}

#[cfg(test)]
#[test]
fn test_write() {
    let mut out: FixedBuf<32> = FixedBuf::new();
    DnsName::new("example.com").unwrap().write(&mut out).unwrap();
    assert_eq!(EXAMPLE_COM, out.readable());
    assert_eq!(vec![0], DnsName::root().encode_allow_root().unwrap());
    assert_eq!(Err(DnsError::EmptyName), DnsName::root().write(&mut out));
    let mut small: FixedBuf<4> = FixedBuf::new();
    assert_eq!(
        Err(DnsError::ResponseBufferFull),
        DnsName::new("example.com").unwrap().write(&mut small)
    );
}
