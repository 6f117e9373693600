use crate::DnsError;

/// A read position over one complete DNS packet.
///
/// The cursor always holds the *whole* packet, even while a decoder works on a
/// single section.  Compression pointers are absolute offsets from the start of
/// the message, so a name in the authority section may point back into the
/// question section:
///
/// > In order to reduce the size of messages, the domain system utilizes a
/// > compression scheme which eliminates the repetition of domain names in a
/// > message.  In this scheme, an entire domain name or a list of labels at
/// > the end of a domain name is replaced with a pointer to a prior occurance
/// > of the same name.
///
/// <https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.4>
///
/// The `read_*` methods advance by exactly the width they read and stop at the cursor's end,
/// which [`DnsCursor::limited`] can pull in to bound a single field.  The `*_at` methods peek at
/// an absolute offset anywhere in the packet and never move the cursor.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DnsCursor<'a> {
    packet: &'a [u8],
    offset: usize,
    end: usize,
}
impl<'a> DnsCursor<'a> {
    #[must_use]
    pub fn new(packet: &'a [u8]) -> Self {
        Self {
            packet,
            offset: 0,
            end: packet.len(),
        }
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The full packet, from offset 0, regardless of the current position or end.
    #[must_use]
    pub fn packet(&self) -> &'a [u8] {
        self.packet
    }

    /// Bytes left to read before the cursor's end.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.end - self.offset
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn check(offset: usize, needed: usize, limit: usize) -> Result<(), DnsError> {
        match offset.checked_add(needed) {
            Some(end) if end <= limit => Ok(()),
            _ => Err(DnsError::BufferUnderrun {
                offset,
                needed,
                available: limit,
            }),
        }
    }

    /// # Errors
    /// Returns an error when `offset` is at or past the end of the packet.
    pub fn u8_at(&self, offset: usize) -> Result<u8, DnsError> {
        Self::check(offset, 1, self.packet.len())?;
        Ok(self.packet[offset])
    }

    /// # Errors
    /// Returns an error when fewer than two bytes exist at `offset`.
    pub fn u16_at(&self, offset: usize) -> Result<u16, DnsError> {
        Self::check(offset, 2, self.packet.len())?;
        Ok(u16::from_be_bytes([
            self.packet[offset],
            self.packet[offset + 1],
        ]))
    }

    /// A cursor at the same position that can read only the next `len` bytes.  The whole packet
    /// stays reachable through [`DnsCursor::packet`] and the `*_at` methods, so compression
    /// pointers inside a bounded field resolve anywhere in the message.
    ///
    /// # Errors
    /// Returns an error when fewer than `len` bytes remain.
    pub fn limited(&self, len: usize) -> Result<DnsCursor<'a>, DnsError> {
        Self::check(self.offset, len, self.end)?;
        Ok(Self {
            packet: self.packet,
            offset: self.offset,
            end: self.offset + len,
        })
    }

    /// # Errors
    /// Returns an error when the cursor would move past its end.
    pub fn advance(&mut self, len: usize) -> Result<(), DnsError> {
        Self::check(self.offset, len, self.end)?;
        self.offset += len;
        Ok(())
    }

    /// # Errors
    /// Returns an error when fewer than `len` bytes remain.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DnsError> {
        Self::check(self.offset, len, self.end)?;
        let bytes = &self.packet[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    /// # Errors
    /// Returns an error when nothing remains.
    pub fn read_u8(&mut self) -> Result<u8, DnsError> {
        Ok(self.read_bytes(1)?[0])
    }

    /// # Errors
    /// Returns an error when fewer than two bytes remain.
    pub fn read_u16_be(&mut self) -> Result<u16, DnsError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// # Errors
    /// Returns an error when fewer than four bytes remain.
    pub fn read_u32_be(&mut self) -> Result<u32, DnsError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

#[cfg(test)]
#[test]
fn test_reads() {
    let packet = [0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE];
    let mut cursor = DnsCursor::new(&packet);
    assert_eq!(0x12, cursor.read_u8().unwrap());
    assert_eq!(0x3456, cursor.read_u16_be().unwrap());
    assert_eq!(3, cursor.offset());
    assert_eq!(0x789A_BCDE, cursor.read_u32_be().unwrap());
    assert!(cursor.is_empty());
    assert_eq!(&packet, cursor.packet());
}

#[cfg(test)]
#[test]
fn test_underrun() {
    let packet = [1_u8, 2, 3];
    let mut cursor = DnsCursor::new(&packet);
    cursor.advance(2).unwrap();
    assert_eq!(
        Err(DnsError::BufferUnderrun {
            offset: 2,
            needed: 2,
            available: 3
        }),
        cursor.read_u16_be()
    );
    // A failed read leaves the position alone.
    assert_eq!(2, cursor.offset());
    assert_eq!(
        Err(DnsError::BufferUnderrun {
            offset: 2,
            needed: 4,
            available: 3
        }),
        cursor.read_u32_be()
    );
    cursor.advance(2).unwrap_err();
    cursor.advance(1).unwrap();
    cursor.read_u8().unwrap_err();
    cursor.read_bytes(1).unwrap_err();
    assert_eq!(0, cursor.read_bytes(0).unwrap().len());
}

#[cfg(test)]
#[test]
fn test_peek_does_not_move() {
    let packet = [0xC0, 0x0C, 0x00];
    let cursor = DnsCursor::new(&packet);
    assert_eq!(0xC00C, cursor.u16_at(0).unwrap());
    assert_eq!(0x00, cursor.u8_at(2).unwrap());
    assert_eq!(0, cursor.offset());
    cursor.u16_at(2).unwrap_err();
    cursor.u8_at(usize::MAX).unwrap_err();
}

#[cfg(test)]
#[test]
fn test_limited() {
    let packet = [1_u8, 2, 3, 4, 5, 6];
    let mut cursor = DnsCursor::new(&packet);
    cursor.advance(2).unwrap();
    let mut limited = cursor.limited(2).unwrap();
    assert_eq!(2, limited.offset());
    assert_eq!(2, limited.remaining());
    assert_eq!(&packet, limited.packet());
    // Peeks reach both sides of the bounded field.
    assert_eq!(1, limited.u8_at(0).unwrap());
    assert_eq!(6, limited.u8_at(5).unwrap());
    assert_eq!(0x0304, limited.read_u16_be().unwrap());
    assert!(limited.is_empty());
    assert_eq!(
        Err(DnsError::BufferUnderrun {
            offset: 4,
            needed: 1,
            available: 4
        }),
        limited.read_u8()
    );
    limited.advance(1).unwrap_err();
    limited.limited(1).unwrap_err();
    cursor.limited(5).unwrap_err();
    assert_eq!(2, cursor.offset());
}
