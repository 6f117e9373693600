use crate::{DnsCursor, DnsError, DnsName, DnsType};
use std::net::{Ipv4Addr, Ipv6Addr};
use tracing::debug;

/// > `RDATA` a variable length string of octets that describes the resource.  The format of this
/// > information varies according to the TYPE and CLASS of the resource record.
///
/// <https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.3>
///
/// Names inside record data are decoded against the whole packet, so they may be compressed.
/// They are always encoded uncompressed.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum DnsRecordData {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    /// <https://datatracker.ietf.org/doc/html/rfc8659#section-4.1>
    CAA {
        flags: u8,
        tag: Vec<u8>,
        value: Vec<u8>,
    },
    CNAME(DnsName),
    MX {
        preference: u16,
        exchange: DnsName,
    },
    NS(DnsName),
    PTR(DnsName),
    /// <https://datatracker.ietf.org/doc/html/rfc1035#section-3.3.13>
    SOA {
        mname: DnsName,
        rname: DnsName,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    },
    /// <https://datatracker.ietf.org/doc/html/rfc2782>
    SRV {
        priority: u16,
        weight: u16,
        port: u16,
        target: DnsName,
    },
    /// One or more `<character-string>`s.
    TXT(Vec<Vec<u8>>),
    /// <https://datatracker.ietf.org/doc/html/rfc3403#section-4.1>
    NAPTR {
        order: u16,
        preference: u16,
        flags: Vec<u8>,
        services: Vec<u8>,
        regexp: Vec<u8>,
        replacement: DnsName,
    },
    /// <https://datatracker.ietf.org/doc/html/rfc6698#section-2.1>
    TLSA {
        usage: u8,
        selector: u8,
        matching_type: u8,
        data: Vec<u8>,
    },
    /// Any other type, including OPT, kept as raw bytes.
    Unknown { typ: u16, rdata: Vec<u8> },
}
impl DnsRecordData {
    #[must_use]
    pub fn typ(&self) -> DnsType {
        match self {
            DnsRecordData::A(_) => DnsType::A,
            DnsRecordData::AAAA(_) => DnsType::AAAA,
            DnsRecordData::CAA { .. } => DnsType::CAA,
            DnsRecordData::CNAME(_) => DnsType::CNAME,
            DnsRecordData::MX { .. } => DnsType::MX,
            DnsRecordData::NS(_) => DnsType::NS,
            DnsRecordData::PTR(_) => DnsType::PTR,
            DnsRecordData::SOA { .. } => DnsType::SOA,
            DnsRecordData::SRV { .. } => DnsType::SRV,
            DnsRecordData::TXT(_) => DnsType::TXT,
            DnsRecordData::NAPTR { .. } => DnsType::NAPTR,
            DnsRecordData::TLSA { .. } => DnsType::TLSA,
            DnsRecordData::Unknown { typ, .. } => DnsType::new(*typ),
        }
    }

    /// > `<character-string>` is a single length octet followed by that number of characters.
    ///
    /// <https://datatracker.ietf.org/doc/html/rfc1035#section-3.3>
    fn read_character_string(cursor: &mut DnsCursor<'_>) -> Result<Vec<u8>, DnsError> {
        let len = cursor.read_u8()?;
        Ok(cursor.read_bytes(usize::from(len))?.to_vec())
    }

    fn read_rest(cursor: &mut DnsCursor<'_>) -> Result<Vec<u8>, DnsError> {
        Ok(cursor.read_bytes(cursor.remaining())?.to_vec())
    }

    fn read_fields(typ: DnsType, rdata: &mut DnsCursor<'_>) -> Result<Self, DnsError> {
        Ok(match typ {
            DnsType::A => {
                let b = rdata.read_bytes(4)?;
                DnsRecordData::A(Ipv4Addr::new(b[0], b[1], b[2], b[3]))
            }
            DnsType::AAAA => {
                let mut octets = [0_u8; 16];
                octets.copy_from_slice(rdata.read_bytes(16)?);
                DnsRecordData::AAAA(Ipv6Addr::from(octets))
            }
            DnsType::CAA => DnsRecordData::CAA {
                flags: rdata.read_u8()?,
                tag: Self::read_character_string(rdata)?,
                value: Self::read_rest(rdata)?,
            },
            DnsType::CNAME => DnsRecordData::CNAME(DnsName::read(rdata)?),
            DnsType::MX => DnsRecordData::MX {
                preference: rdata.read_u16_be()?,
                exchange: DnsName::read(rdata)?,
            },
            DnsType::NS => DnsRecordData::NS(DnsName::read(rdata)?),
            DnsType::PTR => DnsRecordData::PTR(DnsName::read(rdata)?),
            DnsType::SOA => DnsRecordData::SOA {
                mname: DnsName::read(rdata)?,
                rname: DnsName::read(rdata)?,
                serial: rdata.read_u32_be()?,
                refresh: rdata.read_u32_be()?,
                retry: rdata.read_u32_be()?,
                expire: rdata.read_u32_be()?,
                minimum: rdata.read_u32_be()?,
            },
            DnsType::SRV => DnsRecordData::SRV {
                priority: rdata.read_u16_be()?,
                weight: rdata.read_u16_be()?,
                port: rdata.read_u16_be()?,
                target: DnsName::read(rdata)?,
            },
            DnsType::TXT => {
                let mut strings = Vec::new();
                while !rdata.is_empty() {
                    strings.push(Self::read_character_string(rdata)?);
                }
                DnsRecordData::TXT(strings)
            }
            DnsType::NAPTR => DnsRecordData::NAPTR {
                order: rdata.read_u16_be()?,
                preference: rdata.read_u16_be()?,
                flags: Self::read_character_string(rdata)?,
                services: Self::read_character_string(rdata)?,
                regexp: Self::read_character_string(rdata)?,
                replacement: DnsName::read(rdata)?,
            },
            DnsType::TLSA => DnsRecordData::TLSA {
                usage: rdata.read_u8()?,
                selector: rdata.read_u8()?,
                matching_type: rdata.read_u8()?,
                data: Self::read_rest(rdata)?,
            },
            DnsType::OPT | DnsType::ANY | DnsType::Unknown(_) => {
                debug!(typ = typ.num(), len = rdata.remaining(), "keeping raw record data");
                DnsRecordData::Unknown {
                    typ: typ.num(),
                    rdata: Self::read_rest(rdata)?,
                }
            }
        })
    }

    /// Decodes `rdlength` bytes of record data at the cursor and moves the cursor past them.
    /// Compression pointers in the data may target any byte of the packet.
    ///
    /// # Errors
    /// Returns an error when fewer than `rdlength` bytes remain, or the data does not decode to
    /// exactly `rdlength` bytes.
    pub fn read(
        typ: DnsType,
        cursor: &mut DnsCursor<'_>,
        rdlength: usize,
    ) -> Result<Self, DnsError> {
        let start = cursor.offset();
        let mut rdata = cursor.limited(rdlength)?;
        let end = start + rdlength;
        let data = Self::read_fields(typ, &mut rdata).map_err(|e| match e {
            // A read that began inside the record data ran off its end.  Underruns elsewhere come
            // from compression pointers and pass through.
            DnsError::BufferUnderrun { offset, needed, .. } if (start..=end).contains(&offset) => {
                DnsError::InvalidRdata {
                    typ: typ.num(),
                    expected: rdlength,
                    actual: offset + needed - start,
                }
            }
            other => other,
        })?;
        let consumed = rdata.offset() - start;
        if consumed != rdlength {
            return Err(DnsError::InvalidRdata {
                typ: typ.num(),
                expected: rdlength,
                actual: consumed,
            });
        }
        cursor.advance(rdlength)?;
        Ok(data)
    }

    fn push_character_string(out: &mut Vec<u8>, value: &[u8]) -> Result<(), DnsError> {
        let len = u8::try_from(value.len())
            .map_err(|_| DnsError::StringTooLong { len: value.len() })?;
        out.push(len);
        out.extend_from_slice(value);
        Ok(())
    }

    /// Returns the record data without its length prefix.
    ///
    /// # Errors
    /// Returns an error when a name cannot be encoded or a `<character-string>` is longer than
    /// 255 bytes.
    pub fn encode(&self) -> Result<Vec<u8>, DnsError> {
        let mut out = Vec::new();
        match self {
            DnsRecordData::A(addr) => out.extend_from_slice(&addr.octets()),
            DnsRecordData::AAAA(addr) => out.extend_from_slice(&addr.octets()),
            DnsRecordData::CAA { flags, tag, value } => {
                out.push(*flags);
                Self::push_character_string(&mut out, tag)?;
                out.extend_from_slice(value);
            }
            DnsRecordData::CNAME(name) | DnsRecordData::NS(name) | DnsRecordData::PTR(name) => {
                out.extend(name.encode_allow_root()?);
            }
            DnsRecordData::MX {
                preference,
                exchange,
            } => {
                out.extend_from_slice(&preference.to_be_bytes());
                out.extend(exchange.encode_allow_root()?);
            }
            DnsRecordData::SOA {
                mname,
                rname,
                serial,
                refresh,
                retry,
                expire,
                minimum,
            } => {
                out.extend(mname.encode_allow_root()?);
                out.extend(rname.encode_allow_root()?);
                for n in [serial, refresh, retry, expire, minimum] {
                    out.extend_from_slice(&n.to_be_bytes());
                }
            }
            DnsRecordData::SRV {
                priority,
                weight,
                port,
                target,
            } => {
                for n in [priority, weight, port] {
                    out.extend_from_slice(&n.to_be_bytes());
                }
                out.extend(target.encode_allow_root()?);
            }
            DnsRecordData::TXT(strings) => {
                for value in strings {
                    Self::push_character_string(&mut out, value)?;
                }
            }
            DnsRecordData::NAPTR {
                order,
                preference,
                flags,
                services,
                regexp,
                replacement,
            } => {
                out.extend_from_slice(&order.to_be_bytes());
                out.extend_from_slice(&preference.to_be_bytes());
                for value in [flags, services, regexp] {
                    Self::push_character_string(&mut out, value)?;
                }
                out.extend(replacement.encode_allow_root()?);
            }
            DnsRecordData::TLSA {
                usage,
                selector,
                matching_type,
                data,
            } => {
                out.extend_from_slice(&[*usage, *selector, *matching_type]);
                out.extend_from_slice(data);
            }
            DnsRecordData::Unknown { rdata, .. } => out.extend_from_slice(rdata),
        }
        Ok(out)
    }
}

#[cfg(test)]
fn decode(typ: DnsType, rdata: &[u8]) -> Result<DnsRecordData, DnsError> {
    let mut cursor = DnsCursor::new(rdata);
    let data = DnsRecordData::read(typ, &mut cursor, rdata.len())?;
    assert!(cursor.is_empty());
    Ok(data)
}

#[cfg(test)]
#[test]
fn test_addresses() {
    assert_eq!(
        DnsRecordData::A(Ipv4Addr::new(10, 0, 0, 1)),
        decode(DnsType::A, &[10, 0, 0, 1]).unwrap()
    );
    assert_eq!(
        DnsRecordData::AAAA(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1)),
        decode(
            DnsType::AAAA,
            &[0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]
        )
        .unwrap()
    );
}

#[cfg(test)]
#[test]
fn test_length_mismatch() {
    assert_eq!(
        Err(DnsError::InvalidRdata {
            typ: 1,
            expected: 3,
            actual: 4
        }),
        decode(DnsType::A, &[10, 0, 0])
    );
    assert_eq!(
        Err(DnsError::InvalidRdata {
            typ: 1,
            expected: 5,
            actual: 4
        }),
        decode(DnsType::A, &[10, 0, 0, 1, 9])
    );
    // A TXT string that claims more bytes than the record holds.
    assert_eq!(
        Err(DnsError::InvalidRdata {
            typ: 16,
            expected: 3,
            actual: 6
        }),
        decode(DnsType::TXT, &[5, b'a', b'b'])
    );
}

#[cfg(test)]
#[test]
fn test_rdlength_past_packet() {
    let packet = [10, 0, 0, 1];
    let mut cursor = DnsCursor::new(&packet);
    assert_eq!(
        Err(DnsError::BufferUnderrun {
            offset: 0,
            needed: 8,
            available: 4
        }),
        DnsRecordData::read(DnsType::A, &mut cursor, 8)
    );
    assert_eq!(0, cursor.offset());
}

#[cfg(test)]
#[test]
fn test_compressed_name_in_rdata() {
    let mut packet = vec![7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0];
    // MX preference=10, exchange=mail + pointer to offset 0
    packet.extend_from_slice(&[0, 10, 4, b'm', b'a', b'i', b'l', 0xC0, 0x00]);
    let mut cursor = DnsCursor::new(&packet);
    cursor.advance(13).unwrap();
    let data = DnsRecordData::read(DnsType::MX, &mut cursor, 9).unwrap();
    assert_eq!(
        DnsRecordData::MX {
            preference: 10,
            exchange: DnsName::new("mail.example.com").unwrap()
        },
        data
    );
    assert!(cursor.is_empty());
    // Re-encoding expands the pointer.
    let mut expected = vec![0, 10, 4, b'm', b'a', b'i', b'l'];
    expected.extend_from_slice(&packet[..13]);
    assert_eq!(expected, data.encode().unwrap());
}

#[cfg(test)]
#[test]
fn test_pointer_out_of_rdata() {
    // offset 0: MX preference=10, exchange=pointer to offset 4, offset 4: example.com
    let mut packet = vec![0, 10, 0xC0, 0x04];
    packet.extend_from_slice(&[
        7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0,
    ]);
    let mut cursor = DnsCursor::new(&packet);
    assert_eq!(
        DnsRecordData::MX {
            preference: 10,
            exchange: DnsName::new("example.com").unwrap()
        },
        DnsRecordData::read(DnsType::MX, &mut cursor, 4).unwrap()
    );
    assert_eq!(4, cursor.offset());
}

#[cfg(test)]
#[test]
fn test_name_past_rdata() {
    // CNAME rdlength=3 but the name takes five bytes.
    let packet = [3, b'w', b'w', b'w', 0];
    let mut cursor = DnsCursor::new(&packet);
    assert_eq!(
        Err(DnsError::InvalidRdata {
            typ: 5,
            expected: 3,
            actual: 5
        }),
        DnsRecordData::read(DnsType::CNAME, &mut cursor, 3)
    );
    assert_eq!(0, cursor.offset());
}

#[cfg(test)]
#[test]
fn test_soa() {
    let mut rdata = vec![2, b'n', b's', 0, 5, b'a', b'd', b'm', b'i', b'n', 0];
    for n in [2024_u32, 7200, 3600, 1_209_600, 300] {
        rdata.extend_from_slice(&n.to_be_bytes());
    }
    let data = decode(DnsType::SOA, &rdata).unwrap();
    assert_eq!(
        DnsRecordData::SOA {
            mname: DnsName::new("ns").unwrap(),
            rname: DnsName::new("admin").unwrap(),
            serial: 2024,
            refresh: 7200,
            retry: 3600,
            expire: 1_209_600,
            minimum: 300,
        },
        data
    );
    assert_eq!(rdata, data.encode().unwrap());
}

#[cfg(test)]
#[test]
fn test_srv_root_target() {
    let rdata = [0, 1, 0, 2, 0x01, 0xBB, 0];
    let data = decode(DnsType::SRV, &rdata).unwrap();
    assert_eq!(
        DnsRecordData::SRV {
            priority: 1,
            weight: 2,
            port: 443,
            target: DnsName::root()
        },
        data
    );
    assert_eq!(rdata.to_vec(), data.encode().unwrap());
}

#[cfg(test)]
#[test]
fn test_txt() {
    let rdata = [3, b'a', b'b', b'c', 0, 1, b'd'];
    let data = decode(DnsType::TXT, &rdata).unwrap();
    assert_eq!(
        DnsRecordData::TXT(vec![b"abc".to_vec(), Vec::new(), b"d".to_vec()]),
        data
    );
    assert_eq!(rdata.to_vec(), data.encode().unwrap());
    assert_eq!(
        Err(DnsError::StringTooLong { len: 256 }),
        DnsRecordData::TXT(vec![vec![b'a'; 256]]).encode()
    );
}

#[cfg(test)]
#[test]
fn test_naptr() {
    let mut rdata = vec![0, 100, 0, 10, 1, b'u', 7];
    rdata.extend_from_slice(b"E2U+sip");
    rdata.push(0);
    rdata.extend_from_slice(&[0]);
    let data = decode(DnsType::NAPTR, &rdata).unwrap();
    assert_eq!(
        DnsRecordData::NAPTR {
            order: 100,
            preference: 10,
            flags: b"u".to_vec(),
            services: b"E2U+sip".to_vec(),
            regexp: Vec::new(),
            replacement: DnsName::root(),
        },
        data
    );
    assert_eq!(rdata, data.encode().unwrap());
}

#[cfg(test)]
#[test]
fn test_caa_and_tlsa() {
    let mut rdata = vec![0, 5];
    rdata.extend_from_slice(b"issue");
    rdata.extend_from_slice(b"ca.example.net");
    let data = decode(DnsType::CAA, &rdata).unwrap();
    assert_eq!(
        DnsRecordData::CAA {
            flags: 0,
            tag: b"issue".to_vec(),
            value: b"ca.example.net".to_vec()
        },
        data
    );
    assert_eq!(rdata, data.encode().unwrap());

    let rdata = [3, 1, 1, 0xAB, 0xCD];
    let data = decode(DnsType::TLSA, &rdata).unwrap();
    assert_eq!(
        DnsRecordData::TLSA {
            usage: 3,
            selector: 1,
            matching_type: 1,
            data: vec![0xAB, 0xCD]
        },
        data
    );
    assert_eq!(DnsType::TLSA, data.typ());
}

#[cfg(test)]
#[test]
fn test_unknown() {
    let data = decode(DnsType::new(65280), &[1, 2, 3]).unwrap();
    assert_eq!(
        DnsRecordData::Unknown {
            typ: 65280,
            rdata: vec![1, 2, 3]
        },
        data
    );
    assert_eq!(DnsType::Unknown(65280), data.typ());
    let opt = decode(DnsType::OPT, &[]).unwrap();
    assert_eq!(DnsType::OPT, opt.typ());
}
