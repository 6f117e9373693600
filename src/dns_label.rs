use crate::{write_bytes, DnsError, LabelError, MAX_LABEL_LEN};
use core::fmt::{Display, Formatter};
use fixed_buffer::FixedBuf;

/// One component of a domain name.
///
/// > `<label> ::= <letter> [ [ <ldh-str> ] <let-dig> ]`
/// >
/// > `<ldh-str> ::= <let-dig-hyp> | <let-dig-hyp> <ldh-str>`
/// >
/// > `<let-dig-hyp> ::= <let-dig> | "-"`
/// >
/// > `<let-dig> ::= <letter> | <digit>`
/// >
/// > The labels must follow the rules for ARPANET host names.  They must start with a letter, end
/// > with a letter or digit, and have as interior characters only letters, digits, and hyphen.
/// > There are also some restrictions on the length.  Labels must be 63 characters or less.
///
/// <https://datatracker.ietf.org/doc/html/rfc1035#section-2.3.1>
///
/// The leading-letter rule was relaxed to allow a leading digit:
///
/// > One aspect of host name syntax is hereby changed: the restriction on the first character is
/// > relaxed to allow either a letter or a digit.
///
/// <https://datatracker.ietf.org/doc/html/rfc1123#section-2.1>
///
/// Hyphens in the third and fourth positions are reserved for the IDNA ACE prefix:
///
/// > The Unicode string MUST NOT contain "--" (two consecutive hyphens) in the third and fourth
/// > character positions.
///
/// <https://datatracker.ietf.org/doc/html/rfc5891#section-4.2.3.1>
///
/// Case is kept exactly as it appeared on the wire.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DnsLabel(String);
impl DnsLabel {
    fn is_letter_digit_hyphen(b: u8) -> bool {
        b.is_ascii_alphanumeric() || b == b'-'
    }

    fn validate(bytes: &[u8]) -> Result<(), LabelError> {
        if bytes.is_empty() {
            return Err(LabelError::Empty);
        }
        if bytes.len() > MAX_LABEL_LEN {
            return Err(LabelError::TooLong { len: bytes.len() });
        }
        if let Some(position) = bytes
            .iter()
            .position(|b| !Self::is_letter_digit_hyphen(*b))
        {
            return Err(LabelError::InvalidByte {
                position,
                byte: bytes[position],
            });
        }
        if bytes[0] == b'-' {
            return Err(LabelError::LeadingHyphen);
        }
        if bytes[bytes.len() - 1] == b'-' {
            return Err(LabelError::TrailingHyphen);
        }
        if bytes.len() >= 4 && &bytes[2..4] == b"--" && &bytes[0..2] != b"xn" {
            return Err(LabelError::ReservedHyphens);
        }
        Ok(())
    }

    /// Validates the raw bytes of a single label, without its length byte.
    ///
    /// # Errors
    /// Returns [`DnsError::InvalidLabel`] naming the first rule `bytes` breaks.
    pub fn decode(bytes: &[u8]) -> Result<Self, DnsError> {
        Self::validate(bytes)?;
        Ok(Self(bytes.iter().copied().map(char::from).collect()))
    }

    /// # Errors
    /// Returns an error when `value` is not a valid label.
    pub fn new(value: &str) -> Result<Self, DnsError> {
        Self::decode(value.as_bytes())
    }

    /// Returns the length byte followed by the label bytes.
    ///
    /// # Errors
    /// Returns an error when the label does not pass validation.  Labels built by this module
    /// always do.
    pub fn encode(&self) -> Result<Vec<u8>, DnsError> {
        Self::validate(self.0.as_bytes())?;
        let mut out = Vec::with_capacity(self.0.len() + 1);
        // validate() bounds the length at 63.
        out.push(self.0.len() as u8);
        out.extend_from_slice(self.0.as_bytes());
        Ok(out)
    }

    /// # Errors
    /// Returns an error when `out` fills up or the label does not pass validation.
    pub fn write<const N: usize>(&self, out: &mut FixedBuf<N>) -> Result<(), DnsError> {
        write_bytes(out, &self.encode()?)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false.  A label holds at least one byte.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl AsRef<[u8]> for DnsLabel {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
impl Display for DnsLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
fn label_err(value: &[u8]) -> LabelError {
    match DnsLabel::decode(value) {
        Err(DnsError::InvalidLabel(e)) => e,
        other => panic!("expected InvalidLabel for {value:?}, got {other:?}"),
    }
}

#[cfg(test)]
#[test]
fn test_charset() {
    const ALLOWED: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-";
    for b in 0..=255_u8 {
        let value = [b'a', b, b'a'];
        if ALLOWED.contains(&b) {
            DnsLabel::decode(&value).unwrap();
        } else {
            assert_eq!(
                LabelError::InvalidByte {
                    position: 1,
                    byte: b
                },
                label_err(&value)
            );
        }
    }
}

#[cfg(test)]
#[test]
fn test_length() {
    assert_eq!(LabelError::Empty, label_err(b""));
    DnsLabel::decode(b"a").unwrap();
    DnsLabel::decode(&[b'a'; 63]).unwrap();
    assert_eq!(LabelError::TooLong { len: 64 }, label_err(&[b'a'; 64]));
}

#[cfg(test)]
#[test]
fn test_hyphens() {
    assert_eq!(LabelError::LeadingHyphen, label_err(b"-"));
    assert_eq!(LabelError::LeadingHyphen, label_err(b"-a"));
    assert_eq!(LabelError::TrailingHyphen, label_err(b"a-"));
    DnsLabel::decode(b"a-b").unwrap();
    DnsLabel::decode(b"a-b-c").unwrap();
    // Positions 3 and 4 are both hyphens and the prefix is not "xn".
    assert_eq!(LabelError::ReservedHyphens, label_err(b"a---b"));
    DnsLabel::decode(b"1a").unwrap();
    DnsLabel::decode(b"a-0").unwrap();
    DnsLabel::decode(b"ab-cd").unwrap();
    DnsLabel::decode(b"abc--d").unwrap();
}

#[cfg(test)]
#[test]
fn test_ace_prefix() {
    DnsLabel::decode(b"xn--abc").unwrap();
    DnsLabel::decode(b"xn--bcher-kva").unwrap();
    assert_eq!(LabelError::ReservedHyphens, label_err(b"ab--cd"));
    // The prefix check is case-sensitive.
    assert_eq!(LabelError::ReservedHyphens, label_err(b"XN--abc"));
    assert_eq!(LabelError::ReservedHyphens, label_err(b"xN--abc"));
}

#[cfg(test)]
#[test]
fn test_encode() {
    assert_eq!(
        vec![7, b'e', b'x', b'a', b'm', b'p', b'l', b'e'],
        DnsLabel::new("example").unwrap().encode().unwrap()
    );
    // Out-of-band construction is still caught before emission.
    DnsLabel("bad_label".to_string()).encode().unwrap_err();
    DnsLabel(String::new()).encode().unwrap_err();
}

#[cfg(test)]
#[test]
fn test_round_trip() {
    for value in ["a", "Example", "xn--abc", "a1-b2", "0", "z".repeat(63).as_str()] {
        let label = DnsLabel::new(value).unwrap();
        let encoded = label.encode().unwrap();
        assert_eq!(value.len(), encoded[0] as usize);
        assert_eq!(label, DnsLabel::decode(&encoded[1..]).unwrap());
        assert_eq!(value, label.to_string());
    }
}

#[cfg(test)]
#[test]
fn test_write() {
    let mut out: FixedBuf<8> = FixedBuf::new();
    DnsLabel::new("abc").unwrap().write(&mut out).unwrap();
    assert_eq!([3, b'a', b'b', b'c'], out.readable());
    assert_eq!(
        Err(DnsError::ResponseBufferFull),
        DnsLabel::new("defgh").unwrap().write(&mut out)
    );
}
