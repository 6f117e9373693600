//! Decoder for the DNS message wire format of
//! [RFC 1035](https://datatracker.ietf.org/doc/html/rfc1035#section-4), including name
//! compression.
//!
//! ```
//! use dnswire::{DnsMessage, DnsType};
//!
//! let packet = [
//!     0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // header
//!     7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0, // example.com
//!     0x00, 0x01, 0x00, 0x01, // A IN
//! ];
//! let message = DnsMessage::decode(&packet).unwrap();
//! assert_eq!("example.com", message.questions[0].name.to_string());
//! assert_eq!(DnsType::A, message.questions[0].typ);
//! ```
//!
//! Decoding is all-or-nothing.  Names are never compressed when encoding, and whole messages are
//! not encoded at all; see [`DnsMessage::encode`].
#![forbid(unsafe_code)]

mod dns_class;
mod dns_cursor;
mod dns_error;
mod dns_label;
mod dns_message;
mod dns_message_header;
mod dns_name;
mod dns_op_code;
mod dns_question;
mod dns_record;
mod dns_record_data;
mod dns_response_code;
mod dns_type;

pub use dns_class::DnsClass;
pub use dns_cursor::DnsCursor;
pub use dns_error::{DnsError, LabelError};
pub use dns_label::DnsLabel;
pub use dns_message::DnsMessage;
pub use dns_message_header::DnsMessageHeader;
pub use dns_name::DnsName;
pub use dns_op_code::DnsOpCode;
pub use dns_question::DnsQuestion;
pub use dns_record::DnsRecord;
pub use dns_record_data::DnsRecordData;
pub use dns_response_code::DnsResponseCode;
pub use dns_type::DnsType;

use fixed_buffer::FixedBuf;

/// > labels: 63 octets or less
///
/// <https://datatracker.ietf.org/doc/html/rfc1035#section-2.3.4>
pub const MAX_LABEL_LEN: usize = 63;

/// > names: 255 octets or less
///
/// <https://datatracker.ietf.org/doc/html/rfc1035#section-2.3.4>
pub const MAX_NAME_LEN: usize = 255;

/// > UDP messages: 512 octets or less
///
/// <https://datatracker.ietf.org/doc/html/rfc1035#section-2.3.4>
pub const MAX_UDP_MESSAGE_LEN: usize = 512;

pub const HEADER_LEN: usize = 12;

/// High bits of a length byte that mark a compression pointer.
pub const POINTER_MASK: u8 = 0xC0;

/// Bits of a two-byte pointer that hold the offset.
pub const POINTER_OFFSET_MASK: u16 = 0x3FFF;

fn write_bytes<const N: usize>(out: &mut FixedBuf<N>, bytes: &[u8]) -> Result<(), DnsError> {
    out.write_bytes(bytes)
        .map_err(|_| DnsError::ResponseBufferFull)?;
    Ok(())
}

fn write_u16_be<const N: usize>(out: &mut FixedBuf<N>, value: u16) -> Result<(), DnsError> {
    write_bytes(out, &value.to_be_bytes())
}

fn write_u32_be<const N: usize>(out: &mut FixedBuf<N>, value: u32) -> Result<(), DnsError> {
    write_bytes(out, &value.to_be_bytes())
}
