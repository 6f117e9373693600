use crate::{DnsCursor, DnsError, DnsMessageHeader, DnsQuestion, DnsRecord};
use fixed_buffer::FixedBuf;
use tracing::debug;

/// > All communications inside of the domain protocol are carried in a single format called a
/// > message.  The top level format of message is divided into 5 sections (some of which are
/// > empty in certain cases) shown below:
/// >
/// > ```text
/// >     +---------------------+
/// >     |        Header       |
/// >     +---------------------+
/// >     |       Question      | the question for the name server
/// >     +---------------------+
/// >     |        Answer       | RRs answering the question
/// >     +---------------------+
/// >     |      Authority      | RRs pointing toward an authority
/// >     +---------------------+
/// >     |      Additional     | RRs holding additional information
/// >     +---------------------+
/// > ```
///
/// <https://datatracker.ietf.org/doc/html/rfc1035#section-4.1>
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct DnsMessage {
    pub header: DnsMessageHeader,
    pub questions: Vec<DnsQuestion>,
    pub answers: Vec<DnsRecord>,
    pub authorities: Vec<DnsRecord>,
    pub additionals: Vec<DnsRecord>,
}
// Root owner, type, class, ttl and rdlength.
const MIN_RECORD_LEN: usize = 11;
// Root name, type and class.
const MIN_QUESTION_LEN: usize = 5;

impl DnsMessage {
    fn read_records(cursor: &mut DnsCursor<'_>, count: u16) -> Result<Vec<DnsRecord>, DnsError> {
        // The count comes off the wire; size the Vec by what the packet could actually hold.
        let mut records =
            Vec::with_capacity(usize::from(count).min(cursor.remaining() / MIN_RECORD_LEN));
        for _ in 0..count {
            records.push(DnsRecord::read(cursor)?);
        }
        Ok(records)
    }

    /// Reads a whole message starting at the cursor.  Each section is read in order with the
    /// count from the header.  The first error ends the read and nothing decoded so far is
    /// returned.  Bytes after the last record are left unread.
    ///
    /// # Errors
    /// Returns an error when the packet does not contain a valid message.
    pub fn read(cursor: &mut DnsCursor<'_>) -> Result<Self, DnsError> {
        let header = DnsMessageHeader::read(cursor)?;
        let mut questions = Vec::with_capacity(
            usize::from(header.question_count).min(cursor.remaining() / MIN_QUESTION_LEN),
        );
        for _ in 0..header.question_count {
            questions.push(DnsQuestion::read(cursor)?);
        }
        let answers = Self::read_records(cursor, header.answer_count)?;
        let authorities = Self::read_records(cursor, header.name_server_count)?;
        let additionals = Self::read_records(cursor, header.additional_count)?;
        Ok(Self {
            header,
            questions,
            answers,
            authorities,
            additionals,
        })
    }

    /// Decodes the message held in `packet`.  The packet must start at the message ID; a TCP
    /// length prefix must already be removed.
    ///
    /// # Errors
    /// Returns an error when `packet` does not contain a valid message.
    pub fn decode(packet: &[u8]) -> Result<Self, DnsError> {
        let mut cursor = DnsCursor::new(packet);
        Self::read(&mut cursor).map_err(|e| {
            debug!(
                error = %e,
                offset = cursor.offset(),
                len = packet.len(),
                "malformed message"
            );
            e
        })
    }

    /// Decodes the readable bytes of `buf` and consumes them.  On error `buf` is left as it was.
    ///
    /// # Errors
    /// Returns an error when `buf` does not contain a valid message.
    pub fn read_fixed<const N: usize>(buf: &mut FixedBuf<N>) -> Result<Self, DnsError> {
        let message = Self::decode(buf.readable())?;
        buf.read_bytes(buf.len());
        Ok(message)
    }

    /// Encoding whole messages is not supported.  Build outgoing messages from
    /// [`DnsMessageHeader::write`], [`DnsQuestion::write`] and [`DnsRecord::write`], which never
    /// compress names.
    ///
    /// # Errors
    /// Always returns [`DnsError::NotImplemented`].
    pub fn encode(&self) -> Result<Vec<u8>, DnsError> {
        Err(DnsError::NotImplemented("message encoding"))
    }
}

#[cfg(test)]
#[test]
fn test_encode_not_implemented() {
    let packet = [0x00, 0x01, 0x01, 0x00, 0, 0, 0, 0, 0, 0, 0, 0];
    let message = DnsMessage::decode(&packet).unwrap();
    assert_eq!(
        Err(DnsError::NotImplemented("message encoding")),
        message.encode()
    );
}

#[cfg(test)]
#[test]
fn test_read_fixed() {
    let mut buf: FixedBuf<512> = FixedBuf::new();
    buf.write_bytes(&[0x12, 0x34, 0x81, 0x80, 0, 0, 0, 0, 0, 0, 0, 0])
        .unwrap();
    let message = DnsMessage::read_fixed(&mut buf).unwrap();
    assert_eq!(0x1234, message.header.id);
    assert!(message.header.is_response);
    assert!(buf.is_empty());

    buf.write_bytes(&[0x12, 0x34, 0x81]).unwrap();
    DnsMessage::read_fixed(&mut buf).unwrap_err();
    assert_eq!(3, buf.len());
}

#[cfg(test)]
#[test]
fn test_counts_exceed_packet() {
    // qdcount=1 with no question bytes
    let packet = [0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0, 0, 0, 0, 0, 0];
    assert_eq!(
        Err(DnsError::BufferUnderrun {
            offset: 12,
            needed: 1,
            available: 12
        }),
        DnsMessage::decode(&packet)
    );
}
