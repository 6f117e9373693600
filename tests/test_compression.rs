use dnswire::{DnsCursor, DnsError, DnsMessage, DnsName, DnsRecord, DnsRecordData};

fn padded(prefix_len: usize, parts: &[&[u8]]) -> Vec<u8> {
    let mut packet = vec![0xAA_u8; prefix_len];
    for part in parts {
        packet.extend_from_slice(part);
    }
    packet
}

const EXAMPLE_COM: [u8; 13] = [
    7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0,
];

#[test]
fn test_pointer_to_earlier_name() {
    // offset 10: example.com, offset 23..30: filler, offset 30: pointer to 10
    let packet = padded(10, &[&EXAMPLE_COM, &[0xAA; 7], &[0xC0, 0x0A]]);
    assert_eq!(32, packet.len());
    let mut cursor = DnsCursor::new(&packet);
    cursor.advance(30).unwrap();
    let (name, consumed) = DnsName::decode_compressed(&cursor).unwrap();
    assert_eq!(2, consumed);
    assert_eq!(30, cursor.offset());
    let mut original = DnsCursor::new(&packet);
    original.advance(10).unwrap();
    assert_eq!(
        (name.clone(), 13),
        DnsName::decode_compressed(&original).unwrap()
    );
    assert_eq!("example.com", name.to_string());
    assert_eq!(DnsName::read(&mut cursor).unwrap(), name);
    assert!(cursor.is_empty());
}

#[test]
fn test_pointer_after_labels() {
    // offset 0: example.com, offset 13: www + pointer to 0, offset 19: trailing byte
    let packet = padded(0, &[&EXAMPLE_COM, &[3, b'w', b'w', b'w', 0xC0, 0x00, 0xFF]]);
    let mut cursor = DnsCursor::new(&packet);
    cursor.advance(13).unwrap();
    assert_eq!(
        DnsName::new("www.example.com").unwrap(),
        DnsName::read(&mut cursor).unwrap()
    );
    assert_eq!(19, cursor.offset());
}

#[test]
fn test_standalone_decode_rejects_pointers() {
    // Without the packet a pointer byte is just an oversized length.
    assert_eq!(
        Err(DnsError::LabelOverrun {
            offset: 0,
            length: 0xC0,
            buffer_len: 2
        }),
        DnsName::decode(&[0xC0, 0x0A])
    );
}

#[test]
fn test_second_pointer_is_refused() {
    // offset 0: pointer to 2, offset 2: pointer to 4, offset 4: example.com
    let packet = padded(0, &[&[0xC0, 0x02, 0xC0, 0x04], &EXAMPLE_COM]);
    assert_eq!(
        Err(DnsError::RecursivePointer { offset: 2 }),
        DnsName::decode_compressed(&DnsCursor::new(&packet))
    );
}

#[test]
fn test_pointer_loop_in_question() {
    #[rustfmt::skip]
    let packet = [
        // ID=7, flags=0, question_count=1, other counts=0
        0x00, 0x07, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        // offset 12, name=pointer to 14
        0xC0, 0x0E,
        // offset 14, pointer to 12
        0xC0, 0x0C,
        // type=1 A, class=1 IN
        0x00, 0x01, 0x00, 0x01,
    ];
    assert_eq!(
        Err(DnsError::RecursivePointer { offset: 14 }),
        DnsMessage::decode(&packet)
    );
}

#[test]
fn test_pointer_to_itself() {
    let packet = padded(12, &[&[0xC0, 0x0C]]);
    let mut cursor = DnsCursor::new(&packet);
    cursor.advance(12).unwrap();
    assert_eq!(
        Err(DnsError::RecursivePointer { offset: 12 }),
        DnsName::decode_compressed(&cursor)
    );
}

#[test]
fn test_pointer_past_end() {
    let packet = padded(12, &[&[0xC0, 0xFF]]);
    let mut cursor = DnsCursor::new(&packet);
    cursor.advance(12).unwrap();
    assert_eq!(
        Err(DnsError::BufferUnderrun {
            offset: 0xFF,
            needed: 1,
            available: 14
        }),
        DnsName::decode_compressed(&cursor)
    );
    // Second byte of the pointer missing.
    let packet = padded(12, &[&[0xC0]]);
    let mut cursor = DnsCursor::new(&packet);
    cursor.advance(12).unwrap();
    assert_eq!(
        Err(DnsError::BufferUnderrun {
            offset: 12,
            needed: 2,
            available: 13
        }),
        DnsName::decode_compressed(&cursor)
    );
}

#[test]
fn test_name_too_long_across_pointer() {
    let label63 = {
        let mut label = vec![63_u8];
        label.extend_from_slice(&[b'a'; 63]);
        label
    };
    // offset 0: four 63-byte labels, offset 256: terminator, offset 257: abcd + pointer to 0
    let packet = padded(
        0,
        &[
            label63.as_slice(),
            label63.as_slice(),
            label63.as_slice(),
            label63.as_slice(),
            &[0],
            &[4, b'a', b'b', b'c', b'd', 0xC0, 0x00],
        ],
    );
    let mut cursor = DnsCursor::new(&packet);
    cursor.advance(257).unwrap();
    assert_eq!(
        Err(DnsError::NameTooLong { size: 256 }),
        DnsName::decode_compressed(&cursor)
    );
    // Without the extra label the name fits.
    let (name, consumed) = DnsName::decode_compressed(&DnsCursor::new(&packet)).unwrap();
    assert_eq!(4, name.labels().len());
    assert_eq!(257, consumed);
}

#[test]
fn test_pointer_inside_rdata_reaches_question() {
    #[rustfmt::skip]
    let packet = [
        // ID=9, flags=0x8180, question_count=1, answer_count=1
        0x00, 0x09, 0x81, 0x80, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
        // offset 12, question name=example.com
        7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0,
        // type=15 MX, class=1 IN
        0x00, 0x0F, 0x00, 0x01,
        // offset 29, answer name=pointer to 12, type=15 MX, class=1 IN
        0xC0, 0x0C, 0x00, 0x0F, 0x00, 0x01,
        // ttl_seconds=60, rdlength=9
        0x00, 0x00, 0x00, 0x3C, 0x00, 0x09,
        // preference=10, exchange=mail + pointer to 12
        0x00, 0x0A, 4, b'm', b'a', b'i', b'l', 0xC0, 0x0C,
    ];
    let message = DnsMessage::decode(&packet).unwrap();
    assert_eq!(
        vec![DnsRecord::new(
            DnsName::new("example.com").unwrap(),
            60,
            DnsRecordData::MX {
                preference: 10,
                exchange: DnsName::new("mail.example.com").unwrap()
            }
        )],
        message.answers
    );
}
