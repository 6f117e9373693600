use dnswire::{
    DnsClass, DnsError, DnsLabel, DnsMessage, DnsMessageHeader, DnsName, DnsOpCode, DnsQuestion,
    DnsRecord, DnsRecordData, DnsResponseCode, DnsType, MAX_UDP_MESSAGE_LEN,
};
use fixed_buffer::FixedBuf;
use std::net::Ipv4Addr;

fn labels(name: &DnsName) -> Vec<&str> {
    name.labels().iter().map(DnsLabel::as_str).collect()
}

#[rustfmt::skip]
const QUERY: [u8; 29] = [
    // ID=1
    0x00, 0x01,
    // flags=0x0100, recursion_desired
    0x01, 0x00,
    // question_count=1
    0x00, 0x01,
    // answer_count=0
    0x00, 0x00,
    // name_server_count=0
    0x00, 0x00,
    // additional_count=0
    0x00, 0x00,
    // question 0
    // name=example.com
    0x07, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0x03, b'c', b'o', b'm', 0x00,
    // type=1 A
    0x00, 0x01,
    // class=1 IN
    0x00, 0x01,
];

/// Names are compressed wherever a pointer fits.  The nameserver's name is written out in the
/// authority section's record data and the additional record's owner points into it.
#[rustfmt::skip]
const RESPONSE: [u8; 119] = [
    // ID
    0xBE, 0xEF,
    // is_response=1, opcode=QUERY, authoritative=0, truncated=0, recursion_desired=1
    0x81,
    // recursion_available=1, response_code=NOERROR
    0x80,
    // question_count=1
    0x00, 0x01,
    // answer_count=2
    0x00, 0x02,
    // name_server_count=1
    0x00, 0x01,
    // additional_count=2
    0x00, 0x02,
    // offset 12, question 0
    // name=example.com
    0x07, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0x03, b'c', b'o', b'm', 0x00,
    // type=1 A
    0x00, 0x01,
    // class=1 IN
    0x00, 0x01,
    // offset 29, answer 0
    // name=pointer to 12
    0xC0, 0x0C,
    // type=1 A
    0x00, 0x01,
    // class=1 IN
    0x00, 0x01,
    // ttl_seconds=300
    0x00, 0x00, 0x01, 0x2C,
    // rdlength=4
    0x00, 0x04,
    // ipv4_addr=93.184.216.34
    93, 184, 216, 34,
    // offset 45, answer 1
    // name=www + pointer to 12
    0x03, b'w', b'w', b'w', 0xC0, 0x0C,
    // type=5 CNAME
    0x00, 0x05,
    // class=1 IN
    0x00, 0x01,
    // ttl_seconds=60
    0x00, 0x00, 0x00, 0x3C,
    // rdlength=2
    0x00, 0x02,
    // target=pointer to 12
    0xC0, 0x0C,
    // offset 63, authority 0
    // name=pointer to 12
    0xC0, 0x0C,
    // type=2 NS
    0x00, 0x02,
    // class=1 IN
    0x00, 0x01,
    // ttl_seconds=3600
    0x00, 0x00, 0x0E, 0x10,
    // rdlength=17
    0x00, 0x11,
    // offset 75, nsdname=ns1.example.com
    0x03, b'n', b's', b'1', 0x07, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0x03, b'c', b'o', b'm',
    0x00,
    // offset 92, additional 0
    // name=pointer to 75
    0xC0, 0x4B,
    // type=1 A
    0x00, 0x01,
    // class=1 IN
    0x00, 0x01,
    // ttl_seconds=3600
    0x00, 0x00, 0x0E, 0x10,
    // rdlength=4
    0x00, 0x04,
    // ipv4_addr=192.0.2.53
    192, 0, 2, 53,
    // offset 108, additional 1
    // name=root
    0x00,
    // type=41 OPT
    0x00, 0x29,
    // class=udp payload size 1232
    0x04, 0xD0,
    // extended rcode, version, flags
    0x00, 0x00, 0x00, 0x00,
    // rdlength=0
    0x00, 0x00,
];

#[test]
fn test_query() {
    let message = DnsMessage::decode(&QUERY).unwrap();
    assert_eq!(
        DnsMessageHeader {
            id: 1,
            is_response: false,
            op_code: DnsOpCode::Query,
            authoritative_answer: false,
            truncated: false,
            recursion_desired: true,
            recursion_available: false,
            reserved: 0,
            response_code: DnsResponseCode::NoError,
            question_count: 1,
            answer_count: 0,
            name_server_count: 0,
            additional_count: 0,
        },
        message.header
    );
    assert_eq!(1, message.questions.len());
    assert_eq!(vec!["example", "com"], labels(&message.questions[0].name));
    assert_eq!(DnsType::A, message.questions[0].typ);
    assert_eq!(DnsClass::Internet, message.questions[0].class);
    assert!(message.answers.is_empty());
    assert!(message.authorities.is_empty());
    assert!(message.additionals.is_empty());
}

#[test]
fn test_response() {
    let message = DnsMessage::decode(&RESPONSE).unwrap();
    assert!(message.header.is_response);
    assert!(message.header.recursion_available);
    let example_com = DnsName::new("example.com").unwrap();
    let ns1 = DnsName::new("ns1.example.com").unwrap();
    assert_eq!(
        vec![
            DnsRecord::new_a("example.com", 300, Ipv4Addr::new(93, 184, 216, 34)).unwrap(),
            DnsRecord::new_cname("www.example.com", 60, "example.com").unwrap(),
        ],
        message.answers
    );
    assert_eq!(
        vec![DnsRecord::new(example_com, 3600, DnsRecordData::NS(ns1.clone()))],
        message.authorities
    );
    assert_eq!(2, message.additionals.len());
    assert_eq!(ns1, message.additionals[0].name);
    assert_eq!(
        DnsRecordData::A(Ipv4Addr::new(192, 0, 2, 53)),
        message.additionals[0].data
    );
    let opt = &message.additionals[1];
    assert!(opt.name.is_root());
    assert_eq!(DnsType::OPT, opt.typ());
    assert_eq!(1232, opt.class.num());
}

#[test]
fn test_all_or_nothing() {
    // Every proper prefix is missing something the header promised.
    for len in 0..RESPONSE.len() {
        DnsMessage::decode(&RESPONSE[..len]).unwrap_err();
    }
    assert_eq!(
        Err(DnsError::BufferUnderrun {
            offset: 117,
            needed: 2,
            available: 118
        }),
        DnsMessage::decode(&RESPONSE[..118])
    );
}

#[test]
fn test_bad_additional_fails_message() {
    let mut packet = RESPONSE;
    // additional 0 rdlength=3
    packet[103] = 0x03;
    assert_eq!(
        Err(DnsError::InvalidRdata {
            typ: 1,
            expected: 3,
            actual: 4
        }),
        DnsMessage::decode(&packet)
    );
}

#[test]
fn test_invalid_label_in_answer() {
    let mut packet = RESPONSE;
    // answer 1 name=w_w
    packet[47] = b'_';
    assert_eq!(
        Err(DnsError::InvalidLabel(dnswire::LabelError::InvalidByte {
            position: 1,
            byte: b'_'
        })),
        DnsMessage::decode(&packet)
    );
}

#[test]
fn test_trailing_bytes_ignored() {
    let mut packet = QUERY.to_vec();
    packet.extend_from_slice(&[0xDE, 0xAD]);
    assert_eq!(
        DnsMessage::decode(&QUERY).unwrap(),
        DnsMessage::decode(&packet).unwrap()
    );
}

#[test]
fn test_mutations_never_panic() {
    for n in 0..RESPONSE.len() {
        for b in [0x00, 0x01, 0x3F, 0x40, 0xC0, 0xFF] {
            let mut packet = RESPONSE;
            packet[n] = b;
            let _ = DnsMessage::decode(&packet);
        }
    }
}

#[test]
fn test_huge_counts() {
    // Header claims 65535 of everything and nothing follows.
    let packet = [0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
    assert_eq!(
        Err(DnsError::BufferUnderrun {
            offset: 12,
            needed: 1,
            available: 12
        }),
        DnsMessage::decode(&packet)
    );
}

#[test]
fn test_build_query_from_sections() {
    let header = DnsMessageHeader {
        id: 1,
        is_response: false,
        op_code: DnsOpCode::Query,
        authoritative_answer: false,
        truncated: false,
        recursion_desired: true,
        recursion_available: false,
        reserved: 0,
        response_code: DnsResponseCode::NoError,
        question_count: 1,
        answer_count: 0,
        name_server_count: 0,
        additional_count: 0,
    };
    let mut out: FixedBuf<MAX_UDP_MESSAGE_LEN> = FixedBuf::new();
    header.write(&mut out).unwrap();
    DnsQuestion::new("example.com", DnsType::A)
        .unwrap()
        .write(&mut out)
        .unwrap();
    assert_eq!(QUERY, out.readable());
    let message = DnsMessage::read_fixed(&mut out).unwrap();
    assert_eq!(header, message.header);
    assert_eq!(
        Err(DnsError::NotImplemented("message encoding")),
        message.encode()
    );
}

#[test]
fn test_response_sections_reencode_uncompressed() {
    let message = DnsMessage::decode(&RESPONSE).unwrap();
    let mut out: FixedBuf<MAX_UDP_MESSAGE_LEN> = FixedBuf::new();
    message.header.write(&mut out).unwrap();
    for question in &message.questions {
        question.write(&mut out).unwrap();
    }
    for record in message
        .answers
        .iter()
        .chain(message.authorities.iter())
        .chain(message.additionals.iter())
    {
        record.write(&mut out).unwrap();
    }
    // Longer, because every pointer was expanded, but decodes to the same message.
    assert!(out.len() > RESPONSE.len());
    assert_eq!(message, DnsMessage::decode(out.readable()).unwrap());
}

#[test]
fn test_parallel_decodes() {
    let expected = DnsMessage::decode(&RESPONSE).unwrap();
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| DnsMessage::decode(&RESPONSE).unwrap()))
        .collect();
    for handle in handles {
        assert_eq!(expected, handle.join().unwrap());
    }
}
