use kindling_protocol::{
    AttributeValue, PayloadMessage, dns,
    labels::{self, ErrorType},
};

fn header(id: u16, flags: u16, qd: u16, an: u16) -> Vec<u8> {
    let mut out = Vec::new();
    for field in [id, flags, qd, an, 0, 0] {
        out.extend_from_slice(&field.to_be_bytes());
    }
    out
}

fn question(out: &mut Vec<u8>, name: &str) {
    for label in name.split('.') {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    // qtype A, qclass IN
    out.extend_from_slice(&[0, 1, 0, 1]);
}

fn answer(out: &mut Vec<u8>, answer_type: u16, rdata: &[u8]) {
    // Pointer to the first question name.
    out.extend_from_slice(&[0xc0, 0x0c]);
    out.extend_from_slice(&answer_type.to_be_bytes());
    out.extend_from_slice(&[0, 1, 0, 0, 0, 0x3c]);
    out.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
    out.extend_from_slice(rdata);
}

fn str_attr(message: &PayloadMessage<'_>, key: &str) -> Option<String> {
    match message.attribute(key)? {
        AttributeValue::Str(s) => Some(s.clone()),
        other => panic!("{key} is not a string: {other:?}"),
    }
}

#[test]
fn parses_a_records() {
    let mut data = header(0x1234, 0x8180, 1, 3);
    question(&mut data, "www.example.com");
    answer(&mut data, dns::TYPE_A, &[93, 184, 216, 34]);
    answer(&mut data, dns::TYPE_AAAA, &[0; 16]);
    answer(&mut data, dns::TYPE_A, &[93, 184, 216, 35]);

    let mut message = PayloadMessage::new(&data);
    assert!(!dns::fast_fail(&message));
    assert!(dns::parse_response(&mut message));

    assert_eq!(
        str_attr(&message, labels::DNS_DOMAIN).as_deref(),
        Some("www.example.com")
    );
    assert_eq!(
        str_attr(&message, labels::DNS_IP).as_deref(),
        Some("93.184.216.34,93.184.216.35")
    );
    assert_eq!(
        message.attribute(labels::DNS_ID),
        Some(&AttributeValue::Int(0x1234))
    );
    assert_eq!(
        message.attribute(labels::DNS_RCODE),
        Some(&AttributeValue::Int(0))
    );
    assert_eq!(message.attribute(labels::IS_ERROR), None);
    assert_eq!(message.offset, data.len());
}

#[test]
fn error_rcode_marks_protocol_error() {
    // NXDOMAIN
    let mut data = header(7, 0x8183, 1, 0);
    question(&mut data, "missing.example.com");

    let mut message = PayloadMessage::new(&data);
    assert!(dns::parse_response(&mut message));
    assert_eq!(message.attribute(labels::DNS_IP), None);
    assert_eq!(
        message.attribute(labels::DNS_RCODE),
        Some(&AttributeValue::Int(3))
    );
    assert_eq!(
        message.attribute(labels::IS_ERROR),
        Some(&AttributeValue::Bool(true))
    );
    assert_eq!(
        message.attribute(labels::ERROR_TYPE),
        Some(&AttributeValue::Int(ErrorType::Protocol as i64))
    );
}

#[test]
fn rejects_queries_and_bad_headers() {
    let cases = [
        // QR = 0
        (0x0100, 1, 0),
        // opcode 3
        (0x9800, 1, 0),
        // rcode 6
        (0x8186, 1, 0),
        // no questions
        (0x8180, 0, 1),
        // too many records
        (0x8180, 1, 25),
    ];
    for (flags, qd, an) in cases {
        let mut data = header(1, flags, qd, an);
        question(&mut data, "example.com");
        let mut message = PayloadMessage::new(&data);
        assert!(!dns::parse_response(&mut message), "flags {flags:#x}");
        assert!(message.attributes().is_empty());
    }
}

#[test]
fn truncated_answers_keep_what_was_read() {
    let mut data = header(9, 0x8180, 1, 2);
    question(&mut data, "example.com");
    answer(&mut data, dns::TYPE_A, &[10, 0, 0, 1]);
    answer(&mut data, dns::TYPE_A, &[10, 0, 0, 2]);
    data.truncate(data.len() - 3);

    let mut message = PayloadMessage::new(&data);
    assert!(dns::parse_response(&mut message));
    assert_eq!(str_attr(&message, labels::DNS_IP).as_deref(), Some("10.0.0.1"));
}

#[test]
fn truncated_question_is_rejected() {
    let mut data = header(9, 0x8180, 1, 0);
    question(&mut data, "example.com");
    data.truncate(data.len() - 2);

    let mut message = PayloadMessage::new(&data);
    assert!(!dns::parse_response(&mut message));
}

#[test]
fn fast_fail_on_size() {
    assert!(dns::fast_fail(&PayloadMessage::new(&[0; dns::HEADER_SIZE])));
    assert!(!dns::fast_fail(&PayloadMessage::new(&[0; dns::HEADER_SIZE + 1])));
    assert!(!dns::fast_fail(&PayloadMessage::new(&[0; dns::MAX_MESSAGE_SIZE])));
    assert!(dns::fast_fail(&PayloadMessage::new(&[0; dns::MAX_MESSAGE_SIZE + 1])));
}
