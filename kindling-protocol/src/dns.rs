//! DNS response analyzer.
//!
//! ```text
//!   0  1  2  3  4  5  6  7  8  9  A  B  C  D  E  F
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                      ID                       |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                    QDCOUNT                    |
//! |                    ANCOUNT                    |
//! |                    NSCOUNT                    |
//! |                    ARCOUNT                    |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! ```
use crate::{
    PayloadMessage,
    labels::{self, ErrorType},
};
use std::net::Ipv4Addr;
use tracing::trace;

pub const HEADER_SIZE: usize = 12;
pub const MAX_MESSAGE_SIZE: usize = 512;
pub const MAX_NUM_RR: u32 = 25;

pub const TYPE_A: u16 = 1;
pub const TYPE_AAAA: u16 = 28;

/// Upper bound on compression pointers followed while reading one name.
const MAX_POINTER_JUMPS: usize = 16;
const MAX_NAME_LEN: usize = 255;

/// Payloads that cannot be a DNS response over UDP.
pub fn fast_fail(message: &PayloadMessage<'_>) -> bool {
    message.len() <= HEADER_SIZE || message.len() > MAX_MESSAGE_SIZE
}

/// Parses a DNS response starting at `message.offset`.
///
/// Returns `false` if the payload is not an acceptable response: a query
/// (QR = 0), an opcode above STATUS (2), a reserved rcode (above 5), no
/// questions, more than [`MAX_NUM_RR`] records, or an unreadable question
/// section. On success the domain, the IPv4 answers, the id and the rcode
/// are recorded, and a non-zero rcode marks the message as a protocol error.
pub fn parse_response(message: &mut PayloadMessage<'_>) -> bool {
    let offset = message.offset;
    let Some([id, flags, questions, answers, authorities, additionals]) =
        read_header(message, offset)
    else {
        return false;
    };

    let qr = (flags >> 15) & 0x1;
    let opcode = (flags >> 11) & 0xf;
    let rcode = flags & 0xf;
    let records =
        u32::from(questions) + u32::from(answers) + u32::from(authorities) + u32::from(additionals);

    if qr == 0 || opcode > 2 || rcode > 5 || questions == 0 || records > MAX_NUM_RR {
        trace!(qr, opcode, rcode, questions, records, "not a dns response");
        return false;
    }

    message.offset = offset + HEADER_SIZE;
    let Some(domain) = read_questions(message, questions) else {
        trace!("unreadable dns question section");
        return false;
    };
    let ips = read_ipv4_answers(message, answers);

    message.add_str_attribute(labels::DNS_DOMAIN, domain);
    if !ips.is_empty() {
        message.add_str_attribute(labels::DNS_IP, ips);
    }
    message.add_int_attribute(labels::DNS_ID, i64::from(id));
    message.add_int_attribute(labels::DNS_RCODE, i64::from(rcode));
    if rcode > 0 {
        message.add_bool_attribute(labels::IS_ERROR, true);
        message.add_int_attribute(labels::ERROR_TYPE, ErrorType::Protocol as i64);
    }
    true
}

fn read_header(message: &PayloadMessage<'_>, offset: usize) -> Option<[u16; 6]> {
    let mut fields = [0; 6];
    for (i, field) in fields.iter_mut().enumerate() {
        *field = message.read_u16(offset + 2 * i)?;
    }
    Some(fields)
}

/// Reads the question section and returns the queried names joined by `,`.
fn read_questions(message: &mut PayloadMessage<'_>, count: u16) -> Option<String> {
    let mut names: Vec<String> = Vec::with_capacity(usize::from(count));
    let mut offset = message.offset;
    for _ in 0..count {
        let (name, next) = read_name(message, offset)?;
        // qtype + qclass
        message.read_bytes(next, 4)?;
        offset = next + 4;
        if !names.contains(&name) {
            names.push(name);
        }
    }
    message.offset = offset;
    Some(names.join(","))
}

/// Reads a possibly compressed domain name at `offset`. Returns the name and
/// the offset right after it in the original position.
fn read_name(message: &PayloadMessage<'_>, mut offset: usize) -> Option<(String, usize)> {
    let mut name = String::new();
    let mut end = None;
    let mut jumps = 0;
    loop {
        let len = message.read_u8(offset)?;
        match len & 0xc0 {
            0x00 if len == 0 => {
                if end.is_none() {
                    end = Some(offset + 1);
                }
                break;
            }
            0x00 => {
                let label = message.read_bytes(offset + 1, usize::from(len))?;
                if !name.is_empty() {
                    name.push('.');
                }
                name.push_str(&String::from_utf8_lossy(label));
                if name.len() > MAX_NAME_LEN {
                    return None;
                }
                offset += 1 + usize::from(len);
            }
            0xc0 => {
                let pointer = usize::from(message.read_u16(offset)? & 0x3fff);
                if end.is_none() {
                    end = Some(offset + 2);
                }
                jumps += 1;
                if jumps > MAX_POINTER_JUMPS {
                    return None;
                }
                offset = pointer;
            }
            _ => return None,
        }
    }
    Some((name, end?))
}

/// Collects IPv4 addresses from A records. Each answer is assumed to start
/// with a two byte compressed name. A truncated answer ends collection.
fn read_ipv4_answers(message: &mut PayloadMessage<'_>, count: u16) -> String {
    let mut ips = Vec::new();
    let mut offset = message.offset;
    for _ in 0..count {
        // name
        offset += 2;
        let Some(answer_type) = message.read_u16(offset) else {
            break;
        };
        // type, class, ttl
        offset += 8;
        let Some(length) = message.read_u16(offset) else {
            break;
        };
        offset += 2;
        let length = usize::from(length);
        if answer_type == TYPE_A {
            let Some(rdata) = message.read_bytes(offset, length) else {
                break;
            };
            if let Ok(octets) = <[u8; 4]>::try_from(rdata) {
                ips.push(Ipv4Addr::from(octets).to_string());
            }
        }
        offset += length;
    }
    message.offset = offset;
    ips.join(",")
}
