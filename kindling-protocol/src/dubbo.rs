//! String readers for the serializations carried in Dubbo bodies.
//!
//! All offsets are byte positions in the body. A read that runs off the end
//! returns the body length as the next offset.

pub const SERIAL_HESSIAN2: u8 = 0x02;
pub const SERIAL_FASTJSON: u8 = 0x06;

const JSON_NEXT_LINE: u8 = b'\n';
const JSON_QUOTES: u8 = b'"';
const JSON_COLON: u8 = b':';

pub trait DubboSerializer: Sync {
    /// Skips the string at `offset` and returns the offset after it.
    fn eat_string(&self, data: &[u8], offset: usize) -> usize;

    /// Reads the string at `offset`, returning the offset after it and its
    /// value.
    fn string_value(&self, data: &[u8], offset: usize) -> (usize, String);

    /// Finds `key` at or after `from` and returns the string that follows
    /// it, or an empty string.
    fn string_value_by_key(&self, data: &[u8], from: usize, key: &str) -> String;
}

static HESSIAN2: Hessian2 = Hessian2;
static FASTJSON: FastJson = FastJson;
static UNSUPPORTED: Unsupported = Unsupported;

/// Picks the serializer for a Dubbo serialization id.
pub fn serializer(serial_id: u8) -> &'static dyn DubboSerializer {
    match serial_id {
        SERIAL_HESSIAN2 => &HESSIAN2,
        SERIAL_FASTJSON => &FASTJSON,
        _ => &UNSUPPORTED,
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Hessian2;

impl Hessian2 {
    /// Returns `(value start, value length)` for the string at `offset`, or
    /// `None` if the length bytes are cut off.
    fn header(data: &[u8], offset: usize) -> Option<(usize, usize)> {
        let tag = *data.get(offset)?;
        if (0x30..=0x33).contains(&tag) {
            // [x30-x33] b0 <utf8-data>
            let low = *data.get(offset + 1)?;
            Some((offset + 2, (usize::from(tag - 0x30) << 8) + usize::from(low)))
        } else {
            Some((offset + 1, usize::from(tag)))
        }
    }
}

impl DubboSerializer for Hessian2 {
    fn eat_string(&self, data: &[u8], offset: usize) -> usize {
        match Self::header(data, offset) {
            Some((start, len)) => start + len,
            None => data.len(),
        }
    }

    fn string_value(&self, data: &[u8], offset: usize) -> (usize, String) {
        let Some((start, len)) = Self::header(data, offset) else {
            return (data.len(), String::new());
        };
        if start + len >= data.len() {
            return (data.len(), lossy(&data[start..]));
        }
        (start + len, lossy(&data[start..start + len]))
    }

    fn string_value_by_key(&self, data: &[u8], from: usize, key: &str) -> String {
        let key = key.as_bytes();
        let Some(&first) = key.first() else {
            return String::new();
        };
        for i in from..data.len() {
            if data[i] != first {
                continue;
            }
            // The key must be followed by at least one byte.
            if i + key.len() >= data.len() {
                continue;
            }
            if &data[i..i + key.len()] == key {
                return self.string_value(data, i + key.len()).1;
            }
        }
        String::new()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FastJson;

impl FastJson {
    fn next_quoted(data: &[u8], offset: usize) -> String {
        //  "xxx"
        //  |   |
        // off  i
        if offset >= data.len() {
            return String::new();
        }
        data[offset + 1..]
            .iter()
            .position(|&b| b == JSON_QUOTES)
            .map(|pos| lossy(&data[offset + 1..offset + 1 + pos]))
            .unwrap_or_default()
    }
}

impl DubboSerializer for FastJson {
    fn eat_string(&self, data: &[u8], offset: usize) -> usize {
        //  "xxx"\n
        //  |    |
        // off   i
        if offset >= data.len() {
            return data.len();
        }
        data[offset + 1..]
            .iter()
            .position(|&b| b == JSON_NEXT_LINE)
            .map_or(data.len(), |pos| offset + 1 + pos + 1)
    }

    fn string_value(&self, data: &[u8], offset: usize) -> (usize, String) {
        if offset >= data.len() {
            return (data.len(), String::new());
        }
        match data[offset + 1..].iter().position(|&b| b == JSON_NEXT_LINE) {
            Some(pos) => {
                let newline = offset + 1 + pos;
                // Drop the opening quote and the closing quote before `\n`.
                let value = data
                    .get(offset + 1..newline.saturating_sub(1))
                    .map(lossy)
                    .unwrap_or_default();
                (newline + 1, value)
            }
            None => (data.len(), String::new()),
        }
    }

    fn string_value_by_key(&self, data: &[u8], from: usize, key: &str) -> String {
        //  "keyxxxxxxxx":"value"
        //  |           |
        //  quote_left  i
        let mut quote_left = None;
        for i in from..data.len() {
            if data[i] != JSON_QUOTES {
                continue;
            }
            let Some(left) = quote_left else {
                quote_left = Some(i);
                continue;
            };
            quote_left = None;
            let is_key = data.get(i + 1) == Some(&JSON_COLON) && data.get(i + 2) == Some(&JSON_QUOTES);
            if is_key && &data[left + 1..i] == key.as_bytes() {
                return Self::next_quoted(data, i + 2);
            }
        }
        String::new()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

impl DubboSerializer for Unsupported {
    fn eat_string(&self, _data: &[u8], _offset: usize) -> usize {
        0
    }

    fn string_value(&self, _data: &[u8], _offset: usize) -> (usize, String) {
        (0, String::new())
    }

    fn string_value_by_key(&self, _data: &[u8], _from: usize, _key: &str) -> String {
        String::new()
    }
}
