use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

/// A captured payload plus a read cursor and the attributes parsed so far.
///
/// All readers are big-endian and return `None` instead of reading past the
/// end of the payload.
#[derive(Debug, Clone)]
pub struct PayloadMessage<'a> {
    data: &'a [u8],
    pub offset: usize,
    attributes: BTreeMap<&'static str, AttributeValue>,
}

impl<'a> PayloadMessage<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            attributes: BTreeMap::new(),
        }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn read_u8(&self, at: usize) -> Option<u8> {
        self.data.get(at).copied()
    }

    pub fn read_u16(&self, at: usize) -> Option<u16> {
        let bytes = self.read_bytes(at, 2)?;
        Some(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&self, at: usize) -> Option<u32> {
        let bytes = self.read_bytes(at, 4)?;
        Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_bytes(&self, at: usize, len: usize) -> Option<&'a [u8]> {
        self.data.get(at..at.checked_add(len)?)
    }

    pub fn add_str_attribute(&mut self, key: &'static str, value: impl Into<String>) {
        self.attributes.insert(key, AttributeValue::Str(value.into()));
    }

    pub fn add_int_attribute(&mut self, key: &'static str, value: i64) {
        self.attributes.insert(key, AttributeValue::Int(value));
    }

    pub fn add_bool_attribute(&mut self, key: &'static str, value: bool) {
        self.attributes.insert(key, AttributeValue::Bool(value));
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    pub fn attributes(&self) -> &BTreeMap<&'static str, AttributeValue> {
        &self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_are_bounds_checked() {
        let message = PayloadMessage::new(&[0x12, 0x34, 0x56, 0x78, 0x9a]);
        assert_eq!(message.read_u16(0), Some(0x1234));
        assert_eq!(message.read_u16(3), Some(0x789a));
        assert_eq!(message.read_u16(4), None);
        assert_eq!(message.read_u32(1), Some(0x3456_789a));
        assert_eq!(message.read_u32(2), None);
        assert_eq!(message.read_bytes(5, 0), Some(&[][..]));
        assert_eq!(message.read_bytes(usize::MAX, 2), None);
    }

    #[test]
    fn attributes_overwrite_by_key() {
        let mut message = PayloadMessage::new(b"");
        message.add_int_attribute("k", 1);
        message.add_str_attribute("k", "v");
        assert_eq!(message.attributes().len(), 1);
        assert_eq!(
            message.attribute("k"),
            Some(&AttributeValue::Str("v".to_string()))
        );
    }
}
