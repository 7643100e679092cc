use crate::ProbeError;
use std::{
    ffi::{CStr, CString},
    fmt,
    str::FromStr,
};

/// Interest in one event name within one category.
///
/// Identifiers are handed to the probe library byte for byte. The only thing
/// rejected is an interior NUL, which a C string cannot carry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subscription {
    name: CString,
    category: CString,
}

impl Subscription {
    pub fn new(
        name: impl Into<Vec<u8>>,
        category: impl Into<Vec<u8>>,
    ) -> Result<Self, ProbeError> {
        let name = CString::new(name)
            .map_err(|source| ProbeError::InvalidIdentifier { field: "event name", source })?;
        let category = CString::new(category)
            .map_err(|source| ProbeError::InvalidIdentifier { field: "category", source })?;
        Ok(Self { name, category })
    }

    pub fn name(&self) -> &CStr {
        &self.name
    }

    pub fn category(&self) -> &CStr {
        &self.category
    }
}

/// Parses `NAME:CATEGORY`, splitting on the last colon.
impl FromStr for Subscription {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, category) = s
            .rsplit_once(':')
            .ok_or_else(|| ProbeError::MalformedSubscription(s.to_string()))?;
        Self::new(name, category)
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            self.name.to_string_lossy(),
            self.category.to_string_lossy()
        )
    }
}
