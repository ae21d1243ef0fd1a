//! Identity locators: `scheme ":" opaque-identifier`.

use std::fmt;

use crate::error::SchemaError;

/// A locator naming the signer of a badge and how to find their public key.
///
/// Examples: `nmc:alice`, `id:alice`, `https://example.org/alice.json`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    text: String,
    colon: usize,
}

impl Locator {
    /// Parse a locator. The scheme must be non-empty.
    pub fn parse(text: &str) -> Result<Self, SchemaError> {
        match text.find(':') {
            Some(colon) if colon > 0 => Ok(Self {
                text: text.to_owned(),
                colon,
            }),
            _ => Err(SchemaError::InvalidLocator(text.to_owned())),
        }
    }

    /// The scheme, without the colon (`nmc` for `nmc:alice`).
    pub fn scheme(&self) -> &str {
        &self.text[..self.colon]
    }

    /// Everything after the first colon (`alice` for `nmc:alice`).
    pub fn identifier(&self) -> &str {
        &self.text[self.colon + 1..]
    }

    /// The full locator text.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Debug for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Locator({})", self.text)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Locator {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl TryFrom<&str> for Locator {
    type Error = SchemaError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        Self::parse(text)
    }
}
