//! Charset identifiers
//!
//! A [`Charset`] is a resolved handle onto an [`encoding_rs::Encoding`].
//! Labels are looked up with WHATWG semantics, so common aliases such as
//! `utf8`, `latin2` or `cp1250` resolve to their canonical encoding.

use crate::error::{Error, Result};
use encoding_rs::Encoding;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A resolved character set
#[derive(Clone, Copy)]
pub struct Charset {
    encoding: &'static Encoding,
}

impl Charset {
    pub fn utf_8() -> Self {
        Self { encoding: encoding_rs::UTF_8 }
    }

    /// Resolve a charset label such as `"utf-8"` or `"ISO-8859-15"`
    ///
    /// Labels of the WHATWG replacement encoding (`iso-2022-kr` and friends)
    /// are rejected, since nothing can be encoded into them.
    pub fn for_label(label: &str) -> Result<Self> {
        Encoding::for_label_no_replacement(label.as_bytes())
            .map(|encoding| Self { encoding })
            .ok_or_else(|| Error::UnsupportedCharset(label.to_string()))
    }

    /// Canonical name of the charset
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Decode bytes into text, replacing malformed sequences with U+FFFD
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        self.encoding.decode_without_bom_handling(bytes).0
    }

    /// Encode text into bytes
    ///
    /// Characters the charset cannot represent are written as numeric
    /// character references.
    pub fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        // encoding_rs only encodes UTF-16 as UTF-8
        if self.encoding == encoding_rs::UTF_16LE {
            Cow::Owned(text.encode_utf16().flat_map(u16::to_le_bytes).collect())
        } else if self.encoding == encoding_rs::UTF_16BE {
            Cow::Owned(text.encode_utf16().flat_map(u16::to_be_bytes).collect())
        } else {
            self.encoding.encode(text).0
        }
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self::utf_8()
    }
}

impl From<&'static Encoding> for Charset {
    fn from(encoding: &'static Encoding) -> Self {
        Self { encoding }
    }
}

impl PartialEq for Charset {
    fn eq(&self, other: &Self) -> bool {
        self.encoding == other.encoding
    }
}

impl Eq for Charset {}

impl Hash for Charset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl fmt::Debug for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Charset").field(&self.name()).finish()
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_labels() {
        assert_eq!(Charset::for_label("utf-8").unwrap(), Charset::utf_8());
        assert_eq!(Charset::for_label("UTF8").unwrap().name(), "UTF-8");
        assert_eq!(Charset::for_label("windows-1250").unwrap().name(), "windows-1250");
        assert_eq!(Charset::for_label("ISO-8859-15").unwrap().name(), "ISO-8859-15");
    }

    #[test]
    fn test_unknown_label() {
        let err = Charset::for_label("klingon-1").unwrap_err();
        assert!(matches!(err, Error::UnsupportedCharset(ref label) if label == "klingon-1"));
    }

    #[test]
    fn test_decode_and_encode() {
        let latin = Charset::for_label("iso-8859-15").unwrap();
        assert_eq!(latin.decode(&[0xA4]), "€");
        assert_eq!(latin.encode("€").as_ref(), &[0xA4]);
        assert_eq!(Charset::utf_8().decode(&[0xC3, 0xA9]), "é");
    }

    #[test]
    fn test_encode_utf16() {
        let le = Charset::for_label("utf-16le").unwrap();
        let be = Charset::for_label("utf-16be").unwrap();

        assert_eq!(le.encode("ab").as_ref(), &[97, 0, 98, 0]);
        assert_eq!(be.encode("ab").as_ref(), &[0, 97, 0, 98]);
        assert_eq!(le.encode("€").as_ref(), &[0xAC, 0x20]);
    }

    #[test]
    fn test_replacement_labels_rejected() {
        let err = Charset::for_label("iso-2022-kr").unwrap_err();
        assert!(matches!(err, Error::UnsupportedCharset(ref label) if label == "iso-2022-kr"));
    }

    #[test]
    fn test_default_is_utf8() {
        assert_eq!(Charset::default(), Charset::utf_8());
        assert_eq!(Charset::default().to_string(), "UTF-8");
    }
}
