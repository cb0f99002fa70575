//! The data URI value type

use crate::charset::Charset;
use crate::error::{Error, Result};
use crate::parser::Parser;
use crate::serializer::Serializer;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_MIME: &str = "text/plain";

// Option keys recognized in the header
pub const CHARSET_OPTION_NAME: &str = "charset";
pub const FILENAME_OPTION_NAME: &str = "filename";
pub const CONTENT_DISPOSITION_OPTION_NAME: &str = "content-disposition";

pub const BASE64_ENCODING: &str = "base64";

/// A decoded `data:` URI
///
/// Values are immutable once built. Equality and hashing cover every field,
/// with an absent option distinct from any present one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataUri {
    mime: String,
    charset: Option<Charset>,
    filename: Option<String>,
    content_disposition: Option<String>,
    data: Vec<u8>,
}

impl DataUri {
    /// Create a data URI without filename or content-disposition
    pub fn new(
        mime: impl Into<String>,
        charset: Option<Charset>,
        data: impl Into<Vec<u8>>,
    ) -> Result<Self> {
        Self::with_details(mime, charset, None::<String>, None::<String>, data)
    }

    /// Create a data URI with every field given explicitly
    pub fn with_details(
        mime: impl Into<String>,
        charset: Option<Charset>,
        filename: Option<impl Into<String>>,
        content_disposition: Option<impl Into<String>>,
        data: impl Into<Vec<u8>>,
    ) -> Result<Self> {
        let mime = mime.into();
        if mime.is_empty() {
            return Err(Error::MissingMime);
        }

        Ok(Self {
            mime,
            charset,
            filename: filename.map(Into::into),
            content_disposition: content_disposition.map(Into::into),
            data: data.into(),
        })
    }

    /// Parse a URI, decoding text payloads with `default_charset`
    pub fn parse(uri: &str, default_charset: Charset) -> Result<Self> {
        Parser::new().with_default_charset(default_charset).parse(uri)
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn charset(&self) -> Option<Charset> {
        self.charset
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn content_disposition(&self) -> Option<&str> {
        self.content_disposition.as_deref()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the value and return its payload
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Serializer::new().serialize(self))
    }
}

impl FromStr for DataUri {
    type Err = Error;

    /// Parses with UTF-8 as the default charset
    fn from_str(s: &str) -> Result<Self> {
        Parser::new().parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    const GIF: [u8; 43] = [
        71, 73, 70, 56, 57, 97, 1, 0, 1, 0, 128, 0, 0, 255, 255, 255, 0, 0, 0, 33, 249, 4, 1, 0,
        0, 0, 0, 44, 0, 0, 0, 0, 1, 0, 1, 0, 0, 2, 2, 68, 1, 0, 59,
    ];

    fn hash_of(uri: &DataUri) -> u64 {
        let mut hasher = DefaultHasher::new();
        uri.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_simple_constructor() {
        let charset = Charset::for_label("ISO-8859-15").unwrap();
        let uri = DataUri::new("text/plain", Some(charset), vec![1, 2, 3]).unwrap();

        assert_eq!(uri.mime(), "text/plain");
        assert_eq!(uri.charset(), Some(charset));
        assert_eq!(uri.filename(), None);
        assert_eq!(uri.content_disposition(), None);
        assert_eq!(uri.data(), &[1, 2, 3]);
    }

    #[test]
    fn test_extended_constructor() {
        let charset = Charset::for_label("ISO-8859-15").unwrap();
        let uri = DataUri::with_details(
            "text/plain",
            Some(charset),
            Some("test.txt"),
            Some("inline"),
            vec![1, 2, 3],
        )
        .unwrap();

        assert_eq!(uri.mime(), "text/plain");
        assert_eq!(uri.charset(), Some(charset));
        assert_eq!(uri.filename(), Some("test.txt"));
        assert_eq!(uri.content_disposition(), Some("inline"));
        assert_eq!(uri.data(), &[1, 2, 3]);
    }

    #[test]
    fn test_empty_mime_rejected() {
        let err = DataUri::new("", Some(Charset::utf_8()), Vec::new()).unwrap_err();
        assert!(matches!(err, Error::MissingMime));
    }

    #[test]
    fn test_empty_data_allowed() {
        let uri = DataUri::new("text/plain", None, Vec::new()).unwrap();
        assert!(uri.data().is_empty());
    }

    #[test]
    fn test_caller_buffer_is_not_aliased() {
        let mut buffer = GIF.to_vec();
        let uri = DataUri::new("image/gif", None, buffer.as_slice()).unwrap();
        buffer[0] = 0;

        assert_eq!(uri.data(), &GIF);
    }

    #[test]
    fn test_equals() {
        let parsed = "data:image/gif;base64,R0lGODlhAQABAIAAAP///wAAACH5BAEAAAAALAAAAAABAAEAAAICRAEAOw=="
            .parse::<DataUri>()
            .unwrap();
        let equal = DataUri::new("image/gif", None, GIF.to_vec()).unwrap();
        let mut changed = GIF;
        changed[0] = 72;
        let not_equal = DataUri::new("image/gif", None, changed.to_vec()).unwrap();

        assert_eq!(parsed, equal);
        assert_eq!(equal, parsed);
        assert_ne!(parsed, not_equal);
    }

    #[test]
    fn test_hash() {
        let parsed = "data:image/gif;base64,R0lGODlhAQABAIAAAP///wAAACH5BAEAAAAALAAAAAABAAEAAAICRAEAOw=="
            .parse::<DataUri>()
            .unwrap();
        let equal = DataUri::new("image/gif", None, GIF.to_vec()).unwrap();
        let mut changed = GIF;
        changed[0] = 72;
        let not_equal = DataUri::new("image/gif", None, changed.to_vec()).unwrap();

        assert_eq!(hash_of(&parsed), hash_of(&equal));
        // Not guaranteed, but a collision here would be suspicious
        assert_ne!(hash_of(&parsed), hash_of(&not_equal));
    }

    #[test]
    fn test_absent_fields_are_distinct() {
        let bare = DataUri::new("text/plain", None, b"x".to_vec()).unwrap();
        let named =
            DataUri::with_details("text/plain", None, Some("x.txt"), None::<String>, b"x".to_vec())
                .unwrap();
        let charset = DataUri::new("text/plain", Some(Charset::utf_8()), b"x".to_vec()).unwrap();

        assert_ne!(bare, named);
        assert_ne!(bare, charset);
        assert_ne!(hash_of(&bare), hash_of(&named));
        assert_ne!(hash_of(&bare), hash_of(&charset));
    }

    #[test]
    fn test_display_serializes() {
        let uri = DataUri::new("text/html", None, b"test".to_vec()).unwrap();
        assert_eq!(uri.to_string(), "data:text/html;base64,dGVzdA==");
    }

    #[test]
    fn test_parse_with_charset() {
        let latin = Charset::for_label("ISO-8859-15").unwrap();
        let uri = DataUri::parse("data:text/plain;charset=iso-8859-15,%A4uro", latin).unwrap();

        assert_eq!(uri.charset(), Some(latin));
        assert_eq!(uri.data(), &[0xA4, b'u', b'r', b'o']);
        assert_eq!(uri.to_string(), "data:text/plain;charset=ISO-8859-15;base64,pHVybw==");
    }

    #[test]
    fn test_into_data() {
        let uri = DataUri::new("application/octet-stream", None, vec![9, 8, 7]).unwrap();
        assert_eq!(uri.into_data(), vec![9, 8, 7]);
    }
}
