//! Data URI serializer

use crate::data_uri::{
    DataUri, BASE64_ENCODING, CHARSET_OPTION_NAME, CONTENT_DISPOSITION_OPTION_NAME,
    FILENAME_OPTION_NAME,
};
use crate::parser::SCHEME;
use base64::Engine;
use std::io;
use std::path::Path;

/// Writes [`DataUri`] values in canonical form:
///
/// ```text
/// data:<mime>;[charset=<name>;][content-disposition=<value>;][filename=<value>;]base64,<payload>
/// ```
///
/// Option values are written as they are. A value containing `;` or `,`
/// will not parse back to the same [`DataUri`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Serializer {
    // Stateless; every call receives the value it formats
}

impl Serializer {
    pub fn new() -> Self {
        Self {}
    }

    /// Serialize a data URI to a string
    pub fn serialize(&self, uri: &DataUri) -> String {
        let capacity = SCHEME.len() + uri.mime().len() + uri.data().len() * 4 / 3 + 16;
        let mut output = String::with_capacity(capacity);

        output.push_str(SCHEME);
        output.push_str(uri.mime());
        output.push(';');

        if let Some(charset) = uri.charset() {
            Self::push_option(&mut output, CHARSET_OPTION_NAME, charset.name());
        }
        if let Some(disposition) = uri.content_disposition() {
            Self::push_option(&mut output, CONTENT_DISPOSITION_OPTION_NAME, disposition);
        }
        if let Some(filename) = uri.filename() {
            Self::push_option(&mut output, FILENAME_OPTION_NAME, filename);
        }

        output.push_str(BASE64_ENCODING);
        output.push(',');
        base64::engine::general_purpose::STANDARD.encode_string(uri.data(), &mut output);

        output
    }

    fn push_option(output: &mut String, key: &str, value: &str) {
        output.push_str(key);
        output.push('=');
        output.push_str(value);
        output.push(';');
    }

    /// Serialize a data URI directly to a writer
    pub fn serialize_to_writer<W: io::Write>(
        &self,
        uri: &DataUri,
        mut writer: W,
    ) -> io::Result<()> {
        writer.write_all(self.serialize(uri).as_bytes())
    }

    /// Serialize a data URI to a file
    pub fn serialize_to_file(&self, uri: &DataUri, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.serialize(uri))
    }
}

/// Serialize `uri` to its canonical text form
pub fn serialize(uri: &DataUri) -> String {
    Serializer::new().serialize(uri)
}
