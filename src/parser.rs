//! Data URI parser

use crate::charset::Charset;
use crate::data_uri::{
    DataUri, BASE64_ENCODING, CHARSET_OPTION_NAME, CONTENT_DISPOSITION_OPTION_NAME, DEFAULT_MIME,
    FILENAME_OPTION_NAME,
};
use crate::error::{Error, Result};
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use log::{debug, trace};
use percent_encoding::percent_decode_str;

pub const SCHEME: &str = "data:";

const SEGMENT_SEPARATOR: char = ';';
const PAYLOAD_SEPARATOR: char = ',';

/// Standard alphabet; trailing `=` padding is optional on input
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Parses `data:` URIs
#[derive(Debug, Clone, Copy)]
pub struct Parser {
    /// Charset used to percent-decode the URI and to encode text payloads
    default_charset: Charset,
}

/// Header state collected while walking the segments.
/// Every slot is filled at most once.
#[derive(Debug, Default)]
struct Header {
    mime: Option<String>,
    base64: Option<bool>,
    charset: Option<String>,
    filename: Option<String>,
    content_disposition: Option<String>,
}

impl Header {
    fn option_slot(&mut self, key: &str) -> Option<&mut Option<String>> {
        match key {
            CHARSET_OPTION_NAME => Some(&mut self.charset),
            FILENAME_OPTION_NAME => Some(&mut self.filename),
            CONTENT_DISPOSITION_OPTION_NAME => Some(&mut self.content_disposition),
            _ => None,
        }
    }
}

impl Parser {
    /// Create a parser using UTF-8 as its default charset
    pub fn new() -> Self {
        Self { default_charset: Charset::utf_8() }
    }

    pub fn with_default_charset(mut self, charset: Charset) -> Self {
        self.default_charset = charset;
        self
    }

    pub fn default_charset(&self) -> Charset {
        self.default_charset
    }

    /// Parse a URI into a [`DataUri`]
    pub fn parse(&self, uri: &str) -> Result<DataUri> {
        let (header, payload) = Self::split(uri)?;
        let header = self.parse_header(header)?;
        trace!("data URI header: {:?}", header);

        let charset = header.charset.as_deref().map(Charset::for_label).transpose()?;

        // Spaces in the payload become `+` so form-encoded base64 survives
        let text = self
            .percent_decode(payload, uri.len() - payload.len())?
            .replace(' ', "+");
        let data = if header.base64.unwrap_or(false) {
            Self::decode_base64(&text)?
        } else {
            self.default_charset.encode(&text).into_owned()
        };

        DataUri::with_details(
            header.mime.unwrap_or_else(|| DEFAULT_MIME.to_string()),
            charset,
            header.filename,
            header.content_disposition,
            data,
        )
    }

    /// Check the scheme and split at the first comma
    fn split(uri: &str) -> Result<(&str, &str)> {
        let has_scheme = uri
            .get(..SCHEME.len())
            .map_or(false, |prefix| prefix.eq_ignore_ascii_case(SCHEME));
        if !has_scheme {
            return Err(Error::MissingScheme);
        }

        let comma = uri.find(PAYLOAD_SEPARATOR).ok_or(Error::MissingComma)?;
        Ok((&uri[SCHEME.len()..comma], &uri[comma + 1..]))
    }

    fn parse_header(&self, header: &str) -> Result<Header> {
        let mut state = Header::default();
        let mut offset = SCHEME.len();

        for (index, segment) in header.split(SEGMENT_SEPARATOR).enumerate() {
            let segment_offset = offset;
            offset += segment.len() + 1;

            let (name, value) = match segment.split_once('=') {
                None => (self.decode_token(segment, segment_offset)?, None),
                Some((name, value)) => (
                    self.decode_token(name, segment_offset)?,
                    Some(self.decode_token(value, segment_offset + name.len() + 1)?),
                ),
            };

            match value {
                None if index == 0 && !name.is_empty() => {
                    state.mime = Some(name);
                }
                None if name.eq_ignore_ascii_case(BASE64_ENCODING) => {
                    if state.base64.is_some() {
                        debug!("ignoring repeated content-encoding `{}`", name);
                    } else {
                        state.base64 = Some(true);
                    }
                }
                None => {}
                Some(value) => {
                    if value.is_empty() {
                        continue;
                    }
                    let key = name.to_lowercase();
                    match state.option_slot(&key) {
                        Some(slot) if slot.is_none() => *slot = Some(value),
                        Some(_) => debug!("ignoring repeated option `{}`", key),
                        None => debug!("ignoring unknown option `{}`", key),
                    }
                }
            }
        }

        Ok(state)
    }

    /// Decode a header name or value: lower-case, percent-decode, turn
    /// every space into `+`, then trim
    fn decode_token(&self, text: &str, offset: usize) -> Result<String> {
        // Lower-casing may change byte lengths, so escapes are checked first
        validate_escapes(text, offset)?;
        let decoded = self.percent_decode(&text.to_lowercase(), offset)?;
        Ok(decoded.replace(' ', "+").trim().to_string())
    }

    /// Percent-decode `text`
    ///
    /// Runs of `%XX` escapes are gathered into bytes and decoded with the
    /// default charset; other characters are copied as they are. `offset`
    /// locates `text` inside the full URI for error reporting.
    fn percent_decode(&self, text: &str, offset: usize) -> Result<String> {
        let mut output = String::with_capacity(text.len());
        let mut rest = text;
        let mut position = offset;

        while let Some(start) = rest.find('%') {
            output.push_str(&rest[..start]);
            let run = escaped_run_len(&rest[start..])
                .map_err(|at| Error::MalformedEscape { offset: position + start + at })?;

            let bytes: Vec<u8> = percent_decode_str(&rest[start..start + run]).collect();
            output.push_str(&self.default_charset.decode(&bytes));

            position += start + run;
            rest = &rest[start + run..];
        }
        output.push_str(rest);

        Ok(output)
    }

    fn decode_base64(text: &str) -> Result<Vec<u8>> {
        let filtered: String = text.chars().filter(|&c| c != '\n' && c != '\r').collect();
        Ok(BASE64.decode(filtered)?)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse `uri`, decoding escapes and text payloads with `default_charset`
pub fn parse(uri: &str, default_charset: Charset) -> Result<DataUri> {
    Parser::new().with_default_charset(default_charset).parse(uri)
}

/// Fail with the URI offset of the first malformed escape in `text`
fn validate_escapes(text: &str, offset: usize) -> Result<()> {
    let mut rest = text;
    let mut position = offset;

    while let Some(start) = rest.find('%') {
        let run = escaped_run_len(&rest[start..])
            .map_err(|at| Error::MalformedEscape { offset: position + start + at })?;
        position += start + run;
        rest = &rest[start + run..];
    }

    Ok(())
}

/// Length in bytes of the leading run of `%XX` escapes in `text`.
/// On a malformed escape, returns its offset within `text`.
fn escaped_run_len(text: &str) -> std::result::Result<usize, usize> {
    let bytes = text.as_bytes();
    let mut len = 0;

    while bytes.get(len) == Some(&b'%') {
        let valid = bytes.len() >= len + 3
            && bytes[len + 1].is_ascii_hexdigit()
            && bytes[len + 2].is_ascii_hexdigit();
        if !valid {
            return Err(len);
        }
        len += 3;
    }

    Ok(len)
}
