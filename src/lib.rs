//! # datauri
//!
//! Parsing and serialization of RFC 2397 `data:` URIs.
//!
//! ## Format
//!
//! A data URI carries a typed payload inline:
//!
//! ```text
//! data:image/gif;filename=dot.gif;base64,R0lGODlhAQABAIAAAP///wAAACH5BAEAAAAALAAAAAABAAEAAAICRAEAOw==
//! ```
//!
//! Everything between `data:` and the first `,` is the header, split on `;`:
//!
//! - The first segment, when it has no `=`, is the MIME type (default `text/plain`)
//! - `charset=`, `filename=` and `content-disposition=` are recognized options
//! - A bare `base64` segment marks the payload as base64 encoded
//!
//! Repeated options and encoding tokens are ignored; the first one wins.
//!
//! ## Decoding rules
//!
//! Header segments and the payload are percent-decoded with a caller-supplied
//! default charset. After decoding, every space is turned into `+`, so a
//! base64 payload that passed through form encoding still decodes.
//!
//! A payload without the `base64` token is encoded back into bytes with the
//! default charset.
//!
//! ## Output
//!
//! [`serialize`] always writes the options in the order `charset`,
//! `content-disposition`, `filename` and always base64-encodes the payload.
//!
//! ```
//! use datauri::{Charset, DataUri};
//!
//! let uri = datauri::parse("data:text/html;base64,dGVzdA==", Charset::utf_8()).unwrap();
//! assert_eq!(uri.mime(), "text/html");
//! assert_eq!(uri.data(), b"test");
//! assert_eq!(datauri::serialize(&uri), "data:text/html;base64,dGVzdA==");
//!
//! let built = DataUri::new("text/html", None, b"test".to_vec()).unwrap();
//! assert_eq!(built, uri);
//! ```

pub mod charset;
pub mod data_uri;
pub mod error;
pub mod parser;
pub mod serializer;

pub use charset::Charset;
pub use data_uri::DataUri;
pub use error::{Error, ErrorKind, Result};
pub use parser::{parse, Parser};
pub use serializer::{serialize, Serializer};
