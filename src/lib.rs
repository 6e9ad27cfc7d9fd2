//! # urlview
//!
//! A zero-copy, zero-allocation URL recognizer.
//!
//! [`parse`] runs a byte-level DFA over a caller-owned `&[u8]` and
//! returns a [`UrlView`]: offset/length pairs into that same buffer for
//! each grammar component present (scheme, userinfo, host, port, path,
//! query, fragment), plus a decoded `u16` port. Nothing is copied and
//! nothing is heap-allocated on the parse path.
//!
//! ## Definitions
//!
//! - [`matches`] byte classification tables used by the DFA
//! - [`port`] decimal port decoding
//! - [`host`] host/port splitting and percent-encoding validation
//! - [`parser`] the DFA driver itself
//!
//! ## Usage
//!
//! ```
//! use urlview::{parse, FieldTag};
//!
//! let buf = b"https://user@example.com:8443/a/b?q=1#frag";
//! let view = parse(buf, false).unwrap();
//!
//! assert_eq!(view.slice(FieldTag::Scheme, buf), Some(&b"https"[..]));
//! assert_eq!(view.slice(FieldTag::Host, buf), Some(&b"example.com"[..]));
//! assert_eq!(view.port(), 8443);
//! ```
#![warn(missing_debug_implementations)]

mod error;
mod host;
mod log;
mod matches;
mod parser;
mod port;
mod view;

#[cfg(test)]
mod test;

pub use error::ParseError;
pub use parser::parse;
pub use view::{FieldTag, UrlView};
