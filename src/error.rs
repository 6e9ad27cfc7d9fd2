//! Parse error taxonomy.

/// A possible error value when parsing a URL.
///
/// Every component (scheme, authority, host, port, path, query,
/// fragment) returns one of these directly; nothing is recovered
/// locally, and the caller must treat the output [`crate::UrlView`] as
/// unspecified on error.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Input buffer was empty.
    EmptyInput,
    /// First byte was not `ALPHA`, `/`, or `*` (non-CONNECT mode).
    BadStart,
    /// Scheme contained a byte outside `ALPHA | DIGIT | + - .` before `:`.
    BadScheme,
    /// Scheme was recognized but not followed by `://` and a non-empty host.
    SchemeWithoutAuthority,
    /// `://` was immediately followed by `/`, `?`, `#`, or end of input.
    EmptyHost,
    /// A second `@` occurred in the authority.
    DoubleAt,
    /// A non-`USERINFO` byte occurred at bracket depth 0 in the host.
    BadHostChar,
    /// `[` was never matched by a subsequent `]`.
    UnclosedIPv6,
    /// A byte inside `[...]` was not `HEX | : | .` and not part of a zone tail.
    BadIPv6Char,
    /// Port was empty, longer than 5 bytes, non-digit, or decoded above 65535.
    BadPort,
    /// `%` in the host was not followed by two `HEX` bytes.
    BadPercentEncoding,
    /// An `invalid`-class byte occurred in the path body.
    BadPathChar,
    /// An `invalid`-class byte occurred in the query body.
    BadQueryChar,
    /// An `invalid`-class byte occurred in the fragment body.
    BadFragmentChar,
    /// Authority-only mode, but path/query/fragment bytes trailed the authority.
    ConnectWithNonAuthority,
    /// Authority-only mode, but no port was present.
    ConnectWithoutPort,
}

// ===== Error =====

macro_rules! gen_error {
    ($($variant:ident => $msg:literal),* $(,)?) => {
        impl ParseError {
            const fn message(&self) -> &'static str {
                use ParseError::*;
                match self {
                    $($variant => $msg,)*
                }
            }
        }

        impl std::fmt::Display for ParseError {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str(self.message())
            }
        }
    };
}

gen_error! {
    EmptyInput => "input buffer is empty",
    BadStart => "first byte is not ALPHA, '/', or '*'",
    BadScheme => "scheme contains a byte outside ALPHA | DIGIT | + - .",
    SchemeWithoutAuthority => "scheme is not followed by '://' and a non-empty host",
    EmptyHost => "'://' is followed by '/', '?', '#', or end of input",
    DoubleAt => "authority contains a second '@'",
    BadHostChar => "host contains a byte outside the USERINFO set",
    UnclosedIPv6 => "'[' is never matched by a closing ']'",
    BadIPv6Char => "byte inside '[...]' is not HEX, ':', '.', or a zone-id tail",
    BadPort => "port is empty, longer than 5 digits, non-digit, or exceeds 65535",
    BadPercentEncoding => "'%' in host is not followed by two hex digits",
    BadPathChar => "path contains an invalid-class byte",
    BadQueryChar => "query contains an invalid-class byte",
    BadFragmentChar => "fragment contains an invalid-class byte",
    ConnectWithNonAuthority => "authority-only mode input carries path/query/fragment bytes",
    ConnectWithoutPort => "authority-only mode input has no port",
}

impl std::error::Error for ParseError {}

impl std::fmt::Debug for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "\"{self}\"")
    }
}
