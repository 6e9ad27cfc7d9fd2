//! Main driver (C6): the DFA described in spec.md §4.6.
//!
//! States map onto loop iterations rather than an explicit 2-D
//! transition array — each state's contract is one match arm, which
//! spec.md §4.6 accepts as an equivalent materialization of the table
//! ("either representation is correct if all contracts hold"). The
//! `dead`/`start` states and the one-byte `query_or_fragment`
//! lookahead are folded away the same way: failures return `Err`
//! immediately (no observable "dead" state to loop on), and both
//! `server`/`ServerStart` and `path`-then-`query`/`fragment`
//! transitions go directly to their target state, which spec.md §4.6
//! explicitly permits ("either form is acceptable as long as the
//! resulting fields are identical").

use crate::error::ParseError;
use crate::host::{finalize_host, validate_host_percent_encoding};
use crate::log;
use crate::matches::{self, is_alpha};
use crate::view::{FieldTag, UrlView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scheme,
    SchemeSlash,
    SchemeSlashSlash,
    Server,
    ServerWithAt,
    Path,
    Query,
    Fragment,
}

/// The field currently being accumulated from `field_start` to the
/// cursor. `None` while between `scheme_slash`/`scheme_slash_slash`
/// (scheme already recorded at `:`, authority not yet begun).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveField {
    Scheme,
    Host,
    Path,
    Query,
    Fragment,
}

const FAST_SCHEMES: &[(&[u8], usize)] = &[
    (b"https:", 5),
    (b"http:", 4),
    (b"wss:", 3),
    (b"ws:", 2),
    (b"ftp:", 3),
];

/// Literal-prefix fast path for the handful of schemes expected to
/// dominate real traffic. Purely an optimization: any other
/// `ALPHA`-leading scheme falls back to the byte-by-byte `scheme`
/// state, which is semantically equivalent (spec.md §9).
#[inline]
fn match_scheme_fast_path(buf: &[u8]) -> Option<(usize, usize)> {
    for &(prefix, scheme_len) in FAST_SCHEMES {
        if buf.starts_with(prefix) {
            return Some((scheme_len, prefix.len()));
        }
    }
    None
}

/// `server_start`'s entry check: the authority must not be empty.
///
/// The error raised on failure depends on how `server_start` was
/// reached: a bare `//...` or an `authority_only` input with nothing
/// after it is `EmptyHost`, but the source rejects both `http://` and
/// `http:///path` as `SchemeWithoutAuthority` (spec.md §9) rather than
/// `EmptyHost`, so callers arriving via a scheme's `://` pass that
/// error in instead.
#[inline]
fn check_authority_begins(buf: &[u8], i: usize, on_empty: ParseError) -> Result<(), ParseError> {
    match buf.get(i) {
        None | Some(b'/' | b'?' | b'#') => Err(on_empty),
        _ => Ok(()),
    }
}

/// Parse `buf` into a [`UrlView`].
///
/// `authority_only` selects the CONNECT-target grammar (`host [":"
/// port]`, port required, no path/query/fragment) instead of the
/// ordinary absolute/relative URL grammar. See spec.md §4.6, §6.
pub fn parse(buf: &[u8], authority_only: bool) -> Result<UrlView, ParseError> {
    parse_inner(buf, authority_only).inspect_err(|e| log::debug!("parse failed: {e}"))
}

fn parse_inner(buf: &[u8], authority_only: bool) -> Result<UrlView, ParseError> {
    let mut view = UrlView::new();
    let n = buf.len();

    if n == 0 {
        return Err(ParseError::EmptyInput);
    }

    let mut i;
    let mut state;
    let mut field_start;
    let mut active: Option<ActiveField>;
    let mut port_start: Option<usize> = None;

    if authority_only {
        check_authority_begins(buf, 0, ParseError::EmptyHost)?;
        i = 0;
        field_start = 0;
        state = State::Server;
        active = Some(ActiveField::Host);
    } else {
        match buf[0] {
            b'/' if n >= 2 && buf[1] == b'/' => {
                check_authority_begins(buf, 2, ParseError::EmptyHost)?;
                i = 2;
                field_start = 2;
                state = State::Server;
                active = Some(ActiveField::Host);
            }
            b'/' | b'*' => {
                i = 0;
                field_start = 0;
                state = State::Path;
                active = Some(ActiveField::Path);
            }
            b if is_alpha(b) => {
                if let Some((scheme_len, after_colon)) = match_scheme_fast_path(buf) {
                    view.set(FieldTag::Scheme, 0, scheme_len);
                    i = after_colon;
                    field_start = after_colon;
                    state = State::SchemeSlash;
                    active = None;
                } else {
                    i = 0;
                    field_start = 0;
                    state = State::Scheme;
                    active = Some(ActiveField::Scheme);
                }
            }
            _ => return Err(ParseError::BadStart),
        }
    }

    while i < n {
        match state {
            State::Scheme => {
                let b = buf[i];
                if matches::is_scheme_tail(b) {
                    i += 1;
                } else if b == b':' {
                    view.set(FieldTag::Scheme, field_start, i - field_start);
                    active = None;
                    i += 1;
                    state = State::SchemeSlash;
                } else {
                    return Err(ParseError::BadScheme);
                }
            }

            State::SchemeSlash => {
                if buf[i] == b'/' {
                    i += 1;
                    state = State::SchemeSlashSlash;
                } else {
                    return Err(ParseError::SchemeWithoutAuthority);
                }
            }

            State::SchemeSlashSlash => {
                if buf[i] == b'/' {
                    i += 1;
                    check_authority_begins(buf, i, ParseError::SchemeWithoutAuthority)?;
                    field_start = i;
                    active = Some(ActiveField::Host);
                    state = State::Server;
                } else {
                    return Err(ParseError::SchemeWithoutAuthority);
                }
            }

            State::Server | State::ServerWithAt => {
                let run = matches::userinfo_run(
                    &buf[i..],
                    &[b'@', b'[', b':', b'/', b'?', b'#'],
                );
                if run > 0 {
                    i += run;
                    continue;
                }

                match buf[i] {
                    b'[' => {
                        let close = find_ipv6_close(buf, i + 1)?;
                        i = close + 1;
                    }
                    b'/' => {
                        finalize_host(&mut view, buf, field_start, i, port_start)?;
                        field_start = i;
                        active = Some(ActiveField::Path);
                        state = State::Path;
                    }
                    b'?' => {
                        finalize_host(&mut view, buf, field_start, i, port_start)?;
                        field_start = i + 1;
                        active = Some(ActiveField::Query);
                        state = State::Query;
                        i += 1;
                    }
                    b'@' => {
                        if state == State::ServerWithAt {
                            return Err(ParseError::DoubleAt);
                        }
                        view.set(FieldTag::Userinfo, field_start, i - field_start);
                        field_start = i + 1;
                        port_start = None;
                        active = Some(ActiveField::Host);
                        state = State::ServerWithAt;
                        i += 1;
                    }
                    b':' => {
                        if port_start.is_none() {
                            port_start = Some(i + 1);
                        }
                        i += 1;
                    }
                    b if matches::is_userinfo(b) => i += 1,
                    _ => return Err(ParseError::BadHostChar),
                }
            }

            State::Path => {
                i += matches::path_run(&buf[i..]);
                if i >= n {
                    break;
                }
                match buf[i] {
                    b'?' => {
                        view.set(FieldTag::Path, field_start, i - field_start);
                        field_start = i + 1;
                        active = Some(ActiveField::Query);
                        state = State::Query;
                        i += 1;
                    }
                    b'#' => {
                        view.set(FieldTag::Path, field_start, i - field_start);
                        field_start = i + 1;
                        active = Some(ActiveField::Fragment);
                        state = State::Fragment;
                        i += 1;
                    }
                    _ => return Err(ParseError::BadPathChar),
                }
            }

            State::Query => match matches::find_byte(&buf[i..], b'#') {
                Some(rel) => {
                    let hash_pos = i + rel;
                    validate_run(&buf[i..hash_pos], ParseError::BadQueryChar)?;
                    view.set(FieldTag::Query, field_start, hash_pos - field_start);
                    field_start = hash_pos + 1;
                    active = Some(ActiveField::Fragment);
                    state = State::Fragment;
                    i = hash_pos + 1;
                }
                None => {
                    validate_run(&buf[i..], ParseError::BadQueryChar)?;
                    i = n;
                }
            },

            State::Fragment => {
                validate_run(&buf[i..], ParseError::BadFragmentChar)?;
                i = n;
            }
        }
    }

    // ===== final-field flush =====
    match active {
        Some(ActiveField::Host) => finalize_host(&mut view, buf, field_start, i, port_start)?,
        Some(ActiveField::Path) => view.set(FieldTag::Path, field_start, i - field_start),
        Some(ActiveField::Query) => view.set(FieldTag::Query, field_start, i - field_start),
        Some(ActiveField::Fragment) => view.set(FieldTag::Fragment, field_start, i - field_start),
        Some(ActiveField::Scheme) => {
            if !view.is_present(FieldTag::Scheme) {
                view.set(FieldTag::Scheme, field_start, i - field_start);
            }
        }
        None => {}
    }

    // ===== post-checks =====
    if authority_only {
        if !matches!(state, State::Server | State::ServerWithAt) {
            return Err(ParseError::ConnectWithNonAuthority);
        }
        if !view.is_present(FieldTag::Port) {
            return Err(ParseError::ConnectWithoutPort);
        }
    } else if view.is_present(FieldTag::Scheme) && !view.is_present(FieldTag::Host) {
        return Err(ParseError::SchemeWithoutAuthority);
    }

    if let Some(host) = view.slice(FieldTag::Host, buf) {
        validate_host_percent_encoding(host)?;
    }

    Ok(view)
}

/// Scan `[i+1, buf.len())` for the closing `]` of an IPv6 literal,
/// validating every byte up to a `%` as `HEX | : | .`; bytes after a
/// `%` (the zone-id tail) are not validated, per spec.md §4.4 and §9.
fn find_ipv6_close(buf: &[u8], start: usize) -> Result<usize, ParseError> {
    let mut j = start;
    let mut in_zone = false;
    while j < buf.len() {
        match buf[j] {
            b']' => return Ok(j),
            b'%' => in_zone = true,
            b if in_zone => {
                let _ = b; // zone-id tail: any byte, unvalidated until `]`
            }
            b if matches::is_ipv6_literal_byte(b) => {}
            _ => return Err(ParseError::BadIPv6Char),
        }
        j += 1;
    }
    Err(ParseError::UnclosedIPv6)
}

#[inline]
fn validate_run(bytes: &[u8], err: ParseError) -> Result<(), ParseError> {
    for &b in bytes {
        if !matches::is_valid_body_byte(b) {
            return Err(err);
        }
    }
    Ok(())
}
