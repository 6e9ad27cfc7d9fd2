//! Host/authority finalizer (C4) and host percent-encoding validator (C5).

use crate::error::ParseError;
use crate::matches::is_hex;
use crate::port::decode_port;
use crate::view::{FieldTag, UrlView};

/// Finalize the host (and optional port) field of an authority span.
///
/// `field_start..end_pos` is the full authority-after-`@` byte range
/// (or the whole authority, if no userinfo was split out). `port_start`
/// is `Some(i)` when the driver saw an unbracketed `:` at depth 0 and
/// `i` is the index just after it; `None` otherwise.
///
/// This centralizes the host/port split so the DFA driver never has to
/// distinguish bracketed from bare hosts byte-by-byte while scanning.
pub(crate) fn finalize_host(
    view: &mut UrlView,
    buf: &[u8],
    field_start: usize,
    end_pos: usize,
    port_start: Option<usize>,
) -> Result<(), ParseError> {
    let host_len = match port_start {
        Some(ps) => ps - field_start - 1,
        None => end_pos - field_start,
    };

    if host_len >= 2 && buf[field_start] == b'[' {
        // Last `]` in the authority span: colons and dots inside the
        // brackets were already validated byte-by-byte by the driver,
        // so any colon-tracking done before reaching `[` is discarded
        // here; only a colon immediately after the closing bracket
        // introduces a port.
        let k = match buf[field_start..end_pos]
            .iter()
            .rposition(|&b| b == b']')
        {
            Some(rel) => field_start + rel,
            None => return Err(ParseError::UnclosedIPv6),
        };

        if k + 1 < end_pos && buf[k + 1] == b':' {
            let port_bytes = &buf[k + 2..end_pos];
            let decoded = decode_port(port_bytes)?;
            view.set(FieldTag::Host, field_start + 1, k - field_start - 1);
            view.set_port(k + 2, end_pos - (k + 2), decoded);
        } else {
            view.set(FieldTag::Host, field_start + 1, k - field_start - 1);
        }

        return Ok(());
    }

    match port_start {
        Some(ps) if ps > field_start && ps <= end_pos => {
            let decoded = decode_port(&buf[ps..end_pos])?;
            view.set(FieldTag::Host, field_start, ps - field_start - 1);
            view.set_port(ps, end_pos - ps, decoded);
        }
        _ => {
            view.set(FieldTag::Host, field_start, end_pos - field_start);
        }
    }

    Ok(())
}

/// Enforce `%HH` with hex digits in a finalized host range, with an
/// exception for IPv6-with-zone-id literals (see spec.md §9).
pub(crate) fn validate_host_percent_encoding(host: &[u8]) -> Result<(), ParseError> {
    if !host.contains(&b'%') {
        return Ok(());
    }

    // A colon alongside a `%` is treated as "IPv6 with zone id" and is
    // waived entirely rather than separately parsed; see spec.md §9.
    if host.contains(&b':') {
        return Ok(());
    }

    let mut i = 0;
    while i < host.len() {
        if host[i] == b'%' {
            if i + 2 >= host.len() || !is_hex(host[i + 1]) || !is_hex(host[i + 2]) {
                return Err(ParseError::BadPercentEncoding);
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_host_no_port() {
        let mut view = UrlView::new();
        let buf = b"example.com";
        finalize_host(&mut view, buf, 0, buf.len(), None).unwrap();
        assert_eq!(view.slice(FieldTag::Host, buf), Some(&buf[..]));
        assert!(!view.is_present(FieldTag::Port));
    }

    #[test]
    fn host_with_port() {
        let mut view = UrlView::new();
        let buf = b"example.com:8080";
        finalize_host(&mut view, buf, 0, buf.len(), Some(12)).unwrap();
        assert_eq!(view.slice(FieldTag::Host, buf), Some(&b"example.com"[..]));
        assert_eq!(view.port(), 8080);
    }

    #[test]
    fn ipv6_literal_no_port() {
        let mut view = UrlView::new();
        let buf = b"[::1]";
        finalize_host(&mut view, buf, 0, buf.len(), None).unwrap();
        assert_eq!(view.slice(FieldTag::Host, buf), Some(&b"::1"[..]));
        assert!(!view.is_present(FieldTag::Port));
    }

    #[test]
    fn ipv6_literal_with_port() {
        let mut view = UrlView::new();
        let buf = b"[2001:db8::1]:8080";
        finalize_host(&mut view, buf, 0, buf.len(), None).unwrap();
        assert_eq!(view.slice(FieldTag::Host, buf), Some(&b"2001:db8::1"[..]));
        assert_eq!(view.port(), 8080);
    }

    #[test]
    fn unclosed_ipv6_fails() {
        let mut view = UrlView::new();
        let buf = b"[::1";
        assert_eq!(
            finalize_host(&mut view, buf, 0, buf.len(), None),
            Err(ParseError::UnclosedIPv6)
        );
    }

    #[test]
    fn percent_encoding_waived_with_zone_id() {
        assert!(validate_host_percent_encoding(b"fe80::1%eth0").is_ok());
    }

    #[test]
    fn percent_encoding_checked_without_colon() {
        assert!(validate_host_percent_encoding(b"example%2ecom").is_ok());
        assert!(validate_host_percent_encoding(b"example%2").is_err());
        assert!(validate_host_percent_encoding(b"example%zzcom").is_err());
    }
}
