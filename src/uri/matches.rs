//! Per-byte character classes from the [RFC 3986] collected ABNF.
//!
//! [RFC 3986]: <https://datatracker.ietf.org/doc/html/rfc3986#appendix-A>

/// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
pub(crate) const fn is_scheme(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'+' | b'-' | b'.')
}

/// `unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"`
pub(crate) const fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

/// `sub-delims = "!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="`
pub(crate) const fn is_sub_delim(byte: u8) -> bool {
    matches!(
        byte,
        b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'='
    )
}

/// `userinfo = *( unreserved / pct-encoded / sub-delims / ":" )`
///
/// The `%` of a pct-escape passes here; escapes are validated separately.
pub(crate) const fn is_userinfo(byte: u8) -> bool {
    is_unreserved(byte) || is_sub_delim(byte) || matches!(byte, b':' | b'%')
}

/// `reg-name = *( unreserved / pct-encoded / sub-delims )`
pub(crate) const fn is_regname(byte: u8) -> bool {
    is_unreserved(byte) || is_sub_delim(byte) || byte == b'%'
}

/// Inside of an IP literal bracket pair.
pub(crate) const fn is_ip_literal(byte: u8) -> bool {
    byte.is_ascii_hexdigit() || matches!(byte, b':' | b'.')
}

/// `pchar = unreserved / pct-encoded / sub-delims / ":" / "@"`, plus `/`.
pub(crate) const fn is_path(byte: u8) -> bool {
    is_unreserved(byte) || is_sub_delim(byte) || matches!(byte, b':' | b'@' | b'%' | b'/')
}

/// `query = *( pchar / "/" / "?" )`, also covers `fragment`.
pub(crate) const fn is_query(byte: u8) -> bool {
    is_path(byte) || byte == b'?'
}

#[test]
fn test_classes() {
    assert!(is_scheme(b'h') && is_scheme(b'+') && !is_scheme(b':'));
    assert!(is_userinfo(b':') && !is_userinfo(b'@') && !is_userinfo(b'/'));
    assert!(is_regname(b'-') && !is_regname(b'@') && !is_regname(b'['));
    assert!(is_path(b'/') && is_path(b'@') && !is_path(b'?') && !is_path(b'#'));
    assert!(is_query(b'?') && !is_query(b'#') && !is_query(b' '));
}
