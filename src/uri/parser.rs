use super::{UriError, matches};

/// Borrowed view of the split components, before ownership is taken by the
/// [`Uri`][super::Uri] setters. Unset components stay empty.
#[derive(Default)]
pub(crate) struct RawParts<'a> {
    pub scheme: &'a str,
    pub username: &'a str,
    pub password: &'a str,
    pub host: &'a str,
    pub port: &'a str,
    pub path: &'a str,
    pub query: &'a str,
    pub fragment: &'a str,
}

/// Decompose a URI reference into components.
///
/// Follows the RFC 3986 order: fragment is cut first, then scheme, then an
/// authority led by `//`, then path and query. Absolute and relative
/// references are both accepted.
pub(crate) fn split(input: &str) -> Result<RawParts<'_>, UriError> {
    validate_escapes(input.as_bytes())?;

    let mut parts = RawParts::default();

    let rest = match input.split_once('#') {
        Some((rest, fragment)) => {
            validate(fragment, matches::is_query)?;
            parts.fragment = fragment;
            rest
        }
        None => input,
    };

    let rest = match split_scheme(rest) {
        Some((scheme, rest)) => {
            parts.scheme = scheme;
            rest
        }
        None => rest,
    };

    let rest = match rest.strip_prefix("//") {
        Some(rest) => {
            let end = rest.find(['/', '?']).unwrap_or(rest.len());
            let (authority, rest) = rest.split_at(end);
            split_authority(authority, &mut parts)?;
            rest
        }
        None => rest,
    };

    match rest.split_once('?') {
        Some((path, query)) => {
            validate(path, matches::is_path)?;
            validate(query, matches::is_query)?;
            parts.path = path;
            parts.query = query;
        }
        None => {
            validate(rest, matches::is_path)?;
            parts.path = rest;
        }
    }

    Ok(parts)
}

// ===== Logic =====

/// A scheme is present when a `:` occurs before any `/` or `?` and the text
/// leading it matches the scheme grammar. Anything else falls through to be
/// read as a relative reference.
fn split_scheme(input: &str) -> Option<(&str, &str)> {
    let colon = input.find(':')?;
    if let Some(delim) = input.find(['/', '?'])
        && delim < colon
    {
        return None;
    }

    let scheme = &input[..colon];
    match scheme.as_bytes() {
        [first, rest @ ..] if first.is_ascii_alphabetic() => rest
            .iter()
            .all(|byte| matches::is_scheme(*byte))
            .then(|| (scheme, &input[colon + 1..])),
        _ => None,
    }
}

fn split_authority<'a>(authority: &'a str, parts: &mut RawParts<'a>) -> Result<(), UriError> {
    if authority.is_empty() {
        return Ok(());
    }

    let host = match authority.split_once('@') {
        Some((userinfo, host)) => {
            match userinfo.split_once(':') {
                Some((username, password)) => {
                    parts.username = username;
                    parts.password = password;
                }
                None => parts.username = userinfo,
            }
            validate(parts.username, matches::is_userinfo)?;
            validate(parts.password, matches::is_userinfo)?;
            host
        }
        None => authority,
    };

    let (hostname, port) = split_port(host)?;
    if port.len() > 5 || !port.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(UriError::InvalidFormat);
    }

    parts.host = hostname;
    parts.port = port;
    Ok(())
}

/// Split `host[:port]`, keeping the brackets of an IP literal on the host.
fn split_port(host: &str) -> Result<(&str, &str), UriError> {
    let Some(literal) = host.strip_prefix('[') else {
        return match host.split_once(':') {
            Some((hostname, port)) => {
                validate(hostname, matches::is_regname)?;
                Ok((hostname, port))
            }
            None => {
                validate(host, matches::is_regname)?;
                Ok((host, ""))
            }
        };
    };

    let Some(end) = literal.find(']') else {
        return Err(UriError::InvalidFormat);
    };
    if literal[..end].is_empty() {
        return Err(UriError::InvalidFormat);
    }
    validate(&literal[..end], matches::is_ip_literal)?;

    let port = match literal[end + 1..].strip_prefix(':') {
        Some(port) => port,
        None if literal[end + 1..].is_empty() => "",
        None => return Err(UriError::InvalidFormat),
    };

    // `+2` keeps both brackets on the hostname
    Ok((&host[..end + 2], port))
}

fn validate(component: &str, is_allowed: fn(u8) -> bool) -> Result<(), UriError> {
    if component.bytes().all(is_allowed) {
        Ok(())
    } else {
        Err(UriError::InvalidFormat)
    }
}

/// Every `%` must lead exactly two hex digits, in any component.
fn validate_escapes(mut bytes: &[u8]) -> Result<(), UriError> {
    while let [byte, rest @ ..] = bytes {
        if *byte == b'%' {
            match rest {
                [hi, lo, tail @ ..] if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {
                    bytes = tail;
                }
                _ => return Err(UriError::InvalidFormat),
            }
        } else {
            bytes = rest;
        }
    }
    Ok(())
}
