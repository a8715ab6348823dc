use super::{Header, Headers, normalize_name};

#[test]
fn test_normalize_name() {
    assert_eq!(normalize_name("content-type"), "Content-Type");
    assert_eq!(normalize_name("CONTENT-TYPE"), "Content-Type");
    assert_eq!(normalize_name("x-REQUEST-id"), "X-Request-Id");
    assert_eq!(normalize_name("etag"), "Etag");
    assert_eq!(normalize_name("x--y"), "X--Y");
}

#[test]
fn test_empty_name_rejected() {
    assert!(Header::new("", "x").is_err());

    let mut header = Header::new("Accept", "*/*").unwrap();
    assert!(header.set_name("").is_err());
    // the rejected rename leaves the field untouched
    assert_eq!(header.normalized_name(), "Accept");
}

#[test]
fn test_single_value() {
    let header = Header::new("content-type", "text/html").unwrap();
    assert_eq!(header.name(), "content-type");
    assert_eq!(header.normalized_name(), "Content-Type");
    assert_eq!(header.value(), Some("text/html"));
    assert_eq!(header.to_wire(), "Content-Type: text/html");
}

#[test]
fn test_comma_join() {
    let header = Header::new("accept-encoding", ["gzip", "br"]).unwrap();
    assert_eq!(header.to_wire(), "Accept-Encoding: gzip, br");
}

#[test]
fn test_comma_in_value_folds() {
    let mut header = Header::new("warning", "a,b").unwrap();
    header.add_value("c");
    assert_eq!(header.to_wire(), "Warning: a,b\r\nWarning: c");
}

#[test]
fn test_set_cookie_always_folds() {
    let header = Header::new("set-cookie", ["x=1", "y=2"]).unwrap();
    assert_eq!(header.to_wire(), "Set-Cookie: x=1\r\nSet-Cookie: y=2");
}

#[test]
fn test_flag_header() {
    let header = Header::flag("x-enabled").unwrap();
    assert!(header.values().is_empty());
    assert_eq!(header.value(), None);
    assert_eq!(header.to_wire(), "X-Enabled: 1");
}

#[test]
fn test_set_and_add_value() {
    let mut header = Header::new("accept", "text/html").unwrap();
    header.set_value(["a", "b"]).add_value("c");
    assert_eq!(header.values(), &["a", "b", "c"][..]);
    assert_eq!(header.to_wire(), "Accept: a, b, c");
}

#[test]
fn test_headers_case_insensitive_replace() {
    let mut headers = Headers::new();
    headers
        .set(Header::new("Content-Length", "10").unwrap())
        .set(Header::new("Host", "example.com").unwrap());
    assert_eq!(headers.len(), 2);

    // different casing replaces instead of duplicating
    headers.set(Header::new("content-length", "20").unwrap());
    assert_eq!(headers.len(), 2);
    assert_eq!(headers.get("CONTENT-LENGTH").unwrap().value(), Some("20"));

    assert!(headers.contains("host"));
    let removed = headers.remove("HOST").unwrap();
    assert_eq!(removed.value(), Some("example.com"));
    assert!(!headers.contains("host"));
}

#[test]
fn test_headers_to_wire() {
    let mut headers = Headers::new();
    headers
        .set(Header::new("host", "example.com").unwrap())
        .set(Header::new("set-cookie", ["a=1", "b=2"]).unwrap());
    assert_eq!(
        headers.to_wire(),
        "Host: example.com\r\nSet-Cookie: a=1\r\nSet-Cookie: b=2"
    );
}
