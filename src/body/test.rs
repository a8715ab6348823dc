use std::io::{SeekFrom, Write};

use super::{Body, BodyError, BodyStream, OpenMode};

#[test]
fn open_mode_parse() {
    assert_eq!(OpenMode::parse("r").unwrap(), OpenMode::READ);
    assert_eq!(OpenMode::parse("r+").unwrap(), OpenMode::READ_WRITE);
    assert_eq!(OpenMode::parse("wb+").unwrap(), OpenMode::WRITE_PLUS);
    assert_eq!(OpenMode::parse("a+").unwrap().as_str(), "a+");
    assert_eq!(OpenMode::parse("xt").unwrap().as_str(), "x");
    assert_eq!(OpenMode::parse("c+").unwrap().as_str(), "c+");

    assert!(OpenMode::parse("").is_err());
    assert!(OpenMode::parse("+").is_err());
    assert!(OpenMode::parse("rw").is_err());
    assert!(OpenMode::parse("z").is_err());
}

#[test]
fn open_mode_capabilities() {
    let r = OpenMode::READ;
    assert!(r.readable() && !r.writable());

    let w = OpenMode::parse("w").unwrap();
    assert!(!w.readable() && w.writable());

    for mode in ["r+", "w+", "a+", "x+", "c+"] {
        let mode = OpenMode::parse(mode).unwrap();
        assert!(mode.readable() && mode.writable(), "{}", mode.as_str());
    }
}

#[test]
fn memory_stream_read_write() {
    let mut stream = BodyStream::memory(OpenMode::WRITE_PLUS);
    assert_eq!(stream.write(b"hello world").unwrap(), 11);
    assert_eq!(stream.tell().unwrap(), 11);
    assert_eq!(stream.size(), Some(11));

    stream.rewind().unwrap();
    assert_eq!(stream.read(5).unwrap(), "hello");
    assert_eq!(stream.contents().unwrap(), " world");
    assert!(stream.eof().unwrap());

    stream.seek(SeekFrom::Start(6)).unwrap();
    assert!(!stream.eof().unwrap());
    assert_eq!(stream.contents().unwrap(), "world");
}

#[test]
fn memory_stream_truncate() {
    let mut stream = BodyStream::with_bytes("abcdef");
    stream.truncate(3).unwrap();
    assert_eq!(stream.size(), Some(3));
    assert_eq!(stream.contents().unwrap(), "abc");

    stream.truncate(5).unwrap();
    stream.rewind().unwrap();
    assert_eq!(stream.contents().unwrap().as_ref(), b"abc\0\0");
}

#[test]
fn read_capability_enforced() {
    let mut stream = BodyStream::memory(OpenMode::parse("w").unwrap());
    stream.write(b"secret").unwrap();
    assert!(matches!(stream.read(1), Err(BodyError::NotReadable)));
    assert!(matches!(stream.contents(), Err(BodyError::NotReadable)));
}

#[test]
fn write_capability_enforced() {
    let mut stream = BodyStream::with_bytes("data");
    assert!(stream.write(b"x").is_ok());

    let mut body = Body::from(BodyStream::stdin());
    assert!(!body.writable());
    assert!(matches!(body.write(b"x"), Err(BodyError::NotWritable)));
    assert!(matches!(body.truncate(0), Err(BodyError::NotWritable)));
}

#[test]
fn stdin_is_not_seekable() {
    let mut stream = BodyStream::stdin();
    assert!(!stream.seekable());
    assert!(matches!(stream.tell(), Err(BodyError::NotSeekable)));
    assert!(matches!(stream.rewind(), Err(BodyError::NotSeekable)));
    assert_eq!(stream.size(), None);
}

#[test]
fn file_stream_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("payload.bin");
    let ident = path.to_str().unwrap();

    let mut stream = BodyStream::open(ident, OpenMode::WRITE_PLUS).unwrap();
    stream.write(b"persisted").unwrap();
    stream.rewind().unwrap();
    assert_eq!(stream.contents().unwrap(), "persisted");
    assert!(stream.eof().unwrap());
    drop(stream);

    let mut reopened = BodyStream::open(ident, OpenMode::READ).unwrap();
    assert_eq!(reopened.size(), Some(9));
    assert_eq!(reopened.read(4).unwrap(), "pers");
    assert!(!reopened.writable());
}

#[test]
fn open_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent");
    let err = BodyStream::open(path.to_str().unwrap(), OpenMode::READ).unwrap_err();
    assert!(matches!(err, BodyError::InvalidSource(_)));
}

#[test]
fn open_memory_ident() {
    let mut stream = BodyStream::open("mem:scratch", OpenMode::WRITE_PLUS).unwrap();
    stream.write(b"ok").unwrap();
    stream.rewind().unwrap();
    assert_eq!(stream.contents().unwrap(), "ok");
}

#[test]
fn unattached_body_errors() {
    let mut body = Body::unattached();
    assert!(!body.is_attached());
    assert!(!body.readable() && !body.writable() && !body.seekable());
    assert_eq!(body.size(), None);

    assert!(matches!(body.read(1), Err(BodyError::NoResource)));
    assert!(matches!(body.write(b"x"), Err(BodyError::NoResource)));
    assert!(matches!(body.tell(), Err(BodyError::NoResource)));
    assert!(matches!(body.eof(), Err(BodyError::NoResource)));
    assert!(matches!(body.contents(), Err(BodyError::NotReadable)));
    assert_eq!(body.to_string_lossy(), "");
}

#[test]
fn attach_hands_back_previous() {
    let mut body = Body::from(BodyStream::with_bytes("first"));
    let previous = body.attach(BodyStream::with_bytes("second"), OpenMode::READ).unwrap();
    let mut previous = previous.unwrap();
    assert_eq!(previous.contents().unwrap(), "first");
    assert_eq!(body.contents().unwrap(), "second");
}

#[test]
fn attach_failure_keeps_current() {
    let dir = tempfile::tempdir().unwrap();
    let absent = dir.path().join("absent");

    let mut body = Body::from(BodyStream::with_bytes("kept"));
    let err = body
        .attach(absent.to_str().unwrap(), OpenMode::READ)
        .unwrap_err();
    assert!(matches!(err, BodyError::InvalidSource(_)));
    assert!(body.is_attached());
    assert_eq!(body.contents().unwrap(), "kept");
}

#[test]
fn attach_from_unattached_body_fails() {
    let mut body = Body::from(BodyStream::with_bytes("kept"));
    let err = body.attach(Body::unattached(), OpenMode::READ).unwrap_err();
    assert!(matches!(err, BodyError::InvalidSource(_)));
    assert!(body.is_attached());
}

#[test]
fn detach_and_close() {
    let mut body = Body::from(BodyStream::with_bytes("x"));
    let stream = body.detach();
    assert!(stream.is_some());
    assert!(!body.is_attached());
    assert!(body.detach().is_none());

    let mut body = Body::from(BodyStream::with_bytes("y"));
    body.close();
    assert!(!body.is_attached());
    body.close();
}

#[test]
fn body_from_source_variants() {
    let mut from_bytes = Body::from_source(b"raw".to_vec(), OpenMode::READ).unwrap();
    assert_eq!(from_bytes.contents().unwrap(), "raw");
    assert_eq!(from_bytes.origin(), None);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("src.txt");
    std::fs::write(&path, b"on disk").unwrap();
    let ident = path.to_str().unwrap();

    let mut from_ident = Body::from_source(ident, OpenMode::READ).unwrap();
    assert_eq!(from_ident.origin(), Some(ident));
    assert_eq!(from_ident.contents().unwrap(), "on disk");

    let mut adopted = Body::from_source(from_ident, OpenMode::READ).unwrap();
    assert_eq!(adopted.origin(), Some(ident));
    adopted.rewind().unwrap();
    assert_eq!(adopted.contents().unwrap(), "on disk");
}

#[test]
fn to_string_lossy_rewinds() {
    let mut body = Body::from(BodyStream::with_bytes("payload"));
    body.seek(SeekFrom::End(0)).unwrap();
    assert_eq!(body.to_string_lossy(), "payload");

    let mut write_only = Body::from(BodyStream::memory(OpenMode::parse("w").unwrap()));
    write_only.write(b"hidden").unwrap();
    assert_eq!(write_only.to_string_lossy(), "");
}

#[test]
fn eof_on_file_tracks_position() {
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(b"abc").unwrap();
    let mut stream = BodyStream::from_file(file, OpenMode::READ_WRITE);
    stream.rewind().unwrap();
    assert!(!stream.eof().unwrap());
    stream.seek(SeekFrom::End(0)).unwrap();
    assert!(stream.eof().unwrap());
}
