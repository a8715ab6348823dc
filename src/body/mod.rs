//! Message body over an attachable stream resource.
use bytes::Bytes;
use std::io::SeekFrom;

mod error;
mod stream;

pub use error::BodyError;
pub use stream::{BodyStream, OpenMode};

/// A message body.
///
/// A body either holds an exclusively owned [`BodyStream`] or is
/// unattached. Every stream operation on an unattached body fails with
/// [`BodyError::NoResource`]. Attaching hands back the previously held
/// stream so nothing is silently dropped.
///
/// # Example
///
/// ```
/// use velin::{Body, body::BodyStream};
///
/// let mut body = Body::from(BodyStream::with_bytes("hello world"));
/// assert_eq!(body.contents().unwrap(), "hello world");
/// ```
#[derive(Debug, Default)]
pub struct Body {
    stream: Option<BodyStream>,
    origin: Option<String>,
}

/// Anything a [`Body`] can be built from.
#[derive(Debug)]
pub enum BodySource {
    /// Take over the stream of another body.
    Body(Body),
    /// An already opened stream.
    Stream(BodyStream),
    /// Literal contents, loaded into an in-memory stream.
    Contents(Vec<u8>),
    /// A stream identifier, resolved by [`BodyStream::open`].
    Ident(String),
}

fn resolve(
    source: BodySource,
    mode: OpenMode,
) -> Result<(BodyStream, Option<String>), BodyError> {
    match source {
        BodySource::Body(mut body) => {
            let origin = body.origin.take();
            match body.stream.take() {
                Some(stream) => Ok((stream, origin)),
                None => Err(BodyError::InvalidSource("unattached body".to_owned())),
            }
        }
        BodySource::Stream(stream) => Ok((stream, None)),
        BodySource::Contents(bytes) => Ok((BodyStream::with_bytes(bytes), None)),
        BodySource::Ident(ident) => {
            let stream = BodyStream::open(&ident, mode)?;
            Ok((stream, Some(ident)))
        }
    }
}

impl Body {
    /// A body with no resource.
    pub fn unattached() -> Body {
        Body { stream: None, origin: None }
    }

    /// Build a body from any [`BodySource`], opening identifiers per
    /// `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`BodyError::InvalidSource`] when an identifier cannot be
    /// opened or the source body is unattached.
    pub fn from_source(
        source: impl Into<BodySource>,
        mode: OpenMode,
    ) -> Result<Body, BodyError> {
        let (stream, origin) = resolve(source.into(), mode)?;
        Ok(Body { stream: Some(stream), origin })
    }

    /// Replace the held stream, returning the previous one.
    ///
    /// # Errors
    ///
    /// Fails like [`Body::from_source`]; the current stream is kept on
    /// failure.
    pub fn attach(
        &mut self,
        source: impl Into<BodySource>,
        mode: OpenMode,
    ) -> Result<Option<BodyStream>, BodyError> {
        let (stream, origin) = resolve(source.into(), mode)?;
        crate::log::debug!("body: attach {:?}", origin.as_deref().unwrap_or("<anonymous>"));
        self.origin = origin;
        Ok(self.stream.replace(stream))
    }

    /// Hand the stream out, leaving the body unattached.
    pub fn detach(&mut self) -> Option<BodyStream> {
        self.origin = None;
        self.stream.take()
    }

    /// Drop the stream. Safe to call on an unattached body.
    pub fn close(&mut self) {
        if self.stream.take().is_some() {
            crate::log::debug!("body: close {:?}", self.origin.as_deref().unwrap_or("<anonymous>"));
        }
        self.origin = None;
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.stream.is_some()
    }

    /// The identifier this body was opened from, when there was one.
    #[inline]
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn readable(&self) -> bool {
        self.stream.as_ref().is_some_and(BodyStream::readable)
    }

    pub fn writable(&self) -> bool {
        self.stream.as_ref().is_some_and(BodyStream::writable)
    }

    pub fn seekable(&self) -> bool {
        self.stream.as_ref().is_some_and(BodyStream::seekable)
    }

    pub fn size(&self) -> Option<u64> {
        self.stream.as_ref().and_then(BodyStream::size)
    }

    fn stream_mut(&mut self) -> Result<&mut BodyStream, BodyError> {
        self.stream.as_mut().ok_or(BodyError::NoResource)
    }

    /// Read up to `len` bytes.
    pub fn read(&mut self, len: usize) -> Result<Bytes, BodyError> {
        self.stream_mut()?.read(len)
    }

    /// Everything remaining from the current position.
    ///
    /// # Errors
    ///
    /// Returns [`BodyError::NotReadable`] when unattached or the stream
    /// cannot be read.
    pub fn contents(&mut self) -> Result<Bytes, BodyError> {
        match self.stream.as_mut() {
            Some(stream) => stream.contents(),
            None => Err(BodyError::NotReadable),
        }
    }

    pub fn write(&mut self, data: &[u8]) -> Result<usize, BodyError> {
        self.stream_mut()?.write(data)
    }

    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64, BodyError> {
        self.stream_mut()?.seek(pos)
    }

    pub fn rewind(&mut self) -> Result<u64, BodyError> {
        self.stream_mut()?.rewind()
    }

    pub fn tell(&mut self) -> Result<u64, BodyError> {
        self.stream_mut()?.tell()
    }

    pub fn truncate(&mut self, size: u64) -> Result<(), BodyError> {
        self.stream_mut()?.truncate(size)
    }

    pub fn eof(&mut self) -> Result<bool, BodyError> {
        self.stream_mut()?.eof()
    }

    /// Best-effort textual rendering.
    ///
    /// Rewinds when possible, reads everything, and decodes lossily.
    /// Any failure yields an empty string instead of an error.
    pub fn to_string_lossy(&mut self) -> String {
        if !self.readable() {
            return String::new();
        }
        if self.seekable() && self.rewind().is_err() {
            return String::new();
        }
        match self.contents() {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(_) => String::new(),
        }
    }
}

impl From<BodyStream> for Body {
    fn from(stream: BodyStream) -> Self {
        Body { stream: Some(stream), origin: None }
    }
}

// ===== BodySource conversions =====

impl From<Body> for BodySource {
    fn from(body: Body) -> Self {
        BodySource::Body(body)
    }
}

impl From<BodyStream> for BodySource {
    fn from(stream: BodyStream) -> Self {
        BodySource::Stream(stream)
    }
}

impl From<Vec<u8>> for BodySource {
    fn from(contents: Vec<u8>) -> Self {
        BodySource::Contents(contents)
    }
}

impl From<&[u8]> for BodySource {
    fn from(contents: &[u8]) -> Self {
        BodySource::Contents(contents.to_vec())
    }
}

impl From<&str> for BodySource {
    fn from(ident: &str) -> Self {
        BodySource::Ident(ident.to_owned())
    }
}

impl From<String> for BodySource {
    fn from(ident: String) -> Self {
        BodySource::Ident(ident)
    }
}

#[cfg(test)]
mod test;
