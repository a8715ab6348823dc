use std::io;

/// A possible error value when operating on a [`Body`][super::Body].
#[derive(Debug)]
pub enum BodyError {
    /// Source cannot be coerced into a stream resource.
    InvalidSource(String),
    /// No resource is attached.
    NoResource,
    /// The stream's open mode does not allow reading.
    NotReadable,
    /// The stream's open mode or kind does not allow writing.
    NotWritable,
    /// The stream kind does not allow seeking.
    NotSeekable,
    /// The underlying stream operation failed.
    Io(io::Error),
}

impl std::error::Error for BodyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BodyError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for BodyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodyError::InvalidSource(reason) => write!(f, "invalid body source: {reason}"),
            BodyError::NoResource => f.write_str("no resource available"),
            BodyError::NotReadable => f.write_str("stream is not readable"),
            BodyError::NotWritable => f.write_str("stream is not writable"),
            BodyError::NotSeekable => f.write_str("stream is not seekable"),
            BodyError::Io(err) => write!(f, "stream I/O error: {err}"),
        }
    }
}

impl From<io::Error> for BodyError {
    fn from(err: io::Error) -> Self {
        BodyError::Io(err)
    }
}
