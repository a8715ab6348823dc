/// A possible error value when working with [`Uri`][super::Uri].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UriError {
    /// Input cannot be decomposed into URI components.
    InvalidFormat,
    /// Component name is not one of the recognized components.
    InvalidComponent(String),
}

impl std::error::Error for UriError {}

impl std::fmt::Display for UriError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UriError::InvalidFormat => f.write_str("invalid URI format"),
            UriError::InvalidComponent(name) => {
                write!(f, "no URI component named `{name}`")
            }
        }
    }
}
