/// An error returned when constructing or renaming a [`Header`] with an
/// empty name.
///
/// [`Header`]: crate::header::Header
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct InvalidHeaderName {}

impl std::error::Error for InvalidHeaderName {}

impl std::fmt::Display for InvalidHeaderName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("empty header name")
    }
}
