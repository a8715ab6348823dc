//! HTTP Header Fields.
//!
//! [`Header`] is one logical field: the name as supplied, its canonical
//! Train-Case form, and an ordered list of values. [`Headers`] is the
//! message-side collection, keyed by the canonical name so lookups are
//! case-insensitive.
mod error;

#[cfg(test)]
mod test;

pub use error::InvalidHeaderName;

/// Canonicalize a header name to Train-Case.
///
/// Lowercases, then ASCII-capitalizes the first character of every
/// hyphen-delimited segment: `content-type` becomes `Content-Type`,
/// `X-REQUEST-id` becomes `X-Request-Id`. Pure, and used for every lookup
/// key, so header access is insensitive to the casing callers picked.
pub fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut segment_start = true;
    for ch in name.chars() {
        if ch == '-' {
            normalized.push('-');
            segment_start = true;
        } else if segment_start {
            normalized.push(ch.to_ascii_uppercase());
            segment_start = false;
        } else {
            normalized.push(ch.to_ascii_lowercase());
        }
    }
    normalized
}

/// One HTTP header field with one or more values.
///
/// ```
/// use velin::Header;
///
/// let header = Header::new("content-type", "text/html")?;
/// assert_eq!(header.normalized_name(), "Content-Type");
/// assert_eq!(header.to_wire(), "Content-Type: text/html");
/// # Ok::<(), velin::header::InvalidHeaderName>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    name: String,
    normalized: String,
    values: Vec<String>,
}

impl Header {
    /// Create a header field.
    ///
    /// A scalar value is promoted to a one-element list via [`Values`].
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHeaderName`] when `name` is empty.
    pub fn new(name: impl Into<String>, value: impl Into<Values>) -> Result<Header, InvalidHeaderName> {
        let mut header = Header {
            name: String::new(),
            normalized: String::new(),
            values: value.into().0,
        };
        header.set_name(name)?;
        Ok(header)
    }

    /// Create a value-less flag header, rendered as `Name: 1`.
    pub fn flag(name: impl Into<String>) -> Result<Header, InvalidHeaderName> {
        Header::new(name, Values(Vec::new()))
    }

    /// Returns the name as supplied.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the canonical Train-Case name.
    #[inline]
    pub fn normalized_name(&self) -> &str {
        &self.normalized
    }

    /// Rename the field, re-deriving the canonical name.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHeaderName`] when `name` is empty.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<&mut Self, InvalidHeaderName> {
        let name = name.into();
        if name.is_empty() {
            return Err(InvalidHeaderName {});
        }
        self.normalized = normalize_name(&name);
        self.name = name;
        Ok(self)
    }

    #[inline]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Returns the first value, if any.
    #[inline]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Replace all values.
    pub fn set_value(&mut self, value: impl Into<Values>) -> &mut Self {
        self.values = value.into().0;
        self
    }

    /// Append a value, e.g. another `Set-Cookie`.
    pub fn add_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.values.push(value.into());
        self
    }

    /// Serialize to wire format.
    ///
    /// An empty value list renders `Name: 1`, a legacy flag-header notation
    /// kept for compatibility, not a general HTTP convention.
    ///
    /// Values fold to one `Name: value` line each, CRLF-separated, when the
    /// field is `Set-Cookie` or any value contains a comma; a comma inside a
    /// value (a cookie expiry date, say) would be ambiguous once
    /// comma-joined, and multiple cookies must stay on separate lines
    /// regardless. Everything else joins on a single `Name: v1, v2` line.
    pub fn to_wire(&self) -> String {
        if self.values.is_empty() {
            let mut line = self.normalized.clone();
            line.push_str(": 1");
            return line;
        }

        let comma_safe = self.normalized != "Set-Cookie"
            && !self.values.iter().any(|value| value.contains(','));

        let sep = if comma_safe { ", " } else { "\r\n" };
        let mut wire = String::new();
        for value in &self.values {
            if !wire.is_empty() {
                wire.push_str(sep);
            }
            if !comma_safe || wire.is_empty() {
                wire.push_str(&self.normalized);
                wire.push_str(": ");
            }
            wire.push_str(value);
        }
        wire
    }
}

impl std::fmt::Display for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_wire())
    }
}

// ===== Values =====

/// One-or-more header values; scalars promote to a one-element list.
#[derive(Clone, Debug, Default)]
pub struct Values(Vec<String>);

impl From<&str> for Values {
    fn from(value: &str) -> Self {
        Values(vec![value.to_owned()])
    }
}

impl From<String> for Values {
    fn from(value: String) -> Self {
        Values(vec![value])
    }
}

impl From<Vec<String>> for Values {
    fn from(values: Vec<String>) -> Self {
        Values(values)
    }
}

impl From<&[&str]> for Values {
    fn from(values: &[&str]) -> Self {
        Values(values.iter().map(|value| (*value).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Values {
    fn from(values: [&str; N]) -> Self {
        Values(values.map(str::to_owned).into())
    }
}

// ===== Headers =====

/// Ordered header collection addressed by canonical name.
///
/// [`set`][Headers::set] replaces an existing field whose canonical name
/// matches, so inserting `content-length` over `Content-Length` never
/// duplicates.
#[derive(Clone, Debug, Default)]
pub struct Headers {
    fields: Vec<Header>,
}

impl Headers {
    #[inline]
    pub fn new() -> Headers {
        Headers { fields: Vec::new() }
    }

    pub fn get(&self, name: &str) -> Option<&Header> {
        let name = normalize_name(name);
        self.fields.iter().find(|field| field.normalized == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Header> {
        let name = normalize_name(name);
        self.fields.iter_mut().find(|field| field.normalized == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert a field, replacing any field with the same canonical name.
    pub fn set(&mut self, header: Header) -> &mut Self {
        match self
            .fields
            .iter_mut()
            .find(|field| field.normalized == header.normalized)
        {
            Some(slot) => *slot = header,
            None => self.fields.push(header),
        }
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<Header> {
        let name = normalize_name(name);
        let pos = self.fields.iter().position(|field| field.normalized == name)?;
        Some(self.fields.remove(pos))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Header> {
        self.fields.iter()
    }

    /// Serialize every field, CRLF-separated.
    pub fn to_wire(&self) -> String {
        let mut wire = String::new();
        for field in &self.fields {
            if !wire.is_empty() {
                wire.push_str("\r\n");
            }
            wire.push_str(&field.to_wire());
        }
        wire
    }
}

impl FromIterator<Header> for Headers {
    fn from_iter<I: IntoIterator<Item = Header>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for header in iter {
            headers.set(header);
        }
        headers
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = &'a Header;

    type IntoIter = std::slice::Iter<'a, Header>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
