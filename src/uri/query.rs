use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Form escape set: RFC 3986 unreserved characters stay bare, space is
/// special-cased to `+` by the codec.
const FORM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Ordered query parameters, form-decoded from a raw query string.
///
/// Keys map to either a single value or a list. During decoding a repeated
/// plain key replaces its previous value, while a `[]`-suffixed key appends
/// to a list under the base name:
///
/// ```
/// use velin::uri::{QueryParams, QueryValue};
///
/// let params = QueryParams::parse("a=1&a=2&b%5B%5D=x&b%5B%5D=y");
/// assert_eq!(params.get("a"), Some(&QueryValue::One("2".into())));
/// assert_eq!(params.get("b"), Some(&QueryValue::Many(vec!["x".into(), "y".into()])));
/// ```
///
/// [`encode`][QueryParams::encode] is the inverse, preserving key order and
/// rendering list entries as repeated `key[]=` pairs, so decode/encode round
/// trips are stable.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct QueryParams {
    pairs: Vec<(String, QueryValue)>,
}

/// A single parameter value, scalar or list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryValue {
    One(String),
    Many(Vec<String>),
}

impl QueryParams {
    #[inline]
    pub fn new() -> QueryParams {
        QueryParams { pairs: Vec::new() }
    }

    /// Form-decode a raw query string.
    ///
    /// Decoding is total: junk segments decode to empty keys or values
    /// rather than failing. Anything up to a leading `?` is dropped when no
    /// `=` precedes it, so a full `path?query` tail can be fed through.
    pub fn parse(query: &str) -> QueryParams {
        let query = match query.find('?') {
            Some(pos) if !query[..pos].contains('=') => &query[pos + 1..],
            _ => query,
        };

        let mut params = QueryParams::new();
        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (key, value),
                None => (pair, ""),
            };
            let key = decode(key);
            let value = decode(value);
            match key.find('[') {
                Some(pos) => params.append(&key[..pos], value),
                None => params.insert(key, value),
            };
        }
        params
    }

    /// Form-encode back into a raw query string.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.pairs {
            match value {
                QueryValue::One(value) => push_pair(&mut out, name, false, value),
                QueryValue::Many(list) => {
                    for value in list {
                        push_pair(&mut out, name, true, value);
                    }
                }
            }
        }
        out
    }

    pub fn get(&self, name: &str) -> Option<&QueryValue> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Set `name` to a single value, replacing whatever it held.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = QueryValue::One(value.into());
        match self.pairs.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.pairs.push((name, value)),
        }
        self
    }

    /// Append a value to the list under `name`.
    ///
    /// A scalar already present is promoted to a list keeping its value.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(key, _)| *key == name) {
            Some((_, QueryValue::Many(list))) => list.push(value),
            Some((_, slot)) => {
                let QueryValue::One(first) = std::mem::replace(slot, QueryValue::Many(Vec::new()))
                else {
                    unreachable!()
                };
                *slot = QueryValue::Many(vec![first, value]);
            }
            None => self.pairs.push((name, QueryValue::Many(vec![value]))),
        }
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<QueryValue> {
        let pos = self.pairs.iter().position(|(key, _)| key == name)?;
        Some(self.pairs.remove(pos).1)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.pairs.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl QueryValue {
    /// Returns the scalar value, or [`None`] for a list.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            QueryValue::One(value) => Some(value),
            QueryValue::Many(_) => None,
        }
    }

    /// Returns all values as a slice, a scalar counting as one.
    pub fn as_slice(&self) -> &[String] {
        match self {
            QueryValue::One(value) => std::slice::from_ref(value),
            QueryValue::Many(list) => list,
        }
    }
}

// ===== Codec =====

fn push_pair(out: &mut String, name: &str, list: bool, value: &str) {
    if !out.is_empty() {
        out.push('&');
    }
    out.push_str(&encode_component(name));
    if list {
        // encoded brackets, a literal `[` is not a valid query character
        out.push_str("%5B%5D");
    }
    out.push('=');
    out.push_str(&encode_component(value));
}

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, FORM).to_string().replace("%20", "+")
}

fn decode(value: &str) -> String {
    let value = value.replace('+', " ");
    percent_decode_str(&value).decode_utf8_lossy().into_owned()
}

// ===== Traits =====

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl std::fmt::Display for QueryParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}
