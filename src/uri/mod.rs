//! Uniform Resource Identifier ([RFC 3986])
//!
//! [RFC 3986]: <https://datatracker.ietf.org/doc/html/rfc3986>
//!
//! [`Uri`] holds the seven generic syntax components as plain strings, plus
//! the query decomposed into ordered [`QueryParams`]. Composite views over
//! them, the user-info, the authority and the full URI string, are derived
//! lazily and memoized until a setter touches one of their inputs.
//!
//! # Percent Encoding
//!
//! Components are stored as given. Only the query codec in [`QueryParams`]
//! decodes and encodes percent escapes; everything else passes through
//! untouched so that parse/assemble round-trips are stable.
use std::cell::OnceCell;

mod matches;
mod parser;
mod query;
mod error;

#[cfg(test)]
mod test;

pub use error::UriError;
pub use query::{QueryParams, QueryValue};

/// Registered default ports, consulted by the authority logic only.
const SCHEMES: &[(&str, &str)] = &[
    ("http", "80"),
    ("https", "443"),
];

fn default_port(scheme: &str) -> Option<&'static str> {
    SCHEMES
        .iter()
        .find(|(name, _)| *name == scheme)
        .map(|(_, port)| *port)
}

/// URI Generic Syntax ([RFC 3986])
///
/// [RFC 3986]: <https://datatracker.ietf.org/doc/html/rfc3986>
///
/// # Syntax Component
///
/// The following is an example URI and its component parts:
///
/// ```not_rust
///   foo://user:pw@example.com:8042/over/there?name=ferret#nose
///   \_/   \_____________________/\_________/ \_________/ \__/
///    |               |                |           |        |
/// scheme         authority           path       query   fragment
/// ```
///
/// Every component getter is total: an unset component reads as the empty
/// string. Setters mutate in place and return `&mut Self` so calls can be
/// chained.
///
/// ```
/// use velin::Uri;
///
/// let mut uri = Uri::parse("http://example.com/a/b?x=1")?;
/// uri.set_scheme("https").set_port(8443u16);
/// assert_eq!(uri.as_str(), "https://example.com:8443/a/b?x=1");
/// # Ok::<(), velin::uri::UriError>(())
/// ```
#[derive(Clone)]
pub struct Uri {
    scheme: String,
    username: String,
    password: String,
    host: String,
    /// Kept as a string to preserve leading zeros, and to keep "empty"
    /// distinct from any numeric value.
    port: String,
    path: String,
    query: String,
    query_params: QueryParams,
    fragment: String,

    // memoized derived strings, cleared by the setters feeding them
    uri_string: OnceCell<String>,
    user_info: OnceCell<String>,
    authority: OnceCell<String>,
}

impl Uri {
    /// Create a [`Uri`] with every component empty.
    pub fn new() -> Uri {
        Uri {
            scheme: String::new(),
            username: String::new(),
            password: String::new(),
            host: String::new(),
            port: String::new(),
            path: String::new(),
            query: String::new(),
            query_params: QueryParams::new(),
            fragment: String::new(),
            uri_string: OnceCell::new(),
            user_info: OnceCell::new(),
            authority: OnceCell::new(),
        }
    }

    /// Parse a URI string into its components.
    ///
    /// # Errors
    ///
    /// Returns [`UriError::InvalidFormat`] if the input cannot be decomposed,
    /// contains malformed percent escapes, or contains characters illegal for
    /// the component they appear in.
    pub fn parse(input: &str) -> Result<Uri, UriError> {
        let parts = match parser::split(input) {
            Ok(parts) => parts,
            Err(err) => {
                crate::log::warning!("uri parse failed: {err}");
                return Err(err);
            }
        };
        let mut uri = Uri::new();
        uri.set_scheme(parts.scheme)
            .set_username(parts.username)
            .set_password(parts.password)
            .set_host(parts.host)
            .set_port(parts.port)
            .set_path(parts.path)
            .set_query(parts.query)
            .set_fragment(parts.fragment);
        Ok(uri)
    }

    /// Build a [`Uri`] from `(name, value)` component pairs.
    ///
    /// Recognized names are `scheme`, `username`, `password`, `host`, `port`,
    /// `path`, `query`, `query_params` and `fragment`. Each pair is applied
    /// through the corresponding setter, so derived fields stay coherent.
    ///
    /// # Errors
    ///
    /// Returns [`UriError::InvalidComponent`] for an unrecognized name, or
    /// for `query_params` paired with anything but [`QueryParams`].
    pub fn from_components<I, K, V>(components: I) -> Result<Uri, UriError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<ComponentValue>,
    {
        let mut uri = Uri::new();
        uri.set_components(components)?;
        Ok(uri)
    }

    /// Apply `(name, value)` component pairs in order.
    ///
    /// See [`Uri::from_components`].
    pub fn set_components<I, K, V>(&mut self, components: I) -> Result<&mut Self, UriError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<ComponentValue>,
    {
        use ComponentValue::{Params, Text};

        for (key, value) in components {
            match (key.as_ref(), value.into()) {
                ("scheme", Text(v)) => self.set_scheme(v),
                ("username", Text(v)) => self.set_username(v),
                ("password", Text(v)) => self.set_password(v),
                ("host", Text(v)) => self.set_host(v),
                ("port", Text(v)) => self.set_port(v),
                ("path", Text(v)) => self.set_path(v),
                ("query", Text(v)) => self.set_query(v),
                ("query_params", Params(v)) => self.set_query_params(v),
                ("fragment", Text(v)) => self.set_fragment(v),
                (key, _) => return Err(UriError::InvalidComponent(key.to_owned())),
            };
        }
        Ok(self)
    }

    // ===== Primary components =====

    #[inline]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn set_scheme(&mut self, scheme: impl IntoComponent) -> &mut Self {
        self.uri_string.take();
        self.authority.take();
        self.scheme = scheme.into_component();
        self
    }

    #[inline]
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn set_username(&mut self, username: impl IntoComponent) -> &mut Self {
        self.uri_string.take();
        self.user_info.take();
        self.authority.take();
        self.username = username.into_component();
        self
    }

    #[inline]
    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn set_password(&mut self, password: impl IntoComponent) -> &mut Self {
        self.uri_string.take();
        self.user_info.take();
        self.authority.take();
        self.password = password.into_component();
        self
    }

    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn set_host(&mut self, host: impl IntoComponent) -> &mut Self {
        self.uri_string.take();
        self.authority.take();
        self.host = host.into_component();
        self
    }

    /// Returns the port exactly as set, which may be empty.
    #[inline]
    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn set_port(&mut self, port: impl IntoComponent) -> &mut Self {
        self.uri_string.take();
        self.authority.take();
        self.port = port.into_component();
        self
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_path(&mut self, path: impl IntoComponent) -> &mut Self {
        self.uri_string.take();
        self.path = path.into_component();
        self
    }

    /// Returns the raw query string, without the leading `?`.
    #[inline]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Store the raw query string and re-derive [`QueryParams`] from it by
    /// form-decoding.
    pub fn set_query(&mut self, query: impl IntoComponent) -> &mut Self {
        self.uri_string.take();
        self.query = query.into_component();
        self.query_params = QueryParams::parse(&self.query);
        self
    }

    #[inline]
    pub fn query_params(&self) -> &QueryParams {
        &self.query_params
    }

    /// Store parameters and re-derive the raw query string from them by
    /// form-encoding, preserving their order.
    pub fn set_query_params(&mut self, params: QueryParams) -> &mut Self {
        self.uri_string.take();
        self.query = params.encode();
        self.query_params = params;
        self
    }

    #[inline]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn set_fragment(&mut self, fragment: impl IntoComponent) -> &mut Self {
        self.uri_string.take();
        self.fragment = fragment.into_component();
        self
    }

    // ===== Derived components =====

    /// Returns `username[:password]`, or the empty string when the username
    /// is empty.
    pub fn user_info(&self) -> &str {
        self.user_info.get_or_init(|| {
            if self.username.is_empty() {
                String::new()
            } else if self.password.is_empty() {
                self.username.clone()
            } else {
                let mut info = String::with_capacity(self.username.len() + self.password.len() + 1);
                info.push_str(&self.username);
                info.push(':');
                info.push_str(&self.password);
                info
            }
        })
    }

    /// Returns the port as rendered inside the authority.
    ///
    /// The port shows only when it is set and differs from the scheme's
    /// registered default. A scheme without a registered default always shows
    /// its port, otherwise `scheme://host:port` would not survive a
    /// parse/assemble round trip.
    pub fn authority_port(&self) -> &str {
        let show = !self.port.is_empty()
            && match default_port(&self.scheme) {
                Some(default) => default != self.port,
                None => true,
            };
        if show { &self.port } else { "" }
    }

    /// Returns `userinfo@host:port`, omitting the `@` when the user-info is
    /// empty and the `:port` when [`authority_port`][Uri::authority_port]
    /// renders empty.
    pub fn authority(&self) -> &str {
        self.authority.get_or_init(|| {
            let user_info = self.user_info();
            let port = self.authority_port();
            let mut authority = String::new();
            if !user_info.is_empty() {
                authority.push_str(user_info);
                authority.push('@');
            }
            authority.push_str(&self.host);
            if !port.is_empty() {
                authority.push(':');
                authority.push_str(port);
            }
            authority
        })
    }

    /// Returns the explicit port as a number, falling back to the scheme's
    /// registered default.
    pub fn port_number(&self) -> Option<u16> {
        if !self.port.is_empty() {
            return self.port.parse().ok();
        }
        default_port(&self.scheme)?.parse().ok()
    }

    /// Extracts the assembled URI string.
    ///
    /// Assembled on first read and memoized until any setter runs.
    pub fn as_str(&self) -> &str {
        self.uri_string.get_or_init(|| self.assemble())
    }

    fn assemble(&self) -> String {
        let authority = self.authority();
        let mut uri = String::new();
        if !self.scheme.is_empty() {
            uri.push_str(&self.scheme);
            uri.push(':');
        }
        let rooted = !authority.is_empty() || !self.scheme.is_empty();
        if rooted {
            uri.push_str("//");
            uri.push_str(authority);
            if !self.path.starts_with('/') {
                uri.push('/');
            }
        }
        uri.push_str(&self.path);
        if !self.query.is_empty() {
            uri.push('?');
            uri.push_str(&self.query);
        }
        if !self.fragment.is_empty() {
            uri.push('#');
            uri.push_str(&self.fragment);
        }
        uri
    }

    /// Flatten every primary and derived component into one owned snapshot.
    ///
    /// Recomputes on each call; only useful for introspection and debugging.
    pub fn snapshot(&self) -> UriParts {
        UriParts {
            scheme: self.scheme.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            user_info: self.user_info().to_owned(),
            host: self.host.clone(),
            port: self.port.clone(),
            port_number: self.port_number(),
            authority_port: self.authority_port().to_owned(),
            authority: self.authority().to_owned(),
            path: self.path.clone(),
            query: self.query.clone(),
            query_params: self.query_params.clone(),
            fragment: self.fragment.clone(),
        }
    }
}

/// Flattened [`Uri`] snapshot returned from [`Uri::snapshot`].
#[derive(Clone, Debug, PartialEq)]
pub struct UriParts {
    pub scheme: String,
    pub username: String,
    pub password: String,
    pub user_info: String,
    pub host: String,
    pub port: String,
    pub port_number: Option<u16>,
    pub authority_port: String,
    pub authority: String,
    pub path: String,
    pub query: String,
    pub query_params: QueryParams,
    pub fragment: String,
}

// ===== Conversions =====

/// Conversion into a URI component string.
///
/// Implemented for strings, and for unsigned integers so numeric ports can be
/// passed directly.
pub trait IntoComponent {
    fn into_component(self) -> String;
}

impl IntoComponent for String {
    #[inline]
    fn into_component(self) -> String {
        self
    }
}

impl IntoComponent for &String {
    #[inline]
    fn into_component(self) -> String {
        self.clone()
    }
}

impl IntoComponent for &str {
    #[inline]
    fn into_component(self) -> String {
        self.to_owned()
    }
}

impl IntoComponent for u16 {
    #[inline]
    fn into_component(self) -> String {
        itoa::Buffer::new().format(self).to_owned()
    }
}

impl IntoComponent for u32 {
    #[inline]
    fn into_component(self) -> String {
        itoa::Buffer::new().format(self).to_owned()
    }
}

/// A value paired with a component name in [`Uri::set_components`].
#[derive(Clone, Debug)]
pub enum ComponentValue {
    Text(String),
    Params(QueryParams),
}

impl From<&str> for ComponentValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ComponentValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u16> for ComponentValue {
    fn from(value: u16) -> Self {
        Self::Text(value.into_component())
    }
}

impl From<QueryParams> for ComponentValue {
    fn from(value: QueryParams) -> Self {
        Self::Params(value)
    }
}

// ===== Traits =====

impl Default for Uri {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl std::str::FromStr for Uri {
    type Err = UriError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Uri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Debug for Uri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Uri")
            .field("scheme", &self.scheme)
            .field("username", &self.username)
            .field("password", &self.password)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("fragment", &self.fragment)
            .finish()
    }
}

impl PartialEq for Uri {
    /// Compares primary components only; memoized state never participates.
    fn eq(&self, other: &Self) -> bool {
        self.scheme == other.scheme
            && self.username == other.username
            && self.password == other.password
            && self.host == other.host
            && self.port == other.port
            && self.path == other.path
            && self.query == other.query
            && self.fragment == other.fragment
    }
}

impl Eq for Uri {}
