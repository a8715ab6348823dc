//! `Set-Cookie` value object.
use std::{
    error::Error,
    fmt,
    time::SystemTime,
};

/// A cookie as rendered into a `Set-Cookie` header value.
///
/// Attributes follow [RFC 6265]: an optional `Expires` date in IMF-fixdate
/// form, optional `Path` and `Domain`, and the `Secure` and `HttpOnly`
/// flags. Only set attributes are rendered.
///
/// [RFC 6265]: <https://datatracker.ietf.org/doc/html/rfc6265#section-4.1>
///
/// # Example
///
/// ```
/// use velin::Cookie;
///
/// let mut cookie = Cookie::new("session", "opaque");
/// cookie.set_path("/").set_secure(true);
/// assert_eq!(cookie.to_string(), "session=opaque; Path=/; Secure");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cookie {
    name: String,
    value: String,
    expires: Option<String>,
    path: Option<String>,
    domain: Option<String>,
    secure: bool,
    http_only: bool,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Cookie {
        Cookie {
            name: name.into(),
            value: value.into(),
            expires: None,
            path: None,
            domain: None,
            secure: false,
            http_only: false,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The `Expires` attribute as rendered, when set.
    #[inline]
    pub fn expires(&self) -> Option<&str> {
        self.expires.as_deref()
    }

    #[inline]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    #[inline]
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    #[inline]
    pub fn is_secure(&self) -> bool {
        self.secure
    }

    #[inline]
    pub fn is_http_only(&self) -> bool {
        self.http_only
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn set_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.value = value.into();
        self
    }

    /// Set `Expires` from a timestamp, formatted as an IMF-fixdate.
    pub fn set_expires(&mut self, at: SystemTime) -> &mut Self {
        self.expires = Some(httpdate::fmt_http_date(at));
        self
    }

    /// Set `Expires` from a unix timestamp in seconds.
    pub fn set_expires_unix(&mut self, secs: u64) -> &mut Self {
        self.set_expires(SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(secs))
    }

    /// Set `Expires` from an already formatted date string.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCookieDate`] when `date` is not a valid HTTP date.
    pub fn set_expires_str(&mut self, date: &str) -> Result<&mut Self, InvalidCookieDate> {
        let at = httpdate::parse_http_date(date).map_err(|_| InvalidCookieDate {})?;
        Ok(self.set_expires(at))
    }

    pub fn clear_expires(&mut self) -> &mut Self {
        self.expires = None;
        self
    }

    pub fn set_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.path = Some(path.into());
        self
    }

    pub fn set_domain(&mut self, domain: impl Into<String>) -> &mut Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn set_secure(&mut self, secure: bool) -> &mut Self {
        self.secure = secure;
        self
    }

    pub fn set_http_only(&mut self, http_only: bool) -> &mut Self {
        self.http_only = http_only;
        self
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)?;
        if let Some(expires) = &self.expires {
            write!(f, "; Expires={expires}")?;
        }
        if let Some(path) = &self.path {
            write!(f, "; Path={path}")?;
        }
        if let Some(domain) = &self.domain {
            write!(f, "; Domain={domain}")?;
        }
        if self.secure {
            f.write_str("; Secure")?;
        }
        if self.http_only {
            f.write_str("; HttpOnly")?;
        }
        Ok(())
    }
}

// ===== Error =====

/// Error when a textual `Expires` date cannot be parsed.
#[non_exhaustive]
#[derive(Debug)]
pub struct InvalidCookieDate {}

impl Error for InvalidCookieDate {}

impl fmt::Display for InvalidCookieDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid cookie date")
    }
}

#[cfg(test)]
mod test {
    use std::time::{Duration, SystemTime};

    use super::Cookie;

    #[test]
    fn renders_name_value_only() {
        let cookie = Cookie::new("token", "abc123");
        assert_eq!(cookie.to_string(), "token=abc123");
    }

    #[test]
    fn renders_all_attributes() {
        let mut cookie = Cookie::new("session", "opaque");
        cookie
            .set_expires_str("Sun, 06 Nov 1994 08:49:37 GMT")
            .unwrap()
            .set_path("/app")
            .set_domain("example.com")
            .set_secure(true)
            .set_http_only(true);
        assert_eq!(
            cookie.to_string(),
            "session=opaque; Expires=Sun, 06 Nov 1994 08:49:37 GMT; \
             Path=/app; Domain=example.com; Secure; HttpOnly",
        );
    }

    #[test]
    fn expires_from_timestamp() {
        let epoch = SystemTime::UNIX_EPOCH + Duration::from_secs(784_111_777);
        let mut cookie = Cookie::new("t", "v");
        cookie.set_expires(epoch);
        assert_eq!(cookie.expires(), Some("Sun, 06 Nov 1994 08:49:37 GMT"));

        let mut from_secs = Cookie::new("t", "v");
        from_secs.set_expires_unix(784_111_777);
        assert_eq!(from_secs.expires(), cookie.expires());
    }

    #[test]
    fn rejects_bad_date() {
        let mut cookie = Cookie::new("t", "v");
        assert!(cookie.set_expires_str("next tuesday").is_err());
        assert_eq!(cookie.expires(), None);
    }

    #[test]
    fn clear_expires_drops_attribute() {
        let mut cookie = Cookie::new("t", "v");
        cookie.set_expires(SystemTime::UNIX_EPOCH);
        cookie.clear_expires();
        assert_eq!(cookie.to_string(), "t=v");
    }
}
