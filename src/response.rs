use crate::{
    body::{Body, BodyError, BodySource, BodyStream, OpenMode},
    cookie::Cookie,
    header::{Header, Headers},
    map::Map,
};

/// An outbound HTTP response.
///
/// Holds a status code, [`Headers`], the [`Cookie`]s to issue keyed by
/// name, and a [`Body`] backed by a read write in-memory scratch stream
/// unless replaced.
#[derive(Debug)]
pub struct Response {
    status: u16,
    headers: Headers,
    cookies: Vec<Cookie>,
    body: Body,
    attributes: Map,
}

impl Response {
    pub fn new(status: u16) -> Response {
        Response {
            status,
            headers: Headers::default(),
            cookies: Vec::new(),
            body: Body::from(BodyStream::memory(OpenMode::WRITE_PLUS)),
            attributes: Map::new(),
        }
    }

    #[inline]
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn set_status(&mut self, status: u16) -> &mut Self {
        self.status = status;
        self
    }

    #[inline]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    #[inline]
    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    /// Case insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&Header> {
        self.headers.get(name)
    }

    pub fn set_header(&mut self, header: Header) -> &mut Self {
        self.headers.set(header);
        self
    }

    pub fn remove_header(&mut self, name: &str) -> &mut Self {
        self.headers.remove(name);
        self
    }

    /// The cookies this response will issue.
    #[inline]
    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    pub fn cookie(&self, name: &str) -> Option<&Cookie> {
        self.cookies.iter().find(|c| c.name() == name)
    }

    /// Add a cookie, replacing any existing one with the same name.
    pub fn set_cookie(&mut self, cookie: Cookie) -> &mut Self {
        match self.cookies.iter_mut().find(|c| c.name() == cookie.name()) {
            Some(slot) => *slot = cookie,
            None => self.cookies.push(cookie),
        }
        self
    }

    #[inline]
    pub fn body(&self) -> &Body {
        &self.body
    }

    #[inline]
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Replace the body, opening identifier sources read write.
    ///
    /// # Errors
    ///
    /// Fails like [`Body::from_source`].
    pub fn set_body(&mut self, source: impl Into<BodySource>) -> Result<&mut Self, BodyError> {
        self.body = Body::from_source(source, OpenMode::WRITE_PLUS)?;
        Ok(self)
    }

    /// Append to the body at its current position.
    ///
    /// # Errors
    ///
    /// Fails like [`Body::write`].
    pub fn write(&mut self, data: impl AsRef<[u8]>) -> Result<&mut Self, BodyError> {
        self.body.write(data.as_ref())?;
        Ok(self)
    }

    #[inline]
    pub fn attributes(&self) -> &Map {
        &self.attributes
    }

    #[inline]
    pub fn attributes_mut(&mut self) -> &mut Map {
        &mut self.attributes
    }
}

impl Default for Response {
    fn default() -> Self {
        Response::new(200)
    }
}

#[cfg(test)]
mod test {
    use super::Response;
    use crate::{cookie::Cookie, header::Header};

    #[test]
    fn defaults_to_ok_with_scratch_body() {
        let resp = Response::default();
        assert_eq!(resp.status(), 200);
        assert!(resp.body().readable());
        assert!(resp.body().writable());
        assert_eq!(resp.body().size(), Some(0));
    }

    #[test]
    fn write_appends_and_reads_back() {
        let mut resp = Response::new(201);
        resp.write("created: ").unwrap().write("42").unwrap();
        assert_eq!(resp.body_mut().to_string_lossy(), "created: 42");
    }

    #[test]
    fn header_round_trip() {
        let mut resp = Response::new(200);
        resp.set_header(Header::new("content-type", "text/html").unwrap());
        assert_eq!(resp.header("Content-Type").unwrap().normalized_name(), "Content-Type");
        resp.remove_header("CONTENT-TYPE");
        assert!(resp.header("content-type").is_none());
    }

    #[test]
    fn cookies_replace_by_name() {
        let mut resp = Response::new(200);
        resp.set_cookie(Cookie::new("sid", "old"));
        resp.set_cookie(Cookie::new("theme", "dark"));
        resp.set_cookie(Cookie::new("sid", "new"));

        assert_eq!(resp.cookies().len(), 2);
        assert_eq!(resp.cookie("sid").unwrap().value(), "new");
        assert!(resp.cookie("absent").is_none());
    }

    #[test]
    fn body_can_be_replaced() {
        let mut resp = Response::new(200);
        resp.set_body("mem:page").unwrap();
        resp.write("<html/>").unwrap();
        assert_eq!(resp.body_mut().to_string_lossy(), "<html/>");
        assert_eq!(resp.body().origin(), Some("mem:page"));
    }
}
