use crate::{
    body::{Body, BodyError, BodySource, BodyStream, OpenMode},
    header::{Header, Headers},
    map::Map,
    uri::{QueryParams, Uri},
};

/// An inbound HTTP request.
///
/// A thin composition of the value objects: [`Uri`], [`Headers`], a
/// read mode [`Body`] defaulting to process input, decoded form
/// [`QueryParams`], the cookie pairs sent by the client, and a [`Map`] of
/// free form attributes for intermediate layers.
#[derive(Debug)]
pub struct Request {
    method: String,
    uri: Uri,
    headers: Headers,
    body: Body,
    params: QueryParams,
    cookies: Vec<(String, String)>,
    attributes: Map,
}

impl Request {
    pub fn new(method: impl Into<String>, uri: Uri) -> Request {
        Request {
            method: method.into(),
            uri,
            headers: Headers::default(),
            body: Body::from(BodyStream::stdin()),
            params: QueryParams::default(),
            cookies: Vec::new(),
            attributes: Map::new(),
        }
    }

    #[inline]
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn set_method(&mut self, method: impl Into<String>) -> &mut Self {
        self.method = method.into();
        self
    }

    #[inline]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    #[inline]
    pub fn uri_mut(&mut self) -> &mut Uri {
        &mut self.uri
    }

    pub fn set_uri(&mut self, uri: Uri) -> &mut Self {
        self.uri = uri;
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

    #[inline]
    pub fn body(&self) -> &Body {
        &self.body
    }

    #[inline]
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Replace the body, opening identifier sources read only.
    ///
    /// # Errors
    ///
    /// Fails like [`Body::from_source`].
    pub fn set_body(&mut self, source: impl Into<BodySource>) -> Result<&mut Self, BodyError> {
        self.body = Body::from_source(source, OpenMode::READ)?;
        Ok(self)
    }

    #[inline]
    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// First decoded form value under `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(|v| v.as_str())
    }

    pub fn set_params(&mut self, params: QueryParams) -> &mut Self {
        self.params = params;
        self
    }

    /// The `name=value` pairs sent in the `Cookie` header, in order.
    #[inline]
    pub fn cookies(&self) -> &[(String, String)] {
        &self.cookies
    }

    pub fn cookie_value(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_cookies(
        &mut self,
        cookies: impl IntoIterator<Item = (String, String)>,
    ) -> &mut Self {
        self.cookies = cookies.into_iter().collect();
        self
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
