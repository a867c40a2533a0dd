//! The prepared, signed request handed to an HTTP transport.

use http::{HeaderMap, Method, Uri};

/// A fully signed outbound request: method, URL, and authentication headers.
///
/// Values are only constructed by the signer, all at once; there is no way
/// to obtain a partially populated descriptor.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    url: String,
    uri: Uri,
    headers: HeaderMap,
}

impl RequestDescriptor {
    pub(crate) fn new(url: String, uri: Uri, headers: HeaderMap) -> Self {
        Self {
            method: Method::GET,
            url,
            uri,
            headers,
        }
    }

    /// The HTTP method, always `GET`.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The request URL exactly as composed from the endpoint.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The parsed request URI.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// All request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Look up a header value by case-insensitive name.
    ///
    /// Returns `None` when the header is absent or its value is not visible ASCII.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Convert into an [`http::Request`] with an empty body.
    #[must_use]
    pub fn into_http_request(self) -> http::Request<()> {
        let mut request = http::Request::new(());
        *request.method_mut() = self.method;
        *request.uri_mut() = self.uri;
        *request.headers_mut() = self.headers;
        request
    }
}
