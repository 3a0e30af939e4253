use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::errors::ExecutionError;

/// Parsed form of a captured request. Built once by the transcript parser
/// and shared read-only across all concurrent executions.
///
/// Headers keep the order of first occurrence; a duplicate header line in
/// the transcript overwrites the earlier value in place. Keys stay exactly
/// as captured, including case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RequestDescriptor {
    /// A transcript with no request line leaves the method empty; the error
    /// surfaces here, at request-construction time, not at parse time.
    pub fn method(&self) -> Result<reqwest::Method, ExecutionError> {
        reqwest::Method::from_bytes(self.method.as_bytes())
            .map_err(|_| ExecutionError::Request(format!("unknown http method {:?}", self.method)))
    }

    pub fn url(&self) -> Result<reqwest::Url, ExecutionError> {
        self.url
            .parse::<reqwest::Url>()
            .map_err(|e| ExecutionError::Request(format!("{e} @ {:?}", self.url)))
    }

    pub fn header_map(&self) -> Result<HeaderMap, ExecutionError> {
        let mut map = HeaderMap::new();
        for (key, value) in &self.headers {
            let name = HeaderName::try_from(key.as_str())
                .map_err(|_| ExecutionError::Request(format!("bad header name {key:?}")))?;
            let value = HeaderValue::try_from(value.as_str())
                .map_err(|_| ExecutionError::Request(format!("bad value for header {key:?}")))?;
            // insert, not append: captured headers replace transport defaults
            map.insert(name, value);
        }
        Ok(map)
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
