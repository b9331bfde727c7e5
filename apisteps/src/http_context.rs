use crate::{
    data::{RequestData, ResponseData},
    error::Error,
    http_client::HttpClient,
};
use std::sync::Arc;

/// The transport plus the last exchange made through it.
#[derive(Debug)]
pub struct HttpContext {
    http_client: Arc<dyn HttpClient + Send + Sync>,
    last_request: Option<RequestData>,
    last_response: Option<ResponseData>,
}

impl HttpContext {
    pub fn new(http_client: Arc<dyn HttpClient + Send + Sync>) -> Self {
        Self {
            http_client,
            last_request: None,
            last_response: None,
        }
    }

    pub fn http_client(&self) -> Arc<dyn HttpClient + Send + Sync> {
        self.http_client.clone()
    }

    pub fn last_request(&self) -> Result<&RequestData, Error> {
        self.last_request.as_ref().ok_or(Error::NoResponse)
    }

    pub fn last_response(&self) -> Result<&ResponseData, Error> {
        self.last_response.as_ref().ok_or(Error::NoResponse)
    }

    /// Reads the buffered body, as many times as needed.
    pub fn last_response_body(&self) -> Result<&[u8], Error> {
        self.last_response().map(|response| response.body.as_bytes())
    }

    pub(crate) fn set_last_exchange(&mut self, request: RequestData, response: ResponseData) {
        self.last_request = Some(request);
        self.last_response = Some(response);
    }

    pub(crate) fn clear(&mut self) {
        self.last_request = None;
        self.last_response = None;
    }
}
