use crate::{
    data::{RequestData, ResponseData},
    error::Error,
    util,
};
use async_trait::async_trait;
use reqwest::{header::HeaderMap, Method, Url};
use std::fmt::Debug;

pub const DEFAULT_USER_AGENT: &str = "apisteps";

#[async_trait]
pub trait HttpClient: Debug {
    async fn make_request(&self, request_data: &RequestData) -> Result<ResponseData, Error>;
}

#[derive(Debug)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Accepts invalid certificates, API test targets often run with self-signed ones.
    pub fn new() -> Result<Self, Error> {
        Self::with_options(true, DEFAULT_USER_AGENT)
    }

    /// Fails when the user agent is not a valid header value or the TLS
    /// backend can not be initialized.
    pub fn with_options<S: AsRef<str>>(
        accept_invalid_certs: bool,
        user_agent: S,
    ) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(accept_invalid_certs)
            .user_agent(user_agent.as_ref())
            .build()
            .map_err(|e| {
                Error::InvalidArgument(format!(
                    "could not build HTTP client with user agent `{}`: {}",
                    user_agent.as_ref(),
                    e
                ))
            })?;

        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn make_request(&self, request_data: &RequestData) -> Result<ResponseData, Error> {
        let method = parse_method(&request_data.method)?;
        let url = parse_url(&request_data.url)?;

        let mut headers = HeaderMap::new();
        util::put_headers(&mut headers, &request_data.headers)?;

        let mut request_builder = self.client.request(method, url).headers(headers);
        if !request_data.body.is_empty() {
            request_builder = request_builder.body(request_data.body.clone());
        }

        let response = request_builder.send().await?;

        let status_code = response.status().as_u16();
        let headers = util::extract_headers(response.headers());
        let body = response.bytes().await?;

        Ok(ResponseData {
            status_code,
            headers,
            body: String::from_utf8_lossy(&body).into(),
        })
    }
}

pub(crate) fn parse_method(method: &str) -> Result<Method, Error> {
    Method::from_bytes(method.as_bytes())
        .map_err(|e| Error::InvalidRequest(format!("method `{}`: {}", method, e)))
}

pub(crate) fn parse_url(url: &str) -> Result<Url, Error> {
    Url::parse(url).map_err(|e| Error::InvalidRequest(format!("url `{}`: {}", url, e)))
}
