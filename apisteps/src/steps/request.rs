use crate::{
    data::{
        BodyHeaders, CacheValue, RequestData, LAST_HTTP_REQUEST_TIMESTAMP,
        LAST_HTTP_RESPONSE_TIMESTAMP,
    },
    error::Error,
    formatter::{Formatter, JsonFormatter},
    http_client::{parse_method, parse_url},
    util, State,
};
use chrono::Utc;
use std::collections::HashMap;
use tracing::{debug, info, warn};

impl State {
    /// Sends a request built from an envelope with `body` and `headers` keys.
    /// The body is always sent JSON encoded; use the prepared request steps
    /// to send a body in any other format.
    pub async fn i_send_request_to_with_body_and_headers(
        &mut self,
        method: &str,
        url_template: &str,
        body_template: &str,
    ) -> Result<(), Error> {
        let input = self.replace_template(body_template)?;
        let url = self.replace_template(url_template)?;

        let envelope = self.deserializer.deserialize(input.as_bytes())?;
        let body_and_headers: BodyHeaders = serde_json::from_value(envelope).map_err(|e| {
            Error::Deserialization(format!("expected body and headers, got:\n\n{}\n\n{}", input, e))
        })?;

        let mut request = Self::new_request(method, url)?;
        request.body = JsonFormatter::new().serialize(&body_and_headers.body)?;
        for (name, value) in body_and_headers.headers {
            request.set_header(name, value);
        }

        self.send(request).await
    }

    pub fn i_prepare_new_request_to_and_save_it_as(
        &self,
        method: &str,
        url_template: &str,
        cache_key: &str,
    ) -> Result<(), Error> {
        let url = self.replace_template(url_template)?;
        let request = Self::new_request(method, url)?;
        debug!(cache_key, method, url = %request.url, "prepared request");

        self.cache.save(cache_key, CacheValue::Request(request))
    }

    /// Headers are merged into the prepared ones, the last value of a name wins.
    pub fn i_set_following_headers_for_prepared_request(
        &self,
        cache_key: &str,
        headers_template: &str,
    ) -> Result<(), Error> {
        let headers = self.replace_template(headers_template)?;
        let headers_map: HashMap<String, String> = self
            .deserializer
            .deserialize(headers.as_bytes())
            .and_then(|value| Ok(serde_json::from_value(value)?))
            .map_err(|e| {
                Error::Deserialization(format!(
                    "could not parse provided headers:\n\n{}\n\n{}",
                    headers, e
                ))
            })?;

        let mut request = self.prepared_request(cache_key)?;
        for (name, value) in headers_map {
            request.set_header(name, value);
        }

        self.cache.save(cache_key, CacheValue::Request(request))
    }

    /// The body is sent as given, replacing any previous one.
    pub fn i_set_following_body_for_prepared_request(
        &self,
        cache_key: &str,
        body_template: &str,
    ) -> Result<(), Error> {
        let body = self.replace_template(body_template)?;

        let mut request = self.prepared_request(cache_key)?;
        request.body = body;

        self.cache.save(cache_key, CacheValue::Request(request))
    }

    /// A failed send leaves the prepared request untouched, so it may be retried.
    pub async fn i_send_request(&mut self, cache_key: &str) -> Result<(), Error> {
        let request = self.prepared_request(cache_key)?;
        self.send(request).await
    }

    fn new_request(method: &str, url: String) -> Result<RequestData, Error> {
        parse_method(method)?;
        parse_url(&url)?;

        Ok(RequestData::new(method, url))
    }

    fn prepared_request(&self, cache_key: &str) -> Result<RequestData, Error> {
        match self.cache.get_saved(cache_key)? {
            CacheValue::Request(request) => Ok(request),
            other => Err(Error::TypeMismatch(format!(
                "value under key {} in cache is not a prepared request: {}",
                cache_key, other
            ))),
        }
    }

    async fn send(&mut self, request: RequestData) -> Result<(), Error> {
        if self.debugger.is_on() {
            self.debugger.print(&util::curl_command(&request));
        }

        info!(method = %request.method, url = %request.url, "sending request");
        let http_client = self.http_context.http_client();
        let sent_at = Utc::now();
        self.cache
            .save(LAST_HTTP_REQUEST_TIMESTAMP, CacheValue::Time(sent_at))?;

        let response = http_client.make_request(&request).await.map_err(|e| {
            warn!(error = %e, "request failed");
            e
        })?;

        let received_at = Utc::now();
        self.cache
            .save(LAST_HTTP_RESPONSE_TIMESTAMP, CacheValue::Time(received_at))?;
        debug!(
            status_code = response.status_code,
            elapsed_ms = received_at.signed_duration_since(sent_at).num_milliseconds(),
            "received response"
        );

        self.http_context.set_last_exchange(request, response);
        self.print_last_response_body_if_debugging();

        Ok(())
    }
}
