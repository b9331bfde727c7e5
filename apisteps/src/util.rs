use crate::{data::RequestData, error::Error};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;

pub fn extract_headers(header_map: &HeaderMap) -> HashMap<String, String> {
    // non UTF-8 bytes are replaced, first value wins
    let mut headers = HashMap::new();
    for (key, value) in header_map {
        headers
            .entry(String::from(key.as_str()))
            .or_insert_with(|| String::from_utf8_lossy(value.as_bytes()).into_owned());
    }

    headers
}

pub fn put_headers<'a, I: IntoIterator<Item = (&'a String, &'a String)>>(
    header_map: &mut HeaderMap<HeaderValue>,
    headers: I,
) -> Result<(), Error> {
    for (key, value) in headers {
        let header_name = HeaderName::from_bytes(key.to_lowercase().as_bytes())
            .map_err(|e| Error::InvalidRequest(format!("header name `{}`: {}", key, e)))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| Error::InvalidRequest(format!("value of header `{}`: {}", key, e)))?;
        header_map.insert(header_name, header_value);
    }

    Ok(())
}

/// Renders the request as a shell command line, e.g.
/// `curl -X 'POST' -d '{"a":1}' -H 'content-type: application/json' 'http://host/path'`.
pub fn curl_command(request: &RequestData) -> String {
    let mut command = format!("curl -X {}", shell_quote(&request.method));

    if !request.body.is_empty() {
        command.push_str(&format!(" -d {}", shell_quote(&request.body)));
    }

    let mut headers = request.headers.iter().collect::<Vec<_>>();
    headers.sort();
    for (name, value) in headers {
        command.push_str(&format!(" -H {}", shell_quote(&format!("{}: {}", name, value))));
    }

    command.push_str(&format!(" {}", shell_quote(&request.url)));
    command
}

fn shell_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}
