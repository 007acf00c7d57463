//! Platform-abstracted HTTP client with Send-safe futures.
//!
//! On WASM, `reqwest::Response` is not `Send` because it wraps JS types
//! (`JsValue`, `JsFuture`, ...). To keep every request future `Send`:
//! - On **native**: reqwest is awaited directly.
//! - On **WASM**: the request runs on the JS thread via
//!   `wasm_bindgen_futures::spawn_local` and the result comes back through a
//!   `flume` channel.
//!
//! Responses are reduced to [`Response`], which owns only plain data.

use std::collections::HashMap;

use crate::payload::PayloadPart;

/// A simplified HTTP response that contains only Send-safe data.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers (lowercased keys)
    pub headers: HashMap<String, String>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

impl Response {
    /// Returns true if the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(|s| s.as_str())
    }

    /// Attempt to deserialize the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// HTTP client error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("HTTP error: {message}")]
pub struct HttpError {
    pub message: String,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result type for HTTP operations.
pub type HttpResult<T> = Result<T, HttpError>;

/// A builder for `multipart/form-data` POST requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    url: String,
    headers: HashMap<String, String>,
    /// The boundary header is set by the transport.
    parts: Vec<PayloadPart>,
}

impl RequestBuilder {
    fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            parts: Vec::new(),
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add the header only when `value` is present.
    pub fn header_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.header(name, value),
            None => self,
        }
    }

    /// Set the multipart parts, in send order.
    pub fn multipart(mut self, parts: Vec<PayloadPart>) -> Self {
        self.parts = parts;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send the request and return a Send-safe future.
    pub async fn send(self) -> HttpResult<Response> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            execute(self.url, self.headers, self.parts).await
        }

        #[cfg(target_arch = "wasm32")]
        {
            self.send_wasm().await
        }
    }

    #[cfg(target_arch = "wasm32")]
    async fn send_wasm(self) -> HttpResult<Response> {
        // flume channels are Send-safe, so awaiting the receiver keeps this future Send.
        let (tx, rx) = flume::bounded::<HttpResult<Response>>(1);

        let Self {
            url,
            headers,
            parts,
        } = self;

        // This closure is NOT Send, but spawn_local doesn't require Send
        wasm_bindgen_futures::spawn_local(async move {
            let result = execute(url, headers, parts).await;
            // Receiver may be gone if the caller was dropped.
            let _ = tx.send_async(result).await;
        });

        rx.recv_async()
            .await
            .map_err(|_| HttpError::new("Request cancelled"))?
    }
}

async fn execute(
    url: String,
    headers: HashMap<String, String>,
    parts: Vec<PayloadPart>,
) -> HttpResult<Response> {
    let mut request = reqwest::Client::new()
        .post(&url)
        .multipart(multipart_form(parts)?);

    for (name, value) in &headers {
        request = request.header(name, value);
    }

    let response = request
        .send()
        .await
        .map_err(|e| HttpError::new(e.to_string()))?;

    // Extract status and headers before consuming the response
    let status = response.status().as_u16();
    let mut response_headers = HashMap::new();
    for (name, value) in response.headers() {
        if let Ok(v) = value.to_str() {
            response_headers.insert(name.as_str().to_lowercase(), v.to_owned());
        }
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| HttpError::new(e.to_string()))?
        .to_vec();

    Ok(Response {
        status,
        headers: response_headers,
        body,
    })
}

fn multipart_form(parts: Vec<PayloadPart>) -> HttpResult<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        form = match part {
            PayloadPart::Text { name, value } => form.text(name, value),
            PayloadPart::File {
                name,
                file_name,
                mime_type,
                bytes,
            } => {
                let file = reqwest::multipart::Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&mime_type)
                    .map_err(|e| HttpError::new(format!("invalid MIME type {mime_type}: {e}")))?;
                form.part(name, file)
            }
        };
    }
    Ok(form)
}

/// HTTP client with Send-safe futures on all platforms.
///
/// ```ignore
/// let response = Client::post("https://portal.example.com/users/create")
///     .header("Authorization", "Bearer token")
///     .multipart(payload.into_parts())
///     .send()
///     .await?;
/// ```
pub struct Client;

impl Client {
    /// Create a POST request.
    pub fn post(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(url)
    }
}
