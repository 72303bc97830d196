mod cookies;

use std::time::Instant;

use awc::Client;
use awc::http::{Method, StatusCode, Uri, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use cookies::CookieJar;

use crate::config::ApiConfig;
use crate::error::{SuiteError, SuiteResult};

/// A request against the service under test
///
/// Mirrors what a test author writes: method, path, query string, optional
/// JSON body and whether a non-2xx/3xx status should fail the call outright.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
    fail_on_status_code: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            fail_on_status_code: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn json<T: Serialize>(self, body: &T) -> Result<Self, serde_json::Error> {
        Ok(self.body(serde_json::to_value(body)?))
    }

    /// When `false`, every status is handed back to the caller to assert on
    pub fn fail_on_status_code(mut self, fail: bool) -> Self {
        self.fail_on_status_code = fail;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Status and decoded body of a completed request
#[derive(Clone, Debug)]
pub struct ApiResponse {
    pub method: Method,
    pub url: String,
    pub status: StatusCode,
    /// `null` for an empty body, a string for non-JSON text
    pub body: Value,
}

impl ApiResponse {
    /// Decode the body into an expected envelope
    ///
    /// A body that does not fit is an assertion failure, not a transport error.
    pub fn json<T: DeserializeOwned>(&self) -> SuiteResult<T> {
        serde_json::from_value(self.body.clone()).map_err(|e| {
            SuiteError::assertion(format!(
                "body of {} {} does not have the expected shape ({}): {}",
                self.method, self.url, e, self.body
            ))
        })
    }
}

/// HTTP client for the service under test
///
/// Keeps the cookies the service sets so that a login carries over to the
/// requests that follow it. Not `Send`: it lives on the actix runtime that
/// created it.
pub struct ApiClient {
    client: Client,
    base_url: String,
    max_body_bytes: usize,
    cookies: CookieJar,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .add_default_header((header::ACCEPT, "application/json"))
            .finish();

        Self {
            client,
            base_url: config.base().to_string(),
            max_body_bytes: config.max_body_bytes,
            cookies: CookieJar::default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// True once the service has set at least one cookie
    pub fn has_session(&self) -> bool {
        !self.cookies.is_empty()
    }

    pub fn clear_session(&mut self) {
        self.cookies.clear();
    }

    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    /// Absolute URL of `path`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn send(&mut self, request: ApiRequest) -> SuiteResult<ApiResponse> {
        let start = Instant::now();
        let method = request.method.clone();
        let url = self.url(&request.path);

        url.parse::<Uri>().map_err(|e| SuiteError::InvalidUrl {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let mut builder = self.client.request(method.clone(), url.as_str());

        if !request.query.is_empty() {
            builder = builder
                .query(&request.query)
                .map_err(|e| SuiteError::InvalidUrl {
                    url: url.clone(),
                    message: e.to_string(),
                })?;
        }

        for cookie in self.cookies.iter() {
            builder = builder.cookie(cookie.clone());
        }

        let url = builder.get_uri().to_string();

        tracing::debug!(%method, %url, "Sending request");

        let sent = match &request.body {
            Some(body) => builder.send_json(body).await,
            None => builder.send().await,
        };

        let mut response = sent.map_err(|e| SuiteError::Request {
            method: method.clone(),
            url: url.clone(),
            message: e.to_string(),
        })?;

        let status = response.status();

        match response.cookies() {
            Ok(cookies) => {
                for cookie in cookies.iter() {
                    self.cookies.store(cookie.clone());
                }
            }
            Err(e) => tracing::warn!(%url, error = %e, "Ignoring unparseable Set-Cookie header"),
        }

        let bytes = response
            .body()
            .limit(self.max_body_bytes)
            .await
            .map_err(|e| SuiteError::Payload {
                method: method.clone(),
                url: url.clone(),
                message: e.to_string(),
            })?;

        let body = decode_body(&bytes);

        tracing::debug!(
            %method,
            %url,
            status = status.as_u16(),
            "Received response in {:?}",
            start.elapsed()
        );

        if request.fail_on_status_code && !(status.is_success() || status.is_redirection()) {
            return Err(SuiteError::UnexpectedStatus {
                method,
                url,
                status,
                body: body.to_string(),
            });
        }

        Ok(ApiResponse {
            method,
            url,
            status,
            body,
        })
    }
}

fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }

    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
