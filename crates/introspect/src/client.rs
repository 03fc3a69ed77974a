//! HTTP transport for introspection queries.

use crate::query::{request_body, SpecVersion};
use crate::{parse_introspection, IntrospectionError, IntrospectionSchema, Result};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::StatusCode;
use std::fmt::{self, Write as _};
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Upper bound on the backoff exponent, so the longest pause is 64 seconds.
const MAX_BACKOFF_SHIFT: u32 = 6;

/// Fetches a schema from a GraphQL endpoint with the introspection query.
///
/// # Examples
///
/// ```no_run
/// use graphql_introspect::{IntrospectionClient, SpecVersion, TraceSink};
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = IntrospectionClient::new()
///     .with_header("Authorization", "Bearer my-token")
///     .with_timeout(Duration::from_secs(60))
///     .with_retries(3)
///     .with_spec_version(SpecVersion::June2018)
///     .with_trace(TraceSink::stderr());
/// let schema = client.execute("https://api.example.com/graphql").await?;
/// println!("{} types", schema.types.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct IntrospectionClient {
    headers: Vec<(String, String)>,
    timeout: Duration,
    connect_timeout: Duration,
    retries: u32,
    spec_version: SpecVersion,
    trace: Option<TraceSink>,
}

impl Default for IntrospectionClient {
    fn default() -> Self {
        Self {
            headers: Vec::new(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            retries: 0,
            spec_version: SpecVersion::default(),
            trace: None,
        }
    }
}

impl IntrospectionClient {
    /// A client with a 30s request timeout, a 10s connect timeout, no retries
    /// and the October 2021 query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sends `name: value` with every request. A header of the same name,
    /// compared case-insensitively, is replaced.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn with_headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        headers
            .into_iter()
            .fold(self, |client, (name, value)| client.with_header(name, value))
    }

    /// Limits the whole exchange, connection included.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Extra attempts after a transient failure. Pauses double from one second.
    #[must_use]
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    #[must_use]
    pub fn with_spec_version(mut self, spec_version: SpecVersion) -> Self {
        self.spec_version = spec_version;
        self
    }

    /// Dumps every request and raw response to `sink`.
    #[must_use]
    pub fn with_trace(mut self, sink: TraceSink) -> Self {
        self.trace = Some(sink);
        self
    }

    /// Runs the introspection query against `url`.
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be sent, the server answers with a
    /// non-success status, the body is not an introspection result, or the
    /// body lists GraphQL errors. Transient failures are retried first.
    #[tracing::instrument(skip(self), fields(spec_version = %self.spec_version))]
    pub async fn execute(&self, url: &str) -> Result<IntrospectionSchema> {
        let mut attempt = 0;
        loop {
            match self.execute_once(url).await {
                Ok(schema) => return Ok(schema),
                Err(error) if attempt < self.retries && error.is_transient() => {
                    attempt += 1;
                    let delay = backoff(attempt);
                    tracing::warn!(
                        attempt,
                        error = %error,
                        delay_secs = delay.as_secs(),
                        "Introspection failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(error) => return Err(error),
            }
        }
    }

    async fn execute_once(&self, url: &str) -> Result<IntrospectionSchema> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .build()
            .map_err(|e| {
                IntrospectionError::Network(format!("Failed to create HTTP client: {e}"))
            })?;

        let body = request_body(self.spec_version).to_string();
        if let Some(trace) = &self.trace {
            trace.request(url, &self.headers, &body);
        }

        let mut request = client.post(url).header(CONTENT_TYPE, "application/json");
        for (name, value) in &self.headers {
            request = request.header(name, value);
        }
        let response = request
            .body(body)
            .send()
            .await
            .map_err(|e| IntrospectionError::Network(e.to_string()))?;

        let status = response.status();
        let headers = response.headers().clone();
        let text = response
            .text()
            .await
            .map_err(|e| IntrospectionError::Network(e.to_string()))?;
        tracing::debug!(status = status.as_u16(), bytes = text.len(), "Received response");
        if let Some(trace) = &self.trace {
            trace.response(status, &headers, &text);
        }

        if !status.is_success() {
            return Err(IntrospectionError::Http(status.as_u16(), text));
        }

        let schema = parse_introspection(&text)?;
        tracing::info!(
            types = schema.types.len(),
            directives = schema.directives.len(),
            "Introspection successful"
        );
        Ok(schema)
    }
}

/// Pause before retry number `attempt` (1-based): 1s, 2s, 4s, capped at 64s.
fn backoff(attempt: u32) -> Duration {
    Duration::from_secs(1 << attempt.saturating_sub(1).min(MAX_BACKOFF_SHIFT))
}

/// Shared writer that receives HTTP exchange dumps.
#[derive(Clone)]
pub struct TraceSink(Arc<Mutex<dyn Write + Send>>);

impl TraceSink {
    #[must_use]
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self(Arc::new(Mutex::new(writer)))
    }

    #[must_use]
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }

    fn request(&self, url: &str, headers: &[(String, String)], body: &str) {
        let mut dump = format!("---\nIntrospection request:\nPOST {url}\n");
        dump.push_str("content-type: application/json\n");
        for (name, value) in headers {
            let _ = writeln!(dump, "{name}: {value}");
        }
        let _ = write!(dump, "\n{body}\n");
        self.emit(&dump);
    }

    fn response(&self, status: StatusCode, headers: &HeaderMap, body: &str) {
        let mut dump = format!("\n---\nIntrospection response:\nHTTP {status}\n");
        for (name, value) in headers {
            let _ = writeln!(dump, "{name}: {}", String::from_utf8_lossy(value.as_bytes()));
        }
        let _ = write!(dump, "\n{body}\n");
        self.emit(&dump);
    }

    fn emit(&self, dump: &str) {
        let Ok(mut writer) = self.0.lock() else {
            return;
        };
        if let Err(e) = writer.write_all(dump.as_bytes()).and_then(|()| writer.flush()) {
            tracing::debug!(error = %e, "Failed to write trace output");
        }
    }
}

impl fmt::Debug for TraceSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TraceSink")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_defaults() {
        let client = IntrospectionClient::new();
        assert!(client.headers.is_empty());
        assert_eq!(client.timeout, Duration::from_secs(30));
        assert_eq!(client.connect_timeout, Duration::from_secs(10));
        assert_eq!(client.retries, 0);
        assert_eq!(client.spec_version, SpecVersion::October2021);
        assert!(client.trace.is_none());
    }

    #[test]
    fn test_header_names_are_case_insensitive() {
        let client = IntrospectionClient::new()
            .with_headers([("authorization", "one"), ("Accept", "application/json")])
            .with_header("Authorization", "two");

        assert_eq!(
            client.headers,
            vec![
                ("Accept".to_string(), "application/json".to_string()),
                ("Authorization".to_string(), "two".to_string()),
            ]
        );
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let secs: Vec<u64> = [1, 2, 3, 4, 7, 20]
            .into_iter()
            .map(|attempt| backoff(attempt).as_secs())
            .collect();
        assert_eq!(secs, vec![1, 2, 4, 8, 64, 64]);
    }

    #[test]
    fn test_trace_dumps_request_and_response() {
        let captured = Captured::default();
        let sink = TraceSink::new(captured.clone());

        sink.request(
            "https://api.example.com/graphql",
            &[("Authorization".to_string(), "Bearer token".to_string())],
            r#"{"query":"{ __schema { queryType { name } } }"}"#,
        );
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        sink.response(StatusCode::OK, &headers, r#"{"data":null}"#);

        assert_eq!(
            captured.text(),
            "---\nIntrospection request:\nPOST https://api.example.com/graphql\n\
             content-type: application/json\nAuthorization: Bearer token\n\n\
             {\"query\":\"{ __schema { queryType { name } } }\"}\n\
             \n---\nIntrospection response:\nHTTP 200 OK\ncontent-type: application/json\n\n\
             {\"data\":null}\n"
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let captured = Captured::default();
        let client = IntrospectionClient::new()
            .with_connect_timeout(Duration::from_secs(1))
            .with_trace(TraceSink::new(captured.clone()));

        let error = client.execute("http://127.0.0.1:9/graphql").await.unwrap_err();
        assert!(matches!(error, IntrospectionError::Network(_)), "{error}");
        let dump = captured.text();
        assert!(
            dump.starts_with("---\nIntrospection request:\nPOST http://127.0.0.1:9/graphql\n"),
            "{dump}"
        );
        assert!(!dump.contains("Introspection response"));
    }
}
