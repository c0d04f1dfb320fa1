//! HTTP transport for the crawler
//!
//! This module handles all network access, including:
//! - Building HTTP clients with the configured user agent and timeout
//! - GET requests to fetch page content
//! - HEAD and status-only GET requests to probe link targets
//! - Error classification
//!
//! The crawler only sees the [`Transport`] trait, so tests can swap the
//! network for an in-memory site.

use crate::config::CrawlerConfig;
use crate::dom::is_markup;
use crate::TransportError;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::future::Future;
use std::time::Duration;

/// Longest time spent establishing a connection, capped by the request timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum redirect hops followed for a single request
const MAX_REDIRECTS: usize = 10;

/// Result of a successful GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value, if present
    pub content_type: Option<String>,
    /// Decoded body; empty unless the status is 200 and the content is markup
    pub body: String,
}

/// Network capability the crawler depends on
pub trait Transport: Sync {
    /// Fetches a URL with GET
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchedPage, TransportError>> + Send;

    /// Probes a URL with HEAD and returns the status code
    fn fetch_head(&self, url: &str) -> impl Future<Output = Result<u16, TransportError>> + Send;

    /// Sends a GET and returns the status code without reading the body
    fn fetch_status(&self, url: &str) -> impl Future<Output = Result<u16, TransportError>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use link_sleuth::config::CrawlerConfig;
/// use link_sleuth::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    let timeout = config.timeout();

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(timeout)
        .connect_timeout(timeout.min(CONNECT_TIMEOUT))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`Transport`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with a client built from `config`
    pub fn new(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        // Bodies declared as something other than markup are never downloaded.
        let wants_body = status == StatusCode::OK
            && content_type.as_deref().map_or(true, is_markup);

        let body = if wants_body {
            response.text().await.map_err(|e| classify_error(url, e))?
        } else {
            String::new()
        };

        Ok(FetchedPage {
            status_code: status.as_u16(),
            content_type,
            body,
        })
    }

    async fn fetch_head(&self, url: &str) -> Result<u16, TransportError> {
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;
        Ok(response.status().as_u16())
    }

    async fn fetch_status(&self, url: &str) -> Result<u16, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;
        // Dropping the response closes the connection without reading the body.
        Ok(response.status().as_u16())
    }
}

/// Maps a reqwest failure onto the transport error taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        TransportError::Connect {
            url: url.to_string(),
        }
    } else {
        TransportError::Request {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::probe_uncached;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport() -> HttpTransport {
        HttpTransport::new(&CrawlerConfig::default()).unwrap()
    }

    fn short_timeout_transport() -> HttpTransport {
        let config = CrawlerConfig {
            timeout_secs: 2,
            ..CrawlerConfig::default()
        };
        HttpTransport::new(&config).unwrap()
    }

    /// Starts a server that rejects HEAD with 405 and answers GET with a
    /// 200 whose body stalls after a few bytes. Returns the target URL.
    async fn start_stalling_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut buf = [0u8; 1024];
                    let n = socket.read(&mut buf).await.unwrap_or(0);
                    if buf[..n].starts_with(b"HEAD") {
                        let _ = socket
                            .write_all(
                                b"HTTP/1.1 405 Method Not Allowed\r\n\
                                  content-length: 0\r\n\
                                  connection: close\r\n\r\n",
                            )
                            .await;
                    } else {
                        let _ = socket
                            .write_all(
                                b"HTTP/1.1 200 OK\r\n\
                                  content-type: application/octet-stream\r\n\
                                  content-length: 100000\r\n\r\nabc",
                            )
                            .await;
                        tokio::time::sleep(Duration::from_secs(30)).await;
                    }
                });
            }
        });

        format!("http://{}/disk.iso", addr)
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&CrawlerConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_returns_body_and_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("<p>hi</p>", "text/html"))
            .mount(&server)
            .await;

        let page = transport().fetch(&format!("{}/", server.uri())).await.unwrap();
        assert_eq!(page.status_code, 200);
        assert_eq!(page.body, "<p>hi</p>");
        assert!(page.content_type.unwrap().starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_fetch_error_status_has_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(410).set_body_raw("gone", "text/html"))
            .mount(&server)
            .await;

        let page = transport()
            .fetch(&format!("{}/gone", server.uri()))
            .await
            .unwrap();
        assert_eq!(page.status_code, 410);
        assert!(page.body.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_head_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let status = transport()
            .fetch_head(&format!("{}/missing", server.uri()))
            .await
            .unwrap();
        assert_eq!(status, 404);
    }

    #[tokio::test]
    async fn test_fetch_skips_non_markup_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doc.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("%PDF-1.7", "application/pdf"))
            .mount(&server)
            .await;

        let page = transport()
            .fetch(&format!("{}/doc.pdf", server.uri()))
            .await
            .unwrap();
        assert_eq!(page.status_code, 200);
        assert_eq!(page.content_type.as_deref(), Some("application/pdf"));
        assert!(page.body.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_status_reports_get_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(410))
            .expect(1)
            .mount(&server)
            .await;

        let status = transport()
            .fetch_status(&format!("{}/gone", server.uri()))
            .await
            .unwrap();
        assert_eq!(status, 410);
    }

    #[tokio::test]
    async fn test_fetch_status_does_not_wait_for_body() {
        let url = start_stalling_server().await;

        let status = short_timeout_transport().fetch_status(&url).await.unwrap();
        assert_eq!(status, 200);
    }

    #[tokio::test]
    async fn test_live_target_with_stalled_body_is_not_dead() {
        let url = start_stalling_server().await;

        let status = probe_uncached(&short_timeout_transport(), &url).await;
        assert_eq!(status, 200);
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Bind then drop a listener so the port is known to be closed.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = format!("http://{}/", addr);
        let err = transport().fetch(&url).await.unwrap_err();
        assert_eq!(err.url(), url);
    }
}
