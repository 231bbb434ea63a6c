use crate::app::ports::PageSourcePort;
use crate::error::Result;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Plain unauthenticated GET with reqwest
pub struct ReqwestPageSource {
    client: reqwest::Client,
}

impl ReqwestPageSource {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestPageSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageSourcePort for ReqwestPageSource {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<String> {
        let resp = self.client.get(url).send().await?.error_for_status()?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        debug!(status, bytes = body.len(), "Fetched page");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EtlError;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a local port and return its URL.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/")
    }

    fn local_source() -> ReqwestPageSource {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        ReqwestPageSource::with_client(client)
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: text/html\r\ncontent-length: 13\r\nconnection: close\r\n\r\n<p>halo</p>\r\n",
        )
        .await;

        let body = local_source().fetch(&url).await.unwrap();
        assert_eq!(body, "<p>halo</p>\r\n");
    }

    #[tokio::test]
    async fn test_fetch_error_status_is_fatal() {
        let url = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;

        let result = local_source().fetch(&url).await;
        assert!(matches!(result, Err(EtlError::Http(_))));
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_fatal() {
        let url = serve_once(
            "HTTP/1.1 404 Not Found\r\ncontent-length: 9\r\nconnection: close\r\n\r\nnot found",
        )
        .await;

        let result = local_source().fetch(&url).await;
        assert!(matches!(result, Err(EtlError::Http(_))));
    }
}
