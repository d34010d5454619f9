//! HTTP client for the question-answering backend.
//!
//! The backend exposes three ingestion routes (one per supported file kind)
//! and two question routes. This module is a thin wire layer; routing
//! decisions and retry policy live in [`crate::conversation`].

use crate::config::Config;
use crate::session::{FileKind, SelectedFile};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Question route selected from upload history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryRoute {
    /// General question-answering over ingested documents.
    General,
    /// Question-answering over an ingested CSV.
    Tabular,
}

impl QueryRoute {
    /// Backend path for this route.
    pub fn path(self) -> &'static str {
        match self {
            Self::General => "/ask_question",
            Self::Tabular => "/ask_csv",
        }
    }
}

/// Ingestion path for a file kind.
fn ingest_path(kind: FileKind) -> &'static str {
    match kind {
        FileKind::Pdf => "/load_document/",
        FileKind::Text => "/load_txt/",
        FileKind::Csv => "/load_csv/",
    }
}

/// Answer payload returned by the question routes.
///
/// The backend returns `{"answer": "..."}`; a missing field is treated the
/// same as an empty answer.
#[derive(Debug, Clone, Deserialize)]
pub struct Answer {
    /// Answer text, possibly empty.
    #[serde(default)]
    pub answer: String,
}

impl Answer {
    /// Whether the answer carries no usable text.
    pub fn is_blank(&self) -> bool {
        self.answer.trim().is_empty()
    }
}

/// Errors from a backend exchange.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Connection, timeout, or protocol failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned HTTP {0}")]
    Status(StatusCode),
}

/// Client for one backend instance.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client from configuration.
    pub fn new(config: &Config) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload a file to the ingestion route for `kind`.
    pub async fn ingest(&self, kind: FileKind, file: &SelectedFile) -> Result<(), BackendError> {
        let url = format!("{}{}", self.base_url, ingest_path(kind));
        debug!(url = %url, file = %file.name, "uploading file");

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)?;
        let form = Form::new().part("file", part);

        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status));
        }
        Ok(())
    }

    /// Ask a question on the given route. The query travels as a query
    /// string parameter, matching the backend's signature.
    pub async fn ask(&self, route: QueryRoute, query: &str) -> Result<Answer, BackendError> {
        let url = format!("{}{}", self.base_url, route.path());
        debug!(url = %url, "asking question");

        let response = self
            .client
            .post(&url)
            .query(&[("query", query)])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status));
        }

        Ok(response.json::<Answer>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(server: &mockito::Server) -> BackendClient {
        let config = Config {
            base_url: server.url(),
            ..Config::default()
        };
        BackendClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_ingest_posts_multipart_to_kind_route() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/load_document/")
            .match_header(
                "content-type",
                mockito::Matcher::Regex("multipart/form-data.*".into()),
            )
            .with_status(200)
            .with_body(r#"{"message": "Document loaded successfully."}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let file = SelectedFile::new("report.pdf", "application/pdf", vec![0x25, 0x50]);
        client.ingest(FileKind::Pdf, &file).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_ingest_maps_server_error_to_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/load_csv/")
            .with_status(500)
            .create_async()
            .await;

        let client = test_client(&server);
        let file = SelectedFile::new("data.csv", "text/csv", b"a,b\n1,2\n".to_vec());
        let err = client.ingest(FileKind::Csv, &file).await.unwrap_err();
        assert!(matches!(
            err,
            BackendError::Status(StatusCode::INTERNAL_SERVER_ERROR)
        ));
    }

    #[tokio::test]
    async fn test_ask_sends_query_param_and_parses_answer() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/ask_question")
            .match_query(mockito::Matcher::UrlEncoded(
                "query".into(),
                "what is it?".into(),
            ))
            .with_status(200)
            .with_body(r#"{"answer": "A report."}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let answer = client.ask(QueryRoute::General, "what is it?").await.unwrap();
        assert_eq!(answer.answer, "A report.");
        assert!(!answer.is_blank());

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_ask_missing_answer_field_is_blank() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/ask_csv")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"error": "No document index."}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let answer = client.ask(QueryRoute::Tabular, "x").await.unwrap();
        assert!(answer.is_blank());
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(QueryRoute::General.path(), "/ask_question");
        assert_eq!(QueryRoute::Tabular.path(), "/ask_csv");
        assert_eq!(ingest_path(FileKind::Pdf), "/load_document/");
        assert_eq!(ingest_path(FileKind::Text), "/load_txt/");
        assert_eq!(ingest_path(FileKind::Csv), "/load_csv/");
    }
}
