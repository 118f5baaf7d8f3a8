use async_trait::async_trait;
use log::debug;
use reqwest::{header, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{ClientError, DataSource};
use crate::models::{Product, ProductPayload};
use crate::validation::FieldErrors;

#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    errors: FieldErrors,
}

/// Talks to the product API over HTTP.
#[derive(Clone)]
pub struct RemoteSource {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteSource {
    /// `base_url` is prepended verbatim to every path, e.g.
    /// `http://localhost:8000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        RemoteSource {
            http,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header(header::ACCEPT, "application/json")
    }

    async fn send(&self, builder: RequestBuilder, id: Option<i64>) -> Result<Response, ClientError> {
        let response = self
            .request(builder)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        debug!("{} {}", response.status(), response.url());

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: ErrorBody = response.json().await.unwrap_or_default();
        Err(match (status, id) {
            (StatusCode::NOT_FOUND, Some(id)) => ClientError::NotFound(id),
            (StatusCode::UNPROCESSABLE_ENTITY, _) if !body.errors.is_empty() => {
                ClientError::Validation(body.errors)
            }
            _ => ClientError::Server {
                status: status.as_u16(),
                message: body.error.unwrap_or_else(|| format!("HTTP {}", status)),
            },
        })
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    pub async fn create(&self, payload: &ProductPayload) -> Result<Product, ClientError> {
        let builder = self.http.post(self.url("/products")).json(payload);
        Self::json(self.send(builder, None).await?).await
    }

    pub async fn update(&self, id: i64, payload: &ProductPayload) -> Result<Product, ClientError> {
        let builder = self
            .http
            .put(self.url(&format!("/products/{}", id)))
            .json(payload);
        Self::json(self.send(builder, Some(id)).await?).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let builder = self.http.delete(self.url(&format!("/products/{}", id)));
        self.send(builder, Some(id)).await?;
        Ok(())
    }
}

#[async_trait]
impl DataSource for RemoteSource {
    async fn list(&self) -> Result<Vec<Product>, ClientError> {
        let builder = self.http.get(self.url("/products"));
        Self::json(self.send(builder, None).await?).await
    }

    async fn get(&self, id: i64) -> Result<Product, ClientError> {
        let builder = self.http.get(self.url(&format!("/products/{}", id)));
        Self::json(self.send(builder, Some(id)).await?).await
    }
}
