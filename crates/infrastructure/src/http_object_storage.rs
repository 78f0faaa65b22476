use async_trait::async_trait;
use hrdesk_application::ObjectStorage;
use hrdesk_core::{AppError, AppResult};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde_json::json;
use tracing::{debug, info};
use url::Url;

use crate::backend_error::classify_backend_error;

/// Object storage adapter for a Supabase-compatible storage HTTP API.
#[derive(Clone)]
pub struct HttpObjectStorage {
    http_client: reqwest::Client,
    base_url: Url,
    service_key: String,
    bucket: String,
}

impl HttpObjectStorage {
    /// Creates a storage adapter for one bucket.
    #[must_use]
    pub fn new(
        http_client: reqwest::Client,
        base_url: Url,
        service_key: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            base_url,
            service_key: service_key.into(),
            bucket: bucket.into(),
        }
    }

    /// Returns the configured bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        self.bucket.as_str()
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                AppError::Internal(format!(
                    "storage url '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(["storage", "v1"])
            .extend(segments);

        Ok(url)
    }

    fn object_url(&self, object_path: &str) -> AppResult<Url> {
        self.endpoint(
            ["object", self.bucket.as_str()]
                .into_iter()
                .chain(object_path.split('/').filter(|segment| !segment.is_empty())),
        )
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .bearer_auth(self.service_key.as_str())
            .header("apikey", self.service_key.as_str())
    }

    async fn send(&self, action: &str, builder: RequestBuilder) -> AppResult<reqwest::Response> {
        builder
            .send()
            .await
            .map_err(|error| classify_backend_error(action, error))
    }
}

async fn failure(action: &str, response: reqwest::Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    classify_backend_error(action, format!("storage responded {status}: {body}"))
}

#[async_trait]
impl ObjectStorage for HttpObjectStorage {
    async fn ensure_bucket(&self) -> AppResult<()> {
        let lookup = self
            .send(
                "look up storage bucket",
                self.request(Method::GET, self.endpoint(["bucket", self.bucket.as_str()])?),
            )
            .await?;
        if lookup.status().is_success() {
            debug!(bucket = %self.bucket, "storage bucket already exists");
            return Ok(());
        }

        let created = self
            .send(
                "create storage bucket",
                self.request(Method::POST, self.endpoint(["bucket"])?)
                    .json(&json!({
                        "id": self.bucket,
                        "name": self.bucket,
                        "public": false,
                    })),
            )
            .await?;

        if created.status().is_success() || created.status() == StatusCode::CONFLICT {
            info!(bucket = %self.bucket, "storage bucket ready");
            return Ok(());
        }

        Err(failure("create storage bucket", created).await)
    }

    async fn upload_object(
        &self,
        object_path: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> AppResult<()> {
        let response = self
            .send(
                "upload attachment",
                self.request(Method::POST, self.object_url(object_path)?)
                    .header("x-upsert", "true")
                    .header(
                        reqwest::header::CONTENT_TYPE,
                        content_type.unwrap_or("application/octet-stream"),
                    )
                    .body(bytes),
            )
            .await?;

        if response.status().is_success() {
            return Ok(());
        }

        Err(failure("upload attachment", response).await)
    }

    async fn remove_object(&self, object_path: &str) -> AppResult<()> {
        let response = self
            .send(
                "remove attachment",
                self.request(Method::DELETE, self.object_url(object_path)?),
            )
            .await?;

        if response.status().is_success() || response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }

        Err(failure("remove attachment", response).await)
    }
}
