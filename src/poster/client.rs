//! Poster backend client
//!
//! Submits a [`GenerateRequest`] and returns the rendered poster. Rejections
//! carry the backend's `detail` message verbatim.

use crate::config::Config;
use crate::constants::api::GENERATE_PATH;
use crate::error::{Error, Result};
use crate::poster::{GenerateRequest, PosterArtifact};
use serde::Deserialize;
use tracing::{info, warn};

const GENERIC_FAILURE: &str = "the server could not generate the poster";

/// Client for `POST /api/generate`
#[derive(Debug, Clone)]
pub struct PosterApi {
    client: reqwest::Client,
    url: String,
}

/// Error body returned by the backend
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

impl PosterApi {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            url: format!("{}{}", base_url.trim_end_matches('/'), GENERATE_PATH),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(crate::geo::http_client(config)?, &config.api.base_url))
    }

    /// Ask the backend to render a poster
    pub async fn generate(&self, request: &GenerateRequest) -> Result<PosterArtifact> {
        info!(
            city = %request.city,
            distance = request.distance,
            paper_size = %request.paper_size,
            "requesting poster"
        );

        let response = self.client.post(&self.url).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail)
                .map(|detail| match detail {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                })
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            warn!(%status, "poster generation rejected: {}", detail);
            return Err(Error::Generation(detail));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::test_support::spawn;
    use crate::poster::{Layer, PaperSize};
    use axum::{http::StatusCode, routing::post, Json, Router};

    fn request() -> GenerateRequest {
        GenerateRequest {
            location: "Paris, France".to_string(),
            city: "Paris".to_string(),
            country: "France".to_string(),
            theme: "feature_based".to_string(),
            distance: 10_000,
            layers: vec![Layer::Roads],
            paper_size: PaperSize::ThreeFour,
            lat: 48.8566,
            lng: 2.3522,
        }
    }

    #[tokio::test]
    async fn test_generate_success() {
        let router = Router::new().route(
            "/api/generate",
            post(|Json(body): Json<GenerateRequest>| async move {
                assert_eq!(body.city, "Paris");
                assert_eq!(body.paper_size, PaperSize::ThreeFour);
                Json(serde_json::json!({
                    "url": "/api/posters/img/paris_feature_based.png",
                    "filename": "paris_feature_based.png",
                    "output": "done"
                }))
            }),
        );
        let base = spawn(router).await;

        let api = PosterApi::new(reqwest::Client::new(), &base);
        let artifact = api.generate(&request()).await.unwrap();

        assert_eq!(artifact.filename, "paris_feature_based.png");
        assert_eq!(artifact.url, "/api/posters/img/paris_feature_based.png");
    }

    #[tokio::test]
    async fn test_generate_failure_detail() {
        let router = Router::new().route(
            "/api/generate",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "detail": "Script error: theme not found" })),
                )
            }),
        );
        let base = spawn(router).await;

        let api = PosterApi::new(reqwest::Client::new(), &base);
        match api.generate(&request()).await {
            Err(Error::Generation(detail)) => assert_eq!(detail, "Script error: theme not found"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_failure_without_detail() {
        let router = Router::new().route(
            "/api/generate",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
        let base = spawn(router).await;

        let api = PosterApi::new(reqwest::Client::new(), &base);
        match api.generate(&request()).await {
            Err(Error::Generation(detail)) => assert_eq!(detail, GENERIC_FAILURE),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_structured_detail() {
        let router = Router::new().route(
            "/api/generate",
            post(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(serde_json::json!({ "detail": [{ "msg": "field required" }] })),
                )
            }),
        );
        let base = spawn(router).await;

        let api = PosterApi::new(reqwest::Client::new(), &base);
        match api.generate(&request()).await {
            Err(Error::Generation(detail)) => assert!(detail.contains("field required")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
