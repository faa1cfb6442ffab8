use std::time::Instant;

use opentelemetry::KeyValue;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::SourceApi;
use crate::error::{AppError, AppResult};
use crate::models::{MilestoneDetail, MilestoneSummary, Repository};
use crate::telemetry::metrics::{SOURCE_REQUEST_DURATION, SOURCE_REQUESTS_TOTAL};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

#[derive(Deserialize)]
struct GitHubErrorBody {
    message: String,
}

impl GitHubClient {
    pub fn new(base_url: &str, token: &str) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn milestones_url(&self, repository: &Repository) -> String {
        format!(
            "{}/repos/{}/{}/milestones",
            self.base_url, repository.owner, repository.name
        )
    }

    #[tracing::instrument(
        name = "github.request",
        skip(self, request),
        fields(
            github.endpoint = endpoint,
            http.response.status_code = tracing::field::Empty,
            otel.status_code = tracing::field::Empty,
        )
    )]
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: reqwest::RequestBuilder,
    ) -> AppResult<T> {
        let start = Instant::now();
        let result = self.send(request).await;
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        let span = tracing::Span::current();
        let outcome = match &result {
            Ok(_) => "success",
            Err(AppError::GitHub { status, .. }) => {
                span.record("http.response.status_code", i64::from(*status));
                "api_error"
            }
            Err(_) => "transport_error",
        };
        span.record(
            "otel.status_code",
            if result.is_ok() { "OK" } else { "ERROR" },
        );

        let attrs = [
            KeyValue::new("github.endpoint", endpoint),
            KeyValue::new("outcome", outcome),
        ];
        SOURCE_REQUESTS_TOTAL.add(1, &attrs);
        SOURCE_REQUEST_DURATION.record(latency_ms, &attrs);

        result
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> AppResult<T> {
        let response = request.bearer_auth(&self.token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GitHubErrorBody>(&body)
                .map(|err| err.message)
                .unwrap_or(body);
            return Err(AppError::GitHub {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait::async_trait]
impl SourceApi for GitHubClient {
    async fn list_milestones(&self, repository: &Repository) -> AppResult<Vec<MilestoneSummary>> {
        let request = self
            .client
            .get(self.milestones_url(repository))
            .query(&[("state", "all")]);

        self.get_json("list_milestones", request).await
    }

    async fn get_milestone(
        &self,
        repository: &Repository,
        number: u64,
    ) -> AppResult<MilestoneDetail> {
        let url = format!("{}/{number}", self.milestones_url(repository));

        self.get_json("get_milestone", self.client.get(url)).await
    }
}
