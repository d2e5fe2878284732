//! HTTP client for talking to wayfarerd.

use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;
use wayfarer_shared::{
    AuthResponse, GeneratePlanRequest, GeneratePlanResponse, HealthResponse, LoginRequest,
    RegisterRequest, SavePlanRequest, SavePlanResponse, SavedPlan,
};

/// Client for the wayfarerd HTTP API.
pub struct WayfarerClient {
    base: String,
    http: reqwest::Client,
}

impl WayfarerClient {
    pub fn new(base: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub async fn generate(&self, req: &GeneratePlanRequest) -> Result<GeneratePlanResponse> {
        self.post("/v1/plan/generate", req).await
    }

    pub async fn save(&self, req: &SavePlanRequest) -> Result<SavePlanResponse> {
        self.post("/v1/plan/save", req).await
    }

    pub async fn history(&self, user_id: &str) -> Result<Vec<SavedPlan>> {
        let url = format!("{}/v1/plan/history/{}", self.base, user_id);
        let response = self.http.get(url).send().await.map_err(connect_hint)?;
        Self::read(response).await
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse> {
        self.post("/v1/auth/register", req).await
    }

    pub async fn login(&self, req: &LoginRequest) -> Result<AuthResponse> {
        self.post("/v1/auth/login", req).await
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/v1/health", self.base);
        let response = self.http.get(url).send().await.map_err(connect_hint)?;
        Self::read(response).await
    }

    async fn post<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.base, path);
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(connect_hint)?;
        Self::read(response).await
    }

    async fn read<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(anyhow!("{}: {}", status, message));
        }
        Ok(response.json().await?)
    }
}

fn connect_hint(e: reqwest::Error) -> anyhow::Error {
    if e.is_connect() {
        anyhow!(
            "Cannot reach the Wayfarer daemon: {}\n\
             Is wayfarerd running? Start it and try again.",
            e
        )
    } else {
        anyhow!(e)
    }
}
