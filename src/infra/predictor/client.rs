// Responsible for all communication with the external premium prediction service.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::infra::config;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Occupation {
    Retired,
    Freelancer,
    Student,
    GovernmentJob,
    BusinessOwner,
    Unemployed,
    PrivateJob,
}

/// Feature record posted to the predictor.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PredictionInput {
    pub age: u32,
    pub weight: f64,
    pub height: f64,
    pub income_lpa: f64,
    pub smoker: bool,
    pub city: String,
    pub occupation: Occupation,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PredictionOutput {
    pub predicted_category: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Could not connect to the prediction service at {url}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("API Error: {} - {body}", .status.as_u16())]
    Api { status: StatusCode, body: String },
    #[error("Unexpected prediction response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl PredictionInput {
    /// Same bounds the form enforces before sending anything.
    pub fn validate(&self) -> Result<(), PredictorError> {
        let mut problems = Vec::new();
        if !(1..=119).contains(&self.age) {
            problems.push(format!("age must be between 1 and 119 (got {})", self.age));
        }
        if !(self.weight >= 1.0) {
            problems.push(format!("weight must be at least 1.0 kg (got {})", self.weight));
        }
        if !(0.5..=2.5).contains(&self.height) {
            problems.push(format!("height must be between 0.5 and 2.5 m (got {})", self.height));
        }
        if !(self.income_lpa >= 0.1) {
            problems.push(format!("income_lpa must be at least 0.1 (got {})", self.income_lpa));
        }
        if self.city.trim().is_empty() {
            problems.push("city must not be empty".to_string());
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(PredictorError::InvalidInput(problems.join("; ")))
        }
    }
}

pub struct PredictorClient {
    http: reqwest::Client,
    url: String,
}

impl PredictorClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Client pointed at `PREDICTOR_URL`.
    pub fn from_env() -> Self {
        Self::new(config::predictor_url())
    }

    /// One POST, no retry.
    pub async fn predict(&self, input: &PredictionInput) -> Result<PredictionOutput, PredictorError> {
        input.validate()?;

        let response = self
            .http
            .post(&self.url)
            .json(input)
            .send()
            .await
            .map_err(|source| PredictorError::Connection {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "prediction service returned an error");
            return Err(PredictorError::Api { status, body });
        }

        response
            .json::<PredictionOutput>()
            .await
            .map_err(PredictorError::Decode)
    }
}
