//! HTTP implementation of the guessing-service traits
//!
//! Talks to the regional `ws` endpoints (`new_session`, `answer`,
//! `cancel_answer`, `list`). Every response is wrapped in a
//! `{completion, parameters}` envelope; anything other than `"OK"` in
//! `completion` is surfaced as an error. Numeric fields arrive as strings on
//! the wire and are parsed on receipt.
//!
//! # Examples
//!
//! ```no_run
//! use aki_api::{AkiClient, Answer, GuessEngine, GuessSession, Region};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AkiClient::new()?;
//!     let mut session = client.start_session(Region::En).await?;
//!
//!     println!("Q{}: {}", session.step() + 1, session.question());
//!     session.answer(Answer::Yes).await?;
//!
//!     Ok(())
//! }
//! ```

use crate::error::{AkiError, Result};
use crate::region::Region;
use crate::session::{GuessEngine, GuessSession};
use crate::types::{Answer, Guess};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct AkiConfig {
    /// Base URL override
    ///
    /// When unset, the regional default (`https://{region}.akinator.com`) is
    /// used. Useful for pinning a specific server pool or pointing tests at
    /// a local stub.
    pub base_url: Option<String>,

    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl AkiConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a fixed base URL instead of the regional default
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl Default for AkiConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for the guessing service
pub struct AkiClient {
    client: Client,
    config: AkiConfig,
}

impl AkiClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(AkiConfig::new())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: AkiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &AkiConfig {
        &self.config
    }

    fn base_url(&self, region: Region) -> String {
        self.config
            .base_url
            .clone()
            .unwrap_or_else(|| region.server_url())
    }
}

#[async_trait]
impl GuessEngine for AkiClient {
    #[instrument(skip(self), fields(region = %region))]
    async fn start_session(&self, region: Region) -> Result<Box<dyn GuessSession>> {
        let base = self.base_url(region);
        debug!("Opening session at {base}");

        let response = self
            .client
            .get(format!("{base}/ws/new_session"))
            .query(&[("partner", "1"), ("constraint", "ETAT<>'AV'")])
            .send()
            .await?;

        let envelope: ApiResponse<NewSessionParameters> = read_envelope(response).await?;
        let parameters = envelope.into_parameters()?;

        let step = parameters.step_information;
        Ok(Box::new(AkiSession {
            client: self.client.clone(),
            base,
            channel: parameters.identification.channel,
            session: parameters.identification.session,
            signature: parameters.identification.signature,
            question: step.question,
            step: parse_number(&step.step)?,
            progress: parse_number(&step.progression)?,
        }))
    }

    fn name(&self) -> &str {
        "akinator-ws"
    }
}

/// One remote game session over HTTP
pub struct AkiSession {
    client: Client,
    base: String,
    channel: String,
    session: String,
    signature: String,
    question: String,
    step: u32,
    progress: f64,
}

impl AkiSession {
    fn identity_query(&self) -> [(&'static str, String); 4] {
        [
            ("channel", self.channel.clone()),
            ("session", self.session.clone()),
            ("signature", self.signature.clone()),
            ("step", self.step.to_string()),
        ]
    }

    fn apply_step(&mut self, step: StepParameters) -> Result<()> {
        self.question = step.question;
        self.step = parse_number(&step.step)?;
        self.progress = parse_number(&step.progression)?;
        Ok(())
    }
}

#[async_trait]
impl GuessSession for AkiSession {
    fn question(&self) -> &str {
        &self.question
    }

    fn step(&self) -> u32 {
        self.step
    }

    fn progress(&self) -> f64 {
        self.progress
    }

    fn set_progress(&mut self, progress: f64) {
        self.progress = progress;
    }

    #[instrument(skip(self), fields(step = self.step, answer = %answer))]
    async fn answer(&mut self, answer: Answer) -> Result<()> {
        let mut query = self.identity_query().to_vec();
        query.push(("answer", answer.code().to_string()));

        let response = self
            .client
            .get(format!("{}/ws/answer", self.base))
            .query(&query)
            .send()
            .await?;

        let envelope: ApiResponse<StepParameters> = read_envelope(response).await?;
        self.apply_step(envelope.into_parameters()?)?;

        debug!(
            "Step {} answered, progress {:.1}",
            self.step, self.progress
        );
        Ok(())
    }

    #[instrument(skip(self), fields(step = self.step))]
    async fn back(&mut self) -> Result<()> {
        if self.step == 0 {
            return Err(AkiError::NothingToUndo);
        }

        let mut query = self.identity_query().to_vec();
        query.push(("answer", "-1".to_string()));

        let response = self
            .client
            .get(format!("{}/ws/cancel_answer", self.base))
            .query(&query)
            .send()
            .await?;

        let envelope: ApiResponse<StepParameters> = read_envelope(response).await?;
        self.apply_step(envelope.into_parameters()?)
    }

    #[instrument(skip(self), fields(step = self.step))]
    async fn win(&mut self) -> Result<Vec<Guess>> {
        let mut query = self.identity_query().to_vec();
        query.push(("size", "2".to_string()));
        query.push(("max_pic_width", "360".to_string()));
        query.push(("max_pic_height", "640".to_string()));

        let response = self
            .client
            .get(format!("{}/ws/list", self.base))
            .query(&query)
            .send()
            .await?;

        let envelope: ApiResponse<ListParameters> = read_envelope(response).await?;

        // An empty candidate list is reported through the completion code,
        // not as an empty array.
        if envelope.completion.contains("ELEM LIST IS EMPTY") {
            return Ok(Vec::new());
        }

        let parameters = envelope.into_parameters()?;
        let guesses = parameters
            .elements
            .into_iter()
            .map(|entry| entry.element.into_guess())
            .collect::<Result<Vec<_>>>()?;

        debug!("Service returned {} candidate(s)", guesses.len());
        Ok(guesses)
    }
}

async fn read_envelope<T>(response: reqwest::Response) -> Result<ApiResponse<T>>
where
    T: for<'de> Deserialize<'de>,
{
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AkiError::UnexpectedResponse(format!(
            "HTTP {status}: {body}"
        )));
    }

    let envelope: ApiResponse<T> = response
        .json()
        .await
        .map_err(|e| AkiError::UnexpectedResponse(format!("Failed to parse response: {e}")))?;

    envelope.check_completion()?;
    Ok(envelope)
}

fn parse_number<T: std::str::FromStr>(raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| AkiError::UnexpectedResponse(format!("Non-numeric field: {raw:?}")))
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    completion: String,
    parameters: Option<T>,
}

impl<T> ApiResponse<T> {
    fn check_completion(&self) -> Result<()> {
        if self.completion == "OK" || self.completion.contains("ELEM LIST IS EMPTY") {
            return Ok(());
        }
        if self.completion.contains("TIMEOUT") {
            return Err(AkiError::SessionExpired);
        }
        Err(AkiError::ServiceRejected(self.completion.clone()))
    }

    fn into_parameters(self) -> Result<T> {
        self.parameters.ok_or_else(|| {
            AkiError::UnexpectedResponse("Missing parameters in OK response".to_string())
        })
    }
}

#[derive(Debug, Deserialize)]
struct NewSessionParameters {
    identification: Identification,
    step_information: StepParameters,
}

#[derive(Debug, Deserialize)]
struct Identification {
    channel: String,
    session: String,
    signature: String,
}

#[derive(Debug, Deserialize)]
struct StepParameters {
    question: String,
    progression: String,
    step: String,
}

#[derive(Debug, Deserialize)]
struct ListParameters {
    elements: Vec<ListEntry>,
}

#[derive(Debug, Deserialize)]
struct ListEntry {
    element: Element,
}

#[derive(Debug, Clone, Deserialize)]
struct Element {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    absolute_picture_path: Option<String>,
    proba: String,
    ranking: String,
}

impl Element {
    fn into_guess(self) -> Result<Guess> {
        Ok(Guess {
            confidence: parse_number(&self.proba)?,
            ranking: parse_number(&self.ranking)?,
            // Broken picture paths degrade to no image rather than failing
            // the whole guess.
            image: self
                .absolute_picture_path
                .as_deref()
                .and_then(|p| p.parse().ok()),
            name: self.name,
            description: self.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_envelope() {
        let body = r#"{
            "completion": "OK",
            "parameters": {
                "identification": {
                    "channel": "17",
                    "session": "401",
                    "signature": "1141657454"
                },
                "step_information": {
                    "question": "Is your character real?",
                    "progression": "0.00000",
                    "step": "0"
                }
            }
        }"#;

        let envelope: ApiResponse<NewSessionParameters> =
            serde_json::from_str(body).expect("valid envelope");
        envelope.check_completion().expect("completion is OK");

        let parameters = envelope.into_parameters().expect("parameters present");
        assert_eq!(parameters.identification.session, "401");
        assert_eq!(parameters.step_information.question, "Is your character real?");
    }

    #[test]
    fn test_list_envelope() {
        let body = r#"{
            "completion": "OK",
            "parameters": {
                "elements": [
                    {
                        "element": {
                            "name": "Hercule Poirot",
                            "description": "Detective",
                            "absolute_picture_path": "https://photos.example/poirot.jpg",
                            "proba": "0.96231",
                            "ranking": "209"
                        }
                    }
                ]
            }
        }"#;

        let envelope: ApiResponse<ListParameters> =
            serde_json::from_str(body).expect("valid envelope");
        let parameters = envelope.into_parameters().expect("parameters present");

        let guess = parameters.elements[0]
            .element
            .clone()
            .into_guess()
            .expect("valid element");
        assert_eq!(guess.name, "Hercule Poirot");
        assert_eq!(guess.ranking, 209);
        assert!(guess.confidence > 0.96 && guess.confidence < 0.97);
        assert!(guess.image.is_some());
    }

    #[test]
    fn test_ko_completion() {
        let body = r#"{"completion": "KO - TIMEOUT"}"#;
        let envelope: ApiResponse<StepParameters> =
            serde_json::from_str(body).expect("valid envelope");

        assert!(matches!(
            envelope.check_completion(),
            Err(AkiError::SessionExpired)
        ));
    }

    #[test]
    fn test_unparseable_number() {
        assert!(parse_number::<f64>("abc").is_err());
        let parsed: f64 = parse_number("95.23902").expect("valid float");
        assert!((parsed - 95.23902).abs() < 1e-9);
    }

    #[test]
    fn test_config_builder() {
        let config = AkiConfig::new()
            .with_base_url("http://localhost:8080")
            .with_timeout(5);
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(config.timeout_secs, 5);
    }
}
