use reqwest::header::CONTENT_TYPE;
use serde_derive::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

// Keep error bodies short enough to read on one screen
const MAX_ERROR_BODY: usize = 300;

#[derive(Debug, Error)]
pub enum ApiError {
	#[error("OPENAI_API_KEY is not set")]
	MissingCredential,
	#[error("Invalid API base URL: {0}")]
	Endpoint(#[from] url::ParseError),
	#[error("ChatCompletion request failed: {0}")]
	Request(#[from] reqwest::Error),
	#[error("ChatCompletion returned {status}: {body}")]
	BadStatus { status: reqwest::StatusCode, body: String },
	#[error("Malformed response: {0}")]
	MalformedResponse(#[from] serde_json::Error),
	#[error("Response contained no choices")]
	NoChoices,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Message {
	pub role: String,
	pub content: String,
}

#[derive(Serialize, Debug)]
pub struct ChatRequest {
	pub model: String,
	pub messages: Vec<Message>,
}

#[derive(Deserialize, Debug)]
pub struct Choice {
	pub message: Message,
}

#[derive(Deserialize, Debug)]
pub struct ChatResponse {
	pub choices: Vec<Choice>,
}

pub struct ClientContext {
	model: String,
	api_key: String,
	post_url: Url,
}

impl ClientContext {
	/// Resolves the credential and endpoint from the environment. Fails with
	/// `MissingCredential` before any request is built, so a run without an
	/// API key never reaches the network.
	pub fn from_env(model: &str) -> Result<Self, ApiError> {
		let api_key = match env::var("OPENAI_API_KEY") {
			Ok(key) if !key.is_empty() => key,
			_ => return Err(ApiError::MissingCredential),
		};
		let base = env::var("OPENAI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
		let post_url = Url::parse(&format!("{}/chat/completions", base.trim_end_matches('/')))?;
		Ok(ClientContext {
			model: model.to_string(),
			api_key,
			post_url,
		})
	}

	/// One blocking round-trip: the prompt goes out as a single user message,
	/// the first choice's content comes back. No history, no retry.
	pub async fn complete(&self, prompt: &str) -> Result<String, ApiError> {
		let request = ChatRequest {
			model: self.model.clone(),
			messages: vec![Message {
				role: "user".to_string(),
				content: prompt.to_string(),
			}],
		};
		let serialised = serde_json::to_string(&request)?;
		let client = reqwest::Client::new();
		let resp = client
			.post(self.post_url.clone())
			.bearer_auth(&self.api_key)
			.header(CONTENT_TYPE, "application/json")
			.body(serialised)
			.send()
			.await?;
		let status = resp.status();
		let body = resp.text().await?;
		if !status.is_success() {
			return Err(ApiError::BadStatus {
				status,
				body: truncated(&body),
			});
		}
		Self::parse_response(&body)
	}

	pub fn parse_response(body: &str) -> Result<String, ApiError> {
		let response: ChatResponse = serde_json::from_str(body)?;
		let choice = response.choices.into_iter().next().ok_or(ApiError::NoChoices)?;
		Ok(choice.message.content)
	}
}

fn truncated(body: &str) -> String {
	body.chars().take(MAX_ERROR_BODY).collect()
}
