//! Remote text-completion backend for the chat widget.

use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use super::session::{ChatMessage, Role};
use crate::config::ChatConfig;
use crate::error::ChatError;

/// Request/response contract of the assistant: one user message plus prior
/// turns in, one assistant message out.
#[allow(async_fn_in_trait)]
pub trait ChatBackend {
	async fn send_message(&self, message: &str, history: &[ChatMessage])
	-> Result<String, ChatError>;
}

#[derive(Serialize, Debug, PartialEq)]
struct Part {
	text: String,
}

#[derive(Serialize, Debug, PartialEq)]
struct Content {
	#[serde(skip_serializing_if = "Option::is_none")]
	role: Option<&'static str>,
	parts: Vec<Part>,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
	system_instruction: Content,
	contents: Vec<Content>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct GenerateResponse {
	candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct Candidate {
	content: CandidateContent,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct CandidateContent {
	parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct CandidatePart {
	text: Option<String>,
}

fn turn(role: Role, text: &str) -> Content {
	Content {
		role: Some(match role {
			Role::User => "user",
			Role::Model => "model",
		}),
		parts: vec![Part { text: text.into() }],
	}
}

fn build_request(system_instruction: &str, message: &str, history: &[ChatMessage]) -> GenerateRequest {
	// The conversation has to open with a user turn, so the greeting stays local.
	let contents = history
		.iter()
		.skip_while(|m| m.role == Role::Model)
		.map(|m| turn(m.role, &m.text))
		.chain(std::iter::once(turn(Role::User, message)))
		.collect();
	GenerateRequest {
		system_instruction: Content {
			role: None,
			parts: vec![Part {
				text: system_instruction.into(),
			}],
		},
		contents,
	}
}

fn parse_reply(body: &str) -> Result<String, ChatError> {
	let response: GenerateResponse = serde_json::from_str(body)
		.map_err(|e| ChatError::BackendUnavailable(format!("malformed response: {e}")))?;
	Ok(response
		.candidates
		.into_iter()
		.next()
		.map(|c| c.content.parts.into_iter().filter_map(|p| p.text).collect::<String>())
		.unwrap_or_default())
}

/// The API key travels as a header, never in the URL.
fn request_headers(api_key: &str) -> [(&'static str, &str); 2] {
	[("Content-Type", "application/json"), ("x-goog-api-key", api_key)]
}

fn js_error(err: JsValue) -> ChatError {
	ChatError::BackendUnavailable(format!("{err:?}"))
}

/// Google Gemini `generateContent` over the browser's `fetch`.
#[derive(Clone, Debug)]
pub struct GeminiBackend {
	config: ChatConfig,
	system_instruction: String,
}

impl GeminiBackend {
	pub fn new(config: ChatConfig, system_instruction: impl Into<String>) -> Self {
		Self {
			config,
			system_instruction: system_instruction.into(),
		}
	}

	fn url(&self) -> String {
		format!(
			"{}/models/{}:generateContent",
			self.config.endpoint.trim_end_matches('/'),
			self.config.model
		)
	}

	async fn post(&self, api_key: &str, body: &str) -> Result<String, ChatError> {
		let window = web_sys::window()
			.ok_or_else(|| ChatError::BackendUnavailable("no window".into()))?;

		let headers = Headers::new().map_err(js_error)?;
		for (name, value) in request_headers(api_key) {
			headers.set(name, value).map_err(js_error)?;
		}

		let init = RequestInit::new();
		init.set_method("POST");
		init.set_headers(&headers);
		init.set_body(&JsValue::from_str(body));
		let request = Request::new_with_str_and_init(&self.url(), &init).map_err(js_error)?;

		let response: Response = JsFuture::from(window.fetch_with_request(&request))
			.await
			.map_err(js_error)?
			.dyn_into()
			.map_err(js_error)?;
		if !response.ok() {
			return Err(ChatError::BackendUnavailable(format!(
				"HTTP {} {}",
				response.status(),
				response.status_text()
			)));
		}

		JsFuture::from(response.text().map_err(js_error)?)
			.await
			.map_err(js_error)?
			.as_string()
			.ok_or_else(|| ChatError::BackendUnavailable("response body is not text".into()))
	}
}

impl ChatBackend for GeminiBackend {
	async fn send_message(
		&self,
		message: &str,
		history: &[ChatMessage],
	) -> Result<String, ChatError> {
		let api_key = self
			.config
			.api_key
			.as_deref()
			.ok_or(ChatError::NotInitialized)?;
		let request = build_request(&self.system_instruction, message, history);
		let body = serde_json::to_string(&request)
			.map_err(|e| ChatError::BackendUnavailable(e.to_string()))?;
		let reply = self.post(api_key, &body).await?;
		parse_reply(&reply)
	}
}
