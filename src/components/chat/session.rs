//! Chat history and the send/await/receive cycle, independent of the UI.

use log::{debug, error};

use crate::error::ChatError;

/// Shown when the backend fails for any reason.
pub const FALLBACK_REPLY: &str =
	"Sorry, I couldn't reach the AI service. Please check your API key configuration.";
/// Shown when the backend answers with nothing.
pub const EMPTY_REPLY: &str = "I'm having trouble connecting right now.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
	User,
	Model,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
	pub id: u64,
	pub role: Role,
	pub text: String,
}

/// One outgoing message plus the turns that preceded it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatRequest {
	pub message: String,
	pub history: Vec<ChatMessage>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatSession {
	messages: Vec<ChatMessage>,
	input: String,
	awaiting_reply: bool,
	next_id: u64,
}

impl ChatSession {
	/// A session opened by the assistant's greeting.
	pub fn new(greeting: &str) -> Self {
		let mut session = Self::default();
		session.push(Role::Model, greeting.into());
		session
	}

	pub fn messages(&self) -> &[ChatMessage] {
		&self.messages
	}

	pub fn input(&self) -> &str {
		&self.input
	}

	pub fn set_input(&mut self, text: impl Into<String>) {
		self.input = text.into();
	}

	/// Changes whenever a row is added to the transcript or the pending
	/// indicator appears or goes away. Editing the input leaves it alone.
	pub fn transcript_key(&self) -> (u64, bool) {
		(self.next_id, self.awaiting_reply)
	}

	pub fn is_awaiting_reply(&self) -> bool {
		self.awaiting_reply
	}

	/// Input is editable whenever no reply is outstanding.
	pub fn input_enabled(&self) -> bool {
		!self.awaiting_reply
	}

	pub fn can_send(&self) -> bool {
		!self.awaiting_reply && !self.input.trim().is_empty()
	}

	/// Moves the pending input into the history and returns the request to send.
	/// Returns `None` while a reply is outstanding or the input is blank.
	pub fn begin_send(&mut self) -> Option<ChatRequest> {
		if !self.can_send() {
			return None;
		}
		let message = std::mem::take(&mut self.input);
		let history = self.messages.clone();
		self.push(Role::User, message.clone());
		self.awaiting_reply = true;
		debug!("chat request with {} prior turns", history.len());
		Some(ChatRequest { message, history })
	}

	/// Records the backend's answer, or the fallback text on failure, and
	/// re-enables input.
	pub fn finish(&mut self, reply: Result<String, ChatError>) {
		let text = match reply {
			Ok(text) if text.trim().is_empty() => EMPTY_REPLY.into(),
			Ok(text) => text,
			Err(err) => {
				error!("chat backend failed: {err}");
				FALLBACK_REPLY.into()
			}
		};
		self.push(Role::Model, text);
		self.awaiting_reply = false;
	}

	fn push(&mut self, role: Role, text: String) {
		self.next_id += 1;
		self.messages.push(ChatMessage {
			id: self.next_id,
			role,
			text,
		});
	}
}
