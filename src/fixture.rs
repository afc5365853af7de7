//! The résumé shown on the canvas, bundled into the binary as JSON.

use serde::Deserialize;

use crate::components::workflow::Node;
use crate::error::FixtureError;

const BUNDLED: &str = include_str!("../assets/resume.json");

/// A profile link shown in the navbar.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Social {
	pub name: String,
	pub url: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Profile {
	pub name: String,
	pub title: String,
	pub location: String,
	pub email: String,
	pub phone: String,
	#[serde(default)]
	pub summary: String,
	#[serde(default)]
	pub socials: Vec<Social>,
}

/// Copy for the chat panel and the instruction sent with every request.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AssistantCopy {
	pub title: String,
	pub greeting: String,
	pub system_instruction: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Fixture {
	pub profile: Profile,
	pub assistant: AssistantCopy,
	pub nodes: Vec<Node>,
}

impl Fixture {
	/// Parse the résumé compiled into the binary.
	pub fn bundled() -> Result<Self, FixtureError> {
		Self::from_json(BUNDLED)
	}

	pub fn from_json(json: &str) -> Result<Self, FixtureError> {
		Ok(serde_json::from_str(json)?)
	}
}
