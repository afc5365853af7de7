//! Tunable constants for the canvas, the execution pulse and the chat backend.

use crate::components::workflow::Point;

/// Default Gemini model used when `GEMINI_MODEL` is not set at build time.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Base URL of the Gemini REST API.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Zoom bounds and step applied by the viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomConfig {
	pub min: f64,
	pub max: f64,
	pub step: f64,
}

impl Default for ZoomConfig {
	fn default() -> Self {
		Self {
			min: 0.5,
			max: 2.0,
			step: 0.1,
		}
	}
}

/// Where connectors attach to a node, relative to its stored position.
#[derive(Clone, Debug, PartialEq)]
pub struct AnchorConfig {
	/// Output anchor on the right edge of the source body.
	pub source: Point,
	/// Input anchor just left of the target body.
	pub target: Point,
	/// Horizontal distance from an anchor to its bezier handle.
	pub handle_length: f64,
}

impl Default for AnchorConfig {
	fn default() -> Self {
		Self {
			source: Point::new(250.0, 40.0),
			target: Point::new(-10.0, 40.0),
			handle_length: 50.0,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct CanvasConfig {
	pub node_width: f64,
	pub node_height: f64,
	pub header_height: f64,
	pub anchors: AnchorConfig,
	pub zoom: ZoomConfig,
	/// Screen-space movement below which a node gesture counts as a click.
	pub click_tolerance: f64,
	pub grid_spacing: f64,
}

impl Default for CanvasConfig {
	fn default() -> Self {
		Self {
			node_width: 256.0,
			node_height: 112.0,
			header_height: 40.0,
			anchors: AnchorConfig::default(),
			zoom: ZoomConfig::default(),
			click_tolerance: 3.0,
			grid_spacing: 20.0,
		}
	}
}

/// Timing of the cosmetic "execute workflow" animation, in seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct PulseConfig {
	pub duration: f64,
	pub min_delay: f64,
	pub max_delay: f64,
}

impl Default for PulseConfig {
	fn default() -> Self {
		Self {
			duration: 3.0,
			min_delay: 1.0,
			max_delay: 2.0,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatConfig {
	pub api_key: Option<String>,
	pub model: String,
	pub endpoint: String,
}

impl Default for ChatConfig {
	fn default() -> Self {
		Self {
			api_key: None,
			model: DEFAULT_MODEL.into(),
			endpoint: DEFAULT_ENDPOINT.into(),
		}
	}
}

/// Top-level configuration handed to the page at startup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppConfig {
	pub canvas: CanvasConfig,
	pub pulse: PulseConfig,
	pub chat: ChatConfig,
}

impl AppConfig {
	/// Defaults overlaid with values baked in at build time.
	///
	/// A CSR bundle has no runtime environment, so `GEMINI_API_KEY` and
	/// `GEMINI_MODEL` are read when the crate is compiled.
	pub fn from_env() -> Self {
		Self::default().with_overrides(option_env!("GEMINI_API_KEY"), option_env!("GEMINI_MODEL"))
	}

	fn with_overrides(mut self, api_key: Option<&str>, model: Option<&str>) -> Self {
		self.chat.api_key = api_key
			.map(str::trim)
			.filter(|k| !k.is_empty())
			.map(Into::into);
		if let Some(model) = model.map(str::trim).filter(|m| !m.is_empty()) {
			self.chat.model = model.into();
		}
		self
	}
}
