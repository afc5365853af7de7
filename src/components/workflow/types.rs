use std::ops::{Add, Div, Mul, Sub};

use serde::Deserialize;

/// A 2D point or offset. Used for both world and screen space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn length(self) -> f64 {
		(self.x * self.x + self.y * self.y).sqrt()
	}
}

impl Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Mul<f64> for Point {
	type Output = Point;

	fn mul(self, k: f64) -> Point {
		Point::new(self.x * k, self.y * k)
	}
}

impl Div<f64> for Point {
	type Output = Point;

	fn div(self, k: f64) -> Point {
		Point::new(self.x / k, self.y / k)
	}
}

/// Presentation tag of a node. Has no effect on geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeKind {
	Trigger,
	Action,
	Router,
	Note,
}

impl NodeKind {
	pub fn as_str(self) -> &'static str {
		match self {
			NodeKind::Trigger => "TRIGGER",
			NodeKind::Action => "ACTION",
			NodeKind::Router => "ROUTER",
			NodeKind::Note => "NOTE",
		}
	}
}

/// Content shown in the detail drawer. Never read by the canvas core.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NodeDetails {
	pub title: Option<String>,
	pub subtitle: Option<String>,
	pub content: Vec<String>,
	pub tags: Vec<String>,
	pub link: Option<String>,
	pub date: Option<String>,
	pub location: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Node {
	pub id: String,
	pub kind: NodeKind,
	pub label: String,
	pub position: Point,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub category: Option<String>,
	#[serde(default)]
	pub details: Option<NodeDetails>,
	/// Ids of the nodes this one connects to, in authored order.
	#[serde(default)]
	pub outputs: Vec<String>,
}

#[cfg(test)]
impl Node {
	pub fn new(id: &str, kind: NodeKind, x: f64, y: f64) -> Self {
		Self {
			id: id.into(),
			kind,
			label: id.into(),
			position: Point::new(x, y),
			description: None,
			category: None,
			details: None,
			outputs: Vec::new(),
		}
	}

	pub fn with_outputs(mut self, outputs: &[&str]) -> Self {
		self.outputs = outputs.iter().map(|&o| o.into()).collect();
		self
	}
}
