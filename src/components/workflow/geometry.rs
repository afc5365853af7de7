//! Connector routing between node anchors.
//!
//! Every edge is a single cubic bezier leaving the source horizontally to the
//! right and entering the target horizontally from the left, which yields the
//! S-curve when the target sits above or below the source.

use super::types::Point;
use crate::config::AnchorConfig;

/// Cubic bezier `start -> control1, control2 -> end` in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connector {
	pub start: Point,
	pub control1: Point,
	pub control2: Point,
	pub end: Point,
}

impl Connector {
	/// Derives the connector from the two node positions. Pure in its inputs.
	pub fn between(source: Point, target: Point, anchors: &AnchorConfig) -> Self {
		let start = source + anchors.source;
		let end = target + anchors.target;
		let handle = Point::new(anchors.handle_length, 0.0);
		Self {
			start,
			control1: start + handle,
			control2: end - handle,
			end,
		}
	}

	/// Point on the curve at `t` in `[0, 1]`.
	pub fn point_at(&self, t: f64) -> Point {
		let t = t.clamp(0.0, 1.0);
		let mt = 1.0 - t;
		let (a, b, c, d) = (mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t);
		self.start * a + self.control1 * b + self.control2 * c + self.end * d
	}

	/// SVG path data for the curve.
	pub fn to_svg_path(&self) -> String {
		format!(
			"M {} {} C {} {}, {} {}, {} {}",
			self.start.x,
			self.start.y,
			self.control1.x,
			self.control1.y,
			self.control2.x,
			self.control2.y,
			self.end.x,
			self.end.y,
		)
	}
}

/// A routed edge, keyed by its endpoint ids.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeGeometry {
	pub source: String,
	pub target: String,
	pub connector: Connector,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn anchors() -> AnchorConfig {
		AnchorConfig::default()
	}

	#[test]
	fn follows_anchor_and_handle_offsets() {
		let c = Connector::between(Point::new(100.0, 350.0), Point::new(400.0, 350.0), &anchors());
		assert_eq!(c.start, Point::new(350.0, 390.0));
		assert_eq!(c.control1, Point::new(400.0, 390.0));
		assert_eq!(c.control2, Point::new(340.0, 390.0));
		assert_eq!(c.end, Point::new(390.0, 390.0));
		assert_eq!(c.to_svg_path(), "M 350 390 C 400 390, 340 390, 390 390");
	}

	#[test]
	fn handles_stay_horizontal_when_target_is_above() {
		let c = Connector::between(Point::new(400.0, 350.0), Point::new(750.0, 100.0), &anchors());
		assert_eq!(c.control1.y, c.start.y);
		assert_eq!(c.control2.y, c.end.y);
		assert!(c.control1.x > c.start.x);
		assert!(c.control2.x < c.end.x);
	}

	#[test]
	fn is_deterministic() {
		let (s, t) = (Point::new(12.5, 80.0), Point::new(-300.0, 44.0));
		assert_eq!(
			Connector::between(s, t, &anchors()),
			Connector::between(s, t, &anchors())
		);
	}

	#[test]
	fn moving_source_leaves_target_side_untouched() {
		let target = Point::new(750.0, 250.0);
		let before = Connector::between(Point::new(400.0, 350.0), target, &anchors());
		let after = Connector::between(Point::new(420.0, 500.0), target, &anchors());
		assert_ne!(before.start, after.start);
		assert_ne!(before.control1, after.control1);
		assert_eq!(before.control2, after.control2);
		assert_eq!(before.end, after.end);
	}

	#[test]
	fn point_at_hits_endpoints() {
		let c = Connector::between(Point::new(0.0, 0.0), Point::new(500.0, 200.0), &anchors());
		assert_eq!(c.point_at(0.0), c.start);
		assert_eq!(c.point_at(1.0), c.end);
		let mid = c.point_at(0.5);
		assert!(mid.x > c.start.x && mid.x < c.end.x);
	}
}
