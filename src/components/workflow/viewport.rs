use log::trace;

use super::types::Point;
use crate::config::ZoomConfig;

/// Camera over the world-space canvas: `screen = world * scale + pan`.
///
/// The dot grid and the node layer both draw through this one transform.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
	pan: Point,
	scale: f64,
	zoom: ZoomConfig,
}

impl Default for Viewport {
	fn default() -> Self {
		Self::new(ZoomConfig::default())
	}
}

impl Viewport {
	pub fn new(zoom: ZoomConfig) -> Self {
		Self {
			pan: Point::ZERO,
			scale: 1.0,
			zoom,
		}
	}

	pub fn pan_offset(&self) -> Point {
		self.pan
	}

	pub fn scale(&self) -> f64 {
		self.scale
	}

	pub fn pan(&mut self, dx: f64, dy: f64) {
		self.pan = self.pan + Point::new(dx, dy);
	}

	pub fn zoom_in(&mut self) {
		self.set_scale(self.scale + self.zoom.step);
	}

	pub fn zoom_out(&mut self) {
		self.set_scale(self.scale - self.zoom.step);
	}

	/// Zooms one step in (`steps > 0`) or out around a screen point, keeping the
	/// world point under it fixed.
	pub fn zoom_at(&mut self, anchor: Point, steps: f64) {
		let world = self.to_world(anchor);
		self.set_scale(self.scale + steps * self.zoom.step);
		self.pan = anchor - world * self.scale;
	}

	pub fn reset(&mut self) {
		self.pan = Point::ZERO;
		self.scale = 1.0;
	}

	pub fn to_screen(&self, world: Point) -> Point {
		world * self.scale + self.pan
	}

	pub fn to_world(&self, screen: Point) -> Point {
		(screen - self.pan) / self.scale
	}

	fn set_scale(&mut self, scale: f64) {
		let clamped = scale.clamp(self.zoom.min, self.zoom.max);
		if clamped != scale {
			trace!("zoom {scale} clamped to {clamped}");
		}
		self.scale = clamped;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn starts_at_identity() {
		let vp = Viewport::default();
		assert_eq!(vp.pan_offset(), Point::ZERO);
		assert_eq!(vp.scale(), 1.0);
		assert_eq!(vp.to_screen(Point::new(12.0, -7.0)), Point::new(12.0, -7.0));
	}

	#[test]
	fn to_world_inverts_to_screen() {
		let points = [
			Point::new(0.0, 0.0),
			Point::new(100.0, 350.0),
			Point::new(-2048.5, 77.25),
		];
		for steps in [-5, -2, 0, 3, 10] {
			let mut vp = Viewport::default();
			vp.pan(37.0, -120.5);
			for _ in 0..steps.max(0) {
				vp.zoom_in();
			}
			for _ in 0..(-steps).max(0) {
				vp.zoom_out();
			}
			for p in points {
				let back = vp.to_world(vp.to_screen(p));
				assert!((back.x - p.x).abs() < 1e-9, "{p:?} -> {back:?}");
				assert!((back.y - p.y).abs() < 1e-9, "{p:?} -> {back:?}");
			}
		}
	}

	#[test]
	fn exact_round_trip_at_representable_scales() {
		let mut vp = Viewport::default();
		vp.pan(64.0, 32.0);
		for _ in 0..20 {
			vp.zoom_out();
		}
		assert_eq!(vp.scale(), 0.5);
		let p = Point::new(300.0, -44.0);
		assert_eq!(vp.to_screen(p), Point::new(214.0, 10.0));
		assert_eq!(vp.to_world(vp.to_screen(p)), p);
	}

	#[test]
	fn zoom_in_clamps_at_upper_bound() {
		let mut vp = Viewport::default();
		for _ in 0..25 {
			vp.zoom_in();
		}
		assert_eq!(vp.scale(), 2.0);
		vp.zoom_in();
		assert_eq!(vp.scale(), 2.0);
	}

	#[test]
	fn zoom_out_clamps_at_lower_bound() {
		let mut vp = Viewport::default();
		for _ in 0..25 {
			vp.zoom_out();
		}
		assert_eq!(vp.scale(), 0.5);
		vp.zoom_out();
		assert_eq!(vp.scale(), 0.5);
	}

	#[test]
	fn pan_accumulates_and_reset_restores_identity() {
		let mut vp = Viewport::default();
		vp.pan(10.0, 5.0);
		vp.pan(-3.0, 2.5);
		vp.zoom_in();
		assert_eq!(vp.pan_offset(), Point::new(7.0, 7.5));
		vp.reset();
		assert_eq!(vp.pan_offset(), Point::ZERO);
		assert_eq!(vp.scale(), 1.0);
	}

	#[test]
	fn zoom_at_keeps_anchor_fixed() {
		let mut vp = Viewport::default();
		vp.pan(40.0, 40.0);
		let anchor = Point::new(300.0, 200.0);
		let before = vp.to_world(anchor);
		vp.zoom_at(anchor, 3.0);
		let after = vp.to_world(anchor);
		assert!((vp.scale() - 1.3).abs() < 1e-9);
		assert!((before.x - after.x).abs() < 1e-9);
		assert!((before.y - after.y).abs() < 1e-9);
	}
}
