//! Pointer gestures: canvas panning, node dragging and node selection.

use log::{debug, warn};

use super::store::GraphStore;
use super::types::{Node, Point};
use super::viewport::Viewport;

/// At most one selected node, held by id and re-resolved on every read.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
	id: Option<String>,
}

impl Selection {
	pub fn select(&mut self, id: &str) {
		debug!("selected node {id}");
		self.id = Some(id.into());
	}

	pub fn clear(&mut self) {
		self.id = None;
	}

	pub fn id(&self) -> Option<&str> {
		self.id.as_deref()
	}

	/// The selected node, or `None` if nothing is selected or the id no longer
	/// resolves.
	pub fn resolve<'a>(&self, store: &'a GraphStore) -> Option<&'a Node> {
		self.id.as_deref().and_then(|id| store.get_node(id))
	}
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub last: Point,
}

#[derive(Clone, Debug)]
pub struct DragState {
	pub node_id: String,
	/// Screen position of the pointer when the gesture began.
	pub pointer_start: Point,
	/// Committed world position of the node when the gesture began.
	pub node_start: Point,
	/// Live world-space offset since the gesture began.
	pub offset: Point,
	/// Largest screen distance the pointer has travelled from its start.
	pub travel: f64,
}

/// How a released node gesture ended.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureEnd {
	Clicked(String),
	Moved { id: String, position: Point },
}

#[derive(Clone, Debug, Default)]
pub struct InteractionController {
	pan: Option<PanState>,
	drag: Option<DragState>,
	click_tolerance: f64,
}

impl InteractionController {
	pub fn new(click_tolerance: f64) -> Self {
		Self {
			click_tolerance,
			..Self::default()
		}
	}

	/// Pointer went down on empty canvas. Supersedes any pan in progress.
	pub fn begin_pan(&mut self, screen: Point) {
		self.pan = Some(PanState { last: screen });
	}

	/// Pointer went down on a node. Supersedes any drag in progress.
	pub fn begin_drag(&mut self, node: &Node, screen: Point) {
		self.drag = Some(DragState {
			node_id: node.id.clone(),
			pointer_start: screen,
			node_start: node.position,
			offset: Point::ZERO,
			travel: 0.0,
		});
	}

	pub fn pointer_move(&mut self, screen: Point, viewport: &mut Viewport) {
		if let Some(drag) = self.drag.as_mut() {
			let moved = screen - drag.pointer_start;
			drag.travel = drag.travel.max(moved.length());
			drag.offset = moved / viewport.scale();
		}
		if let Some(pan) = self.pan.as_mut() {
			let delta = screen - pan.last;
			viewport.pan(delta.x, delta.y);
			pan.last = screen;
		}
	}

	/// Ends every active gesture. A node gesture that stayed within the click
	/// tolerance selects the node; otherwise its final offset is committed to
	/// the store.
	pub fn pointer_up(
		&mut self,
		store: &mut GraphStore,
		selection: &mut Selection,
	) -> Option<GestureEnd> {
		self.pan = None;
		let drag = self.drag.take()?;

		if drag.travel <= self.click_tolerance {
			selection.select(&drag.node_id);
			return Some(GestureEnd::Clicked(drag.node_id));
		}

		let position = drag.node_start + drag.offset;
		match store.set_position(&drag.node_id, position.x, position.y) {
			Ok(()) => {
				debug!("committed {} at ({}, {})", drag.node_id, position.x, position.y);
				Some(GestureEnd::Moved {
					id: drag.node_id,
					position,
				})
			}
			Err(err) => {
				warn!("drag commit dropped: {err}");
				None
			}
		}
	}

	/// Pointer left the canvas: stop panning and abandon any unreleased drag.
	pub fn pointer_leave(&mut self) {
		self.pan = None;
		if let Some(drag) = self.drag.take() {
			debug!("drag of {} cancelled", drag.node_id);
		}
	}

	/// Where a node should be drawn: its committed position plus the live
	/// offset while it is being dragged.
	pub fn display_position(&self, node: &Node) -> Point {
		match &self.drag {
			Some(drag) if drag.node_id == node.id => node.position + drag.offset,
			_ => node.position,
		}
	}
}

#[cfg(test)]
impl InteractionController {
	pub fn is_panning(&self) -> bool {
		self.pan.is_some()
	}

	pub fn dragged_id(&self) -> Option<&str> {
		self.drag.as_ref().map(|d| d.node_id.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::workflow::types::NodeKind;

	fn store() -> GraphStore {
		GraphStore::new(vec![
			Node::new("start", NodeKind::Trigger, 100.0, 350.0),
			Node::new("router", NodeKind::Router, 400.0, 350.0),
		])
	}

	fn node<'a>(store: &'a GraphStore, id: &str) -> &'a Node {
		store.get_node(id).unwrap()
	}

	#[test]
	fn released_drag_commits_start_plus_offset() {
		let mut store = store();
		let mut vp = Viewport::default();
		let mut selection = Selection::default();
		let mut ctl = InteractionController::new(3.0);

		ctl.begin_drag(node(&store, "start"), Point::new(120.0, 380.0));
		ctl.pointer_move(Point::new(140.0, 370.0), &mut vp);
		ctl.pointer_move(Point::new(170.0, 360.0), &mut vp);

		let end = ctl.pointer_up(&mut store, &mut selection);
		assert_eq!(
			end,
			Some(GestureEnd::Moved {
				id: "start".into(),
				position: Point::new(150.0, 330.0)
			})
		);
		assert_eq!(node(&store, "start").position, Point::new(150.0, 330.0));
		assert_eq!(selection.id(), None);
	}

	#[test]
	fn unreleased_drag_leaves_store_untouched() {
		let store = store();
		let mut vp = Viewport::default();
		let mut ctl = InteractionController::new(3.0);

		ctl.begin_drag(node(&store, "start"), Point::new(120.0, 380.0));
		ctl.pointer_move(Point::new(170.0, 360.0), &mut vp);

		let start = node(&store, "start");
		assert_eq!(start.position, Point::new(100.0, 350.0));
		assert_eq!(ctl.display_position(start), Point::new(150.0, 330.0));
		assert_eq!(ctl.display_position(node(&store, "router")), Point::new(400.0, 350.0));
	}

	#[test]
	fn leaving_the_canvas_cancels_the_drag() {
		let mut store = store();
		let mut vp = Viewport::default();
		let mut selection = Selection::default();
		let mut ctl = InteractionController::new(3.0);

		ctl.begin_drag(node(&store, "start"), Point::new(120.0, 380.0));
		ctl.pointer_move(Point::new(300.0, 300.0), &mut vp);
		ctl.pointer_leave();

		assert!(ctl.dragged_id().is_none());
		assert_eq!(ctl.pointer_up(&mut store, &mut selection), None);
		assert_eq!(node(&store, "start").position, Point::new(100.0, 350.0));
	}

	#[test]
	fn drag_offset_is_scaled_into_world_units() {
		let mut store = store();
		let mut vp = Viewport::default();
		for _ in 0..20 {
			vp.zoom_in();
		}
		let mut selection = Selection::default();
		let mut ctl = InteractionController::new(3.0);

		ctl.begin_drag(node(&store, "router"), Point::new(0.0, 0.0));
		ctl.pointer_move(Point::new(100.0, -40.0), &mut vp);
		ctl.pointer_up(&mut store, &mut selection);

		assert_eq!(node(&store, "router").position, Point::new(450.0, 330.0));
	}

	#[test]
	fn small_movement_is_a_click_that_selects() {
		let mut store = store();
		let mut vp = Viewport::default();
		let mut selection = Selection::default();
		let mut ctl = InteractionController::new(3.0);

		ctl.begin_drag(node(&store, "router"), Point::new(500.0, 400.0));
		ctl.pointer_move(Point::new(501.0, 401.0), &mut vp);
		let end = ctl.pointer_up(&mut store, &mut selection);

		assert_eq!(end, Some(GestureEnd::Clicked("router".into())));
		assert_eq!(selection.id(), Some("router"));
		assert_eq!(node(&store, "router").position, Point::new(400.0, 350.0));
		assert_eq!(vp.pan_offset(), Point::ZERO);
	}

	#[test]
	fn pan_applies_incremental_deltas() {
		let mut store = store();
		let mut vp = Viewport::default();
		let mut selection = Selection::default();
		let mut ctl = InteractionController::new(3.0);

		ctl.begin_pan(Point::new(10.0, 10.0));
		assert!(ctl.is_panning());
		ctl.pointer_move(Point::new(15.0, 12.0), &mut vp);
		ctl.pointer_move(Point::new(25.0, 2.0), &mut vp);
		assert_eq!(vp.pan_offset(), Point::new(15.0, -8.0));

		ctl.pointer_up(&mut store, &mut selection);
		assert!(!ctl.is_panning());
		ctl.pointer_move(Point::new(90.0, 90.0), &mut vp);
		assert_eq!(vp.pan_offset(), Point::new(15.0, -8.0));
	}

	#[test]
	fn leaving_the_canvas_ends_a_pan() {
		let mut vp = Viewport::default();
		let mut ctl = InteractionController::new(3.0);

		ctl.begin_pan(Point::new(10.0, 10.0));
		ctl.pointer_move(Point::new(30.0, 20.0), &mut vp);
		ctl.pointer_leave();
		assert!(!ctl.is_panning());

		// Moves after re-entering without a press must not pan.
		ctl.pointer_move(Point::new(200.0, 200.0), &mut vp);
		assert_eq!(vp.pan_offset(), Point::new(20.0, 10.0));
	}

	#[test]
	fn new_pan_supersedes_previous_one() {
		let mut vp = Viewport::default();
		let mut ctl = InteractionController::new(3.0);

		ctl.begin_pan(Point::new(0.0, 0.0));
		ctl.begin_pan(Point::new(100.0, 100.0));
		ctl.pointer_move(Point::new(110.0, 100.0), &mut vp);
		assert_eq!(vp.pan_offset(), Point::new(10.0, 0.0));
	}

	#[test]
	fn selection_degrades_to_none_for_unknown_ids() {
		let store = store();
		let mut selection = Selection::default();
		selection.select("router");
		assert_eq!(selection.resolve(&store).map(|n| n.id.as_str()), Some("router"));
		selection.select("removed");
		assert!(selection.resolve(&store).is_none());
		selection.clear();
		assert_eq!(selection.id(), None);
	}
}
