use log::debug;

use super::geometry::{Connector, EdgeGeometry};
use super::interaction::{GestureEnd, InteractionController, Selection};
use super::pulse::{NodePhase, PulseSimulator};
use super::store::GraphStore;
use super::types::{Node, Point};
use super::viewport::Viewport;
use crate::config::{CanvasConfig, PulseConfig};

/// Everything the workflow canvas knows during a session.
///
/// Pointer and button handlers mutate it; the render loop reads it once per
/// frame, so every mutation made while handling an event is visible together.
#[derive(Clone, Debug)]
pub struct WorkflowState {
	pub store: GraphStore,
	pub viewport: Viewport,
	pub interaction: InteractionController,
	pub selection: Selection,
	pub pulse: PulseSimulator,
	pub canvas: CanvasConfig,
	pub width: f64,
	pub height: f64,
}

impl WorkflowState {
	pub fn new(nodes: Vec<Node>, canvas: CanvasConfig, pulse: PulseConfig) -> Self {
		Self {
			store: GraphStore::new(nodes),
			viewport: Viewport::new(canvas.zoom.clone()),
			interaction: InteractionController::new(canvas.click_tolerance),
			selection: Selection::default(),
			pulse: PulseSimulator::new(pulse),
			canvas,
			width: 0.0,
			height: 0.0,
		}
	}

	/// Topmost node whose box contains the screen point. Later nodes are drawn
	/// above earlier ones, so they win.
	pub fn node_at_position(&self, screen: Point) -> Option<&Node> {
		let size = Point::new(self.canvas.node_width, self.canvas.node_height);
		self.store.nodes().iter().rev().find(|node| {
			let origin = self.interaction.display_position(node);
			let top_left = self.viewport.to_screen(origin);
			let bottom_right = self.viewport.to_screen(origin + size);
			screen.x >= top_left.x
				&& screen.x <= bottom_right.x
				&& screen.y >= top_left.y
				&& screen.y <= bottom_right.y
		})
	}

	pub fn pointer_down(&mut self, screen: Point) {
		let hit = self.node_at_position(screen).cloned();
		match hit {
			Some(node) => self.interaction.begin_drag(&node, screen),
			None => self.interaction.begin_pan(screen),
		}
	}

	pub fn pointer_move(&mut self, screen: Point) {
		self.interaction.pointer_move(screen, &mut self.viewport);
	}

	pub fn pointer_up(&mut self) -> Option<GestureEnd> {
		self.interaction
			.pointer_up(&mut self.store, &mut self.selection)
	}

	pub fn pointer_leave(&mut self) {
		self.interaction.pointer_leave();
	}

	/// One zoom step around the cursor, out for positive `delta_y`. Purely
	/// horizontal scrolling leaves the zoom alone.
	pub fn wheel(&mut self, screen: Point, delta_y: f64) {
		if delta_y == 0.0 || delta_y.is_nan() {
			return;
		}
		self.viewport.zoom_at(screen, -delta_y.signum());
	}

	pub fn selected_node(&self) -> Option<&Node> {
		self.selection.resolve(&self.store)
	}

	pub fn clear_selection(&mut self) {
		self.selection.clear();
	}

	/// Starts the execution pulse at wall-clock time `now` (seconds) unless one
	/// is already running.
	pub fn execute(&mut self, now: f64, jitter: impl FnMut() -> f64) -> bool {
		self.advance_to(now);
		let ids = self.store.nodes().iter().map(|n| n.id.as_str());
		self.pulse.trigger(ids, jitter)
	}

	pub fn is_executing(&self) -> bool {
		self.pulse.is_running()
	}

	pub fn node_phase(&self, id: &str) -> NodePhase {
		self.pulse.phase(id)
	}

	/// Routed connectors for every resolvable edge, from the positions nodes are
	/// currently displayed at.
	pub fn connectors(&self) -> Vec<EdgeGeometry> {
		self.store
			.edges()
			.map(|(source, target)| EdgeGeometry {
				source: source.id.clone(),
				target: target.id.clone(),
				connector: Connector::between(
					self.interaction.display_position(source),
					self.interaction.display_position(target),
					&self.canvas.anchors,
				),
			})
			.collect()
	}

	/// Brings the pulse up to wall-clock time `now`, in seconds.
	pub fn advance_to(&mut self, now: f64) {
		let was_running = self.pulse.is_running();
		self.pulse.advance_to(now);
		if was_running && !self.pulse.is_running() {
			debug!("workflow execution finished");
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
