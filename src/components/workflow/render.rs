use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, Path2d};

use super::geometry::Connector;
use super::pulse::NodePhase;
use super::state::WorkflowState;
use super::types::{Node, NodeKind, Point};

const BACKGROUND: &str = "#1b1b1f";
const GRID_DOT: &str = "rgba(255, 255, 255, 0.2)";
const EDGE: &str = "rgba(85, 85, 85, 0.6)";
const PULSE: &str = "#4ade80";
const NODE_BODY: &str = "#2d2d31";
const NODE_BORDER: &str = "#3f3f46";
const PRIMARY: &str = "#ff6d5a";
const RUNNING: &str = "#facc15";
const SUCCESS: &str = "#22c55e";
const CORNER: f64 = 8.0;
const DESCRIPTION_CHARS: usize = 36;

fn header_color(kind: NodeKind) -> &'static str {
	match kind {
		NodeKind::Trigger => "#13a870",
		NodeKind::Router => "#2563eb",
		NodeKind::Action => PRIMARY,
		NodeKind::Note => "#4b5563",
	}
}

/// Paints one frame. The grid, edges and nodes share a single transform.
pub fn render(state: &WorkflowState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let pan = state.viewport.pan_offset();
	let k = state.viewport.scale();
	let _ = ctx.translate(pan.x, pan.y);
	let _ = ctx.scale(k, k);
	draw_grid(state, ctx);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_grid(state: &WorkflowState, ctx: &CanvasRenderingContext2d) {
	let spacing = state.canvas.grid_spacing;
	if spacing <= 0.0 {
		return;
	}
	let top_left = state.viewport.to_world(Point::ZERO);
	let bottom_right = state.viewport.to_world(Point::new(state.width, state.height));
	let size = 1.5 / state.viewport.scale();

	ctx.set_fill_style_str(GRID_DOT);
	let mut x = (top_left.x / spacing).floor() * spacing;
	while x <= bottom_right.x {
		let mut y = (top_left.y / spacing).floor() * spacing;
		while y <= bottom_right.y {
			ctx.fill_rect(x, y, size, size);
			y += spacing;
		}
		x += spacing;
	}
}

fn stroke_connector(ctx: &CanvasRenderingContext2d, c: &Connector) {
	match Path2d::new_with_path_string(&c.to_svg_path()) {
		Ok(path) => ctx.stroke_with_path(&path),
		Err(_) => {
			ctx.begin_path();
			ctx.move_to(c.start.x, c.start.y);
			ctx.bezier_curve_to(
				c.control1.x,
				c.control1.y,
				c.control2.x,
				c.control2.y,
				c.end.x,
				c.end.y,
			);
			ctx.stroke();
		}
	}
}

fn draw_edges(state: &WorkflowState, ctx: &CanvasRenderingContext2d) {
	let executing = state.is_executing();
	let clock = state.pulse.clock();

	for edge in state.connectors() {
		let _ = ctx.set_line_dash(&js_sys::Array::new());
		ctx.set_stroke_style_str(EDGE);
		ctx.set_line_width(2.0);
		stroke_connector(ctx, &edge.connector);

		if !executing {
			continue;
		}

		// Dashes march toward the target once per second.
		ctx.set_stroke_style_str(PULSE);
		ctx.set_line_width(3.0);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(10.0),
			&JsValue::from_f64(5.0),
		));
		ctx.set_line_dash_offset(-(clock * 100.0) % 15.0);
		stroke_connector(ctx, &edge.connector);

		let marker = edge.connector.point_at(clock.fract());
		ctx.set_fill_style_str(PULSE);
		ctx.begin_path();
		let _ = ctx.arc(marker.x, marker.y, 4.0, 0.0, 2.0 * PI);
		ctx.fill();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn truncate(text: &str, max: usize) -> String {
	if text.chars().count() <= max {
		return text.to_string();
	}
	let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
	out.push('…');
	out
}

fn draw_nodes(state: &WorkflowState, ctx: &CanvasRenderingContext2d) {
	let selected = state.selection.id();
	for node in state.store.nodes() {
		let origin = state.interaction.display_position(node);
		let phase = state.node_phase(&node.id);
		draw_node(state, ctx, node, origin, phase, selected == Some(node.id.as_str()));
	}
}

fn draw_node(
	state: &WorkflowState,
	ctx: &CanvasRenderingContext2d,
	node: &Node,
	origin: Point,
	phase: NodePhase,
	is_selected: bool,
) {
	let (w, h, header) = (
		state.canvas.node_width,
		state.canvas.node_height,
		state.canvas.header_height,
	);
	let Point { x, y } = origin;

	rounded_rect(ctx, x, y, w, h, CORNER);
	ctx.set_fill_style_str(NODE_BODY);
	ctx.fill();
	ctx.set_stroke_style_str(NODE_BORDER);
	ctx.set_line_width(1.0);
	ctx.stroke();

	ctx.save();
	rounded_rect(ctx, x, y, w, h, CORNER);
	ctx.clip();
	ctx.set_fill_style_str(header_color(node.kind));
	ctx.fill_rect(x, y, w, header);
	ctx.restore();

	ctx.set_fill_style_str("white");
	ctx.set_font("bold 11px sans-serif");
	let _ = ctx.fill_text(node.kind.as_str(), x + 12.0, y + 24.0);

	ctx.set_fill_style_str("#e5e7eb");
	ctx.set_font("600 14px sans-serif");
	let _ = ctx.fill_text(&truncate(&node.label, 30), x + 16.0, y + header + 24.0);
	if let Some(description) = &node.description {
		ctx.set_fill_style_str("#9ca3af");
		ctx.set_font("12px sans-serif");
		let _ = ctx.fill_text(
			&truncate(description, DESCRIPTION_CHARS),
			x + 16.0,
			y + header + 44.0,
		);
	}

	for dot_x in [x, x + w] {
		ctx.begin_path();
		let _ = ctx.arc(dot_x, y + h / 2.0, 6.0, 0.0, 2.0 * PI);
		ctx.set_fill_style_str("#9ca3af");
		ctx.fill();
		ctx.set_stroke_style_str(NODE_BODY);
		ctx.set_line_width(2.0);
		ctx.stroke();
	}

	let ring = match phase {
		NodePhase::Running => Some(RUNNING),
		NodePhase::Success => Some(SUCCESS),
		NodePhase::Idle if is_selected => Some(PRIMARY),
		NodePhase::Idle => None,
	};
	if let Some(color) = ring {
		rounded_rect(ctx, x - 2.0, y - 2.0, w + 4.0, h + 4.0, CORNER + 2.0);
		ctx.set_stroke_style_str(color);
		ctx.set_line_width(2.0);
		ctx.stroke();
	}

	match phase {
		NodePhase::Running => {
			ctx.set_fill_style_str("rgba(0, 0, 0, 0.2)");
			rounded_rect(ctx, x, y, w, h, CORNER);
			ctx.fill();
			let spin = state.pulse.clock() * 2.0 * PI;
			ctx.begin_path();
			let _ = ctx.arc(x + w / 2.0, y + h / 2.0, 12.0, spin, spin + 1.5 * PI);
			ctx.set_stroke_style_str("white");
			ctx.set_line_width(2.0);
			ctx.stroke();
		}
		NodePhase::Success => {
			ctx.begin_path();
			let _ = ctx.arc(x + w - 34.0, y + header / 2.0, 4.0, 0.0, 2.0 * PI);
			ctx.set_fill_style_str("#86efac");
			ctx.fill();
		}
		NodePhase::Idle => {}
	}
}
