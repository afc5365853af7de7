use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::WorkflowState;
use super::types::Point;

/// `performance.now()` in seconds, the timeline `requestAnimationFrame`
/// timestamps share. `None` without a window or Performance API.
pub fn now_seconds() -> Option<f64> {
	web_sys::window()?.performance().map(|p| p.now() / 1000.0)
}

fn canvas_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.unwrap_or((800.0, 600.0))
}

fn pointer_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<Point> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some(Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Canvas surface for the workflow graph. Owns the render loop and translates
/// mouse events into [`WorkflowState`] gestures.
#[component]
pub fn WorkflowCanvas(state: RwSignal<WorkflowState>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let animate: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("no window; workflow canvas disabled");
			return;
		};

		let (w, h) = canvas_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		state.update_untracked(|s| s.resize(w, h));

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					warn!("2d context has an unexpected type");
					return;
				}
			},
			_ => {
				warn!("canvas 2d context unavailable");
				return;
			}
		};

		let canvas_resize = canvas.clone();
		*resize_cb.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = canvas_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			state.update_untracked(|s| s.resize(nw, nh));
		}));
		if let Some(ref cb) = *resize_cb.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let animate_inner = animate.clone();
		*animate.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
			let finished = state
				.try_update_untracked(|s| {
					let was_running = s.is_executing();
					s.advance_to(timestamp / 1000.0);
					was_running && !s.is_executing()
				})
				.unwrap_or(false);
			if finished {
				state.notify();
			}
			state.with_untracked(|s| render::render(s, &ctx));

			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		if let Some(p) = pointer_position(canvas_ref, &ev) {
			state.update_untracked(|s| s.pointer_down(p));
		}
	};

	let on_mousemove = move |ev: MouseEvent| {
		if let Some(p) = pointer_position(canvas_ref, &ev) {
			state.update_untracked(|s| s.pointer_move(p));
		}
	};

	// Selection may change on release, so this one notifies subscribers.
	let on_mouseup = move |_: MouseEvent| {
		state.update(|s| {
			s.pointer_up();
		});
	};

	let on_mouseleave = move |_: MouseEvent| {
		state.update_untracked(|s| s.pointer_leave());
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(p) = pointer_position(canvas_ref, &ev) {
			state.update_untracked(|s| s.wheel(p, ev.delta_y()));
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="workflow-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
