use std::time::Duration;

use leptos::ev::MouseEvent;
use leptos::prelude::*;

use crate::components::chat::{ChatWidget, GeminiBackend};
use crate::components::drawer::DetailDrawer;
use crate::components::workflow::{WorkflowCanvas, WorkflowState, now_seconds};
use crate::config::AppConfig;
use crate::fixture::Fixture;

/// Timeouts may fire slightly early against a coarsened `performance.now()`.
const TIMEOUT_SLACK: Duration = Duration::from_millis(50);

/// Navbar, canvas, floating zoom controls, detail drawer and chat for one
/// résumé fixture.
#[component]
fn Workflow(fixture: Fixture, config: AppConfig) -> impl IntoView {
	let Fixture {
		profile,
		assistant,
		nodes,
	} = fixture;
	let AppConfig {
		canvas,
		pulse,
		chat,
	} = config;

	let run_length = Duration::from_secs_f64(pulse.duration.max(0.0));
	let state = RwSignal::new(WorkflowState::new(nodes, canvas, pulse));
	let executing = Memo::new(move |_| state.with(|s| s.is_executing()));
	let selected = Memo::new(move |_| state.with(|s| s.selected_node().cloned()));
	let on_close = Callback::new(move |_: ()| state.update(|s| s.clear_selection()));
	let backend = GeminiBackend::new(chat, assistant.system_instruction);

	// A missing clock reads as the pulse's own, which only the render loop moves.
	let now = move || now_seconds().unwrap_or_else(|| state.with_untracked(|s| s.pulse.clock()));

	let execute = move |_: MouseEvent| {
		let at = now();
		let started = state
			.try_update(|s| s.execute(at, js_sys::Math::random))
			.unwrap_or(false);
		// Ends the run even while rAF is paused in a hidden tab.
		if started {
			set_timeout(
				move || {
					let at = now();
					state.update(|s| s.advance_to(at));
				},
				run_length + TIMEOUT_SLACK,
			);
		}
	};

	view! {
		<div class="workflow-app">
			<nav class="navbar">
				<div class="brand">
					<div class="brand-logo">"n8n"</div>
					<div>
						<h1>{profile.name}<span class="muted">" / Workflow Resume"</span></h1>
						<div class="status">
							<span class="status-dot"></span>
							<span>"Active"</span>
							<span>"•"</span>
							<span>{profile.title}</span>
						</div>
					</div>
				</div>

				<div class="navbar-actions">
					{profile
						.socials
						.into_iter()
						.map(|social| {
							view! {
								<a class="social-link" href=social.url target="_blank" rel="noreferrer">
									{social.name}
								</a>
							}
						})
						.collect_view()}
					<button
						class="execute-button"
						class:running=move || executing.get()
						disabled=move || executing.get()
						on:click=execute
					>
						{move || if executing.get() { "Executing..." } else { "Execute Workflow" }}
					</button>
				</div>
			</nav>

			<main class="canvas-area">
				<WorkflowCanvas state=state />
				<div class="floating-controls">
					<button title="Zoom in" on:click=move |_| state.update(|s| s.viewport.zoom_in())>
						"+"
					</button>
					<button title="Zoom out" on:click=move |_| state.update(|s| s.viewport.zoom_out())>
						"−"
					</button>
					<button title="Reset view" on:click=move |_| state.update(|s| s.viewport.reset())>
						"⟲"
					</button>
				</div>
			</main>

			<DetailDrawer node=selected on_close=on_close />
			<ChatWidget backend=backend title=assistant.title greeting=assistant.greeting />
		</div>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let config = AppConfig::from_env();
	if config.chat.api_key.is_none() {
		log::warn!("GEMINI_API_KEY not set at build time; chat will answer with a fallback");
	}

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{Fixture::bundled().map(|fixture| view! { <Workflow fixture=fixture config=config.clone() /> })}
		</ErrorBoundary>
	}
}
