use leptos::ev::KeyboardEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::backend::{ChatBackend, GeminiBackend};
use super::session::{ChatMessage, ChatSession, Role};

/// Floating assistant panel. One request may be in flight at a time; the input
/// and send button stay disabled until it resolves.
#[component]
pub fn ChatWidget(
	backend: GeminiBackend,
	#[prop(into)] title: String,
	#[prop(into)] greeting: String,
) -> impl IntoView {
	let session = RwSignal::new(ChatSession::new(&greeting));
	let is_open = RwSignal::new(false);
	let backend = StoredValue::new(backend);
	let transcript = NodeRef::<leptos::html::Div>::new();

	// Keep the newest row in view.
	let transcript_key = Memo::new(move |_| session.with(|s| s.transcript_key()));
	Effect::new(move |_| {
		transcript_key.track();
		if let Some(el) = transcript.get() {
			el.set_scroll_top(el.scroll_height());
		}
	});

	let send = move || {
		let Some(request) = session.try_update(|s| s.begin_send()).flatten() else {
			return;
		};
		let backend = backend.get_value();
		spawn_local(async move {
			let reply = backend.send_message(&request.message, &request.history).await;
			session.update(|s| s.finish(reply));
		});
	};

	let on_keydown = move |ev: KeyboardEvent| {
		if ev.key() == "Enter" {
			send();
		}
	};

	view! {
		<div class="chat-widget">
			<Show when=move || is_open.get()>
				<div class="chat-panel">
					<div class="chat-header">
						<span class="chat-title">{title.clone()}</span>
						<button class="chat-close" on:click=move |_| is_open.set(false)>
							"×"
						</button>
					</div>

					<div class="chat-messages" node_ref=transcript>
						<For
							each=move || session.with(|s| s.messages().to_vec())
							key=|m| m.id
							children=move |msg: ChatMessage| {
								let class = match msg.role {
									Role::User => "chat-message user",
									Role::Model => "chat-message model",
								};
								view! { <div class=class>{msg.text}</div> }
							}
						/>
						<Show when=move || session.with(|s| s.is_awaiting_reply())>
							<div class="chat-message model pending">"…"</div>
						</Show>
					</div>

					<div class="chat-input">
						<input
							type="text"
							placeholder="Ask about skills..."
							prop:value=move || session.with(|s| s.input().to_string())
							on:input=move |ev| session.update(|s| s.set_input(event_target_value(&ev)))
							on:keydown=on_keydown
							disabled=move || session.with(|s| !s.input_enabled())
						/>
						<button
							class="chat-send"
							on:click=move |_| send()
							disabled=move || session.with(|s| !s.can_send())
						>
							"Send"
						</button>
					</div>
				</div>
			</Show>

			<button class="chat-toggle" on:click=move |_| is_open.update(|open| *open = !*open)>
				{move || if is_open.get() { "×" } else { "Chat" }}
			</button>
		</div>
	}
}
