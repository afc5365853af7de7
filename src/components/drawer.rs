use leptos::prelude::*;

use crate::components::workflow::{Node, NodeDetails};

fn details_view(details: NodeDetails) -> impl IntoView {
	let NodeDetails {
		title,
		subtitle,
		content,
		tags,
		link,
		date,
		location,
	} = details;

	view! {
		<div class="drawer-details">
			<h3 class="drawer-details-title">{title}</h3>
			{subtitle.map(|s| view! { <p class="drawer-subtitle">{s}</p> })}
			<div class="drawer-meta">
				{location.map(|l| view! { <span class="drawer-location">{l}</span> })}
				{date.map(|d| view! { <span class="drawer-date">{d}</span> })}
			</div>
			<div class="drawer-card">
				<h4>"Parameters / Details"</h4>
				<ul>{content.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}</ul>
			</div>
			{(!tags.is_empty())
				.then(|| {
					view! {
						<div class="drawer-tags">
							<h4>"Output Data (Skills)"</h4>
							{tags
								.into_iter()
								.map(|tag| view! { <span class="drawer-tag">{tag}</span> })
								.collect_view()}
						</div>
					}
				})}
			{link
				.map(|href| {
					view! {
						<a class="drawer-link" href=href target="_blank" rel="noreferrer">
							"View Resource"
						</a>
					}
				})}
		</div>
	}
}

/// Side panel describing the selected node. Renders nothing without a
/// selection.
#[component]
pub fn DetailDrawer(#[prop(into)] node: Signal<Option<Node>>, on_close: Callback<()>) -> impl IntoView {
	move || {
		node.get().map(|node| {
			let Node {
				id,
				kind,
				label,
				details,
				..
			} = node;
			view! {
				<aside class="detail-drawer">
					<header class="drawer-header">
						<div>
							<h2>{label}</h2>
							<span class="drawer-kind">{kind.as_str()}" Node"</span>
						</div>
						<button class="drawer-close" on:click=move |_| on_close.run(())>
							"×"
						</button>
					</header>
					<div class="drawer-body">
						{match details {
							Some(details) => details_view(details).into_any(),
							None => {
								view! {
									<p class="drawer-empty">
										"No additional configuration available for this node."
									</p>
								}
									.into_any()
							}
						}}
					</div>
					<footer class="drawer-footer">"Node ID: "<code>{id}</code></footer>
				</aside>
			}
		})
	}
}
