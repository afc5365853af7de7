mod component;
mod geometry;
mod interaction;
mod pulse;
mod render;
mod state;
mod store;
mod types;
mod viewport;

pub use component::{WorkflowCanvas, now_seconds};
pub use state::WorkflowState;
pub use types::{Node, NodeDetails, Point};
