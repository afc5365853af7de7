pub mod chat;
pub mod drawer;
pub mod workflow;
