use std::collections::HashMap;

use log::warn;

use super::types::{Node, Point};
use crate::error::GraphError;

/// Owns the fixed node set and each node's committed world position.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
	nodes: Vec<Node>,
	id_to_idx: HashMap<String, usize>,
}

impl GraphStore {
	/// Builds the store in registration order. A repeated id keeps its first
	/// registration. Outputs naming an unknown node are reported here, once.
	pub fn new(nodes: Vec<Node>) -> Self {
		let mut store = Self::default();
		for node in nodes {
			if store.id_to_idx.contains_key(&node.id) {
				warn!("duplicate node id {:?} ignored", node.id);
				continue;
			}
			store.id_to_idx.insert(node.id.clone(), store.nodes.len());
			store.nodes.push(node);
		}
		for (source, target) in store.dangling_outputs() {
			warn!("edge {source} -> {target} skipped: unknown target");
		}
		store
	}

	pub fn get_node(&self, id: &str) -> Option<&Node> {
		self.id_to_idx.get(id).map(|&idx| &self.nodes[idx])
	}

	/// All nodes in registration order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn set_position(&mut self, id: &str, x: f64, y: f64) -> Result<(), GraphError> {
		let &idx = self
			.id_to_idx
			.get(id)
			.ok_or_else(|| GraphError::NodeNotFound(id.into()))?;
		self.nodes[idx].position = Point::new(x, y);
		Ok(())
	}

	/// Resolved `(source, target)` pairs in source order, then output order.
	/// Outputs naming an unknown node are skipped.
	pub fn edges(&self) -> impl Iterator<Item = (&Node, &Node)> + '_ {
		self.nodes.iter().flat_map(move |source| {
			source
				.outputs
				.iter()
				.filter_map(move |target_id| Some((source, self.get_node(target_id)?)))
		})
	}

	/// `(source id, target id)` for every output whose target is unknown.
	pub fn dangling_outputs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
		self.nodes.iter().flat_map(move |source| {
			source
				.outputs
				.iter()
				.filter(move |target_id| !self.id_to_idx.contains_key(target_id.as_str()))
				.map(move |target_id| (source.id.as_str(), target_id.as_str()))
		})
	}
}
