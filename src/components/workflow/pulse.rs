//! Cosmetic "execute workflow" animation state.
//!
//! Time is a simulator-owned clock, in seconds, moved forward to wall-clock time
//! by [`PulseSimulator::advance_to`]. Each run gets a fresh generation; per-node
//! timers remember the generation that armed them and are ignored once it is no
//! longer current.

use std::collections::HashMap;

use log::debug;

use crate::config::PulseConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PulseState {
	#[default]
	Idle,
	Running,
}

/// Per-node animation phase derived from the global pulse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodePhase {
	#[default]
	Idle,
	Running,
	Success,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct NodeTimer {
	generation: u64,
	fires_at: f64,
}

#[derive(Clone, Debug, Default)]
struct NodePulse {
	phase: NodePhase,
	timer: Option<NodeTimer>,
}

#[derive(Clone, Debug, Default)]
pub struct PulseSimulator {
	config: PulseConfig,
	state: PulseState,
	generation: u64,
	clock: f64,
	ends_at: f64,
	nodes: HashMap<String, NodePulse>,
}

impl PulseSimulator {
	pub fn new(config: PulseConfig) -> Self {
		Self {
			config,
			..Self::default()
		}
	}

	pub fn is_running(&self) -> bool {
		self.state == PulseState::Running
	}

	/// Latest wall-clock time seen, in seconds.
	pub fn clock(&self) -> f64 {
		self.clock
	}

	pub fn phase(&self, id: &str) -> NodePhase {
		self.nodes.get(id).map(|n| n.phase).unwrap_or_default()
	}

	/// Starts a run over `node_ids`. `jitter` yields values in `[0, 1)` that pick
	/// each node's success delay within the configured range.
	///
	/// Returns `false` and changes nothing if a run is already in progress.
	pub fn trigger<'a>(
		&mut self,
		node_ids: impl IntoIterator<Item = &'a str>,
		mut jitter: impl FnMut() -> f64,
	) -> bool {
		if self.is_running() {
			debug!("execute ignored: pulse already running");
			return false;
		}

		self.generation += 1;
		self.state = PulseState::Running;
		self.ends_at = self.clock + self.config.duration;

		let (clock, generation) = (self.clock, self.generation);
		let min_delay = self.config.min_delay;
		let span = (self.config.max_delay - min_delay).max(0.0);
		self.nodes = node_ids
			.into_iter()
			.map(|id| {
				let delay = min_delay + jitter().clamp(0.0, 1.0) * span;
				let pulse = NodePulse {
					phase: NodePhase::Running,
					timer: Some(NodeTimer {
						generation,
						fires_at: clock + delay,
					}),
				};
				(id.to_string(), pulse)
			})
			.collect();

		debug!("pulse run {} started for {} nodes", self.generation, self.nodes.len());
		true
	}

	/// Moves the clock forward to `now`, firing due node timers and ending the
	/// run once its duration has elapsed. Times earlier than the clock are
	/// ignored, so the clock never runs backwards.
	pub fn advance_to(&mut self, now: f64) {
		if now > self.clock {
			self.clock = now;
		}
		if !self.is_running() {
			return;
		}

		let (clock, generation) = (self.clock, self.generation);
		for pulse in self.nodes.values_mut() {
			let Some(timer) = pulse.timer else {
				continue;
			};
			if timer.generation != generation {
				pulse.timer = None;
			} else if clock >= timer.fires_at {
				pulse.timer = None;
				pulse.phase = NodePhase::Success;
			}
		}

		if clock >= self.ends_at {
			self.finish();
		}
	}

	fn finish(&mut self) {
		debug!("pulse run {} finished", self.generation);
		self.state = PulseState::Idle;
		// Invalidate outstanding timers from this run before dropping them.
		self.generation += 1;
		for pulse in self.nodes.values_mut() {
			pulse.phase = NodePhase::Idle;
			pulse.timer = None;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const IDS: [&str; 3] = ["start", "router", "contact"];

	fn sim() -> PulseSimulator {
		PulseSimulator::new(PulseConfig::default())
	}

	#[test]
	fn runs_then_reverts_after_duration() {
		let mut sim = sim();
		assert_eq!(sim.state, PulseState::Idle);

		assert!(sim.trigger(IDS, || 0.5));
		assert_eq!(sim.state, PulseState::Running);

		sim.advance_to(2.5);
		assert_eq!(sim.state, PulseState::Running);
		sim.advance_to(3.0);
		assert_eq!(sim.state, PulseState::Idle);
	}

	#[test]
	fn trigger_while_running_is_ignored_without_reset() {
		let mut sim = sim();
		sim.trigger(IDS, || 0.0);
		let generation = sim.generation;

		sim.advance_to(2.0);
		assert!(!sim.trigger(IDS, || 0.0));
		assert_eq!(sim.generation, generation);

		sim.advance_to(3.0);
		assert!(!sim.is_running());
	}

	#[test]
	fn nodes_reach_success_after_their_own_delay() {
		let mut sim = sim();
		let mut draws = [0.0, 0.5, 0.99].into_iter();
		sim.trigger(IDS, || draws.next().unwrap_or(0.0));
		assert!(IDS.iter().all(|id| sim.phase(id) == NodePhase::Running));

		sim.advance_to(1.0);
		assert_eq!(sim.phase("start"), NodePhase::Success);
		assert_eq!(sim.phase("router"), NodePhase::Running);

		sim.advance_to(1.5);
		assert_eq!(sim.phase("router"), NodePhase::Success);
		assert_eq!(sim.phase("contact"), NodePhase::Running);

		sim.advance_to(2.0);
		assert_eq!(sim.phase("contact"), NodePhase::Success);
	}

	#[test]
	fn revert_resets_every_node_and_drops_pending_timers() {
		let config = PulseConfig {
			duration: 1.0,
			min_delay: 1.5,
			max_delay: 2.0,
		};
		let mut sim = PulseSimulator::new(config);
		sim.trigger(IDS, || 0.0);

		sim.advance_to(1.0);
		assert!(!sim.is_running());
		assert!(IDS.iter().all(|id| sim.phase(id) == NodePhase::Idle));

		// The timers would have fired here had they survived the revert.
		sim.advance_to(2.0);
		assert!(IDS.iter().all(|id| sim.phase(id) == NodePhase::Idle));
	}

	#[test]
	fn a_new_run_starts_with_fresh_timers() {
		let mut sim = sim();
		sim.trigger(IDS, || 0.0);
		sim.advance_to(3.0);
		let first = sim.generation;

		assert!(sim.trigger(IDS, || 1.0));
		assert!(sim.generation > first);
		sim.advance_to(4.5);
		assert!(IDS.iter().all(|id| sim.phase(id) == NodePhase::Running));
		sim.advance_to(5.0);
		assert!(IDS.iter().all(|id| sim.phase(id) == NodePhase::Success));
	}

	#[test]
	fn run_length_is_wall_clock_at_any_frame_rate() {
		let mut sim = sim();
		sim.advance_to(10.0);
		sim.trigger(IDS, || 0.0);

		// Four frames a second: still running one frame short of the deadline.
		for frame in 1..=11 {
			sim.advance_to(10.0 + frame as f64 * 0.25);
		}
		assert!(sim.is_running());
		sim.advance_to(13.0);
		assert!(!sim.is_running());
	}

	#[test]
	fn one_late_update_finishes_the_run() {
		let mut sim = sim();
		sim.advance_to(100.0);
		sim.trigger(IDS, || 0.5);

		sim.advance_to(160.0);
		assert!(!sim.is_running());
		assert!(IDS.iter().all(|id| sim.phase(id) == NodePhase::Idle));
	}

	#[test]
	fn clock_never_runs_backwards() {
		let mut sim = sim();
		sim.advance_to(5.0);
		sim.advance_to(2.0);
		assert_eq!(sim.clock(), 5.0);

		sim.trigger(IDS, || 0.0);
		assert_eq!(sim.ends_at, 8.0);
	}

	#[test]
	fn unknown_nodes_are_idle() {
		let mut sim = sim();
		sim.trigger(IDS, || 0.0);
		assert_eq!(sim.phase("elsewhere"), NodePhase::Idle);
	}
}
