//! Per-agent shortest-path distance maps over `(cell, heading)` states.
//!
//! # Algorithm
//!
//! One breadth-first search per agent, run **backward from the target**.
//! Every state in the target cell starts at distance 0.  When a state
//! `(cell, h)` is settled, its predecessors are the states
//! `(cell.step(h.reverse()), o)` for every heading `o` whose legal exits (see
//! [`TransitionMap::exits`]) contain `h`: an agent there, leaving in
//! direction `h`, lands in `cell` facing `h`.
//!
//! All edges cost one transition, so the first time a state is reached is
//! also its shortest distance.  A fixed-size [`StateBitset`] of
//! `height * width * 4` bits tracks settled states.
//!
//! Dead ends need no special case here: [`TransitionMap::exits`] already
//! sends every heading in a dead end out through its open side, so those
//! states show up as ordinary predecessors and the closed side is never
//! crossed.
//!
//! # Lifetime
//!
//! Built once per episode reset and read-only afterwards.

use std::collections::VecDeque;

use rg_core::{AgentId, Direction, Position};

use crate::TransitionMap;

// ── StateBitset ───────────────────────────────────────────────────────────────

/// Fixed-capacity bitset indexed by `(cell_index * 4 + heading)`.
#[derive(Clone, Debug)]
pub struct StateBitset {
    words: Vec<u64>,
}

impl StateBitset {
    /// All-clear bitset able to hold `len` states.
    pub fn new(len: usize) -> Self {
        Self { words: vec![0; len.div_ceil(64)] }
    }

    /// Set bit `i`.  Returns `true` if it was previously clear.
    #[inline]
    pub fn insert(&mut self, i: usize) -> bool {
        let (word, bit) = (i / 64, 1u64 << (i % 64));
        let fresh = self.words[word] & bit == 0;
        self.words[word] |= bit;
        fresh
    }

    #[inline]
    pub fn contains(&self, i: usize) -> bool {
        self.words[i / 64] & (1u64 << (i % 64)) != 0
    }

    /// Number of set bits.
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }
}

// ── DistanceMap ───────────────────────────────────────────────────────────────

/// Shortest transition counts from every `(cell, heading)` state to each
/// agent's target.  `f32::INFINITY` marks unreachable states.
///
/// Layout: one layer of `height * width * 4` floats per agent, indexed
/// `(row * width + col) * 4 + heading`.
#[derive(Clone, Debug)]
pub struct DistanceMap {
    height: usize,
    width: usize,
    data: Vec<f32>,
    max_distance: Vec<u32>,
}

impl DistanceMap {
    /// A map for zero agents.
    pub fn empty(height: usize, width: usize) -> Self {
        Self { height, width, data: Vec::new(), max_distance: Vec::new() }
    }

    /// Run one backward BFS per target.  `targets[i]` belongs to `AgentId(i)`.
    ///
    /// With the `parallel` feature, the per-agent searches run on Rayon.
    pub fn build(rail: &TransitionMap, targets: &[Position]) -> Self {
        #[cfg(not(feature = "parallel"))]
        let layers: Vec<(Vec<f32>, u32)> = targets
            .iter()
            .map(|&target| walk_from_target(rail, target))
            .collect();

        #[cfg(feature = "parallel")]
        let layers: Vec<(Vec<f32>, u32)> = {
            use rayon::prelude::*;
            targets
                .par_iter()
                .map(|&target| walk_from_target(rail, target))
                .collect()
        };

        let mut data = Vec::with_capacity(layers.len() * rail.cell_count() * 4);
        let mut max_distance = Vec::with_capacity(layers.len());
        for (layer, max) in layers {
            data.extend_from_slice(&layer);
            max_distance.push(max);
        }

        Self { height: rail.height, width: rail.width, data, max_distance }
    }

    #[inline]
    fn layer_len(&self) -> usize {
        self.height * self.width * 4
    }

    /// Number of agent layers.
    pub fn agent_count(&self) -> usize {
        self.max_distance.len()
    }

    /// Distance from `(pos, heading)` to `agent`'s target.  ∞ for unreachable
    /// states, out-of-range cells and unknown agents.
    #[inline]
    pub fn get(&self, agent: AgentId, pos: Position, heading: Direction) -> f32 {
        if agent.index() >= self.agent_count()
            || pos.row < 0
            || pos.col < 0
            || pos.row as usize >= self.height
            || pos.col as usize >= self.width
        {
            return f32::INFINITY;
        }
        let cell = pos.row as usize * self.width + pos.col as usize;
        self.data[agent.index() * self.layer_len() + cell * 4 + heading.index()]
    }

    /// Raw layer for `agent`.
    pub fn layer(&self, agent: AgentId) -> &[f32] {
        let len = self.layer_len();
        &self.data[agent.index() * len..(agent.index() + 1) * len]
    }

    /// Largest finite distance found for `agent` (diagnostic only).
    pub fn max_distance(&self, agent: AgentId) -> u32 {
        self.max_distance.get(agent.index()).copied().unwrap_or(0)
    }
}

// ── BFS internals ─────────────────────────────────────────────────────────────

#[inline]
fn state_index(rail: &TransitionMap, pos: Position, heading: Direction) -> Option<usize> {
    rail.cell_index(pos).map(|cell| cell * 4 + heading.index())
}

/// Backward BFS from `target`.  Returns the layer and its max distance.
fn walk_from_target(rail: &TransitionMap, target: Position) -> (Vec<f32>, u32) {
    let states = rail.cell_count() * 4;
    let mut dist = vec![f32::INFINITY; states];

    if !rail.contains(target) {
        log::debug!("target {target} lies outside the grid; every state is unreachable");
        return (dist, 0);
    }

    let mut settled = StateBitset::new(states);
    let mut queue: VecDeque<(Position, Direction, u32)> = VecDeque::new();

    for heading in Direction::ALL {
        if let Some(i) = state_index(rail, target, heading) {
            dist[i] = 0.0;
            settled.insert(i);
            queue.push_back((target, heading, 0));
        }
    }

    let mut max_distance = 0;

    while let Some((pos, heading, d)) = queue.pop_front() {
        // The only cell from which moving `heading` lands in `pos`.
        let prev = pos.step(heading.reverse());
        if !rail.is_valid_cell(prev) {
            continue;
        }

        for orientation in Direction::ALL {
            if rail.exits(prev, orientation) & (1 << heading.index()) == 0 {
                continue;
            }
            let Some(i) = state_index(rail, prev, orientation) else {
                continue;
            };
            if settled.insert(i) {
                let relaxed = d + 1;
                dist[i] = dist[i].min(relaxed as f32);
                max_distance = max_distance.max(relaxed);
                queue.push_back((prev, orientation, relaxed));
            }
        }
    }

    (dist, max_distance)
}
