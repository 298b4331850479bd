//! Tree observation layout: node features, sizes, printing, normalisation.
//!
//! A tree of depth `d` is stored depth-first as a flat `Vec<f32>`:
//!
//! ```text
//! [node] [left subtree] [forward subtree] [right subtree] [back subtree]
//! ```
//!
//! Every subtree is present whether or not the branch exists, so the length
//! only depends on `d`: `5 · Σ_{i=0}^{d} 4^i`.

use std::fmt;

/// Floats per tree node.
pub const NODE_SIZE: usize = 5;

/// Number of nodes in a full quad-tree of `levels` levels
/// (`Σ_{i=0}^{levels-1} 4^i`).  Zero levels means no nodes.
#[inline]
pub(crate) const fn subtree_nodes(levels: usize) -> usize {
    ((1usize << (2 * levels)) - 1) / 3
}

/// Nodes in a tree observation of depth `depth` (root at depth 0).
#[inline]
pub const fn tree_node_count(depth: usize) -> usize {
    subtree_nodes(depth + 1)
}

/// Length of a tree observation of depth `depth`.
#[inline]
pub const fn observation_len(depth: usize) -> usize {
    NODE_SIZE * tree_node_count(depth)
}

// ── NodeFeatures ──────────────────────────────────────────────────────────────

/// The five floats of one tree node.
///
/// Fields 0 and 3 are reserved and always 0 in populated nodes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NodeFeatures {
    pub reserved_0:   f32,
    /// 1 if another agent's target lies on the corridor leading here.
    pub other_target: f32,
    /// 1 if another agent stands on the corridor leading here.
    pub other_agent:  f32,
    pub reserved_3:   f32,
    /// Distance to the observing agent's target from this node, in its
    /// arrival heading.  0 at the target, ∞ when unreachable.
    pub distance:     f32,
}

impl NodeFeatures {
    /// Fills subtrees of branches that do not exist.
    pub const PADDING: NodeFeatures = NodeFeatures {
        reserved_0:   f32::NEG_INFINITY,
        other_target: f32::NEG_INFINITY,
        other_agent:  f32::NEG_INFINITY,
        reserved_3:   f32::NEG_INFINITY,
        distance:     f32::NEG_INFINITY,
    };

    pub fn new(other_target: bool, other_agent: bool, distance: f32) -> Self {
        Self {
            reserved_0:   0.0,
            other_target: if other_target { 1.0 } else { 0.0 },
            other_agent:  if other_agent { 1.0 } else { 0.0 },
            reserved_3:   0.0,
            distance,
        }
    }

    /// Read node `index` (depth-first order) out of a flat observation.
    pub fn read(obs: &[f32], index: usize) -> Option<Self> {
        let s = obs.get(index * NODE_SIZE..(index + 1) * NODE_SIZE)?;
        Some(Self {
            reserved_0:   s[0],
            other_target: s[1],
            other_agent:  s[2],
            reserved_3:   s[3],
            distance:     s[4],
        })
    }

    #[inline]
    pub fn to_array(self) -> [f32; NODE_SIZE] {
        [self.reserved_0, self.other_target, self.other_agent, self.reserved_3, self.distance]
    }

    pub fn is_padding(&self) -> bool {
        self.to_array().iter().all(|&v| v == f32::NEG_INFINITY)
    }
}

// ── TreeView ──────────────────────────────────────────────────────────────────

/// Indented pretty-printer for a flat tree observation.
///
/// ```text
/// [0, 0, 0, 0, 2]
///   L: [-inf, -inf, -inf, -inf, -inf]
///   F: [0, 0, 0, 0, 0]
///   R: [-inf, -inf, -inf, -inf, -inf]
///   B: [-inf, -inf, -inf, -inf, -inf]
/// ```
pub struct TreeView<'a>(pub &'a [f32]);

impl TreeView<'_> {
    fn write_subtree(f: &mut fmt::Formatter<'_>, tree: &[f32], prompt: &str, indent: usize) -> fmt::Result {
        if tree.len() < NODE_SIZE {
            return Ok(());
        }
        let node = &tree[..NODE_SIZE];
        write!(f, "{:width$}{prompt}[", "", width = indent * 2)?;
        for (k, v) in node.iter().enumerate() {
            if k > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        writeln!(f, "]")?;

        let child = (tree.len() - NODE_SIZE) / 4;
        for (c, prompt) in ["L: ", "F: ", "R: ", "B: "].into_iter().enumerate() {
            let start = NODE_SIZE + c * child;
            Self::write_subtree(f, &tree[start..start + child], prompt, indent + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for TreeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::write_subtree(f, self.0, "", 0)
    }
}

// ── Normalisation ─────────────────────────────────────────────────────────────

/// Scale an observation into `[-1, 1]` for learning code.
///
/// Divides by the largest finite value (never less than 1), then clips, so
/// `+∞` becomes 1 and `−∞` padding becomes −1.
pub fn normalize_observation(obs: &mut [f32]) {
    let max = obs
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(1.0f32, f32::max);
    for v in obs.iter_mut() {
        *v = (*v / max).clamp(-1.0, 1.0);
    }
}
