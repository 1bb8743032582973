//! # Barnes–Hut accelerator
//!
//! Walks an [`Octree`] on behalf of one target body and sums the
//! gravitational force on it.
//!
//! - **Leaf**: exact pairwise interaction with every body stored in the
//!   leaf except the target itself. Bodies are compared by index, never by
//!   position, so two coincident bodies still see each other.
//! - **Composite**: with `s` the largest side of the node's box and `d` the
//!   distance from the target to the node's center of mass, the whole
//!   subtree acts as a single mass at its center when `s / d < sd_max_ratio`.
//!   Otherwise every child is visited.
//!
//! `sd_max_ratio` (θ, the opening angle) trades accuracy for speed. At
//! θ = 0 every node is opened and the result is the direct pairwise sum.
//!
//! Leaves read positions from the body slice at call time while composites
//! use the center of mass cached when the tree was built.

use crate::simulation::forces::{force, two_body_force};
use crate::simulation::octree::{NodeKind, Octree};
use crate::simulation::states::{Body, NVec3};

pub const DEFAULT_SD_MAX_RATIO: f64 = 0.8;

/// Counters describing how the tree was used.
///
/// `leaf` counts pairwise interactions, `composite` counts far-field
/// approximations. `nodes` and `depth` describe the last octree and are
/// filled in by the owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    pub leaf: u64,
    pub composite: u64,
    pub total: u64,
    pub nodes: usize,
    pub depth: usize,
}

#[derive(Debug, Clone)]
pub struct BarnesHut {
    pub sd_max_ratio: f64,
    pub stats: TraversalStats,
}

impl Default for BarnesHut {
    fn default() -> Self {
        Self::new(DEFAULT_SD_MAX_RATIO)
    }
}

impl BarnesHut {
    pub fn new(sd_max_ratio: f64) -> Self {
        Self {
            sd_max_ratio,
            stats: TraversalStats::default(),
        }
    }

    pub fn clear_stats(&mut self) {
        self.stats = TraversalStats::default();
    }

    /// Net force on `bodies[target]` from every other body in `tree`.
    ///
    /// `tree` must have been built from `bodies` (or a slice with the same
    /// indices).
    pub fn accelerate(&mut self, target: usize, tree: &Octree, bodies: &[Body]) -> NVec3 {
        let mut f = NVec3::zeros();
        self.traverse_node(tree, tree.root, target, bodies, &mut f);
        f
    }

    fn traverse_node(
        &mut self,
        tree: &Octree,
        node_idx: usize,
        target: usize,
        bodies: &[Body],
        f: &mut NVec3,
    ) {
        let node = tree.node(node_idx);
        let body = &bodies[target];

        match &node.kind {
            NodeKind::Leaf(members) => {
                for &b in members {
                    if b == target {
                        continue; // no self-interaction
                    }
                    self.stats.leaf += 1;
                    self.stats.total += 1;
                    *f += two_body_force(&bodies[b], body);
                }
            }
            NodeKind::Composite(children) => {
                let s = node.bounds.max_dimension();
                let com = node.com;
                let r = com.x - body.x;
                let d = r.norm();

                // d == 0 gives s / d = inf (or NaN for s == 0), so the node is opened
                if s / d < self.sd_max_ratio {
                    self.stats.composite += 1;
                    self.stats.total += 1;
                    *f += force(&r, d, com.m, body.m);
                } else {
                    for &child in children {
                        self.traverse_node(tree, child, target, bodies, f);
                    }
                }
            }
        }
    }
}
