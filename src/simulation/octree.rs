//! # Octree spatial index
//!
//! Recursive 2×2×2 subdivision of a bounding cube. A node is either a
//! leaf holding at most one body (more only once the depth cap is hit) or a
//! composite with exactly eight children, one per octant. Empty octants
//! are kept as empty leaves so an octant index always maps to the same
//! child slot.
//!
//! Nodes live in an arena (`Octree::nodes`) and refer to each other by
//! index. Leaves refer to bodies by their index in the caller's slice, so
//! the tree never copies body state: physics updates on the slice stay
//! visible to leaf interactions.
//!
//! Every derived quantity (center of mass, count, depth, node count) is
//! computed once while building. The tree is meant to be rebuilt from
//! scratch every frame, so nothing is ever invalidated.

use crate::simulation::geometry::{center_of_mass, Bounds, NVec3};
use crate::simulation::states::{PointMass, PositionedMass};

/// Subdivision stops here even if a leaf would hold several bodies
pub const MAX_DEPTH: usize = 40;

/// `[x, y, z]` octant coordinates, 0 = below the median, 1 = at or above
pub type OctantCoords = [usize; 3];

pub const OCTANT_INDEX_TO_COORDS: [OctantCoords; 8] = [
    [0, 0, 0],
    [0, 0, 1],
    [0, 1, 0],
    [0, 1, 1],
    [1, 0, 0],
    [1, 0, 1],
    [1, 1, 0],
    [1, 1, 1],
];

pub fn octant_coords_to_index([x, y, z]: OctantCoords) -> usize {
    x * 4 + y * 2 + z
}

/// Octant of `p` relative to a node's median.
/// On each axis, strictly below the median selects the low half.
pub fn octant_index_for(p: &NVec3, median: &NVec3) -> usize {
    let mut idx = 0;
    if p.x >= median.x { idx += 4; }
    if p.y >= median.y { idx += 2; }
    if p.z >= median.z { idx += 1; }
    idx
}

pub fn octant_coords_for(p: &NVec3, median: &NVec3) -> OctantCoords {
    OCTANT_INDEX_TO_COORDS[octant_index_for(p, median)]
}

/// Split body indices into eight groups by octant index.
pub fn group_by_octant<P: PositionedMass>(
    bodies: &[P],
    members: Vec<usize>,
    median: &NVec3,
) -> [Vec<usize>; 8] {
    let mut groups: [Vec<usize>; 8] = Default::default();
    for i in members {
        groups[octant_index_for(&bodies[i].position(), median)].push(i);
    }
    groups
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Indices into the body slice the tree was built from
    Leaf(Vec<usize>),
    /// Arena indices of the eight children, in octant index order
    Composite([usize; 8]),
}

#[derive(Debug, Clone)]
pub struct OctreeNode {
    pub bounds: Bounds,
    pub com: PointMass, // total mass at the center of mass, box median if empty
    pub count: usize, // bodies under this node
    pub depth: usize, // 1 for a leaf, 1 + deepest child otherwise
    pub node_count: usize, // nodes in this subtree, itself included
    pub kind: NodeKind,
}

impl OctreeNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    pub fn children(&self) -> Option<&[usize; 8]> {
        match &self.kind {
            NodeKind::Composite(children) => Some(children),
            NodeKind::Leaf(_) => None,
        }
    }
}

/// An octree built over a slice of positioned masses
pub struct Octree {
    pub nodes: Vec<OctreeNode>,
    pub root: usize,
}

impl Octree {
    /// Build over the smallest cube enclosing every body.
    pub fn build<P: PositionedMass>(bodies: &[P]) -> Self {
        Self::build_in(bodies, Bounds::enclosing_cube(bodies))
    }

    /// Build over caller-supplied bounds.
    ///
    /// Bodies outside `bounds` are still placed, in whichever octant the
    /// median comparison sends them to.
    pub fn build_in<P: PositionedMass>(bodies: &[P], bounds: Bounds) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: 0,
        };
        let members = (0..bodies.len()).collect();
        tree.root = tree.build_node(bodies, members, bounds, 1);

        log::debug!(
            "octree over {} bodies: {} nodes, depth {}",
            bodies.len(),
            tree.node_count(),
            tree.depth()
        );
        tree
    }

    pub fn root_node(&self) -> &OctreeNode {
        &self.nodes[self.root]
    }

    pub fn node(&self, idx: usize) -> &OctreeNode {
        &self.nodes[idx]
    }

    pub fn count(&self) -> usize {
        self.root_node().count
    }

    pub fn depth(&self) -> usize {
        self.root_node().depth
    }

    pub fn node_count(&self) -> usize {
        self.root_node().node_count
    }

    pub fn center_of_mass(&self) -> PointMass {
        self.root_node().com
    }

    /// Flattened body indices under `idx`, in octant order
    pub fn bodies_under(&self, idx: usize) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.nodes[idx].count);
        self.collect_bodies(idx, &mut out);
        out
    }

    // helpers ==============================================================================

    fn collect_bodies(&self, idx: usize, out: &mut Vec<usize>) {
        match &self.nodes[idx].kind {
            NodeKind::Leaf(bodies) => out.extend_from_slice(bodies),
            NodeKind::Composite(children) => {
                for &child in children {
                    self.collect_bodies(child, out);
                }
            }
        }
    }

    /// Build the subtree for `members` inside `bounds` and return its arena index.
    ///
    /// Children are pushed before their parent, so the root is the last node.
    fn build_node<P: PositionedMass>(
        &mut self,
        bodies: &[P],
        members: Vec<usize>,
        bounds: Bounds,
        depth: usize,
    ) -> usize {
        if members.len() <= 1 || depth > MAX_DEPTH {
            if members.len() > 1 {
                log::debug!("depth cap reached with {} bodies in one leaf", members.len());
            }
            let com = center_of_mass(
                members.iter().map(|&i| PointMass::of(&bodies[i])),
                bounds.median(),
            );
            return self.push(OctreeNode {
                bounds,
                com,
                count: members.len(),
                depth: 1,
                node_count: 1,
                kind: NodeKind::Leaf(members),
            });
        }

        let groups = group_by_octant(bodies, members, &bounds.median());

        let mut children = [0usize; 8];
        for (octant, group) in groups.into_iter().enumerate() {
            let child_bounds = bounds.octant(OCTANT_INDEX_TO_COORDS[octant]);
            children[octant] = self.build_node(bodies, group, child_bounds, depth + 1);
        }

        let kids = children.map(|c| &self.nodes[c]);
        let com = center_of_mass(kids.iter().map(|k| k.com), bounds.median());
        let count = kids.iter().map(|k| k.count).sum::<usize>();
        let node_count = 1 + kids.iter().map(|k| k.node_count).sum::<usize>();
        let depth = 1 + kids.iter().map(|k| k.depth).max().unwrap_or(0);

        self.push(OctreeNode {
            bounds,
            com,
            count,
            depth,
            node_count,
            kind: NodeKind::Composite(children),
        })
    }

    fn push(&mut self, node: OctreeNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }
}
