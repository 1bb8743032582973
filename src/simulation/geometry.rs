//! Vector kernel and axis-aligned bounds.
//!
//! Vectors are `nalgebra` 3-vectors of `f64`; subtraction, addition,
//! scaling, division, magnitude (`norm`) and componentwise `abs` are the
//! operators nalgebra already provides. This module adds the bounding box
//! used by the octree and the center-of-mass reduction.

use nalgebra::Vector3;

use crate::simulation::states::{PointMass, PositionedMass};

pub type NVec3 = Vector3<f64>;

/// Axis-aligned box with a half-open containment rule.
///
/// `contains(p)` holds iff `min[i] <= p[i] < max[i]` on every axis, so a
/// point lying exactly on a max face belongs to the neighbouring box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: NVec3,
    pub max: NVec3,
}

impl Bounds {
    /// Corners are taken as given. Non-finite corners are allowed so a
    /// diverged body still flows through the octree build.
    pub fn new(min: NVec3, max: NVec3) -> Self {
        Self { min, max }
    }

    /// Cube of side `size` centered at `center`.
    pub fn centered_cube(center: NVec3, size: f64) -> Self {
        let half = NVec3::repeat(size / 2.0);
        Self::new(center - half, center + half)
    }

    pub fn median(&self) -> NVec3 {
        (self.min + self.max) / 2.0
    }

    pub fn dimensions(&self) -> NVec3 {
        (self.max - self.min).abs()
    }

    pub fn max_dimension(&self) -> f64 {
        self.dimensions().max()
    }

    pub fn contains(&self, p: &NVec3) -> bool {
        (0..3).all(|i| self.min[i] <= p[i] && p[i] < self.max[i])
    }

    /// Sub-box for one octant, split at the median.
    ///
    /// Coordinates are `0` for the low half and `1` for the high half on
    /// each axis, in `[x, y, z]` order.
    pub fn octant(&self, coords: [usize; 3]) -> Self {
        let median = self.median();
        let mut min = self.min;
        let mut max = self.max;
        for axis in 0..3 {
            if coords[axis] == 0 {
                max[axis] = median[axis];
            } else {
                min[axis] = median[axis];
            }
        }
        Self::new(min, max)
    }

    /// Smallest cube enclosing every position.
    ///
    /// Folds the tight componentwise min/max over the bodies, then centers a
    /// cube with the largest extent as its side on that box.
    /// An empty slice gives the degenerate box at the origin.
    pub fn enclosing_cube<P: PositionedMass>(bodies: &[P]) -> Self {
        let mut positions = bodies.iter().map(|b| b.position());
        let Some(first) = positions.next() else {
            return Self::new(NVec3::zeros(), NVec3::zeros());
        };

        let (min, max) = positions.fold((first, first), |(min, max), p| (min.inf(&p), max.sup(&p)));
        let side = (max - min).max();
        Self::centered_cube((min + max) / 2.0, side)
    }
}

/// Mass-weighted average position of a group of masses.
///
/// A group with no mass has no meaningful center, so `fallback` is returned
/// with mass 0 instead of dividing by zero.
pub fn center_of_mass<I>(items: I, fallback: NVec3) -> PointMass
where
    I: IntoIterator<Item = PointMass>,
{
    let (weighted, mass) = items
        .into_iter()
        .fold((NVec3::zeros(), 0.0), |(sum, m), item| {
            (sum + item.x * item.m, m + item.m)
        });

    if mass > 0.0 {
        PointMass::new(mass, weighted / mass)
    } else {
        PointMass::new(0.0, fallback)
    }
}
