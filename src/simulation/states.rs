//! Core state types for the N-body simulation.
//!
//! - `PositionedMass` is anything with a mass and a position: a `Body`, or a
//!   `PointMass` standing in for the center of mass of an octree node.
//! - `Body` owns the full kinematic state of one point mass.
//! - `System` holds the bodies and the simulated time `t`.

use crate::simulation::forces::two_body_force;
pub use crate::simulation::geometry::NVec3;

pub trait PositionedMass {
    fn mass(&self) -> f64;
    fn position(&self) -> NVec3;
}

/// A bare mass at a position, used for node aggregates and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMass {
    pub m: f64,  // mass (kg)
    pub x: NVec3, // position (m)
}

impl PointMass {
    pub fn new(m: f64, x: NVec3) -> Self {
        Self { m, x }
    }

    pub fn of<P: PositionedMass + ?Sized>(p: &P) -> Self {
        Self::new(p.mass(), p.position())
    }
}

impl PositionedMass for PointMass {
    fn mass(&self) -> f64 {
        self.m
    }

    fn position(&self) -> NVec3 {
        self.x
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub m: f64, // mass (kg), constant
    pub radius: f64, // radius (m), cosmetic only
    pub x: NVec3, // position (m)
    pub v: NVec3, // velocity (m/s)
    pub a: Option<NVec3>, // acceleration (m/s^2), None until the first force pass
}

impl Body {
    pub fn new(m: f64, radius: f64, x: NVec3, v: NVec3) -> Self {
        Self { m, radius, x, v, a: None }
    }

    /// Current acceleration, zero if none has been accumulated yet
    pub fn acceleration(&self) -> NVec3 {
        self.a.unwrap_or_else(NVec3::zeros)
    }

    /// Start a fresh accumulation pass
    pub fn reset_acceleration(&mut self) {
        self.a = Some(NVec3::zeros());
    }

    /// Accumulate `force / m` into the acceleration and return the new value.
    pub fn add_force(&mut self, force: NVec3) -> NVec3 {
        let a = self.acceleration() + force / self.m;
        self.a = Some(a);
        a
    }

    /// Accumulate the pull of `source` on this body.
    pub fn add_force_from<P: PositionedMass>(&mut self, source: &P) -> NVec3 {
        let f = two_body_force(source, &*self);
        self.add_force(f)
    }

    /// Position after `dt` seconds under constant acceleration:
    /// x + v dt + a dt^2 / 2
    pub fn position_after(&self, dt: f64) -> NVec3 {
        self.x + self.v * dt + self.acceleration() * (dt * dt / 2.0)
    }

    /// Velocity after `dt` seconds under the constant acceleration `acc`
    pub fn velocity_after(&self, acc: &NVec3, dt: f64) -> NVec3 {
        self.v + acc * dt
    }

    pub fn update_position(&mut self, dt: f64) -> NVec3 {
        self.x = self.position_after(dt);
        self.x
    }

    pub fn update_velocity(&mut self, dt: f64) -> NVec3 {
        self.v = self.velocity_after(&self.acceleration(), dt);
        self.v
    }

    /// Vector from this body to `other`
    pub fn distance_to<P: PositionedMass>(&self, other: &P) -> NVec3 {
        other.position() - self.x
    }

    /// False once a degenerate force has leaked into the state
    pub fn is_finite(&self) -> bool {
        let a = self.acceleration();
        self.x.iter().chain(self.v.iter()).chain(a.iter()).all(|c| c.is_finite())
    }
}

impl PositionedMass for Body {
    fn mass(&self) -> f64 {
        self.m
    }

    fn position(&self) -> NVec3 {
        self.x
    }
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub bodies: Vec<Body>, // caller-owned body array the octree indexes into
    pub t: f64, // simulated time (s)
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }
}
