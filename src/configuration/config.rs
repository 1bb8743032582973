//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`EngineConfig`]   – integrator, opening angle and frame timing
//! - [`BodyConfig`]     – initial state for explicitly listed bodies
//! - [`BinaryConfig`]   – a two-body circular orbit, seeded in its center-of-mass frame
//! - [`CloudConfig`]    – a seeded random cloud of identical bodies
//! - [`ScenarioConfig`] – top-level wrapper used to load a scenario from YAML
//!
//! All body sources are optional and are concatenated in the order
//! `bodies`, `binary`, `cloud`.
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   integrator: "leapfrog"  # or "euler"
//!   sd_max_ratio: 0.8       # Barnes–Hut opening angle, optional
//!   timestep_ms: 16.0       # wall time per frame
//!   time_scale: 3600.0      # simulated ms per wall ms, optional
//!   frames: 2000
//!   report_every: 200       # optional
//!
//! bodies:
//!   - x: [ 0.0, 0.0, 0.0 ]
//!     v: [ 0.0, 0.0, 0.0 ]
//!     m: 5.972e24
//!     radius: 6.371e6
//!
//! binary:
//!   m1: 5.972e24
//!   m2: 7.342e22
//!   separation: 3.844e8
//!
//! cloud:
//!   count: 4000
//!   seed: 7
//!   position_spread: 2.0e6
//!   velocity_spread: 1000.5
//!   mass: 1.0e20
//!   radius: 1.0e4
//! ```

use serde::Deserialize;

/// Which integrator the engine runs
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegratorConfig {
    #[serde(rename = "euler")] // Explicit Euler, first order, drifts in energy
    Euler,

    #[serde(rename = "leapfrog")] // Average-acceleration leapfrog, second order
    #[default]
    Leapfrog,
}

#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    #[serde(default)]
    pub integrator: IntegratorConfig,
    pub sd_max_ratio: Option<f64>, // size/distance threshold under which a node is one mass
    pub timestep_ms: f64, // wall time per frame in ms
    pub time_scale: Option<f64>, // simulated time per unit of wall time
    pub frames: usize, // frames to run
    pub report_every: Option<usize>, // frames between stats reports
}

/// Initial state of one body
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: Vec<f64>, // position (m)
    pub v: Vec<f64>, // velocity (m/s)
    pub m: f64, // mass (kg)
    pub radius: f64, // radius (m), cosmetic
}

/// Two bodies on a circular orbit in the xy-plane
#[derive(Deserialize, Debug, Clone)]
pub struct BinaryConfig {
    pub m1: f64,
    pub m2: f64,
    pub separation: f64, // m
    #[serde(default)]
    pub r1: f64, // radius of the first body (m)
    #[serde(default)]
    pub r2: f64, // radius of the second body (m)
}

/// Bodies scattered uniformly in a cube with uniformly random velocities
#[derive(Deserialize, Debug, Clone)]
pub struct CloudConfig {
    pub count: usize,
    pub seed: u64, // same seed, same cloud
    pub position_spread: f64, // side of the cube positions are drawn from (m)
    pub velocity_spread: f64, // side of the cube velocities are drawn from (m/s)
    pub mass: f64,
    pub radius: f64,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    pub binary: Option<BinaryConfig>,
    pub cloud: Option<CloudConfig>,
}
