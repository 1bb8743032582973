//! High-level runtime engine settings
//!
//! Selects the integrator, the Barnes–Hut opening angle and the frame timing
//! used when running a `Scenario`

use crate::configuration::config::IntegratorConfig;

#[derive(Debug, Clone)]
pub struct Engine {
    pub integrator: IntegratorConfig, // euler or leapfrog
    pub sd_max_ratio: f64, // size/distance threshold for using a node's center of mass
    pub timestep_ms: f64, // wall time per frame
    pub time_scale: f64, // simulated ms per wall ms
    pub frames: usize,
    pub report_every: usize,
}

impl Engine {
    /// Simulated milliseconds handed to the integrator each frame
    pub fn frame_ms(&self) -> f64 {
        self.timestep_ms * self.time_scale
    }
}
