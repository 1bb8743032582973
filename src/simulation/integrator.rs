//! Fixed-step time integrators for the N-body system
//!
//! Both integrators take the bodies, an octree built from them this frame,
//! and the step in seconds, and advance positions and velocities in place.
//! Accelerations come from the Barnes–Hut accelerator.
//!
//! [`NBodyUpdater`] is the per-frame entry point for a renderer: it runs one
//! step and copies the new positions into a flat buffer.

use anyhow::{ensure, Result};

use crate::configuration::config::IntegratorConfig;
use crate::simulation::barnes_hut::{BarnesHut, TraversalStats};
use crate::simulation::octree::Octree;
use crate::simulation::states::Body;

/// Advance one step with explicit Euler.
///
/// Bodies are handled one after another: zero the acceleration, accumulate
/// forces, then move, then update velocity. Later bodies therefore see the
/// new positions of earlier ones. First order, drifts in energy.
pub fn euler_step(bodies: &mut [Body], octree: &Octree, bh: &mut BarnesHut, dt: f64) {
    for i in 0..bodies.len() {
        bodies[i].reset_acceleration();
        let f = bh.accelerate(i, octree, bodies);
        let b = &mut bodies[i];
        b.add_force(f);
        b.update_position(dt);
        b.update_velocity(dt);
    }
}

/// Advance one step with the average-acceleration leapfrog.
///
/// Position pass: x_{i+1} = x_i + v_i dt + a_i dt^2 / 2, where a_i is only
/// computed for bodies that do not carry one from the previous step.
///
/// Velocity pass: a_{i+1} is recomputed at the new positions and
/// v_{i+1} = v_i + (a_i + a_{i+1}) dt / 2. a_{i+1} stays on the body for the
/// next position pass.
pub fn leapfrog_step(bodies: &mut [Body], octree: &Octree, bh: &mut BarnesHut, dt: f64) {
    for i in 0..bodies.len() {
        if bodies[i].a.is_none() {
            let f = bh.accelerate(i, octree, bodies);
            bodies[i].add_force(f);
        }
        bodies[i].update_position(dt);
    }

    for i in 0..bodies.len() {
        let a_prev = bodies[i].acceleration();

        bodies[i].reset_acceleration();
        let f = bh.accelerate(i, octree, bodies);
        let b = &mut bodies[i];
        let a_next = b.add_force(f);

        let a_avg = (a_prev + a_next) / 2.0;
        b.v = b.velocity_after(&a_avg, dt);
    }
}

/// Runs one integrator over an octree every frame and publishes positions.
#[derive(Debug, Clone)]
pub struct NBodyUpdater {
    pub integrator: IntegratorConfig,
    pub accelerator: BarnesHut,
    last_nodes: usize,
    last_depth: usize,
}

impl NBodyUpdater {
    pub fn new(integrator: IntegratorConfig, sd_max_ratio: f64) -> Self {
        Self {
            integrator,
            accelerator: BarnesHut::new(sd_max_ratio),
            last_nodes: 0,
            last_depth: 0,
        }
    }

    pub fn sd_max_ratio(&self) -> f64 {
        self.accelerator.sd_max_ratio
    }

    pub fn set_sd_max_ratio(&mut self, sd_max_ratio: f64) {
        self.accelerator.sd_max_ratio = sd_max_ratio;
    }

    /// Interaction counters since the last clear, plus the shape of the last octree
    pub fn stats(&self) -> TraversalStats {
        TraversalStats {
            nodes: self.last_nodes,
            depth: self.last_depth,
            ..self.accelerator.stats
        }
    }

    pub fn clear_stats(&mut self) {
        self.accelerator.clear_stats();
    }

    /// Advance `bodies` by `dt` seconds with the selected integrator
    pub fn update_bodies_state(&mut self, bodies: &mut [Body], octree: &Octree, dt: f64) {
        self.last_nodes = octree.node_count();
        self.last_depth = octree.depth();

        match self.integrator {
            IntegratorConfig::Euler => euler_step(bodies, octree, &mut self.accelerator, dt),
            IntegratorConfig::Leapfrog => leapfrog_step(bodies, octree, &mut self.accelerator, dt),
        }
    }

    /// Run one step of `timestep_ms` milliseconds and write body `i`'s position
    /// to `positions[3i..3i + 3]`.
    ///
    /// `octree` must have been built from `bodies` this frame.
    pub fn update(
        &mut self,
        octree: &Octree,
        positions: &mut [f32],
        bodies: &mut [Body],
        timestep_ms: f64,
    ) -> Result<()> {
        ensure!(
            octree.count() == bodies.len(),
            "octree holds {} bodies but {} were supplied",
            octree.count(),
            bodies.len()
        );
        ensure!(
            positions.len() >= 3 * bodies.len(),
            "position buffer has {} slots, need {}",
            positions.len(),
            3 * bodies.len()
        );

        self.update_bodies_state(bodies, octree, timestep_ms / 1000.0);

        for (slot, b) in positions.chunks_exact_mut(3).zip(bodies.iter()) {
            slot[0] = b.x.x as f32;
            slot[1] = b.x.y as f32;
            slot[2] = b.x.z as f32;
        }

        let diverged = bodies.iter().filter(|b| !b.is_finite()).count();
        if diverged > 0 {
            log::error!("{diverged} bodies have non-finite state after this step");
        }
        Ok(())
    }
}
