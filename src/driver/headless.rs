//! Headless frame loop
//!
//! Stands in for a renderer: every frame it rebuilds the octree from the
//! current bodies, runs one integrator step through [`NBodyUpdater::update`]
//! and receives the flat position buffer a renderer would upload.
//! Traversal stats are logged every `report_every` frames.

use anyhow::Result;

use crate::simulation::forces::total_energy;
use crate::simulation::integrator::NBodyUpdater;
use crate::simulation::octree::Octree;
use crate::simulation::scenario::Scenario;

/// What a finished run looked like
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub frames: usize,
    pub sim_seconds: f64,
    pub energy_start: f64,
    pub energy_end: f64,
    pub non_finite_bodies: usize,
}

impl RunSummary {
    /// |E_end - E_start| / |E_start|, or the absolute change when the run
    /// started with zero energy
    pub fn energy_drift(&self) -> f64 {
        let change = (self.energy_end - self.energy_start).abs();
        if self.energy_start == 0.0 {
            change
        } else {
            change / self.energy_start.abs()
        }
    }
}

pub fn run_headless(scenario: Scenario) -> Result<RunSummary> {
    let Scenario { engine, mut system } = scenario;
    let n = system.bodies.len();
    log::info!("run_headless: {} bodies for {} frames", n, engine.frames);

    // Flat xyz buffer, the only thing a renderer reads
    let mut positions = vec![0.0f32; 3 * n];
    let mut updater = NBodyUpdater::new(engine.integrator, engine.sd_max_ratio);

    let frame_ms = engine.frame_ms();
    let energy_start = total_energy(&system.bodies);

    for frame in 0..engine.frames {
        let octree = Octree::build(&system.bodies);
        updater.update(&octree, &mut positions, &mut system.bodies, frame_ms)?;
        system.t += frame_ms / 1000.0;

        if (frame + 1) % engine.report_every == 0 {
            let stats = updater.stats();
            log::info!(
                "frame {:6} t = {:.3e} s: {} pairwise, {} approximated, {} nodes, depth {}",
                frame + 1,
                system.t,
                stats.leaf,
                stats.composite,
                stats.nodes,
                stats.depth
            );
            updater.clear_stats();
        }
    }

    let summary = RunSummary {
        frames: engine.frames,
        sim_seconds: system.t,
        energy_start,
        energy_end: total_energy(&system.bodies),
        non_finite_bodies: system.bodies.iter().filter(|b| !b.is_finite()).count(),
    };
    log::info!(
        "done after {:.3e} s simulated, relative energy drift {:.3e}",
        summary.sim_seconds,
        summary.energy_drift()
    );
    Ok(summary)
}
