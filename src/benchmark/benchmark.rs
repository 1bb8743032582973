use std::time::Instant;

use crate::simulation::barnes_hut::{BarnesHut, DEFAULT_SD_MAX_RATIO};
use crate::simulation::integrator::leapfrog_step;
use crate::simulation::octree::Octree;
use crate::simulation::states::{Body, NVec3};

/// Helper to build a deterministic cloud of `n` bodies
fn make_bodies(n: usize) -> Vec<Body> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            // deterministic positions, no rand needed
            let x = NVec3::new(
                (i_f * 0.37).sin() * 1.0e6,
                (i_f * 0.13).cos() * 1.0e6,
                (i_f * 0.07).sin() * 1.0e6,
            );
            Body::new(1.0e20, 1.0e4, x, NVec3::zeros())
        })
        .collect()
}

/// Milliseconds per leapfrog step, octree build included
fn time_steps(bodies: &mut [Body], sd_max_ratio: f64, steps: usize) -> f64 {
    let mut bh = BarnesHut::new(sd_max_ratio);
    let dt = 1.0;

    // Warm-up, also computes the first accelerations
    let octree = Octree::build(&*bodies);
    leapfrog_step(bodies, &octree, &mut bh, dt);

    let t0 = Instant::now();
    for _ in 0..steps {
        let octree = Octree::build(&*bodies);
        leapfrog_step(bodies, &octree, &mut bh, dt);
    }
    t0.elapsed().as_secs_f64() * 1000.0 / steps as f64
}

/// Compare the fully opened tree (direct summation) against Barnes–Hut
/// for a range of n. Prints CSV so it can be pasted into a spreadsheet.
pub fn bench_step_curve() {
    println!("N,direct_ms,bh_ms,nodes,depth");

    for n in (250..=4000).step_by(250) {
        // Large n: only 1 direct step to avoid minutes of runtime
        let steps_direct = if n <= 1000 { 3 } else { 1 };
        let steps_bh = 3;

        let template = make_bodies(n);

        let mut direct = template.clone();
        let ms_direct = time_steps(&mut direct, 0.0, steps_direct);

        let mut bh = template.clone();
        let ms_bh = time_steps(&mut bh, DEFAULT_SD_MAX_RATIO, steps_bh);

        let octree = Octree::build(&template);
        println!(
            "{},{:.6},{:.6},{},{}",
            n,
            ms_direct,
            ms_bh,
            octree.node_count(),
            octree.depth()
        );
    }
}
