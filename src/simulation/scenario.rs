//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime `Scenario`
//! containing the engine settings and the system state at t = 0.
//!
//! Invalid body data (non-positive mass, negative radius, vectors without
//! three components) is rejected here so the numeric core never sees it.

use std::f64::consts::PI;

use anyhow::{bail, ensure, Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::config::{BinaryConfig, BodyConfig, CloudConfig, ScenarioConfig};
use crate::simulation::barnes_hut::DEFAULT_SD_MAX_RATIO;
use crate::simulation::engine::Engine;
use crate::simulation::forces::G;
use crate::simulation::states::{Body, NVec3, System};

#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: Engine,
    pub system: System,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        let e_cfg = cfg.engine;
        ensure!(e_cfg.timestep_ms > 0.0, "timestep_ms must be positive, got {}", e_cfg.timestep_ms);

        let engine = Engine {
            integrator: e_cfg.integrator,
            sd_max_ratio: e_cfg.sd_max_ratio.unwrap_or(DEFAULT_SD_MAX_RATIO),
            timestep_ms: e_cfg.timestep_ms,
            time_scale: e_cfg.time_scale.unwrap_or(1.0),
            frames: e_cfg.frames,
            report_every: e_cfg.report_every.unwrap_or(100).max(1),
        };
        ensure!(engine.sd_max_ratio >= 0.0, "sd_max_ratio must not be negative");
        ensure!(engine.time_scale > 0.0, "time_scale must be positive, got {}", engine.time_scale);

        let mut bodies = Vec::new();
        for (i, bc) in cfg.bodies.iter().enumerate() {
            bodies.push(body_from_config(bc).with_context(|| format!("body #{i}"))?);
        }
        if let Some(binary) = &cfg.binary {
            bodies.extend(binary_bodies(binary).context("binary")?);
        }
        if let Some(cloud) = &cfg.cloud {
            bodies.extend(cloud_bodies(cloud).context("cloud")?);
        }

        log::info!(
            "scenario: {} bodies, {:?} integrator, sd_max_ratio {}",
            bodies.len(),
            engine.integrator,
            engine.sd_max_ratio
        );

        Ok(Self {
            engine,
            system: System::new(bodies),
        })
    }
}

/// Construct a body, checking the physical inputs.
pub fn checked_body(m: f64, radius: f64, x: NVec3, v: NVec3) -> Result<Body> {
    ensure!(m > 0.0 && m.is_finite(), "mass must be positive and finite, got {m}");
    ensure!(radius >= 0.0, "radius must not be negative, got {radius}");
    ensure!(
        x.iter().chain(v.iter()).all(|c| c.is_finite()),
        "position and velocity must be finite"
    );
    Ok(Body::new(m, radius, x, v))
}

fn vec3(values: &[f64], what: &str) -> Result<NVec3> {
    match values {
        [x, y, z] => Ok(NVec3::new(*x, *y, *z)),
        _ => bail!("{what} needs 3 components, got {}", values.len()),
    }
}

fn body_from_config(bc: &BodyConfig) -> Result<Body> {
    checked_body(bc.m, bc.radius, vec3(&bc.x, "x")?, vec3(&bc.v, "v")?)
}

/// Two bodies on a circular orbit around their common center of mass,
/// which sits at the origin at rest. The pair lies on the x-axis and
/// moves in the xy-plane.
pub fn circular_binary(m1: f64, m2: f64, separation: f64) -> Result<[Body; 2]> {
    ensure!(separation > 0.0, "separation must be positive, got {separation}");
    let total = m1 + m2;
    let speed = (G * total / separation).sqrt(); // relative orbital speed

    let b1 = checked_body(
        m1,
        0.0,
        NVec3::new(-separation * m2 / total, 0.0, 0.0),
        NVec3::new(0.0, -speed * m2 / total, 0.0),
    )?;
    let b2 = checked_body(
        m2,
        0.0,
        NVec3::new(separation * m1 / total, 0.0, 0.0),
        NVec3::new(0.0, speed * m1 / total, 0.0),
    )?;
    Ok([b1, b2])
}

/// Period of a circular two-body orbit (s)
pub fn orbital_period(m1: f64, m2: f64, separation: f64) -> f64 {
    2.0 * PI * (separation.powi(3) / (G * (m1 + m2))).sqrt()
}

fn binary_bodies(cfg: &BinaryConfig) -> Result<[Body; 2]> {
    let [mut b1, mut b2] = circular_binary(cfg.m1, cfg.m2, cfg.separation)?;
    ensure!(cfg.r1 >= 0.0 && cfg.r2 >= 0.0, "radii must not be negative");
    b1.radius = cfg.r1;
    b2.radius = cfg.r2;
    Ok([b1, b2])
}

/// Uniform random cloud: every coordinate is `spread * (0.5 - u)` for a
/// uniform `u` in [0, 1).
pub fn cloud_bodies(cfg: &CloudConfig) -> Result<Vec<Body>> {
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let mut spread = |s: f64| NVec3::from_fn(|_, _| s * (0.5 - rng.random::<f64>()));

    (0..cfg.count)
        .map(|_| {
            let x = spread(cfg.position_spread);
            let v = spread(cfg.velocity_spread);
            checked_body(cfg.mass, cfg.radius, x, v)
        })
        .collect()
}
