//! Newtonian gravity between point masses
//!
//! The force law used by the Barnes–Hut accelerator, plus a direct O(N²)
//! pairwise summation and energy/momentum diagnostics used to check it.
//! There is no softening: coincident masses produce non-finite forces.
//! They are not reported here; the updater counts diverged bodies once per step.

use crate::simulation::states::{Body, NVec3, PositionedMass};

/// Gravitational constant (m^3 kg^-1 s^-2)
pub const G: f64 = 6.674e-11;

/// Force on a mass `m2` from a mass `m1` separated by `r` (pointing from
/// `m2` toward `m1`) with precomputed length `magnitude`:
/// `G m1 m2 r / |r|^3`
pub fn force(r: &NVec3, magnitude: f64, m1: f64, m2: f64) -> NVec3 {
    let numerator = G * (m1 * m2);
    let denominator = magnitude * magnitude * magnitude;
    r * (numerator / denominator)
}

/// Force exerted by `source` on `target`
pub fn two_body_force<S, T>(source: &S, target: &T) -> NVec3
where
    S: PositionedMass + ?Sized,
    T: PositionedMass + ?Sized,
{
    let r = source.position() - target.position();
    let magnitude = r.norm();
    force(&r, magnitude, source.mass(), target.mass())
}

/// Net force on every body by direct pairwise summation
///
/// Each unordered pair is visited once and contributes equal and opposite
/// forces to both bodies.
pub fn direct_forces(bodies: &[Body]) -> Vec<NVec3> {
    let n = bodies.len();
    let mut out = vec![NVec3::zeros(); n];

    for i in 0..n {
        for j in (i + 1)..n {
            // pull of j on i, i feels +f and j feels -f
            let f = two_body_force(&bodies[j], &bodies[i]);
            out[i] += f;
            out[j] -= f;
        }
    }
    out
}

pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(|b| 0.5 * b.m * b.v.norm_squared()).sum()
}

/// Gravitational potential energy summed over unordered pairs
pub fn potential_energy(bodies: &[Body]) -> f64 {
    bodies
        .iter()
        .enumerate()
        .flat_map(|(i, a)| {
            bodies[i + 1..].iter().map(move |b| {
                let r = (a.x - b.x).norm();
                -G * a.m * b.m / r
            })
        })
        .sum()
}

pub fn total_energy(bodies: &[Body]) -> f64 {
    kinetic_energy(bodies) + potential_energy(bodies)
}

pub fn momentum(bodies: &[Body]) -> NVec3 {
    bodies.iter().fold(NVec3::zeros(), |p, b| p + b.v * b.m)
}
