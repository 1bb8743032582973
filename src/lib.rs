pub mod simulation;
pub mod configuration;
pub mod driver;
pub mod benchmark;

pub use simulation::geometry::{Bounds, NVec3, center_of_mass};
pub use simulation::states::{Body, PointMass, PositionedMass, System};
pub use simulation::forces::{G, force, two_body_force, direct_forces, total_energy};
pub use simulation::octree::{Octree, OctreeNode, NodeKind, MAX_DEPTH};
pub use simulation::barnes_hut::{BarnesHut, TraversalStats, DEFAULT_SD_MAX_RATIO};
pub use simulation::integrator::{euler_step, leapfrog_step, NBodyUpdater};
pub use simulation::scenario::Scenario;

pub use configuration::config::{IntegratorConfig, EngineConfig, BodyConfig, BinaryConfig, CloudConfig, ScenarioConfig};

pub use driver::headless::{run_headless, RunSummary};

pub use benchmark::benchmark::bench_step_curve;
