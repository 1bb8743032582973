pub mod geometry;
pub mod states;
pub mod forces;
pub mod octree;
pub mod barnes_hut;
pub mod integrator;
pub mod engine;
pub mod scenario;
