pub mod algorithm;
pub mod config;
pub mod grid;
pub mod problem;
pub mod solver;
pub mod stat;
pub mod world;
