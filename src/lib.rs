pub mod animation;
pub mod compute;
pub mod config;
pub mod entities;
pub mod levels;
pub mod physics;
pub mod pool;
pub mod schedule;
pub mod scene;
pub mod scoring;
