pub mod analysis;
pub mod cluster;
pub mod config;
pub mod error;
pub mod events;
pub mod features;
pub mod recommend;
pub mod scaler;
pub mod summary;
// cmd and reports are binary modules (see main.rs).
