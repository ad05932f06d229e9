pub mod config;
pub mod dom;
pub mod net;
pub mod bake;
pub mod rotation;
pub mod face;
pub mod framing;
pub mod render;
pub mod engine;
