pub mod bootstrap;
pub mod config;
pub mod input;
pub mod logging;
pub mod scene;
pub mod shape;
