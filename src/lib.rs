pub mod assets;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod world;
