pub mod api;
pub mod config;
pub mod error;
pub mod fitness;
pub mod geometry;
pub mod layouts;
pub mod optimizer;
// cmd and reports belong to the binary (main.rs).
