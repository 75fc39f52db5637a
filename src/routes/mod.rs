pub mod app;
pub mod default_route;
pub mod run_route;

pub use app::*;
