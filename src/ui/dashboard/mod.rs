//! Modular dashboard implementation
//!
//! State, rendering and the pricing form live in separate modules

pub mod chart;
pub mod components;
pub mod form;
pub mod renderer;
pub mod state;
pub mod updaters;
pub mod utils;

pub use renderer::render_dashboard;
pub use state::DashboardState;
