pub mod config;
pub mod content;
pub mod filters;
pub mod handlers;
pub mod logging;
pub mod paths;
pub mod quiz;
pub mod session;
pub mod state;
