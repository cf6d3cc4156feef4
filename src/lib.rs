pub mod cli;
pub mod config;
pub mod context;
pub mod display;
pub mod error;
pub mod loader;
pub mod scanner;
pub mod selector;

pub use context::AppContext;
pub use error::{InspectionError, Result};
