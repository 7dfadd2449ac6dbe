pub mod config;
pub mod error;
pub mod git_ops;
pub mod github;
pub mod publish;
pub mod resolver;
pub mod ui;
pub mod version;

pub use error::{ReleaseBumpError, Result};
