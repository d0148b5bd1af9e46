//! Shader program lifecycle.
//!
//! A single source file carries both pipeline stages, separated by inline
//! `#vertex` / `#fragment` markers. Construction splits the file, compiles
//! each stage, links the program, and caches the active uniform slots.

mod error;
mod program;
mod split;

pub use error::ShaderError;
pub use program::ShaderProgram;
pub use split::{StageSources, split_stages};
