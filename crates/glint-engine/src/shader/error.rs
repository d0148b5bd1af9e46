use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::device::ShaderStage;

/// A failure in the shader program lifecycle.
///
/// All variants except `UnknownUniform` occur at load time and are fatal for
/// the run; `UnknownUniform` is a programming error (misspelled or
/// optimized-away uniform name) surfaced at use time.
#[derive(Debug)]
pub enum ShaderError {
    /// The shader source file could not be read.
    Io { path: PathBuf, source: io::Error },
    /// A stage failed to compile; `log` is the device diagnostic text verbatim.
    Compile { stage: ShaderStage, log: String },
    /// The program failed to link.
    Link { log: String },
    /// A uniform name not present in the linked program's active set.
    UnknownUniform { name: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Io { path, source } => {
                write!(f, "failed to read shader file {}: {}", path.display(), source)
            }
            ShaderError::Compile { stage, log } => {
                write!(f, "{stage} shader failed to compile:\n{log}")
            }
            ShaderError::Link { log } => {
                write!(f, "shader program failed to link:\n{log}")
            }
            ShaderError::UnknownUniform { name } => {
                write!(f, "uniform {name:?} is not active in the shader program")
            }
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShaderError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
