//! Error types.

use std::{error::Error, fmt};

use crate::program::ProgramState;
use crate::stage::StageKind;

/// Step of program construction that produced a failure.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FailedStep {
    /// Reading shader source.
    Load,
    /// Compiling the vertex stage.
    Vertex,
    /// Compiling the fragment stage.
    Fragment,
    /// Linking the program.
    Link,
}

impl From<StageKind> for FailedStep {
    fn from(kind: StageKind) -> Self {
        match kind {
            StageKind::Vertex => Self::Vertex,
            StageKind::Fragment => Self::Fragment,
        }
    }
}

impl fmt::Display for FailedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Load => f.write_str("source load"),
            Self::Vertex => f.write_str("vertex compile"),
            Self::Fragment => f.write_str("fragment compile"),
            Self::Link => f.write_str("program link"),
        }
    }
}

/// Driver object the context failed to allocate.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GlObject {
    Shader(StageKind),
    Program,
}

impl fmt::Display for GlObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Shader(kind) => write!(f, "{kind} shader object"),
            Self::Program => f.write_str("program object"),
        }
    }
}

/// Possible errors while building a shader program.
///
/// Every variant is fatal for the program under construction; there is no
/// partially built program to fall back on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    /// The source location does not exist.
    ResourceNotFound { location: String },
    /// The source location exists but could not be read as UTF-8 text.
    ReadFailure { location: String, message: String },
    /// A stage failed to compile. `message` is the driver's info log.
    Compile { stage: StageKind, message: String },
    /// The stages failed to link. `message` is the driver's program info log.
    Link { message: String },
    /// The driver refused to allocate a shader or program object.
    ObjectCreation { object: GlObject, message: String },
}

impl ShaderError {
    /// Which construction step failed.
    pub fn failed_step(&self) -> FailedStep {
        match self {
            Self::ResourceNotFound { .. } | Self::ReadFailure { .. } => FailedStep::Load,
            Self::Compile { stage, .. } => (*stage).into(),
            Self::ObjectCreation { object: GlObject::Shader(stage), .. } => (*stage).into(),
            Self::Link { .. } | Self::ObjectCreation { object: GlObject::Program, .. } => {
                FailedStep::Link
            }
        }
    }

    /// Terminal state the program builder was left in.
    ///
    /// Load failures happen before compilation starts, so the builder never
    /// leaves `Unbuilt`.
    pub fn program_state(&self) -> ProgramState {
        match self.failed_step() {
            FailedStep::Load => ProgramState::Unbuilt,
            FailedStep::Vertex | FailedStep::Fragment => ProgramState::CompileFailed,
            FailedStep::Link => ProgramState::LinkFailed,
        }
    }

    /// Driver or I/O message carried by this error, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::ResourceNotFound { .. } => None,
            Self::ReadFailure { message, .. }
            | Self::Compile { message, .. }
            | Self::Link { message }
            | Self::ObjectCreation { message, .. } => Some(message),
        }
    }
}

impl Error for ShaderError {}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceNotFound { location } => {
                write!(f, "shader source `{location}` not found")
            }
            Self::ReadFailure { location, message } => {
                write!(f, "failed to read shader source `{location}`: {message}")
            }
            Self::Compile { stage, message } => {
                write!(f, "{stage} shader failed to compile:\n{message}")
            }
            Self::Link { message } => write!(f, "shader program failed to link:\n{message}"),
            Self::ObjectCreation { object, message } => {
                write!(f, "failed to create {object}: {message}")
            }
        }
    }
}
