//! Shader program abstraction for the ember demos.
//!
//! Given vertex and fragment source, this crate compiles both stages, links
//! them into a program, reports failures as structured errors, and writes
//! uniforms by name while rendering.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`source`] | `SourceLoader`, `FileSourceLoader`, `MemorySourceLoader` |
//! | [`stage`] | `StageKind`, `ShaderSource` |
//! | [`compiler`] | `compile_stage`, `CompiledStage` |
//! | [`linker`] | `link_program` |
//! | [`program`] | `ShaderProgram`, `ProgramBuilder`, `ProgramState` |
//! | [`uniform`] | `UniformValue` |
//! | [`context`] | `GraphicsContext`, the driver seam (implemented for `glow::Context`) |
//! | [`mock`] | `RecordingContext`, a driver-free context for tests |
//! | [`error`] | `ShaderError`, `FailedStep` |
//! | [`logging`] | `init_logging`, `LoggingConfig` |
//!
//! All calls run on the thread that owns the graphics context.
//!
//! # Quick start
//!
//! ```rust
//! use ember_shader::mock::RecordingContext;
//! use ember_shader::{ShaderError, ShaderProgram, StageKind};
//!
//! let ctx = RecordingContext::new();
//! let program = ShaderProgram::from_sources(
//!     &ctx,
//!     "#version 330 core\nvoid main(){gl_Position=vec4(0);}",
//!     "#version 330 core\nuniform float u_tint;\nout vec4 c;\nvoid main(){c=vec4(u_tint);}",
//! )
//! .unwrap();
//!
//! program.activate(&ctx);
//! program.set_float(&ctx, "u_tint", 0.5);
//! program.set_float(&ctx, "missing", 1.0); // no such uniform: ignored
//!
//! let err = ShaderProgram::from_sources(&ctx, "void main(){", "void main(){}").unwrap_err();
//! assert!(matches!(err, ShaderError::Compile { stage: StageKind::Vertex, .. }));
//! ```

mod backend;
pub mod compiler;
mod config;
pub mod context;
mod diagnostics;
pub mod error;
pub mod linker;
pub mod logging;
pub mod mock;
pub mod program;
pub mod source;
pub mod stage;
pub mod uniform;

pub use compiler::{compile_stage, CompiledStage};
pub use config::ProgramConfig;
pub use context::GraphicsContext;
pub use error::{FailedStep, GlObject, ShaderError};
pub use linker::link_program;
pub use program::{ProgramBuilder, ProgramState, ShaderProgram};
pub use source::{FileSourceLoader, MemorySourceLoader, SourceLoader};
pub use stage::{ShaderSource, StageKind};
pub use uniform::UniformValue;

#[cfg(all(feature = "glow", not(target_arch = "wasm32")))]
pub use glow;
