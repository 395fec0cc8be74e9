//! Graphics-context seam.
//!
//! The core never touches a global driver. Every operation receives the
//! context explicitly, so it can run against OpenGL (`glow` feature) or
//! against [`crate::mock::RecordingContext`] in tests.
//!
//! # Threading
//!
//! A graphics context belongs to one thread. Implementations are not required
//! to be `Sync`, and nothing in this crate locks around driver calls. Callers
//! must invoke every operation on the thread that owns the context.

use std::fmt;

use crate::stage::StageKind;
use crate::uniform::UniformValue;

/// Driver primitives needed to build and drive a shader program.
///
/// The associated handle types mirror `glow::HasContext`.
pub trait GraphicsContext {
    /// Handle to a stage (shader) object.
    type Shader: Copy + fmt::Debug;
    /// Handle to a program object.
    type Program: Copy + PartialEq + fmt::Debug;
    /// Resolved uniform location within a program.
    type UniformLocation: Clone + fmt::Debug;

    fn create_shader(&self, kind: StageKind) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn delete_program(&self, program: Self::Program);

    /// Makes `program` current; `None` unbinds.
    fn use_program(&self, program: Option<Self::Program>);
    /// Program currently bound on this context.
    fn current_program(&self) -> Option<Self::Program>;

    /// Location of `name` in a linked program, `None` if it is not an active uniform.
    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation>;
    /// Writes `value` to `location` of the **current** program.
    fn set_uniform(&self, location: &Self::UniformLocation, value: &UniformValue);
}
