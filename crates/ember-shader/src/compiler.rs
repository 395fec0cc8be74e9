//! Stage compilation.

use crate::config::ProgramConfig;
use crate::context::GraphicsContext;
use crate::diagnostics::diagnostic_message;
use crate::error::{GlObject, ShaderError};
use crate::stage::{ShaderSource, StageKind};

/// A successfully compiled stage, waiting to be linked.
///
/// Only [`compile_stage`] creates one and [`crate::link_program`] consumes
/// it. Dropping it without linking leaks the driver object; call
/// [`discard`](Self::discard) instead.
#[derive(Debug)]
pub struct CompiledStage<S> {
    kind: StageKind,
    handle: S,
}

impl<S: Copy> CompiledStage<S> {
    pub fn kind(&self) -> StageKind {
        self.kind
    }

    /// Raw driver handle.
    pub fn handle(&self) -> S {
        self.handle
    }

    /// Releases the stage object without linking it.
    pub fn discard<C>(self, ctx: &C)
    where
        C: GraphicsContext<Shader = S>,
    {
        ctx.delete_shader(self.handle);
    }
}

/// Compiles one stage.
///
/// On failure the stage object is deleted and the driver's compile log is
/// returned as [`ShaderError::Compile`]. Compilation is deterministic, so
/// there is no retry.
pub fn compile_stage<C: GraphicsContext>(
    ctx: &C,
    source: &ShaderSource,
    config: &ProgramConfig,
) -> Result<CompiledStage<C::Shader>, ShaderError> {
    let kind = source.kind();
    let handle = ctx
        .create_shader(kind)
        .map_err(|message| ShaderError::ObjectCreation {
            object: GlObject::Shader(kind),
            message,
        })?;

    ctx.shader_source(handle, source.text());
    ctx.compile_shader(handle);

    if !ctx.shader_compile_status(handle) {
        let log = ctx.shader_info_log(handle);
        ctx.delete_shader(handle);
        return Err(ShaderError::Compile {
            stage: kind,
            message: diagnostic_message(log, kind.into(), config.max_info_log_len),
        });
    }

    log::debug!("{kind} stage compiled for program {}", config.display_label());
    Ok(CompiledStage { kind, handle })
}
