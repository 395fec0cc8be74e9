//! Program linking.

use crate::compiler::CompiledStage;
use crate::config::ProgramConfig;
use crate::context::GraphicsContext;
use crate::diagnostics::diagnostic_message;
use crate::error::{FailedStep, GlObject, ShaderError};
use crate::stage::StageKind;

/// Links compiled stages into a program object.
///
/// Exactly one vertex and one fragment stage are required. The stages are
/// consumed: they are detached and deleted whether linking succeeds or not.
/// On failure the program object is deleted as well, so no handle escapes.
pub fn link_program<C: GraphicsContext>(
    ctx: &C,
    stages: Vec<CompiledStage<C::Shader>>,
    config: &ProgramConfig,
) -> Result<C::Program, ShaderError> {
    if let Err(message) = check_stage_set(&stages) {
        release(ctx, stages);
        return Err(ShaderError::Link { message });
    }

    let program = match ctx.create_program() {
        Ok(program) => program,
        Err(message) => {
            release(ctx, stages);
            return Err(ShaderError::ObjectCreation {
                object: GlObject::Program,
                message,
            });
        }
    };

    for stage in &stages {
        ctx.attach_shader(program, stage.handle());
    }
    ctx.link_program(program);
    let linked = ctx.program_link_status(program);

    // Stages are link-time inputs only.
    for stage in stages {
        ctx.detach_shader(program, stage.handle());
        stage.discard(ctx);
    }

    if !linked {
        let log = ctx.program_info_log(program);
        ctx.delete_program(program);
        return Err(ShaderError::Link {
            message: diagnostic_message(log, FailedStep::Link, config.max_info_log_len),
        });
    }

    log::debug!("program {} linked", config.display_label());
    Ok(program)
}

fn check_stage_set<S: Copy>(stages: &[CompiledStage<S>]) -> Result<(), String> {
    for kind in StageKind::ALL {
        match stages.iter().filter(|s| s.kind() == kind).count() {
            1 => {}
            0 => return Err(format!("no {kind} stage was supplied")),
            n => return Err(format!("{n} {kind} stages were supplied, expected one")),
        }
    }
    Ok(())
}

fn release<C: GraphicsContext>(ctx: &C, stages: Vec<CompiledStage<C::Shader>>) {
    for stage in stages {
        stage.discard(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile_stage;
    use crate::mock::{Call, MockShader, RecordingContext};
    use crate::stage::ShaderSource;

    const VS: &str = "#version 330 core
layout (location = 0) in vec3 aPos;
out vec3 vColor;
void main() { gl_Position = vec4(aPos, 1.0); vColor = aPos; }";

    const FS: &str = "#version 330 core
in vec3 vColor;
out vec4 FragColor;
void main() { FragColor = vec4(vColor, 1.0); }";

    fn compile(ctx: &RecordingContext, src: ShaderSource) -> CompiledStage<MockShader> {
        compile_stage(ctx, &src, &ProgramConfig::default()).unwrap()
    }

    #[test]
    fn links_and_releases_stages() {
        let ctx = RecordingContext::new();
        let stages = vec![
            compile(&ctx, ShaderSource::vertex(VS)),
            compile(&ctx, ShaderSource::fragment(FS)),
        ];
        let program = link_program(&ctx, stages, &ProgramConfig::default()).unwrap();

        assert_eq!(ctx.live_shaders(), 0);
        assert_eq!(ctx.live_programs(), 1);
        let detached = ctx
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::DetachShader(p, _) if *p == program))
            .count();
        assert_eq!(detached, 2);
    }

    #[test]
    fn interface_mismatch_is_link_error() {
        let ctx = RecordingContext::new();
        let fs =
            "#version 330 core\nin vec3 vNormal;\nout vec4 c;\nvoid main(){c=vec4(vNormal,1.0);}";
        let stages = vec![
            compile(&ctx, ShaderSource::vertex(VS)),
            compile(&ctx, ShaderSource::fragment(fs)),
        ];
        let err = link_program(&ctx, stages, &ProgramConfig::default()).unwrap_err();

        match &err {
            ShaderError::Link { message } => assert!(message.contains("vNormal"), "{message}"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(ctx.live_shaders(), 0);
        assert_eq!(ctx.live_programs(), 0);
        assert!(ctx.calls().iter().any(|c| matches!(c, Call::ProgramInfoLog(_))));
    }

    #[test]
    fn missing_fragment_stage_rejected_before_driver_link() {
        let ctx = RecordingContext::new();
        let stages = vec![compile(&ctx, ShaderSource::vertex(VS))];
        let err = link_program(&ctx, stages, &ProgramConfig::default()).unwrap_err();

        assert_eq!(err, ShaderError::Link { message: "no fragment stage was supplied".into() });
        assert_eq!(ctx.live_shaders(), 0);
        assert!(!ctx.calls().iter().any(|c| matches!(c, Call::LinkProgram(_))));
    }

    #[test]
    fn duplicate_stage_rejected() {
        let ctx = RecordingContext::new();
        let stages = vec![
            compile(&ctx, ShaderSource::vertex(VS)),
            compile(&ctx, ShaderSource::vertex(VS)),
            compile(&ctx, ShaderSource::fragment(FS)),
        ];
        let err = link_program(&ctx, stages, &ProgramConfig::default()).unwrap_err();
        assert_eq!(err.failed_step(), FailedStep::Link);
        assert_eq!(ctx.live_shaders(), 0);
    }

    #[test]
    fn program_creation_failure_releases_stages() {
        let ctx = RecordingContext::new();
        let stages = vec![
            compile(&ctx, ShaderSource::vertex(VS)),
            compile(&ctx, ShaderSource::fragment(FS)),
        ];
        ctx.refuse_object_creation(true);
        let err = link_program(&ctx, stages, &ProgramConfig::default()).unwrap_err();

        assert!(matches!(err, ShaderError::ObjectCreation { object: GlObject::Program, .. }));
        assert_eq!(ctx.live_shaders(), 0);
    }
}
