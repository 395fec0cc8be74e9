//! Shader program lifecycle.
//!
//! ```text
//! Unbuilt → Compiling → { CompileFailed | Compiled } → Linking → { LinkFailed | Ready }
//! ```
//!
//! Only `Ready` programs are ever handed to callers. A failed build returns
//! the error instead, and a program is never rebuilt in place.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::compiler::compile_stage;
use crate::config::ProgramConfig;
use crate::context::GraphicsContext;
use crate::error::ShaderError;
use crate::linker::link_program;
use crate::source::SourceLoader;
use crate::stage::{ShaderSource, StageKind};
use crate::uniform::UniformValue;

/// Build state of a shader program.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ProgramState {
    Unbuilt,
    Compiling,
    CompileFailed,
    Compiled,
    Linking,
    LinkFailed,
    Ready,
}

impl ProgramState {
    /// Whether the lifecycle allows moving from `self` to `next`.
    pub const fn can_transition_to(self, next: ProgramState) -> bool {
        use ProgramState::*;
        matches!(
            (self, next),
            (Unbuilt, Compiling)
                | (Compiling, CompileFailed)
                | (Compiling, Compiled)
                | (Compiled, Linking)
                | (Linking, LinkFailed)
                | (Linking, Ready)
        )
    }

    /// No transition leaves a terminal state.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::CompileFailed | Self::LinkFailed | Self::Ready)
    }

    /// Only `Ready` programs may be activated or receive uniforms.
    pub const fn is_usable(self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl fmt::Display for ProgramState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unbuilt => "unbuilt",
            Self::Compiling => "compiling",
            Self::CompileFailed => "compile failed",
            Self::Compiled => "compiled",
            Self::Linking => "linking",
            Self::LinkFailed => "link failed",
            Self::Ready => "ready",
        };
        f.write_str(name)
    }
}

/// Drives one program through the build lifecycle.
///
/// Single use: once [`build`](Self::build) has run the builder sits in a
/// terminal state and further builds are refused. Rebuilding means creating
/// a new builder.
pub struct ProgramBuilder<'a, C: GraphicsContext> {
    ctx: &'a C,
    config: ProgramConfig,
    state: ProgramState,
}

impl<'a, C: GraphicsContext> ProgramBuilder<'a, C> {
    pub fn new(ctx: &'a C) -> Self {
        Self {
            ctx,
            config: ProgramConfig::default(),
            state: ProgramState::Unbuilt,
        }
    }

    pub fn with_config(mut self, config: ProgramConfig) -> Self {
        self.config = config;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.label = Some(label.into());
        self
    }

    pub fn state(&self) -> ProgramState {
        self.state
    }

    fn advance(&mut self, next: ProgramState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid program transition {} -> {next}",
            self.state
        );
        log::trace!("program {}: {} -> {next}", self.config.display_label(), self.state);
        self.state = next;
    }

    /// Compiles both stages and links them.
    ///
    /// Each source compiles as the stage it is tagged with. A pair that does
    /// not hold one vertex and one fragment stage fails at link time with
    /// [`ShaderError::Link`].
    ///
    /// The first argument compiles first. If it fails, the second is never
    /// submitted. If the second stage fails, the compiled first stage is
    /// released before returning.
    ///
    /// # Panics
    ///
    /// If the builder was already used.
    pub fn build(
        &mut self,
        vertex: &ShaderSource,
        fragment: &ShaderSource,
    ) -> Result<ShaderProgram<C>, ShaderError> {
        assert_eq!(
            self.state,
            ProgramState::Unbuilt,
            "a program builder cannot be reused; create a new one to rebuild"
        );

        self.advance(ProgramState::Compiling);
        let vs = match compile_stage(self.ctx, vertex, &self.config) {
            Ok(stage) => stage,
            Err(err) => {
                self.advance(ProgramState::CompileFailed);
                return Err(err);
            }
        };
        let fs = match compile_stage(self.ctx, fragment, &self.config) {
            Ok(stage) => stage,
            Err(err) => {
                vs.discard(self.ctx);
                self.advance(ProgramState::CompileFailed);
                return Err(err);
            }
        };
        self.advance(ProgramState::Compiled);

        self.advance(ProgramState::Linking);
        let id = match link_program(self.ctx, vec![vs, fs], &self.config) {
            Ok(id) => id,
            Err(err) => {
                self.advance(ProgramState::LinkFailed);
                return Err(err);
            }
        };
        self.advance(ProgramState::Ready);

        Ok(ShaderProgram {
            id,
            label: self.config.label.clone(),
            uniforms: RefCell::new(HashMap::new()),
            warned_inactive: RefCell::new(HashSet::new()),
        })
    }
}

/// A linked shader program ready for rendering.
///
/// Holding one means the program linked. It does not own the context:
/// every call takes the context it was built on.
///
/// Uniform locations are resolved lazily by name and cached for the lifetime
/// of the program. Names the driver does not know (misspelled or optimized
/// out) resolve to "not found", and writes to them are silently ignored.
///
/// Not `Sync`: like the context, a program is used from one thread only.
///
/// There is no `Drop` cleanup because dropping has no access to the context.
/// Call [`destroy`](Self::destroy) at teardown.
pub struct ShaderProgram<C: GraphicsContext> {
    id: C::Program,
    label: Option<String>,
    uniforms: RefCell<HashMap<String, Option<C::UniformLocation>>>,
    warned_inactive: RefCell<HashSet<String>>,
}

impl<C: GraphicsContext> ShaderProgram<C> {
    /// Starts a configurable build.
    pub fn builder(ctx: &C) -> ProgramBuilder<'_, C> {
        ProgramBuilder::new(ctx)
    }

    /// Builds a program from in-memory vertex and fragment source text.
    pub fn from_sources(ctx: &C, vertex: &str, fragment: &str) -> Result<Self, ShaderError> {
        ProgramBuilder::new(ctx)
            .build(&ShaderSource::vertex(vertex), &ShaderSource::fragment(fragment))
    }

    /// Loads both sources through `loader`, then builds the program.
    ///
    /// Both locations are read before any driver call, so a missing file
    /// fails without touching the context.
    pub fn from_locations<L>(
        ctx: &C,
        loader: &L,
        vertex_location: &str,
        fragment_location: &str,
    ) -> Result<Self, ShaderError>
    where
        L: SourceLoader + ?Sized,
    {
        Self::from_locations_with(
            ctx,
            loader,
            vertex_location,
            fragment_location,
            ProgramConfig::default(),
        )
    }

    /// [`from_locations`](Self::from_locations) with explicit options.
    pub fn from_locations_with<L>(
        ctx: &C,
        loader: &L,
        vertex_location: &str,
        fragment_location: &str,
        config: ProgramConfig,
    ) -> Result<Self, ShaderError>
    where
        L: SourceLoader + ?Sized,
    {
        let vertex = loader.load(StageKind::Vertex, vertex_location)?;
        let fragment = loader.load(StageKind::Fragment, fragment_location)?;
        ProgramBuilder::new(ctx).with_config(config).build(&vertex, &fragment)
    }

    /// Driver handle, for lower-level calls.
    pub fn id(&self) -> C::Program {
        self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Always [`ProgramState::Ready`]; failed builds never produce a program.
    pub fn state(&self) -> ProgramState {
        ProgramState::Ready
    }

    /// Makes this the current program on `ctx`.
    ///
    /// Any previously active program stops being current. Other code may
    /// activate a different program at any time, so call this before every
    /// batch of uniform writes and draws.
    pub fn activate(&self, ctx: &C) {
        ctx.use_program(Some(self.id));
    }

    /// Whether this program is the current one on `ctx`.
    pub fn is_active(&self, ctx: &C) -> bool {
        ctx.current_program() == Some(self.id)
    }

    /// Resolves the location of `name`, caching the answer.
    ///
    /// Repeated calls return the same location without asking the driver
    /// again. `None` means the program has no active uniform by that name.
    pub fn uniform_location(&self, ctx: &C, name: &str) -> Option<C::UniformLocation> {
        if let Some(cached) = self.uniforms.borrow().get(name) {
            return cached.clone();
        }

        let location = ctx.uniform_location(self.id, name);
        if location.is_none() {
            log::debug!(
                "program {}: no active uniform `{name}`, writes to it are ignored",
                self.label.as_deref().unwrap_or("<unnamed>")
            );
        }
        self.uniforms
            .borrow_mut()
            .insert(name.to_owned(), location.clone());
        location
    }

    /// Number of names resolved so far, found or not.
    pub fn cached_uniforms(&self) -> usize {
        self.uniforms.borrow().len()
    }

    /// Writes `value` to the uniform `name`.
    ///
    /// The program must be active (see [`activate`](Self::activate)); writing
    /// to an inactive program is undefined and is not corrected here. Debug
    /// builds log a warning the first time it happens for a given name.
    /// Unknown names are a no-op.
    pub fn set_uniform(&self, ctx: &C, name: &str, value: impl Into<UniformValue>) {
        let value = value.into();
        if cfg!(debug_assertions) && !self.is_active(ctx) {
            self.warn_inactive(name);
        }
        if let Some(location) = self.uniform_location(ctx, name) {
            ctx.set_uniform(&location, &value);
        }
    }

    fn warn_inactive(&self, name: &str) {
        if self.warned_inactive.borrow_mut().insert(name.to_owned()) {
            log::warn!(
                "uniform `{name}` written while program {} is not active",
                self.label.as_deref().unwrap_or("<unnamed>")
            );
        }
    }

    pub fn set_bool(&self, ctx: &C, name: &str, value: bool) {
        self.set_uniform(ctx, name, value);
    }

    pub fn set_int(&self, ctx: &C, name: &str, value: i32) {
        self.set_uniform(ctx, name, value);
    }

    pub fn set_uint(&self, ctx: &C, name: &str, value: u32) {
        self.set_uniform(ctx, name, value);
    }

    pub fn set_float(&self, ctx: &C, name: &str, value: f32) {
        self.set_uniform(ctx, name, value);
    }

    pub fn set_vec2(&self, ctx: &C, name: &str, value: [f32; 2]) {
        self.set_uniform(ctx, name, value);
    }

    pub fn set_vec3(&self, ctx: &C, name: &str, value: [f32; 3]) {
        self.set_uniform(ctx, name, value);
    }

    pub fn set_vec4(&self, ctx: &C, name: &str, value: [f32; 4]) {
        self.set_uniform(ctx, name, value);
    }

    pub fn set_ivec2(&self, ctx: &C, name: &str, value: [i32; 2]) {
        self.set_uniform(ctx, name, value);
    }

    pub fn set_ivec3(&self, ctx: &C, name: &str, value: [i32; 3]) {
        self.set_uniform(ctx, name, value);
    }

    pub fn set_ivec4(&self, ctx: &C, name: &str, value: [i32; 4]) {
        self.set_uniform(ctx, name, value);
    }

    /// Column-major 2×2 matrix.
    pub fn set_mat2(&self, ctx: &C, name: &str, value: [[f32; 2]; 2]) {
        self.set_uniform(ctx, name, value);
    }

    /// Column-major 3×3 matrix.
    pub fn set_mat3(&self, ctx: &C, name: &str, value: [[f32; 3]; 3]) {
        self.set_uniform(ctx, name, value);
    }

    /// Column-major 4×4 matrix.
    pub fn set_mat4(&self, ctx: &C, name: &str, value: [[f32; 4]; 4]) {
        self.set_uniform(ctx, name, value);
    }

    /// Deletes the program object.
    ///
    /// If the program is current it is unbound first.
    pub fn destroy(self, ctx: &C) {
        if self.is_active(ctx) {
            ctx.use_program(None);
        }
        ctx.delete_program(self.id);
        log::debug!("program {} destroyed", self.label.as_deref().unwrap_or("<unnamed>"));
    }
}

impl<C: GraphicsContext> fmt::Debug for ShaderProgram<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("cached_uniforms", &self.uniforms.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailedStep;
    use crate::mock::{Call, RecordingContext};
    use crate::source::MemorySourceLoader;

    const VS: &str = "#version 330 core\nvoid main(){gl_Position=vec4(0);}";
    const FS: &str = "#version 330 core\nout vec4 c;\nvoid main(){c=vec4(1);}";

    const VS_FILE: &str = "vertexShader.vs";
    const FS_FILE: &str = "fragmentShader.fs";

    const COLOR_VS: &str = "#version 330 core
layout (location = 0) in vec3 aPos;
layout (location = 1) in vec3 aColor;
uniform float u_scale;
uniform mat4 u_transform;
out vec3 ourColor;
void main() {
    gl_Position = u_transform * vec4(aPos * u_scale, 1.0);
    ourColor = aColor;
}";

    const COLOR_FS: &str = "#version 330 core
in vec3 ourColor;
uniform float u_tint;
uniform bool u_invert;
uniform int u_mode;
out vec4 FragColor;
void main() {
    vec3 c = u_invert ? 1.0 - ourColor : ourColor;
    FragColor = vec4(c * u_tint, float(u_mode));
}";

    fn color_program(ctx: &RecordingContext) -> ShaderProgram<RecordingContext> {
        ShaderProgram::from_sources(ctx, COLOR_VS, COLOR_FS).unwrap()
    }

    // ── state machine ─────────────────────────────────────────────────────

    #[test]
    fn lifecycle_transitions() {
        use ProgramState::*;
        assert!(Unbuilt.can_transition_to(Compiling));
        assert!(Compiling.can_transition_to(Compiled));
        assert!(Compiling.can_transition_to(CompileFailed));
        assert!(Compiled.can_transition_to(Linking));
        assert!(Linking.can_transition_to(Ready));
        assert!(Linking.can_transition_to(LinkFailed));

        assert!(!Ready.can_transition_to(Compiling));
        assert!(!CompileFailed.can_transition_to(Compiling));
        assert!(!LinkFailed.can_transition_to(Linking));
        assert!(!Unbuilt.can_transition_to(Ready));
    }

    #[test]
    fn only_ready_is_usable() {
        use ProgramState::*;
        for state in [Unbuilt, Compiling, CompileFailed, Compiled, Linking, LinkFailed] {
            assert!(!state.is_usable(), "{state}");
        }
        assert!(Ready.is_usable());
        assert!(Ready.is_terminal() && CompileFailed.is_terminal() && LinkFailed.is_terminal());
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn minimal_pair_builds_ready_program() {
        let ctx = RecordingContext::new();
        let program = ShaderProgram::from_sources(&ctx, VS, FS).unwrap();
        assert_eq!(program.state(), ProgramState::Ready);
        assert_eq!(ctx.live_programs(), 1);
        assert_eq!(ctx.live_shaders(), 0);
    }

    #[test]
    fn builder_reaches_ready() {
        let ctx = RecordingContext::new();
        let mut builder = ShaderProgram::builder(&ctx).label("triangle");
        assert_eq!(builder.state(), ProgramState::Unbuilt);

        let program = builder
            .build(&ShaderSource::vertex(VS), &ShaderSource::fragment(FS))
            .unwrap();
        assert_eq!(builder.state(), ProgramState::Ready);
        assert_eq!(program.label(), Some("triangle"));
    }

    #[test]
    fn vertex_syntax_error_short_circuits_fragment() {
        let ctx = RecordingContext::new();
        let mut builder = ProgramBuilder::new(&ctx);
        let broken = ShaderSource::vertex("#version 330 core\nvoid main(){gl_Position=vec4(0);");
        let err = builder.build(&broken, &ShaderSource::fragment(FS)).unwrap_err();

        match &err {
            ShaderError::Compile { stage, message } => {
                assert_eq!(*stage, StageKind::Vertex);
                assert!(!message.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(builder.state(), ProgramState::CompileFailed);

        let fragment_created = ctx
            .calls()
            .iter()
            .any(|c| matches!(c, Call::CreateShader(StageKind::Fragment, _)));
        assert!(!fragment_created);
        assert_eq!(ctx.live_shaders(), 0);
        assert_eq!(ctx.live_programs(), 0);
    }

    #[test]
    fn fragment_error_releases_vertex_stage() {
        let ctx = RecordingContext::new();
        let broken = "#version 330 core\nvoid main(){)";
        let err = ShaderProgram::from_sources(&ctx, VS, broken).unwrap_err();

        assert_eq!(err.failed_step(), FailedStep::Fragment);
        assert_eq!(err.program_state(), ProgramState::CompileFailed);
        assert_eq!(ctx.live_shaders(), 0);
        assert!(!ctx.calls().iter().any(|c| matches!(c, Call::CreateProgram(_))));
    }

    #[test]
    fn link_mismatch_fails_with_link_error() {
        let ctx = RecordingContext::new();
        let fs = "#version 330 core\nin vec2 uv;\nout vec4 c;\nvoid main(){c=vec4(uv,0.0,1.0);}";
        let mut builder = ProgramBuilder::new(&ctx);
        let err = builder
            .build(&ShaderSource::vertex(VS), &ShaderSource::fragment(fs))
            .unwrap_err();

        assert!(matches!(&err, ShaderError::Link { message } if !message.is_empty()));
        assert_eq!(builder.state(), ProgramState::LinkFailed);
        assert_eq!(ctx.live_programs(), 0);
        assert_eq!(ctx.live_shaders(), 0);
    }

    #[test]
    fn mismatched_stage_kinds_fail_at_link() {
        let ctx = RecordingContext::new();
        let mut builder = ProgramBuilder::new(&ctx);
        let err = builder
            .build(&ShaderSource::vertex(VS), &ShaderSource::vertex(VS))
            .unwrap_err();

        assert_eq!(
            err,
            ShaderError::Link { message: "2 vertex stages were supplied, expected one".into() }
        );
        assert_eq!(builder.state(), ProgramState::LinkFailed);
        assert_eq!(ctx.live_shaders(), 0);
        assert_eq!(ctx.live_programs(), 0);
    }

    #[test]
    fn zero_log_cap_keeps_compile_message_non_empty() {
        let ctx = RecordingContext::new();
        let config = ProgramConfig::default().with_max_info_log_len(0);
        let err = ProgramBuilder::new(&ctx)
            .with_config(config)
            .build(&ShaderSource::vertex("void main(){"), &ShaderSource::fragment(FS))
            .unwrap_err();

        assert_eq!(err.failed_step(), FailedStep::Vertex);
        assert!(err.message().is_some_and(|m| !m.is_empty()), "{err:?}");
    }

    #[test]
    #[should_panic(expected = "cannot be reused")]
    fn builder_refuses_second_build() {
        let ctx = RecordingContext::new();
        let mut builder = ProgramBuilder::new(&ctx);
        let _ = builder.build(&ShaderSource::vertex("{"), &ShaderSource::fragment(FS));
        let _ = builder.build(&ShaderSource::vertex(VS), &ShaderSource::fragment(FS));
    }

    #[test]
    fn from_locations_loads_through_loader() {
        let ctx = RecordingContext::new();
        let loader = MemorySourceLoader::new()
            .with(VS_FILE, VS)
            .with(FS_FILE, FS);
        let program = ShaderProgram::from_locations(&ctx, &loader, VS_FILE, FS_FILE).unwrap();
        assert_eq!(program.state(), ProgramState::Ready);
    }

    #[test]
    fn missing_source_fails_before_driver_calls() {
        let ctx = RecordingContext::new();
        let loader = MemorySourceLoader::new().with(VS_FILE, VS);
        let err = ShaderProgram::from_locations(&ctx, &loader, VS_FILE, FS_FILE).unwrap_err();

        assert_eq!(err, ShaderError::ResourceNotFound { location: FS_FILE.into() });
        assert!(ctx.calls().is_empty());
    }

    // ── activation ────────────────────────────────────────────────────────

    #[test]
    fn activate_makes_program_current() {
        let ctx = RecordingContext::new();
        let a = ShaderProgram::from_sources(&ctx, VS, FS).unwrap();
        let b = ShaderProgram::from_sources(&ctx, VS, FS).unwrap();
        assert_ne!(a.id(), b.id());

        a.activate(&ctx);
        assert!(a.is_active(&ctx));

        b.activate(&ctx);
        assert!(b.is_active(&ctx));
        assert!(!a.is_active(&ctx));
    }

    #[test]
    fn destroy_unbinds_current_program() {
        let ctx = RecordingContext::new();
        let program = ShaderProgram::from_sources(&ctx, VS, FS).unwrap();
        program.activate(&ctx);
        program.destroy(&ctx);

        assert_eq!(ctx.current_program(), None);
        assert_eq!(ctx.live_programs(), 0);
    }

    // ── uniforms ──────────────────────────────────────────────────────────

    #[test]
    fn scalar_setters_write_values() {
        let ctx = RecordingContext::new();
        let program = color_program(&ctx);
        program.activate(&ctx);

        program.set_float(&ctx, "u_tint", 0.5);
        program.set_bool(&ctx, "u_invert", true);
        program.set_int(&ctx, "u_mode", 2);

        let id = program.id();
        assert_eq!(ctx.uniform_value(id, "u_tint"), Some(UniformValue::Float(0.5)));
        assert_eq!(ctx.uniform_value(id, "u_invert"), Some(UniformValue::Bool(true)));
        assert_eq!(ctx.uniform_value(id, "u_mode"), Some(UniformValue::Int(2)));
    }

    #[test]
    fn matrix_setter_writes_column_major_value() {
        let ctx = RecordingContext::new();
        let program = color_program(&ctx);
        program.activate(&ctx);

        let translate = [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.5, -0.5, 0.0, 1.0],
        ];
        program.set_mat4(&ctx, "u_transform", translate);
        assert_eq!(
            ctx.uniform_value(program.id(), "u_transform"),
            Some(UniformValue::Mat4(translate))
        );
    }

    #[test]
    fn unknown_uniform_is_silent_noop() {
        let ctx = RecordingContext::new();
        let program = ShaderProgram::from_sources(&ctx, VS, FS).unwrap();
        program.activate(&ctx);
        program.set_float(&ctx, "missing", 1.0);

        assert!(program.is_active(&ctx));
        assert!(ctx.errors().is_empty());
        assert!(!ctx.calls().iter().any(|c| matches!(c, Call::SetUniform(..))));
    }

    #[test]
    fn unknown_uniform_leaves_other_values_untouched() {
        let ctx = RecordingContext::new();
        let program = color_program(&ctx);
        program.activate(&ctx);

        program.set_float(&ctx, "u_tint", 0.25);
        program.set_float(&ctx, "u_tnit", 0.75);

        assert_eq!(ctx.uniform_value(program.id(), "u_tint"), Some(UniformValue::Float(0.25)));
        assert_eq!(ctx.uniform_value(program.id(), "u_scale"), None);
    }

    #[test]
    fn location_resolution_is_idempotent_and_cached() {
        let ctx = RecordingContext::new();
        let program = color_program(&ctx);

        let first = program.uniform_location(&ctx, "u_tint");
        let second = program.uniform_location(&ctx, "u_tint");
        assert!(first.is_some());
        assert_eq!(first, second);

        let missing_a = program.uniform_location(&ctx, "nope");
        let missing_b = program.uniform_location(&ctx, "nope");
        assert_eq!(missing_a, None);
        assert_eq!(missing_b, None);

        let lookups = ctx
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::GetUniformLocation(..)))
            .count();
        assert_eq!(lookups, 2);
        assert_eq!(program.cached_uniforms(), 2);
    }

    #[test]
    fn writes_go_to_current_program_only() {
        let ctx = RecordingContext::new();
        let a = color_program(&ctx);
        let b = color_program(&ctx);

        a.activate(&ctx);
        a.set_float(&ctx, "u_tint", 1.0);
        b.activate(&ctx);
        b.set_float(&ctx, "u_tint", 2.0);

        assert_eq!(ctx.uniform_value(a.id(), "u_tint"), Some(UniformValue::Float(1.0)));
        assert_eq!(ctx.uniform_value(b.id(), "u_tint"), Some(UniformValue::Float(2.0)));
    }

    #[test]
    #[cfg(debug_assertions)]
    fn inactive_write_warns_once_per_name() {
        let ctx = RecordingContext::new();
        let a = color_program(&ctx);
        let b = color_program(&ctx);
        b.activate(&ctx);

        a.set_float(&ctx, "u_tint", 1.0);
        a.set_float(&ctx, "u_tint", 2.0);
        a.set_float(&ctx, "u_scale", 3.0);
        b.set_float(&ctx, "u_tint", 4.0);

        let warned = a.warned_inactive.borrow();
        assert_eq!(warned.len(), 2);
        assert!(warned.contains("u_tint") && warned.contains("u_scale"));
        assert!(b.warned_inactive.borrow().is_empty());
    }

    #[test]
    fn setter_does_not_reactivate_program() {
        let ctx = RecordingContext::new();
        let a = color_program(&ctx);
        let b = color_program(&ctx);
        b.activate(&ctx);

        a.set_float(&ctx, "u_tint", 1.0);

        assert!(b.is_active(&ctx));
        let uses = ctx
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::UseProgram(_)))
            .count();
        assert_eq!(uses, 1);
    }
}
