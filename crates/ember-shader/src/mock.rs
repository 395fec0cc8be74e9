//! Driver-free [`GraphicsContext`] for tests and tooling.
//!
//! [`RecordingContext`] keeps the whole "driver" in memory:
//!
//! | Driver behaviour | Mock behaviour |
//! |------------------|----------------|
//! | compile | delimiters must balance (comments skipped); errors use Mesa's `0:line(col): error: ...` shape |
//! | link | both stages need `void main`; every fragment `in` must match a vertex `out` by name and type; uniforms shared by both stages must agree on type |
//! | uniform locations | every declared `uniform`, numbered in declaration order (vertex first); nothing is optimized out |
//! | `glUniform*` | writes into the **current** program; no current program, bad location or wrong type is recorded in [`errors`](RecordingContext::errors) and ignored |
//!
//! Every mutating call and every info-log query is appended to
//! [`calls`](RecordingContext::calls).

use std::cell::RefCell;
use std::collections::HashMap;

use crate::context::GraphicsContext;
use crate::stage::StageKind;
use crate::uniform::UniformValue;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MockShader(pub u32);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MockProgram(pub u32);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MockUniformLocation(pub u32);

/// One recorded driver call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(StageKind, MockShader),
    ShaderSource(MockShader),
    CompileShader(MockShader),
    ShaderInfoLog(MockShader),
    DeleteShader(MockShader),
    CreateProgram(MockProgram),
    AttachShader(MockProgram, MockShader),
    DetachShader(MockProgram, MockShader),
    LinkProgram(MockProgram),
    ProgramInfoLog(MockProgram),
    DeleteProgram(MockProgram),
    UseProgram(Option<MockProgram>),
    GetUniformLocation(MockProgram, String),
    SetUniform(MockUniformLocation, UniformValue),
}

/// A call the mock driver rejected, the analogue of `GL_INVALID_OPERATION`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverError {
    pub call: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Decl {
    ty: String,
    name: String,
}

#[derive(Debug, Clone, Default)]
struct Interface {
    inputs: Vec<Decl>,
    outputs: Vec<Decl>,
    uniforms: Vec<Decl>,
    has_main: bool,
}

#[derive(Debug)]
struct ShaderObject {
    kind: StageKind,
    source: Option<String>,
    interface: Option<Interface>,
    info_log: String,
}

#[derive(Debug, Clone)]
struct UniformSlot {
    decl: Decl,
    value: Option<UniformValue>,
}

#[derive(Debug, Default)]
struct ProgramObject {
    attached: Vec<u32>,
    linked: bool,
    info_log: String,
    uniforms: Vec<UniformSlot>,
}

#[derive(Debug, Default)]
struct MockState {
    next_name: u32,
    shaders: HashMap<u32, ShaderObject>,
    programs: HashMap<u32, ProgramObject>,
    current: Option<u32>,
    calls: Vec<Call>,
    errors: Vec<DriverError>,
    refuse_creation: bool,
}

impl MockState {
    fn name(&mut self) -> u32 {
        self.next_name += 1;
        self.next_name
    }

    fn reject(&mut self, call: &'static str, message: impl Into<String>) {
        self.errors.push(DriverError { call, message: message.into() });
    }
}

/// In-memory graphics context that records every call.
#[derive(Debug, Default)]
pub struct RecordingContext {
    state: RefCell<MockState>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded calls, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Calls the driver rejected.
    pub fn errors(&self) -> Vec<DriverError> {
        self.state.borrow().errors.clone()
    }

    /// Stage objects created and not yet deleted.
    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    /// Program objects created and not yet deleted.
    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    /// Makes `create_shader`/`create_program` fail while set.
    pub fn refuse_object_creation(&self, refuse: bool) {
        self.state.borrow_mut().refuse_creation = refuse;
    }

    /// Last value written to uniform `name` of `program`.
    pub fn uniform_value(&self, program: MockProgram, name: &str) -> Option<UniformValue> {
        let state = self.state.borrow();
        state
            .programs
            .get(&program.0)?
            .uniforms
            .iter()
            .find(|slot| slot.decl.name == name)?
            .value
    }
}

impl GraphicsContext for RecordingContext {
    type Shader = MockShader;
    type Program = MockProgram;
    type UniformLocation = MockUniformLocation;

    fn create_shader(&self, kind: StageKind) -> Result<MockShader, String> {
        let mut state = self.state.borrow_mut();
        if state.refuse_creation {
            return Err("out of shader objects".to_owned());
        }
        let name = state.name();
        state.shaders.insert(
            name,
            ShaderObject { kind, source: None, interface: None, info_log: String::new() },
        );
        state.calls.push(Call::CreateShader(kind, MockShader(name)));
        Ok(MockShader(name))
    }

    fn shader_source(&self, shader: MockShader, source: &str) {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::ShaderSource(shader));
        match state.shaders.get_mut(&shader.0) {
            Some(object) => object.source = Some(source.to_owned()),
            None => state.reject("glShaderSource", format!("no shader {}", shader.0)),
        }
    }

    fn compile_shader(&self, shader: MockShader) {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::CompileShader(shader));
        let Some(object) = state.shaders.get_mut(&shader.0) else {
            state.reject("glCompileShader", format!("no shader {}", shader.0));
            return;
        };
        let source = object.source.clone().unwrap_or_default();
        match glsl::check_syntax(&source) {
            Ok(()) => {
                object.interface = Some(glsl::parse_interface(&source));
                object.info_log.clear();
            }
            Err(log) => {
                object.interface = None;
                object.info_log = log;
            }
        }
    }

    fn shader_compile_status(&self, shader: MockShader) -> bool {
        let state = self.state.borrow();
        state
            .shaders
            .get(&shader.0)
            .is_some_and(|object| object.interface.is_some())
    }

    fn shader_info_log(&self, shader: MockShader) -> String {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::ShaderInfoLog(shader));
        state
            .shaders
            .get(&shader.0)
            .map(|object| object.info_log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: MockShader) {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::DeleteShader(shader));
        if state.shaders.remove(&shader.0).is_none() {
            state.reject("glDeleteShader", format!("no shader {}", shader.0));
        }
    }

    fn create_program(&self) -> Result<MockProgram, String> {
        let mut state = self.state.borrow_mut();
        if state.refuse_creation {
            return Err("out of program objects".to_owned());
        }
        let name = state.name();
        state.programs.insert(name, ProgramObject::default());
        state.calls.push(Call::CreateProgram(MockProgram(name)));
        Ok(MockProgram(name))
    }

    fn attach_shader(&self, program: MockProgram, shader: MockShader) {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::AttachShader(program, shader));
        if !state.shaders.contains_key(&shader.0) {
            state.reject("glAttachShader", format!("no shader {}", shader.0));
            return;
        }
        match state.programs.get_mut(&program.0) {
            Some(object) => object.attached.push(shader.0),
            None => state.reject("glAttachShader", format!("no program {}", program.0)),
        }
    }

    fn detach_shader(&self, program: MockProgram, shader: MockShader) {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::DetachShader(program, shader));
        let detached = state.programs.get_mut(&program.0).is_some_and(|object| {
            let before = object.attached.len();
            object.attached.retain(|&s| s != shader.0);
            object.attached.len() != before
        });
        if !detached {
            let message = format!("shader {} not attached to {}", shader.0, program.0);
            state.reject("glDetachShader", message);
        }
    }

    fn link_program(&self, program: MockProgram) {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::LinkProgram(program));
        let Some(attached) = state.programs.get(&program.0).map(|p| p.attached.clone()) else {
            state.reject("glLinkProgram", format!("no program {}", program.0));
            return;
        };

        let stages: Vec<(StageKind, Option<Interface>)> = attached
            .iter()
            .filter_map(|name| state.shaders.get(name))
            .map(|object| (object.kind, object.interface.clone()))
            .collect();
        let outcome = glsl::link(&stages);

        if let Some(object) = state.programs.get_mut(&program.0) {
            match outcome {
                Ok(uniforms) => {
                    object.linked = true;
                    object.info_log.clear();
                    object.uniforms = uniforms
                        .into_iter()
                        .map(|decl| UniformSlot { decl, value: None })
                        .collect();
                }
                Err(log) => {
                    object.linked = false;
                    object.info_log = log;
                    object.uniforms.clear();
                }
            }
        }
    }

    fn program_link_status(&self, program: MockProgram) -> bool {
        let state = self.state.borrow();
        state.programs.get(&program.0).is_some_and(|object| object.linked)
    }

    fn program_info_log(&self, program: MockProgram) -> String {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::ProgramInfoLog(program));
        state
            .programs
            .get(&program.0)
            .map(|object| object.info_log.clone())
            .unwrap_or_default()
    }

    fn delete_program(&self, program: MockProgram) {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::DeleteProgram(program));
        if state.programs.remove(&program.0).is_none() {
            state.reject("glDeleteProgram", format!("no program {}", program.0));
        }
    }

    fn use_program(&self, program: Option<MockProgram>) {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::UseProgram(program));
        match program {
            None => state.current = None,
            Some(p) if state.programs.get(&p.0).is_some_and(|object| object.linked) => {
                state.current = Some(p.0);
            }
            Some(p) => state.reject("glUseProgram", format!("program {} is not linked", p.0)),
        }
    }

    fn current_program(&self) -> Option<MockProgram> {
        self.state.borrow().current.map(MockProgram)
    }

    fn uniform_location(&self, program: MockProgram, name: &str) -> Option<MockUniformLocation> {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::GetUniformLocation(program, name.to_owned()));
        let Some(object) = state.programs.get(&program.0).filter(|object| object.linked) else {
            state.reject("glGetUniformLocation", format!("program {} is not linked", program.0));
            return None;
        };
        object
            .uniforms
            .iter()
            .position(|slot| slot.decl.name == name)
            .map(|index| MockUniformLocation(index as u32))
    }

    fn set_uniform(&self, location: &MockUniformLocation, value: &UniformValue) {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::SetUniform(*location, *value));
        let Some(current) = state.current else {
            state.reject("glUniform", "no current program");
            return;
        };
        let slot = state
            .programs
            .get_mut(&current)
            .and_then(|object| object.uniforms.get_mut(location.0 as usize));
        let problem = match slot {
            None => Some(format!("location {} out of range", location.0)),
            Some(slot) if !value.fits(&slot.decl.ty) => Some(format!(
                "{} value written to `{}` of type {}",
                value.glsl_type(),
                slot.decl.name,
                slot.decl.ty
            )),
            Some(slot) => {
                slot.value = Some(*value);
                None
            }
        };
        if let Some(message) = problem {
            state.reject("glUniform", message);
        }
    }
}

/// Just enough GLSL understanding to act like a driver.
mod glsl {
    use super::{Decl, Interface};
    use crate::stage::StageKind;

    const QUALIFIERS: &[&str] = &[
        "flat", "smooth", "noperspective", "centroid", "invariant", "highp", "mediump", "lowp",
    ];

    /// Replaces comments with spaces, keeping line structure intact.
    fn strip_comments(src: &str) -> Result<String, String> {
        let mut out = String::with_capacity(src.len());
        let mut chars = src.chars().peekable();
        let mut line = 1;
        while let Some(c) = chars.next() {
            let next = chars.peek().copied();
            match (c, next) {
                ('/', Some('/')) => {
                    for c in chars.by_ref() {
                        if c == '\n' {
                            out.push('\n');
                            line += 1;
                            break;
                        }
                    }
                }
                ('/', Some('*')) => {
                    chars.next();
                    let start = line;
                    let mut closed = false;
                    while let Some(c) = chars.next() {
                        if c == '\n' {
                            out.push('\n');
                            line += 1;
                        } else if c == '*' && chars.peek() == Some(&'/') {
                            chars.next();
                            closed = true;
                            break;
                        }
                    }
                    if !closed {
                        return Err(format!("0:{start}(1): error: unterminated comment"));
                    }
                    out.push(' ');
                }
                _ => {
                    if c == '\n' {
                        line += 1;
                    }
                    out.push(c);
                }
            }
        }
        Ok(out)
    }

    /// Checks that `()`, `[]` and `{}` nest properly.
    pub(super) fn check_syntax(src: &str) -> Result<(), String> {
        let code = strip_comments(src)?;
        let mut open: Vec<char> = Vec::new();
        let (mut line, mut col) = (1usize, 0usize);
        for c in code.chars() {
            if c == '\n' {
                line += 1;
                col = 0;
                continue;
            }
            col += 1;
            match c {
                '(' | '[' | '{' => open.push(c),
                ')' | ']' | '}' => {
                    let expected = match c {
                        ')' => '(',
                        ']' => '[',
                        _ => '{',
                    };
                    if open.pop() != Some(expected) {
                        return Err(format!(
                            "0:{line}({col}): error: syntax error, unexpected '{c}'"
                        ));
                    }
                }
                _ => {}
            }
        }
        if open.is_empty() {
            Ok(())
        } else {
            Err(format!(
                "0:{line}({}): error: syntax error, unexpected end of file",
                col + 1
            ))
        }
    }

    fn is_ident_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }

    /// Global `in`/`out`/`uniform` declarations and presence of `void main()`.
    pub(super) fn parse_interface(src: &str) -> Interface {
        let code = strip_comments(src).unwrap_or_default();
        let code: String = code
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .collect::<Vec<_>>()
            .join("\n");

        let mut interface = Interface {
            has_main: has_main(&code),
            ..Interface::default()
        };

        for statement in code.split([';', '{', '}']) {
            let mut statement = statement.trim();
            if statement.starts_with("layout") {
                match statement.find(')') {
                    Some(end) => statement = statement[end + 1..].trim(),
                    None => continue,
                }
            }
            let tokens: Vec<&str> = statement
                .split_whitespace()
                .filter(|t| !QUALIFIERS.contains(t))
                .collect();
            let [storage, ty, rest @ ..] = tokens.as_slice() else {
                continue;
            };
            let target = match *storage {
                "in" => &mut interface.inputs,
                "out" => &mut interface.outputs,
                "uniform" => &mut interface.uniforms,
                _ => continue,
            };
            for declarator in rest.join(" ").split(',') {
                let name: String =
                    declarator.trim().chars().take_while(|&c| is_ident_char(c)).collect();
                if !name.is_empty() {
                    target.push(Decl { ty: (*ty).to_owned(), name });
                }
            }
        }
        interface
    }

    fn has_main(code: &str) -> bool {
        let mut offset = 0;
        while let Some(found) = code[offset..].find("main") {
            let at = offset + found;
            let end = at + "main".len();
            offset = end;

            if code[..at].ends_with(is_ident_char) || code[end..].starts_with(is_ident_char) {
                continue;
            }
            let Some(head) = code[..at].trim_end().strip_suffix("void") else {
                continue;
            };
            if !head.ends_with(is_ident_char) && code[end..].trim_start().starts_with('(') {
                return true;
            }
        }
        false
    }

    /// Links stage interfaces; returns the program's uniforms in location order.
    pub(super) fn link(stages: &[(StageKind, Option<Interface>)]) -> Result<Vec<Decl>, String> {
        let mut errors = Vec::new();
        let mut vertex = None;
        let mut fragment = None;

        for (kind, interface) in stages {
            let Some(interface) = interface else {
                errors.push(format!("error: linking with uncompiled {kind} shader"));
                continue;
            };
            if !interface.has_main {
                errors.push(format!("error: {kind} shader lacks `main'"));
            }
            match kind {
                StageKind::Vertex => vertex = Some(interface),
                StageKind::Fragment => fragment = Some(interface),
            }
        }

        let (Some(vertex), Some(fragment)) = (vertex, fragment) else {
            errors.push("error: program needs a vertex and a fragment shader".to_owned());
            return Err(errors.join("\n"));
        };

        for input in &fragment.inputs {
            match vertex.outputs.iter().find(|out| out.name == input.name) {
                None => errors.push(format!(
                    "error: fragment shader input `{}' has no matching output in the previous stage",
                    input.name
                )),
                Some(out) if out.ty != input.ty => errors.push(format!(
                    "error: `{}' declared as type `{}' in the vertex shader but `{}' in the fragment shader",
                    input.name, out.ty, input.ty
                )),
                Some(_) => {}
            }
        }

        let mut uniforms: Vec<Decl> = Vec::new();
        for decl in vertex.uniforms.iter().chain(&fragment.uniforms) {
            match uniforms.iter().find(|u| u.name == decl.name) {
                None => uniforms.push(decl.clone()),
                Some(seen) if seen.ty != decl.ty => errors.push(format!(
                    "error: uniform `{}' declared as type `{}' and type `{}'",
                    decl.name, seen.ty, decl.ty
                )),
                Some(_) => {}
            }
        }

        if errors.is_empty() {
            Ok(uniforms)
        } else {
            Err(errors.join("\n"))
        }
    }
}
