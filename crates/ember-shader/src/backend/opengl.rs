//! OpenGL backend over `glow`.
//!
//! Every method forwards to the matching `gl*` entry point. The context must
//! be current on the calling thread, which `glow::Context` construction
//! already requires of the caller; that is the invariant the `unsafe` blocks
//! below rely on.

use std::num::NonZeroU32;

use glow::HasContext;

use crate::context::GraphicsContext;
use crate::stage::StageKind;
use crate::uniform::UniformValue;

fn shader_type(kind: StageKind) -> u32 {
    match kind {
        StageKind::Vertex => glow::VERTEX_SHADER,
        StageKind::Fragment => glow::FRAGMENT_SHADER,
    }
}

impl GraphicsContext for glow::Context {
    type Shader = glow::NativeShader;
    type Program = glow::NativeProgram;
    type UniformLocation = glow::NativeUniformLocation;

    fn create_shader(&self, kind: StageKind) -> Result<Self::Shader, String> {
        unsafe { HasContext::create_shader(self, shader_type(kind)) }
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { HasContext::shader_source(self, shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::compile_shader(self, shader) }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::delete_shader(self, shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { HasContext::create_program(self) }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::attach_shader(self, program, shader) }
    }

    fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::detach_shader(self, program, shader) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { HasContext::link_program(self, program) }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.get_program_info_log(program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { HasContext::delete_program(self, program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { HasContext::use_program(self, program) }
    }

    fn current_program(&self) -> Option<Self::Program> {
        let name = unsafe { self.get_parameter_i32(glow::CURRENT_PROGRAM) };
        NonZeroU32::new(name as u32).map(glow::NativeProgram)
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { self.get_uniform_location(program, name) }
    }

    fn set_uniform(&self, location: &Self::UniformLocation, value: &UniformValue) {
        let loc = Some(location);
        unsafe {
            match *value {
                UniformValue::Bool(v) => self.uniform_1_i32(loc, v as i32),
                UniformValue::Int(v) => self.uniform_1_i32(loc, v),
                UniformValue::UInt(v) => self.uniform_1_u32(loc, v),
                UniformValue::Float(v) => self.uniform_1_f32(loc, v),
                UniformValue::Vec2([x, y]) => self.uniform_2_f32(loc, x, y),
                UniformValue::Vec3([x, y, z]) => self.uniform_3_f32(loc, x, y, z),
                UniformValue::Vec4([x, y, z, w]) => self.uniform_4_f32(loc, x, y, z, w),
                UniformValue::IVec2([x, y]) => self.uniform_2_i32(loc, x, y),
                UniformValue::IVec3([x, y, z]) => self.uniform_3_i32(loc, x, y, z),
                UniformValue::IVec4([x, y, z, w]) => self.uniform_4_i32(loc, x, y, z, w),
                UniformValue::Mat2(m) => {
                    self.uniform_matrix_2_f32_slice(loc, false, m.as_flattened())
                }
                UniformValue::Mat3(m) => {
                    self.uniform_matrix_3_f32_slice(loc, false, m.as_flattened())
                }
                UniformValue::Mat4(m) => {
                    self.uniform_matrix_4_f32_slice(loc, false, m.as_flattened())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_enums_agree_with_glow() {
        assert_eq!(shader_type(StageKind::Vertex), StageKind::Vertex.gl_enum());
        assert_eq!(shader_type(StageKind::Fragment), StageKind::Fragment.gl_enum());
    }
}
