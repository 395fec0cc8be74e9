//! Typed uniform values.
//!
//! Matrices are column-major, the layout GLSL expects with `transpose = false`.

/// A value that can be written to a uniform variable.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    /// Written as an integer (`glUniform1i`), which GLSL accepts for `bool`.
    Bool(bool),
    Int(i32),
    UInt(u32),
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    IVec2([i32; 2]),
    IVec3([i32; 3]),
    IVec4([i32; 4]),
    Mat2([[f32; 2]; 2]),
    Mat3([[f32; 3]; 3]),
    Mat4([[f32; 4]; 4]),
}

impl UniformValue {
    /// GLSL type name of the value.
    pub const fn glsl_type(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::Vec2(_) => "vec2",
            Self::Vec3(_) => "vec3",
            Self::Vec4(_) => "vec4",
            Self::IVec2(_) => "ivec2",
            Self::IVec3(_) => "ivec3",
            Self::IVec4(_) => "ivec4",
            Self::Mat2(_) => "mat2",
            Self::Mat3(_) => "mat3",
            Self::Mat4(_) => "mat4",
        }
    }

    /// Whether a uniform declared as `glsl_type` accepts this value.
    ///
    /// Follows the `glUniform*` typing rules: booleans take either the
    /// integer or the float setter, samplers take `glUniform1i`.
    pub fn fits(&self, glsl_type: &str) -> bool {
        match self {
            Self::Bool(_) | Self::Int(_) => {
                matches!(glsl_type, "int" | "bool") || glsl_type.contains("sampler")
            }
            Self::UInt(_) => matches!(glsl_type, "uint" | "bool"),
            Self::Float(_) => matches!(glsl_type, "float" | "bool"),
            other => other.glsl_type() == glsl_type,
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for UniformValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i32 => Int,
    u32 => UInt,
    f32 => Float,
    [f32; 2] => Vec2,
    [f32; 3] => Vec3,
    [f32; 4] => Vec4,
    [i32; 2] => IVec2,
    [i32; 3] => IVec3,
    [i32; 4] => IVec4,
    [[f32; 2]; 2] => Mat2,
    [[f32; 3]; 3] => Mat3,
    [[f32; 4]; 4] => Mat4,
}
