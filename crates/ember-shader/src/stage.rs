use std::fmt;
use std::path::Path;

/// Pipeline stage a piece of shader source belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl StageKind {
    /// All stages a program is linked from, in compile order.
    pub const ALL: [StageKind; 2] = [StageKind::Vertex, StageKind::Fragment];

    /// The OpenGL shader-type enum (`GL_VERTEX_SHADER`, `GL_FRAGMENT_SHADER`).
    pub const fn gl_enum(self) -> u32 {
        match self {
            Self::Vertex => 0x8B31,
            Self::Fragment => 0x8B30,
        }
    }

    /// Lower-case name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        }
    }

    /// Conventional file extension for sources of this stage.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Vertex => "vs",
            Self::Fragment => "fs",
        }
    }

    /// Guesses the stage from a file extension (`.vs`/`.vert`, `.fs`/`.frag`).
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "vs" | "vert" => Some(Self::Vertex),
            "fs" | "frag" => Some(Self::Fragment),
            _ => None,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shader source text tagged with its stage.
///
/// Transient: built by a loader, read once by the stage compiler, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    kind: StageKind,
    text: String,
}

impl ShaderSource {
    pub fn new(kind: StageKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }

    pub fn vertex(text: impl Into<String>) -> Self {
        Self::new(StageKind::Vertex, text)
    }

    pub fn fragment(text: impl Into<String>) -> Self {
        Self::new(StageKind::Fragment, text)
    }

    pub fn kind(&self) -> StageKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gl_enums_match_opengl_constants() {
        assert_eq!(StageKind::Vertex.gl_enum(), 0x8B31);
        assert_eq!(StageKind::Fragment.gl_enum(), 0x8B30);
    }

    #[test]
    fn display_uses_lowercase_name() {
        assert_eq!(StageKind::Vertex.to_string(), "vertex");
        assert_eq!(StageKind::Fragment.to_string(), "fragment");
    }

    #[test]
    fn stage_from_extension() {
        assert_eq!(StageKind::from_path("vertexShader.vs"), Some(StageKind::Vertex));
        assert_eq!(StageKind::from_path("shaders/a.FRAG"), Some(StageKind::Fragment));
        assert_eq!(StageKind::from_path("a.glsl"), None);
        assert_eq!(StageKind::from_path("noext"), None);
    }

    #[test]
    fn extension_round_trips_through_from_path() {
        for kind in StageKind::ALL {
            let file = format!("shader.{}", kind.extension());
            assert_eq!(StageKind::from_path(file), Some(kind));
        }
    }
}
