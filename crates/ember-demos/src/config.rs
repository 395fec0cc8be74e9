use std::path::PathBuf;

/// Set to `1`/`true`/`on` to draw in wireframe.
pub const WIREFRAME_ENV: &str = "EMBER_WIREFRAME";

/// Demo window and rendering options.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub title: String,
    /// Logical window size.
    pub width: f64,
    pub height: f64,
    /// RGBA clear colour.
    pub clear_color: [f32; 4],
    /// Draw polygon outlines only.
    pub wireframe: bool,
    /// Directory holding `vertexShader.vs` and `fragmentShader.fs` when
    /// `EMBER_SHADER_DIR` is unset.
    pub shader_dir: PathBuf,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "LearnOpenGL".to_string(),
            width: 800.0,
            height: 600.0,
            clear_color: [0.0, 0.0, 0.0, 0.0],
            wireframe: false,
            shader_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/shaders")),
        }
    }
}

impl DemoConfig {
    /// Defaults, overridden by `EMBER_WIREFRAME`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(value) = std::env::var(WIREFRAME_ENV) {
            config.wireframe = parse_flag(&value);
        }
        config
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "on" | "yes")
}
