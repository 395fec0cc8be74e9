//! Shader source loading.
//!
//! Loaders only fetch text. Syntax is the compiler's business.

use std::collections::HashMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ShaderError;
use crate::stage::{ShaderSource, StageKind};

/// Environment variable overriding the root directory of [`FileSourceLoader::from_env`].
pub const SHADER_DIR_ENV: &str = "EMBER_SHADER_DIR";

/// Resolves a location identifier to shader source text.
pub trait SourceLoader {
    /// Reads the raw text stored at `location`.
    fn read(&self, location: &str) -> Result<String, ShaderError>;

    /// Reads `location` and tags it with `kind`.
    fn load(&self, kind: StageKind, location: &str) -> Result<ShaderSource, ShaderError> {
        let text = self.read(location)?;
        log::trace!("loaded {kind} source `{location}` ({} bytes)", text.len());
        Ok(ShaderSource::new(kind, text))
    }
}

impl<L: SourceLoader + ?Sized> SourceLoader for &L {
    fn read(&self, location: &str) -> Result<String, ShaderError> {
        (**self).read(location)
    }
}

/// Loads sources from the filesystem, relative to a root directory.
///
/// Absolute locations bypass the root.
#[derive(Debug, Clone)]
pub struct FileSourceLoader {
    root: PathBuf,
}

impl FileSourceLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Uses `EMBER_SHADER_DIR` as root, or the working directory if unset.
    pub fn from_env() -> Self {
        Self::from_env_or(".")
    }

    /// Uses `EMBER_SHADER_DIR` as root, or `fallback` if unset.
    pub fn from_env_or(fallback: impl Into<PathBuf>) -> Self {
        Self::with_override(std::env::var_os(SHADER_DIR_ENV), fallback)
    }

    fn with_override(root: Option<OsString>, fallback: impl Into<PathBuf>) -> Self {
        match root {
            Some(root) if !root.is_empty() => Self::new(root),
            _ => Self::new(fallback),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a location resolves to.
    pub fn resolve(&self, location: &str) -> PathBuf {
        self.root.join(location)
    }
}

impl Default for FileSourceLoader {
    fn default() -> Self {
        Self::new(".")
    }
}

impl SourceLoader for FileSourceLoader {
    fn read(&self, location: &str) -> Result<String, ShaderError> {
        let path = self.resolve(location);
        std::fs::read_to_string(&path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => ShaderError::ResourceNotFound {
                location: location.to_owned(),
            },
            _ => ShaderError::ReadFailure {
                location: location.to_owned(),
                message: err.to_string(),
            },
        })
    }
}

/// Serves sources from memory, e.g. text embedded with `include_str!`.
#[derive(Debug, Clone, Default)]
pub struct MemorySourceLoader {
    sources: HashMap<String, String>,
}

impl MemorySourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, location: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(location, text);
        self
    }

    /// Stores `text` under `location`, replacing any previous entry.
    pub fn insert(&mut self, location: impl Into<String>, text: impl Into<String>) {
        self.sources.insert(location.into(), text.into());
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl SourceLoader for MemorySourceLoader {
    fn read(&self, location: &str) -> Result<String, ShaderError> {
        self.sources
            .get(location)
            .cloned()
            .ok_or_else(|| ShaderError::ResourceNotFound {
                location: location.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fresh directory under the system temp dir, removed on drop.
    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new() -> Self {
            static NEXT: AtomicUsize = AtomicUsize::new(0);
            let n = NEXT.fetch_add(1, Ordering::Relaxed);
            let dir = std::env::temp_dir()
                .join(format!("ember-shader-source-{}-{n}", std::process::id()));
            std::fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    // ── file loader ───────────────────────────────────────────────────────

    #[test]
    fn file_loader_reads_relative_to_root() {
        let dir = ScratchDir::new();
        std::fs::write(dir.0.join("vertexShader.vs"), "#version 330 core\n").unwrap();

        let loader = FileSourceLoader::new(&dir.0);
        let src = loader.load(StageKind::Vertex, "vertexShader.vs").unwrap();
        assert_eq!(src.kind(), StageKind::Vertex);
        assert_eq!(src.text(), "#version 330 core\n");
    }

    #[test]
    fn file_loader_missing_file_is_not_found() {
        let dir = ScratchDir::new();
        let loader = FileSourceLoader::new(&dir.0);
        let err = loader.read("missing.fs").unwrap_err();
        assert_eq!(err, ShaderError::ResourceNotFound { location: "missing.fs".into() });
    }

    #[test]
    fn file_loader_invalid_utf8_is_read_failure() {
        let dir = ScratchDir::new();
        std::fs::write(dir.0.join("bad.fs"), [0xff, 0xfe, 0x00]).unwrap();

        let loader = FileSourceLoader::new(&dir.0);
        match loader.read("bad.fs").unwrap_err() {
            ShaderError::ReadFailure { location, message } => {
                assert_eq!(location, "bad.fs");
                assert!(!message.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn file_loader_directory_is_read_failure() {
        let dir = ScratchDir::new();
        std::fs::create_dir(dir.0.join("nested")).unwrap();

        let loader = FileSourceLoader::new(&dir.0);
        let err = loader.read("nested").unwrap_err();
        assert!(matches!(err, ShaderError::ReadFailure { .. }), "{err:?}");
    }

    #[test]
    fn env_root_overrides_fallback() {
        let loader = FileSourceLoader::with_override(Some("/srv/shaders".into()), "assets");
        assert_eq!(loader.root(), Path::new("/srv/shaders"));
        assert_eq!(loader.resolve("a.vs"), Path::new("/srv/shaders/a.vs"));
    }

    #[test]
    fn unset_or_empty_env_root_uses_fallback() {
        let unset = FileSourceLoader::with_override(None, "assets");
        assert_eq!(unset.root(), Path::new("assets"));

        let empty = FileSourceLoader::with_override(Some(OsString::new()), "assets");
        assert_eq!(empty.root(), Path::new("assets"));
    }

    // ── memory loader ─────────────────────────────────────────────────────

    #[test]
    fn memory_loader_serves_inserted_text() {
        let loader = MemorySourceLoader::new().with("a.vs", "void main(){}");
        assert_eq!(loader.read("a.vs").unwrap(), "void main(){}");
        assert_eq!(loader.len(), 1);
    }

    #[test]
    fn memory_loader_unknown_location() {
        let loader = MemorySourceLoader::new();
        assert!(loader.is_empty());
        let err = loader.read("nope").unwrap_err();
        assert_eq!(err, ShaderError::ResourceNotFound { location: "nope".into() });
    }

    #[test]
    fn loader_by_reference() {
        fn read_with<L: SourceLoader>(loader: L) -> String {
            loader.read("x").unwrap()
        }

        let loader = MemorySourceLoader::new().with("x", "y");
        assert_eq!(read_with(&loader), "y");
        let dynamic: &dyn SourceLoader = &loader;
        assert_eq!(read_with(dynamic), "y");
    }
}
