/// Options for building a shader program.
///
/// The defaults give an unlabeled program with full driver diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramConfig {
    /// Name used in log records (e.g. `"triangle"`).
    pub label: Option<String>,

    /// Upper bound on diagnostic length, in bytes.
    ///
    /// `None` keeps the complete driver message. `Some(512)` matches the fixed
    /// 512-byte log buffer classic GL tutorials read into.
    pub max_info_log_len: Option<usize>,
}

impl ProgramConfig {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn with_max_info_log_len(mut self, max: usize) -> Self {
        self.max_info_log_len = Some(max);
        self
    }

    /// Label for log records; `"<unnamed>"` when unset.
    pub(crate) fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or("<unnamed>")
    }
}
