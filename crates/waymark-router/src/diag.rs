//! Diagnostic output switch.

/// Whether the router emits diagnostics through [`tracing`].
///
/// Injected at construction instead of read from the process environment.
/// Diagnostics never affect control flow; disabled is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Diagnostics {
    /// Emit warnings and per-request debug output.
    Enabled,
    /// Stay silent.
    #[default]
    Disabled,
}

impl Diagnostics {
    /// Whether diagnostics are enabled.
    pub fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}
