//! Read-only decode configuration.

use serde::{Deserialize, Serialize};

/// Feature flags and filters consulted while decoding.
///
/// Passed by reference into every decode call; nothing in this crate reads
/// process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Log every unwrapped payload as text.
    pub debug: bool,
    /// Decode combat messages as detailed battle reports instead of summaries.
    pub detailed_capture: bool,
    /// Decode summary reports at all. Ignored while `detailed_capture` is set.
    pub report_capture: bool,
    /// Canonical `wid` whose summary reports are persisted.
    pub position_of_interest: String,
    pub limits: envelope::Limits,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            debug: false,
            detailed_capture: false,
            report_capture: true,
            position_of_interest: String::new(),
            limits: envelope::Limits::default(),
        }
    }
}

impl DecodeConfig {
    /// Creates a configuration with small limits for tests.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            limits: envelope::Limits::for_testing(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_detailed_capture(mut self, enabled: bool) -> Self {
        self.detailed_capture = enabled;
        self
    }

    #[must_use]
    pub fn with_report_capture(mut self, enabled: bool) -> Self {
        self.report_capture = enabled;
        self
    }

    #[must_use]
    pub fn with_position(mut self, wid: impl Into<String>) -> Self {
        self.position_of_interest = wid.into();
        self
    }

    #[must_use]
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }
}
