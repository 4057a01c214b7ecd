//! Configurable limits for bounded unwrapping.

/// Limits enforced while unwrapping an envelope.
///
/// Compressed payloads are small on the wire but can expand by orders of
/// magnitude; the inflate step stops as soon as this bound is crossed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Limits {
    /// Maximum size of an inflated payload in bytes.
    pub max_inflated_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // A full page of detailed battle reports inflates to a few hundred KB
            max_inflated_bytes: 16 * 1024 * 1024,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_inflated_bytes: 64 * 1024,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_inflated_bytes: usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn testing_limits_smaller() {
        assert!(Limits::for_testing().max_inflated_bytes < Limits::default().max_inflated_bytes);
    }

    #[test]
    fn unlimited_limits() {
        assert_eq!(Limits::unlimited().max_inflated_bytes, usize::MAX);
    }

    #[test]
    fn limits_const_constructible() {
        const LIMITS: Limits = Limits::for_testing();
        assert_eq!(LIMITS.max_inflated_bytes, 64 * 1024);
    }
}
