use serde::{Deserialize, Serialize};
use std::fmt;

/// The single fixed time sample at which all scene queries in one export
/// run are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Moment {
    seconds: f64,
}

impl Moment {
    /// Create a moment from seconds on the host timeline.
    pub fn from_seconds(s: f64) -> Self {
        Self { seconds: s }
    }

    /// The start of the timeline.
    pub fn zero() -> Self {
        Self { seconds: 0.0 }
    }

    pub fn as_seconds(&self) -> f64 {
        self.seconds
    }
}

impl Default for Moment {
    fn default() -> Self {
        Moment::zero()
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moment_display() {
        assert_eq!(Moment::from_seconds(1.25).to_string(), "1.25s");
        assert_eq!(Moment::zero().to_string(), "0s");
    }
}
