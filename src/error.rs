//! Error types for configuration and zone-table validation.
//!
//! Nothing in the per-frame pipeline is fallible: altitude resolution is total
//! and input is clamped before it is stored.  These errors only surface while
//! loading `assets/ascent.toml` or checking the zone table at startup, where
//! they are logged and the compiled defaults are kept.

use std::fmt;

/// Top-level error enum for the ascent.
#[derive(Debug, Clone, PartialEq)]
pub enum AscentError {
    /// A tunable is outside the range the pipeline can work with.
    UnsafeConstant {
        /// Name of the config key (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },

    /// A `[min, max]` pair is empty or inverted.
    InvalidRange {
        name: &'static str,
        min: f32,
        max: f32,
    },

    /// Two adjacent zones do not share a boundary.
    ZoneGap {
        /// Name of the zone whose upper bound does not meet the next zone.
        after: &'static str,
        max_altitude: f32,
        next_min_altitude: f32,
    },

    /// A colour token is not a valid hex colour.
    InvalidColor {
        /// The offending token.
        token: String,
    },

    /// A config document is not valid TOML or has a mistyped key.
    Parse { message: String },
}

impl fmt::Display for AscentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AscentError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
            AscentError::InvalidRange { name, min, max } => {
                write!(f, "range '{}' is empty: min {} >= max {}", name, min, max)
            }
            AscentError::ZoneGap {
                after,
                max_altitude,
                next_min_altitude,
            } => write!(
                f,
                "zone '{}' ends at {} but the next zone starts at {}",
                after, max_altitude, next_min_altitude
            ),
            AscentError::InvalidColor { token } => {
                write!(f, "'{}' is not a valid hex colour", token)
            }
            AscentError::Parse { message } => write!(f, "parse error: {}", message),
        }
    }
}

impl std::error::Error for AscentError {}

/// Convenience alias: a `Result` using `AscentError` as the error type.
pub type AscentResult<T> = Result<T, AscentError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is finite and strictly positive.
pub fn validate_positive(name: &'static str, value: f32) -> AscentResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AscentError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `min < max`.
pub fn validate_range(name: &'static str, min: f32, max: f32) -> AscentResult<()> {
    if min < max {
        Ok(())
    } else {
        Err(AscentError::InvalidRange { name, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_accepts_small_values() {
        assert!(validate_positive("rate", 0.001).is_ok());
    }

    #[test]
    fn positive_rejects_zero_and_nan() {
        assert!(validate_positive("rate", 0.0).is_err());
        assert!(validate_positive("rate", f32::NAN).is_err());
        assert!(validate_positive("rate", -1.0).is_err());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = validate_range("altitude", 6000.0, 800.0).unwrap_err();
        assert_eq!(
            err,
            AscentError::InvalidRange {
                name: "altitude",
                min: 6000.0,
                max: 800.0
            }
        );
        assert!(err.to_string().contains("altitude"));
    }
}
