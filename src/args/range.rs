//! Float options restricted to a range.

use std::ffi::OsStr;
use std::fmt;

use clap::builder::TypedValueParser;
use clap::error::ErrorKind;
use clap::{Arg, Command};
use thiserror::Error;

/// Why a value was rejected by a [`FloatRange`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    #[error("{0} is not a valid floating point value")]
    NotAFloat(String),

    #[error("{value} is bigger than the maximum valid value {max}.")]
    TooBig { value: f64, max: f64 },

    #[error("{value} is smaller than the minimum valid value {min}.")]
    TooSmall { value: f64, min: f64 },

    #[error("{value} is not in the valid range of {min} to {max}.")]
    OutOfRange { value: f64, min: f64, max: f64 },
}

/// A float value parser with optional bounds.
///
/// Out-of-range values are rejected, or pulled to the nearest bound when
/// clamping is enabled.
///
/// ```
/// use clap::Parser;
/// use clickclick::args::FloatRange;
///
/// #[derive(Parser)]
/// struct Args {
///     #[arg(long, value_parser = FloatRange::new(Some(0.0), Some(1.0)))]
///     ratio: f64,
/// }
///
/// let args = Args::parse_from(["app", "--ratio", "0.25"]);
/// assert_eq!(args.ratio, 0.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FloatRange {
    min: Option<f64>,
    max: Option<f64>,
    clamp: bool,
}

impl FloatRange {
    #[must_use]
    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min,
            max,
            clamp: false,
        }
    }

    /// Clamp out-of-range values to the bounds instead of failing.
    #[must_use]
    pub const fn clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    #[must_use]
    pub const fn min(&self) -> Option<f64> {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> Option<f64> {
        self.max
    }

    /// Apply the range to `value`.
    pub fn check(&self, value: f64) -> Result<f64, RangeError> {
        if self.clamp {
            if let Some(min) = self.min
                && value < min
            {
                return Ok(min);
            }
            if let Some(max) = self.max
                && value > max
            {
                return Ok(max);
            }
        }
        match (self.min, self.max) {
            (Some(min), Some(max)) if value < min || value > max => {
                Err(RangeError::OutOfRange { value, min, max })
            }
            (None, Some(max)) if value > max => Err(RangeError::TooBig { value, max }),
            (Some(min), None) if value < min => Err(RangeError::TooSmall { value, min }),
            _ => Ok(value),
        }
    }

    /// Parse `raw` as a float and apply the range.
    pub fn convert(&self, raw: &str) -> Result<f64, RangeError> {
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| RangeError::NotAFloat(raw.to_string()))?;
        self.check(value)
    }
}

impl fmt::Display for FloatRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = |b: Option<f64>| b.map_or_else(|| "None".to_string(), |v| v.to_string());
        write!(f, "FloatRange({}, {})", bound(self.min), bound(self.max))
    }
}

impl TypedValueParser for FloatRange {
    type Value = f64;

    fn parse_ref(
        &self,
        cmd: &Command,
        arg: Option<&Arg>,
        value: &OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let raw = value.to_string_lossy();
        self.convert(&raw).map_err(|e| {
            let arg = arg.map_or_else(|| "...".to_string(), ToString::to_string);
            cmd.clone().error(
                ErrorKind::ValueValidation,
                format!("invalid value '{raw}' for '{arg}': {e}"),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn accepts_values_in_range() {
        let range = FloatRange::new(Some(0.0), Some(1.0));
        assert_eq!(range.check(0.0), Ok(0.0));
        assert_eq!(range.check(0.5), Ok(0.5));
        assert_eq!(range.check(1.0), Ok(1.0));
    }

    #[test]
    fn rejects_values_outside_both_bounds() {
        let range = FloatRange::new(Some(0.0), Some(1.0));
        let err = range.check(1.5).unwrap_err();
        assert_eq!(err.to_string(), "1.5 is not in the valid range of 0 to 1.");
    }

    #[test]
    fn open_ended_messages() {
        let at_most = FloatRange::new(None, Some(10.0));
        assert_eq!(
            at_most.check(11.0).unwrap_err().to_string(),
            "11 is bigger than the maximum valid value 10."
        );
        assert_eq!(at_most.check(-1e9), Ok(-1e9));

        let at_least = FloatRange::new(Some(0.5), None);
        assert_eq!(
            at_least.check(0.25).unwrap_err().to_string(),
            "0.25 is smaller than the minimum valid value 0.5."
        );
    }

    #[test]
    fn clamping_pulls_to_bounds() {
        let range = FloatRange::new(Some(0.0), Some(60.0)).clamp(true);
        assert_eq!(range.check(-3.0), Ok(0.0));
        assert_eq!(range.check(90.0), Ok(60.0));
        assert_eq!(range.check(12.5), Ok(12.5));
    }

    #[test]
    fn unbounded_accepts_anything() {
        assert_eq!(FloatRange::default().check(f64::MAX), Ok(f64::MAX));
    }

    #[test]
    fn convert_parses_text() {
        let range = FloatRange::new(Some(0.0), None);
        assert_eq!(range.convert(" 2.5 "), Ok(2.5));
        assert_eq!(
            range.convert("abc"),
            Err(RangeError::NotAFloat("abc".to_string()))
        );
    }

    #[test]
    fn displays_bounds() {
        assert_eq!(
            FloatRange::new(Some(0.0), Some(1.5)).to_string(),
            "FloatRange(0, 1.5)"
        );
        assert_eq!(
            FloatRange::new(None, Some(1.0)).to_string(),
            "FloatRange(None, 1)"
        );
    }

    #[derive(Parser, Debug)]
    struct Args {
        #[arg(long, value_parser = FloatRange::new(Some(0.0), Some(1.0)))]
        ratio: f64,
        #[arg(long, default_value = "5", value_parser = FloatRange::new(Some(0.0), Some(10.0)).clamp(true))]
        wait: f64,
    }

    #[test]
    fn works_as_clap_value_parser() {
        let args = Args::try_parse_from(["app", "--ratio", "0.5", "--wait", "99"]).unwrap();
        assert_eq!(args.ratio, 0.5);
        assert_eq!(args.wait, 10.0);

        let args = Args::try_parse_from(["app", "--ratio", "1"]).unwrap();
        assert_eq!(args.wait, 5.0);
    }

    #[test]
    fn clap_reports_range_errors() {
        let err = Args::try_parse_from(["app", "--ratio", "2"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("not in the valid range of 0 to 1."));

        let err = Args::try_parse_from(["app", "--ratio", "lots"]).unwrap_err();
        assert!(err.to_string().contains("not a valid floating point value"));
    }
}
