//! Command-line argument helpers
//!
//! All CLI values arrive as strings; these helpers turn them into typed
//! values and report failures as `InvalidParameter`.

use std::str::FromStr;

use clap::ArgMatches;

use crate::errors::{MockupError, MockupResult};
use crate::template::PlacementOverrides;

/// Get a string argument that must be present
pub fn required_string(args: &ArgMatches, name: &str, purpose: &str) -> MockupResult<String> {
    args.get_one::<String>(name)
        .cloned()
        .ok_or_else(|| MockupError::GenericError(format!("Missing {}", purpose)))
}

/// Parse an optional argument, failing when it is present but malformed
pub fn parse_optional<T: FromStr>(args: &ArgMatches, name: &str) -> MockupResult<Option<T>> {
    match args.get_one::<String>(name) {
        Some(raw) => raw.trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| MockupError::invalid_parameter(name, raw.as_str())),
        None => Ok(None),
    }
}

/// Collect --x, --y, --width, --height and --rotation
pub fn placement_overrides(args: &ArgMatches) -> MockupResult<PlacementOverrides> {
    Ok(PlacementOverrides {
        x: parse_optional(args, "x")?,
        y: parse_optional(args, "y")?,
        width: parse_optional(args, "width")?,
        height: parse_optional(args, "height")?,
        rotation: parse_optional(args, "rotation")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{Arg, Command};

    fn parse(argv: &[&str]) -> ArgMatches {
        let mut cmd = Command::new("test");
        for name in ["x", "y", "width", "height", "rotation"] {
            cmd = cmd.arg(Arg::new(name).long(name).allow_hyphen_values(true));
        }
        cmd.get_matches_from(argv)
    }

    #[test]
    fn test_placement_overrides() {
        let args = parse(&["test", "--x", "-15", "--width", "300", "--rotation", "12.5"]);
        let overrides = placement_overrides(&args).unwrap();
        assert_eq!(overrides.x, Some(-15));
        assert_eq!(overrides.y, None);
        assert_eq!(overrides.width, Some(300));
        assert_eq!(overrides.rotation, Some(12.5));
    }

    #[test]
    fn test_invalid_value() {
        let args = parse(&["test", "--width", "-3"]);
        match placement_overrides(&args) {
            Err(MockupError::InvalidParameter { name, value }) => {
                assert_eq!(name, "width");
                assert_eq!(value, "-3");
            }
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }
}
