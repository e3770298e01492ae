//! Discovers an optional `codegraph.toml` at the root of the scanned tree
//! and loads it into a [`Thresholds`] value. Absence is not an error: the
//! engine runs with the named defaults.

use crate::thresholds::Thresholds;
use codegraph_core::{CodeGraphError, Result};
use std::path::Path;

pub fn load_from_dir(root: &Path) -> Result<Thresholds> {
    let candidate = root.join("codegraph.toml");
    if !candidate.is_file() {
        return Ok(Thresholds::default());
    }
    let text = std::fs::read_to_string(&candidate)?;
    toml::from_str(&text).map_err(|err| CodeGraphError::Configuration(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let thresholds = load_from_dir(dir.path()).unwrap();
        assert_eq!(thresholds.god_file_warning, crate::thresholds::GOD_FILE_WARNING);
    }

    #[test]
    fn present_file_overrides_named_fields() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("codegraph.toml"), "hot_function_warning = 2\n").unwrap();
        let thresholds = load_from_dir(dir.path()).unwrap();
        assert_eq!(thresholds.hot_function_warning, 2);
        assert_eq!(thresholds.hot_function_error, crate::thresholds::HOT_FUNCTION_ERROR);
    }

    #[test]
    fn malformed_file_is_a_configuration_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("codegraph.toml"), "not valid toml :::").unwrap();
        let err = load_from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, CodeGraphError::Configuration(_)));
    }
}
