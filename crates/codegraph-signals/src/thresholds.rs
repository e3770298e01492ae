//! Named threshold constants for the signal catalog, and the overridable
//! [`Thresholds`] value built from them. Detection logic never reads the
//! constants directly; it takes a `&Thresholds` so a loaded configuration
//! file can replace any of them without touching detection code.

use serde::Deserialize;

pub const BLAST_RADIUS_WARNING: usize = 5;
pub const BLAST_RADIUS_ERROR: usize = 10;

pub const CENTRAL_FILE_WARNING: usize = 5;
pub const CENTRAL_FILE_ERROR: usize = 10;

pub const GOD_FILE_WARNING: usize = 10;
pub const GOD_FILE_ERROR: usize = 15;

pub const DEEP_CHAIN_WARNING: u32 = 5;
pub const DEEP_CHAIN_ERROR: u32 = 8;

pub const DEEP_HIERARCHY_WARNING: u32 = 3;
pub const DEEP_HIERARCHY_ERROR: u32 = 5;

pub const WIDE_PROTOCOL_WARNING: usize = 5;
pub const WIDE_PROTOCOL_ERROR: usize = 10;

pub const HOT_FUNCTION_WARNING: usize = 5;
pub const HOT_FUNCTION_ERROR: usize = 10;

pub const HIGH_INSTABILITY_MIN_DEGREE: usize = 3;
pub const HIGH_INSTABILITY_THRESHOLD: f64 = 0.8;

pub const LOW_ABSTRACTNESS_MIN_IN_DEGREE: usize = 3;

pub const DISTANCE_FROM_MAIN_SEQUENCE_THRESHOLD: f64 = 0.7;

/// Names never reported by `unused-function`: framework hooks and
/// lifecycle methods a human never calls directly.
pub const UNUSED_FUNCTION_IGNORE_NAMES: &[&str] =
    &["main", "visit", "visitPost", "run", "hash", "encode", "decode"];

/// Prefixes never reported by `unused-function`: constructors and test
/// lifecycle methods invoked by the runtime or test harness.
pub const UNUSED_FUNCTION_IGNORE_PREFIXES: &[&str] = &["init", "test", "setUp", "tearDown"];

/// Runtime threshold set passed to every signal detector. Fields missing
/// from a loaded TOML document fall back to the named constants above.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub blast_radius_warning: usize,
    pub blast_radius_error: usize,
    pub central_file_warning: usize,
    pub central_file_error: usize,
    pub god_file_warning: usize,
    pub god_file_error: usize,
    pub deep_chain_warning: u32,
    pub deep_chain_error: u32,
    pub deep_hierarchy_warning: u32,
    pub deep_hierarchy_error: u32,
    pub wide_protocol_warning: usize,
    pub wide_protocol_error: usize,
    pub hot_function_warning: usize,
    pub hot_function_error: usize,
    pub high_instability_min_degree: usize,
    pub high_instability_threshold: f64,
    pub low_abstractness_min_in_degree: usize,
    pub distance_from_main_sequence_threshold: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            blast_radius_warning: BLAST_RADIUS_WARNING,
            blast_radius_error: BLAST_RADIUS_ERROR,
            central_file_warning: CENTRAL_FILE_WARNING,
            central_file_error: CENTRAL_FILE_ERROR,
            god_file_warning: GOD_FILE_WARNING,
            god_file_error: GOD_FILE_ERROR,
            deep_chain_warning: DEEP_CHAIN_WARNING,
            deep_chain_error: DEEP_CHAIN_ERROR,
            deep_hierarchy_warning: DEEP_HIERARCHY_WARNING,
            deep_hierarchy_error: DEEP_HIERARCHY_ERROR,
            wide_protocol_warning: WIDE_PROTOCOL_WARNING,
            wide_protocol_error: WIDE_PROTOCOL_ERROR,
            hot_function_warning: HOT_FUNCTION_WARNING,
            hot_function_error: HOT_FUNCTION_ERROR,
            high_instability_min_degree: HIGH_INSTABILITY_MIN_DEGREE,
            high_instability_threshold: HIGH_INSTABILITY_THRESHOLD,
            low_abstractness_min_in_degree: LOW_ABSTRACTNESS_MIN_IN_DEGREE,
            distance_from_main_sequence_threshold: DISTANCE_FROM_MAIN_SEQUENCE_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_falls_back_to_defaults_for_missing_fields() {
        let loaded: Thresholds = toml::from_str("god_file_warning = 20\n").unwrap();
        assert_eq!(loaded.god_file_warning, 20);
        assert_eq!(loaded.god_file_error, GOD_FILE_ERROR);
        assert_eq!(loaded.blast_radius_warning, BLAST_RADIUS_WARNING);
    }
}
