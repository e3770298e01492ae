use codegraph_core::{CodeGraphError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const SWIFT_EXTENSION: &str = "swift";

const DEFAULT_EXCLUDES: &[&str] = &[
    "**/.build/**",
    "**/.git/**",
    "**/DerivedData/**",
    "**/Pods/**",
    "**/*.xcodeproj/**",
    "**/*.xcworkspace/**",
];

/// Walks `root` for `.swift` files, honoring `.gitignore`, and returns them
/// sorted by path so the parse stage can preserve deterministic ordering
/// even when run across a worker pool.
pub fn collect_source_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(CodeGraphError::PathNotFound(root.display().to_string()));
    }

    let exclude_set = build_globset(DEFAULT_EXCLUDES);

    let mut walker = WalkBuilder::new(root);
    walker.hidden(false).git_ignore(true).git_exclude(true).ignore(true);

    let mut paths = Vec::new();
    for entry in walker.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                return Err(CodeGraphError::CannotEnumerate(err.to_string()));
            }
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(SWIFT_EXTENSION) {
            continue;
        }
        if let Some(set) = &exclude_set {
            if set.is_match(path) {
                continue;
            }
        }

        paths.push(path.to_path_buf());
    }

    paths.sort();
    debug!(count = paths.len(), "collected swift source files");
    Ok(paths)
}

fn build_globset(patterns: &[&str]) -> Option<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    let mut added = false;
    for pattern in patterns {
        match Glob::new(pattern) {
            Ok(glob) => {
                builder.add(glob);
                added = true;
            }
            Err(err) => warn!("invalid glob pattern '{pattern}': {err}"),
        }
    }
    if added {
        builder.build().ok()
    } else {
        None
    }
}
