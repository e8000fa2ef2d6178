use gitviz_core::{snapshot_key, CommitRecord, RawCommit};
use tracing::debug;

use crate::classify::{classify, Classification, ClassifyOptions};
use crate::geometry::{PathOptions, RowGeometry};
use crate::paths::{build_paths, RenderPlan};

/// Memoizing front door for the layout core.
///
/// Classification is rebuilt from scratch exactly when the content key
/// of the ordered snapshot changes; rendering is a pure call on the
/// cached result and can be repeated with fresh geometry at no
/// classification cost. Single-threaded by design: each update fully
/// replaces the previous state, last computed wins.
#[derive(Debug, Default)]
pub struct LayoutEngine {
    options: ClassifyOptions,
    key: Option<u64>,
    commits: Vec<CommitRecord>,
    classification: Classification,
}

impl LayoutEngine {
    pub fn new(options: ClassifyOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Absorb a snapshot; returns true when it differed from the cached
    /// one and the classification was rebuilt.
    pub fn update(&mut self, records: &[RawCommit]) -> bool {
        let key = snapshot_key(records);
        if self.key == Some(key) {
            return false;
        }
        debug!(key, count = records.len(), "commit snapshot changed; reclassifying");
        self.commits = records.iter().map(CommitRecord::from_raw).collect();
        self.classification = classify(&self.commits, &self.options);
        self.key = Some(key);
        true
    }

    pub fn commits(&self) -> &[CommitRecord] {
        &self.commits
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn render(&self, geometry: &RowGeometry, options: &PathOptions) -> RenderPlan {
        build_paths(&self.commits, &self.classification, geometry, options)
    }
}
