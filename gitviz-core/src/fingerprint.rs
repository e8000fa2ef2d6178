use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::record::RawCommit;

/// Content key of an ordered commit snapshot.
///
/// Covers ids, parent ids and the raw ref text, in list order. The
/// layout engine recomputes its classification exactly when this key
/// changes; display metadata does not participate.
pub fn snapshot_key(records: &[RawCommit]) -> u64 {
    let mut hasher = DefaultHasher::new();
    records.len().hash(&mut hasher);
    for record in records {
        record.commit.hash(&mut hasher);
        record.parent.hash(&mut hasher);
        record.refs.hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<RawCommit> {
        vec![
            RawCommit::new("c2", "c1", "HEAD -> main"),
            RawCommit::new("c1", "", ""),
        ]
    }

    #[test]
    fn identical_snapshots_share_a_key() {
        assert_eq!(snapshot_key(&sample()), snapshot_key(&sample()));
    }

    #[test]
    fn ref_text_changes_the_key() {
        let mut changed = sample();
        changed[0].refs = "HEAD -> trunk".to_string();
        assert_ne!(snapshot_key(&sample()), snapshot_key(&changed));
    }

    #[test]
    fn order_changes_the_key() {
        let mut reversed = sample();
        reversed.reverse();
        assert_ne!(snapshot_key(&sample()), snapshot_key(&reversed));
    }

    #[test]
    fn display_metadata_does_not_change_the_key() {
        let mut annotated = sample();
        annotated[0].subject = Some("fix parser".to_string());
        assert_eq!(snapshot_key(&sample()), snapshot_key(&annotated));
    }
}
