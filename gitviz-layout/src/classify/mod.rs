mod descendants;
mod lanes;

use std::collections::{HashMap, HashSet, VecDeque};

use gitviz_core::CommitRecord;
use tracing::debug;

use crate::index::CommitIndex;
use crate::palette::BranchColor;

/// Main branch candidates, in detection priority order.
const MAIN_BRANCH_CANDIDATES: [&str; 2] = ["main", "master"];

/// Behavior when no main/master ref exists anywhere in the snapshot.
///
/// The two variants reproduce two historical behaviors of this layout;
/// neither is silently assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoMainPolicy {
    /// Strict: no commit is forced onto the main line. Commits that
    /// resolve to no lane at all still fall back to lane 0.
    #[default]
    NoForcedMain,
    /// Legacy: every commit is classified main-line (lane 0).
    AllMainLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassifyOptions {
    pub no_main_policy: NoMainPolicy,
}

/// Per-commit lane classification.
///
/// Invariant: `lane == 0` exactly when `is_main` is set; merge-corrected
/// commits always end at lane 0 / main.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneAssignment {
    pub lane: usize,
    pub is_main: bool,
    pub branch: Option<String>,
}

impl LaneAssignment {
    pub(crate) fn main() -> Self {
        Self {
            lane: 0,
            is_main: true,
            branch: None,
        }
    }

    pub(crate) fn branch(lane: usize, name: &str) -> Self {
        Self {
            lane,
            is_main: false,
            branch: Some(name.to_string()),
        }
    }
}

/// Output of one classification pass. Rebuilt from scratch on every
/// distinct snapshot; never mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub lanes: HashMap<String, LaneAssignment>,
    pub branch_colors: Vec<BranchColor>,
    pub main_line: HashSet<String>,
    pub main_branch: Option<String>,
}

impl Classification {
    pub fn lane_of(&self, id: &str) -> Option<&LaneAssignment> {
        self.lanes.get(id)
    }

    pub fn is_main_line(&self, id: &str) -> bool {
        self.main_line.contains(id)
    }

    pub fn branch_color(&self, name: &str) -> Option<&BranchColor> {
        self.branch_colors.iter().find(|entry| entry.name == name)
    }
}

/// Classify an ordered commit snapshot (newest first).
///
/// Pure and total: any finite input, including cycles and dangling
/// parent ids, yields a full assignment without panicking.
pub fn classify(commits: &[CommitRecord], options: &ClassifyOptions) -> Classification {
    let index = CommitIndex::new(commits);
    let main_branch = detect_main_branch(commits);
    debug!(?main_branch, commits = commits.len(), "classifying commit snapshot");

    if main_branch.is_none() && options.no_main_policy == NoMainPolicy::AllMainLine {
        return all_main_line(commits);
    }

    let main_tip = main_branch.and_then(|name| {
        commits
            .iter()
            .find(|commit| commit.carries_branch(name))
            .map(|commit| commit.id.as_str())
    });

    let branch_descendants = descendants::mark(&index, main_branch, main_tip);
    let main_line = mark_main_line(&index, main_tip, main_branch, &branch_descendants);
    lanes::assign(&index, main_branch, &branch_descendants, main_line)
}

/// First commit whose parsed refs contain "main" fixes the main branch;
/// "master" is the fallback; otherwise no main branch exists. Never an
/// arbitrary first branch.
fn detect_main_branch(commits: &[CommitRecord]) -> Option<&'static str> {
    MAIN_BRANCH_CANDIDATES
        .into_iter()
        .find(|candidate| commits.iter().any(|commit| commit.carries_branch(candidate)))
}

/// BFS backward from the main tip, never crossing branch descendants or
/// commits reffed with a different non-main branch.
fn mark_main_line<'a>(
    index: &CommitIndex<'a>,
    main_tip: Option<&'a str>,
    main_branch: Option<&str>,
    branch_descendants: &HashSet<&'a str>,
) -> HashSet<&'a str> {
    let mut main_line: HashSet<&'a str> = HashSet::new();
    let Some(tip) = main_tip else {
        return main_line;
    };

    main_line.insert(tip);
    let mut queue = VecDeque::from([tip]);
    while let Some(id) = queue.pop_front() {
        let Some(commit) = index.get(id) else { continue };
        for parent in &commit.parents {
            let parent = parent.as_str();
            if main_line.contains(parent) {
                continue;
            }
            let Some(record) = index.get(parent) else { continue };
            if branch_descendants.contains(parent) {
                continue;
            }
            if carries_foreign_branch(record, main_branch) {
                continue;
            }
            main_line.insert(parent);
            queue.push_back(parent);
        }
    }
    main_line
}

/// Legacy no-main behavior: the whole snapshot is the main line.
fn all_main_line(commits: &[CommitRecord]) -> Classification {
    Classification {
        lanes: commits
            .iter()
            .map(|commit| (commit.id.clone(), LaneAssignment::main()))
            .collect(),
        branch_colors: Vec::new(),
        main_line: commits.iter().map(|commit| commit.id.clone()).collect(),
        main_branch: None,
    }
}

pub(crate) fn carries_main_ref(commit: &CommitRecord, main_branch: Option<&str>) -> bool {
    main_branch.is_some_and(|name| commit.carries_branch(name))
}

/// A non-main branch name on the commit, without the main name alongside.
pub(crate) fn carries_foreign_branch(commit: &CommitRecord, main_branch: Option<&str>) -> bool {
    if carries_main_ref(commit, main_branch) {
        return false;
    }
    commit
        .branch_names
        .iter()
        .any(|name| Some(name.as_str()) != main_branch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PALETTE;
    use pretty_assertions::assert_eq;

    fn rec(id: &str, parents: &[&str], refs: &str) -> CommitRecord {
        CommitRecord::new(id, parents.iter().copied(), refs)
    }

    /// `lane == 0 ⇔ is_main ⇔ id ∈ main_line`, for every commit.
    fn assert_lane_invariant(commits: &[CommitRecord], classification: &Classification) {
        for commit in commits {
            let assignment = classification
                .lane_of(&commit.id)
                .unwrap_or_else(|| panic!("no lane for {}", commit.id));
            assert_eq!(
                assignment.lane == 0,
                assignment.is_main,
                "lane invariant broken for {}",
                commit.id
            );
            assert_eq!(
                assignment.is_main,
                classification.is_main_line(&commit.id),
                "main-line set out of sync for {}",
                commit.id
            );
        }
    }

    fn simple_branch() -> Vec<CommitRecord> {
        vec![
            rec("C3", &["C2"], "feature"),
            rec("C2", &["C1"], ""),
            rec("C1", &["M1"], "main"),
            rec("M1", &[], ""),
        ]
    }

    fn merged_branch() -> Vec<CommitRecord> {
        let mut commits = simple_branch();
        commits.insert(0, rec("M0", &["M1", "C3"], "main"));
        commits
    }

    #[test]
    fn simple_branch_scenario() {
        let commits = simple_branch();
        let classification = classify(&commits, &ClassifyOptions::default());

        assert_eq!(classification.main_branch.as_deref(), Some("main"));
        for id in ["C1", "M1"] {
            let assignment = classification.lane_of(id).unwrap();
            assert_eq!(assignment.lane, 0, "{id} belongs to the main line");
            assert!(assignment.is_main);
        }
        for id in ["C2", "C3"] {
            let assignment = classification.lane_of(id).unwrap();
            assert_eq!(assignment.lane, 1, "{id} belongs to the feature lane");
            assert_eq!(assignment.branch.as_deref(), Some("feature"));
        }

        let color = classification.branch_color("feature").unwrap();
        assert_eq!(color.lane, 1);
        assert_eq!(color.color, PALETTE[1]);
        assert_lane_invariant(&commits, &classification);
    }

    #[test]
    fn merge_correction_scenario() {
        let commits = merged_branch();
        let classification = classify(&commits, &ClassifyOptions::default());

        // M0 merges the branch: forced onto the main line despite its
        // branch parent.
        let m0 = classification.lane_of("M0").unwrap();
        assert_eq!(m0.lane, 0);
        assert!(m0.is_main);

        // The branch keeps its lane; the merge edge must not drag its
        // commits onto the main line.
        assert_eq!(classification.lane_of("C3").unwrap().lane, 1);
        assert_eq!(classification.lane_of("C2").unwrap().lane, 1);
        assert_eq!(classification.lane_of("C1").unwrap().lane, 0);
        assert_lane_invariant(&commits, &classification);
    }

    #[test]
    fn dangling_parent_defaults_to_main_line() {
        let commits = vec![rec("lost", &["ghost"], ""), rec("m", &[], "main")];
        let classification = classify(&commits, &ClassifyOptions::default());

        let assignment = classification.lane_of("lost").unwrap();
        assert_eq!(assignment.lane, 0);
        assert!(assignment.is_main);
        assert_lane_invariant(&commits, &classification);
    }

    #[test]
    fn main_is_preferred_over_master() {
        let commits = vec![
            rec("b", &["a"], "master"),
            rec("a", &[], "main"),
        ];
        let classification = classify(&commits, &ClassifyOptions::default());
        assert_eq!(classification.main_branch.as_deref(), Some("main"));
    }

    #[test]
    fn master_is_the_fallback() {
        let commits = vec![rec("b", &["a"], "master"), rec("a", &[], "")];
        let classification = classify(&commits, &ClassifyOptions::default());
        assert_eq!(classification.main_branch.as_deref(), Some("master"));
    }

    #[test]
    fn no_main_branch_is_a_valid_terminal_state() {
        let commits = vec![rec("f2", &["f1"], "feature"), rec("f1", &[], "")];
        let classification = classify(&commits, &ClassifyOptions::default());

        assert_eq!(classification.main_branch, None);
        assert_eq!(classification.lane_of("f2").unwrap().lane, 1);
        assert_eq!(classification.lane_of("f1").unwrap().lane, 1);
        assert!(classification.main_line.is_empty());
        assert_lane_invariant(&commits, &classification);
    }

    #[test]
    fn all_main_line_policy_floods_lane_zero() {
        let commits = vec![rec("f2", &["f1"], "feature"), rec("f1", &[], "")];
        let options = ClassifyOptions {
            no_main_policy: NoMainPolicy::AllMainLine,
        };
        let classification = classify(&commits, &options);

        for commit in &commits {
            let assignment = classification.lane_of(&commit.id).unwrap();
            assert_eq!(assignment.lane, 0);
            assert!(assignment.is_main);
        }
        assert!(classification.branch_colors.is_empty());
        assert_lane_invariant(&commits, &classification);
    }

    #[test]
    fn classification_is_deterministic() {
        let commits = merged_branch();
        let options = ClassifyOptions::default();
        assert_eq!(classify(&commits, &options), classify(&commits, &options));
    }

    #[test]
    fn terminates_on_parent_cycles() {
        let commits = vec![
            rec("a", &["b"], "feature"),
            rec("b", &["a"], ""),
            rec("m", &["m"], "main"),
        ];
        let classification = classify(&commits, &ClassifyOptions::default());
        assert_eq!(classification.lanes.len(), 3);
        assert_lane_invariant(&commits, &classification);
    }

    #[test]
    fn colors_are_stable_under_superset_reinvocation() {
        let base = simple_branch();
        let first = classify(&base, &ClassifyOptions::default());

        // A newer topic branch lands on top; the original commits keep
        // their relative order.
        let mut superset = vec![rec("T1", &["C3"], "topic")];
        superset.extend(base.clone());
        let second = classify(&superset, &ClassifyOptions::default());

        assert_eq!(
            first.branch_color("feature"),
            second.branch_color("feature"),
        );
        assert_eq!(
            first.lane_of("C3").unwrap().lane,
            second.lane_of("C3").unwrap().lane,
        );
        assert_eq!(second.branch_color("topic").unwrap().lane, 2);
        assert_lane_invariant(&superset, &second);
    }

    #[test]
    fn oldest_tip_claims_its_lane_first() {
        // Two branches fork from main; the chronologically earlier tip
        // (further down the newest-first list) claims lane 1.
        let commits = vec![
            rec("young", &["fork"], "young"),
            rec("old", &["fork"], "old"),
            rec("fork", &["root"], "main"),
            rec("root", &[], ""),
        ];
        let classification = classify(&commits, &ClassifyOptions::default());

        assert_eq!(classification.lane_of("old").unwrap().lane, 1);
        assert_eq!(classification.lane_of("young").unwrap().lane, 2);
        assert_eq!(classification.branch_colors[0].name, "old");
        assert_eq!(classification.branch_colors[0].color, PALETTE[1]);
        assert_eq!(classification.branch_colors[1].name, "young");
        assert_eq!(classification.branch_colors[1].color, PALETTE[2]);
        assert_lane_invariant(&commits, &classification);
    }
}
