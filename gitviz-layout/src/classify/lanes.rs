use std::collections::{HashMap, HashSet, VecDeque};

use gitviz_core::CommitRecord;
use tracing::debug;

use super::{carries_main_ref, Classification, LaneAssignment};
use crate::index::CommitIndex;
use crate::palette::{color_for_lane, BranchColor};

#[derive(Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}

/// Lane and color assignment: reffed tips first (oldest first, so the
/// earliest tip of a shared name claims the lane), then priority-ordered
/// propagation for the rest, then merge correction.
///
/// Lane and color counters are locals of this one pass; two invocations
/// can never interfere.
pub(crate) fn assign<'a>(
    index: &CommitIndex<'a>,
    main_branch: Option<&str>,
    branch_descendants: &HashSet<&'a str>,
    main_line: HashSet<&'a str>,
) -> Classification {
    let commits = index.commits();
    let mut main_line = main_line;
    let mut lanes: HashMap<&'a str, LaneAssignment> = HashMap::new();
    let mut colors: Vec<BranchColor> = Vec::new();
    let mut color_slots: HashMap<&'a str, usize> = HashMap::new();

    // Tips: oldest first. Main tips take lane 0 and no color-table
    // entry; non-main tips take the next unused lane from 1 up, with
    // the matching palette color.
    for commit in commits.iter().rev() {
        if commit.branch_names.is_empty() {
            continue;
        }
        let id = commit.id.as_str();
        if carries_main_ref(commit, main_branch) {
            lanes.insert(id, LaneAssignment::main());
            main_line.insert(id);
            continue;
        }
        let Some(primary) = commit.primary_branch() else {
            continue;
        };
        let lane = match color_slots.get(primary) {
            Some(&slot) => colors[slot].lane,
            None => {
                let lane = colors.len() + 1;
                color_slots.insert(primary, colors.len());
                colors.push(BranchColor {
                    name: primary.to_string(),
                    lane,
                    color: color_for_lane(lane),
                });
                lane
            }
        };
        lanes.insert(id, LaneAssignment::branch(lane, primary));
    }

    // Everything else, in input order, by strict priority: branch
    // descendants, then the marked main line, then the nearest assigned
    // ancestor, then the lane-0 fallback.
    for commit in commits {
        let id = commit.id.as_str();
        if lanes.contains_key(id) {
            continue;
        }
        let assignment = if branch_descendants.contains(id) {
            resolve_descendant(index, commit, &lanes, &colors)
        } else if main_line.contains(id) {
            LaneAssignment::main()
        } else if let Some(found) = trace(index, commit, &lanes, Direction::Backward, false) {
            found
        } else {
            LaneAssignment::main()
        };
        if assignment.lane == 0 {
            main_line.insert(id);
        }
        lanes.insert(id, assignment);
    }

    // Merge correction: a merge with any main-line parent belongs to
    // the main line, whatever the earlier steps decided.
    for commit in commits {
        if commit.parents.len() < 2 {
            continue;
        }
        if commit
            .parents
            .iter()
            .any(|parent| main_line.contains(parent.as_str()))
        {
            lanes.insert(commit.id.as_str(), LaneAssignment::main());
            main_line.insert(commit.id.as_str());
        }
    }

    debug!(
        branches = colors.len(),
        main = main_line.len(),
        "lane assignment complete"
    );

    Classification {
        lanes: lanes
            .into_iter()
            .map(|(id, assignment)| (id.to_string(), assignment))
            .collect(),
        branch_colors: colors,
        main_line: main_line.into_iter().map(str::to_string).collect(),
        main_branch: main_branch.map(str::to_string),
    }
}

/// A branch descendant reuses the only branch lane when exactly one
/// exists, else takes the nearest assigned non-zero lane found forward
/// through children and then backward through parents.
fn resolve_descendant<'a>(
    index: &CommitIndex<'a>,
    commit: &'a CommitRecord,
    lanes: &HashMap<&'a str, LaneAssignment>,
    colors: &[BranchColor],
) -> LaneAssignment {
    if let [only] = colors {
        return LaneAssignment::branch(only.lane, &only.name);
    }
    trace(index, commit, lanes, Direction::Forward, true)
        .or_else(|| trace(index, commit, lanes, Direction::Backward, true))
        .unwrap_or_else(LaneAssignment::main)
}

/// BFS for the nearest already-assigned commit. With `nonzero_only`,
/// main-line hits end their path instead of being returned; the wanted
/// lane lies on the branch side. The visited set guarantees termination
/// on cyclic or malformed input.
fn trace<'a>(
    index: &CommitIndex<'a>,
    commit: &'a CommitRecord,
    lanes: &HashMap<&'a str, LaneAssignment>,
    direction: Direction,
    nonzero_only: bool,
) -> Option<LaneAssignment> {
    let start = commit.id.as_str();
    let mut visited: HashSet<&'a str> = HashSet::from([start]);
    let mut queue: VecDeque<&'a str> = VecDeque::from([start]);

    while let Some(id) = queue.pop_front() {
        for next in neighbors(index, id, direction) {
            if !visited.insert(next) {
                continue;
            }
            if let Some(existing) = lanes.get(next) {
                if existing.lane > 0 || !nonzero_only {
                    return Some(existing.clone());
                }
                continue;
            }
            if index.contains(next) {
                queue.push_back(next);
            }
        }
    }
    None
}

fn neighbors<'a>(index: &CommitIndex<'a>, id: &str, direction: Direction) -> Vec<&'a str> {
    match direction {
        Direction::Forward => index.children(id).to_vec(),
        Direction::Backward => index
            .get(id)
            .map(|commit| commit.parents.iter().map(String::as_str).collect())
            .unwrap_or_default(),
    }
}
