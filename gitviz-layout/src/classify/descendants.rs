use std::collections::{HashSet, VecDeque};

use gitviz_core::CommitRecord;
use tracing::trace;

use super::carries_main_ref;
use crate::index::CommitIndex;

/// Branch-descendant marking, iterated to a fixed point.
///
/// Seeds are the commits carrying a non-main ref. Each round expands the
/// set forward through child edges and backward through parent edges up
/// to (excluding) the main tip's ancestor closure, then recomputes that
/// closure avoiding the newly marked commits. Synthetic history edits
/// elsewhere in the system can splice parent pointers so that a branch
/// commit's parent resolves to a main-line commit; the backward pass is
/// what keeps such commits off the main line.
///
/// Commits whose own refs contain the main branch name anchor the main
/// line and are never marked. The iteration bound is a safety valve for
/// adversarial input only; the loop stops at the fixed point.
pub(crate) fn mark<'a>(
    index: &CommitIndex<'a>,
    main_branch: Option<&str>,
    main_tip: Option<&'a str>,
) -> HashSet<&'a str> {
    let commits = index.commits();
    let seeds: HashSet<&'a str> = commits
        .iter()
        .filter(|commit| is_branch_seed(commit, main_branch))
        .map(|commit| commit.id.as_str())
        .collect();
    if seeds.is_empty() {
        return seeds;
    }

    let bound = commits.len() + 1;
    let mut marked = seeds;
    let mut round = 0usize;
    loop {
        let boundary = match main_tip {
            Some(tip) => index.ancestors_avoiding(tip, &marked),
            None => HashSet::new(),
        };

        let mut next = marked.clone();
        expand_forward(index, main_branch, &mut next);
        expand_backward(index, main_branch, &boundary, &mut next);

        if next == marked {
            trace!(round, marked = marked.len(), "descendant marking converged");
            break;
        }
        marked = next;

        round += 1;
        if round >= bound {
            trace!(round, "descendant marking stopped at the iteration bound");
            break;
        }
    }
    marked
}

fn is_branch_seed(commit: &CommitRecord, main_branch: Option<&str>) -> bool {
    !commit.branch_names.is_empty() && !carries_main_ref(commit, main_branch)
}

/// Add everything forward-reachable from the marked set via child edges.
fn expand_forward<'a>(
    index: &CommitIndex<'a>,
    main_branch: Option<&str>,
    marked: &mut HashSet<&'a str>,
) {
    let mut queue: VecDeque<&'a str> = marked.iter().copied().collect();
    while let Some(id) = queue.pop_front() {
        for &child in index.children(id) {
            if marked.contains(child) {
                continue;
            }
            let Some(record) = index.get(child) else { continue };
            if carries_main_ref(record, main_branch) {
                continue;
            }
            marked.insert(child);
            queue.push_back(child);
        }
    }
}

/// Add everything backward-reachable from the marked set via parent
/// edges, stopping before the main tip's ancestor closure.
fn expand_backward<'a>(
    index: &CommitIndex<'a>,
    main_branch: Option<&str>,
    boundary: &HashSet<&'a str>,
    marked: &mut HashSet<&'a str>,
) {
    let mut queue: VecDeque<&'a str> = marked.iter().copied().collect();
    let mut visited: HashSet<&'a str> = marked.clone();
    while let Some(id) = queue.pop_front() {
        let Some(commit) = index.get(id) else { continue };
        for parent in &commit.parents {
            let parent = parent.as_str();
            if !visited.insert(parent) {
                continue;
            }
            let Some(record) = index.get(parent) else { continue };
            if boundary.contains(parent) || carries_main_ref(record, main_branch) {
                continue;
            }
            marked.insert(parent);
            queue.push_back(parent);
        }
    }
}
