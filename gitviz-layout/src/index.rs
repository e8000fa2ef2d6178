use std::collections::{HashMap, HashSet, VecDeque};

use gitviz_core::CommitRecord;

/// Positional index over one ordered commit snapshot.
///
/// Built once per classification pass. Child adjacency is recorded in
/// input order so every traversal that walks it is deterministic. The
/// input is not assumed to be a well-formed DAG: parent ids may be
/// dangling and parent chains may contain cycles.
pub struct CommitIndex<'a> {
    commits: &'a [CommitRecord],
    position: HashMap<&'a str, usize>,
    children: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> CommitIndex<'a> {
    pub fn new(commits: &'a [CommitRecord]) -> Self {
        let mut position = HashMap::with_capacity(commits.len());
        for (row, commit) in commits.iter().enumerate() {
            // first occurrence wins on duplicate ids
            position.entry(commit.id.as_str()).or_insert(row);
        }

        let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
        for commit in commits {
            for parent in &commit.parents {
                children
                    .entry(parent.as_str())
                    .or_default()
                    .push(commit.id.as_str());
            }
        }

        Self {
            commits,
            position,
            children,
        }
    }

    pub fn commits(&self) -> &'a [CommitRecord] {
        self.commits
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position.contains_key(id)
    }

    /// Row index of a commit, in input order (0 = newest).
    pub fn position(&self, id: &str) -> Option<usize> {
        self.position.get(id).copied()
    }

    pub fn get(&self, id: &str) -> Option<&'a CommitRecord> {
        self.position(id).map(|row| &self.commits[row])
    }

    /// Children of a commit: every commit whose parent list names it.
    pub fn children(&self, id: &str) -> &[&'a str] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ancestor closure of `start` (inclusive), never entering `blocked`
    /// ids. Dangling parents are skipped; a visited set bounds cycles.
    pub fn ancestors_avoiding(
        &self,
        start: &'a str,
        blocked: &HashSet<&'a str>,
    ) -> HashSet<&'a str> {
        let mut seen: HashSet<&'a str> = HashSet::new();
        let mut queue: VecDeque<&'a str> = VecDeque::new();
        if self.contains(start) && !blocked.contains(start) {
            seen.insert(start);
            queue.push_back(start);
        }
        while let Some(id) = queue.pop_front() {
            let Some(commit) = self.get(id) else { continue };
            for parent in &commit.parents {
                let parent = parent.as_str();
                if seen.contains(parent) || blocked.contains(parent) || !self.contains(parent) {
                    continue;
                }
                seen.insert(parent);
                queue.push_back(parent);
            }
        }
        seen
    }
}
