use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Remote qualifier stripped from remote-tracking names.
pub const DEFAULT_REMOTE: &str = "origin";

/// Kind of a single label parsed out of raw ref text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefKind {
    /// A local branch or tag name.
    Local,
    /// A remote-tracking name such as `origin/feature` (prefix stripped).
    RemoteTracking,
    /// A symbolic pointer such as the `HEAD` in `HEAD -> main`.
    SymbolicHead,
}

/// One parsed ref label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RefLabel {
    pub kind: RefKind,
    pub name: String,
}

impl RefLabel {
    fn local(name: &str) -> Self {
        Self {
            kind: RefKind::Local,
            name: name.to_string(),
        }
    }

    fn remote_tracking(name: &str) -> Self {
        Self {
            kind: RefKind::RemoteTracking,
            name: name.to_string(),
        }
    }

    fn symbolic(name: &str) -> Self {
        Self {
            kind: RefKind::SymbolicHead,
            name: name.to_string(),
        }
    }
}

/// Parse a raw comma-separated ref field into tagged labels.
///
/// This is the only ref parser in the workspace; the classifier, the
/// colorer and any UI labels all consume its output so that a given raw
/// string normalizes identically everywhere.
///
/// Accepted forms per token: `feature`, `origin/feature`, `tag: v1.0`,
/// and the symbolic convention `HEAD -> main` (which yields both the
/// symbolic marker and the target branch). Malformed or empty text
/// yields no labels, never an error.
pub fn parse_ref_field(raw: &str) -> Vec<RefLabel> {
    let raw = raw.trim().trim_start_matches('(').trim_end_matches(')');
    let mut labels = Vec::new();

    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        if let Some((pointer, target)) = token.split_once("->") {
            let pointer = pointer.trim();
            let target = target.trim();
            if !pointer.is_empty() {
                labels.push(RefLabel::symbolic(pointer));
            }
            if !target.is_empty() {
                labels.push(classify_name(target));
            }
            continue;
        }

        labels.push(classify_name(token));
    }

    labels
}

/// Classify a single bare ref name.
fn classify_name(token: &str) -> RefLabel {
    if token == "HEAD" {
        return RefLabel::symbolic(token);
    }
    if let Some(tag) = token.strip_prefix("tag:") {
        return RefLabel::local(tag.trim());
    }
    let remote_prefix = format!("{DEFAULT_REMOTE}/");
    if let Some(name) = token.strip_prefix(&remote_prefix) {
        if name == "HEAD" {
            return RefLabel::symbolic(token);
        }
        return RefLabel::remote_tracking(name);
    }
    RefLabel::local(token)
}

/// Deduplicated, sorted local branch names for a label set.
///
/// Remote-tracking names count with their prefix stripped; symbolic
/// markers are dropped.
pub fn local_branch_names(labels: &[RefLabel]) -> Vec<String> {
    let names: BTreeSet<&str> = labels
        .iter()
        .filter(|label| label.kind != RefKind::SymbolicHead)
        .map(|label| label.name.as_str())
        .collect();
    names.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_plain_branch() {
        let labels = parse_ref_field("feature");
        assert_eq!(labels, vec![RefLabel::local("feature")]);
    }

    #[test]
    fn parses_symbolic_head_and_target() {
        let labels = parse_ref_field("HEAD -> main, origin/main");
        assert_eq!(
            labels,
            vec![
                RefLabel::symbolic("HEAD"),
                RefLabel::local("main"),
                RefLabel::remote_tracking("main"),
            ]
        );
    }

    #[test]
    fn strips_remote_prefix() {
        let labels = parse_ref_field("origin/feature/login");
        assert_eq!(labels, vec![RefLabel::remote_tracking("feature/login")]);
    }

    #[test]
    fn remote_head_is_symbolic() {
        let labels = parse_ref_field("origin/HEAD -> origin/main");
        assert_eq!(
            labels,
            vec![
                RefLabel::symbolic("origin/HEAD"),
                RefLabel::remote_tracking("main"),
            ]
        );
    }

    #[test]
    fn parses_tag_token() {
        let labels = parse_ref_field("tag: v1.0");
        assert_eq!(labels, vec![RefLabel::local("v1.0")]);
    }

    #[test]
    fn empty_and_garbage_yield_nothing() {
        assert_eq!(parse_ref_field(""), vec![]);
        assert_eq!(parse_ref_field("   "), vec![]);
        assert_eq!(parse_ref_field(", ,  ,"), vec![]);
    }

    #[test]
    fn branch_names_dedupe_and_sort() {
        let labels = parse_ref_field("HEAD -> main, zeta, origin/main, alpha");
        assert_eq!(local_branch_names(&labels), vec!["alpha", "main", "zeta"]);
    }

    #[test]
    fn branch_names_drop_symbolic_markers() {
        let labels = parse_ref_field("HEAD -> main");
        assert_eq!(local_branch_names(&labels), vec!["main"]);
    }
}
