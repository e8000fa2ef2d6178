mod connector;

use std::collections::{HashSet, VecDeque};

use gitviz_core::CommitRecord;

use crate::classify::Classification;
use crate::geometry::{PathOptions, RowGeometry};
use crate::index::CommitIndex;
use crate::palette::color_for_lane;

pub use connector::rounded_connector;

/// Dot stroke color; fixed by the output contract.
pub const DOT_STROKE: &str = "white";

/// One commit dot.
#[derive(Debug, Clone, PartialEq)]
pub struct Dot {
    pub commit_id: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub fill: &'static str,
    pub stroke: &'static str,
}

/// Geometry of one connector.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentShape {
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Rounded { d: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Spine,
    Direct,
    Divergence,
    MergeBack,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub shape: SegmentShape,
    pub color: &'static str,
    pub stroke_width: f64,
    pub kind: SegmentKind,
}

/// Renderable output of one layout pass, in draw order: the main spine
/// first, then connectors, with dots listed separately to be drawn on
/// top of every path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderPlan {
    pub dots: Vec<Dot>,
    pub segments: Vec<Segment>,
}

impl RenderPlan {
    pub fn segments_of_kind(&self, kind: SegmentKind) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(move |s| s.kind == kind)
    }
}

/// Build dots and connector paths for a classified snapshot.
///
/// Pure and deterministic given identical inputs, including the row
/// geometry; callers defer rendering until the surface is measured and
/// re-invoke with whatever geometry they have.
pub fn build_paths(
    commits: &[CommitRecord],
    classification: &Classification,
    geometry: &RowGeometry,
    options: &PathOptions,
) -> RenderPlan {
    let index = CommitIndex::new(commits);
    let mut plan = RenderPlan::default();

    push_spine(commits, classification, geometry, options, &mut plan);
    push_direct_edges(commits, &index, classification, geometry, options, &mut plan);
    push_branch_arcs(commits, &index, classification, geometry, options, &mut plan);

    for (row, commit) in commits.iter().enumerate() {
        let lane = classification
            .lane_of(&commit.id)
            .map(|assignment| assignment.lane)
            .unwrap_or(0);
        plan.dots.push(Dot {
            commit_id: commit.id.clone(),
            x: geometry.lane_x(lane, options),
            y: geometry.row_y(row, options),
            radius: options.dot_radius,
            fill: color_for_lane(lane),
            stroke: DOT_STROKE,
        });
    }

    plan
}

/// One straight vertical line under the whole main line, topmost to
/// bottommost main commit.
fn push_spine(
    commits: &[CommitRecord],
    classification: &Classification,
    geometry: &RowGeometry,
    options: &PathOptions,
    plan: &mut RenderPlan,
) {
    let mut top: Option<f64> = None;
    let mut bottom: Option<f64> = None;
    for (row, commit) in commits.iter().enumerate() {
        if !classification.is_main_line(&commit.id) {
            continue;
        }
        let y = geometry.row_y(row, options);
        top = Some(top.map_or(y, |t: f64| t.min(y)));
        bottom = Some(bottom.map_or(y, |b: f64| b.max(y)));
    }
    if let (Some(y1), Some(y2)) = (top, bottom) {
        let x = geometry.axis_x();
        plan.segments.push(Segment {
            shape: SegmentShape::Line {
                x1: x,
                y1,
                x2: x,
                y2,
            },
            color: color_for_lane(0),
            stroke_width: options.stroke_width,
            kind: SegmentKind::Spine,
        });
    }
}

/// Child-to-parent connectors, only between commits sharing both lane
/// and main-line status; cross-lane transitions belong to the branch
/// arcs. Dangling parents draw nothing.
fn push_direct_edges(
    commits: &[CommitRecord],
    index: &CommitIndex<'_>,
    classification: &Classification,
    geometry: &RowGeometry,
    options: &PathOptions,
    plan: &mut RenderPlan,
) {
    for (row, commit) in commits.iter().enumerate() {
        let Some(child) = classification.lane_of(&commit.id) else {
            continue;
        };
        let from = (geometry.lane_x(child.lane, options), geometry.row_y(row, options));
        for parent_id in &commit.parents {
            let Some(parent_row) = index.position(parent_id) else {
                continue;
            };
            let Some(parent) = classification.lane_of(parent_id) else {
                continue;
            };
            if child.lane != parent.lane || child.is_main != parent.is_main {
                continue;
            }
            let to = (
                geometry.lane_x(parent.lane, options),
                geometry.row_y(parent_row, options),
            );
            let color = color_for_lane(child.lane);
            // same lane means same x; degrade to a rounded connector if
            // geometry ever disagrees
            let shape = if (from.0 - to.0).abs() < f64::EPSILON {
                SegmentShape::Line {
                    x1: from.0,
                    y1: from.1,
                    x2: to.0,
                    y2: to.1,
                }
            } else {
                SegmentShape::Rounded {
                    d: rounded_connector(from, to, options.dot_radius, options.corner_radius),
                }
            };
            plan.segments.push(Segment {
                shape,
                color,
                stroke_width: options.stroke_width,
                kind: SegmentKind::Direct,
            });
        }
    }
}

/// Per-branch divergence and merge-back arcs: at most two segments per
/// branch, whatever its commit count.
fn push_branch_arcs(
    commits: &[CommitRecord],
    index: &CommitIndex<'_>,
    classification: &Classification,
    geometry: &RowGeometry,
    options: &PathOptions,
    plan: &mut RenderPlan,
) {
    for branch in &classification.branch_colors {
        let Some(tip) = commits
            .iter()
            .find(|commit| commit.carries_branch(&branch.name))
        else {
            continue;
        };
        let Some(tip_row) = index.position(&tip.id) else {
            continue;
        };
        let tip_lane = classification
            .lane_of(&tip.id)
            .map(|assignment| assignment.lane)
            .unwrap_or(branch.lane);
        let tip_point = (
            geometry.lane_x(tip_lane, options),
            geometry.row_y(tip_row, options),
        );

        // common ancestor -> tip
        if let Some(ancestor_id) = nearest_main_ancestor(index, classification, &tip.id) {
            if let Some(ancestor_row) = index.position(&ancestor_id) {
                let from = (geometry.axis_x(), geometry.row_y(ancestor_row, options));
                plan.segments.push(Segment {
                    shape: SegmentShape::Rounded {
                        d: rounded_connector(
                            from,
                            tip_point,
                            options.dot_radius,
                            options.corner_radius,
                        ),
                    },
                    color: branch.color,
                    stroke_width: options.stroke_width,
                    kind: SegmentKind::Divergence,
                });
            }
        }

        // tip -> the first main-line commit that merged it, if any
        let merge = commits.iter().enumerate().find(|(_, commit)| {
            classification.is_main_line(&commit.id)
                && commit.parents.iter().any(|parent| *parent == tip.id)
        });
        if let Some((merge_row, _)) = merge {
            let to = (geometry.axis_x(), geometry.row_y(merge_row, options));
            plan.segments.push(Segment {
                shape: SegmentShape::Rounded {
                    d: rounded_connector(
                        tip_point,
                        to,
                        options.dot_radius,
                        options.corner_radius,
                    ),
                },
                color: branch.color,
                stroke_width: options.stroke_width,
                kind: SegmentKind::MergeBack,
            });
        }
    }
}

/// Nearest main-line commit reachable by walking parent pointers from
/// `start`. Dangling parents are skipped and a visited set bounds
/// cycles, so broken parent chains degrade to "no ancestor".
fn nearest_main_ancestor(
    index: &CommitIndex<'_>,
    classification: &Classification,
    start: &str,
) -> Option<String> {
    let start = index.get(start)?;
    let mut visited: HashSet<&str> = HashSet::from([start.id.as_str()]);
    let mut queue: VecDeque<&str> = VecDeque::from([start.id.as_str()]);

    while let Some(id) = queue.pop_front() {
        let Some(commit) = index.get(id) else { continue };
        for parent in &commit.parents {
            let parent = parent.as_str();
            if !visited.insert(parent) {
                continue;
            }
            if !index.contains(parent) {
                continue;
            }
            if classification.is_main_line(parent) {
                return Some(parent.to_string());
            }
            queue.push_back(parent);
        }
    }
    None
}
