//! Commit graph layout engine
//!
//! Two pure stages: the graph classifier assigns every commit a lane, a
//! main-line flag and a stable branch color; the path builder turns the
//! classification plus externally measured row geometry into renderable
//! dots and connector paths. Both stages are total: malformed refs,
//! dangling parents, cycles and short geometry degrade instead of
//! failing.

pub mod classify;
pub mod engine;
pub mod geometry;
pub mod index;
pub mod palette;
pub mod paths;

pub use classify::{classify, Classification, ClassifyOptions, LaneAssignment, NoMainPolicy};
pub use engine::LayoutEngine;
pub use geometry::{PathOptions, RowGeometry};
pub use index::CommitIndex;
pub use palette::{color_for_lane, BranchColor, PALETTE};
pub use paths::{build_paths, Dot, RenderPlan, Segment, SegmentKind, SegmentShape};
