/// Fixed lane palette. Index 0 is reserved for the main line; branch
/// lanes cycle through the remaining nine entries. Downstream code
/// depends on the ordering and the count for reproducible coloring.
pub const PALETTE: [&str; 10] = [
    "#1e88e5", // blue (main line)
    "#e53935", // red
    "#43a047", // green
    "#ffb300", // amber
    "#8e24aa", // purple
    "#d81b60", // pink
    "#00acc1", // cyan
    "#c0ca33", // lime
    "#fb8c00", // orange
    "#3949ab", // indigo
];

/// Palette color for a lane index.
pub fn color_for_lane(lane: usize) -> &'static str {
    if lane == 0 {
        PALETTE[0]
    } else {
        PALETTE[(lane - 1) % (PALETTE.len() - 1) + 1]
    }
}

/// Color-table entry for one non-main branch, created once per distinct
/// branch name in order of first encounter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchColor {
    pub name: String,
    pub lane: usize,
    pub color: &'static str,
}
