/// Externally measured row geometry.
///
/// `row_ys` holds one center-y per row in commit order and may be
/// shorter than the commit list while the surface is still being
/// measured; missing rows fall back to a computed default position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowGeometry {
    pub row_ys: Vec<f64>,
    pub header_height: f64,
    pub total_height: f64,
    pub width: f64,
}

impl RowGeometry {
    /// Center y of a row, with the partial-measurement fallback.
    pub fn row_y(&self, row: usize, options: &PathOptions) -> f64 {
        self.row_ys.get(row).copied().unwrap_or_else(|| {
            self.header_height
                + row as f64 * options.default_row_height
                + options.default_row_height / 2.0
        })
    }

    /// Central axis: the x of every main-line commit.
    pub fn axis_x(&self) -> f64 {
        self.width / 2.0
    }

    /// Lane x. The offset direction is fixed for the whole render.
    pub fn lane_x(&self, lane: usize, options: &PathOptions) -> f64 {
        self.axis_x() + lane as f64 * options.lane_width
    }
}

/// Geometry knobs for the path builder.
#[derive(Debug, Clone, PartialEq)]
pub struct PathOptions {
    pub lane_width: f64,
    pub dot_radius: f64,
    pub corner_radius: f64,
    pub default_row_height: f64,
    pub stroke_width: f64,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            lane_width: 24.0,
            dot_radius: 5.0,
            corner_radius: 8.0,
            default_row_height: 28.0,
            stroke_width: 2.0,
        }
    }
}
