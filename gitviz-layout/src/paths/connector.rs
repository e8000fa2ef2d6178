/// Rounded two-segment connector between two dot centers.
///
/// Shape: a horizontal run from the start center to one
/// dot-radius-plus-corner-radius before the target x, a quarter-circle
/// arc turning toward the target row, then a vertical run at the target
/// x ending at `target_y + dot_radius` when the target is below and
/// `target_y - dot_radius` when above (dots are drawn on top of paths).
/// The arc sweep is 1 exactly when goingRight equals goingDown; upward
/// corners clamp the radius to the dot radius so the arc never intrudes
/// above the start dot. Degenerate spans collapse to a straight line.
pub fn rounded_connector(
    from: (f64, f64),
    to: (f64, f64),
    dot_radius: f64,
    corner_radius: f64,
) -> String {
    let (fx, fy) = from;
    let (tx, ty) = to;

    if (fx - tx).abs() < f64::EPSILON || (fy - ty).abs() < f64::EPSILON {
        return format!("M {fx} {fy} L {tx} {ty}");
    }

    let going_right = tx > fx;
    let going_down = ty > fy;
    let radius = if going_down {
        corner_radius
    } else {
        corner_radius.min(dot_radius)
    };
    let sx = if going_right { 1.0 } else { -1.0 };
    let sy = if going_down { 1.0 } else { -1.0 };
    let sweep = u8::from(going_right == going_down);

    let bend_x = tx - sx * (dot_radius + radius);
    let elbow_y = fy + sy * radius;
    let end_y = if going_down {
        ty + dot_radius
    } else {
        ty - dot_radius
    };

    format!("M {fx} {fy} L {bend_x} {fy} A {radius} {radius} 0 0 {sweep} {tx} {elbow_y} L {tx} {end_y}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn right_and_down_sweeps_one() {
        let d = rounded_connector((0.0, 0.0), (40.0, 60.0), 5.0, 8.0);
        assert_eq!(d, "M 0 0 L 27 0 A 8 8 0 0 1 40 8 L 40 65");
    }

    #[test]
    fn left_and_down_sweeps_zero() {
        let d = rounded_connector((40.0, 0.0), (0.0, 60.0), 5.0, 8.0);
        assert_eq!(d, "M 40 0 L 13 0 A 8 8 0 0 0 0 8 L 0 65");
    }

    #[test]
    fn upward_corner_is_clamped_to_the_dot_radius() {
        let d = rounded_connector((0.0, 60.0), (40.0, 0.0), 5.0, 8.0);
        // radius 5, not 8: the arc must not ride above the start dot
        assert_eq!(d, "M 0 60 L 30 60 A 5 5 0 0 0 40 55 L 40 -5");
    }

    #[test]
    fn right_and_up_sweeps_zero_left_and_up_sweeps_one() {
        let up_right = rounded_connector((0.0, 60.0), (40.0, 0.0), 5.0, 8.0);
        assert!(up_right.contains(" A 5 5 0 0 0 "));
        let up_left = rounded_connector((40.0, 60.0), (0.0, 0.0), 5.0, 8.0);
        assert!(up_left.contains(" A 5 5 0 0 1 "));
    }

    #[test]
    fn same_column_collapses_to_a_line() {
        let d = rounded_connector((10.0, 0.0), (10.0, 50.0), 5.0, 8.0);
        assert_eq!(d, "M 10 0 L 10 50");
    }

    #[test]
    fn same_row_collapses_to_a_line() {
        let d = rounded_connector((0.0, 20.0), (50.0, 20.0), 5.0, 8.0);
        assert_eq!(d, "M 0 20 L 50 20");
    }
}
