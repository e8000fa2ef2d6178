use std::fmt::Write;

use gitviz_layout::{RenderPlan, RowGeometry, SegmentShape};

/// Serialize a render plan as a standalone SVG document. Segments come
/// first in plan order, dots last so they cover the path endpoints.
pub fn document(plan: &RenderPlan, geometry: &RowGeometry) -> String {
    let mut out = String::new();
    let width = geometry.width;
    let height = geometry.total_height;
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );

    for segment in &plan.segments {
        match &segment.shape {
            SegmentShape::Line { x1, y1, x2, y2 } => {
                let _ = writeln!(
                    out,
                    r#"  <line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{}" />"#,
                    segment.color, segment.stroke_width
                );
            }
            SegmentShape::Rounded { d } => {
                let _ = writeln!(
                    out,
                    r#"  <path d="{d}" fill="none" stroke="{}" stroke-width="{}" />"#,
                    segment.color, segment.stroke_width
                );
            }
        }
    }

    for dot in &plan.dots {
        let _ = writeln!(
            out,
            r#"  <circle cx="{}" cy="{}" r="{}" fill="{}" stroke="{}" stroke-width="1" />"#,
            dot.x, dot.y, dot.radius, dot.fill, dot.stroke
        );
    }

    out.push_str("</svg>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitviz_core::CommitRecord;
    use gitviz_layout::{build_paths, classify, ClassifyOptions, PathOptions};

    #[test]
    fn emits_one_circle_per_commit() {
        let commits = vec![
            CommitRecord::new("b", ["a"], "main"),
            CommitRecord::new("a", [] as [&str; 0], ""),
        ];
        let classification = classify(&commits, &ClassifyOptions::default());
        let geometry = RowGeometry {
            width: 120.0,
            total_height: 80.0,
            ..Default::default()
        };
        let plan = build_paths(&commits, &classification, &geometry, &PathOptions::default());
        let svg = document(&plan, &geometry);

        assert!(svg.starts_with("<svg "));
        assert!(svg.ends_with("</svg>\n"));
        assert_eq!(svg.matches("<circle ").count(), 2);
        assert_eq!(svg.matches("<line ").count(), 2); // spine + direct edge
    }
}
