//! SVG rendering of grouped shapes.

use grille::Clusters;
use grille::Point2D;
use std::io;
use std::num::NonZeroUsize;

/// The fill colour of the given group, as a CSS colour.
fn group_color(group_id: usize, group_count: usize) -> String {
    let hue = group_id * 360 / usize::max(1, group_count);
    format!("hsl({hue},80%,50%)")
}

fn write_path<W>(w: &mut W, points: &[Point2D]) -> io::Result<()>
where
    W: io::Write,
{
    let (first, points) = match points.split_first() {
        Some(v) => v,
        None => return Ok(()),
    };
    write!(w, "M{},{}", first.x, first.y)?;
    for p in points {
        write!(w, " L{},{}", p.x, p.y)?;
    }
    write!(w, " Z")
}

/// Draw the grid and the shapes of `clusters`, one colour per group.
///
/// Shapes that are not part of any group are drawn as grey outlines.
pub fn write_svg<W, S>(
    mut w: W,
    clusters: &Clusters<'_, S>,
    width: NonZeroUsize,
    height: NonZeroUsize,
) -> io::Result<()>
where
    W: io::Write,
    S: AsRef<[Point2D]>,
{
    let width = usize::from(width);
    let height = usize::from(height);
    writeln!(
        w,
        r#"<svg viewBox="0 0 {width} {height}" xmlns="http://www.w3.org/2000/svg">"#,
    )?;
    writeln!(
        w,
        r#"<rect width="{width}" height="{height}" fill="white" stroke="black"/>"#,
    )?;

    writeln!(w, "<g stroke=\"#a0a0a0\" stroke-dasharray=\"4\">")?;
    for &x in &clusters.col_breaks().as_slice()[1..] {
        if 0 < x && x < width as i64 {
            writeln!(w, r#"<line x1="{x}" y1="0" x2="{x}" y2="{height}"/>"#)?;
        }
    }
    for &y in &clusters.row_breaks().as_slice()[1..] {
        if 0 < y && y < height as i64 {
            writeln!(w, r#"<line x1="0" y1="{y}" x2="{width}" y2="{y}"/>"#)?;
        }
    }
    writeln!(w, "</g>")?;

    let groups = clusters.groups();
    let group_ids = clusters.group_ids();
    for (shape, group_id) in clusters.shapes().iter().zip(group_ids) {
        let points = shape.as_ref();
        if points.is_empty() {
            continue;
        }
        match group_id {
            Some(group_id) => {
                let color = group_color(group_id, groups.len());
                write!(w, r#"<path fill="{color}" fill-opacity="0.8" d=""#)?;
                write_path(&mut w, points)?;
                writeln!(w, r#""><title>{}</title></path>"#, groups[group_id].cell)?;
            }
            None => {
                write!(w, "<path fill=\"none\" stroke=\"#808080\" d=\"")?;
                write_path(&mut w, points)?;
                writeln!(w, "\"/>")?;
            }
        }
    }

    writeln!(w, "</svg>")?;
    w.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_at(cx: i32, cy: i32) -> Vec<Point2D> {
        vec![
            Point2D::new(cx - 1, cy - 1),
            Point2D::new(cx + 1, cy - 1),
            Point2D::new(cx + 1, cy + 1),
            Point2D::new(cx - 1, cy + 1),
        ]
    }

    #[test]
    fn test_group_color() {
        assert_eq!(group_color(0, 4), "hsl(0,80%,50%)");
        assert_eq!(group_color(3, 4), "hsl(270,80%,50%)");
    }

    #[test]
    fn test_write_svg() {
        let side = NonZeroUsize::new(10).unwrap();
        let shapes = [
            square_at(1, 1),
            vec![Point2D::new(3, 3); 3],
            square_at(8, 1),
            square_at(8, 8),
        ];
        let clusters = grille::GridCluster {
            row_count: 2,
            col_count: 2,
            ..Default::default()
        }
        .cluster(&shapes, side, side)
        .unwrap();
        let mut output = Vec::new();

        write_svg(&mut output, &clusters, side, side).unwrap();

        let svg = String::from_utf8(output).unwrap();
        assert!(svg.starts_with(r#"<svg viewBox="0 0 10 10""#));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<line").count(), 2);
        assert!(svg.contains(r#"<line x1="5" y1="0" x2="5" y2="10"/>"#));
        assert_eq!(svg.matches("<path").count(), 4);
        assert_eq!(svg.matches("hsl(").count(), 3);
        assert!(svg.contains("M0,0 L2,0 L2,2 L0,2 Z"));
        assert!(svg.contains("<title>2,2</title>"));
        assert!(svg.contains("stroke=\"#808080\" d=\"M3,3 L3,3 L3,3 Z\""));
    }
}
