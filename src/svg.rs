//! SVG rendering of a parsed maze
//!
//! Walls map directly to unit-scale line primitives: lattice columns are
//! x coordinates and lattice rows are y coordinates. The viewBox is
//! padded by half a stroke width on every edge so boundary walls are not
//! clipped.

use std::fmt::Write;

use itertools::Itertools;

use crate::{Maze, Point};

/// Stroke width of wall lines, in cell units.
const LINE_WIDTH: f64 = 0.15;

/// Render the maze walls as a standalone SVG document.
///
/// One `<line>` element per wall segment, written in sorted order so the
/// output for a given maze is reproducible byte for byte. When `player`
/// names a cell, a filled circle marks it.
///
/// # Examples
/// ```
/// use hexmaze::{svg, Maze};
///
/// let maze = Maze::parse_hex("739\n73a").unwrap();
/// let document = svg::render(&maze, None);
/// assert!(document.ends_with("</svg>"));
/// ```
pub fn render(maze: &Maze, player: Option<Point>) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" class="maze" viewBox="{} {} {} {}">"#,
        -LINE_WIDTH / 2.0,
        -LINE_WIDTH / 2.0,
        maze.width() as f64 + LINE_WIDTH,
        maze.height() as f64 + LINE_WIDTH,
    );
    svg.push('\n');

    for wall in maze.walls().iter().sorted() {
        let _ = writeln!(
            svg,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="black" stroke-width="{}" stroke-linecap="round"/>"#,
            wall.from.col, wall.from.row, wall.to.col, wall.to.row, LINE_WIDTH,
        );
    }

    if let Some(player) = player {
        let _ = writeln!(
            svg,
            r#"<circle cx="{}" cy="{}" r="0.3" fill="crimson"/>"#,
            player.col as f64 + 0.5,
            player.row as f64 + 0.5,
        );
    }

    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SAMPLE_MAZE;

    #[test]
    fn line_per_wall_segment() {
        let maze = Maze::parse_hex(SAMPLE_MAZE).unwrap();
        let document = render(&maze, None);

        assert!(document.starts_with("<svg"));
        assert!(document.ends_with("</svg>"));
        assert_eq!(document.matches("<line ").count(), maze.walls().len());
    }

    #[test]
    fn view_box_padded_by_half_stroke() {
        let maze = Maze::parse_hex("f").unwrap();
        let document = render(&maze, None);
        assert!(document.contains(r#"viewBox="-0.075 -0.075 1.15 1.15""#));
    }

    #[test]
    fn single_cell_walls_in_sorted_order() {
        let maze = Maze::parse_hex("f").unwrap();
        let document = render(&maze, None);

        let expected = [
            r#"<line x1="0" y1="0" x2="1" y2="0" "#,
            r#"<line x1="0" y1="0" x2="0" y2="1" "#,
            r#"<line x1="1" y1="0" x2="1" y2="1" "#,
            r#"<line x1="0" y1="1" x2="1" y2="1" "#,
        ];
        let mut offset = 0;
        for line in expected {
            let found = document[offset..].find(line);
            assert!(found.is_some(), "missing or misplaced {line}");
            offset += found.unwrap();
        }
    }

    #[test]
    fn player_marker_is_optional() {
        let maze = Maze::parse_hex("739\n73a").unwrap();
        assert!(!render(&maze, None).contains("<circle"));

        let marked = render(&maze, Some(Point { row: 1, col: 2 }));
        assert!(marked.contains(r#"<circle cx="2.5" cy="1.5""#));
    }

    #[test]
    fn rendering_is_deterministic() {
        let maze = Maze::parse_hex(SAMPLE_MAZE).unwrap();
        assert_eq!(render(&maze, None), render(&maze, None));
    }
}
