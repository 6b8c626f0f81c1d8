/// ASCII line rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wire3d_core::{Edge, ScreenPoint};

const VERTEX_MARK: char = 'o';

/// Renderer that draws projected edges as terminal characters
pub struct LineRenderer {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
}

impl LineRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            char_buffer: vec![' '; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
    }

    /// Character at a cell, `None` outside the buffer
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    fn plot(&mut self, x: i32, y: i32, character: char) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        // endpoints win over line strokes
        if self.char_buffer[idx] != VERTEX_MARK {
            self.char_buffer[idx] = character;
        }
    }

    /// Draw a line with Bresenham's algorithm, clipping per cell
    pub fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint) {
        let character = stroke(to.x - from.x, to.y - from.y);

        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (from.x, from.y);

        loop {
            self.plot(x, y, character);
            if x == to.x && y == to.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw every edge between its projected endpoints, then mark the endpoints
    pub fn render_edges(&mut self, edges: &[Edge], points: &[ScreenPoint]) {
        for edge in edges {
            self.draw_line(points[usize::from(edge.a)], points[usize::from(edge.b)]);
        }
        for edge in edges {
            for index in [edge.a, edge.b] {
                let point = points[usize::from(index)];
                self.plot(point.x, point.y, VERTEX_MARK);
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in self.char_buffer.chunks(self.width.max(1)) {
            for &c in row {
                let color = match c {
                    VERTEX_MARK => Color::Yellow,
                    ' ' => Color::DarkGrey,
                    _ => Color::Cyan,
                };
                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Pick a stroke character from the line's slope (screen y points down)
fn stroke(dx: i32, dy: i32) -> char {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ay * 2 < ax {
        '-'
    } else if ax * 2 < ay {
        '|'
    } else if (dx > 0) == (dy > 0) {
        '\\'
    } else {
        '/'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: i32, y: i32) -> ScreenPoint {
        ScreenPoint { x, y }
    }

    fn row(renderer: &LineRenderer, y: usize) -> String {
        (0..renderer.width())
            .map(|x| renderer.cell(x, y).unwrap_or('?'))
            .collect()
    }

    #[test]
    fn test_horizontal_line() {
        let mut renderer = LineRenderer::new(8, 3);
        renderer.draw_line(point(1, 1), point(5, 1));
        assert_eq!(row(&renderer, 1), " -----  ");
        assert_eq!(row(&renderer, 0), "        ");
    }

    #[test]
    fn test_stroke_characters() {
        assert_eq!(stroke(10, 0), '-');
        assert_eq!(stroke(0, -7), '|');
        assert_eq!(stroke(5, 5), '\\');
        assert_eq!(stroke(-5, -5), '\\');
        assert_eq!(stroke(5, -5), '/');
    }

    #[test]
    fn test_lines_are_clipped() {
        let mut renderer = LineRenderer::new(4, 4);
        renderer.draw_line(point(-10, -10), point(20, 20));
        assert_eq!(renderer.cell(0, 0), Some('\\'));
        assert_eq!(renderer.cell(3, 3), Some('\\'));
        assert_eq!(renderer.cell(4, 4), None);
    }

    #[test]
    fn test_render_edges_marks_vertices() {
        let mut renderer = LineRenderer::new(6, 6);
        let points = [point(0, 0), point(5, 0), point(5, 5)];
        renderer.render_edges(&[Edge::new(0, 1), Edge::new(1, 2)], &points);
        assert_eq!(row(&renderer, 0), "o----o");
        assert_eq!(renderer.cell(5, 3), Some('|'));
        assert_eq!(renderer.cell(5, 5), Some('o'));
        assert_eq!(renderer.cell(0, 5), Some(' '));

        renderer.clear();
        assert_eq!(row(&renderer, 0), "      ");
    }

    #[test]
    fn test_draw_writes_every_row() {
        let mut renderer = LineRenderer::new(3, 2);
        renderer.draw_line(point(0, 0), point(2, 0));
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("\r\n").count(), 2);
        assert!(text.contains('-'));
    }
}
