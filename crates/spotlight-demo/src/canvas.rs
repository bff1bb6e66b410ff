//! ASCII rendering of an overlay frame.
//!
//! Each character cell samples the frame at its center. The backdrop is
//! shaded by opacity, the hole is left blank, and the dialog is drawn as a
//! boxed panel with its title, body, and action label.

use std::fmt;

use spotlight::{DialogContent, OverlayFrame, Point, Rect, Size};

/// Character grid covering the viewport.
#[derive(Debug, Clone)]
pub struct Canvas {
    cols: usize,
    rows: usize,
    cell: Size,
    cells: Vec<char>,
}

impl Canvas {
    /// Grid for `viewport`, one character per `cell`.
    pub fn new(viewport: Size, cell: Size) -> Self {
        let cols = cells_for(viewport.width, cell.width);
        let rows = cells_for(viewport.height, cell.height);
        Self {
            cols,
            rows,
            cell,
            cells: vec![' '; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Paint backdrop, hole, and dialog.
    pub fn draw(&mut self, frame: &OverlayFrame, content: &DialogContent) {
        let shade = shade_for(frame.backdrop_alpha);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let center = Point::new(
                    (col as f32 + 0.5) * self.cell.width,
                    (row as f32 + 0.5) * self.cell.height,
                );
                let ch = if frame.hole.contains(center) {
                    ' '
                } else {
                    shade
                };
                self.cells[row * self.cols + col] = ch;
            }
        }
        self.draw_dialog(frame.dialog, content);
    }

    fn draw_dialog(&mut self, rect: Rect, content: &DialogContent) {
        let Some((c0, r0, c1, r1)) = self.cell_span(rect) else {
            return;
        };
        for row in r0..=r1 {
            for col in c0..=c1 {
                let edge_row = row == r0 || row == r1;
                let edge_col = col == c0 || col == c1;
                let ch = match (edge_row, edge_col) {
                    (true, true) => '+',
                    (true, false) => '-',
                    (false, true) => '|',
                    (false, false) => ' ',
                };
                self.put(col, row, ch);
            }
        }

        let inner_width = (c1 - c0).saturating_sub(1);
        let mut lines: Vec<String> = Vec::new();
        if let Some(title) = &content.title {
            lines.push(title.clone());
        }
        lines.extend(wrap(&content.body, inner_width));
        if let Some(action) = &content.action {
            lines.push(format!("[ {} ]", action.label()));
        }
        for (offset, line) in lines.iter().enumerate() {
            let row = r0 + 1 + offset;
            if row >= r1 {
                break;
            }
            for (i, ch) in line.chars().take(inner_width).enumerate() {
                self.put(c0 + 1 + i, row, ch);
            }
        }
    }

    /// Inclusive cell range covered by `rect`, clipped to the grid.
    fn cell_span(&self, rect: Rect) -> Option<(usize, usize, usize, usize)> {
        if self.cols == 0 || self.rows == 0 || rect.is_empty() {
            return None;
        }
        let to_col = |x: f32| ((x / self.cell.width).floor().max(0.0) as usize).min(self.cols - 1);
        let to_row =
            |y: f32| ((y / self.cell.height).floor().max(0.0) as usize).min(self.rows - 1);
        let c0 = to_col(rect.x);
        let r0 = to_row(rect.y);
        let c1 = to_col((rect.right() - 0.01).max(rect.x));
        let r1 = to_row((rect.bottom() - 0.01).max(rect.y));
        Some((c0, r0, c1, r1))
    }

    fn put(&mut self, col: usize, row: usize, ch: char) {
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = ch;
        }
    }

    /// Rendered rows, top to bottom.
    pub fn lines(&self) -> Vec<String> {
        self.cells
            .chunks(self.cols.max(1))
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect()
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

fn cells_for(extent: f32, cell: f32) -> usize {
    if cell > 0.0 && extent > 0.0 {
        (extent / cell).ceil() as usize
    } else {
        0
    }
}

fn shade_for(alpha: f32) -> char {
    match alpha {
        a if a <= 0.0 => ' ',
        a if a < 0.45 => '.',
        a if a < 0.7 => ':',
        _ => '#',
    }
}

/// Greedy word wrap.
fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.len()
        } else {
            current.len() + 1 + word.len()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use spotlight::{FadePhase, Outline, RenderTarget};

    fn frame(alpha: f32) -> OverlayFrame {
        OverlayFrame {
            target: RenderTarget::new(1, 0),
            hole: Outline::RoundedRect {
                rect: Rect::new(16.0, 16.0, 32.0, 32.0),
                radius: 0.0,
            },
            dialog: Rect::new(0.0, 64.0, 80.0, 64.0),
            backdrop_alpha: alpha,
            phase: FadePhase::Visible,
        }
    }

    #[test]
    fn grid_covers_viewport() {
        let canvas = Canvas::new(Size::new(100.0, 50.0), Size::new(8.0, 16.0));
        assert_eq!(canvas.cols(), 13);
        assert_eq!(canvas.rows(), 4);
    }

    #[test]
    fn hole_is_clear_and_backdrop_is_shaded() {
        let mut canvas = Canvas::new(Size::new(80.0, 128.0), Size::new(8.0, 16.0));
        canvas.draw(&frame(0.6), &DialogContent::new("Hi"));
        let lines = canvas.lines();
        assert!(lines[0].starts_with(":::"));
        // Row 1 samples y = 24, inside the hole for x in 16..48.
        assert_eq!(&lines[1][..2], "::");
        assert_eq!(&lines[1][2..6], "    ");
        assert!(lines[4].starts_with("+--"));
        assert!(lines[5].contains("Hi"));
    }

    #[test]
    fn shading_tracks_alpha() {
        assert_eq!(shade_for(0.0), ' ');
        assert_eq!(shade_for(0.3), '.');
        assert_eq!(shade_for(0.6), ':');
        assert_eq!(shade_for(0.8), '#');
    }

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(
            wrap("the quick brown fox", 9),
            vec!["the quick".to_string(), "brown fox".to_string()]
        );
        assert!(wrap("anything", 0).is_empty());
    }
}
