//! Bar sparkline widget for hourly series

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Block characters for partial cell heights (8 levels)
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Vertical bars, one column per sample, scaled between fixed bounds.
///
/// Missing samples leave their column empty.
pub struct BarSparkline<'a> {
    values: &'a [Option<f64>],
    min: f64,
    max: f64,
    /// Columns per sample
    bar_width: u16,
    style: Style,
}

impl<'a> BarSparkline<'a> {
    pub fn new(values: &'a [Option<f64>], min: f64, max: f64) -> Self {
        Self {
            values,
            min,
            max,
            bar_width: 1,
            style: Style::default().fg(Color::Cyan),
        }
    }

    pub fn bar_width(mut self, width: u16) -> Self {
        self.bar_width = width.max(1);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Bar height in eighths of a cell for a given area height
    fn eighths(&self, value: f64, rows: u16) -> u32 {
        let span = self.max - self.min;
        if !value.is_finite() || span <= 0.0 {
            return 0;
        }
        let normalized = ((value - self.min) / span).clamp(0.0, 1.0);
        (normalized * f64::from(rows) * 8.0).round() as u32
    }
}

impl<'a> Widget for BarSparkline<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let slots = (area.width / self.bar_width) as usize;
        for (i, value) in self.values.iter().take(slots).enumerate() {
            let Some(value) = value else { continue };
            let mut remaining = self.eighths(*value, area.height);
            for row in 0..area.height {
                if remaining == 0 {
                    break;
                }
                let level = remaining.min(8);
                remaining -= level;
                let y = area.bottom() - 1 - row;
                for dx in 0..self.bar_width {
                    let x = area.x + i as u16 * self.bar_width + dx;
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_char(BLOCKS[level as usize - 1]).set_style(self.style);
                    }
                }
            }
        }
    }
}
