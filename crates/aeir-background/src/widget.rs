//! Terminal presentation of a [`Raster`].

use aeir_core::Viewport;
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::raster::Raster;

/// Glyph whose foreground paints the top half of a cell.
const UPPER_HALF_BLOCK: &str = "▀";

/// Pixel viewport covered by a block of terminal cells: each cell is one
/// pixel wide and two pixels tall.
pub fn viewport_for_cells(cols: u16, rows: u16) -> Viewport {
    Viewport::new(cols as u32, rows as u32 * 2)
}

/// Draws a raster with half-block characters.
#[derive(Debug, Clone, Copy)]
pub struct RasterView<'a> {
    raster: &'a Raster,
}

impl<'a> RasterView<'a> {
    pub fn new(raster: &'a Raster) -> Self {
        Self { raster }
    }
}

impl Widget for RasterView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for col in 0..area.width {
                let upper = self.raster.pixel(col as u32, row as u32 * 2);
                let lower = self.raster.pixel(col as u32, row as u32 * 2 + 1);
                if upper.is_none() && lower.is_none() {
                    continue;
                }
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(UPPER_HALF_BLOCK)
                        .set_fg(upper.map_or(Color::Reset, Color::from))
                        .set_bg(lower.map_or(Color::Reset, Color::from));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::surface::{Paint, RectF, Surface};

    #[test]
    fn test_viewport_for_cells() {
        assert_eq!(viewport_for_cells(80, 24), Viewport::new(80, 48));
    }

    #[test]
    fn test_cells_split_pixel_pairs() {
        let mut raster = Raster::new(2, 2);
        raster.fill_rect(RectF::new(0.0, 0.0, 2.0, 1.0), &Paint::Solid(Rgba::WHITE));
        raster.fill_rect(
            RectF::new(0.0, 1.0, 2.0, 1.0),
            &Paint::Solid(Rgba::opaque(0, 0, 255)),
        );

        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        RasterView::new(&raster).render(area, &mut buf);

        let cell = &buf[(1, 0)];
        assert_eq!(cell.symbol(), UPPER_HALF_BLOCK);
        assert_eq!(cell.fg, Color::Rgb(255, 255, 255));
        assert_eq!(cell.bg, Color::Rgb(0, 0, 255));
    }

    #[test]
    fn test_cells_beyond_raster_are_untouched() {
        let raster = Raster::new(1, 1);
        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(area);
        RasterView::new(&raster).render(area, &mut buf);

        assert_eq!(buf[(0, 0)].symbol(), UPPER_HALF_BLOCK);
        assert_eq!(buf[(0, 0)].bg, Color::Reset);
        assert_eq!(buf[(2, 1)].symbol(), " ");
    }
}
