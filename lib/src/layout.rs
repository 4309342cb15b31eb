use crate::field::approach;
use crate::panel::Bounds;

pub const MEDIUM_BREAKPOINT: u32 = 768;
pub const LARGE_BREAKPOINT: u32 = 1024;

/// Column counts for narrow, medium and large viewports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Columns {
    pub base: usize,
    pub medium: usize,
    pub large: usize,
}

impl Columns {
    pub const SKILLS: Columns = Columns::new(1, 4, 4);
    pub const PROJECTS: Columns = Columns::new(1, 2, 3);
    pub const SPLIT: Columns = Columns::new(1, 2, 2);

    pub const fn new(base: usize, medium: usize, large: usize) -> Self {
        Self {
            base,
            medium,
            large,
        }
    }
}

pub fn grid_columns(width: u32, columns: Columns) -> usize {
    let count = if width >= LARGE_BREAKPOINT {
        columns.large
    } else if width >= MEDIUM_BREAKPOINT {
        columns.medium
    } else {
        columns.base
    };
    count.max(1)
}

/// Lays `count` equal cells out row by row inside `area`, starting at its top.
pub fn grid(area: Bounds, count: usize, columns: usize, gap: f32, row_height: f32) -> Vec<Bounds> {
    let columns = columns.max(1);
    let width = ((area.width - gap * (columns - 1) as f32) / columns as f32).max(0.0);
    (0..count)
        .map(|i| {
            let (row, col) = (i / columns, i % columns);
            Bounds::new(
                area.left + col as f32 * (width + gap),
                area.top + row as f32 * (row_height + gap),
                width,
                row_height,
            )
        })
        .collect()
}

/// Height taken by [`grid`] for the same arguments.
pub fn grid_height(count: usize, columns: usize, gap: f32, row_height: f32) -> f32 {
    let rows = count.div_ceil(columns.max(1));
    if rows == 0 {
        0.0
    } else {
        rows as f32 * row_height + (rows - 1) as f32 * gap
    }
}

/// Centered column no wider than `max_width`, with `padding` on narrow screens.
pub fn content_column(viewport_width: f32, max_width: f32, padding: f32) -> (f32, f32) {
    let width = (viewport_width - padding * 2.0).clamp(0.0, max_width);
    ((viewport_width - width) / 2.0, width)
}

/// Largest rectangle with the picture's aspect ratio, centered in `area`.
pub fn contain(area: Bounds, width: u32, height: u32) -> Bounds {
    if width == 0 || height == 0 {
        return Bounds::new(area.left, area.top, 0.0, 0.0);
    }
    let scale = (area.width / width as f32).min(area.height / height as f32);
    let (w, h) = (width as f32 * scale, height as f32 * scale);
    let left = area.left + (area.width - w) / 2.0;
    let top = area.top + (area.height - h) / 2.0;
    Bounds::new(left, top, w, h)
}

pub const SCROLL_SMOOTHING: f32 = 0.15;

/// Vertical page offset with eased jumps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scroller {
    offset: f32,
    target: f32,
    max: f32,
}

impl Default for Scroller {
    fn default() -> Self {
        Self::new()
    }
}

impl Scroller {
    pub fn new() -> Self {
        Self {
            offset: 0.0,
            target: 0.0,
            max: 0.0,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Page height minus viewport height.
    pub fn set_extent(&mut self, content_height: f32, viewport_height: f32) {
        self.max = (content_height - viewport_height).max(0.0);
        self.target = self.target.clamp(0.0, self.max);
        self.offset = self.offset.clamp(0.0, self.max);
    }

    /// Wheel input; moves immediately.
    pub fn scroll_by(&mut self, delta: f32) {
        self.target = (self.target + delta).clamp(0.0, self.max);
        self.offset = self.target;
    }

    /// Eased jump, finished by repeated [`tick`](Self::tick).
    pub fn scroll_to(&mut self, y: f32) {
        self.target = y.clamp(0.0, self.max);
    }

    pub fn reset(&mut self) {
        self.offset = 0.0;
        self.target = 0.0;
    }

    pub fn tick(&mut self) {
        self.offset = approach(self.offset, self.target, SCROLL_SMOOTHING);
        if (self.target - self.offset).abs() < 0.5 {
            self.offset = self.target;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoints_pick_columns() {
        assert_eq!(grid_columns(500, Columns::PROJECTS), 1);
        assert_eq!(grid_columns(768, Columns::PROJECTS), 2);
        assert_eq!(grid_columns(1023, Columns::PROJECTS), 2);
        assert_eq!(grid_columns(1024, Columns::PROJECTS), 3);
        assert_eq!(grid_columns(900, Columns::SKILLS), 4);
    }

    #[test]
    fn grid_places_row_major() {
        let cells = grid(Bounds::new(10.0, 20.0, 220.0, 0.0), 5, 2, 20.0, 50.0);
        assert_eq!(cells.len(), 5);
        assert_eq!(cells[0], Bounds::new(10.0, 20.0, 100.0, 50.0));
        assert_eq!(cells[1], Bounds::new(130.0, 20.0, 100.0, 50.0));
        assert_eq!(cells[4], Bounds::new(10.0, 160.0, 100.0, 50.0));
        assert_eq!(grid_height(5, 2, 20.0, 50.0), 190.0);
        assert_eq!(grid_height(0, 2, 20.0, 50.0), 0.0);
    }

    #[test]
    fn column_is_centered_and_capped() {
        assert_eq!(content_column(1400.0, 1000.0, 16.0), (200.0, 1000.0));
        assert_eq!(content_column(400.0, 1000.0, 16.0), (16.0, 368.0));
    }

    #[test]
    fn contain_letterboxes() {
        let area = Bounds::new(0.0, 0.0, 200.0, 100.0);
        let square = contain(area, 100, 100);
        assert_eq!(square, Bounds::new(50.0, 0.0, 100.0, 100.0));
        let wide = contain(area, 400, 100);
        assert_eq!(wide, Bounds::new(0.0, 25.0, 200.0, 50.0));
        assert_eq!(contain(area, 0, 10).width, 0.0);
    }

    #[test]
    fn scroller_eases_to_target_without_overshoot() {
        let mut scroller = Scroller::new();
        scroller.set_extent(2000.0, 500.0);
        scroller.scroll_to(600.0);
        let mut last = scroller.offset();
        for _ in 0..200 {
            scroller.tick();
            assert!(scroller.offset() >= last);
            assert!(scroller.offset() <= 600.0);
            last = scroller.offset();
        }
        assert_eq!(scroller.offset(), 600.0);
    }

    #[test]
    fn scroller_clamps_to_extent() {
        let mut scroller = Scroller::new();
        scroller.set_extent(800.0, 500.0);
        scroller.scroll_by(1000.0);
        assert_eq!(scroller.offset(), 300.0);
        scroller.scroll_by(-1000.0);
        assert_eq!(scroller.offset(), 0.0);
        scroller.set_extent(100.0, 500.0);
        scroller.scroll_to(50.0);
        assert_eq!(scroller.target(), 0.0);
    }
}
