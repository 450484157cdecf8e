use derive_more::Constructor;

pub const COLUMNS: usize = 7;
pub const ROWS: usize = 6;
pub const HEADER_ROWS: usize = 1;
pub const CELLS: usize = COLUMNS * ROWS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Constructor)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Half-open hit test, so neighbouring cells never both claim a point and
    /// empty rects claim nothing.
    pub fn contains(&self, x: u16, y: u16) -> bool {
        let (x, y) = (x as u32, y as u32);
        x >= self.x as u32
            && x < self.x as u32 + self.width as u32
            && y >= self.y as u32
            && y < self.y as u32 + self.height as u32
    }
}

/// Geometry of the 7 header cells and 42 day cells.
///
/// Columns run right to left: day cell 0 sits in the top right corner and
/// cell `row * 7 + (6 - column)` in screen column `column` of day row `row`.
/// Header cells are keyed by weekday, so header 0 is the rightmost one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    headers: [Rect; COLUMNS],
    days: [Rect; CELLS],
}

impl GridLayout {
    pub fn compute(width: u16, height: u16, origin_x: u16, origin_y: u16) -> Self {
        let cell_width = width / COLUMNS as u16;
        let cell_height = height / (ROWS + HEADER_ROWS) as u16;

        let rect_at = |row: usize, column: usize| {
            Rect::new(
                origin_x.saturating_add(column as u16 * cell_width),
                origin_y.saturating_add(row as u16 * cell_height),
                cell_width,
                cell_height,
            )
        };

        let mut headers = [Rect::default(); COLUMNS];
        let mut days = [Rect::default(); CELLS];

        for row in 0..(ROWS + HEADER_ROWS) {
            for column in (0..COLUMNS).rev() {
                let rect = rect_at(row, column);
                if row < HEADER_ROWS {
                    headers[COLUMNS - 1 - column] = rect;
                } else {
                    days[(row - HEADER_ROWS) * COLUMNS + (COLUMNS - 1 - column)] = rect;
                }
            }
        }

        GridLayout { headers, days }
    }

    pub fn headers(&self) -> &[Rect; COLUMNS] {
        &self.headers
    }

    pub fn days(&self) -> &[Rect; CELLS] {
        &self.days
    }

    pub fn is_degenerate(&self) -> bool {
        self.days[0].is_empty()
    }

    /// Index of the day cell under `(x, y)`.
    pub fn cell_at(&self, x: u16, y: u16) -> Option<usize> {
        if self.is_degenerate() {
            return None;
        }

        self.days.iter().position(|rect| rect.contains(x, y))
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        GridLayout::compute(0, 0, 0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_run_right_to_left() {
        let layout = GridLayout::compute(70, 70, 0, 0);

        assert_eq!(layout.headers()[0], Rect::new(60, 0, 10, 10));
        assert_eq!(layout.headers()[6], Rect::new(0, 0, 10, 10));

        assert_eq!(layout.days()[0], Rect::new(60, 10, 10, 10));
        assert_eq!(layout.days()[6], Rect::new(0, 10, 10, 10));
        assert_eq!(layout.days()[7], Rect::new(60, 20, 10, 10));
        assert_eq!(layout.days()[41], Rect::new(0, 60, 10, 10));
    }

    #[test]
    fn origin_offsets_every_cell() {
        let layout = GridLayout::compute(35, 14, 3, 1);

        assert_eq!(layout.headers()[0], Rect::new(33, 1, 5, 2));
        assert_eq!(layout.days()[8], Rect::new(28, 5, 5, 2));
    }

    #[test]
    fn hit_test_inverts_layout() {
        let layout = GridLayout::compute(71, 45, 2, 4);

        for (idx, rect) in layout.days().iter().enumerate() {
            assert_eq!(layout.cell_at(rect.x, rect.y), Some(idx));
            assert_eq!(
                layout.cell_at(rect.x + rect.width - 1, rect.y + rect.height - 1),
                Some(idx)
            );
        }

        // header row and the unused remainder column
        assert_eq!(layout.cell_at(10, 5), None);
        assert_eq!(layout.cell_at(2 + 70, 20), None);
    }

    #[test]
    fn zero_size_is_degenerate() {
        let layout = GridLayout::compute(0, 30, 0, 0);

        assert!(layout.is_degenerate());
        assert!(layout.days().iter().all(Rect::is_empty));
        assert_eq!(layout.cell_at(0, 0), None);

        assert!(GridLayout::compute(30, 0, 5, 5).is_degenerate());
    }
}
