use crate::grid::{GridLayout, Rect};

pub const BAR_ROWS: u16 = 1;
pub const STATUS_ROWS: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Day,
    Month,
    Year,
}

/// One `> label <` group of the step bar. The forward arrow is on the left,
/// matching the right to left grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stepper {
    pub field: Field,
    pub next: Rect,
    pub label: Rect,
    pub prev: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Cell(usize),
    Step(Field, i32),
}

/// Where everything goes on a surface of the given size: the step bar on
/// top, the grid below it and the status lines at the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    steppers: [Stepper; 3],
    grid: GridLayout,
    status: Rect,
}

impl Screen {
    pub fn compute(width: u16, height: u16) -> Self {
        let segment = width / 3;

        let stepper = |position: u16, field: Field| {
            if segment < 3 {
                return Stepper {
                    field,
                    next: Rect::default(),
                    label: Rect::default(),
                    prev: Rect::default(),
                };
            }

            let x = position * segment;
            Stepper {
                field,
                next: Rect::new(x, 0, 1, BAR_ROWS),
                label: Rect::new(x + 1, 0, segment - 2, BAR_ROWS),
                prev: Rect::new(x + segment - 1, 0, 1, BAR_ROWS),
            }
        };

        // day on the right, year on the left
        let steppers = [
            stepper(2, Field::Day),
            stepper(1, Field::Month),
            stepper(0, Field::Year),
        ];

        let grid_height = height.saturating_sub(BAR_ROWS + STATUS_ROWS);
        let status_y = BAR_ROWS + grid_height;

        Screen {
            steppers,
            grid: GridLayout::compute(width, grid_height, 0, BAR_ROWS),
            status: Rect::new(
                0,
                status_y,
                width,
                STATUS_ROWS.min(height.saturating_sub(status_y)),
            ),
        }
    }

    pub fn steppers(&self) -> &[Stepper; 3] {
        &self.steppers
    }

    pub fn grid(&self) -> &GridLayout {
        &self.grid
    }

    pub fn status(&self) -> Rect {
        self.status
    }

    pub fn hit(&self, x: u16, y: u16) -> Option<Target> {
        for stepper in self.steppers.iter() {
            if stepper.next.contains(x, y) {
                return Some(Target::Step(stepper.field, 1));
            }
            if stepper.prev.contains(x, y) {
                return Some(Target::Step(stepper.field, -1));
            }
        }

        self.grid.cell_at(x, y).map(Target::Cell)
    }
}

impl Default for Screen {
    fn default() -> Self {
        Screen::compute(0, 0)
    }
}
