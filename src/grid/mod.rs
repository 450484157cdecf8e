pub mod layout;
pub mod model;

pub use layout::{GridLayout, Rect, CELLS, COLUMNS, ROWS};
pub use model::{DayEntry, GridModel};

use crate::calendar::CalendarDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderCell {
    pub rect: Rect,
    pub weekday: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell<D> {
    pub rect: Rect,
    pub date: D,
    pub is_current_month: bool,
    pub is_selected: bool,
}

/// Everything a presenter needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<D> {
    pub headers: [HeaderCell; COLUMNS],
    pub days: Vec<GridCell<D>>,
    pub status: String,
}

impl<D: CalendarDate> Snapshot<D> {
    pub fn new(layout: &GridLayout, model: &GridModel<D>, status: String) -> Self {
        let mut headers = [HeaderCell {
            rect: Rect::default(),
            weekday: 0,
        }; COLUMNS];
        for (weekday, (header, rect)) in headers.iter_mut().zip(layout.headers()).enumerate() {
            *header = HeaderCell {
                rect: *rect,
                weekday,
            };
        }

        let days = layout
            .days()
            .iter()
            .zip(model.entries())
            .map(|(rect, entry)| GridCell {
                rect: *rect,
                date: entry.date,
                is_current_month: entry.is_current_month,
                is_selected: entry.is_selected,
            })
            .collect();

        Snapshot {
            headers,
            days,
            status,
        }
    }

    pub fn selected(&self) -> Option<&GridCell<D>> {
        self.days.iter().find(|cell| cell.is_selected)
    }
}
