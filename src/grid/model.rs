use super::layout::CELLS;
use crate::calendar::CalendarDate;
use crate::error::{Error, ErrorKind, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayEntry<D> {
    pub date: D,
    pub is_current_month: bool,
    pub is_selected: bool,
}

/// The 42 consecutive days shown for the month of a selected date, in cell
/// index order.
///
/// Always rebuilt from scratch; a model is a pure function of the selected
/// date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridModel<D> {
    entries: Vec<DayEntry<D>>,
    selected_index: usize,
}

impl<D: CalendarDate> GridModel<D> {
    pub fn build(selected: D) -> Result<Self> {
        let anchor = D::from_ymd(selected.year(), selected.month(), 1)?;
        let mut date = anchor.add_days(-(anchor.day_of_week() as i64 - 1))?;

        let mut entries = Vec::with_capacity(CELLS);
        for idx in 0..CELLS {
            if idx > 0 {
                date = date.forward()?;
            }

            entries.push(DayEntry {
                date,
                is_current_month: date.month() == selected.month(),
                is_selected: date == selected,
            });
        }

        let selected_index = entries
            .iter()
            .position(|entry| entry.is_selected)
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidDateConstruction,
                    &format!("{:?} does not fall into its own month grid", selected),
                )
            })?;

        Ok(GridModel {
            entries,
            selected_index,
        })
    }

    pub fn entries(&self) -> &[DayEntry<D>] {
        &self.entries
    }

    pub fn first(&self) -> D {
        self.entries[0].date
    }

    pub fn selected(&self) -> D {
        self.entries[self.selected_index].date
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn date_at(&self, idx: usize) -> Option<D> {
        self.entries.get(idx).map(|entry| entry.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hebrew::JewishDate;
    use itertools::Itertools;

    fn ymd(year: i32, month: u8, day: u8) -> JewishDate {
        JewishDate::new(year, month, day).expect("valid test date")
    }

    fn samples() -> Vec<JewishDate> {
        vec![
            ymd(5784, 7, 1),
            ymd(5784, 12, 30),
            ymd(5784, 13, 14),
            ymd(5785, 8, 30),
            ymd(5785, 1, 15),
            ymd(5786, 6, 29),
            ymd(3761, 11, 1),
            ymd(9999, 6, 29),
        ]
    }

    #[test]
    fn grid_is_six_consecutive_weeks() {
        for selected in samples() {
            let model = GridModel::build(selected).unwrap();
            let entries = model.entries();

            assert_eq!(entries.len(), 42);
            assert_eq!(model.first().day_of_week(), 1, "{}", selected);
            for (a, b) in entries.iter().tuple_windows() {
                assert_eq!(a.date.forward().unwrap(), b.date);
            }

            let selected_cells: Vec<_> = entries.iter().positions(|e| e.is_selected).collect();
            assert_eq!(selected_cells, vec![model.selected_index()]);
            assert_eq!(model.selected(), selected);
        }
    }

    #[test]
    fn current_month_cells_are_contiguous() {
        for selected in samples() {
            let model = GridModel::build(selected).unwrap();
            let members: Vec<usize> = model
                .entries()
                .iter()
                .positions(|e| e.is_current_month)
                .collect();

            assert_eq!(members.len(), selected.days_in_month() as usize);
            assert!(members.iter().tuple_windows().all(|(a, b)| a + 1 == *b));
            assert_eq!(model.date_at(members[0]).unwrap().day(), 1);
        }
    }

    #[test]
    fn first_cell_of_known_month() {
        // 1 Tishrei 5784 is a Saturday, so the grid opens on the Sunday before
        let model = GridModel::build(ymd(5784, 7, 10)).unwrap();

        assert_eq!(model.first(), ymd(5783, 6, 24));
        assert_eq!(model.date_at(6), Some(ymd(5784, 7, 1)));
        assert_eq!(model.selected_index(), 15);
        assert_eq!(model.date_at(42), None);
    }

    #[test]
    fn month_starting_on_sunday_opens_the_grid() {
        // 1 Nissan 5785 is a Sunday
        let model = GridModel::build(ymd(5785, 1, 20)).unwrap();

        assert_eq!(model.first(), ymd(5785, 1, 1));
        assert_eq!(model.selected_index(), 19);
    }

    #[test]
    fn rebuilding_from_the_selected_cell_is_stable() {
        for selected in samples() {
            let model = GridModel::build(selected).unwrap();
            let again = GridModel::build(model.selected()).unwrap();

            assert_eq!(model, again);
        }
    }
}
