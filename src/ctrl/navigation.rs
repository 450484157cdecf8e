use chrono::{Local, NaiveDate};

use crate::calendar::{Bound, CalendarDate, ValidRange};
use crate::error::{Error, ErrorKind, Result};
use crate::grid::GridModel;

/// Arrow directions on a grid read right to left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn day_delta(&self) -> i64 {
        match self {
            Direction::Up => -7,
            Direction::Down => 7,
            Direction::Left => 1,
            Direction::Right => -1,
        }
    }
}

/// What a transition did to the selection.
#[derive(Debug)]
pub enum Outcome {
    Committed,
    /// The candidate left the valid range and the bound was taken instead.
    Clamped(Bound),
    Unchanged,
    /// The candidate could not be built; the previous selection stays.
    Discarded(Error),
}

impl Outcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Outcome::Committed | Outcome::Clamped(_))
    }

    pub fn is_discarded(&self) -> bool {
        matches!(self, Outcome::Discarded(_))
    }
}

pub struct NavigationController<D: CalendarDate> {
    range: ValidRange<D>,
    model: GridModel<D>,
}

impl<D: CalendarDate> NavigationController<D> {
    pub fn new(initial: D, range: ValidRange<D>) -> Result<Self> {
        let (selected, _) = range.clamp(initial);
        let model = GridModel::build(selected)?;

        Ok(NavigationController { range, model })
    }

    pub fn selected(&self) -> D {
        self.model.selected()
    }

    pub fn selected_cell_index(&self) -> usize {
        self.model.selected_index()
    }

    pub fn model(&self) -> &GridModel<D> {
        &self.model
    }

    pub fn step_days(&mut self, n: i64) -> Outcome {
        if n == 0 {
            return Outcome::Unchanged;
        }

        let candidate = self.selected().add_days(n);
        self.commit(candidate)
    }

    pub fn step_year(&mut self, delta: i32) -> Outcome {
        if delta == 0 {
            return Outcome::Unchanged;
        }

        let current = self.selected();
        let candidate = match current.year().checked_add(delta) {
            Some(year) => D::from_ymd(year, current.month(), current.day()),
            None => Err(Error::new(
                ErrorKind::OutOfSupportedRange,
                &format!("cannot move {} years from {}", delta, current.year()),
            )),
        };
        self.commit(candidate)
    }

    /// Moves one month per unit of `delta`, stopping at the first month that
    /// cannot be built or that leaves the range. Only the month reached is
    /// committed.
    pub fn step_month(&mut self, delta: i32) -> Outcome {
        if delta == 0 {
            return Outcome::Unchanged;
        }

        let step: fn(D) -> Result<D> = if delta > 0 { month_after } else { month_before };
        let mut date = self.selected();

        for _ in 0..delta.unsigned_abs() {
            match step(date) {
                Ok(next) if self.range.contains(&next) => date = next,
                Ok(next) => return self.commit(Ok(next)),
                Err(err) => {
                    if date != self.selected() {
                        self.commit(Ok(date));
                    }
                    return self.commit(Err(err));
                }
            }
        }

        self.commit(Ok(date))
    }

    pub fn set_date(&mut self, year: i32, month: u8, day: u8) -> Outcome {
        self.commit(D::from_ymd(year, month, day))
    }

    pub fn select(&mut self, date: D) -> Outcome {
        self.commit(Ok(date))
    }

    pub fn set_gregorian(&mut self, date: NaiveDate) -> Outcome {
        self.commit(D::from_gregorian(date))
    }

    pub fn select_today(&mut self) -> Outcome {
        self.set_gregorian(Local::now().date_naive())
    }

    pub fn on_key(&mut self, direction: Direction) -> Outcome {
        self.step_days(direction.day_delta())
    }

    /// Moves the selection to the day shown in cell `cell_index` of the
    /// current grid.
    pub fn resolve_click(&mut self, cell_index: usize) -> Outcome {
        if self.model.date_at(cell_index).is_none() {
            return Outcome::Discarded(Error::new(
                ErrorKind::OutOfSupportedRange,
                &format!("no grid cell {}", cell_index),
            ));
        }

        self.step_days(cell_index as i64 - self.selected_cell_index() as i64)
    }

    fn commit(&mut self, candidate: Result<D>) -> Outcome {
        let candidate = match candidate {
            Ok(date) => date,
            Err(err) => {
                log::debug!("Discarding step from {:?}: {}", self.selected(), err);
                return Outcome::Discarded(err);
            }
        };

        let (date, bound) = self.range.clamp(candidate);

        match GridModel::build(date) {
            Ok(model) => self.model = model,
            Err(err) => {
                log::warn!("Could not build grid for {:?}: {}", date, err);
                return Outcome::Discarded(err);
            }
        }

        match bound {
            Some(bound) => {
                log::debug!("Clamped {:?} to {:?}", candidate, date);
                Outcome::Clamped(bound)
            }
            None => Outcome::Committed,
        }
    }
}

// Tishrei (7) opens a new year; the month after the last one is Nissan.
// Both rules are checked on their own.
fn month_after<D: CalendarDate>(current: D) -> Result<D> {
    let mut year = current.year();
    let mut month = current.month() + 1;
    if month == 7 {
        year += 1;
    }
    if month == current.months_in_year() + 1 {
        month = 1;
    }

    D::from_ymd(year, month, current.day())
}

fn month_before<D: CalendarDate>(current: D) -> Result<D> {
    let mut year = current.year();
    let mut month = current.month() - 1;
    if month == 6 {
        year -= 1;
    }
    if month == 0 {
        month = current.months_in_year();
    }

    D::from_ymd(year, month, current.day())
}
