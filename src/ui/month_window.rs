use unsegen::base::*;
use unsegen::widget::*;

use super::screen::{Field, Stepper};
use super::{Context, Theme};
use crate::grid::{GridCell, Rect};
use crate::hebrew::{Formatter, JewishDate};

/// Writes `text` centered into `rect`, padding every row of it with the
/// cursor's style so the whole rectangle gets painted.
fn paint(window: &mut Window, rect: Rect, text: &str, style: StyleModifier) {
    if rect.is_empty() {
        return;
    }

    let width = rect.width as usize;
    let blank = " ".repeat(width);
    let mut cursor = Cursor::new(window).style_modifier(style);

    for row in 0..rect.height {
        cursor.move_to(
            ColIndex::new(rect.x as i32),
            RowIndex::new((rect.y + row) as i32),
        );
        if row == rect.height / 2 {
            let label: String = text.chars().take(width).collect();
            cursor.write(&format!("{:^width$}", label, width = width));
        } else {
            cursor.write(&blank);
        }
    }
}

fn field_label(formatter: &Formatter, field: Field, date: &JewishDate) -> String {
    match field {
        Field::Day => formatter.day(date),
        Field::Month => formatter.month(date),
        Field::Year => formatter.year(date),
    }
}

pub struct MonthWindow<'a> {
    context: &'a Context,
}

impl<'a> MonthWindow<'a> {
    pub fn new(context: &'a Context) -> Self {
        MonthWindow { context }
    }

    fn draw_steppers(&self, window: &mut Window, theme: &Theme) {
        let selected = self.context.selected();

        for Stepper {
            field,
            next,
            label,
            prev,
        } in self.context.screen().steppers().iter()
        {
            let text = field_label(self.context.formatter(), *field, &selected);
            paint(window, *next, ">", theme.bar_style);
            paint(window, *label, &text, theme.bar_style);
            paint(window, *prev, "<", theme.bar_style);
        }
    }

    fn draw_day(&self, window: &mut Window, cell: &GridCell<JewishDate>, theme: &Theme) {
        let style = if cell.is_selected {
            theme.focus_day_style
        } else if cell.is_current_month {
            theme.day_style
        } else {
            theme.other_month_style
        };

        let mut label = self.context.formatter().day(&cell.date);
        if self.context.today() == Some(cell.date) {
            if let Some(mark) = theme.today_day_char {
                label.push(mark);
            }
        }

        paint(window, cell.rect, &label, style);
    }

    fn draw_status(&self, window: &mut Window, status: &str, theme: &Theme) {
        let area = self.context.screen().status();

        for (row, line) in (0..area.height).zip(status.lines()) {
            let line_rect = Rect::new(area.x, area.y + row, area.width, 1);
            paint(window, line_rect, line, theme.status_style);
        }
    }
}

impl Widget for MonthWindow<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::at_least(7),
            height: RowDemand::at_least(1),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = &self.context.theme;
        let snapshot = self.context.snapshot();

        self.draw_steppers(&mut window, theme);

        for header in snapshot.headers.iter() {
            let name = self.context.formatter().weekday(header.weekday);
            paint(&mut window, header.rect, name, theme.header_style);
        }

        for cell in snapshot.days.iter() {
            self.draw_day(&mut window, cell, theme);
        }

        self.draw_status(&mut window, &snapshot.status, theme);
    }
}
