use std::fmt::Write;

use crate::grid::{Snapshot, COLUMNS};
use crate::hebrew::{Formatter, JewishDate};

const CELL_WIDTH: usize = 6;

/// Renders the month around the selection as plain text, first weekday on
/// the right. The selected day is bracketed, days of the neighbouring months
/// are parenthesized.
pub fn render(snapshot: &Snapshot<JewishDate>, formatter: &Formatter) -> String {
    let mut out = String::new();

    for column in (0..COLUMNS).rev() {
        let _ = write!(out, "{:^width$}", formatter.weekday(column), width = CELL_WIDTH);
    }
    out.push('\n');

    for week in snapshot.days.chunks(COLUMNS) {
        for cell in week.iter().rev() {
            let day = formatter.day(&cell.date);
            let label = if cell.is_selected {
                format!("[{}]", day)
            } else if !cell.is_current_month {
                format!("({})", day)
            } else {
                day
            };
            let _ = write!(out, "{:^width$}", label, width = CELL_WIDTH);
        }
        out.push('\n');
    }

    out.push_str(&snapshot.status);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridLayout, GridModel};
    use crate::hebrew::Script;

    #[test]
    fn month_reads_right_to_left() {
        let selected = JewishDate::new(5785, 1, 20).unwrap();
        let model = GridModel::build(selected).unwrap();
        let formatter = Formatter::new(Script::Latin);
        let snapshot = Snapshot::new(
            &GridLayout::default(),
            &model,
            formatter.status(&selected, false),
        );

        let text = render(&snapshot, &formatter);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 1 + 6 + 1);
        assert!(lines[0].trim_start().starts_with("Sat"));
        assert!(lines[0].trim_end().ends_with("Sun"));
        // 1 Nissan 5785 is a Sunday, so it closes the first row
        assert!(lines[1].trim_end().ends_with(" 1"));
        assert!(lines[1].trim_start().starts_with('7'));
        assert!(lines[3].contains("[20]"));
        assert!(lines[5].contains("(1)"));
        assert_eq!(lines[7], "20 Nissan 5785");
    }
}
