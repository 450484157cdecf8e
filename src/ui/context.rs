use unsegen::base::style::*;
use unsegen::widget::builtin::PromptLine;

use super::screen::{Field, Screen, Target};
use crate::cmds::Cmd;
use crate::config::Config;
use crate::ctrl::{Direction, NavigationController, Outcome};
use crate::error::Result;
use crate::grid::Snapshot;
use crate::hebrew::{Formatter, JewishDate};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Command,
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub header_style: StyleModifier,
    pub day_style: StyleModifier,
    pub other_month_style: StyleModifier,
    pub focus_day_style: StyleModifier,
    pub today_day_char: Option<char>,
    pub bar_style: StyleModifier,
    pub status_style: StyleModifier,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            header_style: StyleModifier::default().invert(true),
            day_style: StyleModifier::default(),
            other_month_style: StyleModifier::default().fg_color(Color::LightBlack),
            focus_day_style: StyleModifier::default()
                .bg_color(Color::Blue)
                .fg_color(Color::White),
            today_day_char: Some('*'),
            bar_style: StyleModifier::default().fg_color(Color::Yellow),
            status_style: StyleModifier::default(),
        }
    }
}

pub struct Context {
    pub mode: Mode,
    pub theme: Theme,
    pub quit: bool,
    pub command_line: PromptLine,
    pub last_error_message: Option<String>,
    controller: NavigationController<JewishDate>,
    formatter: Formatter,
    show_gregorian: bool,
    screen: Screen,
    today: Option<JewishDate>,
    count: Option<u32>,
}

impl Context {
    pub fn new(config: &Config, initial: JewishDate) -> Result<Self> {
        let controller = NavigationController::new(initial, JewishDate::supported_range()?)?;

        Ok(Context {
            mode: Mode::Normal,
            theme: Theme::default(),
            quit: false,
            command_line: PromptLine::with_prompt(":".to_owned()),
            last_error_message: None,
            controller,
            formatter: config.formatter(),
            show_gregorian: config.show_gregorian,
            screen: Screen::default(),
            today: JewishDate::today().ok(),
            count: None,
        })
    }

    pub fn controller(&self) -> &NavigationController<JewishDate> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut NavigationController<JewishDate> {
        &mut self.controller
    }

    pub fn selected(&self) -> JewishDate {
        self.controller.selected()
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn today(&self) -> Option<JewishDate> {
        self.today
    }

    pub fn input_sink(&self) -> &PromptLine {
        &self.command_line
    }

    pub fn input_sink_mut(&mut self) -> &mut PromptLine {
        &mut self.command_line
    }

    /// Refreshes what "today" is, it changes at midnight.
    pub fn update(&mut self) {
        match JewishDate::today() {
            Ok(today) => self.today = Some(today),
            Err(err) => log::warn!("Could not determine today's date: {}", err),
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        log::debug!("Laying out for {}x{}", width, height);
        self.screen = Screen::compute(width, height);
    }

    pub fn status(&self) -> String {
        self.formatter
            .status(&self.controller.selected(), self.show_gregorian)
    }

    pub fn snapshot(&self) -> Snapshot<JewishDate> {
        Snapshot::new(self.screen.grid(), self.controller.model(), self.status())
    }

    pub fn select_today(&mut self) -> Outcome {
        self.update();
        self.controller.select_today()
    }

    /// Adds a typed digit to the pending count (`3` then `2` is 32). A
    /// leading zero starts no count and is rejected.
    pub fn push_count_digit(&mut self, digit: u32) -> bool {
        if digit > 9 || (digit == 0 && self.count.is_none()) {
            return false;
        }

        let count = self.count.unwrap_or(0);
        self.count = Some(count.saturating_mul(10).saturating_add(digit));
        true
    }

    pub fn pending_count(&self) -> Option<u32> {
        self.count
    }

    /// Takes the pending count, 1 if none was typed.
    pub fn take_count(&mut self) -> u32 {
        self.count.take().unwrap_or(1)
    }

    pub fn clear_count(&mut self) {
        self.count = None;
    }

    /// Moves the cursor, repeated by the pending count.
    pub fn move_cursor(&mut self, direction: Direction) -> Outcome {
        match self.take_count() {
            1 => self.controller.on_key(direction),
            n => self
                .controller
                .step_days(direction.day_delta().saturating_mul(i64::from(n))),
        }
    }

    /// Runs `cmd` `count` times where that makes sense.
    pub fn run(&mut self, cmd: Cmd, count: u32) -> Outcome {
        let n = count.max(1);
        let days = i64::from(n);
        let units = i32::try_from(n).unwrap_or(i32::MAX);

        let outcome = match cmd {
            Cmd::NextDay => self.controller.step_days(days),
            Cmd::PrevDay => self.controller.step_days(-days),
            Cmd::NextWeek => self.controller.step_days(7 * days),
            Cmd::PrevWeek => self.controller.step_days(-7 * days),
            Cmd::NextMonth => self.controller.step_month(units),
            Cmd::PrevMonth => self.controller.step_month(-units),
            Cmd::NextYear => self.controller.step_year(units),
            Cmd::PrevYear => self.controller.step_year(-units),
            Cmd::Today => self.select_today(),
            Cmd::Command => {
                self.mode = Mode::Command;
                Outcome::Unchanged
            }
            Cmd::Exit => {
                self.quit = true;
                Outcome::Unchanged
            }
        };

        if let Outcome::Discarded(err) = &outcome {
            log::debug!("{} had no effect: {}", cmd, err);
        }

        outcome
    }

    /// Handles a click at screen position `(x, y)`.
    pub fn click(&mut self, x: u16, y: u16) -> Outcome {
        self.clear_count();
        match self.screen.hit(x, y) {
            Some(Target::Cell(idx)) => self.controller.resolve_click(idx),
            Some(Target::Step(Field::Day, delta)) => self.controller.step_days(delta as i64),
            Some(Target::Step(Field::Month, delta)) => self.controller.step_month(delta),
            Some(Target::Step(Field::Year, delta)) => self.controller.step_year(delta),
            None => Outcome::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Bound;

    fn ymd(year: i32, month: u8, day: u8) -> JewishDate {
        JewishDate::new(year, month, day).expect("valid test date")
    }

    fn context_at(date: JewishDate) -> Context {
        let mut context = Context::new(&Config::default(), date).unwrap();
        context.resize(72, 24);
        context
    }

    #[test]
    fn commands_move_the_selection() {
        let mut context = context_at(ymd(5784, 7, 10));

        assert!(context.run(Cmd::NextDay, 3).is_committed());
        assert_eq!(context.selected(), ymd(5784, 7, 13));
        assert!(context.run(Cmd::PrevWeek, 1).is_committed());
        assert_eq!(context.selected(), ymd(5784, 7, 6));
        assert!(context.run(Cmd::NextMonth, 2).is_committed());
        assert_eq!(context.selected(), ymd(5784, 9, 6));
        assert!(context.run(Cmd::PrevYear, 0).is_committed());
        assert_eq!(context.selected(), ymd(5783, 9, 6));
    }

    #[test]
    fn mode_and_exit_commands() {
        let mut context = context_at(ymd(5784, 7, 10));

        context.run(Cmd::Command, 1);
        assert_eq!(context.mode, Mode::Command);
        assert!(!context.quit);
        context.run(Cmd::Exit, 1);
        assert!(context.quit);
        assert_eq!(context.selected(), ymd(5784, 7, 10));
    }

    #[test]
    fn huge_counts_never_step_backwards() {
        let mut context = context_at(ymd(5784, 7, 10));

        assert!(context.run(Cmd::NextYear, u32::MAX).is_discarded());
        assert_eq!(context.selected(), ymd(5784, 7, 10));

        assert!(matches!(
            context.run(Cmd::NextMonth, u32::MAX),
            Outcome::Clamped(Bound::Upper)
        ));
        assert_eq!(context.selected(), ymd(9999, 6, 29));

        // far before the first day the engine knows
        assert!(context.run(Cmd::PrevDay, u32::MAX).is_discarded());
        assert_eq!(context.selected(), ymd(9999, 6, 29));
    }

    #[test]
    fn counts_apply_to_cursor_moves_once() {
        let mut context = context_at(ymd(5784, 7, 10));

        assert!(!context.push_count_digit(0));
        assert!(context.push_count_digit(3));
        assert!(context.move_cursor(Direction::Left).is_committed());
        assert_eq!(context.selected(), ymd(5784, 7, 13));
        assert_eq!(context.pending_count(), None);

        // the count was used up by the cursor move
        let count = context.take_count();
        assert!(context.run(Cmd::NextMonth, count).is_committed());
        assert_eq!(context.selected(), ymd(5784, 8, 13));

        context.push_count_digit(1);
        context.push_count_digit(2);
        assert_eq!(context.pending_count(), Some(12));
        let target = context.screen().grid().days()[20];
        context.click(target.x, target.y);
        assert_eq!(context.pending_count(), None);
    }

    #[test]
    fn clicks_on_cells_and_steppers() {
        let mut context = context_at(ymd(5784, 7, 10));
        let target = context.screen().grid().days()[20];

        assert!(context.click(target.x, target.y).is_committed());
        assert_eq!(context.selected(), ymd(5784, 7, 15));
        assert_eq!(context.controller().selected_cell_index(), 20);

        // forward arrow of the month stepper
        assert!(context.click(24, 0).is_committed());
        assert_eq!(context.selected(), ymd(5784, 8, 15));
        // back arrow of the year stepper
        assert!(context.click(23, 0).is_committed());
        assert_eq!(context.selected(), ymd(5783, 8, 15));

        assert!(matches!(context.click(30, 0), Outcome::Unchanged));
    }

    #[test]
    fn snapshot_pairs_geometry_and_dates() {
        let context = context_at(ymd(5785, 1, 20));
        let snapshot = context.snapshot();

        assert_eq!(snapshot.days.len(), 42);
        assert_eq!(snapshot.days[0].date, ymd(5785, 1, 1));
        assert_eq!(snapshot.days[0].rect, context.screen().grid().days()[0]);
        assert_eq!(snapshot.headers[0].weekday, 0);
        assert_eq!(snapshot.selected().map(|cell| cell.date), Some(ymd(5785, 1, 20)));
        assert_eq!(snapshot.status, "20 Nissan 5785\n2025-04-18");
    }
}
