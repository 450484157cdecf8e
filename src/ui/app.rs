use crate::config::{Config, KeyMap};
use crate::ctrl::Direction;
use crate::error::Result;
use crate::events::{Dispatcher, Event};
use crate::hebrew::JewishDate;

use super::command::CommandParser;
use super::{Context, Mode, MonthWindow};

use termion::event::{MouseButton, MouseEvent};
use unsegen::base::{GraphemeCluster, Terminal};
use unsegen::input::{
    Behavior, EditBehavior, Input, Key, Navigatable, NavigateBehavior, OperationResult,
    ScrollBehavior,
};
use unsegen::widget::*;

pub struct App<'a> {
    config: &'a Config,
    context: Context,
}

impl<'a> App<'a> {
    pub fn new(config: &'a Config, initial: JewishDate) -> Result<App<'a>> {
        let context = Context::new(config, initial)?;
        Ok(App { config, context })
    }

    fn bottom_bar<'w>(&'w self) -> impl Widget + 'w {
        let spacer = " ".with_demand(|_| Demand2D {
            width: ColDemand::exact(1),
            height: RowDemand::exact(1),
        });

        let mut layout = HLayout::new()
            .separator(GraphemeCluster::space())
            .widget(spacer);

        match (self.context.mode, &self.context.last_error_message) {
            (Mode::Command, _) => layout = layout.widget(self.context.input_sink().as_widget()),
            (Mode::Normal, Some(message)) => layout = layout.widget(message.as_str()),
            (Mode::Normal, None) => {}
        }

        layout
    }

    fn as_widget<'w>(&'w self) -> impl Widget + 'w
    where
        'a: 'w,
    {
        VLayout::new()
            .widget(MonthWindow::new(&self.context))
            .widget(self.bottom_bar())
    }

    fn handle_input(&mut self, input: Input) {
        if input.matches(Key::Esc) {
            self.context.mode = Mode::Normal;
            self.context.last_error_message = None;
            self.context.clear_count();
            return;
        }

        match self.context.mode {
            Mode::Normal => {
                let leftover = input
                    .chain(
                        NavigateBehavior::new(&mut CursorBehaviour(&mut self.context))
                            .down_on(Key::Down)
                            .up_on(Key::Up)
                            .left_on(Key::Left)
                            .right_on(Key::Right)
                            .down_on(Key::Char('j'))
                            .up_on(Key::Char('k'))
                            .left_on(Key::Char('h'))
                            .right_on(Key::Char('l')),
                    )
                    .chain(PointerBehaviour(&mut self.context))
                    .chain(KeyMapBehaviour {
                        context: &mut self.context,
                        key_map: &self.config.key_map,
                    })
                    .finish();

                if let Some(input) = leftover {
                    log::trace!("Unhandled input {:?}", input.event);
                }
            }
            Mode::Command => {
                input
                    .chain(
                        EditBehavior::new(self.context.input_sink_mut())
                            .delete_forwards_on(Key::Delete)
                            .delete_backwards_on(Key::Backspace)
                            .left_on(Key::Left)
                            .right_on(Key::Right),
                    )
                    .chain(
                        ScrollBehavior::new(self.context.input_sink_mut())
                            .backwards_on(Key::Up)
                            .forwards_on(Key::Down),
                    )
                    .chain(CommandParser::new(&mut self.context))
                    .finish();
            }
        }
    }

    pub fn run(
        &mut self,
        dispatcher: Dispatcher,
        mut term: Terminal,
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut size = (0, 0);

        while !self.context.quit {
            // Draw
            let root = term.create_root_window();
            let current = (
                root.get_width().raw_value() as u16,
                root.get_height().raw_value() as u16,
            );
            if current != size {
                size = current;
                // the last row belongs to the bottom bar
                self.context.resize(size.0, size.1.saturating_sub(1));
            }

            self.as_widget().draw(root, RenderingHints::new());
            term.present();

            // Handle events
            match dispatcher.next()? {
                Event::Update => self.context.update(),
                Event::Resize => log::debug!("Terminal resized"),
                Event::Input(input) => self.handle_input(input),
            }
        }

        Ok(())
    }
}

struct CursorBehaviour<'a>(&'a mut Context);

impl CursorBehaviour<'_> {
    fn step(&mut self, direction: Direction) -> OperationResult {
        if self.0.move_cursor(direction).is_committed() {
            Ok(())
        } else {
            Err(())
        }
    }
}

impl Navigatable for CursorBehaviour<'_> {
    fn move_down(&mut self) -> OperationResult {
        self.step(Direction::Down)
    }

    fn move_left(&mut self) -> OperationResult {
        self.step(Direction::Left)
    }

    fn move_right(&mut self) -> OperationResult {
        self.step(Direction::Right)
    }

    fn move_up(&mut self) -> OperationResult {
        self.step(Direction::Up)
    }
}

/// Left clicks on day cells and step arrows. Terminal coordinates are 1-based.
struct PointerBehaviour<'a>(&'a mut Context);

impl Behavior for PointerBehaviour<'_> {
    fn input(mut self, input: Input) -> Option<Input> {
        match input.event {
            unsegen::input::Event::Mouse(MouseEvent::Press(MouseButton::Left, x, y)) => {
                let outcome = self.0.click(x.saturating_sub(1), y.saturating_sub(1));
                log::trace!("Click at {},{}: {:?}", x, y, outcome);
                None
            }
            unsegen::input::Event::Mouse(_) => None,
            _ => Some(input),
        }
    }
}

/// Configured key bindings, optionally preceded by a count (`3n`).
struct KeyMapBehaviour<'a> {
    context: &'a mut Context,
    key_map: &'a KeyMap,
}

impl Behavior for KeyMapBehaviour<'_> {
    fn input(mut self, input: Input) -> Option<Input> {
        let key = match input.event {
            unsegen::input::Event::Key(key) => key,
            _ => return Some(input),
        };

        if let Key::Char(c) = key {
            if let Some(digit) = c.to_digit(10) {
                if self.context.push_count_digit(digit) {
                    return None;
                }
            }
        }

        let count = self.context.take_count();
        match self.key_map.get(&key) {
            Some(cmd) => {
                self.context.run(*cmd, count);
                None
            }
            None => Some(input),
        }
    }
}
