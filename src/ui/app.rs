use crate::config::Config;
use crate::events::{Dispatcher, Event};

use super::command::CommandParser;
use super::theme::Class;
use super::{draw_lines, Context, Focus, Mode, MonthGrid, PoolBar, Segment};

use unsegen::base::{Terminal, Window};
use unsegen::input::{
    EditBehavior, Input, Key, Navigatable, NavigateBehavior, OperationResult, ScrollBehavior,
    Scrollable,
};
use unsegen::widget::*;

pub struct App<'a> {
    config: &'a Config,
    context: Context,
}

impl<'a> App<'a> {
    pub fn new(config: &'a Config, context: Context) -> App<'a> {
        App { config, context }
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    fn as_widget<'w>(&'w self) -> impl Widget + 'w
    where
        'a: 'w,
    {
        VLayout::new()
            .widget(MonthGrid::new(&self.context))
            .widget(PoolBar::new(&self.context))
            .widget(StatusLine::new(&self.context))
    }

    fn handle_input(&mut self, input: Input) {
        if input.matches(Key::Esc) {
            self.context.mode = Mode::Normal;
            return;
        }

        match self.context.mode {
            Mode::Normal => {
                let mut quit = false;
                input
                    .chain((Key::Char('q'), || quit = true))
                    .chain((Key::Char(':'), || self.context.mode = Mode::Command))
                    .chain((Key::Char('\t'), || self.context.toggle_focus()))
                    .chain((Key::Char(' '), || self.context.pick_up()))
                    .chain((Key::Char('\n'), || self.context.put_down()))
                    .chain((Key::Char('x'), || self.context.delete_selected()))
                    .chain((Key::Char('n'), || self.context.next_month()))
                    .chain((Key::Char('p'), || self.context.prev_month()))
                    .chain(
                        NavigateBehavior::new(&mut CursorBehaviour(&mut self.context))
                            .down_on(Key::Char('j'))
                            .up_on(Key::Char('k'))
                            .left_on(Key::Char('h'))
                            .right_on(Key::Char('l')),
                    )
                    .chain(
                        ScrollBehavior::new(&mut SelectionBehaviour(&mut self.context))
                            .forwards_on(Key::Char(']'))
                            .backwards_on(Key::Char('[')),
                    )
                    .finish();
                if quit {
                    self.context.quit = true;
                }
            }
            Mode::Command => {
                input
                    .chain(
                        EditBehavior::new(self.context.command_line_mut())
                            .delete_forwards_on(Key::Delete)
                            .delete_backwards_on(Key::Backspace)
                            .left_on(Key::Left)
                            .right_on(Key::Right),
                    )
                    .chain(
                        ScrollBehavior::new(self.context.command_line_mut())
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
    ) -> Result<(), Box<dyn std::error::Error>> {
        log::info!(
            "Starting with {} pool items, tick rate {:?}",
            self.context.board().pool().len(),
            self.config.tick_rate()
        );

        while !self.context.quit {
            // Draw
            let root = term.create_root_window();
            self.as_widget().draw(root, RenderingHints::new());
            term.present();

            // Handle events
            match dispatcher.next()? {
                Event::Update => self.context.update(),
                Event::Redraw => {}
                Event::Input(input) => self.handle_input(input),
            }
        }

        Ok(())
    }
}

/// Drag state, last message or the command prompt.
struct StatusLine<'a> {
    context: &'a Context,
}

impl<'a> StatusLine<'a> {
    fn new(context: &'a Context) -> Self {
        StatusLine { context }
    }
}

impl Widget for StatusLine<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::at_least(10),
            height: RowDemand::exact(1),
        }
    }

    fn draw(&self, window: Window, hints: RenderingHints) {
        if self.context.mode == Mode::Command {
            self.context.command_line().as_widget().draw(window, hints);
            return;
        }

        let mut line = Vec::new();
        if let Some(drag) = self.context.board().drag() {
            line.push(Segment::new(
                format!("Dragging: {}  ", drag.item.content),
                &[Class::Dragging],
            ));
        }
        if let Some(msg) = &self.context.last_message {
            line.push(Segment::new(msg.as_str(), &[]));
        }

        draw_lines(window, &[line], self.context.theme());
    }
}

struct CursorBehaviour<'a>(&'a mut Context);

impl Navigatable for CursorBehaviour<'_> {
    fn move_down(&mut self) -> OperationResult {
        if self.0.focus == Focus::Grid && self.0.move_cursor(7) {
            Ok(())
        } else {
            Err(())
        }
    }

    fn move_up(&mut self) -> OperationResult {
        if self.0.focus == Focus::Grid && self.0.move_cursor(-7) {
            Ok(())
        } else {
            Err(())
        }
    }

    fn move_left(&mut self) -> OperationResult {
        let moved = match self.0.focus {
            Focus::Grid => self.0.move_cursor(-1),
            Focus::Pool => self.0.move_pool_selection(-1),
        };
        if moved {
            Ok(())
        } else {
            Err(())
        }
    }

    fn move_right(&mut self) -> OperationResult {
        let moved = match self.0.focus {
            Focus::Grid => self.0.move_cursor(1),
            Focus::Pool => self.0.move_pool_selection(1),
        };
        if moved {
            Ok(())
        } else {
            Err(())
        }
    }
}

/// Cycles through the items of the focused day.
struct SelectionBehaviour<'a>(&'a mut Context);

impl Scrollable for SelectionBehaviour<'_> {
    fn scroll_backwards(&mut self) -> OperationResult {
        if self.0.move_item_selection(-1) {
            Ok(())
        } else {
            Err(())
        }
    }

    fn scroll_forwards(&mut self) -> OperationResult {
        if self.0.move_item_selection(1) {
            Ok(())
        } else {
            Err(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, MonthIndex, SequentialIds};
    use crate::ui::Theme;
    use unsegen::input::Event as InputEvent;

    fn app(config: &Config) -> App<'_> {
        let month: MonthIndex = "2024-02".parse().unwrap();
        let board = Board::with_ids(month, &["Item 1", "Item 2"], Box::new(SequentialIds::new("id")));
        let mut context = Context::new(board, Theme::default());
        context.cursor = 1;
        App::new(config, context)
    }

    fn press(app: &mut App, keys: &str) {
        for c in keys.chars() {
            app.handle_input(Input {
                event: InputEvent::Key(Key::Char(c)),
                raw: Vec::new(),
            });
        }
    }

    #[test]
    fn drag_from_pool_with_keys() {
        let config = Config::default();
        let mut app = app(&config);

        // focus pool, select second entry, pick up, back to grid, move, drop
        press(&mut app, "\tl \tlj\n");

        let context = app.context_mut();
        assert_eq!(context.cursor, 9);
        assert_eq!(context.board().items_of_day(9)[0].content, "Item 2");
        assert_eq!(context.board().pool().len(), 1);
    }

    #[test]
    fn vertical_moves_stay_inside_the_month() {
        let config = Config::default();
        let mut app = app(&config);

        press(&mut app, "j");
        assert_eq!(app.context_mut().cursor, 8);
        press(&mut app, "jjjj");
        assert_eq!(app.context_mut().cursor, 29);
        press(&mut app, "kkkkk");
        assert_eq!(app.context_mut().cursor, 1);

        // the pool has no rows
        press(&mut app, "\tj");
        assert_eq!(app.context_mut().cursor, 1);
    }

    #[test]
    fn navigation_and_delete_with_keys() {
        let config = Config::default();
        let mut app = app(&config);

        press(&mut app, "\t \t\n");
        assert_eq!(app.context_mut().board().items_of_day(1).len(), 1);

        press(&mut app, "x");
        assert!(app.context_mut().board().placements().is_empty());

        press(&mut app, "nn");
        assert_eq!(app.context_mut().board().month().to_string(), "April 2024");
        press(&mut app, "p");
        assert_eq!(app.context_mut().board().month().to_string(), "March 2024");
    }

    #[test]
    fn command_mode_and_quit() {
        let config = Config::default();
        let mut app = app(&config);

        press(&mut app, ":goto 2030-01\n");
        assert_eq!(app.context_mut().mode, Mode::Normal);
        assert_eq!(app.context_mut().board().month().to_string(), "January 2030");

        press(&mut app, ":bogus\n");
        assert_eq!(app.context_mut().mode, Mode::Command);
        assert!(app.context_mut().last_message.is_some());

        app.handle_input(Input {
            event: InputEvent::Key(Key::Esc),
            raw: Vec::new(),
        });
        press(&mut app, "q");
        assert!(app.context_mut().quit);
    }
}
