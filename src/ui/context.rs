use chrono::prelude::*;

use crate::board::{Board, CalendarItem, DropOutcome, MonthIndex};

use unsegen::widget::builtin::PromptLine;

use super::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Grid,
    Pool,
}

pub struct Context {
    board: Board,
    theme: Theme,
    pub mode: Mode,
    pub focus: Focus,
    /// Focused day of the displayed month.
    pub cursor: u32,
    /// Selected item within the focused day.
    pub item_index: usize,
    pub pool_index: usize,
    pub last_message: Option<String>,
    pub quit: bool,
    command_line: PromptLine,
    now: DateTime<Local>,
}

impl Context {
    pub fn new(board: Board, theme: Theme) -> Self {
        let now = Local::now();
        let cursor = if board.month() == MonthIndex::from(now) {
            now.day()
        } else {
            1
        };

        Context {
            board,
            theme,
            mode: Mode::Normal,
            focus: Focus::Grid,
            cursor,
            item_index: 0,
            pool_index: 0,
            last_message: None,
            quit: false,
            command_line: PromptLine::with_prompt(":".to_owned()),
            now,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn command_line(&self) -> &PromptLine {
        &self.command_line
    }

    pub fn command_line_mut(&mut self) -> &mut PromptLine {
        &mut self.command_line
    }

    pub fn update(&mut self) {
        self.now = Local::now();
    }

    /// Day number of today if the displayed month is the current one.
    pub fn today(&self) -> Option<u32> {
        if self.board.month() == MonthIndex::from(self.now) {
            Some(self.now.day())
        } else {
            None
        }
    }

    pub fn selected_item(&self) -> Option<&CalendarItem> {
        self.board.items_of_day(self.cursor).get(self.item_index)
    }

    pub fn selected_pool_entry(&self) -> Option<&CalendarItem> {
        self.board.pool().get(self.pool_index)
    }

    /// Keeps cursor and selections inside what the board currently shows.
    fn clamp(&mut self) {
        let num_days = self.board.month().num_days().max(1);
        self.cursor = self.cursor.clamp(1, num_days);

        let num_items = self.board.items_of_day(self.cursor).len();
        self.item_index = self.item_index.min(num_items.saturating_sub(1));

        let pool_len = self.board.pool().len();
        self.pool_index = self.pool_index.min(pool_len.saturating_sub(1));
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Grid => Focus::Pool,
            Focus::Pool => Focus::Grid,
        };
    }

    /// Moves the focused day by `days`, staying within the displayed month.
    pub fn move_cursor(&mut self, days: i64) -> bool {
        let target = self.cursor as i64 + days;
        if target < 1 || target > self.board.month().num_days() as i64 {
            return false;
        }
        self.cursor = target as u32;
        self.item_index = 0;
        true
    }

    pub fn move_pool_selection(&mut self, delta: i64) -> bool {
        let target = self.pool_index as i64 + delta;
        if target < 0 || target >= self.board.pool().len() as i64 {
            return false;
        }
        self.pool_index = target as usize;
        true
    }

    pub fn move_item_selection(&mut self, delta: i64) -> bool {
        let target = self.item_index as i64 + delta;
        if target < 0 || target >= self.board.items_of_day(self.cursor).len() as i64 {
            return false;
        }
        self.item_index = target as usize;
        true
    }

    pub fn goto(&mut self, month: MonthIndex) {
        self.board.goto(month);
        self.clamp();
    }

    pub fn goto_today(&mut self) {
        self.update();
        self.goto(MonthIndex::from(self.now));
        self.cursor = self.now.day();
        self.item_index = 0;
    }

    pub fn next_month(&mut self) {
        self.board.next_month();
        self.clamp();
    }

    pub fn prev_month(&mut self) {
        self.board.prev_month();
        self.clamp();
    }

    pub fn add_to_pool(&mut self, content: &str) {
        self.board.add_to_pool(content);
        self.last_message = Some(format!("Added '{}'", content));
    }

    /// Starts a drag from whatever is focused: the selected pool entry or the
    /// selected item of the focused day.
    pub fn pick_up(&mut self) {
        let held = match self.focus {
            Focus::Pool => match self.selected_pool_entry().map(|entry| entry.id.clone()) {
                Some(entry) => self.board.drag_from_pool(&entry),
                None => None,
            },
            Focus::Grid => match self.selected_item().map(|item| item.id.clone()) {
                Some(id) => self.board.drag_from_day(self.cursor, &id),
                None => None,
            },
        };

        self.last_message = match held {
            Some(item) => Some(format!("Dragging '{}'", item.content)),
            None => Some("Nothing to pick up".to_owned()),
        };
    }

    pub fn pick_up_content(&mut self, content: &str) {
        let held = self.board.drag_content(content);
        self.last_message = Some(format!("Dragging '{}'", held.content));
    }

    pub fn put_down(&mut self) {
        self.drop_on(self.cursor);
    }

    pub fn drop_on(&mut self, day: u32) {
        let content = self.board.drag().map(|drag| drag.item.content.clone());

        self.last_message = Some(match (self.board.drop_on(day), content) {
            (DropOutcome::Placed(_), Some(content)) => {
                self.cursor = day;
                self.item_index = self.board.items_of_day(day).len().saturating_sub(1);
                format!("Placed '{}' on day {}", content, day)
            }
            (DropOutcome::Duplicate, Some(content)) => {
                format!("'{}' is already on day {}", content, day)
            }
            (DropOutcome::OutOfMonth, _) => format!("No day {} in {}", day, self.board.month()),
            _ => "Nothing to drop".to_owned(),
        });
        self.clamp();
    }

    pub fn delete_selected(&mut self) {
        let id = match self.selected_item() {
            Some(item) => item.id.clone(),
            None => {
                self.last_message = Some("Nothing to delete".to_owned());
                return;
            }
        };

        if let Some(removed) = self.board.delete(self.cursor, &id) {
            self.last_message = Some(format!("Deleted '{}'", removed.content));
        }
        self.clamp();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SequentialIds;

    fn context() -> Context {
        let month = MonthIndex::from(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        let board = Board::with_ids(
            month,
            &["Item 1", "Item 2"],
            Box::new(SequentialIds::new("id")),
        );
        let mut context = Context::new(board, Theme::default());
        context.cursor = 10;
        context
    }

    fn day_contents(context: &Context, day: u32) -> Vec<String> {
        context
            .board()
            .items_of_day(day)
            .iter()
            .map(|i| i.content.clone())
            .collect()
    }

    #[test]
    fn pick_from_pool_and_put_down() {
        let mut context = context();
        context.focus = Focus::Pool;
        context.pool_index = 1;
        context.pick_up();
        assert_eq!(context.last_message.as_deref(), Some("Dragging 'Item 2'"));

        context.focus = Focus::Grid;
        context.move_cursor(3);
        context.put_down();

        assert_eq!(day_contents(&context, 13), vec!["Item 2"]);
        assert_eq!(context.board().pool().len(), 1);
        assert_eq!(context.pool_index, 0);
        assert_eq!(context.last_message.as_deref(), Some("Placed 'Item 2' on day 13"));
    }

    #[test]
    fn duplicate_and_idle_drops_are_reported() {
        let mut context = context();
        context.pick_up_content("Item 1");
        context.put_down();
        context.pick_up_content("Item 1");
        context.put_down();
        assert_eq!(context.last_message.as_deref(), Some("'Item 1' is already on day 10"));

        context.put_down();
        assert_eq!(context.last_message.as_deref(), Some("Nothing to drop"));
    }

    #[test]
    fn drag_within_grid() {
        let mut context = context();
        context.pick_up_content("Item 1");
        context.put_down();

        context.pick_up();
        context.drop_on(12);

        assert_eq!(day_contents(&context, 10), vec!["Item 1"]);
        assert_eq!(day_contents(&context, 12), vec!["Item 1"]);
        assert_eq!(context.cursor, 12);
    }

    #[test]
    fn delete_selected_item() {
        let mut context = context();
        context.pick_up_content("Item 1");
        context.put_down();
        context.pick_up_content("Item 2");
        context.put_down();
        assert_eq!(context.item_index, 1);

        context.delete_selected();
        assert_eq!(day_contents(&context, 10), vec!["Item 1"]);
        assert_eq!(context.item_index, 0);

        context.delete_selected();
        assert!(!context.board().placements().contains_day(10));

        context.delete_selected();
        assert_eq!(context.last_message.as_deref(), Some("Nothing to delete"));
    }

    #[test]
    fn cursor_stays_in_month() {
        let mut context = context();
        assert!(!context.move_cursor(-10));
        assert!(context.move_cursor(-9));
        assert_eq!(context.cursor, 1);
        assert!(!context.move_cursor(29));
        assert!(context.move_cursor(28));
        assert_eq!(context.cursor, 29);

        context.next_month();
        assert_eq!(context.cursor, 29);
        context.prev_month();
        context.prev_month();
        assert_eq!(context.board().month().to_string(), "January 2024");

        context.cursor = 31;
        context.next_month();
        assert_eq!(context.cursor, 29);
    }

    #[test]
    fn out_of_month_drop_keeps_drag() {
        let mut context = context();
        context.pick_up_content("Item 1");
        context.drop_on(31);

        assert_eq!(context.last_message.as_deref(), Some("No day 31 in February 2024"));
        assert!(context.board().drag().is_some());
    }
}
