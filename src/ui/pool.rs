use unsegen::base::*;
use unsegen::widget::*;

use super::theme::Class;
use super::{draw_lines, Context, Focus, Line, Segment};

/// The items that have not been placed on a day yet.
pub struct PoolBar<'a> {
    context: &'a Context,
}

impl<'a> PoolBar<'a> {
    const LABEL: &'static str = "Items:";

    pub fn new(context: &'a Context) -> Self {
        PoolBar { context }
    }

    pub fn line(&self) -> Line {
        let mut line = vec![Segment::new(Self::LABEL, &[Class::DraggableItems])];

        if self.context.board().pool().is_empty() {
            line.push(Segment::new(" (none)", &[Class::DraggableItems]));
        }

        for (idx, item) in self.context.board().pool().iter().enumerate() {
            let mut classes = vec![Class::DraggableItems, Class::DraggableItem];
            if self.context.focus == Focus::Pool && idx == self.context.pool_index {
                classes.push(Class::Focus);
            }
            line.push(Segment::new(" ", &[Class::DraggableItems]));
            line.push(Segment::new(format!("[{}]", item.content), &classes));
        }

        line
    }
}

impl Widget for PoolBar<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::at_least(Self::LABEL.len()),
            height: RowDemand::exact(1),
        }
    }

    fn draw(&self, window: Window, _hints: RenderingHints) {
        draw_lines(window, &[self.line()], self.context.theme());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, MonthIndex};
    use crate::ui::theme::Theme;

    #[test]
    fn lists_entries_and_marks_focus() {
        let board = Board::new(MonthIndex::default(), &["Item 1", "Item 2"]);
        let mut context = Context::new(board, Theme::default());
        context.focus = Focus::Pool;
        context.pool_index = 1;

        let line = PoolBar::new(&context).line();
        let text: String = line.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(text, "Items: [Item 1] [Item 2]");

        let focused: Vec<&str> = line
            .iter()
            .filter(|s| s.classes.contains(&Class::Focus))
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(focused, vec!["[Item 2]"]);
    }

    #[test]
    fn empty_pool() {
        let board = Board::new(MonthIndex::default(), &[] as &[&str]);
        let context = Context::new(board, Theme::default());
        let text: String = PoolBar::new(&context)
            .line()
            .iter()
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(text, "Items: (none)");
    }
}
