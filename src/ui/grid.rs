use unsegen::base::*;
use unsegen::widget::*;

use crate::board::{GridCell, WEEKDAY_LABELS};

use super::theme::Class;
use super::{draw_lines, Context, Focus, Line, Segment};

const DAYS_PER_WEEK: usize = 7;

/// Month title with the navigation affordances, then the weekday labels,
/// then one block of `CELL_HEIGHT` lines per week.
pub struct MonthGrid<'a> {
    context: &'a Context,
}

impl<'a> MonthGrid<'a> {
    pub const CELL_WIDTH: usize = 14;
    pub const ITEM_LINES: usize = 3;
    const CELL_HEIGHT: usize = 1 + Self::ITEM_LINES;
    const DELETE_LABEL: &'static str = " X";

    pub fn new(context: &'a Context) -> Self {
        MonthGrid { context }
    }

    fn width() -> usize {
        DAYS_PER_WEEK * Self::CELL_WIDTH + DAYS_PER_WEEK - 1
    }

    fn header(&self) -> Line {
        let title = self.context.board().month().to_string();
        let prev = "< Prev";
        let next = "Next >";
        let inner = Self::width().saturating_sub(prev.len() + next.len());

        vec![
            Segment::new(prev, &[Class::Calendar, Class::CalendarHeader]),
            Segment::new(
                format!("{:^width$}", title, width = inner),
                &[Class::Calendar, Class::CalendarHeader],
            ),
            Segment::new(next, &[Class::Calendar, Class::CalendarHeader]),
        ]
    }

    fn weekday_labels(&self) -> Line {
        let mut line = Line::new();
        for (i, label) in WEEKDAY_LABELS.iter().enumerate() {
            if i > 0 {
                line.push(Segment::new(" ", &[Class::CalendarDays]));
            }
            line.push(Segment::new(
                format!("{:^width$}", label, width = Self::CELL_WIDTH),
                &[Class::CalendarDays, Class::CalendarDayHeader],
            ));
        }
        line
    }

    fn blank_cell() -> Vec<Line> {
        (0..Self::CELL_HEIGHT)
            .map(|_| {
                vec![Segment::new(
                    " ".repeat(Self::CELL_WIDTH),
                    &[Class::CalendarDay, Class::Empty],
                )]
            })
            .collect()
    }

    fn day_cell(&self, day: u32) -> Vec<Line> {
        let focused = self.context.focus == Focus::Grid && self.context.cursor == day;
        let is_today = self.context.today() == Some(day);
        let items = self.context.board().items_of_day(day);

        let first_shown = if focused {
            self.context.item_index.saturating_sub(Self::ITEM_LINES - 1)
        } else {
            0
        };
        let hidden = items.len().saturating_sub(Self::ITEM_LINES);

        let mut number_classes = vec![Class::CalendarDay, Class::DateNumber];
        if is_today {
            number_classes.push(Class::Today);
        }
        if focused {
            number_classes.push(Class::Focus);
        }

        let number = format!(
            "{}{:>2}{}",
            if is_today { '*' } else { ' ' },
            day,
            if hidden > 0 {
                format!(" (+{})", hidden)
            } else {
                String::new()
            }
        );

        let mut lines = vec![vec![Segment::new(
            pad(&number, Self::CELL_WIDTH),
            &number_classes,
        )]];

        let content_width = Self::CELL_WIDTH - Self::DELETE_LABEL.len();
        for idx in first_shown..first_shown + Self::ITEM_LINES {
            let line = match items.get(idx) {
                Some(item) => {
                    let mut classes = vec![Class::CalendarDay, Class::CalendarItems, Class::CalendarItem];
                    if focused && idx == self.context.item_index {
                        classes.push(Class::Focus);
                    }
                    vec![
                        Segment::new(pad(&item.content, content_width), &classes),
                        Segment::new(
                            Self::DELETE_LABEL,
                            &[Class::CalendarDay, Class::DeleteButton],
                        ),
                    ]
                }
                None => vec![Segment::new(
                    " ".repeat(Self::CELL_WIDTH),
                    &[Class::CalendarDay, Class::CalendarItems],
                )],
            };
            lines.push(line);
        }

        lines
    }

    pub fn lines(&self) -> Vec<Line> {
        let mut cells: Vec<Vec<Line>> = self
            .context
            .board()
            .cells()
            .into_iter()
            .map(|cell| match cell {
                GridCell::Blank => Self::blank_cell(),
                GridCell::Day(day) => self.day_cell(day),
            })
            .collect();

        while cells.len() % DAYS_PER_WEEK != 0 {
            cells.push(Self::blank_cell());
        }

        let mut lines = vec![self.header(), self.weekday_labels()];

        for week in cells.chunks(DAYS_PER_WEEK) {
            for row in 0..Self::CELL_HEIGHT {
                let mut line = Line::new();
                for (i, cell) in week.iter().enumerate() {
                    if i > 0 {
                        line.push(Segment::new(" ", &[Class::CalendarDays]));
                    }
                    line.extend(cell[row].iter().cloned());
                }
                lines.push(line);
            }
        }

        lines
    }
}

/// Truncates or pads `text` to exactly `width` characters.
fn pad(text: &str, width: usize) -> String {
    let truncated: String = text.chars().take(width).collect();
    format!("{:<width$}", truncated, width = width)
}

impl Widget for MonthGrid<'_> {
    fn space_demand(&self) -> Demand2D {
        let weeks = (self.context.board().cells().len() + DAYS_PER_WEEK - 1) / DAYS_PER_WEEK;
        Demand2D {
            width: ColDemand::exact(Self::width()),
            height: RowDemand::exact(2 + weeks * Self::CELL_HEIGHT),
        }
    }

    fn draw(&self, window: Window, _hints: RenderingHints) {
        draw_lines(window, &self.lines(), self.context.theme());
    }
}
