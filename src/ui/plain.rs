//! Text-only rendering used when printing the calendar non-interactively.

use super::{Context, Line, MonthGrid, PoolBar};

fn line_text(line: &Line) -> String {
    let text: String = line.iter().map(|segment| segment.text.as_str()).collect();
    text.trim_end().to_owned()
}

pub fn render(context: &Context) -> String {
    let mut lines: Vec<String> = MonthGrid::new(context).lines().iter().map(line_text).collect();
    lines.push(String::new());
    lines.push(line_text(&PoolBar::new(context).line()));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, MonthIndex, SequentialIds};
    use crate::ui::Theme;

    #[test]
    fn prints_month_items_and_pool() {
        let month: MonthIndex = "2023-07".parse().unwrap();
        let board = Board::with_ids(month, &["Item 1", "Item 2"], Box::new(SequentialIds::new("id")));
        let mut context = Context::new(board, Theme::default());
        context.pick_up_content("Dentist");
        context.drop_on(31);

        let out = render(&context);
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].contains("July 2023"));
        assert!(out.contains("Dentist"));
        assert_eq!(lines.last(), Some(&"Items: [Item 1] [Item 2]"));
        assert!(lines.iter().all(|l| !l.ends_with(' ')));
    }
}
