pub mod app;
pub mod command;
pub mod context;
pub mod grid;
pub mod plain;
pub mod pool;
pub mod theme;

pub use app::App;
pub use context::{Context, Focus, Mode};
pub use grid::MonthGrid;
pub use pool::PoolBar;
pub use theme::{Class, Theme};

use std::fmt::Write;
use unsegen::base::{Cursor, Window};

/// Run of text drawn with the styles of its classes layered in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub classes: Vec<Class>,
}

impl Segment {
    pub fn new<S: Into<String>>(text: S, classes: &[Class]) -> Self {
        Segment {
            text: text.into(),
            classes: classes.to_vec(),
        }
    }
}

pub type Line = Vec<Segment>;

pub(crate) fn draw_lines(mut window: Window, lines: &[Line], theme: &Theme) {
    let mut cursor = Cursor::new(&mut window);

    for line in lines {
        for segment in line {
            let saved_style = cursor.get_style_modifier();

            for class in &segment.classes {
                cursor.apply_style_modifier(theme.style(*class));
            }

            if let Err(err) = write!(&mut cursor, "{}", segment.text) {
                log::warn!("Error while drawing: {}", err);
            }

            cursor.set_style_modifier(saved_style);
        }
        cursor.fill_and_wrap_line();
    }
}
