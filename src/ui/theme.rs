use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

use unsegen::base::{Color, StyleModifier};

use crate::error::{Error, ErrorKind, Result};

/// Style classes of the calendar. The names are the keys of the `[theme]`
/// table in the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    Calendar,
    CalendarHeader,
    CalendarDays,
    CalendarDayHeader,
    CalendarDay,
    Empty,
    DateNumber,
    CalendarItems,
    CalendarItem,
    DeleteButton,
    DraggableItems,
    DraggableItem,
    Focus,
    Today,
    Dragging,
}

impl Class {
    pub const ALL: &'static [Class] = &[
        Class::Calendar,
        Class::CalendarHeader,
        Class::CalendarDays,
        Class::CalendarDayHeader,
        Class::CalendarDay,
        Class::Empty,
        Class::DateNumber,
        Class::CalendarItems,
        Class::CalendarItem,
        Class::DeleteButton,
        Class::DraggableItems,
        Class::DraggableItem,
        Class::Focus,
        Class::Today,
        Class::Dragging,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Class::Calendar => "calendar",
            Class::CalendarHeader => "calendar-header",
            Class::CalendarDays => "calendar-days",
            Class::CalendarDayHeader => "calendar-day-header",
            Class::CalendarDay => "calendar-day",
            Class::Empty => "empty",
            Class::DateNumber => "date-number",
            Class::CalendarItems => "calendar-items",
            Class::CalendarItem => "calendar-item",
            Class::DeleteButton => "delete-button",
            Class::DraggableItems => "draggable-items",
            Class::DraggableItem => "draggable-item",
            Class::Focus => "focus",
            Class::Today => "today",
            Class::Dragging => "dragging",
        }
    }
}

impl FromStr for Class {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Class::ALL
            .iter()
            .find(|class| class.as_str() == s)
            .copied()
            .ok_or_else(|| Error::new(ErrorKind::ThemeParse, &format!("unknown class '{}'", s)))
    }
}

/// Raw `[theme.<class>]` entry as written in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleSpec {
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub invert: Option<bool>,
}

pub type ThemeSpec = HashMap<String, StyleSpec>;

fn parse_color(name: &str) -> Result<Color> {
    let color = match name.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "light-black" | "gray" | "grey" => Color::LightBlack,
        "light-red" => Color::LightRed,
        "light-green" => Color::LightGreen,
        "light-yellow" => Color::LightYellow,
        "light-blue" => Color::LightBlue,
        "light-magenta" => Color::LightMagenta,
        "light-cyan" => Color::LightCyan,
        "light-white" => Color::LightWhite,
        hex if hex.starts_with('#')
            && hex.len() == 7
            && hex[1..].chars().all(|c| c.is_ascii_hexdigit()) =>
        {
            let channel = |range: std::ops::Range<usize>| {
                u8::from_str_radix(&hex[range], 16).map_err(|_| {
                    Error::new(ErrorKind::ThemeParse, &format!("invalid colour '{}'", name))
                })
            };
            Color::Rgb {
                r: channel(1..3)?,
                g: channel(3..5)?,
                b: channel(5..7)?,
            }
        }
        _ => {
            return Err(Error::new(
                ErrorKind::ThemeParse,
                &format!("invalid colour '{}'", name),
            ))
        }
    };

    Ok(color)
}

impl StyleSpec {
    fn to_modifier(&self) -> Result<StyleModifier> {
        let mut modifier = StyleModifier::new();
        if let Some(fg) = &self.fg {
            modifier = modifier.fg_color(parse_color(fg)?);
        }
        if let Some(bg) = &self.bg {
            modifier = modifier.bg_color(parse_color(bg)?);
        }
        if let Some(invert) = self.invert {
            modifier = modifier.invert(invert);
        }
        Ok(modifier)
    }
}

#[derive(Clone, Debug)]
pub struct Theme {
    styles: HashMap<Class, StyleModifier>,
}

impl Default for Theme {
    fn default() -> Self {
        let mut styles = HashMap::new();
        styles.insert(Class::CalendarHeader, StyleModifier::new().fg_color(Color::Yellow));
        styles.insert(Class::CalendarDayHeader, StyleModifier::new().fg_color(Color::Yellow));
        styles.insert(Class::Empty, StyleModifier::new().fg_color(Color::LightBlack));
        styles.insert(Class::CalendarItem, StyleModifier::new().fg_color(Color::Cyan));
        styles.insert(Class::DeleteButton, StyleModifier::new().fg_color(Color::Red));
        styles.insert(Class::DraggableItem, StyleModifier::new().fg_color(Color::Green));
        styles.insert(Class::Focus, StyleModifier::new().bg_color(Color::Blue));
        styles.insert(Class::Today, StyleModifier::new().invert(true));
        styles.insert(Class::Dragging, StyleModifier::new().fg_color(Color::LightRed));

        Theme { styles }
    }
}

impl Theme {
    /// Default theme with the entries of `spec` replacing the defaults of
    /// their class.
    pub fn from_spec(spec: &ThemeSpec) -> Result<Self> {
        let mut theme = Theme::default();
        for (name, style) in spec {
            let class = name.parse::<Class>()?;
            theme.styles.insert(class, style.to_modifier()?);
        }
        Ok(theme)
    }

    pub fn style(&self, class: Class) -> StyleModifier {
        self.styles.get(&class).copied().unwrap_or_else(StyleModifier::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn same(a: StyleModifier, b: StyleModifier) -> bool {
        format!("{:?}", a) == format!("{:?}", b)
    }

    #[test]
    fn class_names_round_trip() {
        for class in Class::ALL {
            assert_eq!(class.as_str().parse::<Class>().unwrap(), *class);
        }
        assert!("calendar_day".parse::<Class>().is_err());
    }

    #[test]
    fn configured_styles_override_defaults() {
        let mut spec = ThemeSpec::new();
        spec.insert(
            "calendar-item".to_owned(),
            StyleSpec {
                fg: Some("magenta".to_owned()),
                bg: Some("#102030".to_owned()),
                invert: None,
            },
        );

        let theme = Theme::from_spec(&spec).unwrap();
        assert!(same(
            theme.style(Class::CalendarItem),
            StyleModifier::new()
                .fg_color(Color::Magenta)
                .bg_color(Color::Rgb {
                    r: 0x10,
                    g: 0x20,
                    b: 0x30
                })
        ));
        assert!(same(
            theme.style(Class::DeleteButton),
            Theme::default().style(Class::DeleteButton)
        ));
    }

    #[test]
    fn rejects_unknown_class_and_colour() {
        let mut spec = ThemeSpec::new();
        spec.insert("sidebar".to_owned(), StyleSpec::default());
        assert!(Theme::from_spec(&spec).is_err());

        let mut spec = ThemeSpec::new();
        spec.insert(
            "calendar".to_owned(),
            StyleSpec {
                fg: Some("ultraviolet".to_owned()),
                ..StyleSpec::default()
            },
        );
        assert!(Theme::from_spec(&spec).is_err());

        for colour in &["#aébbb", "#12345g", "#1234567", "#fff"] {
            let mut spec = ThemeSpec::new();
            spec.insert(
                "calendar-day".to_owned(),
                StyleSpec {
                    bg: Some((*colour).to_owned()),
                    ..StyleSpec::default()
                },
            );
            let err = Theme::from_spec(&spec).unwrap_err();
            assert!(matches!(err.kind, ErrorKind::ThemeParse), "{}", colour);
        }
    }
}
