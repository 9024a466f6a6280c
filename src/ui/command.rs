use unsegen::input::*;

use nom::{
    character::complete::{alpha1, digit1, space1},
    combinator::{all_consuming, map_res, opt, rest},
    sequence::{preceded, tuple},
    IResult,
};

use super::context::{Context, Mode};
use crate::board::MonthIndex;
use crate::error::{Error, ErrorKind};

pub type ActionResult = Result<(), Error>;

pub enum Action {
    Arg(fn(&mut Context, &str) -> ActionResult),
    NoArg(fn(&mut Context) -> ActionResult),
    Repeatable(fn(&mut Context, u32) -> ActionResult),
}

const COMMANDS: &[(&str, Action)] = &[
    (
        "next",
        Action::Repeatable(|c, n| {
            c.goto(c.board().month() + n);
            Ok(())
        }),
    ),
    (
        "prev",
        Action::Repeatable(|c, n| {
            c.goto(c.board().month() - n);
            Ok(())
        }),
    ),
    (
        "goto",
        Action::Arg(|c, arg| {
            let month: MonthIndex = arg.parse()?;
            c.goto(month);
            Ok(())
        }),
    ),
    (
        "today",
        Action::NoArg(|c| {
            c.goto_today();
            Ok(())
        }),
    ),
    (
        "add",
        Action::Arg(|c, content| {
            c.add_to_pool(content);
            Ok(())
        }),
    ),
    (
        "pick",
        Action::Arg(|c, content| {
            c.pick_up_content(content);
            Ok(())
        }),
    ),
    (
        "drop",
        Action::Arg(|c, day| {
            let day = day.parse::<u32>().map_err(|_| {
                Error::new(ErrorKind::CommandParse, &format!("'{}' is not a day", day))
            })?;
            c.drop_on(day);
            Ok(())
        }),
    ),
    (
        "delete",
        Action::NoArg(|c| {
            c.delete_selected();
            Ok(())
        }),
    ),
    (
        "quit",
        Action::NoArg(|c| {
            c.quit = true;
            Ok(())
        }),
    ),
];

/// `[count]name[ argument]`
fn parse_command(input: &str) -> IResult<&str, (Option<u32>, &str, Option<&str>)> {
    all_consuming(tuple((
        opt(map_res(digit1, |digits: &str| digits.parse::<u32>())),
        alpha1,
        opt(preceded(space1, rest)),
    )))(input)
}

pub fn run_command(context: &mut Context, cmd: &str) -> ActionResult {
    let (_, (count, name, arg)) = parse_command(cmd.trim())?;

    let action = COMMANDS
        .iter()
        .find(|(cmd_name, _)| *cmd_name == name)
        .map(|(_, action)| action)
        .ok_or_else(|| Error::new(ErrorKind::CommandParse, name))?;

    let arg = arg.map(str::trim).filter(|arg| !arg.is_empty());

    match (action, count, arg) {
        (Action::Repeatable(a), count, None) => a(context, count.unwrap_or(1)),
        (Action::Arg(a), None, Some(arg)) => a(context, arg),
        (Action::NoArg(a), None, None) => a(context),
        _ => Err(Error::new(
            ErrorKind::CommandParse,
            &format!("wrong arguments for '{}'", name),
        )),
    }
}

pub struct CommandParser<'a> {
    context: &'a mut Context,
}

impl<'a> CommandParser<'a> {
    pub fn new(context: &'a mut Context) -> Self {
        CommandParser { context }
    }
}

impl Behavior for CommandParser<'_> {
    fn input(self, input: Input) -> Option<Input> {
        if let Event::Key(Key::Char('\n')) = input.event {
            let cmd = self.context.command_line_mut().finish_line().to_owned();
            match run_command(self.context, &cmd) {
                Ok(()) => self.context.mode = Mode::Normal,
                Err(e) => {
                    log::debug!("Command '{}' failed: {}", cmd, e);
                    self.context.last_message = Some(e.to_string());
                }
            }
            None
        } else {
            Some(input)
        }
    }
}
