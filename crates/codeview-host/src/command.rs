//! Line command parsing.
//!
//! Each input line maps to exactly one `HostMessage`. The first word picks
//! the command; the rest are its arguments.

use codeview_core::{Language, ThemeChoice};
use codeview_diagnostics::{Category, MessageDraft, TextLocation};

use crate::app::HostMessage;

/// Help text listing every command.
pub const HELP: &str = "\
add                          open the message entry form
category <c>                 set the draft category (live, error, warning, info)
summary <text>               set the draft summary
line <n> / column <n>        set the draft location (1-based)
detail <text>                set the draft's detailed message
submit / cancel              close the form, adding or discarding the draft
msg <c> <line> <col> <text>  add a message in one go
remove <n>                   remove the n-th message of `list`
list                         list messages
goto <line> <col>            move the cursor
select <l> <c> <l> <c>       select a range
scroll <offset>              set the vertical scroll offset
lang <swift|haskell>         pick the language
theme <default|light|dark>   pick the theme
minimap / wrap               toggle layout options
save                         save the document
help / quit";

/// Errors produced by `parse`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("{command}: missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("{command}: invalid value `{value}`")]
    InvalidArgument {
        command: &'static str,
        value: String,
    },
}

/// Parses one input line.
pub fn parse(line: &str) -> Result<HostMessage, CommandError> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    let mut args = rest.split_whitespace();

    let message = match command.to_lowercase().as_str() {
        "" => return Err(CommandError::Empty),
        "add" => HostMessage::ShowMessageEntry,
        "category" => HostMessage::EntryCategoryChanged(category("category", args.next())?),
        "summary" => HostMessage::EntrySummaryChanged(rest.to_string()),
        "line" => HostMessage::EntryLineChanged(rest.to_string()),
        "column" => HostMessage::EntryColumnChanged(rest.to_string()),
        "detail" => HostMessage::EntryDescriptionChanged(rest.to_string()),
        "submit" => HostMessage::SubmitMessage,
        "cancel" => HostMessage::CancelMessageEntry,
        "msg" => {
            let category = category("msg", args.next())?;
            let line = required("msg", "line", args.next())?;
            let column = required("msg", "column", args.next())?;
            HostMessage::AddMessage(MessageDraft {
                category,
                summary: args.collect::<Vec<_>>().join(" "),
                line: line.to_string(),
                column: column.to_string(),
                description: String::new(),
            })
        }
        "remove" => HostMessage::RemoveMessage(number("remove", "index", args.next())?),
        "list" => HostMessage::ListMessages,
        "goto" => HostMessage::Goto(location("goto", &mut args)?),
        "select" => {
            let from = location("select", &mut args)?;
            let to = location("select", &mut args)?;
            HostMessage::Select(from, to)
        }
        "scroll" => {
            let value = required("scroll", "offset", args.next())?;
            match value.parse::<f64>() {
                Ok(offset) if offset.is_finite() && offset >= 0.0 => HostMessage::Scroll(offset),
                _ => return Err(invalid("scroll", value)),
            }
        }
        "lang" | "language" => {
            let value = required("lang", "language", args.next())?;
            let language: Language = value.parse().map_err(|_| invalid("lang", value))?;
            HostMessage::LanguageSelected(language)
        }
        "theme" => {
            let value = required("theme", "theme", args.next())?;
            let theme: ThemeChoice = value.parse().map_err(|_| invalid("theme", value))?;
            HostMessage::ThemeSelected(theme)
        }
        "minimap" => HostMessage::ToggleMinimap,
        "wrap" => HostMessage::ToggleWrapText,
        "save" => HostMessage::Save,
        "help" | "?" => HostMessage::Help,
        "quit" | "exit" => HostMessage::Quit,
        _ => return Err(CommandError::Unknown(command.to_string())),
    };
    Ok(message)
}

fn required<'a>(
    command: &'static str,
    argument: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, CommandError> {
    value.ok_or(CommandError::MissingArgument { command, argument })
}

fn invalid(command: &'static str, value: &str) -> CommandError {
    CommandError::InvalidArgument {
        command,
        value: value.to_string(),
    }
}

fn category(command: &'static str, value: Option<&str>) -> Result<Category, CommandError> {
    let value = required(command, "category", value)?;
    value.parse().map_err(|_| invalid(command, value))
}

fn number(
    command: &'static str,
    argument: &'static str,
    value: Option<&str>,
) -> Result<usize, CommandError> {
    let value = required(command, argument, value)?;
    match value.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(invalid(command, value)),
    }
}

fn location<'a>(
    command: &'static str,
    args: &mut impl Iterator<Item = &'a str>,
) -> Result<TextLocation, CommandError> {
    let line = number(command, "line", args.next())?;
    let column = number(command, "column", args.next())?;
    Ok(TextLocation::clamped(line, column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse("add"), Ok(HostMessage::ShowMessageEntry));
        assert_eq!(parse("  SUBMIT "), Ok(HostMessage::SubmitMessage));
        assert_eq!(parse("wrap"), Ok(HostMessage::ToggleWrapText));
        assert_eq!(parse(""), Err(CommandError::Empty));
        assert!(matches!(parse("frobnicate"), Err(CommandError::Unknown(_))));
    }

    #[test]
    fn test_entry_fields_keep_raw_text() {
        assert_eq!(
            parse("summary  Unexpected token"),
            Ok(HostMessage::EntrySummaryChanged("Unexpected token".into()))
        );
        assert_eq!(parse("line abc"), Ok(HostMessage::EntryLineChanged("abc".into())));
        assert_eq!(parse("column"), Ok(HostMessage::EntryColumnChanged(String::new())));
        assert_eq!(
            parse("category info"),
            Ok(HostMessage::EntryCategoryChanged(Category::Informational))
        );
    }

    #[test]
    fn test_msg() {
        let parsed = parse("msg error 3 5 Unexpected token").unwrap();
        assert_eq!(
            parsed,
            HostMessage::AddMessage(MessageDraft {
                category: Category::Error,
                summary: "Unexpected token".into(),
                line: "3".into(),
                column: "5".into(),
                description: String::new(),
            })
        );

        assert_eq!(
            parse("msg warning 3"),
            Err(CommandError::MissingArgument {
                command: "msg",
                argument: "column"
            })
        );
        assert!(matches!(
            parse("msg fatal 1 1 x"),
            Err(CommandError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_navigation() {
        assert_eq!(
            parse("goto 3 5"),
            Ok(HostMessage::Goto(TextLocation::new(3, 5).unwrap()))
        );
        assert!(parse("goto 0 5").is_err());
        assert_eq!(
            parse("select 1 1 2 4"),
            Ok(HostMessage::Select(
                TextLocation::START,
                TextLocation::new(2, 4).unwrap()
            ))
        );
        assert_eq!(parse("scroll 12.5"), Ok(HostMessage::Scroll(12.5)));
        assert!(parse("scroll -1").is_err());
        assert!(parse("scroll NaN").is_err());
    }

    #[test]
    fn test_pickers() {
        assert_eq!(
            parse("lang haskell"),
            Ok(HostMessage::LanguageSelected(Language::Haskell))
        );
        assert_eq!(
            parse("theme dark"),
            Ok(HostMessage::ThemeSelected(ThemeChoice::Dark))
        );
        assert!(parse("theme sepia").is_err());
    }
}
