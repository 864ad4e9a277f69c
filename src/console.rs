//! Command language of the interactive users screen.

use thiserror::Error;

use crate::config::PAGE_SIZE_OPTIONS;
use crate::models::FORM_FIELDS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    List,
    Page(usize),
    PageSize(usize),
    New,
    Edit(i64),
    Set { field: String, value: String },
    Draft,
    Save,
    Cancel,
    Delete(i64),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("Unknown command '{0}', type 'help' for a list")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Page size must be one of 5, 10 or 20")]
    PageSize,

    #[error("Unknown field '{0}', expected one of fullName, email, username, password, role")]
    Field(String),
}

pub const HELP: &str = "\
list                    refetch and show the users table
page <n>                show page n
page-size <5|10|20>     change rows per page
new                     open the form on an empty user
edit <id>               open the form on an existing user
set <field> <value>     fill a form field (fullName, email, username, password, role as <id>:<name>)
draft                   show the form contents
save                    submit the form
cancel                  close the form without saving
delete <id>             delete a user
help                    show this help
quit                    leave";

/// Parse one input line. Empty lines yield `Ok(None)`.
///
/// # Examples
///
/// ```
/// use roster::console::{parse_command, ConsoleCommand};
///
/// assert_eq!(parse_command("edit 5").unwrap(), Some(ConsoleCommand::Edit(5)));
/// assert_eq!(
///     parse_command("set fullName Ada Lovelace").unwrap(),
///     Some(ConsoleCommand::Set { field: "fullName".into(), value: "Ada Lovelace".into() })
/// );
/// assert_eq!(parse_command("   ").unwrap(), None);
/// ```
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, ConsoleError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((h, r)) => (h, r.trim()),
        None => (line, ""),
    };

    let cmd = match head.to_lowercase().as_str() {
        "list" | "ls" => ConsoleCommand::List,
        "page" => ConsoleCommand::Page(parse_number(rest, "page <n>")?),
        "page-size" => {
            let size = parse_number(rest, "page-size <5|10|20>")?;
            if !PAGE_SIZE_OPTIONS.contains(&size) {
                return Err(ConsoleError::PageSize);
            }
            ConsoleCommand::PageSize(size)
        }
        "new" | "create" => ConsoleCommand::New,
        "edit" => ConsoleCommand::Edit(parse_id(rest, "edit <id>")?),
        "set" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((f, v)) => (f, v.trim()),
                None if !rest.is_empty() => (rest, ""),
                None => return Err(ConsoleError::Usage("set <field> <value>")),
            };
            if !FORM_FIELDS.contains(&field) {
                return Err(ConsoleError::Field(field.to_string()));
            }
            ConsoleCommand::Set { field: field.to_string(), value: value.to_string() }
        }
        "draft" | "form" => ConsoleCommand::Draft,
        "save" | "submit" => ConsoleCommand::Save,
        "cancel" | "close" => ConsoleCommand::Cancel,
        "delete" | "rm" => ConsoleCommand::Delete(parse_id(rest, "delete <id>")?),
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" | "q" => ConsoleCommand::Quit,
        other => return Err(ConsoleError::UnknownCommand(other.to_string())),
    };
    Ok(Some(cmd))
}

fn parse_number(raw: &str, usage: &'static str) -> Result<usize, ConsoleError> {
    raw.parse::<usize>().map_err(|_| ConsoleError::Usage(usage))
}

fn parse_id(raw: &str, usage: &'static str) -> Result<i64, ConsoleError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ConsoleError::Usage(usage)),
    }
}
