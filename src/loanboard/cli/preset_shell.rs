//! Interactive preset manager (`loanboard presets edit`).
//!
//! Reads one command per line. Edits go to a working copy; `save` writes them,
//! `quit` (or end of input) throws them away.

use super::render::{render_messages, render_presets};
use loanboard::api::{CatalogApi, CmdResult};
use loanboard::commands::helpers::preset_position;
use loanboard::commands::CmdMessage;
use loanboard::error::{CatalogError, Result};
use loanboard::model::{AmountField, PresetCategory, AMOUNT_UNITS};
use loanboard::store::DataStore;
use std::io::{BufRead, Write};

const PROMPT: &str = "presets> ";

const HELP: &str = "\
Commands:
  list                                 show all presets
  add <category>                       append a placeholder preset
  set <category> <n> <text>            change preset n
  set amount <n> <value|unit> <text>   change one half of an amount preset
  rm <category> <n>                    remove preset n
  save                                 write changes and exit
  quit                                 discard changes and exit
Categories: amount, procedure, period, age, promotion, discount";

fn help_text() -> String {
    format!("{}\nAmount units: {}", HELP, AMOUNT_UNITS.join(", "))
}

#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    Empty,
    List,
    Add(PresetCategory),
    Set {
        category: PresetCategory,
        number: usize,
        field: Option<AmountField>,
        value: String,
    },
    Remove {
        category: PresetCategory,
        number: usize,
    },
    Save,
    Quit,
    Help,
}

pub fn run<S, R, W>(
    api: &mut CatalogApi<S>,
    input: R,
    out: &mut W,
    use_color: bool,
) -> Result<CmdResult>
where
    S: DataStore,
    R: BufRead,
    W: Write,
{
    let mut editor = api.preset_editor();
    write!(out, "{}", render_presets(editor.presets(), use_color))?;
    writeln!(out, "Type `help` for commands.")?;

    let mut lines = input.lines();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };

        let outcome = match parse_line(&line?) {
            Ok(ShellCommand::Empty) => continue,
            Ok(ShellCommand::Save) => return api.commit_preset_editor(editor),
            Ok(ShellCommand::Quit) => break,
            Ok(ShellCommand::Help) => {
                writeln!(out, "{}", help_text())?;
                continue;
            }
            Ok(ShellCommand::List) => {
                write!(out, "{}", render_presets(editor.presets(), use_color))?;
                continue;
            }
            Ok(ShellCommand::Add(category)) => Ok(editor.add(category)),
            Ok(ShellCommand::Set {
                category,
                number,
                field,
                value,
            }) => editor.set(category, number, field, &value),
            Ok(ShellCommand::Remove { category, number }) => editor.remove(category, number),
            Err(e) => Err(e),
        };

        let messages = match outcome {
            Ok(result) => result.messages,
            Err(e) => vec![CmdMessage::error(e.to_string())],
        };
        write!(out, "{}", render_messages(&messages, use_color))?;
    }

    let message = if editor.is_dirty() {
        "Preset changes discarded."
    } else {
        "No preset changes."
    };
    Ok(CmdResult::default().with_message(CmdMessage::info(message)))
}

fn parse_line(line: &str) -> Result<ShellCommand> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(ShellCommand::Empty);
    };

    match verb {
        "list" | "ls" => Ok(ShellCommand::List),
        "add" => Ok(ShellCommand::Add(category(words.next())?)),
        "set" => {
            let category = category(words.next())?;
            let number = number(words.next())?;
            let field = match category {
                PresetCategory::Amount => Some(
                    words
                        .next()
                        .ok_or_else(|| {
                            usage(&format!(
                                "set amount <n> <value|unit> <text> (units: {})",
                                AMOUNT_UNITS.join(", ")
                            ))
                        })?
                        .parse::<AmountField>()?,
                ),
                _ => None,
            };
            let value = words.collect::<Vec<_>>().join(" ");
            Ok(ShellCommand::Set {
                category,
                number,
                field,
                value,
            })
        }
        "rm" | "remove" | "delete" => Ok(ShellCommand::Remove {
            category: category(words.next())?,
            number: number(words.next())?,
        }),
        "save" => Ok(ShellCommand::Save),
        "quit" | "q" | "exit" => Ok(ShellCommand::Quit),
        "help" | "?" => Ok(ShellCommand::Help),
        other => Err(CatalogError::Api(format!(
            "Unknown command: {} (type `help`)",
            other
        ))),
    }
}

fn category(word: Option<&str>) -> Result<PresetCategory> {
    word.ok_or_else(|| usage("a category is required"))?.parse()
}

fn number(word: Option<&str>) -> Result<usize> {
    let word = word.ok_or_else(|| usage("a preset number is required"))?;
    let n = word
        .parse::<usize>()
        .map_err(|_| CatalogError::Api(format!("Not a preset number: {}", word)))?;
    preset_position(n)?;
    Ok(n)
}

fn usage(hint: &str) -> CatalogError {
    CatalogError::Api(format!("Usage: {}", hint))
}
