//! Line-oriented session scripts.
//!
//! One command per line; blank lines and lines starting with `#` are skipped.
//!
//! ```text
//! add
//! type 1 amo
//! wait
//! down 1
//! enter 1
//! show
//! ```

use anyhow::{Context, Result, anyhow, bail};
use rxpad_types::{InteractionTarget, NavDirection, PrescriptionDetails, RowId, SessionEvent};

/// A parsed script line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Feed an event to the session
    Event(SessionEvent),
    /// Wait for every outstanding lookup
    Wait,
    /// Print the rows
    Show,
    /// Print the document request as JSON
    Payload,
}

pub fn parse_script(source: &str) -> Result<Vec<Command>> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| parse_line(line).with_context(|| format!("line {}: '{}'", index + 1, line.trim())))
        .collect()
}

pub fn parse_line(line: &str) -> Result<Command> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let mut args = rest.split_whitespace();

    let command = match verb {
        "add" => Command::Event(SessionEvent::AddRow),
        "remove" => Command::Event(SessionEvent::RemoveRow(row_id(args.next())?)),
        "type" => {
            let row_id = row_id(args.next())?;
            // Everything after the id is the typed text, inner spacing included.
            let text = rest
                .split_once(char::is_whitespace)
                .map(|(_, text)| text.trim_start())
                .unwrap_or("");
            Command::Event(SessionEvent::Input {
                row_id,
                text: text.to_string(),
            })
        }
        "down" | "up" => {
            let direction = if verb == "down" { NavDirection::Down } else { NavDirection::Up };
            Command::Event(SessionEvent::Navigate {
                row_id: row_id(args.next())?,
                direction,
            })
        }
        "enter" => Command::Event(SessionEvent::CommitKey(row_id(args.next())?)),
        "esc" => Command::Event(SessionEvent::Escape(row_id(args.next())?)),
        "hover" => Command::Event(SessionEvent::Hover {
            row_id: row_id(args.next())?,
            index: index(args.next())?,
        }),
        "click" => Command::Event(SessionEvent::Click {
            row_id: row_id(args.next())?,
            index: index(args.next())?,
        }),
        "focus" => Command::Event(SessionEvent::Interaction(InteractionTarget::SearchField(row_id(
            args.next(),
        )?))),
        "outside" => Command::Event(SessionEvent::Interaction(InteractionTarget::Elsewhere)),
        "details" => {
            let row_id = row_id(args.next())?;
            let json = rest.split_once(char::is_whitespace).map(|(_, json)| json).unwrap_or("");
            let details: PrescriptionDetails =
                serde_json::from_str(json).context("details must be a JSON object")?;
            Command::Event(SessionEvent::UpdateDetails { row_id, details })
        }
        "wait" => Command::Wait,
        "show" => Command::Show,
        "payload" => Command::Payload,
        other => bail!("unknown command '{other}'"),
    };
    Ok(command)
}

fn row_id(arg: Option<&str>) -> Result<RowId> {
    let arg = arg.ok_or_else(|| anyhow!("missing row id"))?;
    Ok(arg.parse()?)
}

fn index(arg: Option<&str>) -> Result<usize> {
    let arg = arg.ok_or_else(|| anyhow!("missing suggestion index"))?;
    arg.parse().with_context(|| format!("invalid suggestion index '{arg}'"))
}
