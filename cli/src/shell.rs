//! Interactive session: one roster kept alive across commands.

use std::io::{BufRead, Write};

use spycats_core::{CatId, Field, Roster, RosterError, Transport};
use tracing::debug;

use crate::app::delete_with_prompt;
use crate::render::{render_form, render_roster};

const HELP: &str = "\
commands:
  list                 show the roster
  retry                reload the roster from the backend
  add                  open the create form
  set <field> <value>  fill the create form (name, experience, breed, salary)
  submit               create the spy cat
  close                close the create form
  edit <id>            edit a salary inline
  salary <value>       set the salary being edited
  save                 save the edited salary
  cancel               stop editing
  delete <id>          delete a spy cat
  help                 show this help
  quit                 leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Retry,
    Add,
    Set(Field, String),
    Submit,
    Close,
    Edit(CatId),
    Salary(String),
    Save,
    Cancel,
    Delete(CatId),
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let command = match word.to_ascii_lowercase().as_str() {
            "" => return Ok(None),
            "list" | "ls" => ShellCommand::List,
            "retry" | "reload" => ShellCommand::Retry,
            "add" | "new" => ShellCommand::Add,
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                ShellCommand::Set(parse_field(field)?, value.trim().to_string())
            }
            "submit" => ShellCommand::Submit,
            "close" => ShellCommand::Close,
            "edit" => ShellCommand::Edit(parse_id(rest)?),
            "salary" => ShellCommand::Salary(rest.to_string()),
            "save" => ShellCommand::Save,
            "cancel" => ShellCommand::Cancel,
            "delete" | "rm" => ShellCommand::Delete(parse_id(rest)?),
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => return Err(format!("unknown command `{other}`, try `help`")),
        };
        Ok(Some(command))
    }
}

fn parse_field(name: &str) -> Result<Field, String> {
    match name.to_ascii_lowercase().as_str() {
        "name" => Ok(Field::Name),
        "experience" => Ok(Field::Experience),
        "breed" => Ok(Field::Breed),
        "salary" => Ok(Field::Salary),
        "" => Err("usage: set <field> <value>".to_string()),
        other => Err(format!("unknown field `{other}`")),
    }
}

fn parse_id(raw: &str) -> Result<CatId, String> {
    raw.parse().map(CatId).map_err(|_| format!("`{raw}` is not a spy cat id"))
}

/// Run the shell until `quit` or end of input.
pub fn run<T, R, W>(roster: &mut Roster, transport: &T, mut input: R, mut out: W) -> anyhow::Result<()>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    let request = roster.load()?;
    roster.run(transport, request);
    render_roster(&mut out, roster)?;

    loop {
        write!(out, "spycats> ")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(msg) => {
                writeln!(out, "{msg}")?;
                continue;
            }
        };
        debug!(?command, "shell command");
        if command == ShellCommand::Quit {
            break;
        }
        match step(roster, transport, command, &mut input, &mut out) {
            Ok(()) => {}
            Err(e) => writeln!(out, "error: {e}")?,
        }
    }
    Ok(())
}

fn step<T, R, W>(
    roster: &mut Roster,
    transport: &T,
    command: ShellCommand,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    match command {
        ShellCommand::List => render_roster(out, roster)?,
        ShellCommand::Retry => {
            let request = roster.load()?;
            roster.run(transport, request);
            render_roster(out, roster)?;
        }
        ShellCommand::Add => {
            let form = roster.open_create_form();
            render_form(out, form)?;
        }
        ShellCommand::Set(field, value) => {
            let form = roster.create_form_mut().ok_or(RosterError::NoCreateForm)?;
            form.set(field, &value);
            render_form(out, form)?;
        }
        ShellCommand::Submit => {
            match roster.submit_create() {
                Ok(request) => roster.run(transport, request),
                // The message is already on the form.
                Err(RosterError::Invalid(_)) => {}
                Err(e) => return Err(e.into()),
            }
            render_roster(out, roster)?;
        }
        ShellCommand::Close => roster.close_create_form()?,
        ShellCommand::Edit(id) => {
            roster.start_edit(id)?;
            render_roster(out, roster)?;
        }
        ShellCommand::Salary(value) => {
            roster.edit_mut().ok_or(RosterError::NotEditing)?.set_salary(&value);
            render_roster(out, roster)?;
        }
        ShellCommand::Save => {
            match roster.save_edit() {
                Ok(request) => roster.run(transport, request),
                Err(RosterError::Invalid(_)) => {}
                Err(e) => return Err(e.into()),
            }
            render_roster(out, roster)?;
        }
        ShellCommand::Cancel => {
            roster.cancel_edit()?;
            render_roster(out, roster)?;
        }
        ShellCommand::Delete(id) => {
            if delete_with_prompt(roster, transport, id, false, input, out)? {
                render_roster(out, roster)?;
            } else {
                writeln!(out, "Cancelled.")?;
            }
        }
        ShellCommand::Help => writeln!(out, "{HELP}")?,
        ShellCommand::Quit => {}
    }
    Ok(())
}
