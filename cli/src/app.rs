//! Command-line surface and one-shot command execution.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use spycats_core::{Cat, CatId, Roster, Transport};

use crate::render::{render_cat, render_list};

#[derive(Parser, Debug)]
#[command(name = "spycats", version, about = "Manage spy cats through the spy cats API")]
pub struct Cli {
    /// Backend base URL; overrides the config file and SPYCATS_API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Settings file (defaults to ./spycats.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List every spy cat.
    List,
    /// Show one spy cat.
    Show { id: i64 },
    /// Add a spy cat.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 0)]
        experience: u32,
        #[arg(long)]
        breed: String,
        #[arg(long)]
        salary: Decimal,
    },
    /// Change a spy cat's salary.
    SetSalary { id: i64, salary: Decimal },
    /// Delete a spy cat after confirmation.
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    /// Interactive session over a live roster.
    Shell,
}

/// Ask the user to confirm deleting `cat`. Anything but y/yes declines.
pub fn confirm_delete<R: BufRead, W: Write>(input: &mut R, out: &mut W, cat: &Cat) -> std::io::Result<bool> {
    write!(out, "Are you sure you want to delete this spy cat? ({}) [y/N] ", cat.name)?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

/// Delete through the roster, prompting on `input` unless `assume_yes`.
/// Returns whether a request was sent.
pub fn delete_with_prompt<T, R, W>(
    roster: &mut Roster,
    transport: &T,
    id: CatId,
    assume_yes: bool,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<bool>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    let mut prompt_error = None;
    let request = roster.delete(id, |cat| {
        if assume_yes {
            return true;
        }
        confirm_delete(input, out, cat).unwrap_or_else(|e| {
            prompt_error = Some(e);
            false
        })
    })?;
    if let Some(e) = prompt_error {
        return Err(e).context("reading confirmation");
    }
    match request {
        Some(request) => {
            roster.run(transport, request);
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Run a one-shot command. `Shell` is handled by `crate::shell::run`.
pub fn execute<T, R, W>(
    command: Command,
    roster: &mut Roster,
    transport: &T,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    match command {
        Command::List => {
            load(roster, transport)?;
        }
        Command::Show { id } => {
            let client = roster.client();
            let response = client.interpret(transport.execute(client.build_get_cat(CatId(id))))?;
            let cat = client.parse_get_cat(response)?;
            render_cat(out, &cat)?;
            return Ok(());
        }
        Command::Add {
            name,
            experience,
            breed,
            salary,
        } => {
            let form = roster.open_create_form();
            form.name = name;
            form.experience = experience;
            form.breed = breed;
            form.salary = salary;
            let request = roster.submit_create()?;
            roster.run(transport, request);
            if let Some(error) = roster.create_form().and_then(|form| form.error()) {
                bail!("{error}");
            }
            writeln!(out, "Spy cat added.")?;
        }
        Command::SetSalary { id, salary } => {
            load(roster, transport)?;
            roster.start_edit(CatId(id))?.salary = salary;
            let request = roster.save_edit()?;
            roster.run(transport, request);
            if let Some(error) = roster.editing().and_then(|edit| edit.error()) {
                bail!("{error}");
            }
            writeln!(out, "Salary updated.")?;
        }
        Command::Delete { id, yes } => {
            load(roster, transport)?;
            if !delete_with_prompt(roster, transport, CatId(id), yes, input, out)? {
                writeln!(out, "Cancelled.")?;
                return Ok(());
            }
            if let Some(error) = roster.delete_error() {
                bail!("{error}");
            }
            writeln!(out, "Spy cat deleted.")?;
        }
        Command::Shell => return Err(anyhow!("the shell is not a one-shot command")),
    }

    // A mutation that went through can still be followed by a failed refresh.
    if let Some(banner) = roster.error_banner() {
        bail!("{banner}");
    }
    render_list(out, &roster.view())?;
    Ok(())
}

fn load<T: Transport>(roster: &mut Roster, transport: &T) -> anyhow::Result<()> {
    let request = roster.load()?;
    roster.run(transport, request);
    match roster.error_banner() {
        Some(banner) => bail!("{banner}"),
        None => Ok(()),
    }
}
