//! Plain-text rendering of the roster.

use std::io::{self, Write};

use spycats_core::{format_salary, Cat, CatForm, ListView, Roster, RowActions, RowView, SalaryCell};

const HEADER: [&str; 6] = ["ID", "NAME", "EXPERIENCE", "BREED", "SALARY", "ACTIONS"];

pub fn render_list<W: Write>(out: &mut W, view: &ListView<'_>) -> io::Result<()> {
    match view {
        ListView::Loading => writeln!(out, "Loading spy cats..."),
        ListView::Empty => {
            writeln!(out, "No spy cats found.")?;
            writeln!(out, "Add your first spy cat to get started!")
        }
        ListView::Rows(rows) => render_table(out, rows),
    }
}

fn render_table<W: Write>(out: &mut W, rows: &[RowView<'_>]) -> io::Result<()> {
    let body: Vec<[String; 6]> = rows
        .iter()
        .map(|row| {
            [
                row.cat.id.to_string(),
                row.cat.name.clone(),
                row.experience.clone(),
                row.cat.breed.clone(),
                salary_cell(&row.salary),
                actions_cell(row.actions).to_string(),
            ]
        })
        .collect();

    let mut widths = HEADER.map(str::len);
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(out, &HEADER, &widths)?;
    for cells in &body {
        let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
        write_row(out, &cells, &widths)?;
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, cells: &[&str], widths: &[usize]) -> io::Result<()> {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    writeln!(out, "{}", line.join("  ").trim_end())
}

fn salary_cell(cell: &SalaryCell<'_>) -> String {
    match cell {
        SalaryCell::Display(text) => text.clone(),
        SalaryCell::Editing(edit) => format!("{} (editing)", format_salary(edit.salary)),
    }
}

fn actions_cell(actions: RowActions) -> &'static str {
    match actions {
        RowActions::Editing => "Editing...",
        RowActions::Available { deleting: true, .. } => "Deleting...",
        RowActions::Available {
            edit_enabled: true,
            delete_enabled: true,
            ..
        } => "edit, delete",
        RowActions::Available { edit_enabled: true, .. } => "edit",
        RowActions::Available { delete_enabled: true, .. } => "delete",
        RowActions::Available { .. } => "-",
    }
}

pub fn render_cat<W: Write>(out: &mut W, cat: &Cat) -> io::Result<()> {
    writeln!(out, "#{} {}", cat.id, cat.name)?;
    writeln!(out, "  Experience: {} years", cat.experience)?;
    writeln!(out, "  Breed:      {}", cat.breed)?;
    writeln!(out, "  Salary:     {}", format_salary(cat.salary))
}

pub fn render_form<W: Write>(out: &mut W, form: &CatForm) -> io::Result<()> {
    writeln!(out, "New spy cat:")?;
    writeln!(out, "  name:       {}", form.name)?;
    writeln!(out, "  experience: {}", form.experience)?;
    writeln!(out, "  breed:      {}", form.breed)?;
    writeln!(out, "  salary:     {}", form.salary)?;
    if let Some(error) = form.error() {
        writeln!(out, "Error:")?;
        writeln!(out, "{error}")?;
    }
    Ok(())
}

/// Everything the page shows: load banner, list, inline errors and forms.
pub fn render_roster<W: Write>(out: &mut W, roster: &Roster) -> io::Result<()> {
    if let Some(banner) = roster.error_banner() {
        writeln!(out, "Error loading cats:")?;
        writeln!(out, "{banner}")?;
        writeln!(out, "Type `retry` to try again.")?;
    }
    render_list(out, &roster.view())?;
    if let Some(error) = roster.delete_error() {
        writeln!(out, "Delete failed: {error}")?;
    }
    if let Some(edit) = roster.editing() {
        writeln!(out, "Editing salary of #{}: {}", edit.id(), format_salary(edit.salary))?;
        if let Some(error) = edit.error() {
            writeln!(out, "  {error}")?;
        }
    }
    if let Some(form) = roster.create_form() {
        render_form(out, form)?;
    }
    Ok(())
}
