//! Turns loaded records into the rows of the students table.
//!
//! Every renderer goes through [`TableRow`], so column order is fixed in one
//! place: id, name, class, course, enrollment.

use std::fmt::Write as _;

use shared::domain::{Student, StudentId};

pub const COLUMNS: [&str; 5] = ["ID", "Name", "Class", "Course", "Enrollment"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: StudentId,
    pub cells: [String; 5],
}

impl From<&Student> for TableRow {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            cells: [
                student.id.to_string(),
                student.name.clone(),
                student.class_group.clone(),
                student.course.clone(),
                student.enrollment.clone(),
            ],
        }
    }
}

/// Contents of the table's `<tbody>`: one `<tr>` per record, with edit and
/// delete buttons bound to that record's id.
pub fn table_rows_html(students: &[Student]) -> String {
    let mut out = String::new();
    for student in students {
        let row = TableRow::from(student);
        out.push_str("<tr>");
        for cell in &row.cells {
            let _ = write!(out, "<td>{}</td>", escape_html(cell));
        }
        let _ = write!(
            out,
            "<td><button data-action=\"edit\" data-id=\"{id}\">Edit</button>\
             <button data-action=\"delete\" data-id=\"{id}\">Delete</button></td>",
            id = row.id
        );
        out.push_str("</tr>\n");
    }
    out
}

/// Column-aligned text table with a header line.
pub fn table_text(students: &[Student]) -> String {
    let rows: Vec<TableRow> = students.iter().map(TableRow::from).collect();

    let mut widths = COLUMNS.map(|title| title.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(&row.cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_text_line(&mut out, &COLUMNS.map(str::to_string), &widths);
    for row in &rows {
        push_text_line(&mut out, &row.cells, &widths);
    }
    out
}

fn push_text_line(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
