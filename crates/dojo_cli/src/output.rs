//! Plain-text and JSON rendering of list views.

use chrono::NaiveDate;
use dojo_core::forms::Violation;
use dojo_core::models::{ClientRecord, InstructorRecord};
use serde::Serialize;
use std::fmt::{Display, Write as _};

pub fn to_json<T: Serialize>(records: &[T]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let mut out = String::new();
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_row(&mut out, &header_cells, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

/// Client table; ages are computed as of `today`.
pub fn clients_table(records: &[ClientRecord], today: NaiveDate) -> String {
    if records.is_empty() {
        return "No hay clientes.\n".to_string();
    }
    let rows = records
        .iter()
        .map(|client| {
            vec![
                client.id.to_string(),
                format!("{} {}", client.name, client.last_name),
                format!("{} {}", client.document_type, client.document),
                client.email.clone(),
                client.cellphome.clone(),
                client
                    .age_on(today)
                    .map(|age| age.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    table(
        &["ID", "NOMBRE", "DOCUMENTO", "EMAIL", "CELULAR", "EDAD"],
        rows,
    )
}

pub fn instructors_table(records: &[InstructorRecord]) -> String {
    if records.is_empty() {
        return "No hay instructores.\n".to_string();
    }
    let rows = records
        .iter()
        .map(|instructor| {
            vec![
                instructor.id.to_string(),
                format!("{} {}", instructor.name, instructor.last_name),
                instructor.specialty.clone(),
                instructor.belt_level.clone(),
                instructor.status.label().to_string(),
                if instructor.is_published { "Sí" } else { "No" }.to_string(),
                instructor.email.clone(),
            ]
        })
        .collect();
    table(
        &["ID", "NOMBRE", "ESPECIALIDAD", "CINTURÓN", "ESTADO", "PUBLICADO", "EMAIL"],
        rows,
    )
}

/// One line per violation, `field: reason`.
pub fn violations<F: Display>(violations: &[(F, Violation)]) -> String {
    violations
        .iter()
        .map(|(field, violation)| format!("  {}: {}", field, violation))
        .collect::<Vec<_>>()
        .join("\n")
}
