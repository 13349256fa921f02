use crate::logging::{LoadLog, LoadStage};
use crate::LoadError;
use liftoff_model::{BoosterCategory, LaunchRecord, LaunchSite, Outcome};
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub(crate) const COL_SITE: &str = "Launch Site";
pub(crate) const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub(crate) const COL_OUTCOME: &str = "class";
pub(crate) const COL_BOOSTER: &str = "Booster Version Category";

struct ColumnIndexes {
    site: usize,
    payload: usize,
    outcome: usize,
    booster: usize,
}

pub(crate) fn parse_launch_csv(
    path: &Path,
    log: &mut LoadLog,
) -> Result<Vec<LaunchRecord>, LoadError> {
    let file = fs::File::open(path)
        .map_err(|e| LoadError(format!("cannot open {}: {e}", path.display())))?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let header = loop {
        match lines.next() {
            Some(line) => {
                let line = line.map_err(|e| LoadError(e.to_string()))?;
                if line.trim().is_empty() {
                    continue;
                }
                break line;
            }
            None => return Err(LoadError(format!("{} is empty", path.display()))),
        }
    };
    let columns = resolve_columns(&header)?;
    log.emit(LoadStage::Parse, "load.header.resolved", [("header", header.clone())]);

    let mut out = Vec::new();
    let mut row_number = 1_usize;
    for line in lines {
        let line = line.map_err(|e| LoadError(e.to_string()))?;
        row_number += 1;
        if line.trim().is_empty() {
            continue;
        }
        out.push(parse_row(&line, &columns, row_number)?);
    }
    if out.is_empty() {
        return Err(LoadError(format!(
            "{} holds no launch records",
            path.display()
        )));
    }
    Ok(out)
}

fn resolve_columns(header: &str) -> Result<ColumnIndexes, LoadError> {
    let names = split_csv_line(header);
    let find = |wanted: &str| -> Result<usize, LoadError> {
        names
            .iter()
            .position(|name| name.trim() == wanted)
            .ok_or_else(|| LoadError(format!("required column '{wanted}' is missing")))
    };
    Ok(ColumnIndexes {
        site: find(COL_SITE)?,
        payload: find(COL_PAYLOAD)?,
        outcome: find(COL_OUTCOME)?,
        booster: find(COL_BOOSTER)?,
    })
}

fn parse_row(
    line: &str,
    columns: &ColumnIndexes,
    row_number: usize,
) -> Result<LaunchRecord, LoadError> {
    let fields = split_csv_line(line);
    let required = columns
        .site
        .max(columns.payload)
        .max(columns.outcome)
        .max(columns.booster)
        + 1;
    if fields.len() < required {
        return Err(LoadError(format!(
            "row {row_number}: expected at least {required} columns, got {}",
            fields.len()
        )));
    }

    let site = LaunchSite::parse(&fields[columns.site])
        .map_err(|e| LoadError(format!("row {row_number}: {e}")))?;
    let payload_mass_kg: f64 = fields[columns.payload]
        .trim()
        .parse()
        .map_err(|_| {
            LoadError(format!(
                "row {row_number}: invalid payload mass '{}'",
                fields[columns.payload]
            ))
        })?;
    let outcome = Outcome::parse(&fields[columns.outcome])
        .map_err(|e| LoadError(format!("row {row_number}: {e}")))?;
    let booster_category = BoosterCategory::parse(&fields[columns.booster])
        .map_err(|e| LoadError(format!("row {row_number}: {e}")))?;

    LaunchRecord::new(site, payload_mass_kg, outcome, booster_category)
        .map_err(|e| LoadError(format!("row {row_number}: {e}")))
}

/// Splits one CSV line. Double-quoted fields may hold commas; a doubled
/// quote inside a quoted field is an escaped quote.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::split_csv_line;

    #[test]
    fn splits_plain_and_quoted_fields() {
        assert_eq!(split_csv_line("a,b,c"), vec!["a", "b", "c"]);
        assert_eq!(
            split_csv_line("\"CCAFS, LC-40\",5000,1"),
            vec!["CCAFS, LC-40", "5000", "1"]
        );
        assert_eq!(split_csv_line("\"say \"\"go\"\"\",x"), vec!["say \"go\"", "x"]);
        assert_eq!(split_csv_line("one"), vec!["one"]);
        assert_eq!(split_csv_line("trailing,"), vec!["trailing", ""]);
    }
}
