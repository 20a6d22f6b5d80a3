//! Bulk CSV export of assessment records.

use std::path::Path;

use anyhow::Result;

use pathway_core::{AssessmentError, AssessmentRecord, Category};

const FIXED_COLUMNS: [&str; 7] = [
    "ID",
    "Name",
    "School",
    "District",
    "Mobile",
    "Board",
    "Dominant Trait",
];

/// Quote a field per RFC 4180 when it contains a delimiter, quote or newline.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn push_row(out: &mut String, fields: &[String]) {
    out.push_str(&fields.join(","));
    out.push_str("\r\n");
}

/// Render all records as a CSV table, one row per record.
///
/// Category columns follow the fixed category order and hold raw scores to
/// two decimals. Fails with [`AssessmentError::NoRecords`] for an empty slice.
pub fn render_csv(records: &[AssessmentRecord]) -> Result<String, AssessmentError> {
    if records.is_empty() {
        return Err(AssessmentError::NoRecords);
    }

    let mut out = String::new();

    let header: Vec<String> = FIXED_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(Category::ALL.iter().map(|c| c.name().to_string()))
        .collect();
    push_row(&mut out, &header);

    for r in records {
        let mut row = vec![
            r.id.to_string(),
            csv_field(&r.identity.name),
            csv_field(&r.identity.school),
            csv_field(&r.identity.district),
            csv_field(&r.identity.mobile),
            csv_field(&r.identity.board),
            r.dominant_trait.name().to_string(),
        ];
        row.extend(r.scores.iter().map(|(_, score)| format!("{score:.2}")));
        push_row(&mut out, &row);
    }

    Ok(out)
}

/// Write the CSV export to a file.
pub fn write_csv(records: &[AssessmentRecord], path: &Path) -> Result<()> {
    let csv = render_csv(records)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, csv)?;
    Ok(())
}
