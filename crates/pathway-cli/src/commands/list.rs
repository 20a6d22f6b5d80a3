//! The `pathway list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use pathway_core::statistics::CohortSummary;
use pathway_core::{AssessmentRecord, Category};

use super::open_assessor;

pub async fn execute(config_path: Option<PathBuf>, format: String) -> Result<()> {
    let (_, assessor) = open_assessor(config_path).await?;
    let records = assessor.records().await?;
    let summary = CohortSummary::from_records(&records);

    match format.as_str() {
        "json" => {
            let out = serde_json::json!({ "records": records, "summary": summary });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        "table" => {
            if records.is_empty() {
                println!("No assessments recorded yet.");
                return Ok(());
            }
            println!("{}", records_table(&records));
            print_summary(&summary);
        }
        other => anyhow::bail!("unknown format: {other} (expected table or json)"),
    }

    Ok(())
}

fn records_table(records: &[AssessmentRecord]) -> Table {
    let mut table = Table::new();
    let mut header = vec!["ID", "Name", "School", "District", "Board", "Trait", "Stream"];
    header.extend(Category::ALL.iter().map(|c| c.name()));
    table.set_header(header);

    for r in records {
        let mut row = vec![
            Cell::new(r.id),
            Cell::new(&r.identity.name),
            Cell::new(&r.identity.school),
            Cell::new(&r.identity.district),
            Cell::new(&r.identity.board),
            Cell::new(r.dominant_trait),
            Cell::new(r.suggested_stream()),
        ];
        row.extend(r.scores.iter().map(|(_, score)| Cell::new(format!("{score:.1}"))));
        table.add_row(row);
    }
    table
}

fn print_summary(summary: &CohortSummary) {
    println!("\n{} assessment(s)", summary.total);
    let streams: Vec<String> = summary
        .per_stream
        .iter()
        .map(|(stream, count)| format!("{stream} {count}"))
        .collect();
    println!("Streams: {}", streams.join(", "));
    if let Some(leading) = summary.leading_stream() {
        println!("Most suggested: {leading}");
    }
}
