//! The `pathway score` command.

use std::path::PathBuf;

use anyhow::Result;

use pathway_core::evaluate;
use pathway_server::load_config_from;

use super::read_submission;

pub fn execute(input: PathBuf, format: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let frame = read_submission(&input)?.into_frame(config.validation_policy())?;
    let evaluation = evaluate(&frame);

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&evaluation)?);
        }
        "text" => {
            println!(
                "Answered: {}/{}",
                frame.answers.answered(),
                pathway_core::model::QUESTION_COUNT
            );
            for (category, score) in evaluation.scores.iter() {
                println!("  {:<14} {score:>6.1}%", category.name());
            }
            println!("Dominant trait: {}", evaluation.dominant_trait);
            println!("Suggested stream: {}", evaluation.suggested_stream);
        }
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}
