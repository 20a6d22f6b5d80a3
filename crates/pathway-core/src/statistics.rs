//! Cohort statistics over stored records.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::classify::Stream;
use crate::model::Category;
use crate::record::AssessmentRecord;
use crate::scoring::CategoryScores;

/// Summary of a set of records for administrative views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortSummary {
    /// Number of records summarized.
    pub total: usize,
    /// Records per dominant trait. Every category is present.
    pub per_trait: BTreeMap<Category, usize>,
    /// Records per suggested stream. Every stream is present.
    pub per_stream: BTreeMap<String, usize>,
    /// Mean raw score per category (0 when there are no records).
    pub mean_scores: CategoryScores,
}

impl CohortSummary {
    pub fn from_records(records: &[AssessmentRecord]) -> Self {
        let mut per_trait: BTreeMap<Category, usize> =
            Category::ALL.into_iter().map(|c| (c, 0)).collect();
        let mut per_stream: BTreeMap<String, usize> =
            Stream::ALL.into_iter().map(|s| (s.to_string(), 0)).collect();

        for r in records {
            *per_trait.entry(r.dominant_trait).or_default() += 1;
            *per_stream.entry(r.suggested_stream().to_string()).or_default() += 1;
        }

        let n = records.len();
        let mean_scores = CategoryScores::from_fn(|category| {
            if n == 0 {
                0.0
            } else {
                records.iter().map(|r| r.scores.get(category)).sum::<f64>() / n as f64
            }
        });

        CohortSummary {
            total: n,
            per_trait,
            per_stream,
            mean_scores,
        }
    }

    /// The stream recommended most often, if any records exist.
    /// Ties resolve to the stream that sorts first by name.
    pub fn leading_stream(&self) -> Option<&str> {
        self.per_stream
            .iter()
            .filter(|(_, &count)| count > 0)
            .fold(None, |best: Option<(&String, usize)>, (name, &count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((name, count)),
            })
            .map(|(name, _)| name.as_str())
    }
}
