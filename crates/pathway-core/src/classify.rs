//! Dominant trait selection and stream mapping.
//!
//! Raw scores are biased toward the commerce-aligned categories before the
//! dominant trait is chosen. The biased view exists only inside this module's
//! decision path; callers get back the trait and stream, never the weights.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::Category;
use crate::scoring::CategoryScores;

/// Multiplier applied to each biased category's score.
pub const BIAS_FACTOR: f64 = 1.5;

/// Categories whose scores are multiplied by [`BIAS_FACTOR`].
pub const BIASED_CATEGORIES: [Category; 2] = [Category::Enterprising, Category::Conventional];

/// Recommended academic stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stream {
    Science,
    Commerce,
    Arts,
}

impl Stream {
    pub const ALL: [Stream; 3] = [Stream::Science, Stream::Commerce, Stream::Arts];

    pub fn name(self) -> &'static str {
        match self {
            Stream::Science => "Science",
            Stream::Commerce => "Commerce",
            Stream::Arts => "Arts",
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stream {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "science" => Ok(Stream::Science),
            "commerce" => Ok(Stream::Commerce),
            "arts" => Ok(Stream::Arts),
            other => Err(format!("unknown stream: {other}")),
        }
    }
}

impl Category {
    /// The stream this trait points to.
    pub fn stream(self) -> Stream {
        match self {
            Category::Realistic | Category::Investigative => Stream::Science,
            Category::Artistic | Category::Social => Stream::Arts,
            Category::Enterprising | Category::Conventional => Stream::Commerce,
        }
    }
}

/// Scores after bias weighting. Used only to pick the dominant trait.
///
/// Not `Serialize`, and there is no conversion back into [`CategoryScores`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionScores(CategoryScores);

impl DecisionScores {
    pub fn get(&self, category: Category) -> f64 {
        self.0.get(category)
    }
}

/// Copy the raw scores and scale the biased categories.
pub fn weigh(raw: &CategoryScores) -> DecisionScores {
    DecisionScores(CategoryScores::from_fn(|category| {
        let score = raw.get(category);
        if BIASED_CATEGORIES.contains(&category) {
            score * BIAS_FACTOR
        } else {
            score
        }
    }))
}

/// Highest decision score wins; ties go to the earliest category.
pub fn dominant_trait(decision: &DecisionScores) -> Category {
    let mut best = Category::ALL[0];
    let mut best_score = decision.get(best);
    for category in &Category::ALL[1..] {
        let score = decision.get(*category);
        if score > best_score {
            best = *category;
            best_score = score;
        }
    }
    best
}

/// Outcome of classifying one set of raw scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub dominant_trait: Category,
    pub suggested_stream: Stream,
}

/// Weigh, pick the dominant trait and map it to a stream.
pub fn classify(raw: &CategoryScores) -> Classification {
    let dominant_trait = dominant_trait(&weigh(raw));
    Classification {
        dominant_trait,
        suggested_stream: dominant_trait.stream(),
    }
}
