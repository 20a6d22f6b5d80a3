//! Category scoring: raw answers to six percentage scores.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::model::{Answers, Category, Rating, QUESTIONS_PER_CATEGORY};

/// Rating assumed for every unanswered question.
pub const NEUTRAL_RATING: Rating = 3;

/// Fixed per-category normalization total (ten questions at five points).
pub const NORMALIZATION_TOTAL: f64 = (QUESTIONS_PER_CATEGORY * 5) as f64;

/// One real-valued score per category.
///
/// Values are not clamped or rounded; out-of-scale ratings produce scores
/// outside `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryScores([f64; 6]);

impl CategoryScores {
    pub fn from_fn(mut f: impl FnMut(Category) -> f64) -> Self {
        let mut values = [0.0; 6];
        for category in Category::ALL {
            values[category.index()] = f(category);
        }
        CategoryScores(values)
    }

    pub fn get(&self, category: Category) -> f64 {
        self.0[category.index()]
    }

    /// Scores in category enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

impl Serialize for CategoryScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Category::ALL.len()))?;
        for (category, score) in self.iter() {
            map.serialize_entry(category.name(), &score)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, f64>::deserialize(deserializer)?;
        let mut values = [None; 6];
        for (key, score) in raw {
            let category: Category = key.parse().map_err(D::Error::custom)?;
            values[category.index()] = Some(score);
        }
        let mut scores = [0.0; 6];
        for category in Category::ALL {
            scores[category.index()] = values[category.index()]
                .ok_or_else(|| D::Error::custom(format!("missing score for {category}")))?;
        }
        Ok(CategoryScores(scores))
    }
}

/// Reduce answers to a percentage score per category.
///
/// `score = (sum of ratings / 50) * 100`, with [`NEUTRAL_RATING`] standing in
/// for each missing answer. Total over all inputs.
pub fn score(answers: &Answers) -> CategoryScores {
    CategoryScores::from_fn(|category| {
        let total: i128 = category
            .questions()
            .map(|q| answers.get(q).unwrap_or(NEUTRAL_RATING) as i128)
            .sum();
        (total as f64 / NORMALIZATION_TOTAL) * 100.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionId;

    #[test]
    fn all_missing_yields_neutral_baseline() {
        let scores = score(&Answers::new());
        for (_, value) in scores.iter() {
            assert_eq!(value, 60.0);
        }
    }

    #[test]
    fn full_realistic_answers() {
        let answers = Answers::from_pairs(
            [1, 7, 13, 19, 25, 31, 37, 43, 49, 55].map(|q| (q.to_string(), 5)),
        );
        let scores = score(&answers);
        assert_eq!(scores.get(Category::Realistic), 100.0);
        for category in &Category::ALL[1..] {
            assert_eq!(scores.get(*category), 60.0);
        }
    }

    #[test]
    fn lowest_ratings() {
        let mut answers = Answers::new();
        for q in Category::Social.questions() {
            answers.set(q, 1);
        }
        assert_eq!(score(&answers).get(Category::Social), 20.0);
    }

    #[test]
    fn missing_answers_default_individually() {
        // Five answered at 5, five defaulted to 3: (25 + 15) / 50 * 100.
        let mut answers = Answers::new();
        for q in Category::Artistic.questions().take(5) {
            answers.set(q, 5);
        }
        assert_eq!(score(&answers).get(Category::Artistic), 80.0);
    }

    #[test]
    fn out_of_scale_ratings_are_not_clamped() {
        let mut answers = Answers::new();
        for q in Category::Enterprising.questions() {
            answers.set(q, 10);
        }
        answers.set(QuestionId::new(6).unwrap(), -20);
        let scores = score(&answers);
        assert_eq!(scores.get(Category::Enterprising), 200.0);
        assert!(scores.get(Category::Conventional) < 20.0);
    }

    #[test]
    fn extreme_ratings_do_not_overflow() {
        let mut answers = Answers::new();
        for q in Category::Realistic.questions() {
            answers.set(q, i64::MAX);
        }
        for q in Category::Investigative.questions() {
            answers.set(q, i64::MIN);
        }
        let scores = score(&answers);
        assert!(scores.get(Category::Realistic).is_finite());
        assert!(scores.get(Category::Realistic) > 0.0);
        assert!(scores.get(Category::Investigative) < 0.0);
    }

    #[test]
    fn scores_serialize_in_category_order() {
        let scores = CategoryScores::from_fn(|c| c.index() as f64);
        let json = serde_json::to_string(&scores).unwrap();
        assert_eq!(
            json,
            r#"{"Realistic":0.0,"Investigative":1.0,"Artistic":2.0,"Social":3.0,"Enterprising":4.0,"Conventional":5.0}"#
        );
        let back: CategoryScores = serde_json::from_str(&json).unwrap();
        assert_eq!(back, scores);
    }

    #[test]
    fn deserialize_rejects_incomplete_scores() {
        let result: Result<CategoryScores, _> = serde_json::from_str(r#"{"Realistic": 60.0}"#);
        assert!(result.is_err());
    }
}
