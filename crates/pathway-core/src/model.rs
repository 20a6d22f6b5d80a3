//! Core data model types for pathway.
//!
//! The six trait categories, the fixed question partition, and the typed
//! carrier for a student's identity and answers.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of items in the interest inventory.
pub const QUESTION_COUNT: usize = 60;

/// Number of questions owned by each category.
pub const QUESTIONS_PER_CATEGORY: usize = 10;

/// A vocational trait category.
///
/// Declaration order is significant: it is the scan order used when breaking
/// ties between equal decision scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Realistic,
    Investigative,
    Artistic,
    Social,
    Enterprising,
    Conventional,
}

impl Category {
    /// All categories in enumeration order.
    pub const ALL: [Category; 6] = [
        Category::Realistic,
        Category::Investigative,
        Category::Artistic,
        Category::Social,
        Category::Enterprising,
        Category::Conventional,
    ];

    /// Position of this category in [`Category::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::Realistic => "Realistic",
            Category::Investigative => "Investigative",
            Category::Artistic => "Artistic",
            Category::Social => "Social",
            Category::Enterprising => "Enterprising",
            Category::Conventional => "Conventional",
        }
    }

    /// The question identifiers assigned to this category, ascending.
    pub fn questions(self) -> impl Iterator<Item = QuestionId> {
        QuestionId::all().filter(move |q| q.category() == self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "realistic" => Ok(Category::Realistic),
            "investigative" => Ok(Category::Investigative),
            "artistic" => Ok(Category::Artistic),
            "social" => Ok(Category::Social),
            "enterprising" => Ok(Category::Enterprising),
            "conventional" => Ok(Category::Conventional),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// Question-to-category partition. Entry `i` belongs to question `i + 1`.
///
/// Questions cycle through the categories in enumeration order, so every
/// category owns exactly ten questions and no question is shared.
pub static QUESTION_CATEGORIES: [Category; QUESTION_COUNT] = build_question_map();

const fn build_question_map() -> [Category; QUESTION_COUNT] {
    let mut map = [Category::Realistic; QUESTION_COUNT];
    let mut i = 0;
    while i < QUESTION_COUNT {
        map[i] = Category::ALL[i % Category::ALL.len()];
        i += 1;
    }
    map
}

/// A question identifier in `1..=60`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestionId(u8);

impl QuestionId {
    /// Returns `None` when `n` is outside `1..=60`.
    pub fn new(n: u32) -> Option<Self> {
        if (1..=QUESTION_COUNT as u32).contains(&n) {
            Some(QuestionId(n as u8))
        } else {
            None
        }
    }

    /// Parse a wire key such as `"17"`. Only the canonical decimal spelling
    /// matches; `"017"`, `"+17"` and `" 17 "` yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        let n = key.parse::<u32>().ok()?;
        if n.to_string() != key {
            return None;
        }
        Self::new(n)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn category(self) -> Category {
        QUESTION_CATEGORIES[self.slot()]
    }

    pub fn all() -> impl Iterator<Item = QuestionId> {
        (1..=QUESTION_COUNT as u8).map(QuestionId)
    }

    fn slot(self) -> usize {
        self.0 as usize - 1
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity fields captured at registration. Free-form text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub school: String,
    pub district: String,
    pub mobile: String,
    pub board: String,
}

impl Identity {
    /// Field names paired with their values, in registration order.
    pub fn fields(&self) -> [(&'static str, &str); 5] {
        [
            ("name", self.name.as_str()),
            ("school", self.school.as_str()),
            ("district", self.district.as_str()),
            ("mobile", self.mobile.as_str()),
            ("board", self.board.as_str()),
        ]
    }
}

/// A rating on the (nominally 1–5) Likert scale. Not range-checked here.
pub type Rating = i64;

/// Sparse answers keyed by question, with an explicit missing state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers([Option<Rating>; QUESTION_COUNT]);

impl Answers {
    pub fn new() -> Self {
        Answers([None; QUESTION_COUNT])
    }

    /// Build from wire-style `(key, rating)` pairs. Keys that are not a
    /// question identifier in range are dropped.
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Rating)>,
    {
        let mut answers = Answers::new();
        for (key, rating) in pairs {
            match QuestionId::from_key(key.as_ref()) {
                Some(q) => answers.set(q, rating),
                None => tracing::debug!("ignoring answer for unknown question '{}'", key.as_ref()),
            }
        }
        answers
    }

    pub fn set(&mut self, question: QuestionId, rating: Rating) {
        self.0[question.slot()] = Some(rating);
    }

    pub fn get(&self, question: QuestionId) -> Option<Rating> {
        self.0[question.slot()]
    }

    /// Number of questions that have an answer.
    pub fn answered(&self) -> usize {
        self.0.iter().filter(|a| a.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, Rating)> + '_ {
        QuestionId::all().filter_map(move |q| self.get(q).map(|r| (q, r)))
    }
}

impl Default for Answers {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for Answers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.answered()))?;
        for (q, rating) in self.iter() {
            map.serialize_entry(&q.to_string(), &rating)?;
        }
        map.end()
    }
}

/// One student's submission: identity plus raw answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseFrame {
    pub identity: Identity,
    pub answers: Answers,
}

impl ResponseFrame {
    pub fn new(identity: Identity, answers: Answers) -> Self {
        Self { identity, answers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(category: Category) -> Vec<u8> {
        category.questions().map(QuestionId::get).collect()
    }

    #[test]
    fn partition_assigns_ten_questions_each() {
        for category in Category::ALL {
            assert_eq!(category.questions().count(), QUESTIONS_PER_CATEGORY);
        }
        let total: usize = Category::ALL.iter().map(|c| c.questions().count()).sum();
        assert_eq!(total, QUESTION_COUNT);
    }

    #[test]
    fn partition_matches_inventory_layout() {
        assert_eq!(ids(Category::Realistic), vec![1, 7, 13, 19, 25, 31, 37, 43, 49, 55]);
        assert_eq!(ids(Category::Investigative), vec![2, 8, 14, 20, 26, 32, 38, 44, 50, 56]);
        assert_eq!(ids(Category::Conventional), vec![6, 12, 18, 24, 30, 36, 42, 48, 54, 60]);
    }

    #[test]
    fn question_id_bounds() {
        assert!(QuestionId::new(0).is_none());
        assert!(QuestionId::new(61).is_none());
        assert_eq!(QuestionId::new(60).unwrap().get(), 60);
        assert_eq!(QuestionId::from_key("5").unwrap().category(), Category::Enterprising);
        assert!(QuestionId::from_key("abc").is_none());
        assert!(QuestionId::from_key("-1").is_none());
    }

    #[test]
    fn only_canonical_keys_name_questions() {
        for key in ["01", "+7", " 13 ", "019", "5 ", "1e1", ""] {
            assert!(QuestionId::from_key(key).is_none(), "{key:?}");
        }
        assert_eq!(QuestionId::from_key("19").unwrap().get(), 19);
    }

    #[test]
    fn category_display_and_parse() {
        assert_eq!(Category::Social.to_string(), "Social");
        assert_eq!("enterprising".parse::<Category>().unwrap(), Category::Enterprising);
        assert!("athletic".parse::<Category>().is_err());
    }

    #[test]
    fn answers_from_pairs_drops_unknown_keys() {
        let answers = Answers::from_pairs([("1", 5), ("61", 4), ("x", 2), ("60", 1)]);
        assert_eq!(answers.answered(), 2);
        assert_eq!(answers.get(QuestionId::new(1).unwrap()), Some(5));
        assert_eq!(answers.get(QuestionId::new(60).unwrap()), Some(1));
        assert_eq!(answers.get(QuestionId::new(2).unwrap()), None);
    }

    #[test]
    fn answers_serialize_sparse() {
        let answers = Answers::from_pairs([("7", 4), ("2", 3)]);
        let json = serde_json::to_value(&answers).unwrap();
        assert_eq!(json, serde_json::json!({"2": 3, "7": 4}));
    }
}
