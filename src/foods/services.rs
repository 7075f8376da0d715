use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalog::{FoodDatabaseEntry, BUILTIN_FOODS, DEFAULT_CALORIES_PER_100G};

/// How a food name was resolved against the database.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchConfidence {
    Exact,
    Approximate,
    Estimated,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodMatch {
    pub calories_per_100g: f64,
    pub confidence: MatchConfidence,
    /// Canonical database key; `None` for estimates.
    pub matched_to: Option<&'static str>,
}

const STOPWORDS: &[&str] = &[
    "and", "with", "the", "of", "for", "without", "fresh", "homemade", "plain",
];

/// Resolves free-text food names against an immutable reference table.
///
/// Lookup order, first hit wins:
/// 1. exact key after normalization (trim, lowercase, single spaces);
/// 2. approximate: the query is a substring of a key, a key is a substring
///    of the query, or both share a significant token (alphabetic, at least
///    three letters, not a stopword, trailing plural `s` dropped);
/// 3. generic estimate at the default energy density.
///
/// Approximate candidates are ranked by overlap length (the contained
/// string for substring hits, else the longest shared token), then by the
/// smaller length difference between key and query, then by table order.
#[derive(Debug, Clone, Copy)]
pub struct FoodMatcher {
    entries: &'static [FoodDatabaseEntry],
    default_per_100g: f64,
}

impl Default for FoodMatcher {
    fn default() -> Self {
        Self::new(BUILTIN_FOODS, DEFAULT_CALORIES_PER_100G)
    }
}

impl FoodMatcher {
    pub fn new(entries: &'static [FoodDatabaseEntry], default_per_100g: f64) -> Self {
        Self {
            entries,
            default_per_100g,
        }
    }

    pub fn entries(&self) -> &'static [FoodDatabaseEntry] {
        self.entries
    }

    pub fn default_per_100g(&self) -> f64 {
        self.default_per_100g
    }

    pub fn match_food(&self, food_name: &str) -> FoodMatch {
        let query = normalize(food_name);
        let resolved = self.resolve(&query);
        debug!(
            food = %query,
            matched_to = ?resolved.matched_to,
            confidence = ?resolved.confidence,
            "food resolved"
        );
        resolved
    }

    fn resolve(&self, query: &str) -> FoodMatch {
        if query.is_empty() {
            return self.estimate();
        }

        if let Some(e) = self.entries.iter().find(|e| e.name == query) {
            return FoodMatch {
                calories_per_100g: e.calories_per_100g,
                confidence: MatchConfidence::Exact,
                matched_to: Some(e.name),
            };
        }

        let query_tokens = significant_tokens(query);
        let mut best: Option<(usize, usize, &FoodDatabaseEntry)> = None;
        for e in self.entries {
            let Some(overlap) = overlap(query, &query_tokens, e.name) else {
                continue;
            };
            let gap = e.name.len().abs_diff(query.len());
            let better = match best {
                None => true,
                Some((b_overlap, b_gap, _)) => {
                    overlap > b_overlap || (overlap == b_overlap && gap < b_gap)
                }
            };
            if better {
                best = Some((overlap, gap, e));
            }
        }

        match best {
            Some((_, _, e)) => FoodMatch {
                calories_per_100g: e.calories_per_100g,
                confidence: MatchConfidence::Approximate,
                matched_to: Some(e.name),
            },
            None => self.estimate(),
        }
    }

    fn estimate(&self) -> FoodMatch {
        FoodMatch {
            calories_per_100g: self.default_per_100g,
            confidence: MatchConfidence::Estimated,
            matched_to: None,
        }
    }
}

pub(crate) fn normalize(food_name: &str) -> String {
    food_name
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn significant_tokens(text: &str) -> Vec<String> {
    lazy_static! {
        static ref WORD_RE: Regex = Regex::new(r"[a-z]+").unwrap();
    }
    WORD_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|w| w.len() >= 3 && !STOPWORDS.contains(w))
        .map(|w| match w.strip_suffix('s') {
            Some(stem) if stem.len() >= 3 => stem.to_string(),
            _ => w.to_string(),
        })
        .collect()
}

fn overlap(query: &str, query_tokens: &[String], key: &str) -> Option<usize> {
    if key.contains(query) {
        return Some(query.len());
    }
    if query.contains(key) {
        return Some(key.len());
    }
    let key_tokens = significant_tokens(key);
    query_tokens
        .iter()
        .filter(|t| key_tokens.contains(t))
        .map(|t| t.len())
        .max()
}
