//! # Similarity Matcher
//!
//! Flags near-duplicate item names on entry ("Red Shrit" vs "Red Shirt").
//!
//! Names are compared after normalization (lowercase, punctuation folded to spaces)
//! with a weighted ratio in `0..=100`:
//!
//! * the indel similarity of the two strings, `2 * matches / (len_a + len_b)` where
//!   matches is the longest common subsequence, so a plural or a dropped letter
//!   costs one character rather than a full edit,
//! * token-sort and token-set ratios, so word order and repeated words matter less,
//! * partial (best substring window) variants when one name is much longer than the
//!   other, scaled down so that a short fragment never beats a real match.
//!
//! Identical names always score 100.

use std::collections::{BTreeSet, HashSet};

/// Minimum score for a name to count as a likely duplicate.
pub const DEFAULT_CUTOFF: u8 = 85;

const TOKEN_SCALE: f64 = 0.95;
const PARTIAL_SCALE: f64 = 0.90;
const FAR_PARTIAL_SCALE: f64 = 0.60;

/// Best existing name for a candidate, with its score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarName {
    pub name: String,
    pub score: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimilarityMatcher {
    cutoff: u8,
}

impl Default for SimilarityMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_CUTOFF)
    }
}

impl SimilarityMatcher {
    pub fn new(cutoff: u8) -> Self {
        Self {
            cutoff: cutoff.min(100),
        }
    }

    pub fn cutoff(&self) -> u8 {
        self.cutoff
    }

    /// The highest-scoring existing name at or above the cutoff.
    ///
    /// Repeated names are scored once. On equal scores the first name seen wins.
    pub fn best_match<'a, I>(&self, candidate: &str, names: I) -> Option<SimilarName>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        let mut best: Option<SimilarName> = None;
        for name in names {
            if !seen.insert(name) {
                continue;
            }
            let score = similarity(candidate, name);
            if score >= self.cutoff && best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(SimilarName {
                    name: name.to_string(),
                    score,
                });
            }
        }
        best
    }
}

/// Lowercase, fold every non-alphanumeric character to a space, trim.
fn normalize(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_lowercase().collect::<String>()
            } else {
                " ".to_string()
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Length of the longest common subsequence of `a` and `b`.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut diag = 0;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb { diag + 1 } else { above.max(row[j]) };
            diag = above;
        }
    }
    row[b.len()]
}

fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    200.0 * lcs_len(&a, &b) as f64 / (a.len() + b.len()) as f64
}

/// Best ratio of the shorter string against every equally long window of the longer.
fn partial_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let long: Vec<char> = long.chars().collect();
    let width = short.chars().count();
    if width == long.len() {
        return ratio(short, &long.iter().collect::<String>());
    }
    long.windows(width)
        .map(|window| ratio(short, &window.iter().collect::<String>()))
        .fold(0.0, f64::max)
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn token_sort(a: &str, b: &str, score: fn(&str, &str) -> f64) -> f64 {
    score(&sorted_tokens(a), &sorted_tokens(b))
}

fn token_set(a: &str, b: &str, score: fn(&str, &str) -> f64) -> f64 {
    let left: BTreeSet<&str> = a.split_whitespace().collect();
    let right: BTreeSet<&str> = b.split_whitespace().collect();

    let join = |tokens: Vec<&str>| tokens.join(" ");
    let common = join(left.intersection(&right).copied().collect());
    let only_left = join(left.difference(&right).copied().collect());
    let only_right = join(right.difference(&left).copied().collect());

    let with_left = format!("{common} {only_left}").trim().to_string();
    let with_right = format!("{common} {only_right}").trim().to_string();

    [
        score(&common, &with_left),
        score(&common, &with_right),
        score(&with_left, &with_right),
    ]
    .into_iter()
    .fold(0.0, f64::max)
}

/// Weighted similarity of two names in `0..=100`.
pub fn similarity(a: &str, b: &str) -> u8 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let base = ratio(&a, &b);
    let (len_a, len_b) = (a.chars().count() as f64, b.chars().count() as f64);
    let length_ratio = len_a.max(len_b) / len_a.min(len_b);

    let best = if length_ratio < 1.5 {
        base.max(token_sort(&a, &b, ratio) * TOKEN_SCALE)
            .max(token_set(&a, &b, ratio) * TOKEN_SCALE)
    } else {
        let scale = if length_ratio > 8.0 {
            FAR_PARTIAL_SCALE
        } else {
            PARTIAL_SCALE
        };
        base.max(partial_ratio(&a, &b) * scale)
            .max(token_sort(&a, &b, partial_ratio) * TOKEN_SCALE * scale)
            .max(token_set(&a, &b, partial_ratio) * TOKEN_SCALE * scale)
    };
    best.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_names_score_100() {
        assert_eq!(similarity("Red Shirt", "Red Shirt"), 100);
        assert_eq!(similarity("Red Shirt", "red shirt!"), 100);
    }

    #[test]
    fn test_typo_is_similar() {
        assert!(similarity("Red Shrt", "Red Shirt") >= DEFAULT_CUTOFF);
    }

    #[test]
    fn test_plurals_are_similar() {
        assert_eq!(similarity("Shirt", "Shirts"), 91);
        assert_eq!(similarity("Jean", "Jeans"), 89);
        assert_eq!(similarity("Hat", "Hats"), 86);
        assert_eq!(similarity("Sock", "Socks"), 89);
    }

    #[test]
    fn test_singular_flags_existing_plural() {
        let found = SimilarityMatcher::default().best_match("Shirt", ["Shirts"]).unwrap();
        assert_eq!(found, SimilarName { name: "Shirts".into(), score: 91 });
    }

    #[test]
    fn test_lcs_len() {
        let chars = |s: &str| s.chars().collect::<Vec<_>>();
        assert_eq!(lcs_len(&chars("red shrt"), &chars("red shirt")), 8);
        assert_eq!(lcs_len(&chars("abc"), &chars("xyz")), 0);
        assert_eq!(lcs_len(&chars(""), &chars("abc")), 0);
    }

    #[test]
    fn test_reordered_words_score_95() {
        assert_eq!(similarity("Shirt Red", "Red Shirt"), 95);
    }

    #[test]
    fn test_unrelated_names_are_far_apart() {
        assert!(similarity("Blue Jeans", "Red Shirt") < DEFAULT_CUTOFF);
        assert!(similarity("Red Shirt", "Blue Shirt") < DEFAULT_CUTOFF);
    }

    #[test]
    fn test_empty_scores_zero() {
        assert_eq!(similarity("", "Red Shirt"), 0);
        assert_eq!(similarity("!!", "Red Shirt"), 0);
    }

    #[test]
    fn test_best_match_above_cutoff() {
        let matcher = SimilarityMatcher::default();
        let names = ["Blue Jeans", "Red Shirt", "Red Shirt", "Green Hat"];

        let found = matcher.best_match("Red Shirt", names).unwrap();
        assert_eq!(found, SimilarName { name: "Red Shirt".into(), score: 100 });

        assert!(matcher.best_match("Wool Scarf", names).is_none());
    }

    #[test]
    fn test_no_names_no_match() {
        assert!(SimilarityMatcher::default().best_match("Red Shirt", std::iter::empty()).is_none());
    }

    #[test]
    fn test_tie_goes_to_a_top_scorer() {
        let matcher = SimilarityMatcher::new(50);
        let names = ["Red Shirts", "Red Shirtz"];
        let found = matcher.best_match("Red Shirt", names).unwrap();
        let top = names.iter().map(|n| similarity("Red Shirt", n)).max().unwrap();
        assert_eq!(found.score, top);
        assert!(names.contains(&found.name.as_str()));
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        let score = similarity("Red Shrt", "Red Shirt");
        assert!(SimilarityMatcher::new(score).best_match("Red Shrt", ["Red Shirt"]).is_some());
        assert!(SimilarityMatcher::new(score + 1).best_match("Red Shrt", ["Red Shirt"]).is_none());
    }
}
