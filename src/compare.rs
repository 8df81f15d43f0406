//! Per-category winner determination for two analyses

use crate::{AnalysisRecord, Category, SeoScore};
use serde::{Deserialize, Serialize};

/// Outcome of one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    #[serde(rename = "url1")]
    FirstWins,
    #[serde(rename = "url2")]
    SecondWins,
    #[serde(rename = "tie")]
    Tie,
}

impl Winner {
    /// Exact comparison, no tolerance
    pub fn decide(first: f64, second: f64) -> Self {
        if first > second {
            Winner::FirstWins
        } else if second > first {
            Winner::SecondWins
        } else {
            Winner::Tie
        }
    }

    /// The same outcome seen with the two sides exchanged
    pub fn swap(self) -> Self {
        match self {
            Winner::FirstWins => Winner::SecondWins,
            Winner::SecondWins => Winner::FirstWins,
            Winner::Tie => Winner::Tie,
        }
    }
}

/// One winner per category. `overall` is decided on its own score, never by
/// majority of the other four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerSet {
    pub overall: Winner,
    pub metadata: Winner,
    pub links: Winner,
    pub content: Winner,
    pub performance: Winner,
}

impl WinnerSet {
    pub fn from_scores(a: &SeoScore, b: &SeoScore) -> Self {
        let w = |c: Category| Winner::decide(a.get(c), b.get(c));
        Self {
            overall: w(Category::Overall),
            metadata: w(Category::Metadata),
            links: w(Category::Links),
            content: w(Category::Content),
            performance: w(Category::Performance),
        }
    }

    pub fn get(&self, category: Category) -> Winner {
        match category {
            Category::Overall => self.overall,
            Category::Metadata => self.metadata,
            Category::Links => self.links,
            Category::Content => self.content,
            Category::Performance => self.performance,
        }
    }

    pub fn swap(self) -> Self {
        Self {
            overall: self.overall.swap(),
            metadata: self.metadata.swap(),
            links: self.links.swap(),
            content: self.content.swap(),
            performance: self.performance.swap(),
        }
    }

    /// Wins per side across the four sub-categories (display only)
    pub fn tally(&self) -> Tally {
        let mut tally = Tally::default();
        for category in &Category::ALL[1..] {
            match self.get(*category) {
                Winner::FirstWins => tally.first += 1,
                Winner::SecondWins => tally.second += 1,
                Winner::Tie => tally.ties += 1,
            }
        }
        tally
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Tally {
    pub first: usize,
    pub second: usize,
    pub ties: usize,
}

pub fn compare(a: &AnalysisRecord, b: &AnalysisRecord) -> WinnerSet {
    WinnerSet::from_scores(&a.score, &b.score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{record, score};

    #[test]
    fn per_category_winners() {
        let a = record("https://a.example", score(8.0, 9.0, 4.0, 7.5, 6.0));
        let b = record("https://b.example", score(7.5, 9.0, 5.0, 7.0, 6.5));
        let w = compare(&a, &b);
        assert_eq!(w.overall, Winner::FirstWins);
        assert_eq!(w.metadata, Winner::Tie);
        assert_eq!(w.links, Winner::SecondWins);
        assert_eq!(w.content, Winner::FirstWins);
        assert_eq!(w.performance, Winner::SecondWins);
    }

    #[test]
    fn overall_is_independent_of_sub_categories() {
        // First side wins 3 of 4 sub-categories but loses overall
        let a = record("https://a.example", score(6.0, 9.0, 9.0, 9.0, 1.0));
        let b = record("https://b.example", score(7.0, 8.0, 8.0, 8.0, 9.0));
        let w = compare(&a, &b);
        assert_eq!(w.overall, Winner::SecondWins);
        assert_eq!(w.tally(), Tally { first: 3, second: 1, ties: 0 });
    }

    #[test]
    fn equal_overall_is_tie_regardless_of_others() {
        let a = record("https://a.example", score(7.0, 10.0, 10.0, 10.0, 10.0));
        let b = record("https://b.example", score(7.0, 0.0, 0.0, 0.0, 0.0));
        assert_eq!(compare(&a, &b).overall, Winner::Tie);
    }

    #[test]
    fn self_comparison_ties_everywhere() {
        let a = record("https://a.example", score(6.3, 7.1, 5.5, 8.8, 2.0));
        let w = compare(&a, &a);
        for category in Category::ALL {
            assert_eq!(w.get(category), Winner::Tie, "{}", category);
        }
    }

    #[test]
    fn no_epsilon_on_ties() {
        assert_eq!(Winner::decide(7.0, 7.0000001), Winner::SecondWins);
    }

    #[test]
    fn winner_wire_values() {
        assert_eq!(serde_json::to_string(&Winner::FirstWins).unwrap(), "\"url1\"");
        assert_eq!(serde_json::to_string(&Winner::SecondWins).unwrap(), "\"url2\"");
        assert_eq!(serde_json::to_string(&Winner::Tie).unwrap(), "\"tie\"");
        let parsed: Winner = serde_json::from_str("\"url2\"").unwrap();
        assert_eq!(parsed, Winner::SecondWins);
    }
}
