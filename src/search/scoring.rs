//! Relevance scoring.
//!
//! Scores are additive integers:
//!
//! | Rule | Points |
//! |------|--------|
//! | title contains the query | 10 |
//! | title equals the query | +5 |
//! | excerpt contains the query | 3 |
//! | each technology tag containing the query | 2 |
//!
//! All comparisons are case-insensitive. The stores match on full bodies while
//! scoring only sees the excerpt, so a returned result can score 0. Such
//! results are kept and sort last.

use crate::search::models::SearchResult;

pub const TITLE_MATCH: u32 = 10;
pub const EXACT_TITLE_BONUS: u32 = 5;
pub const EXCERPT_MATCH: u32 = 3;
pub const TAG_MATCH: u32 = 2;

/// Case-insensitive substring test.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Relevance of `result` for `query`.
pub fn score(result: &SearchResult, query: &str) -> u32 {
    let mut score = 0;

    if contains_ci(&result.title, query) {
        score += TITLE_MATCH;
    }

    if result.title.to_lowercase() == query.to_lowercase() {
        score += EXACT_TITLE_BONUS;
    }

    if contains_ci(&result.excerpt, query) {
        score += EXCERPT_MATCH;
    }

    if let Some(technologies) = &result.technologies {
        let hits = technologies
            .iter()
            .filter(|tech| contains_ci(tech, query))
            .count() as u32;
        score += hits * TAG_MATCH;
    }

    score
}

/// Score every result and order them by descending score.
///
/// The sort is stable: equal scores keep their incoming order.
pub fn rank(results: &mut [SearchResult], query: &str) {
    for result in results.iter_mut() {
        result.score = score(result, query);
    }
    results.sort_by(|a, b| b.score.cmp(&a.score));
}
