//! Fuzzy ranking of command names.
//!
//! Ranking happens in two tiers:
//!
//! 1. Candidates that start with the query (case-insensitive), alphabetical.
//! 2. Remaining candidates within `max_distance` Levenshtein edits of the
//!    query (case-insensitive), closest first, alphabetical on ties.
//!
//! Anything further away is dropped.

use parley_core::CommandId;

/// Default cap on edit distance for tier-two matches.
pub const DEFAULT_MAX_DISTANCE: usize = 3;

/// Ranks `candidates` against `query`, returning at most `limit` names.
pub fn rank<'a, I>(query: &str, candidates: I, max_distance: usize, limit: usize) -> Vec<CommandId>
where
    I: IntoIterator<Item = &'a CommandId>,
{
    if limit == 0 {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    let needle_len = needle.chars().count();

    let mut prefixed: Vec<&CommandId> = Vec::new();
    let mut close: Vec<(usize, &CommandId)> = Vec::new();

    for candidate in candidates {
        let haystack = candidate.as_str().to_lowercase();
        if haystack.starts_with(&needle) {
            prefixed.push(candidate);
            continue;
        }

        // Edit distance is at least the length difference.
        if haystack.chars().count().abs_diff(needle_len) > max_distance {
            continue;
        }

        let distance = strsim::levenshtein(&needle, &haystack);
        if distance <= max_distance {
            close.push((distance, candidate));
        }
    }

    // Alphabetical means case-folded, with the original spelling breaking ties.
    prefixed.sort_by_cached_key(|c| (c.as_str().to_lowercase(), *c));
    prefixed.dedup();
    close.sort_by_cached_key(|(distance, c)| (*distance, c.as_str().to_lowercase(), *c));
    close.dedup_by(|a, b| a.1 == b.1);

    prefixed
        .into_iter()
        .chain(close.into_iter().map(|(_, candidate)| candidate))
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<CommandId> {
        names.iter().map(|n| CommandId::new(*n)).collect()
    }

    fn ranked(query: &str, names: &[&str]) -> Vec<String> {
        ranked_within(query, names, DEFAULT_MAX_DISTANCE)
    }

    fn ranked_within(query: &str, names: &[&str], max_distance: usize) -> Vec<String> {
        rank(query, &ids(names), max_distance, 10)
            .into_iter()
            .map(CommandId::into_inner)
            .collect()
    }

    #[test]
    fn test_prefix_matches_come_first() {
        let result = ranked("buil", &["bundle", "build", "builder", "run"]);
        assert_eq!(result[0], "build");
        assert_eq!(result[1], "builder");

        // `run` is three edits away, inside the default cap, so it trails.
        let run = result.iter().position(|n| n == "run");
        assert!(run.is_some_and(|pos| pos > 1));
        let strict = ranked_within("buil", &["bundle", "build", "builder", "run"], 2);
        assert!(!strict.contains(&"run".to_string()));
    }

    #[test]
    fn test_alphabetical_order_ignores_case() {
        assert_eq!(ranked("", &["Zeta", "alpha", "Beta"]), vec!["alpha", "Beta", "Zeta"]);
        assert_eq!(ranked("b", &["Bob", "bee", "BAR"]), vec!["BAR", "bee", "Bob"]);
    }

    #[test]
    fn test_close_match_outranks_distant_one() {
        let result = ranked("buildd", &["build", "bundle", "run"]);
        assert_eq!(result.first().map(String::as_str), Some("build"));
        assert!(!result.contains(&"run".to_string()));
        if let Some(pos) = result.iter().position(|n| n == "bundle") {
            assert!(pos > 0);
        }
    }

    #[test]
    fn test_transposition_prefers_alphabetical_on_tie() {
        let result = ranked("buidl", &["bundle", "build", "status"]);
        assert_eq!(result, vec!["build", "bundle"]);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(ranked("BUI", &["build"]), vec!["build"]);
        assert_eq!(ranked("Biuld", &["build"]), vec!["build"]);
    }

    #[test]
    fn test_distance_cap_is_respected() {
        let candidates = ids(&["deploy"]);
        assert!(rank("dpl", &candidates, 2, 5).is_empty());
        assert_eq!(rank("dpl", &candidates, 3, 5), candidates);
    }

    #[test]
    fn test_limit_truncates() {
        let candidates = ids(&["sa", "sb", "sc", "sd"]);
        assert_eq!(rank("s", &candidates, DEFAULT_MAX_DISTANCE, 2), ids(&["sa", "sb"]));
        assert!(rank("s", &candidates, DEFAULT_MAX_DISTANCE, 0).is_empty());
    }

    #[test]
    fn test_empty_query_lists_everything_alphabetically() {
        assert_eq!(ranked("", &["b", "a"]), vec!["a", "b"]);
    }
}
