//! Deterministic fuzzy name matching.
//!
//! Matching is a fixed chain of rules tried in priority order. The first
//! rule that produces any candidates decides the outcome; ties inside a
//! rule are broken by shortest normalized name, then lexicographically.
//! Given the same query and candidate list the result never changes,
//! which is the property the tests below pin down.

/// Which rule produced a match, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Normalized query equals the normalized candidate.
    Exact,
    /// Candidate starts with the query.
    Prefix,
    /// Query is a contiguous substring of the candidate.
    Substring,
    /// Every query word is, in order, a prefix of some candidate word.
    TokenSubsequence,
}

/// A successful resolution: index into the candidate list plus the rule
/// that selected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub index: usize,
    pub rule: MatchRule,
}

/// Lower-case and collapse runs of non-alphanumeric characters to single
/// spaces, so "General-Chat" and "general chat" compare equal.
pub fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_space = false;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_space = true;
        }
    }

    out
}

fn token_subsequence(query: &str, candidate: &str) -> bool {
    let mut words = candidate.split(' ');
    query
        .split(' ')
        .all(|q| words.by_ref().any(|w| w.starts_with(q)))
}

/// Resolve a free-text query against a candidate list.
///
/// Returns `None` when no rule matches anything.
pub fn resolve<S: AsRef<str>>(query: &str, candidates: &[S]) -> Option<Resolved> {
    let query = normalize(query);
    if query.is_empty() {
        return None;
    }

    let normalized: Vec<String> = candidates.iter().map(|c| normalize(c.as_ref())).collect();

    let rules: [(MatchRule, fn(&str, &str) -> bool); 4] = [
        (MatchRule::Exact, |q, c| c == q),
        (MatchRule::Prefix, |q, c| c.starts_with(q)),
        (MatchRule::Substring, |q, c| c.contains(q)),
        (MatchRule::TokenSubsequence, token_subsequence),
    ];

    for (rule, matches) in rules {
        let mut hits: Vec<usize> = (0..normalized.len())
            .filter(|&i| matches(&query, &normalized[i]))
            .collect();

        if hits.is_empty() {
            continue;
        }

        // Deterministic tie-break: shortest normalized name, then
        // lexicographic, never list order.
        hits.sort_by(|&a, &b| {
            normalized[a]
                .len()
                .cmp(&normalized[b].len())
                .then_with(|| normalized[a].cmp(&normalized[b]))
        });

        return Some(Resolved {
            index: hits[0],
            rule,
        });
    }

    None
}
