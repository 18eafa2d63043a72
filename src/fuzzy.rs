//! Forgiving name matching for `cd`/`cat` arguments and Tab completion.
//!
//! Scoring is tiered: exact beats prefix beats substring beats
//! subsequence. Tiers are never summed; ties within the subsequence tier
//! are broken by how many query characters matched in order.

/// Score `candidate` against `query`, higher is better, 0 means no match.
///
/// An empty query matches nothing; callers special-case "no argument"
/// themselves.
pub fn score(candidate: &str, query: &str) -> u32 {
    let c = candidate.trim().to_lowercase();
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return 0;
    }
    if c == q {
        return 1000;
    }
    if c.starts_with(&q) {
        return 800;
    }
    if c.contains(&q) {
        return 600;
    }

    // Subsequence walk: advance the query pointer on every match.
    let mut query_chars = q.chars().peekable();
    let mut hits: u32 = 0;
    for ch in c.chars() {
        if query_chars.peek() == Some(&ch) {
            query_chars.next();
            hits += 1;
        }
    }
    if hits > 0 {
        400 + hits
    } else {
        0
    }
}

/// Filter and rank candidates against `query`.
///
/// A trailing `/` (container marker) is stripped before scoring but kept
/// on the returned name. Zero scores are dropped; the result is ordered by
/// descending score, ties by ascending name.
pub fn filter(candidates: &[String], query: &str) -> Vec<String> {
    let mut scored: Vec<(String, u32)> = candidates
        .iter()
        .map(|name| {
            let bare = name.strip_suffix('/').unwrap_or(name);
            (name.clone(), score(bare, query))
        })
        .filter(|(_, s)| *s > 0)
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    scored.into_iter().map(|(name, _)| name).collect()
}

/// Longest common leading substring of all candidates, compared
/// case-insensitively but preserving the casing of the first one.
pub fn common_prefix(candidates: &[String]) -> String {
    let mut prefix = match candidates.first() {
        Some(first) => first.clone(),
        None => return String::new(),
    };
    for candidate in &candidates[1..] {
        let lowered = candidate.to_lowercase();
        while !lowered.starts_with(&prefix.to_lowercase()) {
            prefix.pop();
            if prefix.is_empty() {
                return prefix;
            }
        }
    }
    prefix
}
