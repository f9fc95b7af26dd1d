//! Fuzzy name matching for workspace symbol search.
//!
//! A query matches a candidate when its characters appear in the candidate
//! as a subsequence, case-insensitively. The score rewards consecutive
//! runs, matches at word starts (beginning, after `_`/`-`, camel humps)
//! and case-exact hits, and penalizes gaps between matched characters.

const MATCH_BONUS: i64 = 1;
const CONSECUTIVE_BONUS: i64 = 8;
const WORD_START_BONUS: i64 = 8;
const CASE_MATCH_BONUS: i64 = 4;
const GAP_PENALTY: i64 = 1;

/// Score `candidate` against `query`. `None` when the query is not a
/// subsequence of the candidate. Higher is better.
pub fn score(query: &str, candidate: &str) -> Option<i64> {
    if query.is_empty() {
        return None;
    }

    let mut total = 0i64;
    let mut query_chars = query.chars();
    let mut wanted = query_chars.next()?;
    let mut previous_matched = false;
    let mut previous_char: Option<char> = None;
    let mut done = false;

    for ch in candidate.chars() {
        if done {
            break;
        }
        if ch.to_ascii_lowercase() == wanted.to_ascii_lowercase() {
            total += MATCH_BONUS;
            if previous_matched {
                total += CONSECUTIVE_BONUS;
            }
            if is_word_start(previous_char, ch) {
                total += WORD_START_BONUS;
            }
            if ch == wanted {
                total += CASE_MATCH_BONUS;
            }
            previous_matched = true;
            match query_chars.next() {
                Some(next) => wanted = next,
                None => done = true,
            }
        } else {
            if previous_matched {
                // Only gaps between matches cost; trailing candidate text
                // after the final match is free.
                total -= GAP_PENALTY;
            }
            previous_matched = false;
        }
        previous_char = Some(ch);
    }

    if done { Some(total) } else { None }
}

fn is_word_start(previous: Option<char>, ch: char) -> bool {
    match previous {
        None => true,
        Some(p) => p == '_' || p == '-' || (p.is_lowercase() && ch.is_uppercase()),
    }
}
