//! Subsequence fuzzy scoring used to rank catalog names against a typed query.
//!
//! Every whitespace-separated token of the query must appear, in order and
//! case-insensitively, inside the candidate. Consecutive runs, word starts,
//! prefix hits and early first matches raise the score; gaps and long
//! candidates lower it.

const CONSECUTIVE_WEIGHT: i64 = 6;
const WORD_START_BONUS: i64 = 10;
const PREFIX_BONUS: i64 = 30;
const EARLY_MATCH_WINDOW: i64 = 20;
const LENGTH_PENALTY_DIVISOR: i64 = 8;

/// Score `needle` against `hay`.
///
/// Returns `None` when some token of `needle` is not a subsequence of `hay`.
/// An empty or blank needle matches everything with a score of zero.
///
/// ```rust
/// use rxpad_util::fuzzy_score;
///
/// assert!(fuzzy_score("Amoxyclav", "amo").unwrap() > fuzzy_score("Amoxyclav", "mox").unwrap());
/// assert!(fuzzy_score("Amoxyclav", "zz").is_none());
/// assert_eq!(fuzzy_score("Amoxyclav", "  "), Some(0));
/// ```
pub fn fuzzy_score(hay: &str, needle: &str) -> Option<i64> {
    if needle.trim().is_empty() {
        return Some(0);
    }
    if hay.is_empty() {
        return None;
    }

    let hay_lower: String = hay.chars().flat_map(char::to_lowercase).collect();
    let hay_chars: Vec<char> = hay_lower.chars().collect();

    let mut cursor = 0;
    let mut total = 0;
    for token in needle.split_whitespace() {
        let token: Vec<char> = token.chars().flat_map(char::to_lowercase).collect();
        total += score_token(&hay_lower, &hay_chars, &token, &mut cursor)?;
    }

    Some(total - hay_chars.len() as i64 / LENGTH_PENALTY_DIVISOR)
}

/// Map a fuzzy score onto a 0..=100 confidence scale.
pub fn match_confidence(score: i64) -> u8 {
    score.clamp(0, 100) as u8
}

fn score_token(hay_lower: &str, hay_chars: &[char], token: &[char], cursor: &mut usize) -> Option<i64> {
    let mut score = 0;
    let mut run = 0;
    let mut first_match = None;
    let mut previous: Option<usize> = None;

    for &wanted in token {
        let offset = hay_chars.get(*cursor..)?.iter().position(|&c| c == wanted)?;
        let index = *cursor + offset;
        first_match.get_or_insert(index);

        if let Some(previous) = previous {
            run = if index == previous + 1 { run + 1 } else { 1 };
            score -= (index - previous - 1) as i64 / 2;
        }
        score += CONSECUTIVE_WEIGHT * run;
        if starts_word(hay_chars, index) {
            score += WORD_START_BONUS;
        }

        previous = Some(index);
        *cursor = index + 1;
    }

    let token_text: String = token.iter().collect();
    if hay_lower.starts_with(&token_text) {
        score += PREFIX_BONUS;
    }
    if let Some(start) = first_match {
        score += (EARLY_MATCH_WINDOW - start as i64).max(0);
    }
    Some(score)
}

fn starts_word(chars: &[char], index: usize) -> bool {
    index == 0
        || chars
            .get(index - 1)
            .is_some_and(|c| c.is_whitespace() || c.is_ascii_punctuation())
}
