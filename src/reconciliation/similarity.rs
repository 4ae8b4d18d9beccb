//! Order-independent name similarity.
//!
//! Scores are integers on a 0-100 scale. Both strings are normalized
//! (characters in the Latin-1 upper range U+0080..=U+00FF are dropped,
//! remaining non-alphanumerics become spaces, lowercase, trimmed) and split
//! into word sets. Dropping the Latin-1 range means `José` compares as `Jos`;
//! letters outside that range such as `Ł` are kept. The shared words and each side's leftovers are compared three ways
//! and the best score wins, so word order, duplicated words and extra words on
//! one side cost little.

use std::collections::BTreeSet;

/// Token-set similarity between two strings, 0-100.
///
/// # Example
///
/// ```
/// use hours_reconciler::reconciliation::token_set_ratio;
///
/// assert_eq!(token_set_ratio("Benjamin Zapadenko", "ZAPADENKO, BENJAMIN"), 100);
/// assert_eq!(token_set_ratio("Jane Doe", "Jane Doe SUPERVISOR"), 100);
/// assert!(token_set_ratio("Jane Doe", "Overtime:") < 50);
/// ```
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let words_a: BTreeSet<&str> = a.split_whitespace().collect();
    let words_b: BTreeSet<&str> = b.split_whitespace().collect();

    let shared = join(words_a.intersection(&words_b));
    let only_a = join(words_a.difference(&words_b));
    let only_b = join(words_b.difference(&words_a));

    let with_a = combine(&shared, &only_a);
    let with_b = combine(&shared, &only_b);

    [
        ratio(&shared, &with_a),
        ratio(&shared, &with_b),
        ratio(&with_a, &with_b),
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
}

/// Plain similarity of two strings, 0-100, from their longest common
/// subsequence: `2 * lcs / (len_a + len_b)`, rounded half to even.
///
/// Identical strings score 100 (including two empty strings); otherwise an
/// empty side scores 0.
pub fn ratio(a: &str, b: &str) -> u8 {
    if a == b {
        return 100;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let numerator = 200 * lcs_len(&a, &b);
    let quotient = numerator / total;
    let remainder = numerator % total;
    let rounded = match (2 * remainder).cmp(&total) {
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal if quotient % 2 == 1 => quotient + 1,
        _ => quotient,
    };
    rounded.min(100) as u8
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];
    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            current[j + 1] = if ca == cb {
                previous[j] + 1
            } else {
                current[j].max(previous[j + 1])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !('\u{80}'..='\u{ff}').contains(c))
        .map(|c| {
            if c.is_alphanumeric() || c == '_' {
                c.to_lowercase().next().unwrap_or(c)
            } else {
                ' '
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

fn join<'a>(words: impl Iterator<Item = &'a &'a str>) -> String {
    words.copied().collect::<Vec<&str>>().join(" ")
}

fn combine(shared: &str, rest: &str) -> String {
    format!("{} {}", shared, rest).trim().to_string()
}
