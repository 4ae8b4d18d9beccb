//! The timesheet token stream.
//!
//! Tokens are held in a fixed array and never move. Once an employee's block
//! has been parsed its positions are marked consumed; every positional
//! question (previous token, next token, scan from here) skips consumed
//! positions, so later scans behave as if that text were gone while indices
//! stay stable.

use std::ops::RangeInclusive;

use crate::config::ReconcileConfig;

/// Filtered timesheet text, one token per extracted line.
///
/// # Example
///
/// ```
/// use hours_reconciler::reconciliation::TokenStream;
///
/// let mut stream = TokenStream::new(vec!["a1", "b2", "c3", "d4"]);
/// stream.consume(1..=2);
/// assert_eq!(stream.next_live(0), Some(3));
/// assert_eq!(stream.prev_live(3), Some(0));
/// assert_eq!(stream.live_len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<String>,
    consumed: Vec<bool>,
}

impl TokenStream {
    /// Wraps already-filtered tokens.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        let consumed = vec![false; tokens.len()];
        Self { tokens, consumed }
    }

    /// Builds a stream from raw extracted lines, dropping short lines and any
    /// line containing a denylisted substring.
    pub fn from_lines<I, S>(lines: I, config: &ReconcileConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let kept: Vec<String> = lines
            .into_iter()
            .filter(|line| keep_line(line.as_ref(), config))
            .map(|line| line.as_ref().to_string())
            .collect();
        Self::new(kept)
    }

    /// Total positions, consumed or not.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the stream holds no tokens at all.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of unconsumed positions.
    pub fn live_len(&self) -> usize {
        self.consumed.iter().filter(|c| !**c).count()
    }

    /// The token at `index`, regardless of consumption.
    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// All tokens in original order, regardless of consumption.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Returns true if `index` has been consumed (or is out of range).
    pub fn is_consumed(&self, index: usize) -> bool {
        self.consumed.get(index).copied().unwrap_or(true)
    }

    /// The first live position strictly after `index`.
    pub fn next_live(&self, index: usize) -> Option<usize> {
        (index + 1..self.tokens.len()).find(|i| !self.consumed[*i])
    }

    /// The last live position strictly before `index`.
    pub fn prev_live(&self, index: usize) -> Option<usize> {
        (0..index.min(self.tokens.len()))
            .rev()
            .find(|i| !self.consumed[*i])
    }

    /// Live positions from `start` (inclusive) to the end, in order.
    pub fn live_from(&self, start: usize) -> impl Iterator<Item = usize> + '_ {
        (start..self.tokens.len()).filter(move |i| !self.consumed[*i])
    }

    /// All live positions with their tokens.
    pub fn live(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.live_from(0).map(move |i| (i, self.tokens[i].as_str()))
    }

    /// Marks a range consumed. Out-of-range positions are ignored and
    /// consuming an already-consumed position is a no-op.
    pub fn consume(&mut self, range: RangeInclusive<usize>) {
        let end = (*range.end()).min(self.tokens.len().saturating_sub(1));
        if self.tokens.is_empty() || *range.start() > end {
            return;
        }
        for flag in &mut self.consumed[*range.start()..=end] {
            *flag = true;
        }
    }
}

fn keep_line(line: &str, config: &ReconcileConfig) -> bool {
    line.chars().count() >= config.min_token_len
        && !config.denylist.iter().any(|word| line.contains(word.as_str()))
}
