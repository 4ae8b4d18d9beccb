//! Locates an employee's name in the timesheet token stream.
//!
//! Clock names are canonicalized through the alias table before they reach
//! this module. A live token is a candidate start for an employee's block when:
//! - its token-set similarity to the canonical name is at least the threshold
//!   (inclusive),
//! - a live token follows it, and
//! - that following token is not the role-heading marker.
//!
//! Candidates are returned in document order; the token parser takes the
//! first one whose block ends at a terminator.

use tracing::debug;

use crate::config::ReconcileConfig;
use crate::models::ReconcileWarning;

use super::similarity::token_set_ratio;
use super::token_stream::TokenStream;

/// A position in the stream accepted as the start of an employee's block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameCandidate {
    /// Token position.
    pub index: usize,
    /// Similarity score that accepted it.
    pub score: u8,
}

/// Finds every live token accepted as a match for `name`.
///
/// # Example
///
/// ```
/// use hours_reconciler::config::ReconcileConfig;
/// use hours_reconciler::reconciliation::{TokenStream, find_name_candidates};
///
/// let stream = TokenStream::new(vec![
///     "Doe, Jane", "SUPERVISOR",
///     "Doe, Jane", "Monday", "3/4/2024", "8.00", "ST", "Overtime:",
/// ]);
/// let candidates = find_name_candidates(&stream, "Jane Doe", &ReconcileConfig::default());
/// assert_eq!(candidates.len(), 1);
/// assert_eq!(candidates[0].index, 2);
/// ```
pub fn find_name_candidates(
    stream: &TokenStream,
    name: &str,
    config: &ReconcileConfig,
) -> Vec<NameCandidate> {
    stream
        .live()
        .filter_map(|(index, token)| {
            let score = token_set_ratio(name, token);
            if score < config.match_threshold {
                return None;
            }
            let next = stream.next_live(index)?;
            if stream.token(next) == Some(config.tokens.role_heading.as_str()) {
                debug!(employee = %name, index, "Rejected role heading match");
                return None;
            }
            debug!(employee = %name, index, score, token = %token, "Accepted name candidate");
            Some(NameCandidate { index, score })
        })
        .collect()
}

/// Reports candidates whose token also clears the threshold for another
/// employee on the roster.
///
/// The match is kept; the warning lets an auditor check that the block was
/// attributed to the right person.
pub fn ambiguity_warnings(
    stream: &TokenStream,
    name: &str,
    candidates: &[NameCandidate],
    roster: &[String],
    config: &ReconcileConfig,
) -> Vec<ReconcileWarning> {
    candidates
        .iter()
        .filter_map(|candidate| {
            let token = stream.token(candidate.index)?;
            let rivals: Vec<String> = roster
                .iter()
                .filter(|other| other.as_str() != name)
                .filter(|other| token_set_ratio(other, token) >= config.match_threshold)
                .cloned()
                .collect();
            if rivals.is_empty() {
                return None;
            }
            Some(ReconcileWarning::AmbiguousIdentityMatch {
                employee: name.to_string(),
                token_index: candidate.index,
                token: token.to_string(),
                rivals,
            })
        })
        .collect()
}
