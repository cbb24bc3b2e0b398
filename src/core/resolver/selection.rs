//! Interpreting the user's answer.

/// What the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Leave the group alone
    Skip,
    /// Answer could not be used; leave the group alone
    Invalid,
    /// Keep the candidate with this 1-based index
    Keep(usize),
}

/// Parse one answer against a group of `candidates` paths
///
/// Only the first whitespace-separated token counts.
pub fn parse_selection(input: &str, candidates: usize) -> Selection {
    let Some(token) = input.split_whitespace().next() else {
        return Selection::Invalid;
    };

    match token.parse::<i64>() {
        Ok(0) => Selection::Skip,
        Ok(n) if n < 0 => Selection::Invalid,
        Ok(n) => match usize::try_from(n) {
            Ok(index) if index <= candidates => Selection::Keep(index),
            _ => Selection::Invalid,
        },
        Err(_) => Selection::Invalid,
    }
}
