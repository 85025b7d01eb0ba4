//! Session statistics and token estimation.

/// Counters reported by `/info`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub turns: usize,
    pub user_turns: usize,
    pub assistant_turns: usize,
    /// Total characters over all turns.
    pub chars: usize,
    /// Sum of [`estimate_tokens`] over all turns.
    pub approx_tokens: usize,
}

/// Approximate token count: ⌈chars / 4⌉; 0 for empty text.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}
