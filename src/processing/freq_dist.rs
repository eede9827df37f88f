//! Frequency distribution over tokens

use std::collections::HashMap;

/// Token counts that remember first-seen order.
///
/// Ranking is by descending count; equal counts keep the order in which the
/// tokens were first seen.
#[derive(Debug, Clone, Default)]
pub struct FreqDist {
    order: Vec<String>,
    counts: HashMap<String, usize>,
    total: usize,
}

impl FreqDist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dist = Self::new();
        for token in tokens {
            dist.add(token.as_ref());
        }
        dist
    }

    pub fn add(&mut self, token: &str) {
        match self.counts.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                self.order.push(token.to_string());
                self.counts.insert(token.to_string(), 1);
            }
        }
        self.total += 1;
    }

    pub fn count(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Number of samples (N)
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct samples (B)
    pub fn unique(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Relative frequency of `token`, 0.0 for an empty distribution.
    pub fn freq(&self, token: &str) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(token) as f64 / self.total as f64
        }
    }

    /// Most frequent token, first seen wins ties.
    pub fn max(&self) -> Option<(&str, usize)> {
        self.ranked().into_iter().next()
    }

    /// Tokens seen exactly once, in first-seen order.
    pub fn hapaxes(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, count)| *count == 1)
            .map(|(token, _)| token)
            .collect()
    }

    /// `(token, count)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.order
            .iter()
            .map(move |token| (token.as_str(), self.count(token)))
    }

    /// The `n` most common tokens. `n == 0` yields an empty vector.
    pub fn most_common(&self, n: usize) -> Vec<(String, usize)> {
        self.ranked()
            .into_iter()
            .take(n)
            .map(|(token, count)| (token.to_string(), count))
            .collect()
    }

    fn ranked(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self.iter().collect();
        // Stable sort keeps first-seen order among equal counts
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_common() {
        let dist = FreqDist::from_tokens(["a", "b", "a", "c", "a", "b"]);
        assert_eq!(
            dist.most_common(2),
            vec![("a".to_string(), 3), ("b".to_string(), 2)]
        );
    }

    #[test]
    fn test_ties_first_seen_first() {
        let dist = FreqDist::from_tokens(["z", "y", "x", "y", "z", "x"]);
        assert_eq!(
            dist.most_common(3),
            vec![
                ("z".to_string(), 2),
                ("y".to_string(), 2),
                ("x".to_string(), 2)
            ]
        );
    }

    #[test]
    fn test_zero_and_empty() {
        let dist = FreqDist::from_tokens(["a", "b"]);
        assert!(dist.most_common(0).is_empty());

        let empty = FreqDist::new();
        assert!(empty.most_common(5).is_empty());
        assert_eq!(empty.freq("a"), 0.0);
        assert_eq!(empty.max(), None);
    }

    #[test]
    fn test_n_larger_than_vocabulary() {
        let dist = FreqDist::from_tokens(["a", "b", "a"]);
        assert_eq!(dist.most_common(10).len(), 2);
    }

    #[test]
    fn test_statistics() {
        let dist = FreqDist::from_tokens(["rust", "is", "rust", "fast"]);
        assert_eq!(dist.total(), 4);
        assert_eq!(dist.unique(), 3);
        assert_eq!(dist.count("rust"), 2);
        assert_eq!(dist.count("go"), 0);
        assert!((dist.freq("rust") - 0.5).abs() < f64::EPSILON);
        assert_eq!(dist.max(), Some(("rust", 2)));
        assert_eq!(dist.hapaxes(), vec!["is", "fast"]);
    }
}
