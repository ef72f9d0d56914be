use std::fmt;

/// A `(key, priority)` pair as stored in the heap.
///
/// The key is the entry's identity; the priority is only changed by the heap
/// itself. Renders as `"(key, priority)"`.
///
/// ```
/// use heapmap::Entry;
///
/// let entry = Entry::new("a", 5);
/// assert_eq!(entry.to_string(), "(a, 5)");
/// assert_eq!(entry.key(), &"a");
/// assert_eq!(entry.priority(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry<K, P> {
    pub(crate) key: K,
    pub(crate) priority: P,
}

impl<K, P> Entry<K, P> {
    pub fn new(key: K, priority: P) -> Self {
        Self { key, priority }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn priority(&self) -> P
    where
        P: Copy,
    {
        self.priority
    }

    pub fn into_parts(self) -> (K, P) {
        (self.key, self.priority)
    }
}

impl<K: fmt::Display, P: fmt::Display> fmt::Display for Entry<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.key, self.priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_display_matches_pair_format() {
        let entry = Entry::new("trending".to_string(), -3i64);
        assert_eq!(entry.to_string(), "(trending, -3)");
    }

    #[test]
    fn entry_into_parts_returns_fields() {
        let entry = Entry::new(7u32, 11u64);
        assert_eq!(entry.into_parts(), (7, 11));
    }
}
