use std::collections::BTreeSet;

/// Donor destinations not yet claimed, by OD row index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DestinationPool {
    available: BTreeSet<usize>,
}

impl DestinationPool {
    /// Pool holding every destination `0..n`.
    pub fn full(n: usize) -> Self {
        Self { available: (0..n).collect() }
    }

    #[inline] pub fn contains(&self, j: usize) -> bool { self.available.contains(&j) }
    #[inline] pub fn len(&self) -> usize { self.available.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.available.is_empty() }

    /// Unclaimed destinations in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ { self.available.iter().copied() }

    /// Remove `j` from the pool. Returns false if it was already claimed.
    pub fn claim(&mut self, j: usize) -> bool { self.available.remove(&j) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_are_exclusive() {
        let mut pool = DestinationPool::full(3);
        assert!(pool.claim(1));
        assert!(!pool.claim(1));
        assert_eq!(pool.iter().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(pool.len(), 2);
    }
}
