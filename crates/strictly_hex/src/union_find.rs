//! Weighted quick-union with path compression.

use serde::{Deserialize, Serialize};

/// Disjoint-set forest over `0..n`.
///
/// Unions link the smaller tree under the larger one and compress the
/// paths they walk, so lookups stay near constant. [`root`](Self::root)
/// and [`connected`](Self::connected) take `&self` and never restructure
/// the forest.
///
/// Indices outside `0..n` panic; callers validate ids first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
    components: usize,
}

impl UnionFind {
    /// Creates `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            components: n,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns true if the forest has no elements.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of disjoint sets.
    pub fn components(&self) -> usize {
        self.components
    }

    /// Root of `x`, halving the path on the way up.
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            let grandparent = self.parent[self.parent[x]];
            self.parent[x] = grandparent;
            x = grandparent;
        }
        x
    }

    /// Root of `x` without modifying the forest.
    pub fn root(&self, mut x: usize) -> usize {
        while self.parent[x] != x {
            x = self.parent[x];
        }
        x
    }

    /// Merges the sets containing `a` and `b`.
    ///
    /// Returns false if they were already in the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        let (small, large) = if self.size[root_a] < self.size[root_b] {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        self.parent[small] = large;
        self.size[large] += self.size[small];
        self.components -= 1;
        true
    }

    /// Returns true if `a` and `b` are in the same set.
    pub fn connected(&self, a: usize, b: usize) -> bool {
        self.root(a) == self.root(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_forest_is_all_singletons() {
        let uf = UnionFind::new(5);
        assert_eq!(uf.len(), 5);
        assert_eq!(uf.components(), 5);
        assert!(!uf.connected(0, 4));
        assert!(uf.connected(3, 3));
    }

    #[test]
    fn test_union_is_transitive() {
        let mut uf = UnionFind::new(6);
        assert!(uf.union(0, 1));
        assert!(uf.union(1, 2));
        assert!(uf.union(4, 5));
        assert!(uf.connected(0, 2));
        assert!(!uf.connected(2, 4));
        assert_eq!(uf.components(), 3);
    }

    #[test]
    fn test_redundant_union_returns_false() {
        let mut uf = UnionFind::new(3);
        assert!(uf.union(0, 1));
        assert!(!uf.union(1, 0));
        assert_eq!(uf.components(), 2);
    }

    #[test]
    fn test_find_compresses_long_chain() {
        let mut uf = UnionFind::new(64);
        for i in 1..64 {
            uf.union(i - 1, i);
        }
        let root = uf.find(63);
        assert_eq!(uf.root(0), root);
        assert_eq!(uf.components(), 1);
        // Union by size keeps every tree shallow.
        let depth = |uf: &UnionFind, mut x: usize| {
            let mut d = 0;
            while uf.parent[x] != x {
                x = uf.parent[x];
                d += 1;
            }
            d
        };
        assert!((0..64).all(|x| depth(&uf, x) <= 6));
    }
}
