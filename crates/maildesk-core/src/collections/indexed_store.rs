//! Ordered binary search tree keyed by identifier.

use std::cmp::Ordering;
use std::fmt;

use super::CollectionError;

type Link<K, V> = Option<Box<Node<K, V>>>;

#[derive(Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    const fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }
}

/// Identifier-to-value index backed by an unbalanced binary search tree.
///
/// Keys are unique; inserting an existing key overwrites its value. Each node
/// is owned by its parent, so dropping the store drops the whole tree.
///
/// There is no rebalancing: adversarial (sorted) insertion order degrades
/// lookups to O(n). The directory and contact books this backs are small.
#[derive(Clone)]
pub struct IndexedStore<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> IndexedStore<K, V> {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the store holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// In-order iterator over `(key, value)` pairs, ascending by key.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: self.len,
        };
        iter.push_left(self.root.as_deref());
        iter
    }

    /// All entries in ascending key order.
    #[must_use]
    pub fn entries(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    /// Values in ascending key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }
}

impl<K: Ord, V> IndexedStore<K, V> {
    /// Inserts a value, returning the previous value if the key existed.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut link = &mut self.root;
        while let Some(node) = link {
            match key.cmp(&node.key) {
                Ordering::Less => link = &mut node.left,
                Ordering::Greater => link = &mut node.right,
                Ordering::Equal => return Some(std::mem::replace(&mut node.value, value)),
            }
        }
        *link = Some(Box::new(Node::leaf(key, value)));
        self.len += 1;
        None
    }

    /// Looks up the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] if the key is absent.
    pub fn search(&self, key: &K) -> Result<&V, CollectionError> {
        let mut link = self.root.as_deref();
        while let Some(node) = link {
            match key.cmp(&node.key) {
                Ordering::Less => link = node.left.as_deref(),
                Ordering::Greater => link = node.right.as_deref(),
                Ordering::Equal => return Ok(&node.value),
            }
        }
        Err(CollectionError::NotFound)
    }

    /// Mutable lookup of the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] if the key is absent.
    pub fn search_mut(&mut self, key: &K) -> Result<&mut V, CollectionError> {
        let mut link = self.root.as_deref_mut();
        while let Some(node) = link {
            match key.cmp(&node.key) {
                Ordering::Less => link = node.left.as_deref_mut(),
                Ordering::Greater => link = node.right.as_deref_mut(),
                Ordering::Equal => return Ok(&mut node.value),
            }
        }
        Err(CollectionError::NotFound)
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_ok()
    }

    /// Removes `key` and returns its value.
    ///
    /// A node with two children is replaced by its in-order successor (the
    /// minimum of its right subtree); otherwise it collapses to its only child.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] if the key is absent.
    pub fn remove(&mut self, key: &K) -> Result<V, CollectionError> {
        let value = Self::remove_from(&mut self.root, key).ok_or(CollectionError::NotFound)?;
        self.len -= 1;
        Ok(value)
    }

    fn remove_from(link: &mut Link<K, V>, key: &K) -> Option<V> {
        let node = link.as_mut()?;
        match key.cmp(&node.key) {
            Ordering::Less => Self::remove_from(&mut node.left, key),
            Ordering::Greater => Self::remove_from(&mut node.right, key),
            Ordering::Equal => {
                let mut removed = link.take()?;
                *link = match (removed.left.take(), removed.right.take()) {
                    (None, child) | (child, None) => child,
                    (Some(left), Some(right)) => {
                        let (mut successor, rest) = Self::detach_min(right);
                        successor.left = Some(left);
                        successor.right = rest;
                        Some(successor)
                    }
                };
                Some(removed.value)
            }
        }
    }

    /// Splits the minimum node off a subtree, returning it and what remains.
    fn detach_min(mut node: Box<Node<K, V>>) -> (Box<Node<K, V>>, Link<K, V>) {
        match node.left.take() {
            None => {
                let rest = node.right.take();
                (node, rest)
            }
            Some(left) => {
                let (min, rest) = Self::detach_min(left);
                node.left = rest;
                (min, Some(node))
            }
        }
    }
}

impl<K, V> Default for IndexedStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IndexedStore<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for IndexedStore<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

impl<K: Ord, V> Extend<(K, V)> for IndexedStore<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a IndexedStore<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over an [`IndexedStore`].
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
