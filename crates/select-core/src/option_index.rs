//! OptionIndex — key lookup plus display-order links over a fixed option list.
//!
//! Nodes live in one arena (`Vec`) in input order. The key map and the
//! `previous`/`next` links hold arena slots, so traversal in either direction
//! and lookup by key are both O(1). The index never changes after `build`;
//! a new option list means a new index.

use std::collections::HashMap;

use tracing::debug;

use crate::error::SelectError;
use crate::option::SelectItem;

/// One option plus its place in the list.
#[derive(Debug, Clone)]
pub struct IndexedOption<T> {
    option: T,
    position: usize,
    previous: Option<usize>,
    next: Option<usize>,
}

impl<T: SelectItem> IndexedOption<T> {
    pub fn option(&self) -> &T {
        &self.option
    }

    pub fn key(&self) -> &T::Key {
        self.option.key()
    }

    pub fn label(&self) -> &str {
        self.option.label()
    }

    /// 0-based order of appearance in the input list.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct OptionIndex<T: SelectItem> {
    nodes: Vec<IndexedOption<T>>,
    by_key: HashMap<T::Key, usize>,
    first: Option<usize>,
}

impl<T: SelectItem> OptionIndex<T> {
    /// Build the index in one pass over `options`.
    ///
    /// # Errors
    /// `SelectError::DuplicateKey` if two options share a key. Nothing is
    /// kept from a rejected list.
    pub fn build(options: impl IntoIterator<Item = T>) -> Result<Self, SelectError> {
        let mut nodes: Vec<IndexedOption<T>> = Vec::new();
        let mut by_key = HashMap::new();
        let mut previous: Option<usize> = None;

        for (position, option) in options.into_iter().enumerate() {
            if let Some(&first) = by_key.get(option.key()) {
                return Err(SelectError::DuplicateKey {
                    key: format!("{:?}", option.key()),
                    first,
                    duplicate: position,
                });
            }
            by_key.insert(option.key().clone(), position);
            if let Some(prev) = previous {
                nodes[prev].next = Some(position);
            }
            nodes.push(IndexedOption {
                option,
                position,
                previous,
                next: None,
            });
            previous = Some(position);
        }

        let first = if nodes.is_empty() { None } else { Some(0) };
        debug!("option index built: {} options", nodes.len());
        Ok(Self {
            nodes,
            by_key,
            first,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn first(&self) -> Option<&IndexedOption<T>> {
        self.first.map(|slot| &self.nodes[slot])
    }

    pub fn last(&self) -> Option<&IndexedOption<T>> {
        self.nodes.last()
    }

    pub fn get(&self, key: &T::Key) -> Option<&IndexedOption<T>> {
        self.by_key.get(key).map(|&slot| &self.nodes[slot])
    }

    pub fn contains_key(&self, key: &T::Key) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn position_of(&self, key: &T::Key) -> Option<usize> {
        self.get(key).map(IndexedOption::position)
    }

    /// Option at a display position.
    pub fn at(&self, position: usize) -> Option<&IndexedOption<T>> {
        self.nodes.get(position)
    }

    pub fn next_of(&self, node: &IndexedOption<T>) -> Option<&IndexedOption<T>> {
        node.next.map(|slot| &self.nodes[slot])
    }

    pub fn previous_of(&self, node: &IndexedOption<T>) -> Option<&IndexedOption<T>> {
        node.previous.map(|slot| &self.nodes[slot])
    }

    /// Walk the list from `first` along the `next` links.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            index: self,
            cursor: self.first,
        }
    }
}

impl<T: SelectItem> Default for OptionIndex<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            by_key: HashMap::new(),
            first: None,
        }
    }
}

pub struct Iter<'a, T: SelectItem> {
    index: &'a OptionIndex<T>,
    cursor: Option<usize>,
}

impl<'a, T: SelectItem> Iterator for Iter<'a, T> {
    type Item = &'a IndexedOption<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.index;
        let node = &index.nodes[self.cursor?];
        self.cursor = node.next;
        Some(node)
    }
}

impl<'a, T: SelectItem> IntoIterator for &'a OptionIndex<T> {
    type Item = &'a IndexedOption<T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
