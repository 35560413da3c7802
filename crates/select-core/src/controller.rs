//! SelectionController — focus and selection state over an `OptionIndex`.
//!
//! # States
//! ```text
//!  (focused, selected)   focused: key | none, selected: key | none
//! ```
//! Focus starts on the first option and never leaves the index; it is none
//! only for an empty list. Traversal is linear: moving past either end is a
//! no-op. Every transition returns `Some(SelectEvent)` when it changed state
//! and `None` otherwise, so callers can notify without diffing.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::SelectError;
use crate::option::SelectItem;
use crate::option_index::{IndexedOption, OptionIndex};

/// Logical input the controller understands. Physical keys are mapped to
/// these by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    FocusNext,
    FocusPrevious,
    FocusFirst,
    FocusLast,
    Commit,
}

/// A state change worth telling the outside world about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectEvent<K> {
    FocusChanged { key: K, position: usize },
    Selected { key: K, position: usize },
}

#[derive(Debug, Clone)]
pub struct SelectionController<T: SelectItem> {
    index: Arc<OptionIndex<T>>,
    focused: Option<T::Key>,
    selected: Option<T::Key>,
}

impl<T: SelectItem> SelectionController<T> {
    pub fn new(index: Arc<OptionIndex<T>>) -> Self {
        let focused = index.first().map(|node| node.key().clone());
        Self {
            index,
            focused,
            selected: None,
        }
    }

    /// Start with `default` already selected and focused.
    ///
    /// # Errors
    /// `SelectError::UnknownKey` if no option carries `default`.
    pub fn with_default(index: Arc<OptionIndex<T>>, default: T::Key) -> Result<Self, SelectError> {
        if !index.contains_key(&default) {
            return Err(SelectError::UnknownKey(format!("{:?}", default)));
        }
        Ok(Self {
            index,
            focused: Some(default.clone()),
            selected: Some(default),
        })
    }

    pub fn index(&self) -> &Arc<OptionIndex<T>> {
        &self.index
    }

    pub fn focused_key(&self) -> Option<&T::Key> {
        self.focused.as_ref()
    }

    pub fn selected_key(&self) -> Option<&T::Key> {
        self.selected.as_ref()
    }

    pub fn focused(&self) -> Option<&IndexedOption<T>> {
        self.focused.as_ref().and_then(|key| self.index.get(key))
    }

    pub fn selected(&self) -> Option<&IndexedOption<T>> {
        self.selected.as_ref().and_then(|key| self.index.get(key))
    }

    pub fn is_focused(&self, key: &T::Key) -> bool {
        self.focused.as_ref() == Some(key)
    }

    pub fn is_selected(&self, key: &T::Key) -> bool {
        self.selected.as_ref() == Some(key)
    }

    pub fn focus_next(&mut self) -> Option<SelectEvent<T::Key>> {
        let (key, position) = {
            let current = self.focused()?;
            let next = self.index.next_of(current)?;
            (next.key().clone(), next.position())
        };
        debug!("focus next -> {:?}", key);
        self.focused = Some(key.clone());
        Some(SelectEvent::FocusChanged { key, position })
    }

    pub fn focus_previous(&mut self) -> Option<SelectEvent<T::Key>> {
        let (key, position) = {
            let current = self.focused()?;
            let previous = self.index.previous_of(current)?;
            (previous.key().clone(), previous.position())
        };
        debug!("focus previous -> {:?}", key);
        self.focused = Some(key.clone());
        Some(SelectEvent::FocusChanged { key, position })
    }

    pub fn focus_first(&mut self) -> Option<SelectEvent<T::Key>> {
        let (key, position) = {
            let first = self.index.first()?;
            (first.key().clone(), first.position())
        };
        self.move_focus_to(key, position)
    }

    pub fn focus_last(&mut self) -> Option<SelectEvent<T::Key>> {
        let (key, position) = {
            let last = self.index.last()?;
            (last.key().clone(), last.position())
        };
        self.move_focus_to(key, position)
    }

    /// Commit the focused option as the selection.
    pub fn select_focused(&mut self) -> Option<SelectEvent<T::Key>> {
        let (key, position) = {
            let node = self.focused()?;
            (node.key().clone(), node.position())
        };
        if self.selected.as_ref() == Some(&key) {
            trace!("select: {:?} already selected", key);
            return None;
        }
        debug!("selected {:?}", key);
        self.selected = Some(key.clone());
        Some(SelectEvent::Selected { key, position })
    }

    pub fn apply(&mut self, signal: Signal) -> Option<SelectEvent<T::Key>> {
        match signal {
            Signal::FocusNext => self.focus_next(),
            Signal::FocusPrevious => self.focus_previous(),
            Signal::FocusFirst => self.focus_first(),
            Signal::FocusLast => self.focus_last(),
            Signal::Commit => self.select_focused(),
        }
    }

    fn move_focus_to(&mut self, key: T::Key, position: usize) -> Option<SelectEvent<T::Key>> {
        if self.focused.as_ref() == Some(&key) {
            return None;
        }
        debug!("focus jump -> {:?}", key);
        self.focused = Some(key.clone());
        Some(SelectEvent::FocusChanged { key, position })
    }
}
