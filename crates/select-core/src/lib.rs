//! Navigation state for a single-select list.
//!
//! `OptionIndex` is the immutable lookup-plus-order structure built from the
//! option list; `SelectionController` tracks focus and selection over it.

pub mod config;
pub mod controller;
pub mod error;
pub mod option;
pub mod option_index;
pub mod platform;

pub use controller::{SelectEvent, SelectionController, Signal};
pub use error::SelectError;
pub use option::{OptionsFile, SelectItem, SelectOption};
pub use option_index::{IndexedOption, OptionIndex};
