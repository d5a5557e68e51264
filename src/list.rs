//! Pure operations over a session's item sequence
//!
//! None of these touch the store or the transport; the state machine calls
//! them and decides what to persist and redraw.

use crate::session::Item;
use thiserror::Error;

#[cfg(test)]
mod proptests;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("Item index {index} out of range for list of {len} items")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Append one unacquired item per line of `text`.
///
/// Empty text is a single empty line and yields one empty-named item.
pub fn append_lines(mut items: Vec<Item>, text: &str) -> Vec<Item> {
    items.extend(text.split('\n').map(Item::new));
    items
}

/// Flip the acquired flag at `index`
pub fn toggle(mut items: Vec<Item>, index: usize) -> Result<Vec<Item>, ListError> {
    let len = items.len();
    let item = items
        .get_mut(index)
        .ok_or(ListError::IndexOutOfRange { index, len })?;
    item.acquired = !item.acquired;
    Ok(items)
}

#[allow(clippy::needless_pass_by_value)] // Consumes the list like its siblings
pub fn clear(_items: Vec<Item>) -> Vec<Item> {
    Vec::new()
}

/// Drop acquired items, keeping the rest in order
pub fn prune_acquired(mut items: Vec<Item>) -> Vec<Item> {
    items.retain(|item| !item.acquired);
    items
}
