//! Display ordering and reorder eligibility.
//!
//! Active items always precede completed ones. Within each group the order
//! is whatever earlier mutations left behind, so the sort must be stable.
//! Only the contiguous active region can be reordered by hand.

use crate::types::Todo;

/// Stable sort placing every active item before every completed one.
pub fn sort_completed_last(items: &mut [Todo]) {
    // `sort_by_key` is stable; equal keys keep their relative order.
    items.sort_by_key(|todo| todo.completed);
}

/// True when the item at `index` is active and so is its predecessor.
pub fn can_move_up(items: &[Todo], index: usize) -> bool {
    if index == 0 || index >= items.len() {
        return false;
    }
    items[index].is_active() && items[index - 1].is_active()
}

/// True when the item at `index` is active and is not the last active item.
///
/// "Last active" is decided by filtering the sequence down to active items
/// and comparing `index` against the final position of that subsequence.
/// With completed items sorted last the two coincide, which is what keeps
/// moves inside the active region.
pub fn can_move_down(items: &[Todo], index: usize) -> bool {
    let Some(todo) = items.get(index) else {
        return false;
    };
    if !todo.is_active() {
        return false;
    }
    let active_count = items.iter().filter(|t| t.is_active()).count();
    let is_last_active = index + 1 == active_count;
    !is_last_active && index + 1 < items.len()
}

/// Where an item sits relative to the active region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionContext {
    pub index: usize,
    /// 1-based position shown to the user.
    pub display_index: usize,
    pub is_active: bool,
    pub is_first_active: bool,
    pub is_last_active: bool,
    pub can_move_up: bool,
    pub can_move_down: bool,
}

pub fn position_context(items: &[Todo], index: usize) -> Option<PositionContext> {
    let todo = items.get(index)?;
    let is_active = todo.is_active();
    let active_count = items.iter().filter(|t| t.is_active()).count();
    let active_before = items[..index].iter().filter(|t| t.is_active()).count();
    Some(PositionContext {
        index,
        display_index: index + 1,
        is_active,
        is_first_active: is_active && active_before == 0,
        is_last_active: is_active && active_before + 1 == active_count,
        can_move_up: can_move_up(items, index),
        can_move_down: can_move_down(items, index),
    })
}
