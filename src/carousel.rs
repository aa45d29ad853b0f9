//! Windowed day selection with center-locked navigation.
//!
//! The carousel shows a fixed number of days out of a longer ordered list.
//! Moving the selection re-centers the window on the newly selected day,
//! except near the ends of the list where the window is pinned so it never
//! extends past the first or last day.
//!
//! The carousel never owns the selection. Callers pass the current list and
//! selected id on every call, and selection changes are requested through a
//! callback; the only state kept here is the window's start offset.

use serde::Deserialize;

/// A single selectable day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayItem {
    /// Unique identifier within the list
    pub id: String,
    /// Text shown on the day button
    pub label: String,
}

impl DayItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// When a stale offset gets pulled back into range after the list shrinks or
/// the capacity grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ClampMode {
    /// Clamp on every derivation; hosts also call [`Carousel::reconcile`]
    /// when the list or capacity changes.
    #[default]
    Eager,
    /// Only navigation re-clamps. A stale offset can show a short or empty
    /// window until the next move.
    Lazy,
}

/// Everything the carousel reads from its owner for one evaluation
#[derive(Debug, Clone, Copy)]
pub struct CarouselInputs<'a> {
    items: &'a [DayItem],
    selected_id: &'a str,
    capacity: usize,
    busy: bool,
}

impl<'a> CarouselInputs<'a> {
    /// Bundle inputs for one evaluation. A capacity of zero is treated as one.
    pub fn new(items: &'a [DayItem], selected_id: &'a str, capacity: usize, busy: bool) -> Self {
        Self {
            items,
            selected_id,
            capacity: capacity.max(1),
            busy,
        }
    }

    /// Position of the selected id in the list, if present
    pub fn current_index(&self) -> Option<usize> {
        self.items.iter().position(|d| d.id == self.selected_id)
    }

    pub fn can_go_prev(&self) -> bool {
        matches!(self.current_index(), Some(i) if i > 0)
    }

    pub fn can_go_next(&self) -> bool {
        matches!(self.current_index(), Some(i) if i + 1 < self.items.len())
    }

    fn max_offset(&self) -> usize {
        self.items.len().saturating_sub(self.capacity)
    }
}

/// One visible day button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySlot<'a> {
    pub item: &'a DayItem,
    pub active: bool,
    pub disabled: bool,
}

/// Derived state for the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselView<'a> {
    /// Start offset the slice was taken from
    pub offset: usize,
    pub slots: Vec<DaySlot<'a>>,
    pub current_index: Option<usize>,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    pub total: usize,
    pub capacity: usize,
}

#[cfg(test)]
impl CarouselView<'_> {
    /// Ids of the visible days, in order
    pub fn visible_ids(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.item.id.as_str()).collect()
    }
}

/// Window controller for the day carousel.
#[derive(Debug, Default)]
pub struct Carousel {
    offset: usize,
    clamp: ClampMode,
}

impl Carousel {
    pub fn new(clamp: ClampMode) -> Self {
        Self { offset: 0, clamp }
    }

    /// Stored start offset, before any eager clamping
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Compute the window offset that centers `target_index`.
    ///
    /// Behavior:
    /// - Target sits at `capacity / 2` within the window when possible
    /// - Near the start: offset stays at 0 (no negative scroll)
    /// - Near the end: offset stops at `total_items - capacity`
    pub fn center_window_on(target_index: usize, total_items: usize, capacity: usize) -> usize {
        let capacity = capacity.max(1);
        let half = capacity / 2;
        let max_offset = total_items.saturating_sub(capacity);

        target_index.saturating_sub(half).min(max_offset)
    }

    /// Offset used for rendering under the configured clamp mode
    pub fn effective_offset(&self, inputs: &CarouselInputs) -> usize {
        match self.clamp {
            ClampMode::Eager => self.offset.min(inputs.max_offset()),
            ClampMode::Lazy => self.offset,
        }
    }

    /// Derive the visible slice and control states. Nothing is cached.
    pub fn view<'a>(&self, inputs: &CarouselInputs<'a>) -> CarouselView<'a> {
        let offset = self.effective_offset(inputs);
        let total = inputs.items.len();
        let start = offset.min(total);
        let end = offset.saturating_add(inputs.capacity).min(total);
        let current_index = inputs.current_index();

        let items = inputs.items;
        let slots = items[start..end]
            .iter()
            .map(|item| DaySlot {
                item,
                active: item.id == inputs.selected_id,
                disabled: inputs.busy,
            })
            .collect();

        CarouselView {
            offset,
            slots,
            current_index,
            prev_disabled: inputs.busy || !inputs.can_go_prev(),
            next_disabled: inputs.busy || !inputs.can_go_next(),
            total,
            capacity: inputs.capacity,
        }
    }

    /// Select the day after the current one.
    ///
    /// Returns false without notifying when busy, when the selection is not
    /// in the list, or when it is already the last day.
    pub fn advance(&mut self, inputs: &CarouselInputs, on_change: impl FnOnce(&str)) -> bool {
        if inputs.busy || !inputs.can_go_next() {
            return false;
        }
        match inputs.current_index() {
            Some(current) => self.move_to(inputs, current + 1, on_change),
            None => false,
        }
    }

    /// Select the day before the current one. Mirror of [`Carousel::advance`].
    pub fn retreat(&mut self, inputs: &CarouselInputs, on_change: impl FnOnce(&str)) -> bool {
        if inputs.busy || !inputs.can_go_prev() {
            return false;
        }
        match inputs.current_index() {
            Some(current) => self.move_to(inputs, current - 1, on_change),
            None => false,
        }
    }

    /// Select `item_id` directly.
    ///
    /// The id is forwarded even when it is not in the list; the window only
    /// moves when it is.
    pub fn select_direct(
        &mut self,
        inputs: &CarouselInputs,
        item_id: &str,
        on_change: impl FnOnce(&str),
    ) -> bool {
        if inputs.busy {
            return false;
        }
        on_change(item_id);
        if let Some(index) = inputs.items.iter().position(|d| d.id == item_id) {
            self.offset = Self::center_window_on(index, inputs.items.len(), inputs.capacity);
        }
        true
    }

    /// Pull a stale offset back into range. No-op in lazy mode.
    ///
    /// Returns true when the stored offset changed.
    pub fn reconcile(&mut self, inputs: &CarouselInputs) -> bool {
        if self.clamp == ClampMode::Lazy {
            return false;
        }
        let clamped = self.offset.min(inputs.max_offset());
        let changed = clamped != self.offset;
        self.offset = clamped;
        changed
    }

    fn move_to(
        &mut self,
        inputs: &CarouselInputs,
        index: usize,
        on_change: impl FnOnce(&str),
    ) -> bool {
        let Some(item) = inputs.items.get(index) else {
            return false;
        };
        on_change(&item.id);
        self.offset = Self::center_window_on(index, inputs.items.len(), inputs.capacity);
        true
    }
}
