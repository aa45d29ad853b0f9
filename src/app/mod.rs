//! Application state and selection handling
//!
//! This module contains the core application state:
//! - `App` struct: owns the day list and the current selection
//! - Navigation through the carousel window controller
//! - Loading state that blocks navigation while a day is being loaded
//! - Viewport tracking for the default capacity policy

mod mode;

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use ratatui::layout::{Position, Rect};

use crate::capacity::{self, CapacityPolicy};
use crate::carousel::{Carousel, CarouselInputs, CarouselView, DayItem};
use crate::config::Settings;
use crate::days;

pub use mode::{HitTarget, Mode};
use mode::Navigation;

/// Main application state
pub struct App {
    /// All days in the carousel, in order
    pub days: Vec<DayItem>,
    /// Id of the selected day. May name a day that is not in the list.
    pub selected_id: String,
    /// Window controller for the day row
    pub carousel: Carousel,
    /// Current UI mode
    pub mode: Mode,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Error message to display (clears on next action)
    pub error: Option<String>,
    /// Success message to display (clears on next action)
    pub message: Option<String>,
    /// Clickable regions from the last render
    pub hit_regions: Vec<(Rect, HitTarget)>,
    /// Last observed viewport width
    viewport_width: u32,
    capacity_override: Option<usize>,
    policy: CapacityPolicy,
    day_count: usize,
    load_delay: Duration,
    /// When the current day finishes loading
    loading_until: Option<Instant>,
    /// Busy toggled on by the user
    busy_pinned: bool,
}

impl App {
    // =========================================================================
    // Initialization
    // =========================================================================

    /// Create a new App for the given settings and viewport width.
    ///
    /// Selects today when it is in the list, otherwise the first day. The
    /// window starts centered on that selection, so its offset is only 0
    /// when the selection is near the start. No load is started.
    pub fn new(settings: &Settings, viewport_width: u32) -> Self {
        let days = days::build_days(settings.start, settings.days);
        let today = days::day_id(days::today());
        let selected_id = if days.iter().any(|d| d.id == today) {
            today
        } else {
            days.first().map(|d| d.id.clone()).unwrap_or_default()
        };

        let mut app = Self {
            days,
            selected_id,
            carousel: Carousel::new(settings.clamp),
            mode: Mode::Normal,
            should_quit: false,
            error: None,
            message: None,
            hit_regions: Vec::new(),
            viewport_width,
            capacity_override: settings.capacity,
            policy: settings.policy,
            day_count: settings.days,
            load_delay: settings.load_delay,
            loading_until: None,
            busy_pinned: false,
        };

        // Bring the initial selection into view without starting a load
        let id = app.selected_id.clone();
        let capacity = app.capacity();
        let inputs = CarouselInputs::new(&app.days, &app.selected_id, capacity, false);
        app.carousel.select_direct(&inputs, &id, |_| {});

        tracing::info!(
            days = app.days.len(),
            selected = %app.selected_id,
            capacity,
            "carousel ready"
        );
        app
    }

    /// Clear any displayed messages
    pub fn clear_messages(&mut self) {
        self.error = None;
        self.message = None;
    }

    // =========================================================================
    // Derived state
    // =========================================================================

    /// Visible day count for the current viewport
    pub fn capacity(&self) -> usize {
        self.policy
            .resolve(self.capacity_override, self.viewport_width)
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    /// Whether navigation is currently blocked
    pub fn is_busy(&self) -> bool {
        self.busy_pinned || self.loading_until.is_some()
    }

    pub fn inputs(&self) -> CarouselInputs<'_> {
        CarouselInputs::new(&self.days, &self.selected_id, self.capacity(), self.is_busy())
    }

    /// Current carousel state for rendering
    pub fn view(&self) -> CarouselView<'_> {
        self.carousel.view(&self.inputs())
    }

    /// The selected day, if it is in the list
    pub fn selected_day(&self) -> Option<&DayItem> {
        self.days.iter().find(|d| d.id == self.selected_id)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Move to the next day
    pub fn next_day(&mut self) -> bool {
        self.navigate(Navigation::Next)
    }

    /// Move to the previous day
    pub fn prev_day(&mut self) -> bool {
        self.navigate(Navigation::Prev)
    }

    /// Select a day by id, even one that is not in the list
    pub fn select_day(&mut self, id: &str) -> bool {
        self.navigate(Navigation::Direct(id))
    }

    /// Select the day in the 1-based visible `slot`
    pub fn select_slot(&mut self, slot: usize) -> bool {
        let id = slot
            .checked_sub(1)
            .and_then(|i| self.view().slots.get(i).map(|s| s.item.id.clone()));
        match id {
            Some(id) => self.select_day(&id),
            None => {
                self.error = Some(format!("No day in slot {}", slot));
                false
            }
        }
    }

    /// Jump to the first day
    pub fn first_day(&mut self) -> bool {
        match self.days.first().map(|d| d.id.clone()) {
            Some(id) => self.select_day(&id),
            None => false,
        }
    }

    /// Jump to the last day
    pub fn last_day(&mut self) -> bool {
        match self.days.last().map(|d| d.id.clone()) {
            Some(id) => self.select_day(&id),
            None => false,
        }
    }

    /// Select today, which may lie outside the list
    pub fn select_today(&mut self) -> bool {
        let id = days::day_id(days::today());
        let selected = self.select_day(&id);
        if selected && self.selected_day().is_none() {
            self.message = Some(format!("{} is outside the carousel", id));
        }
        selected
    }

    fn navigate(&mut self, nav: Navigation) -> bool {
        let capacity = self.capacity();
        let busy = self.is_busy();
        let inputs = CarouselInputs::new(&self.days, &self.selected_id, capacity, busy);

        let mut requested = None;
        let on_change = |id: &str| requested = Some(id.to_string());
        let moved = match nav {
            Navigation::Next => self.carousel.advance(&inputs, on_change),
            Navigation::Prev => self.carousel.retreat(&inputs, on_change),
            Navigation::Direct(id) => self.carousel.select_direct(&inputs, id, on_change),
        };

        if !moved {
            tracing::debug!(?nav, busy, "navigation ignored");
        }
        if let Some(id) = requested {
            self.apply_selection(id);
        }
        moved
    }

    /// Selection-change callback target: take the id as-is and start loading
    fn apply_selection(&mut self, id: String) {
        tracing::info!(from = %self.selected_id, to = %id, offset = self.carousel.offset(), "selection changed");
        self.selected_id = id;
        if !self.load_delay.is_zero() {
            self.loading_until = Some(Instant::now() + self.load_delay);
        }
    }

    // =========================================================================
    // Busy state
    // =========================================================================

    /// Finish loading once its deadline has passed
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.loading_until {
            if now >= deadline {
                self.loading_until = None;
                tracing::debug!(selected = %self.selected_id, "day loaded");
            }
        }
    }

    /// Pin busy on or off
    pub fn toggle_busy(&mut self) {
        self.busy_pinned = !self.busy_pinned;
        self.message = Some(if self.busy_pinned {
            "Busy: navigation locked".to_string()
        } else {
            "Busy cleared".to_string()
        });
    }

    // =========================================================================
    // Viewport and list changes
    // =========================================================================

    /// Terminal resized to `columns` wide
    pub fn resize(&mut self, columns: u16) {
        self.set_viewport_width(capacity::viewport_width(columns));
    }

    /// Record a new viewport width and keep the window in range
    pub fn set_viewport_width(&mut self, width: u32) {
        let before = self.capacity();
        self.viewport_width = width;
        let after = self.capacity();
        if before != after {
            tracing::info!(width, before, after, "capacity changed");
        }
        self.reconcile();
    }

    /// Replace the day list with `day_count` days from `start`.
    ///
    /// The selection is left alone, even if it is no longer in the list.
    pub fn reload_days(&mut self, start: NaiveDate) {
        self.days = days::build_days(start, self.day_count);
        tracing::info!(start = %start, days = self.days.len(), "days reloaded");
        if self.selected_day().is_none() {
            self.message = Some("Selected day is not in the new range".to_string());
        }
        self.reconcile();
    }

    /// Shift the whole list by `weeks`
    pub fn shift_weeks(&mut self, weeks: i64) {
        let Some(first) = self.days.first() else {
            return;
        };
        let Ok(start) = days::parse_date(&first.id) else {
            return;
        };
        match start.checked_add_signed(chrono::Duration::weeks(weeks)) {
            Some(start) => self.reload_days(start),
            None => self.error = Some("Date out of range".to_string()),
        }
    }

    fn reconcile(&mut self) {
        let capacity = self.capacity();
        let inputs = CarouselInputs::new(&self.days, &self.selected_id, capacity, false);
        if self.carousel.reconcile(&inputs) {
            tracing::debug!(offset = self.carousel.offset(), "window offset clamped");
        }
    }

    // =========================================================================
    // Mouse
    // =========================================================================

    /// What is under the cell at (`x`, `y`) in the last render
    pub fn hit_test(&self, x: u16, y: u16) -> Option<&HitTarget> {
        let pos = Position::new(x, y);
        self.hit_regions
            .iter()
            .find(|(area, _)| area.contains(pos))
            .map(|(_, target)| target)
    }

    /// Handle a left click at (`x`, `y`)
    pub fn click(&mut self, x: u16, y: u16) -> bool {
        match self.hit_test(x, y).cloned() {
            Some(HitTarget::Prev) => self.prev_day(),
            Some(HitTarget::Next) => self.next_day(),
            Some(HitTarget::Day(id)) => self.select_day(&id),
            None => false,
        }
    }

    // =========================================================================
    // Mode transitions
    // =========================================================================

    pub fn show_help(&mut self) {
        self.mode = Mode::Help;
    }

    /// Leave the current overlay
    pub fn cancel(&mut self) {
        self.mode = Mode::Normal;
    }
}
