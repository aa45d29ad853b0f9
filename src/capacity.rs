//! How many days fit in the carousel.
//!
//! Narrow viewports show fewer days than wide ones. Width is measured in
//! pixel-like units so the same breakpoint works across terminals with
//! different font sizes.

use crossterm::terminal;

/// Nominal cell width used when the terminal does not report pixel sizes
pub const FALLBACK_CELL_WIDTH: u32 = 8;

/// Breakpoint-based default capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityPolicy {
    /// Widths below this are narrow
    pub breakpoint: u32,
    pub narrow: usize,
    pub wide: usize,
}

impl Default for CapacityPolicy {
    fn default() -> Self {
        Self {
            breakpoint: 768,
            narrow: 3,
            wide: 5,
        }
    }
}

impl CapacityPolicy {
    /// Capacity for the given viewport width
    pub fn capacity_for(&self, width: u32) -> usize {
        let capacity = if width < self.breakpoint {
            self.narrow
        } else {
            self.wide
        };
        capacity.max(1)
    }

    /// An explicit override wins over the breakpoint policy
    pub fn resolve(&self, capacity_override: Option<usize>, width: u32) -> usize {
        match capacity_override {
            Some(capacity) => capacity.max(1),
            None => self.capacity_for(width),
        }
    }
}

/// Observed viewport width for a terminal `columns` wide.
///
/// Prefers the pixel width reported by the terminal and falls back to a
/// nominal cell width when it is unavailable (reported as 0 or an error).
pub fn viewport_width(columns: u16) -> u32 {
    let reported = terminal::window_size()
        .ok()
        .filter(|size| size.columns == columns)
        .map(|size| u32::from(size.width))
        .unwrap_or(0);
    width_from(columns, reported)
}

fn width_from(columns: u16, reported_pixels: u32) -> u32 {
    if reported_pixels > 0 {
        reported_pixels
    } else {
        u32::from(columns) * FALLBACK_CELL_WIDTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_boundary() {
        let policy = CapacityPolicy::default();
        assert_eq!(policy.capacity_for(0), 3);
        assert_eq!(policy.capacity_for(767), 3);
        assert_eq!(policy.capacity_for(768), 5);
        assert_eq!(policy.capacity_for(1920), 5);
    }

    #[test]
    fn test_override_wins() {
        let policy = CapacityPolicy::default();
        assert_eq!(policy.resolve(Some(7), 100), 7);
        assert_eq!(policy.resolve(None, 100), 3);
        assert_eq!(policy.resolve(None, 1000), 5);
    }

    #[test]
    fn test_zero_capacities_clamp_to_one() {
        let policy = CapacityPolicy {
            breakpoint: 768,
            narrow: 0,
            wide: 0,
        };
        assert_eq!(policy.capacity_for(10), 1);
        assert_eq!(policy.capacity_for(1000), 1);
        assert_eq!(policy.resolve(Some(0), 1000), 1);
    }

    #[test]
    fn test_width_fallback() {
        // 80 columns of 8px cells sit below the default breakpoint
        assert_eq!(width_from(80, 0), 640);
        assert_eq!(width_from(120, 0), 960);
        assert_eq!(width_from(80, 1200), 1200);
    }
}
