//! Viewport width buckets used to pick between layout variants.

use serde::Serialize;

pub const TABLET_MIN_WIDTH: usize = 768;
pub const DESKTOP_MIN_WIDTH: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
}

impl Breakpoint {
    /// Number of cards one page of a content grid holds in this layout.
    pub const fn page_size(self) -> usize {
        match self {
            Breakpoint::Mobile => 4,
            Breakpoint::Tablet => 6,
            Breakpoint::Desktop => 9,
        }
    }
}

/// Maps a viewport width in CSS pixels to its breakpoint.
pub fn width_to_breakpoint(px: usize) -> Breakpoint {
    if px < TABLET_MIN_WIDTH {
        Breakpoint::Mobile
    } else if px < DESKTOP_MIN_WIDTH {
        Breakpoint::Tablet
    } else {
        Breakpoint::Desktop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_map_to_buckets() {
        assert_eq!(width_to_breakpoint(0), Breakpoint::Mobile);
        assert_eq!(width_to_breakpoint(767), Breakpoint::Mobile);
        assert_eq!(width_to_breakpoint(768), Breakpoint::Tablet);
        assert_eq!(width_to_breakpoint(1023), Breakpoint::Tablet);
        assert_eq!(width_to_breakpoint(1024), Breakpoint::Desktop);
        assert_eq!(width_to_breakpoint(3840), Breakpoint::Desktop);
    }

    #[test]
    fn wider_layouts_hold_more_cards() {
        assert!(Breakpoint::Mobile.page_size() < Breakpoint::Tablet.page_size());
        assert!(Breakpoint::Tablet.page_size() < Breakpoint::Desktop.page_size());
    }
}
