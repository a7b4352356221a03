//! Input focus cycling between console regions.

/// Focusable regions of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Table,
    Form,
}

/// Ordered focus ring. Only the region holding focus receives keystrokes;
/// the navigation keys themselves are intercepted before dispatch.
#[derive(Debug)]
pub struct FocusController {
    regions: Vec<Region>,
    index: usize,
}

impl FocusController {
    /// Creates a controller with focus on the first region.
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions, index: 0 }
    }

    /// The region currently holding input focus.
    pub fn current(&self) -> Region {
        self.regions[self.index]
    }

    /// Advances focus forward with wraparound.
    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.regions.len();
    }

    /// Moves focus backward with wraparound.
    pub fn prev(&mut self) {
        self.index = (self.index + self.regions.len() - 1) % self.regions.len();
    }
}

impl Default for FocusController {
    fn default() -> Self {
        Self::new(vec![Region::Form, Region::Table])
    }
}
