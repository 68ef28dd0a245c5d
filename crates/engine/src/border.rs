use serde::{Deserialize, Serialize};

/// Which edges of a cell are drawn. The color is a session-wide setting, not
/// part of the spec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BorderSpec {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl BorderSpec {
    /// No edges drawn. Equivalent to an absent store entry.
    pub const NONE: BorderSpec = BorderSpec::new(false, false, false, false);

    /// All four edges drawn.
    pub const ALL: BorderSpec = BorderSpec::new(true, true, true, true);

    /// Edges in CSS order: top, right, bottom, left.
    pub const fn new(top: bool, right: bool, bottom: bool, left: bool) -> Self {
        Self { top, right, bottom, left }
    }

    pub fn is_empty(&self) -> bool {
        !(self.top || self.right || self.bottom || self.left)
    }

    /// Edge flags in CSS order, as persisted.
    pub fn edges(&self) -> [bool; 4] {
        [self.top, self.right, self.bottom, self.left]
    }
}
