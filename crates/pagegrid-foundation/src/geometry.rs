//! Item frame geometry for paged grids.
//!
//! Every item lives at a fixed rectangle in an unbounded strip of pages laid
//! out along the scroll axis. Frames are computed on first use and cached by
//! index until any layout parameter changes, at which point the whole cache
//! is dropped.

use crate::collections::map::HashMap;

/// Scroll axis of a paged grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn is_horizontal(self) -> bool {
        self == Orientation::Horizontal
    }

    pub fn is_vertical(self) -> bool {
        self == Orientation::Vertical
    }

    /// Splits a primary-axis value into an `(x, y)` pair.
    pub fn to_xy(self, primary: i32) -> (i32, i32) {
        match self {
            Orientation::Horizontal => (primary, 0),
            Orientation::Vertical => (0, primary),
        }
    }

    /// Picks the primary-axis component of an `(x, y)` pair.
    pub fn primary(self, x: i32, y: i32) -> i32 {
        match self {
            Orientation::Horizontal => x,
            Orientation::Vertical => y,
        }
    }
}

/// Integer rectangle with exclusive right/bottom edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl IntRect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Whether the two rectangles share any interior area.
    pub fn intersects(&self, other: &IntRect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Shrinks `self` to its overlap with `other`.
    ///
    /// Leaves `self` untouched and returns `false` when they do not overlap.
    pub fn intersect(&mut self, other: &IntRect) -> bool {
        if !self.intersects(other) {
            return false;
        }
        self.left = self.left.max(other.left);
        self.top = self.top.max(other.top);
        self.right = self.right.min(other.right);
        self.bottom = self.bottom.min(other.bottom);
        true
    }

    pub fn translate(&self, dx: i32, dy: i32) -> IntRect {
        IntRect::new(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Padding {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Padding {
    pub const fn all(value: i32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

/// Host viewport size and padding, as measured by the host view system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
    pub padding: Padding,
}

impl Viewport {
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            padding: Padding::all(0),
        }
    }

    pub const fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Width minus horizontal padding.
    pub fn usable_width(&self) -> i32 {
        (self.width - self.padding.left - self.padding.right).max(0)
    }

    /// Height minus vertical padding.
    pub fn usable_height(&self) -> i32 {
        (self.height - self.padding.top - self.padding.bottom).max(0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ItemSize {
    pub width: i32,
    pub height: i32,
}

impl ItemSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Position of one item in content coordinates (before scroll offset and
/// padding are applied).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ItemFrame {
    pub index: usize,
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ItemFrame {
    pub fn rect(&self) -> IntRect {
        IntRect::new(self.left, self.top, self.right, self.bottom)
    }
}

/// Grid layout parameters plus the lazily filled frame cache.
#[derive(Debug)]
pub struct GridGeometry {
    rows: usize,
    columns: usize,
    orientation: Orientation,
    usable_width: i32,
    usable_height: i32,
    explicit_item_size: Option<ItemSize>,
    /// Fixed on the first layout pass; cleared together with the frame cache.
    item_size: Option<ItemSize>,
    frames: HashMap<usize, ItemFrame>,
}

impl GridGeometry {
    /// Creates geometry for a `rows x columns` page. Callers validate that both
    /// are positive.
    pub fn new(
        rows: usize,
        columns: usize,
        orientation: Orientation,
        explicit_item_size: Option<ItemSize>,
    ) -> Self {
        Self {
            rows,
            columns,
            orientation,
            usable_width: 0,
            usable_height: 0,
            explicit_item_size,
            item_size: explicit_item_size,
            frames: HashMap::default(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn page_capacity(&self) -> usize {
        self.rows * self.columns
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn usable_width(&self) -> i32 {
        self.usable_width
    }

    pub fn usable_height(&self) -> i32 {
        self.usable_height
    }

    /// Usable extent along the scroll axis, i.e. one page stride.
    pub fn usable_extent(&self) -> i32 {
        match self.orientation {
            Orientation::Horizontal => self.usable_width,
            Orientation::Vertical => self.usable_height,
        }
    }

    /// Current item size, deriving it from the usable area if needed.
    pub fn item_size(&mut self) -> ItemSize {
        self.ensure_item_size()
    }

    pub fn cached_frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Applies a new viewport. Returns `true` when the usable area changed,
    /// in which case the cache was dropped.
    pub fn update_viewport(&mut self, viewport: &Viewport) -> bool {
        let width = viewport.usable_width();
        let height = viewport.usable_height();
        if width == self.usable_width && height == self.usable_height {
            return false;
        }
        self.usable_width = width;
        self.usable_height = height;
        self.invalidate();
        true
    }

    /// Switches the scroll axis and drops the cache.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.orientation == orientation {
            return;
        }
        self.orientation = orientation;
        self.invalidate();
    }

    /// Drops every cached frame and the derived item size.
    pub fn invalidate(&mut self) {
        self.frames.clear();
        self.item_size = self.explicit_item_size;
    }

    /// Fixes the item size for the current cache generation.
    pub fn ensure_item_size(&mut self) -> ItemSize {
        if let Some(size) = self.item_size {
            return size;
        }
        let size = ItemSize::new(
            self.usable_width / self.columns as i32,
            self.usable_height / self.rows as i32,
        );
        // A zero-sized viewport has nothing to fix yet.
        if self.usable_width > 0 && self.usable_height > 0 {
            self.item_size = Some(size);
        }
        size
    }

    /// Top-left corner of `page` in content coordinates.
    pub fn page_origin(&self, page: usize) -> (i32, i32) {
        let origin = (page as i32).saturating_mul(self.usable_extent());
        self.orientation.to_xy(origin)
    }

    /// Frame of the item at `index`, computed once per cache generation.
    pub fn frame_for(&mut self, index: usize) -> ItemFrame {
        if let Some(frame) = self.frames.get(&index) {
            return *frame;
        }
        let item = self.ensure_item_size();
        let capacity = self.page_capacity();
        let page = index / capacity;
        let page_pos = index % capacity;
        let row = page_pos / self.columns;
        let col = page_pos - row * self.columns;

        let (origin_x, origin_y) = self.page_origin(page);
        let left = origin_x + col as i32 * item.width;
        let top = origin_y + row as i32 * item.height;
        let frame = ItemFrame {
            index,
            left,
            top,
            right: left + item.width,
            bottom: top + item.height,
        };
        self.frames.insert(index, frame);
        frame
    }
}
