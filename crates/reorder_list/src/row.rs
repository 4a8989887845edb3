use std::sync::atomic::{AtomicU64, Ordering};

use gpui::{Bounds, Pixels, point, px, size};

pub(crate) const DEFAULT_ROW_HEIGHT: Pixels = px(28.);

static NEXT_ROW_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a [`Row`], independent of the content it wraps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

impl RowId {
    fn next() -> Self {
        Self(NEXT_ROW_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Which side of a row an insertion line snaps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropEdge {
    Before,
    After,
}

/// A single entry of a [`crate::RowList`]: one content value plus the row chrome
/// (drag handle strip, selection flag) around it.
///
/// Rows hold no reference to the list they live in. The owner is looked up when
/// an event arrives, see [`crate::find_owning_list`].
#[derive(Debug)]
pub struct Row<T> {
    id: RowId,
    content: T,
    selected: bool,
    height: Option<Pixels>,
    bounds: Bounds<Pixels>,
}

impl<T> Row<T> {
    pub fn new(content: T) -> Self {
        Self {
            id: RowId::next(),
            content,
            selected: false,
            height: None,
            bounds: Bounds::default(),
        }
    }

    /// Give this row a fixed height instead of the list's default row height.
    pub fn height(mut self, height: Pixels) -> Self {
        self.height = Some(sanitize_height(height));
        self
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn content(&self) -> &T {
        &self.content
    }

    pub fn into_content(self) -> T {
        self.content
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Bounds assigned by the owning list's layout, relative to the list's top-left.
    pub fn bounds(&self) -> Bounds<Pixels> {
        self.bounds
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn resolved_height(&self, default: Pixels) -> Pixels {
        self.height.unwrap_or(default)
    }

    pub(crate) fn place(&mut self, top: Pixels, width: Pixels, height: Pixels) {
        self.bounds = Bounds::new(point(px(0.), top), size(width, height));
    }

    /// Snap a pointer offset inside this row to one of its edges.
    ///
    /// The upper half (strictly below the midpoint) snaps to [`DropEdge::Before`];
    /// the midpoint itself and everything under it snap to [`DropEdge::After`].
    pub fn snap_edge(&self, y_in_row: Pixels) -> DropEdge {
        if y_in_row < self.bounds.size.height / 2.0 {
            DropEdge::Before
        } else {
            DropEdge::After
        }
    }

    /// List-relative y of the edge that `y_in_row` snaps to.
    pub fn snap_y(&self, y_in_row: Pixels) -> Pixels {
        match self.snap_edge(y_in_row) {
            DropEdge::Before => self.bounds.top(),
            DropEdge::After => self.bounds.bottom(),
        }
    }
}

impl<T> From<T> for Row<T> {
    fn from(content: T) -> Self {
        Self::new(content)
    }
}

pub(crate) fn sanitize_height(height: Pixels) -> Pixels {
    let h: f32 = height.into();
    if !h.is_finite() || h <= 0.0 {
        px(1.)
    } else {
        height
    }
}
