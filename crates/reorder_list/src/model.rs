use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use gpui::{Bounds, Pixels, point, px, size};

use crate::row::{DEFAULT_ROW_HEIGHT, Row, RowId, sanitize_height};

pub(crate) const DEFAULT_HANDLE_WIDTH: Pixels = px(32.);
pub(crate) const DEFAULT_INDICATOR_THICKNESS: Pixels = px(4.);

static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a [`RowList`]; carried by drag payloads and change notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListId(u64);

impl ListId {
    fn next() -> Self {
        Self(NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    Reorder,
}

/// Notification delivered to change listeners after the order of a list changed.
///
/// Listeners receive it together with the list's rows in their new order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListChange {
    pub list: ListId,
    pub kind: ChangeKind,
    pub from: usize,
    pub to: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Drag state of a [`RowList`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragSession {
    #[default]
    Idle,
    Dragging {
        dragged_ix: usize,
        indicator_y: Option<Pixels>,
    },
}

/// Selects a row for [`RowList::remove`], either by row identity or by content.
#[derive(Debug)]
pub enum RowMatch<'a, T> {
    Row(RowId),
    Content(&'a T),
}

type ChangeListener<T> = Rc<dyn Fn(&ListChange, &[Row<T>])>;

/// An ordered, vertically stacked list of [`Row`]s that can be reordered by dragging.
///
/// This is the toolkit-independent half of the reorderable list: it lays rows out
/// top to bottom, turns pointer positions into insertion indices and applies the
/// move on drop. [`crate::ReorderListState`] drives it from gpui drag callbacks.
///
/// Methods reached from pointer events return whether anything visible changed so
/// that callers can skip redraws. All access happens on the UI thread; the list is
/// neither `Send` nor `Sync`.
pub struct RowList<T> {
    id: ListId,
    rows: Vec<Row<T>>,
    width: Pixels,
    row_height: Pixels,
    handle_width: Pixels,
    indicator_thickness: Pixels,
    selection_visible: bool,
    session: DragSession,
    listeners: Vec<(ListenerId, ChangeListener<T>)>,
    next_listener_id: u64,
}

impl<T> Default for RowList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RowList<T> {
    pub fn new() -> Self {
        Self {
            id: ListId::next(),
            rows: Vec::new(),
            width: px(0.),
            row_height: DEFAULT_ROW_HEIGHT,
            handle_width: DEFAULT_HANDLE_WIDTH,
            indicator_thickness: DEFAULT_INDICATOR_THICKNESS,
            selection_visible: false,
            session: DragSession::Idle,
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    /// Height used for rows that were added without an explicit [`Row::height`].
    pub fn row_height(mut self, height: Pixels) -> Self {
        self.row_height = sanitize_height(height);
        self.layout();
        self
    }

    /// Width of the drag handle strip on the left of every row.
    pub fn drag_handle_width(mut self, width: Pixels) -> Self {
        self.handle_width = width.max(px(0.));
        self
    }

    /// Thickness of the insertion line shown while dragging.
    pub fn indicator_thickness(mut self, thickness: Pixels) -> Self {
        self.indicator_thickness = thickness.max(px(1.));
        self
    }

    pub fn id(&self) -> ListId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row<T>] {
        &self.rows
    }

    pub fn row(&self, ix: usize) -> Option<&Row<T>> {
        self.rows.get(ix)
    }

    /// Content wrapped by the row at `ix`.
    pub fn content(&self, ix: usize) -> Option<&T> {
        self.rows.get(ix).map(Row::content)
    }

    pub fn contents(&self) -> impl Iterator<Item = &T> {
        self.rows.iter().map(Row::content)
    }

    pub fn index_of(&self, row: RowId) -> Option<usize> {
        self.rows.iter().position(|r| r.id() == row)
    }

    pub fn contains_row(&self, row: RowId) -> bool {
        self.index_of(row).is_some()
    }

    pub fn width(&self) -> Pixels {
        self.width
    }

    pub fn handle_width(&self) -> Pixels {
        self.handle_width
    }

    /// Whether a press at `x_in_row` lands on the drag handle strip.
    pub fn handle_contains(&self, x_in_row: Pixels) -> bool {
        x_in_row >= px(0.) && x_in_row < self.handle_width
    }

    /// Set the width rows and the insertion line span. Returns `true` if it changed.
    pub fn set_width(&mut self, width: Pixels) -> bool {
        let width = width.max(px(0.));
        if self.width == width {
            return false;
        }
        self.width = width;
        self.layout();
        true
    }

    /// Append `item`, wrapping it in a new [`Row`] unless it already is one.
    pub fn add(&mut self, item: impl Into<Row<T>>) -> RowId {
        self.insert(self.rows.len(), item)
    }

    /// Insert `item` at `ix` (clamped to the current length).
    pub fn insert(&mut self, ix: usize, item: impl Into<Row<T>>) -> RowId {
        let mut row = item.into();
        row.set_selected(row.is_selected() && self.selection_visible);
        let id = row.id();
        let ix = ix.min(self.rows.len());
        self.rows.insert(ix, row);

        if let DragSession::Dragging { dragged_ix, .. } = &mut self.session
            && ix <= *dragged_ix
        {
            *dragged_ix += 1;
        }

        self.layout();
        id
    }

    /// Remove the row with identity `row`. Missing rows are ignored.
    pub fn remove_row(&mut self, row: RowId) -> Option<Row<T>> {
        let ix = self.index_of(row)?;
        Some(self.remove_at(ix))
    }

    /// Remove the first row matching `target`. Returns the row so the caller keeps
    /// the content; a target that matches nothing is ignored.
    ///
    /// The `T: PartialEq` bound serves [`RowMatch::Content`]. Identity removal for
    /// content without `PartialEq` goes through [`RowList::remove_row`].
    pub fn remove(&mut self, target: RowMatch<'_, T>) -> Option<Row<T>>
    where
        T: PartialEq,
    {
        let ix = self.rows.iter().position(|r| match &target {
            RowMatch::Row(id) => r.id() == *id,
            RowMatch::Content(content) => r.content() == *content,
        })?;
        Some(self.remove_at(ix))
    }

    fn remove_at(&mut self, ix: usize) -> Row<T> {
        let row = self.rows.remove(ix);

        if let DragSession::Dragging { dragged_ix, .. } = &mut self.session {
            if *dragged_ix == ix {
                tracing::debug!(list = ?self.id, ix, "dragged row removed, ending drag session");
                self.session = DragSession::Idle;
            } else if *dragged_ix > ix {
                *dragged_ix -= 1;
            }
        }

        self.layout();
        row
    }

    /// Stack rows from `y = 0` downwards.
    fn layout(&mut self) {
        let mut top = px(0.);
        for row in &mut self.rows {
            let height = row.resolved_height(self.row_height);
            row.place(top, self.width, height);
            top = top + height;
        }
    }

    /// Index a row dropped at list-relative `y` would be inserted at.
    ///
    /// Returns the first row whose vertical midpoint lies below `y`, or `len()` when
    /// `y` is at or past the midpoint of the last row.
    pub fn drop_index_at(&self, y: Pixels) -> usize {
        self.rows
            .iter()
            .position(|row| {
                let bounds = row.bounds();
                y < bounds.top() + bounds.size.height / 2.0
            })
            .unwrap_or(self.rows.len())
    }

    pub fn session(&self) -> DragSession {
        self.session
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.session, DragSession::Dragging { .. })
    }

    pub fn dragged_index(&self) -> Option<usize> {
        match self.session {
            DragSession::Dragging { dragged_ix, .. } => Some(dragged_ix),
            DragSession::Idle => None,
        }
    }

    pub fn indicator_y(&self) -> Option<Pixels> {
        match self.session {
            DragSession::Dragging { indicator_y, .. } => indicator_y,
            DragSession::Idle => None,
        }
    }

    /// The insertion line: a bar of the configured thickness centred on the
    /// indicator y and spanning the list width.
    pub fn indicator_bounds(&self) -> Option<Bounds<Pixels>> {
        let y = self.indicator_y()?;
        Some(Bounds::new(
            point(px(0.), y - self.indicator_thickness / 2.0),
            size(self.width, self.indicator_thickness),
        ))
    }

    /// Show the insertion line at `y`, or clear it with `None`.
    ///
    /// Only an active drag session shows a line. Returns `true` if a redraw is needed.
    pub fn set_indicator(&mut self, y: Option<Pixels>) -> bool {
        let DragSession::Dragging { indicator_y, .. } = &mut self.session else {
            return false;
        };
        if *indicator_y == y {
            return false;
        }
        *indicator_y = y;
        true
    }

    /// Begin a drag session for `row` from a press at `x_in_row`.
    ///
    /// Only presses on the handle strip start a session, and only one session runs
    /// at a time.
    pub fn start_drag(&mut self, row: RowId, x_in_row: Pixels) -> bool {
        if self.is_dragging() {
            return false;
        }
        let Some(ix) = self.index_of(row) else {
            return false;
        };
        if !self.handle_contains(x_in_row) {
            return false;
        }

        tracing::debug!(list = ?self.id, ix, "drag session started");
        self.session = DragSession::Dragging {
            dragged_ix: ix,
            indicator_y: None,
        };
        true
    }

    /// Leave the drag session without touching the order.
    pub fn end_drag(&mut self) -> bool {
        if !self.is_dragging() {
            return false;
        }
        tracing::debug!(list = ?self.id, "drag session ended");
        self.session = DragSession::Idle;
        true
    }

    /// The pointer moved to `y_in_row` inside `row`: snap the insertion line to the
    /// nearer edge of that row.
    pub fn drag_over_row(&mut self, row: RowId, y_in_row: Pixels) -> bool {
        let Some(y) = self.snapped_y(row, y_in_row) else {
            return false;
        };
        self.set_indicator(Some(y))
    }

    /// The pointer moved to list-relative `y` somewhere inside the list.
    ///
    /// Over a row the line snaps like [`RowList::drag_over_row`]; in the empty space
    /// below the last row it follows the pointer, so a drop there appends.
    pub fn drag_over_list(&mut self, y: Pixels) -> bool {
        let hit = self
            .rows
            .iter()
            .find(|row| y >= row.bounds().top() && y < row.bounds().bottom());
        let y = match hit {
            Some(row) => row.snap_y(y - row.bounds().top()),
            None => y.max(px(0.)),
        };
        self.set_indicator(Some(y))
    }

    /// The pointer left the list during a drag.
    pub fn drag_exit(&mut self) -> bool {
        self.set_indicator(None)
    }

    /// The drag was released over `row` at `y_in_row`. Commits the move at the
    /// snapped edge and ends the session.
    pub fn drop_on_row(&mut self, row: RowId, y_in_row: Pixels) -> Option<ListChange> {
        let y = self.snapped_y(row, y_in_row);
        self.set_indicator(None);
        let change = y.and_then(|y| self.commit_move(y));
        self.end_drag();
        change
    }

    /// The drag was released over the list but not over a row. Commits at the last
    /// insertion line, if any, and ends the session.
    pub fn drop_at_indicator(&mut self) -> Option<ListChange> {
        let y = self.indicator_y();
        self.set_indicator(None);
        let change = y.and_then(|y| self.commit_move(y));
        self.end_drag();
        change
    }

    fn snapped_y(&self, row: RowId, y_in_row: Pixels) -> Option<Pixels> {
        let ix = self.index_of(row)?;
        Some(self.rows[ix].snap_y(y_in_row))
    }

    /// Move the dragged row to the insertion index for list-relative `y`.
    ///
    /// The raw index counts the dragged row itself, so indices past it are shifted
    /// down by one before reinsertion. Dropping back into the dragged row's own slot
    /// and calls without an active session do nothing.
    pub fn commit_move(&mut self, y: Pixels) -> Option<ListChange> {
        let DragSession::Dragging { dragged_ix, .. } = self.session else {
            return None;
        };

        let mut drop_ix = self.drop_index_at(y);
        if drop_ix > dragged_ix {
            drop_ix -= 1;
        }
        if drop_ix == dragged_ix {
            return None;
        }

        let row = self.rows.remove(dragged_ix);
        self.rows.insert(drop_ix, row);
        self.layout();

        if let DragSession::Dragging { dragged_ix, .. } = &mut self.session {
            *dragged_ix = drop_ix;
        }

        let change = ListChange {
            list: self.id,
            kind: ChangeKind::Reorder,
            from: dragged_ix,
            to: drop_ix,
        };
        tracing::debug!(list = ?self.id, from = change.from, to = change.to, "row moved");
        self.fire(&change);
        Some(change)
    }

    /// Register `listener`; it is called after every committed move with the change
    /// and the rows in their new order.
    pub fn add_change_listener(
        &mut self,
        listener: impl Fn(&ListChange, &[Row<T>]) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Rc::new(listener)));
        id
    }

    pub fn remove_change_listener(&mut self, id: ListenerId) -> bool {
        let len = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != len
    }

    fn fire(&self, change: &ListChange) {
        for (_, listener) in &self.listeners {
            listener(change, &self.rows);
        }
    }

    pub fn is_selection_visible(&self) -> bool {
        self.selection_visible
    }

    /// Show or hide the selection checkbox on every row. Hiding also deselects
    /// every row.
    pub fn set_selection_visible(&mut self, visible: bool) -> bool {
        let mut changed = self.selection_visible != visible;
        self.selection_visible = visible;
        if !visible {
            for row in &mut self.rows {
                changed |= row.is_selected();
                row.set_selected(false);
            }
        }
        changed
    }

    /// Select or deselect the row at `ix`. Rejected while checkboxes are hidden.
    pub fn set_selected(&mut self, ix: usize, selected: bool) -> bool {
        if !self.selection_visible {
            return false;
        }
        let Some(row) = self.rows.get_mut(ix) else {
            return false;
        };
        if row.is_selected() == selected {
            return false;
        }
        row.set_selected(selected);
        true
    }

    pub fn toggle_selected(&mut self, ix: usize) -> bool {
        let Some(selected) = self.rows.get(ix).map(Row::is_selected) else {
            return false;
        };
        self.set_selected(ix, !selected)
    }

    /// Content of every selected row, in display order.
    pub fn selected(&self) -> Vec<&T> {
        self.rows
            .iter()
            .filter(|row| row.is_selected())
            .map(Row::content)
            .collect()
    }
}
