use gpui::{Pixels, SharedString};

use crate::model::{ListChange, ListId, RowList};
use crate::row::RowId;

/// Drag payload created when a row's handle is pressed.
#[derive(Clone, Debug)]
pub struct ReorderDrag {
    pub list: ListId,
    pub row: RowId,
    pub label: SharedString,
}

/// Where a drop landed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DropTarget {
    /// Over `row`, `y_in_row` below its top edge.
    Row { row: RowId, y_in_row: Pixels },
    /// Over the list, outside any row; the last insertion line is used.
    Indicator,
}

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("drag from list {found:?} cannot be dropped on list {expected:?}")]
    ForeignList { expected: ListId, found: ListId },
    #[error("row {row:?} is not in list {list:?}")]
    UnknownRow { list: ListId, row: RowId },
    #[error("list {0:?} has no drag session for this drop")]
    NoSession(ListId),
    #[error("drag session of list {list:?} is for index {session_ix}, payload row is at {row_ix}")]
    SessionMismatch {
        list: ListId,
        session_ix: usize,
        row_ix: usize,
    },
}

impl<T> RowList<T> {
    /// Payload for dragging the row at `ix`, labelled from its content.
    pub fn drag_payload(
        &self,
        ix: usize,
        label: impl Fn(&T) -> SharedString,
    ) -> Option<ReorderDrag> {
        let row = self.row(ix)?;
        Some(ReorderDrag {
            list: self.id(),
            row: row.id(),
            label: label(row.content()),
        })
    }

    /// Check that `drag` came from one of this list's rows and matches the running
    /// session. Returns the dragged row's current index.
    pub fn accept(&self, drag: &ReorderDrag) -> Result<usize, TransferError> {
        if drag.list != self.id() {
            return Err(TransferError::ForeignList {
                expected: self.id(),
                found: drag.list,
            });
        }
        let row_ix = self.index_of(drag.row).ok_or(TransferError::UnknownRow {
            list: self.id(),
            row: drag.row,
        })?;
        let session_ix = self
            .dragged_index()
            .ok_or(TransferError::NoSession(self.id()))?;
        if session_ix != row_ix {
            return Err(TransferError::SessionMismatch {
                list: self.id(),
                session_ix,
                row_ix,
            });
        }
        Ok(row_ix)
    }

    pub fn can_import(&self, drag: &ReorderDrag) -> bool {
        self.accept(drag).is_ok()
    }

    /// Apply a drop of `drag` on this list.
    ///
    /// Payloads this list cannot accept are rejected with `false`; the insertion
    /// line is cleared and the order is left alone. An accepted drop returns `true`
    /// even if the row ends up where it started.
    pub fn import_drop(&mut self, drag: &ReorderDrag, target: DropTarget) -> bool {
        self.try_import_drop(drag, target).is_some()
    }

    /// Like [`Self::import_drop`], but also hands back the committed change.
    pub fn try_import_drop(
        &mut self,
        drag: &ReorderDrag,
        target: DropTarget,
    ) -> Option<Option<ListChange>> {
        if let Err(err) = self.accept(drag) {
            tracing::warn!(list = ?self.id(), "rejected drop: {err}");
            self.drag_exit();
            return None;
        }

        let change = match target {
            DropTarget::Row { row, y_in_row } => self.drop_on_row(row, y_in_row),
            DropTarget::Indicator => self.drop_at_indicator(),
        };
        Some(change)
    }
}
