mod list;
mod model;
mod ownership;
mod row;
mod transfer;

pub use list::{ReorderList, ReorderListState, RowState, reorder_list};
pub use model::{ChangeKind, DragSession, ListChange, ListId, ListenerId, RowList, RowMatch};
pub use ownership::{find_owning_list, find_owning_list_mut};
pub use row::{DropEdge, Row, RowId};
pub use transfer::{DropTarget, ReorderDrag, TransferError};
