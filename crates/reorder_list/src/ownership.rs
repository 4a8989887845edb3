//! Lookup of the list that holds a row, for hosts that keep several [`RowList`]s.
//!
//! The gpui view does not need it: a drop reaching a [`crate::ReorderListState`]
//! carries the source list's id in [`crate::ReorderDrag::list`], and
//! [`RowList::accept`] refuses payloads from any other list.

use crate::model::RowList;
use crate::row::RowId;

/// Find the list that currently holds `row`.
///
/// Rows do not remember their list, so a row moved from one list to another is
/// always resolved against where it lives now.
pub fn find_owning_list<'a, T: 'a>(
    row: RowId,
    lists: impl IntoIterator<Item = &'a RowList<T>>,
) -> Option<&'a RowList<T>> {
    lists.into_iter().find(|list| list.contains_row(row))
}

pub fn find_owning_list_mut<'a, T: 'a>(
    row: RowId,
    lists: impl IntoIterator<Item = &'a mut RowList<T>>,
) -> Option<&'a mut RowList<T>> {
    lists.into_iter().find(|list| list.contains_row(row))
}

#[cfg(test)]
mod tests {
    use gpui::px;

    use super::*;

    #[test]
    fn owner_follows_the_row_between_lists() {
        let mut left = RowList::new();
        let mut right = RowList::new();
        let id = left.add("moving");
        right.add("other");

        let owner = find_owning_list(id, [&left, &right]).unwrap();
        assert_eq!(owner.id(), left.id());

        let row = left.remove_row(id).unwrap();
        right.add(row);
        let owner = find_owning_list(id, [&left, &right]).unwrap();
        assert_eq!(owner.id(), right.id());

        let owner = find_owning_list_mut(id, [&mut left, &mut right]).unwrap();
        assert!(owner.start_drag(id, px(2.)));
        assert_eq!(right.dragged_index(), Some(1));
    }

    #[test]
    fn unknown_row_has_no_owner() {
        let mut list = RowList::new();
        let id = list.add(1);
        list.remove_row(id);
        assert!(find_owning_list(id, [&list]).is_none());
    }
}
