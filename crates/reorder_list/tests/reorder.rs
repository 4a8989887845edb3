use std::cell::RefCell;
use std::rc::Rc;

use gpui::px;
use gpui_reorder_list::{
    ChangeKind, DragSession, DropTarget, ListChange, ReorderDrag, Row, RowList,
};

fn list_with(labels: &[&'static str], height: f32) -> RowList<&'static str> {
    let mut list = RowList::new().row_height(px(height));
    list.set_width(px(240.));
    for label in labels {
        list.add(*label);
    }
    list
}

fn order(list: &RowList<&'static str>) -> Vec<&'static str> {
    list.contents().copied().collect()
}

fn press_handle(list: &mut RowList<&'static str>, ix: usize) {
    let row = list.row(ix).unwrap().id();
    assert!(list.start_drag(row, px(8.)));
}

fn recorder(list: &mut RowList<&'static str>) -> Rc<RefCell<Vec<ListChange>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    list.add_change_listener({
        let log = log.clone();
        move |change, _rows| log.borrow_mut().push(*change)
    });
    log
}

#[test]
fn drop_index_is_monotonic_and_ends_at_len() {
    let mut list: RowList<&str> = RowList::new();
    for (label, height) in [("a", 12.), ("b", 40.), ("c", 7.), ("d", 30.)] {
        list.add(Row::new(label).height(px(height)));
    }
    let bottom: f32 = list.row(3).unwrap().bounds().bottom().into();

    let mut last = 0;
    let mut y = 0.0;
    while y <= bottom + 20.0 {
        let ix = list.drop_index_at(px(y));
        assert!(ix >= last, "index went back from {last} to {ix} at y={y}");
        last = ix;
        y += 0.5;
    }
    assert_eq!(list.drop_index_at(px(bottom)), 4);
    assert_eq!(list.drop_index_at(px(bottom + 100.)), 4);
}

#[test]
fn snap_boundary_belongs_to_the_lower_half() {
    let mut list = list_with(&["A", "B", "C"], 30.);
    press_handle(&mut list, 0);
    let b = list.row(1).unwrap().id();

    // B spans 30..60, midpoint 45
    list.drag_over_row(b, px(14.));
    assert_eq!(list.indicator_y(), Some(px(30.)));
    list.drag_over_row(b, px(15.));
    assert_eq!(list.indicator_y(), Some(px(60.)));
}

#[test]
fn self_move_changes_nothing_and_stays_silent() {
    let mut list = list_with(&["A", "B", "C"], 30.);
    let log = recorder(&mut list);
    press_handle(&mut list, 1);

    assert_eq!(list.commit_move(px(40.)), None);
    assert_eq!(list.commit_move(px(50.)), None);
    assert_eq!(order(&list), vec!["A", "B", "C"]);
    assert!(log.borrow().is_empty());
}

#[test]
fn raw_index_past_the_dragged_row_is_shifted() {
    let mut list = list_with(&["A", "B", "C"], 30.);
    press_handle(&mut list, 0);

    assert_eq!(list.drop_index_at(px(50.)), 2);
    let change = list.commit_move(px(50.)).unwrap();
    assert_eq!((change.from, change.to), (0, 1));
    assert_eq!(order(&list), vec!["B", "A", "C"]);
}

#[test]
fn drag_first_row_to_the_bottom() {
    let mut list = list_with(&["X", "Y", "Z"], 30.);
    let log = recorder(&mut list);
    press_handle(&mut list, 0);

    let change = list.commit_move(px(85.)).unwrap();

    assert_eq!(order(&list), vec!["Y", "Z", "X"]);
    assert_eq!(
        change,
        ListChange {
            list: list.id(),
            kind: ChangeKind::Reorder,
            from: 0,
            to: 2,
        }
    );
    assert_eq!(*log.borrow(), vec![change]);
}

#[test]
fn full_gesture_over_rows_then_drop() {
    let mut list = list_with(&["X", "Y", "Z"], 30.);
    let log = recorder(&mut list);
    let x = list.row(0).unwrap().id();
    let y = list.row(1).unwrap().id();
    let z = list.row(2).unwrap().id();

    assert!(list.start_drag(x, px(8.)));
    list.drag_over_row(x, px(20.));
    list.drag_over_row(y, px(5.));
    list.drag_over_row(z, px(25.));
    assert_eq!(list.indicator_y(), Some(px(90.)));

    let change = list.drop_on_row(z, px(25.)).unwrap();
    assert_eq!((change.from, change.to), (0, 2));
    assert_eq!(order(&list), vec!["Y", "Z", "X"]);
    assert_eq!(list.session(), DragSession::Idle);
    assert_eq!(list.indicator_y(), None);
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn listener_reads_the_new_order_from_the_rows() {
    let mut list = list_with(&["X", "Y", "Z"], 30.);
    let seen = Rc::new(RefCell::new(Vec::new()));
    list.add_change_listener({
        let seen = seen.clone();
        move |change, rows| {
            let order: Vec<&'static str> = rows.iter().map(|row| *row.content()).collect();
            seen.borrow_mut().push((change.to, order));
        }
    });
    let x = list.row(0).unwrap().id();
    let z = list.row(2).unwrap().id();

    assert!(list.start_drag(x, px(8.)));
    list.drag_over_row(z, px(25.));
    list.drop_on_row(z, px(25.)).unwrap();

    assert_eq!(*seen.borrow(), vec![(2, vec!["Y", "Z", "X"])]);
}

#[test]
fn drop_in_the_empty_space_below_the_rows_appends() {
    let mut list = list_with(&["A", "B", "C"], 30.);
    let log = recorder(&mut list);
    press_handle(&mut list, 1);
    let drag = list.drag_payload(1, |label| (*label).into()).unwrap();
    assert_eq!(drag.label.as_str(), "B");

    let c = list.row(2).unwrap().id();
    list.drag_over_row(c, px(5.));
    assert_eq!(list.indicator_y(), Some(px(60.)));
    list.drag_over_list(px(130.));
    assert_eq!(list.indicator_y(), Some(px(130.)));

    assert!(list.import_drop(&drag, DropTarget::Indicator));
    assert_eq!(order(&list), vec!["A", "C", "B"]);
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn second_row_dragged_to_the_top() {
    let mut list = list_with(&["A", "B", "C"], 30.);
    let a = list.row(0).unwrap().id();
    press_handle(&mut list, 1);

    let change = list.drop_on_row(a, px(2.)).unwrap();
    assert_eq!((change.from, change.to), (1, 0));
    assert_eq!(order(&list), vec!["B", "A", "C"]);
}

#[test]
fn hidden_selection_reports_nothing_selected() {
    let mut list = list_with(&["A", "B", "C"], 30.);
    list.set_selection_visible(true);
    list.set_selected(0, true);
    list.set_selected(1, true);
    assert_eq!(list.selected(), vec![&"A", &"B"]);

    list.set_selection_visible(false);
    assert!(list.selected().is_empty());

    list.set_selection_visible(true);
    assert!(list.selected().is_empty());
}

#[test]
fn selection_follows_rows_when_they_move() {
    let mut list = list_with(&["A", "B", "C"], 30.);
    list.set_selection_visible(true);
    list.set_selected(0, true);
    press_handle(&mut list, 0);
    list.commit_move(px(89.));

    assert_eq!(order(&list), vec!["B", "C", "A"]);
    assert_eq!(list.selected(), vec![&"A"]);
    assert!(list.row(2).unwrap().is_selected());
}

#[test]
fn every_listener_sees_one_identical_change() {
    let mut list = list_with(&["A", "B", "C"], 30.);
    let logs = [recorder(&mut list), recorder(&mut list), recorder(&mut list)];
    let order_log = Rc::new(RefCell::new(Vec::new()));
    for tag in 0..3 {
        let order_log = order_log.clone();
        list.add_change_listener(move |_, _| order_log.borrow_mut().push(tag));
    }

    press_handle(&mut list, 2);
    let change = list.commit_move(px(0.)).unwrap();

    for log in &logs {
        assert_eq!(*log.borrow(), vec![change]);
    }
    assert_eq!(*order_log.borrow(), vec![0, 1, 2]);
}

#[test]
fn repeated_drag_over_is_idempotent() {
    let mut list = list_with(&["A", "B", "C"], 30.);
    let log = recorder(&mut list);
    press_handle(&mut list, 0);
    let c = list.row(2).unwrap().id();

    assert!(list.drag_over_row(c, px(3.)));
    for _ in 0..100 {
        assert!(!list.drag_over_row(c, px(3.)));
        assert_eq!(list.indicator_y(), Some(px(60.)));
    }
    assert_eq!(order(&list), vec!["A", "B", "C"]);
    assert_eq!(list.dragged_index(), Some(0));
    assert!(log.borrow().is_empty());
}

#[test]
fn abandoned_drag_leaves_the_order_alone() {
    let mut list = list_with(&["A", "B", "C"], 30.);
    let log = recorder(&mut list);
    press_handle(&mut list, 0);
    let c = list.row(2).unwrap().id();

    list.drag_over_row(c, px(29.));
    assert!(list.drag_exit());
    assert!(list.end_drag());

    assert_eq!(order(&list), vec!["A", "B", "C"]);
    assert_eq!(list.indicator_bounds(), None);
    assert!(log.borrow().is_empty());
}

#[test]
fn drop_from_another_list_is_refused() {
    let mut list = list_with(&["A", "B", "C"], 30.);
    let other = list_with(&["A", "B", "C"], 30.);
    let log = recorder(&mut list);
    press_handle(&mut list, 0);

    let foreign = ReorderDrag {
        list: other.id(),
        row: other.row(0).unwrap().id(),
        label: "A".into(),
    };
    let target = DropTarget::Row {
        row: list.row(2).unwrap().id(),
        y_in_row: px(29.),
    };

    assert!(!list.can_import(&foreign));
    assert!(!list.import_drop(&foreign, target));
    assert_eq!(order(&list), vec!["A", "B", "C"]);
    assert!(log.borrow().is_empty());
}

#[test]
fn drop_without_press_is_ignored() {
    let mut list = list_with(&["A", "B", "C"], 30.);
    let c = list.row(2).unwrap().id();

    assert_eq!(list.drop_on_row(c, px(29.)), None);
    assert_eq!(list.drop_at_indicator(), None);
    assert_eq!(order(&list), vec!["A", "B", "C"]);
}
