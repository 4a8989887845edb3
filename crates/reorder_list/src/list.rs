use std::rc::Rc;

use gpui::{
    AnyElement, App, AppContext as _, Context, CursorStyle, DragMoveEvent, ElementId, Entity,
    InteractiveElement as _, IntoElement, ParentElement as _, Pixels, Render, RenderOnce,
    ScrollHandle, SharedString, StatefulInteractiveElement as _, StyleRefinement, Styled, Window,
    div, prelude::FluentBuilder as _, px,
};
use gpui_component::checkbox::Checkbox;
use gpui_component::{ActiveTheme as _, StyledExt as _, h_flex, v_flex};

use crate::model::{ListChange, ListenerId, RowList, RowMatch};
use crate::row::{Row, RowId};
use crate::transfer::{DropTarget, ReorderDrag};

const HANDLE_GLYPH: &str = "☰";

type RenderContent<T> = Rc<dyn Fn(usize, &Row<T>, RowState, &mut Window, &mut App) -> AnyElement>;
type DragLabel<T> = Rc<dyn Fn(&T) -> SharedString>;

/// Create a [`ReorderList`].
pub fn reorder_list<T, R>(state: &Entity<ReorderListState<T>>, render_content: R) -> ReorderList<T>
where
    T: 'static,
    R: Fn(usize, &Row<T>, RowState, &mut Window, &mut App) -> AnyElement + 'static,
{
    ReorderList::new(state, render_content)
}

struct DragGhost {
    label: SharedString,
}

impl DragGhost {
    fn new(label: SharedString) -> Self {
        Self { label }
    }
}

impl Render for DragGhost {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        h_flex()
            .gap_x_2()
            .px(px(10.))
            .py(px(6.))
            .rounded(px(8.))
            .bg(theme.popover)
            .border_1()
            .border_color(theme.border)
            .shadow_md()
            .text_color(theme.popover_foreground)
            .text_sm()
            .child(HANDLE_GLYPH)
            .child(self.label.clone())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RowState {
    pub selected: bool,
    pub dragging: bool,
    pub selection_visible: bool,
}

/// State for a list of rows that are reordered by dragging their handle.
///
/// Wraps a [`RowList`] and feeds it the drag events gpui delivers to rows and to
/// the list itself.
pub struct ReorderListState<T> {
    rows: RowList<T>,
    hover: Option<(RowId, Pixels)>,
    scroll_handle: ScrollHandle,
    render_content: RenderContent<T>,
    drag_label: DragLabel<T>,
}

impl<T: 'static> Default for ReorderListState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> ReorderListState<T> {
    pub fn new() -> Self {
        Self {
            rows: RowList::new(),
            hover: None,
            scroll_handle: ScrollHandle::new(),
            render_content: Rc::new(|_, _, _, _, _| div().into_any_element()),
            drag_label: Rc::new(|_| SharedString::default()),
        }
    }

    pub fn items<I>(mut self, items: impl IntoIterator<Item = I>) -> Self
    where
        I: Into<Row<T>>,
    {
        for item in items {
            self.rows.add(item);
        }
        self
    }

    /// Width of the handle strip that starts a drag.
    pub fn drag_handle_width(mut self, width: Pixels) -> Self {
        self.rows = self.rows.drag_handle_width(width);
        self
    }

    /// Height of rows that do not set their own.
    pub fn row_height(mut self, height: Pixels) -> Self {
        self.rows = self.rows.row_height(height);
        self
    }

    pub fn indicator_thickness(mut self, thickness: Pixels) -> Self {
        self.rows = self.rows.indicator_thickness(thickness);
        self
    }

    /// Text shown next to the handle glyph on the drag ghost. Without it the ghost
    /// shows only the glyph.
    pub fn drag_label(mut self, label: impl Fn(&T) -> SharedString + 'static) -> Self {
        self.drag_label = Rc::new(label);
        self
    }

    /// Start with the selection checkboxes shown.
    pub fn selection_visible(mut self, visible: bool) -> Self {
        self.rows.set_selection_visible(visible);
        self
    }

    pub fn list(&self) -> &RowList<T> {
        &self.rows
    }

    pub fn add(&mut self, item: impl Into<Row<T>>, cx: &mut Context<Self>) -> RowId {
        let id = self.rows.add(item);
        cx.notify();
        id
    }

    pub fn insert(&mut self, ix: usize, item: impl Into<Row<T>>, cx: &mut Context<Self>) -> RowId {
        let id = self.rows.insert(ix, item);
        cx.notify();
        id
    }

    pub fn remove(&mut self, target: RowMatch<'_, T>, cx: &mut Context<Self>) -> Option<Row<T>>
    where
        T: PartialEq,
    {
        let row = self.rows.remove(target)?;
        cx.notify();
        Some(row)
    }

    pub fn selected(&self) -> Vec<&T> {
        self.rows.selected()
    }

    pub fn set_selection_visible(&mut self, visible: bool, cx: &mut Context<Self>) {
        if self.rows.set_selection_visible(visible) {
            cx.notify();
        }
    }

    pub fn set_selected(&mut self, ix: usize, selected: bool, cx: &mut Context<Self>) {
        if self.rows.set_selected(ix, selected) {
            cx.notify();
        }
    }

    pub fn add_change_listener(
        &mut self,
        listener: impl Fn(&ListChange, &[Row<T>]) + 'static,
    ) -> ListenerId {
        self.rows.add_change_listener(listener)
    }

    pub fn remove_change_listener(&mut self, id: ListenerId) -> bool {
        self.rows.remove_change_listener(id)
    }

    fn on_drag_start(
        &mut self,
        drag: &ReorderDrag,
        x_in_row: Pixels,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.hover = None;
        if self.rows.start_drag(drag.row, x_in_row) {
            cx.notify();
        }
    }

    fn on_drag_move_over_row(
        &mut self,
        row: RowId,
        event: &DragMoveEvent<ReorderDrag>,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if !cx.has_active_drag() {
            return;
        }

        let mouse_position = event.event.position;
        let row_bounds = event.bounds;
        if !row_bounds.contains(&mouse_position) {
            return;
        }

        if event.drag(cx).list != self.rows.id() {
            return;
        }

        let y_in_row = (mouse_position.y - row_bounds.origin.y).max(px(0.));
        self.hover = Some((row, y_in_row));
        if self.rows.drag_over_row(row, y_in_row) {
            cx.notify();
        }
    }

    fn on_drag_move_over_list(
        &mut self,
        event: &DragMoveEvent<ReorderDrag>,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if !cx.has_active_drag() {
            return;
        }

        let mouse_position = event.event.position;
        let list_bounds = event.bounds;
        let mut changed = self.rows.set_width(list_bounds.size.width);
        if list_bounds.contains(&mouse_position) {
            let scroll_y = self.scroll_handle.offset().y;
            let y_in_content = mouse_position.y - list_bounds.origin.y - scroll_y;
            changed |= self.rows.drag_over_list(y_in_content);
        } else {
            self.hover = None;
            changed |= self.rows.drag_exit();
        }
        if changed {
            cx.notify();
        }
    }

    fn on_drop_on_row(
        &mut self,
        row: RowId,
        drag: &ReorderDrag,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let target = match self.hover.take() {
            Some((hover_row, y_in_row)) if hover_row == row => DropTarget::Row { row, y_in_row },
            _ => DropTarget::Indicator,
        };
        self.rows.import_drop(drag, target);
        cx.notify();
    }

    fn on_drop_on_list(&mut self, drag: &ReorderDrag, _window: &mut Window, cx: &mut Context<Self>) {
        self.hover = None;
        self.rows.import_drop(drag, DropTarget::Indicator);
        cx.notify();
    }
}

impl<T: 'static> Render for ReorderListState<T> {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        if !cx.has_active_drag() {
            self.hover = None;
            self.rows.end_drag();
        }

        let render_content = Rc::clone(&self.render_content);
        let drag_label = Rc::clone(&self.drag_label);
        let state_entity = cx.entity();
        let handle_width = self.rows.handle_width();
        let selection_visible = self.rows.is_selection_visible();
        let dragged_ix = self.rows.dragged_index();
        let indicator = self.rows.indicator_bounds();

        let theme = cx.theme();
        let border = theme.border;
        let background = theme.background;
        let handle_color = theme.muted_foreground;
        let indicator_color = theme.drag_border;

        let mut rows = Vec::with_capacity(self.rows.len());
        for (ix, row) in self.rows.rows().iter().enumerate() {
            let row_id = row.id();
            let selected = row.is_selected();
            let dragging = dragged_ix == Some(ix) && cx.has_active_drag();
            let row_state = RowState {
                selected,
                dragging,
                selection_visible,
            };

            let content = (render_content)(ix, row, row_state, window, cx);
            let Some(drag_value) = self.rows.drag_payload(ix, &*drag_label) else {
                continue;
            };

            let handle = div()
                .id(("reorder-list-handle", ix))
                .flex_none()
                .h_full()
                .w(handle_width)
                .flex()
                .items_center()
                .justify_center()
                .text_color(handle_color)
                .cursor(CursorStyle::OpenHand)
                .child(HANDLE_GLYPH)
                .on_drag(drag_value, {
                    let state_entity = state_entity.clone();
                    move |drag, offset, window, cx| {
                        state_entity.update(cx, |state, cx| {
                            state.on_drag_start(drag, offset.x, window, cx);
                        });
                        let label = drag.label.clone();
                        cx.new(|_| DragGhost::new(label))
                    }
                });

            let row_el = h_flex()
                .id(ix)
                .relative()
                .w_full()
                .h(row.bounds().size.height)
                .bg(background)
                .border_b_1()
                .border_color(border)
                .when(dragging, |this| this.opacity(0.4))
                .child(handle)
                .child(div().flex_1().min_w(px(0.)).overflow_hidden().child(content))
                .when(selection_visible, |this| {
                    let state_entity = state_entity.clone();
                    this.child(
                        div()
                            .flex_none()
                            .px(px(8.))
                            .child(
                                Checkbox::new(("reorder-list-check", ix))
                                    .checked(selected)
                                    .tab_stop(false)
                                    .on_click(move |checked, _window, cx| {
                                        let checked = *checked;
                                        state_entity.update(cx, |state, cx| {
                                            state.set_selected(ix, checked, cx);
                                        });
                                    }),
                            ),
                    )
                })
                .on_drag_move::<ReorderDrag>(cx.listener(move |this, event, window, cx| {
                    this.on_drag_move_over_row(row_id, event, window, cx);
                }))
                .on_drop::<ReorderDrag>(cx.listener(move |this, drag, window, cx| {
                    this.on_drop_on_row(row_id, drag, window, cx);
                }));

            rows.push(row_el);
        }

        div()
            .id("reorder-list-state")
            .size_full()
            .overflow_y_scroll()
            .track_scroll(&self.scroll_handle)
            .on_drag_move::<ReorderDrag>(cx.listener(Self::on_drag_move_over_list))
            .on_drop::<ReorderDrag>(cx.listener(Self::on_drop_on_list))
            .child(
                v_flex()
                    .relative()
                    .w_full()
                    .children(rows)
                    .when_some(indicator, |this, bar| {
                        this.child(
                            div()
                                .absolute()
                                .left_0()
                                .right_0()
                                .top(bar.origin.y)
                                .h(bar.size.height)
                                .bg(indicator_color),
                        )
                    }),
            )
    }
}

/// A list element whose rows can be reordered by dragging their handle.
#[derive(IntoElement)]
pub struct ReorderList<T: 'static> {
    id: ElementId,
    state: Entity<ReorderListState<T>>,
    style: StyleRefinement,
    render_content: RenderContent<T>,
}

impl<T: 'static> ReorderList<T> {
    pub fn new<R>(state: &Entity<ReorderListState<T>>, render_content: R) -> Self
    where
        R: Fn(usize, &Row<T>, RowState, &mut Window, &mut App) -> AnyElement + 'static,
    {
        Self {
            id: ElementId::Name(format!("reorder-list-{}", state.entity_id()).into()),
            state: state.clone(),
            style: StyleRefinement::default(),
            render_content: Rc::new(render_content),
        }
    }
}

impl<T: 'static> Styled for ReorderList<T> {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl<T: 'static> RenderOnce for ReorderList<T> {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        self.state
            .update(cx, |state, _| state.render_content = self.render_content);

        div()
            .id(self.id)
            .size_full()
            .child(self.state)
            .refine_style(&self.style)
    }
}
