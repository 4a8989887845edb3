use std::cell::RefCell;
use std::rc::Rc;

use gpui::*;
use gpui_component::ActiveTheme as _;
use gpui_component::button::{Button, ButtonVariants as _};
use gpui_component::{h_flex, v_flex};
use gpui_reorder_list::{ListChange, ReorderListState, RowMatch, reorder_list};

/// Set to `1` to start the demo with selection checkboxes shown.
const SELECTION_ENV: &str = "REORDER_LIST_SELECTION";

pub struct ReorderListExample {
    list: Entity<ReorderListState<SharedString>>,
    changes: Rc<RefCell<Vec<ListChange>>>,
    next_item: usize,
    _subscription: Subscription,
}

impl ReorderListExample {
    pub fn view(_window: &mut Window, cx: &mut App) -> Entity<Self> {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let list = cx.new(|_| {
            let mut state = ReorderListState::new()
                .items(demo_items())
                .drag_label(|label: &SharedString| label.clone())
                .selection_visible(selection_from_env());
            state.add_change_listener({
                let changes = changes.clone();
                move |change, rows| {
                    let order = rows
                        .iter()
                        .map(|row| row.content().to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    tracing::info!(from = change.from, to = change.to, %order, "list reordered");
                    changes.borrow_mut().push(*change);
                }
            });
            state
        });

        cx.new(|cx| {
            let subscription = cx.observe(&list, |_, _, cx| cx.notify());
            Self {
                list,
                changes,
                next_item: demo_items().len() + 1,
                _subscription: subscription,
            }
        })
    }

    fn toggle_selection(&mut self, cx: &mut Context<Self>) {
        self.list.update(cx, |state, cx| {
            let visible = !state.list().is_selection_visible();
            state.set_selection_visible(visible, cx);
        });
    }

    fn add_item(&mut self, cx: &mut Context<Self>) {
        let label = SharedString::from(format!("Item {}", self.next_item));
        self.next_item += 1;
        self.list.update(cx, |state, cx| {
            state.add(label, cx);
        });
    }

    fn remove_first(&mut self, cx: &mut Context<Self>) {
        self.list.update(cx, |state, cx| {
            let Some(first) = state.list().content(0).cloned() else {
                return;
            };
            state.remove(RowMatch::Content(&first), cx);
        });
    }
}

impl Render for ReorderListExample {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let state = self.list.read(cx);
        let dump = state
            .list()
            .contents()
            .enumerate()
            .map(|(ix, label)| format!("{ix:02}  {label}"))
            .collect::<Vec<_>>()
            .join("\n");
        let selected = state
            .selected()
            .iter()
            .map(|label| label.to_string())
            .collect::<Vec<_>>();
        let selected = if selected.is_empty() {
            "<none>".to_string()
        } else {
            selected.join(", ")
        };
        let last_change = self
            .changes
            .borrow()
            .last()
            .map(|change| format!("{} -> {}", change.from, change.to))
            .unwrap_or_else(|| "<none>".to_string());

        let theme = cx.theme();
        let border = theme.border;
        let background = theme.background;
        let muted = theme.muted_foreground;

        v_flex()
            .size_full()
            .p(px(16.))
            .gap_y_3()
            .child(
                v_flex()
                    .gap_y_1()
                    .child(
                        div()
                            .text_xl()
                            .font_weight(FontWeight::BOLD)
                            .child("Reorder List"),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(muted)
                            .child("Drag a row by its ☰ handle. The line shows where it will land."),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(muted)
                            .child(format!("Selected: {selected}")),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(muted)
                            .child(format!("Last move: {last_change}")),
                    ),
            )
            .child(
                h_flex()
                    .gap_x_2()
                    .child(
                        Button::new("toggle-selection")
                            .ghost()
                            .label("Toggle selection")
                            .on_click(cx.listener(|this, _, _window, cx| {
                                this.toggle_selection(cx);
                            })),
                    )
                    .child(
                        Button::new("add-item")
                            .ghost()
                            .label("Add item")
                            .on_click(cx.listener(|this, _, _window, cx| {
                                this.add_item(cx);
                            })),
                    )
                    .child(
                        Button::new("remove-first")
                            .ghost()
                            .label("Remove first")
                            .on_click(cx.listener(|this, _, _window, cx| {
                                this.remove_first(cx);
                            })),
                    ),
            )
            .child(
                h_flex()
                    .flex_1()
                    .min_h(px(0.))
                    .gap_x_3()
                    .child(
                        div()
                            .w(px(320.))
                            .h_full()
                            .rounded(px(12.))
                            .border_1()
                            .border_color(border)
                            .bg(background)
                            .overflow_hidden()
                            .child(reorder_list(
                                &self.list,
                                move |ix, row, _row_state, _window, _cx| {
                                    let label = row.content().clone();
                                    Button::new(("reorder-item", ix))
                                        .ghost()
                                        .label(label.clone())
                                        .on_click(move |_, _, _| {
                                            tracing::info!(%label, "clicked");
                                        })
                                        .into_any_element()
                                },
                            )),
                    )
                    .child(
                        v_flex()
                            .flex_1()
                            .min_w(px(0.))
                            .h_full()
                            .rounded(px(12.))
                            .border_1()
                            .border_color(border)
                            .bg(background)
                            .p(px(12.))
                            .child(render_dump(dump)),
                    ),
            )
    }
}

fn render_dump(text: String) -> impl IntoElement {
    let lines = text
        .lines()
        .map(|line| div().text_sm().child(line.to_string()));
    v_flex().gap_y_0p5().children(lines)
}

fn selection_from_env() -> bool {
    std::env::var(SELECTION_ENV)
        .is_ok_and(|value| matches!(value.trim(), "1" | "true" | "yes"))
}

fn demo_items() -> Vec<SharedString> {
    vec!["Item 1".into(), "Item 2".into(), "Item 3".into()]
}
