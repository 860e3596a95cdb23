use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{window, KeyboardEvent};
use yew::prelude::*;

use crate::viewer::{Point, PointerButton, ViewerAsset, ViewerState};

use super::browser::Page;

pub enum ViewerAction {
    Open,
    Close,
    ZoomIn,
    ZoomOut,
    Wheel(f64),
    Reset,
    BeginDrag(Point, PointerButton),
    Drag(Point),
    EndDrag,
    Key(String),
}

impl Reducible for ViewerState {
    type Action = ViewerAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = Rc::unwrap_or_clone(self);
        match action {
            ViewerAction::Open => next.open(),
            ViewerAction::Close => next.close(),
            ViewerAction::ZoomIn => next.zoom_in(),
            ViewerAction::ZoomOut => next.zoom_out(),
            ViewerAction::Wheel(delta_y) => next.wheel_zoom(delta_y),
            ViewerAction::Reset => next.reset_view(),
            ViewerAction::BeginDrag(pointer, button) => next.begin_drag(pointer, button),
            ViewerAction::Drag(pointer) => next.continue_drag(pointer),
            ViewerAction::EndDrag => next.end_drag(),
            ViewerAction::Key(key) => {
                next.handle_key(&key);
            }
        }
        Rc::new(next)
    }
}

fn pointer(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

#[derive(Properties, PartialEq)]
pub struct ContentViewerProps {
    pub asset: ViewerAsset,
    pub open: bool,
    pub on_close: Callback<()>,
}

/// Modal pan/zoom viewer for a single image asset. The caller owns `open`.
#[function_component(ContentViewer)]
pub fn content_viewer(props: &ContentViewerProps) -> Html {
    let state = {
        let asset = props.asset.clone();
        use_reducer(move || ViewerState::new(asset))
    };

    {
        let state = state.clone();
        use_effect_with(props.open, move |open| {
            let open = *open;
            if open {
                state.dispatch(ViewerAction::Open);
                Page::current().lock_scroll(true);
            } else {
                state.dispatch(ViewerAction::Close);
            }
            move || {
                if open {
                    Page::current().lock_scroll(false);
                }
            }
        });
    }

    {
        let dispatcher = state.dispatcher();
        let on_close = props.on_close.clone();
        use_effect_with(props.open, move |open| {
            let listener = open
                .then(window)
                .flatten()
                .map(|win| {
                    EventListener::new(&win, "keydown", move |event| {
                        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                            return;
                        };
                        let key = event.key();
                        if key == "Escape" {
                            on_close.emit(());
                        }
                        dispatcher.dispatch(ViewerAction::Key(key));
                    })
                });
            move || drop(listener)
        });
    }

    if !props.open {
        return html! {};
    }

    let on_backdrop = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let stop = Callback::from(|event: MouseEvent| event.stop_propagation());
    let on_close_button = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let dispatch = |action: fn() -> ViewerAction| {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(action()))
    };
    let on_download = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| Page::current().download(&state.download_request()))
    };
    let onwheel = {
        let state = state.clone();
        Callback::from(move |event: WheelEvent| state.dispatch(ViewerAction::Wheel(event.delta_y())))
    };
    let onmousedown = {
        let state = state.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            state.dispatch(ViewerAction::BeginDrag(
                pointer(&event),
                PointerButton::from_code(event.button()),
            ));
        })
    };
    let onmousemove = {
        let state = state.clone();
        Callback::from(move |event: MouseEvent| {
            if state.is_dragging() {
                state.dispatch(ViewerAction::Drag(pointer(&event)));
            }
        })
    };
    let end_drag = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(ViewerAction::EndDrag))
    };

    let (x, y) = state.position_readout();
    let asset = state.asset();

    html! {
        <div class="viewer-backdrop" role="dialog" aria-modal="true" aria-label={asset.title.clone()} onclick={on_backdrop}>
            <div class="viewer-panel" onclick={stop}>
                <header class="viewer-toolbar">
                    <h3 class="viewer-title">{ asset.title.clone() }</h3>
                    <div class="viewer-controls">
                        <button type="button" aria-label="Zoom out" onclick={dispatch(|| ViewerAction::ZoomOut)}>{"−"}</button>
                        <span class="viewer-zoom">{ format!("{}%", state.zoom_percent()) }</span>
                        <button type="button" aria-label="Zoom in" onclick={dispatch(|| ViewerAction::ZoomIn)}>{"+"}</button>
                        <button type="button" aria-label="Reset view" onclick={dispatch(|| ViewerAction::Reset)}>{"⟲"}</button>
                        <button type="button" aria-label="Download" onclick={on_download}>{"⤓"}</button>
                        <button type="button" aria-label="Close viewer" onclick={on_close_button}>{"✕"}</button>
                    </div>
                </header>
                <div
                    class={classes!("viewer-stage", state.is_dragging().then_some("is-dragging"))}
                    {onwheel}
                    {onmousedown}
                    {onmousemove}
                    onmouseup={end_drag.clone()}
                    onmouseleave={end_drag}
                >
                    <img
                        class="viewer-image"
                        src={asset.src.clone()}
                        alt={asset.title.clone()}
                        style={state.transform_css()}
                        draggable="false"
                    />
                </div>
                <footer class="viewer-status muted">
                    <span>{ format!("Position: {x}, {y}") }</span>
                    <span>{"Drag to pan · scroll or +/− to zoom · R to reset · Esc to close"}</span>
                </footer>
            </div>
        </div>
    }
}
