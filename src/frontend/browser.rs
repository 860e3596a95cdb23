use std::{cell::RefCell, rc::Rc};

use gloo::render::{request_animation_frame, AnimationFrame};
use js_sys::{Function, Reflect};
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, Element, HtmlAnchorElement, HtmlElement, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::logging::{log_event, LogLevel};
use crate::navigation::{self, ScrollHost};
use crate::viewer::DownloadRequest;

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

pub fn now_ms() -> u64 {
    window()
        .and_then(|w| w.performance())
        .map_or(0.0, |performance| performance.now()) as u64
}

pub fn media_matches(query: &str) -> bool {
    window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .is_some_and(|list| list.matches())
}

pub fn prefers_reduced_motion() -> bool {
    media_matches(REDUCED_MOTION_QUERY)
}

/// Inner window size in CSS pixels, when a window exists.
pub fn viewport_size() -> Option<(f64, f64)> {
    let win = window()?;
    let width = win.inner_width().ok()?.as_f64()?;
    let height = win.inner_height().ok()?.as_f64()?;
    Some((width, height))
}

/// Handle on the current document. Every operation is a no-op without one.
#[derive(Clone)]
pub struct Page {
    document: Option<Document>,
}

impl Page {
    pub fn current() -> Self {
        Self {
            document: window().and_then(|w| w.document()),
        }
    }

    fn root(&self) -> Option<HtmlElement> {
        self.document
            .as_ref()?
            .document_element()?
            .dyn_into::<HtmlElement>()
            .ok()
    }

    pub fn set_root_var(&self, name: &str, value: &str) {
        if let Some(root) = self.root() {
            let _ = root.style().set_property(name, value);
        }
    }

    pub fn set_root_attribute(&self, name: &str, value: &str) {
        if let Some(root) = self.root() {
            let _ = root.set_attribute(name, value);
        }
    }

    pub fn lock_scroll(&self, locked: bool) {
        let Some(body) = self.document.as_ref().and_then(|d| d.body()) else {
            return;
        };

        let style = body.style();
        let _ = if locked {
            style.set_property("overflow", "hidden")
        } else {
            style.remove_property("overflow").map(drop)
        };
    }

    pub fn download(&self, request: &DownloadRequest) {
        let Some(anchor) = self
            .document
            .as_ref()
            .and_then(|d| d.create_element("a").ok())
            .and_then(|element| element.dyn_into::<HtmlAnchorElement>().ok())
        else {
            return;
        };

        anchor.set_href(&request.href);
        anchor.set_download(&request.filename);
        anchor.click();
        log_event(
            LogLevel::Info,
            "viewer.download",
            json!({ "href": request.href, "filename": request.filename }),
        );
    }

    /// Runs `update` inside `document.startViewTransition` when the browser has it.
    /// Returns false when the caller should apply the change directly.
    pub fn start_view_transition(&self, update: impl FnOnce() + 'static) -> bool {
        let Some(document) = self.document.as_ref() else {
            return false;
        };
        let Some(start) = Reflect::get(document, &JsValue::from_str("startViewTransition"))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok())
        else {
            return false;
        };

        start
            .call1(document, &Closure::once_into_js(update))
            .is_ok()
    }
}

impl ScrollHost for Page {
    type Target = Element;

    fn find(&self, id: &str) -> Option<Element> {
        self.document.as_ref()?.get_element_by_id(id)
    }

    fn scroll_into_view(&self, target: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        target.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

pub fn scroll_to(id: &str) {
    navigation::scroll_to(&Page::current(), id);
}

type FrameSlot = Rc<RefCell<Option<AnimationFrame>>>;
type FrameFn = Rc<RefCell<dyn FnMut(f64) -> bool>>;

/// Re-requests an animation frame until `on_frame` returns false.
/// Dropping the loop drops the pending frame, which cancels it.
pub struct FrameLoop {
    _pending: FrameSlot,
}

impl FrameLoop {
    pub fn start(on_frame: impl FnMut(f64) -> bool + 'static) -> Self {
        let pending: FrameSlot = Rc::new(RefCell::new(None));
        let on_frame: FrameFn = Rc::new(RefCell::new(on_frame));
        request_next(&pending, on_frame);
        Self { _pending: pending }
    }
}

fn request_next(slot: &FrameSlot, on_frame: FrameFn) {
    let weak = Rc::downgrade(slot);
    let handle = request_animation_frame(move |timestamp| {
        let Some(slot) = weak.upgrade() else {
            return;
        };
        slot.borrow_mut().take();

        let keep_going = (on_frame.borrow_mut())(timestamp);
        if keep_going {
            request_next(&slot, on_frame);
        }
    });
    *slot.borrow_mut() = Some(handle);
}
