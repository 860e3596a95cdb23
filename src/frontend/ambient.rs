use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{window, PointerEvent};

use crate::ambient::{AmbientField, AmbientSink};

use super::browser::{viewport_size, FrameLoop, Page};

/// Writes the ambient channels into root CSS variables.
pub struct BrowserAmbient {
    page: Page,
}

impl BrowserAmbient {
    pub fn new() -> Self {
        Self {
            page: Page::current(),
        }
    }
}

impl AmbientSink for BrowserAmbient {
    type Frames = FrameLoop;
    type Pointer = EventListener;

    fn animate(&mut self, field: AmbientField) -> FrameLoop {
        let page = self.page.clone();
        FrameLoop::start(move |timestamp| {
            for channel in field.sample(timestamp / 1_000.0) {
                page.set_root_var(channel.name, &channel.css_value());
            }
            true
        })
    }

    fn follow_pointer(&mut self, field: AmbientField) -> Option<EventListener> {
        let page = self.page.clone();
        let win = window()?;
        Some(EventListener::new(&win, "pointermove", move |event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let channels = field.pointer(
                f64::from(event.client_x()),
                f64::from(event.client_y()),
                viewport_size().unwrap_or_default(),
            );
            for channel in channels {
                page.set_root_var(channel.name, &channel.css_value());
            }
        }))
    }
}
