use std::{cell::RefCell, rc::Rc};

use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

use crate::animation::{Entrance, VisibilityTrigger};

use super::browser::{prefers_reduced_motion, FrameLoop};

const VISIBILITY_THRESHOLD: f64 = 0.15;

struct EntranceGuard {
    observer: Option<IntersectionObserver>,
    _callback: Option<Closure<dyn FnMut(Array)>>,
    frames: Rc<RefCell<Option<FrameLoop>>>,
}

impl EntranceGuard {
    fn arm(node: &NodeRef, entrance: Entrance, delay_ms: f64) -> Self {
        let frames: Rc<RefCell<Option<FrameLoop>>> = Rc::new(RefCell::new(None));
        let idle = Self {
            observer: None,
            _callback: None,
            frames: frames.clone(),
        };

        let Some(element) = node.cast::<HtmlElement>() else {
            return idle;
        };
        if prefers_reduced_motion() {
            return idle;
        }

        let tween = entrance.tween(delay_ms);
        let _ = element.set_attribute("style", &tween.initial_style());

        let mut trigger = VisibilityTrigger::new(VISIBILITY_THRESHOLD);
        let slot = frames.clone();
        let target = element.clone();
        let callback = Closure::<dyn FnMut(Array)>::new(move |entries: Array| {
            let fired = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .any(|entry| trigger.observe(entry.intersection_ratio()));
            if !fired {
                return;
            }

            let target = target.clone();
            let mut started: Option<f64> = None;
            *slot.borrow_mut() = Some(FrameLoop::start(move |timestamp| {
                let origin = *started.get_or_insert(timestamp);
                let elapsed = timestamp - origin;
                match tween.frame_style(elapsed) {
                    Some(style) => {
                        let _ = target.set_attribute("style", &style);
                        true
                    }
                    None => {
                        let _ = target.remove_attribute("style");
                        false
                    }
                }
            }));
        });

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(VISIBILITY_THRESHOLD));
        let Ok(observer) =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
        else {
            let _ = element.remove_attribute("style");
            return idle;
        };
        observer.observe(&element);

        Self {
            observer: Some(observer),
            _callback: Some(callback),
            frames,
        }
    }
}

impl Drop for EntranceGuard {
    fn drop(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
        self.frames.borrow_mut().take();
    }
}

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    #[prop_or(Entrance::FadeUp)]
    pub entrance: Entrance,
    #[prop_or_default]
    pub delay_ms: u32,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Html,
}

/// Hides its children until they scroll into view, then tweens them in.
#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let node = use_node_ref();

    {
        let node = node.clone();
        let entrance = props.entrance;
        let delay_ms = f64::from(props.delay_ms);
        use_effect_with((), move |_| {
            let guard = EntranceGuard::arm(&node, entrance, delay_ms);
            move || drop(guard)
        });
    }

    html! {
        <div ref={node} class={classes!("reveal", props.class.clone())}>
            { props.children.clone() }
        </div>
    }
}
