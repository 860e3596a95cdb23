use std::rc::Rc;

use gloo::timers::callback::Timeout;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::chat::{ChatPhase, ChatSession, ChatTimings, OptionId, Origin};
use crate::config::SiteConfig;
use crate::content::ChatScript;

use super::browser::now_ms;

pub enum ChatAction {
    Select { id: OptionId, now_ms: u64 },
    Advance { now_ms: u64 },
}

impl Reducible for ChatSession {
    type Action = ChatAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = Rc::unwrap_or_clone(self);
        match action {
            ChatAction::Select { id, now_ms } => {
                // Rejections are logged by the session; the view only offers available options.
                let _ = next.select_option(id, now_ms);
            }
            ChatAction::Advance { now_ms } => {
                next.advance_to(now_ms);
            }
        }
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq)]
pub struct ChatWidgetProps {
    pub script: ChatScript,
    pub config: SiteConfig,
}

#[function_component(ChatWidget)]
pub fn chat_widget(props: &ChatWidgetProps) -> Html {
    let session = {
        let script = props.script.clone();
        let timings = ChatTimings::from(&props.config);
        use_reducer(move || ChatSession::new(&script, timings))
    };
    let transcript_ref = use_node_ref();

    {
        let dispatcher = session.dispatcher();
        use_effect_with(session.next_due(), move |next_due| {
            let timeout = next_due.map(|due| {
                let wait = u32::try_from(due.saturating_sub(now_ms())).unwrap_or(u32::MAX);
                Timeout::new(wait, move || {
                    dispatcher.dispatch(ChatAction::Advance {
                        now_ms: now_ms().max(due),
                    });
                })
            });
            move || drop(timeout)
        });
    }

    {
        let transcript_ref = transcript_ref.clone();
        use_effect_with(session.revision(), move |_| {
            if let Some(list) = transcript_ref.cast::<HtmlElement>() {
                list.set_scroll_top(list.scroll_height());
            }
            || ()
        });
    }

    let revealing = session.phase() == ChatPhase::Revealing;
    let options = session.available();

    html! {
        <div class="chat-widget" aria-label="Ask about me">
            <ol class="chat-transcript" ref={transcript_ref} aria-live="polite">
                { for session.transcript().iter().map(|entry| {
                    let origin = match entry.origin {
                        Origin::Bot => "from-bot",
                        Origin::User => "from-user",
                    };
                    html! {
                        <li key={entry.id} class={classes!("chat-entry", origin)}>
                            <p class="chat-text">{ entry.text.clone() }</p>
                            <span class="chat-stamp muted">{ entry.stamp.clone() }</span>
                        </li>
                    }
                }) }
                if session.is_typing() {
                    <li class="chat-entry from-bot typing" aria-label="Typing">
                        <span class="dot" /><span class="dot" /><span class="dot" />
                    </li>
                }
            </ol>
            if !options.is_empty() {
                <div class="chat-options" role="group" aria-label="Questions">
                    { for options.into_iter().map(|option| {
                        let onclick = {
                            let session = session.clone();
                            let id = option.id;
                            Callback::from(move |_: MouseEvent| {
                                session.dispatch(ChatAction::Select { id, now_ms: now_ms() });
                            })
                        };
                        html! {
                            <button
                                key={option.id}
                                type="button"
                                class="chat-option"
                                disabled={revealing}
                                {onclick}
                            >
                                { option.prompt.clone() }
                            </button>
                        }
                    }) }
                </div>
            }
        </div>
    }
}
