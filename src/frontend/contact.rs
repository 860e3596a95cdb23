use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::config::SiteConfig;
use crate::contact::{submit_form, ContactForm, Field, SimulatedTransport, SubmitState};
use crate::content::SiteContent;
use crate::navigation::SectionId;

use super::entrance::Reveal;

#[derive(Properties, PartialEq)]
pub struct ContactSectionProps {
    pub content: Rc<SiteContent>,
    pub config: SiteConfig,
}

#[function_component(ContactSection)]
pub fn contact_section(props: &ContactSectionProps) -> Html {
    let form = use_state(ContactForm::default);
    let status = use_state(SubmitState::default);

    let on_input = |field: Field| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            next.set(field, value);
            form.set(next);
        })
    };
    let input_handler = |field: Field| {
        let on_input = on_input(field);
        Callback::from(move |event: InputEvent| {
            on_input.emit(event.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let message_handler = {
        let on_input = on_input(Field::Message);
        Callback::from(move |event: InputEvent| {
            on_input.emit(event.target_unchecked_into::<HtmlTextAreaElement>().value());
        })
    };

    let onsubmit = {
        let form = form.clone();
        let status = status.clone();
        let transport = SimulatedTransport {
            delay: props.config.contact_delay,
        };
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if status.is_submitting() {
                return;
            }

            status.set(SubmitState::Submitting);
            let form = form.clone();
            let status = status.clone();
            spawn_local(async move {
                let mut draft = (*form).clone();
                let outcome = submit_form(&mut draft, &transport).await;
                form.set(draft);
                status.set(outcome);
            });
        })
    };

    let submitting = status.is_submitting();
    let feedback = match &*status {
        SubmitState::Sent => html! {
            <p class="form-status success" role="status">{"Thanks! Your message is on its way."}</p>
        },
        SubmitState::Failed(reason) => html! {
            <p class="form-status error" role="alert">{ reason.clone() }</p>
        },
        SubmitState::Idle | SubmitState::Submitting => html! {},
    };
    let profile = &props.content.profile;

    html! {
        <section id={SectionId::Contact.as_str()} class="section-block contact" aria-labelledby="contact-heading">
            <Reveal>
                <h2 id="contact-heading">{"Get in touch"}</h2>
                <p class="muted">
                    {"Have a project in mind or just want to say hi? Reach me at "}
                    <a class="link" href={format!("mailto:{}", profile.email)}>{ profile.email.clone() }</a>
                    {format!(" or send a note from {}.", profile.location)}
                </p>
            </Reveal>
            <Reveal delay_ms={150}>
                <form class="contact-form" {onsubmit} novalidate=true>
                    <label>
                        <span>{"Name"}</span>
                        <input type="text" name="name" required=true value={form.name.clone()} oninput={input_handler(Field::Name)} />
                    </label>
                    <label>
                        <span>{"Email"}</span>
                        <input type="email" name="email" required=true value={form.email.clone()} oninput={input_handler(Field::Email)} />
                    </label>
                    <label>
                        <span>{"Subject"}</span>
                        <input type="text" name="subject" required=true value={form.subject.clone()} oninput={input_handler(Field::Subject)} />
                    </label>
                    <label>
                        <span>{"Message"}</span>
                        <textarea name="message" rows="5" required=true value={form.message.clone()} oninput={message_handler} />
                    </label>
                    <button class="button primary" type="submit" disabled={submitting}>
                        { if submitting { "Sending…" } else { "Send message" } }
                    </button>
                    { feedback }
                </form>
            </Reveal>
        </section>
    }
}
