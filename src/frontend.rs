mod ambient;
mod browser;
mod chat;
mod contact;
mod entrance;
mod sections;
mod theme;
mod viewer;

use std::rc::Rc;

use serde_json::json;
use web_sys::window;
use yew::prelude::*;

use crate::ambient::AmbientDriver;
use crate::config::SiteConfig;
use crate::content::SiteContent;
use crate::logging::{self, log_event, LogLevel};

use self::ambient::BrowserAmbient;
use self::contact::ContactSection;
use self::sections::{
    AboutSection, EducationSection, ExperienceSection, HeroSection, Navbar, ProjectsSection,
    SkillsSection,
};
use self::theme::ThemeHost;

#[derive(Properties, PartialEq)]
struct AppProps {
    config: SiteConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let theme = use_state(|| ThemeHost::current().initial_theme());
    let content = use_memo((), |_| SiteContent::load().map(Rc::new));

    {
        let current = *theme;
        use_effect_with((), move |_| {
            ThemeHost::current().show(current);
            || ()
        });
    }

    use_effect_with((), |_| {
        let mut driver = AmbientDriver::new(BrowserAmbient::new());
        driver.start();
        move || drop(driver)
    });

    let on_toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |_| {
            let next = theme.opposite();
            ThemeHost::current().switch_to(next);
            log_event(
                LogLevel::Info,
                "theme.changed",
                json!({ "theme": next.to_string() }),
            );
            theme.set(next);
        })
    };

    let content = match &*content {
        Ok(content) => content.clone(),
        Err(error) => {
            return html! {
                <main class="load-error" role="alert">
                    <p>{format!("The page content could not be loaded: {error}")}</p>
                </main>
            };
        }
    };

    html! {
        <>
            <a class="skip-link" href="#about">{"Skip to main content"}</a>
            <div class="ambient-backdrop" aria-hidden="true">
                <span class="particle particle-1" />
                <span class="particle particle-2" />
                <span class="particle particle-3" />
            </div>
            <Navbar
                name={content.profile.name.clone()}
                theme={*theme}
                on_toggle_theme={on_toggle_theme}
            />
            <main id="content">
                <HeroSection content={content.clone()} />
                <AboutSection content={content.clone()} config={props.config} />
                <ExperienceSection content={content.clone()} />
                <EducationSection content={content.clone()} />
                <SkillsSection content={content.clone()} />
                <ProjectsSection content={content.clone()} />
                <ContactSection content={content.clone()} config={props.config} />
            </main>
            <footer class="site-footer">
                <p class="muted">{format!("© {} {}", chrono::Local::now().format("%Y"), content.profile.name)}</p>
            </footer>
        </>
    }
}

pub fn run() {
    let config = SiteConfig::from_build_env();
    logging::set_min_level(config.log_level);

    let Some(root) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"))
    else {
        log_event(LogLevel::Info, "app.missing_mount_point", json!({ "id": "app" }));
        return;
    };

    yew::Renderer::<App>::with_root_and_props(root, AppProps { config }).render();
}
