use std::rc::Rc;

use yew::prelude::*;

use crate::animation::Entrance;
use crate::config::SiteConfig;
use crate::content::SiteContent;
use crate::navigation::{NavState, SectionId};
use crate::sections::{
    certificate_keys, filter_skills, project_tags, skill_filters, CategoryFilter, CertificateKey,
    CertificateViewers, GalleryState, TimelineState,
};
use crate::theme::Theme;
use crate::viewer::DownloadRequest;

use super::browser::{scroll_to, Page};
use super::chat::ChatWidget;
use super::entrance::Reveal;
use super::viewer::ContentViewer;

#[derive(Properties, PartialEq)]
pub struct SectionProps {
    pub content: Rc<SiteContent>,
}

fn scroll_button(section: SectionId) -> Callback<MouseEvent> {
    Callback::from(move |event: MouseEvent| {
        event.prevent_default();
        scroll_to(section.as_str());
    })
}

#[derive(Properties, PartialEq)]
pub struct NavbarProps {
    pub name: AttrValue,
    pub theme: Theme,
    pub on_toggle_theme: Callback<()>,
}

#[function_component(Navbar)]
pub fn navbar(props: &NavbarProps) -> Html {
    let nav = use_state(NavState::default);

    let on_menu = {
        let nav = nav.clone();
        Callback::from(move |_: MouseEvent| nav.set(nav.toggle_menu()))
    };
    let on_theme = {
        let on_toggle_theme = props.on_toggle_theme.clone();
        Callback::from(move |_: MouseEvent| on_toggle_theme.emit(()))
    };

    html! {
        <header class="navbar">
            <a class="brand" href={SectionId::Home.href()} onclick={scroll_button(SectionId::Home)}>
                { props.name.clone() }
            </a>
            <button
                class="menu-toggle"
                type="button"
                aria-expanded={nav.menu_open.to_string()}
                aria-controls="primary-nav"
                onclick={on_menu}
            >
                <span class="sr-only">{"Toggle navigation"}</span>
                <span aria-hidden="true">{ if nav.menu_open { "✕" } else { "☰" } }</span>
            </button>
            <nav id="primary-nav" class={classes!("nav-links", nav.menu_open.then_some("is-open"))}>
                { for SectionId::ALL.into_iter().map(|section| {
                    let onclick = {
                        let nav = nav.clone();
                        Callback::from(move |event: MouseEvent| {
                            event.prevent_default();
                            scroll_to(section.as_str());
                            nav.set(nav.navigated(section));
                        })
                    };
                    html! {
                        <a
                            key={section.as_str()}
                            href={section.href()}
                            class={classes!("nav-link", (nav.active == section).then_some("is-active"))}
                            {onclick}
                        >
                            { section.label() }
                        </a>
                    }
                }) }
            </nav>
            <button
                class="theme-toggle"
                type="button"
                aria-label={props.theme.toggle_label()}
                aria-pressed={props.theme.is_dark().to_string()}
                onclick={on_theme}
            >
                <span aria-hidden="true">{ props.theme.icon() }</span>
            </button>
        </header>
    }
}

#[function_component(HeroSection)]
pub fn hero_section(props: &SectionProps) -> Html {
    let profile = &props.content.profile;
    let on_download = {
        let cv = profile.cv.clone();
        Callback::from(move |_: MouseEvent| {
            Page::current().download(&DownloadRequest::from(&cv));
        })
    };

    html! {
        <section id={SectionId::Home.as_str()} class="hero" aria-labelledby="hero-heading">
            <Reveal entrance={Entrance::ScaleIn}>
                <img class="hero-photo" src={profile.photo.clone()} alt={profile.name.clone()} />
            </Reveal>
            <Reveal delay_ms={120}>
                <p class="eyebrow">{"Hello, I'm"}</p>
                <h1 id="hero-heading">{ profile.name.clone() }</h1>
                <p class="hero-role">{ profile.role.clone() }</p>
                <p class="hero-tagline muted">{ profile.tagline.clone() }</p>
                <ul class="hero-roles" aria-label="Roles">
                    { for profile.roles.iter().map(|role| html! { <li>{ role.clone() }</li> }) }
                </ul>
                <div class="hero-actions">
                    <button class="button primary" type="button" onclick={scroll_button(SectionId::Projects)}>
                        {"View my work"}
                    </button>
                    <button class="button" type="button" onclick={scroll_button(SectionId::Contact)}>
                        {"Contact me"}
                    </button>
                    <button class="button ghost" type="button" onclick={on_download}>
                        {"Download CV"}
                    </button>
                </div>
                <ul class="social-links">
                    { for props.content.socials.iter().map(|social| html! {
                        <li>
                            <a class="link" href={social.href.clone()} target="_blank" rel="noopener noreferrer">
                                { social.label.clone() }
                                <span class="sr-only">{" (opens in a new tab)"}</span>
                            </a>
                        </li>
                    }) }
                </ul>
            </Reveal>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct AboutSectionProps {
    pub content: Rc<SiteContent>,
    pub config: SiteConfig,
}

#[function_component(AboutSection)]
pub fn about_section(props: &AboutSectionProps) -> Html {
    let cv_open = use_state(|| false);
    let profile = &props.content.profile;

    let on_open = {
        let cv_open = cv_open.clone();
        Callback::from(move |_: MouseEvent| cv_open.set(true))
    };
    let on_close = {
        let cv_open = cv_open.clone();
        Callback::from(move |_| cv_open.set(false))
    };

    html! {
        <section id={SectionId::About.as_str()} class="section-block about" aria-labelledby="about-heading">
            <Reveal entrance={Entrance::FadeRight}>
                <h2 id="about-heading">{"About me"}</h2>
                { for profile.summary.iter().map(|paragraph| html! { <p>{ paragraph.clone() }</p> }) }
                <p class="muted">{ format!("Based in {}", profile.location) }</p>
                <button class="button" type="button" onclick={on_open}>{"View CV"}</button>
            </Reveal>
            <Reveal entrance={Entrance::FadeLeft} delay_ms={150}>
                <ChatWidget script={props.content.chat.clone()} config={props.config} />
            </Reveal>
            <ContentViewer asset={profile.cv.clone()} open={*cv_open} {on_close} />
        </section>
    }
}

#[function_component(ExperienceSection)]
pub fn experience_section(props: &SectionProps) -> Html {
    let timeline = use_state(TimelineState::default);

    html! {
        <section id={SectionId::Experience.as_str()} class="section-block" aria-labelledby="experience-heading">
            <h2 id="experience-heading">{"Experience"}</h2>
            <ol class="timeline">
                { for props.content.experience.iter().enumerate().map(|(index, entry)| {
                    let expanded = timeline.is_expanded(index);
                    let on_toggle = {
                        let timeline = timeline.clone();
                        Callback::from(move |_: MouseEvent| timeline.set(timeline.toggled(index)))
                    };
                    html! {
                        <li key={index} class="timeline-entry">
                            <Reveal delay_ms={u32::try_from(index).unwrap_or(0) * 100}>
                                <header>
                                    <h3>{ format!("{} · {}", entry.role, entry.company) }</h3>
                                    <p class="muted">{ format!("{} · {}", entry.period, entry.location) }</p>
                                </header>
                                <p>{ entry.summary.clone() }</p>
                                <ul>
                                    { for entry.highlights.iter().map(|item| html! { <li>{ item.clone() }</li> }) }
                                    if expanded {
                                        { for entry.details.iter().map(|item| html! { <li>{ item.clone() }</li> }) }
                                    }
                                </ul>
                                <ul class="tag-list">
                                    { for entry.tech.iter().map(|tech| html! { <li class="tag">{ tech.clone() }</li> }) }
                                </ul>
                                if !entry.details.is_empty() {
                                    <button class="link-button" type="button" aria-expanded={expanded.to_string()} onclick={on_toggle}>
                                        { if expanded { "Show less" } else { "Show more" } }
                                    </button>
                                }
                            </Reveal>
                        </li>
                    }
                }) }
            </ol>
        </section>
    }
}

#[function_component(EducationSection)]
pub fn education_section(props: &SectionProps) -> Html {
    let viewers = use_state(CertificateViewers::default);
    let education = &props.content.education;

    let open_button = |key: CertificateKey| {
        let viewers = viewers.clone();
        Callback::from(move |_: MouseEvent| viewers.set(viewers.opened(key)))
    };

    html! {
        <section id={SectionId::Education.as_str()} class="section-block" aria-labelledby="education-heading">
            <h2 id="education-heading">{"Education"}</h2>
            <ul class="education-list">
                { for education.iter().enumerate().map(|(entry_index, entry)| html! {
                    <li key={entry.degree.clone()} class="education-entry">
                        <Reveal>
                            <h3>{ entry.degree.clone() }</h3>
                            <p class="muted">{ format!("{} · {}", entry.school, entry.period) }</p>
                            <p>{ entry.description.clone() }</p>
                            if !entry.certificates.is_empty() {
                                <ul class="certificates">
                                    { for entry.certificates.iter().enumerate().map(|(index, certificate)| html! {
                                        <li key={certificate.name.clone()} class="certificate">
                                            <div>
                                                <p class="certificate-name">{ certificate.name.clone() }</p>
                                                <p class="muted">{ format!("{} · {}", certificate.issuer, certificate.year) }</p>
                                            </div>
                                            <button class="link-button" type="button" onclick={open_button((entry_index, index))}>
                                                {"View certificate"}
                                            </button>
                                        </li>
                                    }) }
                                </ul>
                            }
                        </Reveal>
                    </li>
                }) }
            </ul>
            { for certificate_keys(education).into_iter().map(|(key, certificate)| {
                let on_close = {
                    let viewers = viewers.clone();
                    Callback::from(move |_| viewers.set(viewers.closed(key)))
                };
                html! {
                    <ContentViewer
                        key={format!("{}-{}", key.0, key.1)}
                        asset={certificate.image.clone()}
                        open={viewers.is_open(key)}
                        {on_close}
                    />
                }
            }) }
        </section>
    }
}

#[function_component(SkillsSection)]
pub fn skills_section(props: &SectionProps) -> Html {
    let filter = use_state(CategoryFilter::default);
    let skills = &props.content.skills;

    html! {
        <section id={SectionId::Skills.as_str()} class="section-block" aria-labelledby="skills-heading">
            <h2 id="skills-heading">{"Skills"}</h2>
            <div class="filter-tabs" role="tablist">
                { for skill_filters(skills).into_iter().map(|option| {
                    let selected = *filter == option;
                    let label = option.label().to_owned();
                    let onclick = {
                        let filter = filter.clone();
                        Callback::from(move |_: MouseEvent| filter.set(option.clone()))
                    };
                    html! {
                        <button
                            key={label.clone()}
                            type="button"
                            role="tab"
                            aria-selected={selected.to_string()}
                            class={classes!("filter-tab", selected.then_some("is-active"))}
                            {onclick}
                        >
                            { label }
                        </button>
                    }
                }) }
            </div>
            <ul class="skill-grid">
                { for filter_skills(skills, &filter).into_iter().map(|(category, skill)| html! {
                    <li key={format!("{category}-{}", skill.name)} class="skill">
                        <span class="skill-name">{ skill.name.clone() }</span>
                        <span class="skill-bar" aria-hidden="true">
                            <span class="skill-fill" style={format!("width: {}%;", skill.level.min(100))} />
                        </span>
                        <span class="sr-only">{ format!("{} proficiency: {}%", skill.name, skill.level) }</span>
                    </li>
                }) }
            </ul>
        </section>
    }
}

#[function_component(ProjectsSection)]
pub fn projects_section(props: &SectionProps) -> Html {
    let gallery = use_state(GalleryState::default);
    let projects = &props.content.projects;

    let on_toggle = {
        let gallery = gallery.clone();
        Callback::from(move |_: MouseEvent| gallery.set(gallery.toggled()))
    };

    html! {
        <section id={SectionId::Projects.as_str()} class="section-block" aria-labelledby="projects-heading">
            <h2 id="projects-heading">{"Projects"}</h2>
            <div class="filter-tabs" role="tablist">
                { for project_tags(projects).into_iter().map(|option| {
                    let selected = gallery.filter == option;
                    let label = option.label().to_owned();
                    let onclick = {
                        let gallery = gallery.clone();
                        Callback::from(move |_: MouseEvent| gallery.set(gallery.with_filter(option.clone())))
                    };
                    html! {
                        <button
                            key={label.clone()}
                            type="button"
                            role="tab"
                            aria-selected={selected.to_string()}
                            class={classes!("filter-tab", selected.then_some("is-active"))}
                            {onclick}
                        >
                            { label }
                        </button>
                    }
                }) }
            </div>
            <ul class="project-grid">
                { for gallery.visible(projects).into_iter().enumerate().map(|(index, project)| html! {
                    <li key={project.title.clone()} class="project-card">
                        <Reveal entrance={Entrance::ScaleIn} delay_ms={u32::try_from(index % 3).unwrap_or(0) * 80}>
                            <img class="project-image" src={project.image.clone()} alt={project.title.clone()} loading="lazy" />
                            <h3>{ project.title.clone() }</h3>
                            <p class="muted">{ project.description.clone() }</p>
                            <ul class="tag-list">
                                { for project.tags.iter().map(|tag| html! { <li class="tag">{ tag.clone() }</li> }) }
                            </ul>
                            <div class="project-links">
                                if let Some(repo) = project.repo.clone() {
                                    <a class="link" href={repo} target="_blank" rel="noopener noreferrer">{"Source"}</a>
                                }
                                if let Some(demo) = project.demo.clone() {
                                    <a class="link" href={demo} target="_blank" rel="noopener noreferrer">{"Live demo"}</a>
                                }
                            </div>
                        </Reveal>
                    </li>
                }) }
            </ul>
            if gallery.can_toggle(projects) {
                <button class="button" type="button" aria-expanded={gallery.expanded.to_string()} onclick={on_toggle}>
                    { if gallery.expanded { "Show less" } else { "Show more" } }
                </button>
            }
        </section>
    }
}
