use serde_json::json;

use crate::logging::{log_event, LogLevel};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionId {
    Home,
    About,
    Experience,
    Education,
    Skills,
    Projects,
    Contact,
}

impl SectionId {
    pub const ALL: [Self; 7] = [
        Self::Home,
        Self::About,
        Self::Experience,
        Self::Education,
        Self::Skills,
        Self::Projects,
        Self::Contact,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Experience => "experience",
            Self::Education => "education",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Contact => "contact",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().trim_start_matches('#');
        Self::ALL.into_iter().find(|section| section.as_str() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Experience => "Experience",
            Self::Education => "Education",
            Self::Skills => "Skills",
            Self::Projects => "Projects",
            Self::Contact => "Contact",
        }
    }

    pub fn href(self) -> String {
        format!("#{}", self.as_str())
    }
}

/// Navbar state: the collapsible mobile menu and the section last navigated to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavState {
    pub menu_open: bool,
    pub active: SectionId,
}

impl Default for NavState {
    fn default() -> Self {
        Self {
            menu_open: false,
            active: SectionId::Home,
        }
    }
}

impl NavState {
    pub fn toggle_menu(self) -> Self {
        Self {
            menu_open: !self.menu_open,
            ..self
        }
    }

    pub fn navigated(self, section: SectionId) -> Self {
        Self {
            menu_open: false,
            active: section,
        }
    }
}

/// A page that can bring an element into view by id.
pub trait ScrollHost {
    type Target;

    fn find(&self, id: &str) -> Option<Self::Target>;
    fn scroll_into_view(&self, target: &Self::Target);
}

/// Smooth-scrolls to `id`. A missing target is logged and otherwise ignored.
pub fn scroll_to<H: ScrollHost>(host: &H, id: &str) -> bool {
    let Some(target) = host.find(id) else {
        log_event(LogLevel::Debug, "nav.missing_target", json!({ "id": id }));
        return false;
    };

    host.scroll_into_view(&target);
    true
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct FakePage {
        scrolled: RefCell<Vec<String>>,
    }

    impl ScrollHost for FakePage {
        type Target = SectionId;

        fn find(&self, id: &str) -> Option<SectionId> {
            SectionId::parse(id)
        }

        fn scroll_into_view(&self, target: &SectionId) {
            self.scrolled.borrow_mut().push(target.as_str().to_owned());
        }
    }

    #[test]
    fn scrolling_to_a_known_section_moves_there() {
        let page = FakePage::default();
        assert!(scroll_to(&page, "projects"));
        assert_eq!(*page.scrolled.borrow(), ["projects"]);
    }

    #[test]
    fn scrolling_to_a_missing_id_does_nothing() {
        let page = FakePage::default();
        assert!(!scroll_to(&page, "nope"));
        assert!(page.scrolled.borrow().is_empty());
    }

    #[test]
    fn ids_round_trip_through_parse() {
        for section in SectionId::ALL {
            assert_eq!(SectionId::parse(section.as_str()), Some(section));
            assert_eq!(SectionId::parse(&section.href()), Some(section));
        }
    }

    #[test]
    fn unknown_ids_do_not_parse() {
        assert_eq!(SectionId::parse("blog"), None);
        assert_eq!(SectionId::parse(""), None);
    }

    #[test]
    fn navigating_closes_the_menu() {
        let state = NavState::default().toggle_menu();
        assert!(state.menu_open);

        let state = state.navigated(SectionId::Projects);
        assert!(!state.menu_open);
        assert_eq!(state.active, SectionId::Projects);
    }
}
