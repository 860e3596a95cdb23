use web_sys::{window, Storage};

use crate::theme::{Theme, THEME_KEY};

use super::browser::{media_matches, prefers_reduced_motion, Page, DARK_SCHEME_QUERY};

const THEME_ATTRIBUTE: &str = "data-theme";

/// The theme's browser side: the root `data-theme` attribute and the stored preference.
pub struct ThemeHost {
    page: Page,
    storage: Option<Storage>,
}

impl ThemeHost {
    pub fn current() -> Self {
        Self {
            page: Page::current(),
            storage: window().and_then(|w| w.local_storage().ok().flatten()),
        }
    }

    fn stored(&self) -> Option<String> {
        self.storage.as_ref()?.get_item(THEME_KEY).ok().flatten()
    }

    pub fn initial_theme(&self) -> Theme {
        Theme::resolve(self.stored().as_deref(), media_matches(DARK_SCHEME_QUERY))
    }

    pub fn show(&self, theme: Theme) {
        self.page
            .set_root_attribute(THEME_ATTRIBUTE, &theme.to_string());
    }

    /// Stores `theme` and shows it, cross-fading when the browser supports view transitions.
    pub fn switch_to(&self, theme: Theme) {
        if let Some(storage) = &self.storage {
            let _ = storage.set_item(THEME_KEY, &theme.to_string());
        }

        let page = self.page.clone();
        let animated = !prefers_reduced_motion()
            && self.page.start_view_transition(move || {
                page.set_root_attribute(THEME_ATTRIBUTE, &theme.to_string());
            });
        if !animated {
            self.show(theme);
        }
    }
}
