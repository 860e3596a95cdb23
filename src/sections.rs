use std::collections::BTreeSet;

use crate::content::{Certificate, EducationEntry, Project, Skill, SkillCategory};

pub const PROJECTS_COLLAPSED: usize = 3;
pub const ALL_FILTER: &str = "All";

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_FILTER,
            Self::Only(name) => name.as_str(),
        }
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == name,
        }
    }
}

/// Filter tabs: `All` followed by each category in declaration order.
pub fn skill_filters(categories: &[SkillCategory]) -> Vec<CategoryFilter> {
    std::iter::once(CategoryFilter::All)
        .chain(
            categories
                .iter()
                .map(|category| CategoryFilter::Only(category.name.clone())),
        )
        .collect()
}

pub fn filter_skills<'a>(
    categories: &'a [SkillCategory],
    filter: &CategoryFilter,
) -> Vec<(&'a str, &'a Skill)> {
    categories
        .iter()
        .filter(|category| filter.matches(&category.name))
        .flat_map(|category| {
            category
                .skills
                .iter()
                .map(move |skill| (category.name.as_str(), skill))
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct GalleryState {
    pub filter: CategoryFilter,
    pub expanded: bool,
}

impl GalleryState {
    pub fn with_filter(&self, filter: CategoryFilter) -> Self {
        Self {
            filter,
            expanded: self.expanded,
        }
    }

    pub fn toggled(&self) -> Self {
        Self {
            filter: self.filter.clone(),
            expanded: !self.expanded,
        }
    }

    pub fn matching<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        projects
            .iter()
            .filter(|project| match &self.filter {
                CategoryFilter::All => true,
                CategoryFilter::Only(tag) => project.tags.iter().any(|value| value == tag),
            })
            .collect()
    }

    pub fn visible<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        let mut matching = self.matching(projects);
        if !self.expanded {
            matching.truncate(PROJECTS_COLLAPSED);
        }
        matching
    }

    /// Whether a "show more"/"show less" control is meaningful for the current filter.
    pub fn can_toggle(&self, projects: &[Project]) -> bool {
        self.matching(projects).len() > PROJECTS_COLLAPSED
    }
}

pub fn project_tags(projects: &[Project]) -> Vec<CategoryFilter> {
    let tags: BTreeSet<&str> = projects
        .iter()
        .flat_map(|project| project.tags.iter().map(String::as_str))
        .collect();

    std::iter::once(CategoryFilter::All)
        .chain(tags.into_iter().map(|tag| CategoryFilter::Only(tag.to_owned())))
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TimelineState {
    expanded: BTreeSet<usize>,
}

impl TimelineState {
    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    pub fn toggled(&self, index: usize) -> Self {
        let mut expanded = self.expanded.clone();
        if !expanded.remove(&index) {
            expanded.insert(index);
        }
        Self { expanded }
    }
}

/// Position of a certificate: (education entry, certificate within it).
pub type CertificateKey = (usize, usize);

/// Which certificate viewer is showing, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CertificateViewers {
    open: Option<CertificateKey>,
}

impl CertificateViewers {
    pub fn opened(self, key: CertificateKey) -> Self {
        Self { open: Some(key) }
    }

    pub fn closed(self, key: CertificateKey) -> Self {
        if self.open == Some(key) {
            Self { open: None }
        } else {
            self
        }
    }

    pub fn is_open(&self, key: CertificateKey) -> bool {
        self.open == Some(key)
    }
}

pub fn certificate_keys(education: &[EducationEntry]) -> Vec<(CertificateKey, &Certificate)> {
    education
        .iter()
        .enumerate()
        .flat_map(|(entry, item)| {
            item.certificates
                .iter()
                .enumerate()
                .map(move |(index, certificate)| ((entry, index), certificate))
        })
        .collect()
}
