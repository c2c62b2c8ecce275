//! Structured content-page definitions.
//!
//! A content page is a hero block, an ordered list of sections and a closing
//! call to action. The definition is persisted as JSON on the page row and
//! validated through these types at the read/write boundary.

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::types::{PageCategory, SectionLayout};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helper: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageAction {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageHero {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eyebrow: Option<String>,
    pub title: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stats: Vec<StatBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<PageAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionItem {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bullets: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stats: Vec<StatBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSection {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eyebrow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub layout: SectionLayout,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<SectionItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stats: Vec<StatBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<SectionTable>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageCta {
    pub title: String,
    pub description: String,
    pub primary_action: PageAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_action: Option<PageAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSeo {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPageDefinition {
    pub slug: String,
    pub category: PageCategory,
    pub hero: PageHero,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    pub sections: Vec<PageSection>,
    pub cta: PageCta,
    pub seo: PageSeo,
}

impl ContentPageDefinition {
    /// Structural checks applied before a definition is persisted.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.slug.trim().is_empty() {
            return Err(DomainError::validation("page slug must not be empty"));
        }
        if self.hero.title.trim().is_empty() {
            return Err(DomainError::validation("hero title must not be empty"));
        }
        for section in &self.sections {
            if section.id.trim().is_empty() {
                return Err(DomainError::validation("section id must not be empty"));
            }
            if section.layout == SectionLayout::Table && section.table.is_none() {
                return Err(DomainError::validation(format!(
                    "section `{}` uses the table layout without a table",
                    section.id
                )));
            }
        }
        Ok(())
    }
}
