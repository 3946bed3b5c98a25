use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One anchored region of a lesson page and its navigation label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Section {
    pub id: String,
    #[serde(rename = "short")]
    pub short_label: String,
}

impl Section {
    pub fn new(id: impl Into<String>, short_label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            short_label: short_label.into(),
        }
    }
}

/// Immutable, ordered section list of one page: never empty, ids unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionOutline {
    sections: Vec<Section>,
}

impl SectionOutline {
    pub fn new(sections: Vec<Section>) -> Result<Self> {
        if sections.is_empty() {
            bail!("a lesson page needs at least one section");
        }
        let mut seen = HashSet::new();
        for section in &sections {
            if section.id.trim().is_empty() {
                bail!("section ids must not be blank");
            }
            if !seen.insert(section.id.as_str()) {
                bail!("duplicate section id `{}`", section.id);
            }
        }
        Ok(Self { sections })
    }

    pub fn first(&self) -> &Section {
        // `new` rejects empty outlines.
        &self.sections[0]
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|section| section.id == id)
    }

    pub fn get(&self, idx: usize) -> Option<&Section> {
        self.sections.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Section after `id`, if any.
    pub fn next_after(&self, id: &str) -> Option<&Section> {
        self.position(id).and_then(|idx| self.sections.get(idx + 1))
    }

    /// Section before `id`, if any.
    pub fn previous_before(&self, id: &str) -> Option<&Section> {
        self.position(id)
            .and_then(|idx| idx.checked_sub(1))
            .and_then(|idx| self.sections.get(idx))
    }
}

impl<'a> IntoIterator for &'a SectionOutline {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

/// Which section of a mounted page counts as "being read".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSectionState {
    pub active_id: String,
}

impl ActiveSectionState {
    pub fn for_outline(outline: &SectionOutline) -> Self {
        Self {
            active_id: outline.first().id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outline() -> SectionOutline {
        SectionOutline::new(vec![
            Section::new("overview", "Overview"),
            Section::new("install", "Install"),
            Section::new("next", "What's Next"),
        ])
        .expect("valid outline")
    }

    #[test]
    fn rejects_empty_and_duplicate_outlines() {
        assert!(SectionOutline::new(Vec::new()).is_err());
        assert!(
            SectionOutline::new(vec![
                Section::new("overview", "Overview"),
                Section::new("overview", "Again"),
            ])
            .is_err()
        );
        assert!(SectionOutline::new(vec![Section::new("  ", "Blank")]).is_err());
    }

    #[test]
    fn active_state_starts_at_first_section() {
        assert_eq!(
            ActiveSectionState::for_outline(&outline()).active_id,
            "overview"
        );
    }

    #[test]
    fn neighbours_follow_declared_order() {
        let outline = outline();
        assert_eq!(outline.next_after("overview").map(|s| s.id.as_str()), Some("install"));
        assert_eq!(outline.previous_before("install").map(|s| s.id.as_str()), Some("overview"));
        assert!(outline.previous_before("overview").is_none());
        assert!(outline.next_after("next").is_none());
        assert!(outline.next_after("missing").is_none());
    }
}
