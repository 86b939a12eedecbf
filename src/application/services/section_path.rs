use std::collections::HashMap;

use crate::domain::{Chunk, EnrichedSection, INFERRED_TITLE, SectionNumber};

pub const PATH_SEPARATOR: &str = " → ";

/// Builds breadcrumbs such as `6 Functional description → 6.6 Bus operation`
/// from the final section titles.
#[derive(Debug, Default)]
pub struct SectionPathBuilder {
    titles: HashMap<SectionNumber, String>,
}

impl SectionPathBuilder {
    pub fn from_sections(sections: &[EnrichedSection]) -> Self {
        let titles = sections
            .iter()
            .map(|s| (s.entry.section_number.clone(), s.entry.section_title.clone()))
            .collect();
        Self { titles }
    }

    pub fn path_for(&self, number: &SectionNumber, title: &str, subtitle: Option<&str>) -> String {
        let mut elements: Vec<String> = number
            .ancestors()
            .iter()
            .map(|ancestor| {
                let title = self.titles.get(ancestor).map(String::as_str).unwrap_or("");
                path_element(ancestor, title)
            })
            .collect();
        elements.push(path_element(number, title));

        let path = elements.join(PATH_SEPARATOR);
        match subtitle {
            Some(subtitle) if !subtitle.is_empty() => format!("{path} - {subtitle}"),
            _ => path,
        }
    }

    pub fn apply(&self, chunk: Chunk) -> Chunk {
        let path = self.path_for(
            &chunk.section_number,
            &chunk.section_title,
            chunk.subtitle.as_deref(),
        );
        chunk.with_section_path(path)
    }
}

fn path_element(number: &SectionNumber, title: &str) -> String {
    let title = title.trim();
    if title.is_empty() || title == INFERRED_TITLE {
        number.to_string()
    } else {
        format!("{number} {title}")
    }
}
