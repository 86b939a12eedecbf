use serde::Serialize;
use uuid::Uuid;

use super::enriched_section::{EnrichedSection, TitleSource};
use super::section::{OriginTag, PageRange};
use super::section_number::SectionNumber;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chunk {
    pub id: ChunkId,
    pub document_id: DocumentId,
    pub section_number: SectionNumber,
    pub section_title: String,
    pub subtitle: Option<String>,
    pub section_path: String,
    pub content: String,
    pub page_number: u32,
    pub page_range: PageRange,
    pub level: usize,
    pub origin: OriginTag,
    pub title_source: TitleSource,
    pub chunk_index: u32,
    pub total_chunks: u32,
    pub is_split: bool,
    /// A single paragraph or sentence that alone exceeds the token budget.
    pub oversized: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ChunkId(Uuid);

impl ChunkId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ChunkId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl Chunk {
    pub fn from_section(
        section: &EnrichedSection,
        document_id: DocumentId,
        content: String,
        chunk_index: u32,
        total_chunks: u32,
        oversized: bool,
    ) -> Self {
        let entry = &section.entry;
        Self {
            id: ChunkId::new(),
            document_id,
            section_number: entry.section_number.clone(),
            section_title: entry.section_title.clone(),
            subtitle: section.subtitle.clone(),
            section_path: entry.section_number.to_string(),
            content,
            page_number: entry.page_number,
            page_range: entry.page_range,
            level: entry.level,
            origin: entry.origin.tag(),
            title_source: section.title_source,
            chunk_index,
            total_chunks,
            is_split: total_chunks > 1,
            oversized,
        }
    }

    pub fn with_section_path(mut self, section_path: String) -> Self {
        self.section_path = section_path;
        self
    }
}

/// Ordering applied to the final chunk list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkOrder {
    /// Page order, as consumed by path building and citation.
    #[default]
    Page,
    SectionNumber,
}

pub fn sort_chunks(chunks: &mut [Chunk], order: ChunkOrder) {
    match order {
        ChunkOrder::Page => chunks.sort_by(|a, b| {
            a.page_range
                .start
                .cmp(&b.page_range.start)
                .then_with(|| a.section_number.cmp_hierarchical(&b.section_number))
                .then_with(|| a.chunk_index.cmp(&b.chunk_index))
        }),
        ChunkOrder::SectionNumber => chunks.sort_by(|a, b| {
            a.section_number
                .cmp_hierarchical(&b.section_number)
                .then_with(|| a.page_range.start.cmp(&b.page_range.start))
                .then_with(|| a.chunk_index.cmp(&b.chunk_index))
        }),
    }
}
