mod chunk;
mod document;
mod enriched_section;
mod section;
mod section_number;
mod toc_entry;

pub use chunk::{Chunk, ChunkId, ChunkOrder, DocumentId, sort_chunks};
pub use document::{ContentType, Document};
pub use enriched_section::{EnrichedSection, TitleSource};
pub use section::{
    INFERRED_TITLE, OriginTag, PageRange, SectionCandidate, SectionEntry, SectionOrigin,
};
pub use section_number::{NON_NUMERIC_SENTINEL, SectionNumber};
pub use toc_entry::{RawTocEntry, TocPattern};
