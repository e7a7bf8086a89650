//! Content module - decoding and normalization of Notion payloads

mod block;
mod post;
pub mod raw;

pub use block::{normalize_block, normalize_children, BlockError, BlockType, ContentBlock};
pub use post::{
    coerce_published, find_by_slug, is_published, normalize_row, resolve_summary,
    resolve_title, Post, DEFAULT_SUMMARY, UNTITLED_POST,
};
pub use raw::{BlockMap, PublishedFlag, RawBlock, RawRow, PAGE_BLOCK_TYPE};
