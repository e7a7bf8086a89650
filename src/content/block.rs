//! Content blocks and block-map normalization

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

use super::raw::{BlockMap, RawBlock};
use crate::helpers::{extract_plain_text, extract_title};

/// Renderable block kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Paragraph,
    #[serde(rename = "heading_1")]
    Heading1,
    #[serde(rename = "heading_2")]
    Heading2,
    #[serde(rename = "heading_3")]
    Heading3,
    Quote,
    Code,
    Image,
    Divider,
    Callout,
    BulletedListItem,
    NumberedListItem,
    /// A source type this crate does not know how to render
    Unsupported,
}

impl BlockType {
    /// Map a Notion type tag (legacy or current name) to a block type
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "text" | "paragraph" => BlockType::Paragraph,
            "header" | "heading_1" => BlockType::Heading1,
            "sub_header" | "heading_2" => BlockType::Heading2,
            "sub_sub_header" | "heading_3" => BlockType::Heading3,
            "quote" => BlockType::Quote,
            "code" => BlockType::Code,
            "image" => BlockType::Image,
            "divider" => BlockType::Divider,
            "callout" => BlockType::Callout,
            "bulleted_list" | "bulleted_list_item" => BlockType::BulletedListItem,
            "numbered_list" | "numbered_list_item" => BlockType::NumberedListItem,
            _ => BlockType::Unsupported,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Paragraph => "paragraph",
            BlockType::Heading1 => "heading_1",
            BlockType::Heading2 => "heading_2",
            BlockType::Heading3 => "heading_3",
            BlockType::Quote => "quote",
            BlockType::Code => "code",
            BlockType::Image => "image",
            BlockType::Divider => "divider",
            BlockType::Callout => "callout",
            BlockType::BulletedListItem => "bulleted_list_item",
            BlockType::NumberedListItem => "numbered_list_item",
            BlockType::Unsupported => "unsupported",
        }
    }
}

/// A normalized content block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: String,

    #[serde(rename = "type")]
    pub block_type: BlockType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Code language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Code or image caption
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    /// Image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Callout icon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default)]
    pub children: Vec<ContentBlock>,
}

impl ContentBlock {
    fn new(id: &str, block_type: BlockType, children: Vec<ContentBlock>) -> Self {
        Self {
            id: id.to_string(),
            block_type,
            text: None,
            language: None,
            caption: None,
            source: None,
            icon: None,
            children,
        }
    }

    /// Depth of the tree rooted at this block (a leaf has depth 1)
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(ContentBlock::depth).max().unwrap_or(0)
    }
}

/// Structural problems found while walking a block map
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BlockError {
    #[error("block {0} is its own ancestor")]
    Cycle(String),
}

/// Normalize the block `block_id` and its descendants
///
/// Returns `Ok(None)` when the id is missing or malformed, or names a page
/// root: a page is the traversal root, never content.
pub fn normalize_block(block_id: &str, map: &BlockMap) -> Result<Option<ContentBlock>, BlockError> {
    let mut ancestors = HashSet::new();
    normalize_inner(block_id, map, &mut ancestors)
}

/// Normalize a list of sibling ids, dropping the ones that yield nothing
pub fn normalize_children(ids: &[String], map: &BlockMap) -> Result<Vec<ContentBlock>, BlockError> {
    let mut ancestors = HashSet::new();
    collect_children(ids, map, &mut ancestors)
}

fn collect_children(
    ids: &[String],
    map: &BlockMap,
    ancestors: &mut HashSet<String>,
) -> Result<Vec<ContentBlock>, BlockError> {
    let mut blocks = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(block) = normalize_inner(id, map, ancestors)? {
            blocks.push(block);
        }
    }
    Ok(blocks)
}

fn normalize_inner(
    block_id: &str,
    map: &BlockMap,
    ancestors: &mut HashSet<String>,
) -> Result<Option<ContentBlock>, BlockError> {
    let Some(raw) = map.get(block_id) else {
        return Ok(None);
    };
    if raw.is_page() {
        return Ok(None);
    }
    if !ancestors.insert(block_id.to_string()) {
        return Err(BlockError::Cycle(block_id.to_string()));
    }

    let children = match raw.content.as_deref() {
        Some(ids) => collect_children(ids, map, ancestors),
        None => Ok(Vec::new()),
    };
    ancestors.remove(block_id);

    Ok(Some(build_block(block_id, raw, children?)))
}

fn build_block(id: &str, raw: &RawBlock, children: Vec<ContentBlock>) -> ContentBlock {
    let block_type = BlockType::from_tag(&raw.block_type);
    let props = &raw.properties;
    let format = &raw.format;
    let mut block = ContentBlock::new(id, block_type, children);

    match block_type {
        BlockType::Paragraph
        | BlockType::Heading1
        | BlockType::Heading2
        | BlockType::Heading3
        | BlockType::Quote
        | BlockType::BulletedListItem
        | BlockType::NumberedListItem => {
            block.text = Some(extract_title(props));
        }
        BlockType::Callout => {
            block.text = Some(extract_title(props));
            block.icon = string_at(format, "page_icon");
        }
        BlockType::Code => {
            block.text = Some(extract_title(props));
            block.caption = Some(extract_plain_text(props, "caption"));
            block.language = resolve_language(props, format);
        }
        BlockType::Image => {
            block.source = Some(resolve_image_source(props, format));
            block.caption = Some(extract_plain_text(props, "caption"));
        }
        BlockType::Divider => {}
        BlockType::Unsupported => {
            let text = extract_title(props);
            block.text = Some(if text.is_empty() {
                format!("Unsupported block type: {}", raw.block_type)
            } else {
                text
            });
        }
    }

    block
}

fn string_at(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

type SourceResolver = fn(&Value, &Value) -> Option<String>;

/// Language candidates, highest precedence first
const LANGUAGE_CHAIN: &[SourceResolver] = &[language_from_properties, language_from_format];

/// Image source candidates, highest precedence first
const IMAGE_SOURCE_CHAIN: &[SourceResolver] = &[
    image_from_display_source,
    image_from_source_string,
    image_from_source_text,
];

fn first_non_empty(chain: &[SourceResolver], props: &Value, format: &Value) -> Option<String> {
    chain
        .iter()
        .find_map(|resolver| resolver(props, format).filter(|s| !s.is_empty()))
}

/// `properties.language` is rich text; only the first slot of each segment counts
fn language_from_properties(props: &Value, _format: &Value) -> Option<String> {
    let segments = props.get("language")?.as_array()?;
    Some(
        segments
            .iter()
            .filter_map(|segment| segment.as_array()?.first()?.as_str())
            .collect(),
    )
}

fn language_from_format(_props: &Value, format: &Value) -> Option<String> {
    string_at(format, "code_lang")
}

fn image_from_display_source(_props: &Value, format: &Value) -> Option<String> {
    string_at(format, "display_source")
}

fn image_from_source_string(props: &Value, _format: &Value) -> Option<String> {
    string_at(props, "source")
}

fn image_from_source_text(props: &Value, _format: &Value) -> Option<String> {
    Some(extract_plain_text(props, "source"))
}

fn resolve_language(props: &Value, format: &Value) -> Option<String> {
    first_non_empty(LANGUAGE_CHAIN, props, format)
}

fn resolve_image_source(props: &Value, format: &Value) -> String {
    first_non_empty(IMAGE_SOURCE_CHAIN, props, format).unwrap_or_default()
}
