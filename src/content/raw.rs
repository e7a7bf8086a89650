//! Decoding of loosely-typed API payloads
//!
//! The proxy returns untyped JSON. Each record is validated here into a
//! typed intermediate shape before any normalization happens, so the
//! normalizers never have to guess at field types.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::DecodeError;

/// Type tag of the entry that is the document root
pub const PAGE_BLOCK_TYPE: &str = "page";

/// The `Published` column, kept with its JSON type
#[derive(Debug, Clone, PartialEq)]
pub enum PublishedFlag {
    Absent,
    Bool(bool),
    Text(String),
    Number(f64),
    /// Any other JSON type (null, list, object)
    Other,
}

impl From<Option<&Value>> for PublishedFlag {
    fn from(value: Option<&Value>) -> Self {
        match value {
            None => PublishedFlag::Absent,
            Some(Value::Bool(b)) => PublishedFlag::Bool(*b),
            Some(Value::String(s)) => PublishedFlag::Text(s.clone()),
            Some(Value::Number(n)) => n
                .as_f64()
                .map(PublishedFlag::Number)
                .unwrap_or(PublishedFlag::Other),
            Some(_) => PublishedFlag::Other,
        }
    }
}

/// One database row, with every optional column type-checked
///
/// A column holding the wrong JSON type is treated as absent.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub id: String,
    pub name: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub slug: Option<String>,
    /// `None` when the column is not a list; otherwise its string elements
    pub tags: Option<Vec<String>>,
    pub published: PublishedFlag,
    pub url: Option<String>,
    pub cover: Option<String>,
}

impl RawRow {
    /// Validate one element of the table payload
    ///
    /// Rows must be objects carrying a string `id`; the id may be empty.
    pub fn decode(value: &Value) -> Result<Self, DecodeError> {
        let obj = value.as_object().ok_or(DecodeError::NotAnObject)?;

        let id = match obj.get("id") {
            None => return Err(DecodeError::MissingField("id")),
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                return Err(DecodeError::WrongType {
                    field: "id",
                    expected: "a string",
                })
            }
        };
        let tags = obj.get("Tags").and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        });

        Ok(Self {
            id,
            name: string_field(obj, "Name"),
            summary: string_field(obj, "Summary"),
            description: string_field(obj, "Description"),
            date: string_field(obj, "Date"),
            slug: string_field(obj, "Slug"),
            tags,
            published: PublishedFlag::from(obj.get("Published")),
            url: string_field(obj, "url"),
            cover: string_field(obj, "Cover"),
        })
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// One block record (`entry.value` in the page payload)
#[derive(Debug, Clone, PartialEq)]
pub struct RawBlock {
    pub block_type: String,
    /// The `properties` object, or `Value::Null` when absent
    pub properties: Value,
    /// `None` when `content` is missing or not a list
    pub content: Option<Vec<String>>,
    /// The `format` object, or `Value::Null` when absent
    pub format: Value,
}

impl RawBlock {
    /// Validate one block-map entry of the shape `{"role": .., "value": {..}}`
    pub fn decode(entry: &Value) -> Result<Self, DecodeError> {
        let entry = entry.as_object().ok_or(DecodeError::NotAnObject)?;
        let value = entry
            .get("value")
            .ok_or(DecodeError::MissingField("value"))?
            .as_object()
            .ok_or(DecodeError::WrongType {
                field: "value",
                expected: "an object",
            })?;

        let block_type = match value.get("type") {
            None => return Err(DecodeError::MissingField("type")),
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                return Err(DecodeError::WrongType {
                    field: "type",
                    expected: "a string",
                })
            }
        };

        let content = value.get("content").and_then(Value::as_array).map(|ids| {
            ids.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        });

        Ok(Self {
            block_type,
            properties: object_or_null(value.get("properties")),
            content,
            format: object_or_null(value.get("format")),
        })
    }

    /// Whether this block is the page root rather than content
    pub fn is_page(&self) -> bool {
        self.block_type == PAGE_BLOCK_TYPE
    }
}

fn object_or_null(value: Option<&Value>) -> Value {
    match value {
        Some(v @ Value::Object(_)) => v.clone(),
        _ => Value::Null,
    }
}

/// A page payload: block id to decoded block, in payload order
///
/// Entries that fail to decode are kept as `Err` so lookups can tell a
/// malformed block from a missing one.
#[derive(Debug, Clone, Default)]
pub struct BlockMap {
    entries: IndexMap<String, Result<RawBlock, DecodeError>>,
}

impl BlockMap {
    /// Validate the top-level envelope of a page payload
    pub fn decode(payload: &Value) -> Result<Self, DecodeError> {
        let obj = payload.as_object().ok_or(DecodeError::NotAnObject)?;
        let entries = obj
            .iter()
            .map(|(id, entry)| (id.clone(), RawBlock::decode(entry)))
            .collect();
        Ok(Self { entries })
    }

    /// Decoded block for an id; `None` if missing or malformed
    pub fn get(&self, id: &str) -> Option<&RawBlock> {
        match self.entries.get(id)? {
            Ok(block) => Some(block),
            Err(e) => {
                tracing::debug!("Skipping malformed block {}: {}", id, e);
                None
            }
        }
    }

    /// First entry whose type is the page-root marker
    pub fn page_root(&self) -> Option<(&str, &RawBlock)> {
        self.entries.iter().find_map(|(id, entry)| match entry {
            Ok(block) if block.is_page() => Some((id.as_str(), block)),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
