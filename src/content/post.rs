//! Post model and row normalization

use serde::{Deserialize, Serialize};

use super::raw::{PublishedFlag, RawRow};
use crate::helpers::{notion_page_url, sanitize_base_url, slugify, strip_notion_id};

/// Title used when a row has no usable `Name`
pub const UNTITLED_POST: &str = "Untitled Post";

/// Summary used when a row has neither `Summary` nor `Description`
pub const DEFAULT_SUMMARY: &str = "Click through to read the full article.";

/// String values of `Published` that count as published
const PUBLISHED_WORDS: [&str; 5] = ["true", "1", "yes", "y", "published"];

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Notion id, as received
    pub id: String,

    /// Id without separators
    pub page_id: String,

    /// URL-friendly name
    pub slug: String,

    /// Display title
    pub title: String,

    /// Short description for listings
    pub summary: String,

    /// Publication date, unparsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Canonical link to the full article
    pub external_url: String,

    /// Post tags, in source order
    #[serde(default)]
    pub tags: Vec<String>,

    /// Cover image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

/// Inputs visible to each field resolver
struct RowContext<'a> {
    row: &'a RawRow,
    title: &'a str,
    base_url: &'a str,
}

type Resolver = fn(&RowContext) -> Option<String>;

/// Slug candidates, highest precedence first
const SLUG_CHAIN: &[Resolver] = &[
    explicit_slug,
    slug_from_title,
    slug_from_id,
    placeholder_slug,
];

/// Link candidates, highest precedence first
const URL_CHAIN: &[Resolver] = &[explicit_url, site_url, notion_url];

fn resolve(chain: &[Resolver], ctx: &RowContext) -> Option<String> {
    chain
        .iter()
        .find_map(|resolver| resolver(ctx).filter(|value| !value.is_empty()))
}

fn trimmed(value: Option<&String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn explicit_slug(ctx: &RowContext) -> Option<String> {
    trimmed(ctx.row.slug.as_ref())
}

fn slug_from_title(ctx: &RowContext) -> Option<String> {
    Some(slugify(ctx.title))
}

fn slug_from_id(ctx: &RowContext) -> Option<String> {
    Some(strip_notion_id(&ctx.row.id))
}

/// Title and id both empty after slugifying
fn placeholder_slug(_ctx: &RowContext) -> Option<String> {
    Some(slugify(UNTITLED_POST))
}

fn explicit_url(ctx: &RowContext) -> Option<String> {
    trimmed(ctx.row.url.as_ref())
}

/// Only an explicit slug is trusted to exist on the site
fn site_url(ctx: &RowContext) -> Option<String> {
    if ctx.base_url.is_empty() {
        return None;
    }
    explicit_slug(ctx).map(|slug| format!("{}/{}", ctx.base_url, slug))
}

fn notion_url(ctx: &RowContext) -> Option<String> {
    Some(notion_page_url(&ctx.row.id))
}

/// Resolve the display title
pub fn resolve_title(row: &RawRow) -> String {
    trimmed(row.name.as_ref()).unwrap_or_else(|| UNTITLED_POST.to_string())
}

/// Resolve the summary: `Summary`, then `Description`, then the placeholder
pub fn resolve_summary(row: &RawRow) -> String {
    trimmed(row.summary.as_ref())
        .or_else(|| trimmed(row.description.as_ref()))
        .unwrap_or_else(|| DEFAULT_SUMMARY.to_string())
}

/// Normalize one decoded row into a [`Post`]
///
/// Never fails: every missing field falls back to something usable.
pub fn normalize_row(row: &RawRow, post_base_url: &str) -> Post {
    let title = resolve_title(row);
    let base_url = sanitize_base_url(post_base_url);
    let ctx = RowContext {
        row,
        title: &title,
        base_url: &base_url,
    };

    let page_id = strip_notion_id(&row.id);
    let slug = resolve(SLUG_CHAIN, &ctx).unwrap_or_else(|| slugify(UNTITLED_POST));
    let external_url = resolve(URL_CHAIN, &ctx).unwrap_or_else(|| notion_page_url(&row.id));

    Post {
        id: row.id.clone(),
        page_id,
        slug,
        summary: resolve_summary(row),
        date: row.date.clone(),
        external_url,
        tags: row.tags.clone().unwrap_or_default(),
        cover: row.cover.clone(),
        title,
    }
}

/// Coerce a `Published` value to a boolean
///
/// A missing or unrecognized value counts as published.
pub fn coerce_published(flag: &PublishedFlag) -> bool {
    match flag {
        PublishedFlag::Bool(b) => *b,
        PublishedFlag::Text(s) => {
            let normalized = s.trim().to_lowercase();
            PUBLISHED_WORDS.contains(&normalized.as_str())
        }
        PublishedFlag::Number(n) => *n != 0.0,
        PublishedFlag::Absent | PublishedFlag::Other => true,
    }
}

/// Whether a row should be shown
pub fn is_published(row: &RawRow) -> bool {
    coerce_published(&row.published)
}

/// Find a post by slug
pub fn find_by_slug<'a>(posts: &'a [Post], slug: &str) -> Option<&'a Post> {
    posts.iter().find(|p| p.slug == slug)
}
