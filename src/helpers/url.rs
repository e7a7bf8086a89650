//! URL and identifier helpers

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left untouched when a value is placed in a path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Host used for links when a post has neither a URL nor a site slug
pub const NOTION_PAGE_HOST: &str = "https://www.notion.so";

/// Trim whitespace and trailing slashes from a configured base URL
///
/// # Examples
/// ```ignore
/// sanitize_base_url("https://blog.example.com/") // -> "https://blog.example.com"
/// ```
pub fn sanitize_base_url(value: &str) -> String {
    value.trim().trim_end_matches('/').to_string()
}

/// Remove the hyphen separators from a Notion id
pub fn strip_notion_id(id: &str) -> String {
    id.replace('-', "").trim().to_string()
}

/// Percent-encode a value for use as a single path segment
pub fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

/// Endpoint returning the rows of a database
pub fn table_url(api_base_url: &str, database_id: &str) -> String {
    format!(
        "{}/v1/table/{}",
        sanitize_base_url(api_base_url),
        encode_segment(database_id)
    )
}

/// Endpoint returning the block map of a page
pub fn page_url(api_base_url: &str, page_id: &str) -> String {
    format!(
        "{}/v1/page/{}",
        sanitize_base_url(api_base_url),
        encode_segment(page_id)
    )
}

/// Public Notion link for a raw page id
pub fn notion_page_url(id: &str) -> String {
    format!("{}/{}", NOTION_PAGE_HOST, id.replace('-', ""))
}
