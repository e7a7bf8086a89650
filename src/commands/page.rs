//! Show the content tree of a page

use anyhow::Result;

use crate::content::{BlockType, ContentBlock};
use crate::NotionBlog;

/// Fetch a page and print its blocks
pub async fn run(blog: &NotionBlog, page_id: &str, json: bool) -> Result<()> {
    let blocks = blog.fetch_page(page_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&blocks)?);
    } else {
        print!("{}", outline(&blocks));
    }

    Ok(())
}

/// Indented outline of a block tree, one block per line
pub fn outline(blocks: &[ContentBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        write_block(&mut out, block, 0);
    }
    out
}

fn write_block(out: &mut String, block: &ContentBlock, depth: usize) {
    let indent = "  ".repeat(depth);
    let detail = match block.block_type {
        BlockType::Divider => String::new(),
        BlockType::Image => block.source.clone().unwrap_or_default(),
        BlockType::Code => match &block.language {
            Some(lang) => format!("({}) {}", lang, first_line(block.text.as_deref())),
            None => first_line(block.text.as_deref()),
        },
        BlockType::Callout => format!(
            "{} {}",
            block.icon.as_deref().unwrap_or(""),
            block.text.as_deref().unwrap_or("")
        )
        .trim()
        .to_string(),
        _ => block.text.clone().unwrap_or_default(),
    };

    if detail.is_empty() {
        out.push_str(&format!("{}{}\n", indent, block.block_type.as_str()));
    } else {
        out.push_str(&format!(
            "{}{}: {}\n",
            indent,
            block.block_type.as_str(),
            detail
        ));
    }

    for child in &block.children {
        write_block(out, child, depth + 1);
    }
}

fn first_line(text: Option<&str>) -> String {
    text.and_then(|t| t.lines().next()).unwrap_or("").to_string()
}
