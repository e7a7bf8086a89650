//! List published posts

use anyhow::Result;

use crate::content::Post;
use crate::helpers::display_date;
use crate::NotionBlog;

/// List published posts, optionally restricted to one tag
pub async fn run(blog: &NotionBlog, tag: Option<&str>, json: bool) -> Result<()> {
    let posts = blog.fetch_posts().await?;
    let posts: Vec<Post> = match tag {
        Some(tag) => posts
            .into_iter()
            .filter(|p| p.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
            .collect(),
        None => posts,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    println!("Posts ({}):", posts.len());
    for post in &posts {
        println!("{}", format_line(post));
    }

    Ok(())
}

/// One listing line: date, title, slug and link
pub fn format_line(post: &Post) -> String {
    let date = display_date(post.date.as_deref());
    let date = if date.is_empty() { "----------".to_string() } else { date };
    format!(
        "  {} - {} [{}] {}",
        date, post.title, post.slug, post.external_url
    )
}
