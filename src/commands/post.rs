//! Show a single post

use anyhow::Result;

use crate::helpers::display_date;
use crate::NotionBlog;

/// Print the post with `slug`, optionally followed by its content
pub async fn run(blog: &NotionBlog, slug: &str, with_content: bool, json: bool) -> Result<()> {
    let list = blog.post_list();
    list.fetch_posts(&blog.config).await;
    if let Some(e) = list.error() {
        return Err(e.into());
    }

    let Some(post) = list.post_by_slug(slug) else {
        anyhow::bail!("No published post with slug: {}", slug);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
    } else {
        println!("{}", post.title);
        println!("  slug:    {}", post.slug);
        println!("  date:    {}", display_date(post.date.as_deref()));
        println!("  tags:    {}", post.tags.join(", "));
        println!("  url:     {}", post.external_url);
        if let Some(cover) = &post.cover {
            println!("  cover:   {}", cover);
        }
        println!();
        println!("{}", post.summary);
    }

    if with_content {
        let blocks = blog.fetch_page(&post.page_id).await?;
        println!();
        print!("{}", super::page::outline(&blocks));
    }

    Ok(())
}
