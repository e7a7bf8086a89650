//! Show the effective configuration

use anyhow::Result;

use crate::NotionBlog;

/// Print the configuration after the file and environment are merged
pub fn run(blog: &NotionBlog) -> Result<()> {
    println!("# {}", source_line(blog));
    print!("{}", serde_yaml::to_string(&blog.config)?);
    if blog.config.database_id().is_empty() {
        tracing::warn!(
            "No database id configured; set database_id in {} or {}",
            crate::CONFIG_FILE,
            crate::config::ENV_DATABASE_ID
        );
    }
    Ok(())
}

/// Where the file layer of the configuration came from
pub fn source_line(blog: &NotionBlog) -> String {
    let path = blog.base_dir.join(crate::CONFIG_FILE);
    if path.exists() {
        format!("loaded from {}", path.display())
    } else {
        format!("no {} in {}, using defaults", crate::CONFIG_FILE, blog.base_dir.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_source_line() {
        let dir = tempfile::tempdir().unwrap();
        let blog = NotionBlog::new(dir.path()).unwrap();
        assert_eq!(
            source_line(&blog),
            format!("no notion.yml in {}, using defaults", dir.path().display())
        );

        let path = dir.path().join(crate::CONFIG_FILE);
        fs::write(&path, "database_id: db-1\n").unwrap();
        let blog = NotionBlog::new(dir.path()).unwrap();
        assert_eq!(source_line(&blog), format!("loaded from {}", path.display()));
    }
}
