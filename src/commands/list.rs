//! List posts in the terminal, loading more pages on demand

use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::content::Post;
use crate::helpers::post_url;
use crate::listing::{LoadOutcome, PostListPage};
use crate::Blog;

/// Show the first page, then one more page per Enter keypress
pub async fn run(blog: &Blog, all: bool) -> Result<()> {
    let source = blog.content_source()?;
    let mut page = PostListPage::load(source, blog.date_formatter(), &blog.config).await?;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    browse(blog, &mut page, all, stdin, &mut stdout).await
}

/// Drive the listing from `input`, writing entries to `out`
pub async fn browse<R, W>(
    blog: &Blog,
    page: &mut PostListPage,
    all: bool,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let i18n = &blog.i18n;
    writeln!(out, "{}:", i18n.get("list.heading"))?;
    if page.posts().is_empty() {
        writeln!(out, "  {}", i18n.get("no_posts"))?;
    }
    print_posts(blog, page.posts(), out)?;

    let mut lines = input.lines();

    while page.has_more() {
        if !all {
            write!(out, "{} ", i18n.get("list.prompt"))?;
            out.flush()?;

            match lines.next_line().await? {
                Some(line) if line.trim().eq_ignore_ascii_case("q") => return Ok(()),
                Some(_) => {}
                None => return Ok(()),
            }
        }

        let shown = page.posts().len();
        let cursor = page.state().next_page().map(str::to_string);
        match page.load_more().await {
            Ok(LoadOutcome::Appended { .. }) => {
                print_posts(blog, &page.posts()[shown..], out)?;
                if page.state().next_page() == cursor.as_deref() {
                    tracing::warn!(
                        "Content source returned the cursor it was asked for ({}), stopping",
                        cursor.as_deref().unwrap_or_default()
                    );
                    break;
                }
            }
            Ok(LoadOutcome::NoMorePages) | Ok(LoadOutcome::Stale) => {}
            Err(e) => {
                tracing::warn!("Failed to load more posts: {}", e);
                if all {
                    return Err(e.into());
                }
            }
        }
    }

    writeln!(out, "{}", i18n.get("list.exhausted"))?;
    Ok(())
}

fn print_posts<W: Write>(blog: &Blog, posts: &[Post], out: &mut W) -> Result<()> {
    for post in posts {
        writeln!(
            out,
            "  {} - {} [{}]",
            post.first_publication_date.as_deref().unwrap_or("-"),
            post.data.title,
            post_url(&blog.config, post.uid.as_deref())
        )?;
        if !post.data.subtitle.is_empty() || !post.data.author.is_empty() {
            writeln!(out, "      {} · {}", post.data.subtitle, post.data.author)?;
        }
    }
    Ok(())
}
