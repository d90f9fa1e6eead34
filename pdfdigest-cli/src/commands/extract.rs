//! `pdfdigest extract` - run the extraction pipeline on a local PDF

use anyhow::{bail, Result};
use pdfdigest_core::pdf;
use std::path::PathBuf;

pub fn run(file: PathBuf, json: bool) -> Result<()> {
    if !file.exists() {
        bail!("File not found: {}", file.display());
    }

    let bundle = pdf::extract(&file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
        return Ok(());
    }

    println!("File:      {}", file.display());
    if let Some(title) = &bundle.metadata.title {
        println!("Title:     {title}");
    }
    if let Some(author) = &bundle.metadata.author {
        println!("Author:    {author}");
    }
    println!("Pages:     {}", bundle.metadata.page_count);
    println!("With text: {}", bundle.page_count());
    println!("Characters: {}", bundle.full_text.len());

    for page in &bundle.pages {
        let preview: String = page.text.chars().take(60).collect();
        println!("  p{:>4}: {preview}", page.page);
    }

    Ok(())
}
