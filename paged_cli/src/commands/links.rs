use anyhow::Result;
use clap::Args;

use crate::commands::Extraction;
use crate::output::{print_json, print_links_markdown, print_links_table, LinksReport, OutputFormat};

#[derive(Args)]
pub struct LinksArgs {
    /// Request URL, absolute or a path with query (e.g. "/items?limit=10&offset=20")
    pub request: String,
}

pub fn run(args: &LinksArgs, extraction: &Extraction, format: &OutputFormat) -> Result<()> {
    let pager = extraction.pager(&args.request)?;

    match format {
        OutputFormat::Table => print_links_table(&pager),
        OutputFormat::Json => print_json(&LinksReport::from(&pager)),
        OutputFormat::Markdown => print_links_markdown(&pager),
    }

    Ok(())
}
