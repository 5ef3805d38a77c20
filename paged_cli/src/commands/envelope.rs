use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use paged::ResponseWrapper;
use serde_json::Value;

use crate::commands::Extraction;
use crate::output::{print_envelope_markdown, print_envelope_table, print_json, OutputFormat};

#[derive(Args)]
pub struct CollectionArgs {
    /// Request URL the collection was served for
    pub request: String,

    /// JSON file holding the items; reads stdin when omitted or "-"
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Reported item count; defaults to the length of the data array
    #[arg(long)]
    pub count: Option<u64>,
}

#[derive(Args)]
pub struct SuccessArgs {
    /// JSON file holding the resource; reads stdin when omitted or "-"
    #[arg(long)]
    pub data: Option<PathBuf>,
}

#[derive(Args)]
pub struct ErrorArgs {
    /// Message placed in the envelope
    pub message: String,
}

pub fn run_collection(
    args: &CollectionArgs,
    extraction: &Extraction,
    format: &OutputFormat,
) -> Result<()> {
    let pager = extraction.pager(&args.request)?;
    let data = read_data(args.data.as_deref())?;
    let count = collection_count(&data, args.count)?;
    print_envelope(&ResponseWrapper::collection(data, count, &pager), format);
    Ok(())
}

pub fn run_success(args: &SuccessArgs, format: &OutputFormat) -> Result<()> {
    let data = read_data(args.data.as_deref())?;
    print_envelope(&ResponseWrapper::success(data), format);
    Ok(())
}

pub fn run_error(args: &ErrorArgs, format: &OutputFormat) -> Result<()> {
    print_envelope(&ResponseWrapper::<Value>::error(args.message.as_str()), format);
    Ok(())
}

fn print_envelope(rsp: &ResponseWrapper<Value>, format: &OutputFormat) {
    match format {
        OutputFormat::Table => print_envelope_table(rsp),
        OutputFormat::Json => print_json(rsp),
        OutputFormat::Markdown => print_envelope_markdown(rsp),
    }
}

fn read_data(path: Option<&Path>) -> Result<Value> {
    let text = match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("read data file {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read data from stdin")?;
            buf
        }
    };
    serde_json::from_str(&text).context("data is not valid JSON")
}

fn collection_count(data: &Value, explicit: Option<u64>) -> Result<u64> {
    match (explicit, data) {
        (Some(count), _) => Ok(count),
        (None, Value::Array(items)) => Ok(items.len() as u64),
        (None, _) => bail!("collection data must be a JSON array, or pass --count"),
    }
}
