use paged::{Pager, ResponseWrapper, SCOPE_KEY};
use serde::Serialize;
use serde_json::Value;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Markdown,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl FieldRow {
    fn new(field: &str, value: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            value: value.into(),
        }
    }
}

/// JSON view of an extracted pager.
#[derive(Serialize)]
pub struct LinksReport {
    pub limit: u64,
    pub offset: u64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub scope: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_url: Option<String>,
    pub next_url: String,
}

#[derive(Serialize)]
pub struct FilterEntry {
    pub key: String,
    pub values: Vec<String>,
}

impl From<&Pager> for LinksReport {
    fn from(pager: &Pager) -> Self {
        Self {
            limit: pager.limit(),
            offset: pager.offset(),
            scope: pager.scope().to_string(),
            filters: pager
                .extra_filters()
                .iter()
                .filter(|(key, _)| *key != SCOPE_KEY)
                .map(|(key, values)| FilterEntry {
                    key: key.to_string(),
                    values: values.to_vec(),
                })
                .collect(),
            prev_url: pager.previous_url().map(str::to_string),
            next_url: pager.next_url().to_string(),
        }
    }
}

// -- Row builders --

fn build_link_rows(pager: &Pager) -> Vec<FieldRow> {
    let mut rows = vec![
        FieldRow::new("limit", pager.limit().to_string()),
        FieldRow::new("offset", pager.offset().to_string()),
    ];
    if !pager.scope().is_empty() {
        rows.push(FieldRow::new("scope", pager.scope()));
    }
    for (key, values) in pager.extra_filters().iter().filter(|(key, _)| *key != SCOPE_KEY) {
        rows.push(FieldRow::new(&format!("filter {}", key), values.join(", ")));
    }
    rows.push(FieldRow::new(
        "previous",
        pager.previous_url().unwrap_or("-"),
    ));
    rows.push(FieldRow::new("next", pager.next_url()));
    rows
}

fn build_envelope_rows(rsp: &ResponseWrapper<Value>) -> Vec<FieldRow> {
    let mut rows = vec![FieldRow::new("status", rsp.status.to_string())];
    if let Some(message) = &rsp.message {
        rows.push(FieldRow::new("message", message.as_str()));
    }
    if let Some(count) = rsp.count {
        rows.push(FieldRow::new("count", count.to_string()));
    }
    if let Some(prev) = &rsp.prev {
        rows.push(FieldRow::new("prev_url", prev.as_str()));
    }
    if let Some(next) = &rsp.next {
        rows.push(FieldRow::new("next_url", next.as_str()));
    }
    if let Some(data) = &rsp.data {
        rows.push(FieldRow::new("data", data.to_string()));
    }
    rows
}

// -- Table output --

pub fn print_links_table(pager: &Pager) {
    println!("{}", Table::new(build_link_rows(pager)));
}

pub fn print_envelope_table(rsp: &ResponseWrapper<Value>) {
    println!("{}", Table::new(build_envelope_rows(rsp)));
}

// -- Markdown output --

pub fn print_links_markdown(pager: &Pager) {
    let mut table = Table::new(build_link_rows(pager));
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_envelope_markdown(rsp: &ResponseWrapper<Value>) {
    let mut table = Table::new(build_envelope_rows(rsp));
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
