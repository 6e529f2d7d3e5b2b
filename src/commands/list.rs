//! Generic entity listing command

use crate::app::App;
use crate::error::{MsqAdminError, Result};
use crate::query::{ListParams, Page};
use chrono::NaiveDate;
use colored::Colorize;
use prettytable::{Cell, Row, Table};
use serde::Serialize;
use serde_json::Value;

/// Flags collected from the `list` command line
#[derive(Debug, Default)]
pub struct ListFlags {
    /// Maximum records per page
    pub limit: Option<u32>,
    /// Page number
    pub page: Option<u32>,
    /// Pagination cursor
    pub last_id: Option<String>,
    /// Free-text search key
    pub search: Option<String>,
    /// Status filter
    pub status: Option<String>,
    /// Date range start, `YYYY-MM-DD`
    pub from: Option<String>,
    /// Date range end, `YYYY-MM-DD`
    pub to: Option<String>,
    /// Emit raw JSON instead of a table
    pub json: bool,
}

impl ListFlags {
    fn to_params(&self) -> Result<ListParams> {
        let mut params = ListParams {
            limit: self.limit,
            page: self.page,
            last_id: self.last_id.clone(),
            search_key: self.search.clone(),
            status: self.status.clone(),
            ..ListParams::default()
        };
        params.date_from = self.from.as_deref().map(parse_date).transpose()?;
        params.date_to = self.to.as_deref().map(parse_date).transpose()?;
        Ok(params)
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| MsqAdminError::Config(format!("invalid date '{}': {}", value, e)).into())
}

/// Run the `list` command for the named entity
pub async fn run_list(app: &App, entity: &str, flags: &ListFlags) -> Result<()> {
    let params = flags.to_params()?;
    let resources = &app.resources;

    match entity {
        "news" => render(app, flags, resources.news.list(&params).await?),
        "communities" => render(app, flags, resources.communities.list(&params).await?),
        "inquiries" => render(app, flags, resources.inquiries.list(&params).await?),
        "notifications" => render(app, flags, resources.notifications.list(&params).await?),
        "popups" => render(app, flags, resources.popups.list(&params).await?),
        "reserves" => render(app, flags, resources.reserves.list(&params).await?),
        "txid-history" => render(app, flags, resources.txid_history.list(&params).await?),
        "user-education" => render(app, flags, resources.user_education.list(&params).await?),
        "bulk-transfers" => render(app, flags, resources.bulk_transfers.list(&params).await?),
        "deposits" => render(app, flags, resources.deposits.list(&params).await?),
        other => Err(MsqAdminError::Config(format!("unknown entity '{}'", other)).into()),
    }
}

fn render<T: Serialize>(app: &App, flags: &ListFlags, page: Page<T>) -> Result<()> {
    if flags.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    if page.data.is_empty() {
        println!("{}", app.locale.text("list.empty").yellow());
        return Ok(());
    }

    let rows: Vec<Value> = page
        .data
        .iter()
        .map(serde_json::to_value)
        .collect::<std::result::Result<_, _>>()?;
    print_table(&rows);

    let mut footer = Vec::new();
    if let Some(total) = page.nb_total_elements {
        footer.push(format!("total: {}", total));
    }
    if page.has_next {
        match &page.last_id {
            Some(last_id) => footer.push(format!("more available (--last-id {})", last_id)),
            None => footer.push("more available (next --page)".to_string()),
        }
    }
    if !footer.is_empty() {
        println!("{}", footer.join(", ").dimmed());
    }
    Ok(())
}

/// Print JSON objects as a table, columns taken from the first row
///
/// Column order follows the serialized key order (alphabetical for JSON
/// maps), which keeps output deterministic across runs.
fn print_table(rows: &[Value]) {
    let headers: Vec<String> = match rows.first().and_then(Value::as_object) {
        Some(first) => first.keys().cloned().collect(),
        None => return,
    };

    let mut table = Table::new();
    table.add_row(Row::new(headers.iter().map(|h| Cell::new(h)).collect()));
    for row in rows {
        let cells = headers
            .iter()
            .map(|h| Cell::new(&display_value(row.get(h))))
            .collect();
        table.add_row(Row::new(cells));
    }
    table.printstd();
}

fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
