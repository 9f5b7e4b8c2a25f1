//! Markup for the subscription list
//!
//! Pure functions from records to markup. The controller applies the result
//! to a [`ListContainer`](crate::surface::ListContainer).

use crate::config::MessageCatalog;
use crate::escape::{escape_html, escape_optional};
use crate::record::SubscriptionRecord;

/// CSS class carried by every delete control
pub const DELETE_CONTROL_CLASS: &str = "zotero-del-btn";

/// CSS classes of the alias tag
pub const ALIAS_TAG_CLASS: &str = "tag-label tag-blue";

/// One list row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub markup: String,
    /// Id carried by the row's delete control
    pub delete_id: Option<String>,
}

/// Result of rendering a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedList {
    /// Placeholder shown when there is nothing to list
    Empty { markup: String },
    Rows(Vec<RenderedRow>),
}

impl RenderedList {
    pub fn rows(&self) -> &[RenderedRow] {
        match self {
            RenderedList::Empty { .. } => &[],
            RenderedList::Rows(rows) => rows,
        }
    }

    /// All markup concatenated
    pub fn to_markup(&self) -> String {
        match self {
            RenderedList::Empty { markup } => markup.clone(),
            RenderedList::Rows(rows) => rows.iter().map(|r| r.markup.as_str()).collect(),
        }
    }
}

/// Render a snapshot; `None` and an empty slice both give the placeholder
pub fn render_list(
    items: Option<&[SubscriptionRecord]>,
    messages: &MessageCatalog,
) -> RenderedList {
    match items {
        Some(items) if !items.is_empty() => RenderedList::Rows(
            items
                .iter()
                .map(|record| render_row(record, messages))
                .collect(),
        ),
        _ => RenderedList::Empty {
            markup: render_placeholder(messages),
        },
    }
}

pub fn render_placeholder(messages: &MessageCatalog) -> String {
    format!(
        r#"<div style="color:{};">{}</div>"#,
        escape_html(&messages.placeholder_color),
        escape_html(&messages.empty_placeholder)
    )
}

/// Render one record: optional alias tag, query text, delete control
pub fn render_row(record: &SubscriptionRecord, messages: &MessageCatalog) -> RenderedRow {
    let tag = record
        .label()
        .map(|alias| format!(r#"<span class="{}">{}</span>"#, ALIAS_TAG_CLASS, escape_html(alias)))
        .unwrap_or_default();

    let delete_id = record.id.as_ref().map(|id| id.to_string());
    let data_attr = delete_id
        .as_deref()
        .map(|id| format!(r#" data-id="{}""#, escape_html(id)))
        .unwrap_or_default();

    let markup = format!(
        concat!(
            r#"<div class="subscription-row" style="display:flex;align-items:center;justify-content:space-between;margin-bottom:2px;">"#,
            r#"<span>{tag}{query}</span>"#,
            r#"<button{data_attr} class="{class}" style="border:none;background:none;color:{color};font-size:11px;cursor:pointer;">{label}</button>"#,
            r#"</div>"#
        ),
        tag = tag,
        query = escape_optional(record.zotero_id.as_deref()),
        data_attr = data_attr,
        class = DELETE_CONTROL_CLASS,
        color = escape_html(&messages.error_color),
        label = escape_html(&messages.delete_label),
    );

    RenderedRow { markup, delete_id }
}
