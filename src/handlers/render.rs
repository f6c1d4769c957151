//! Text rendering of the list view and the edit form.

use crate::{
    models::{edit::EditForm, metadata::MetadataRecord, view_state::ViewState},
    services::display::{
        render_authors, render_feeds, render_title, split_publication, truncate,
    },
};
use std::fmt::Write;

const IMAGE_URL_MAX_LEN: usize = 50;

/// Header plus one block per record on the current page.
pub fn render_page(state: &ViewState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} metadata | page {}/{} | {} records",
        capitalize(state.set_label()),
        state.page,
        state.total_pages().max(1),
        state.records.len()
    );

    let visible = state.visible_slice();
    if visible.is_empty() {
        out.push_str("No metadata to show.\n");
        return out;
    }
    for record in visible {
        out.push_str(&render_record(record));
    }
    out
}

pub fn render_record(record: &MetadataRecord) -> String {
    let (date, time) = split_publication(&record.publication_date);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "#{:<5} {}  [{} {}]",
        record.id,
        render_title(&record.title),
        date,
        time
    );
    let _ = writeln!(out, "       feeds:   {}", render_feeds(&record.feeds).join(" | "));
    let _ = writeln!(out, "       authors: {}", render_authors(&record.authors));
    if !record.image_url.is_empty() {
        let _ = writeln!(
            out,
            "       image:   {}",
            truncate(&record.image_url, IMAGE_URL_MAX_LEN)
        );
    }
    out
}

pub fn render_edit_form(form: &EditForm) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Editing metadata #{}", form.id);
    let _ = writeln!(out, "  title:     {}", form.title);
    let _ = writeln!(out, "  date:      {}", form.publication_date);
    let _ = writeln!(out, "  time:      {}", form.publication_time);
    let _ = writeln!(out, "  image-url: {}", form.image_url);
    let _ = writeln!(out, "  feeds:     {}", form.feeds);
    let _ = writeln!(out, "  authors:   {}", form.authors);
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
