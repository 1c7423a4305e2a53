//! HTML rendering helpers shared by the page handlers.
//!
//! Pages are small enough that string assembly with `format!` stays readable;
//! every piece of external text passes through [`escape`] first.

use actix_web::HttpResponse;
use actix_web::http::{StatusCode, header};

use crate::domain::{Coins, Denomination};

const STYLE: &str = "\
body{font-family:sans-serif;margin:2em;}\
table{border-collapse:collapse;}\
td,th{border:1px solid #ccc;padding:.3em .6em;vertical-align:top;}\
.gw2Gold{color:#c79c0d;}.gw2Gold::after{content:'g';}\
.gw2Silver{color:#8a8a8a;}.gw2Silver::after{content:'s';}\
.gw2Copper{color:#a55d2f;}.gw2Copper::after{content:'c';}\
.unresolved{color:#a00;}";

/// Escape text for use in element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn denomination_class(denomination: Denomination) -> &'static str {
    match denomination {
        Denomination::Gold => "gw2Gold",
        Denomination::Silver => "gw2Silver",
        Denomination::Copper => "gw2Copper",
    }
}

/// Render an amount as one span per visible denomination.
pub fn coins(amount: Coins) -> String {
    amount
        .visible_parts()
        .into_iter()
        .map(|(denomination, value)| {
            format!(
                "<span class='{}'>{value}</span>",
                denomination_class(denomination)
            )
        })
        .collect()
}

/// Render an optional price, with a dash when there is none.
pub fn optional_coins(amount: Option<Coins>) -> String {
    amount.map_or_else(|| "&ndash;".to_owned(), coins)
}

/// Render a value held in hundredths as a two-decimal number.
pub fn hundredths(value: u64) -> String {
    format!("{}.{:02}", value / 100, value % 100)
}

/// Render an image tag, or nothing when no URL is known.
pub fn icon(url: Option<&str>, alt: &str) -> String {
    url.map_or_else(String::new, |url| {
        format!(
            "<img src=\"{}\" alt=\"{}\" width=\"32\" height=\"32\"> ",
            escape(url),
            escape(alt)
        )
    })
}

fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title>\
<style>{STYLE}</style></head><body>\n<nav><a href=\"/main\">Main</a> | \
<a href=\"/types\">Item types</a> | <a href=\"/addSalvage\">Add salvage</a> | \
<a href=\"/viewSalvage\">View salvage</a> | \
<a href=\"/addSalvageType\">Add salvage materials</a></nav>\n\
<h1>{title}</h1>\n{body}\n</body></html>\n",
        title = escape(title),
    )
}

/// A complete 200 page.
pub fn page(title: &str, body: &str) -> HttpResponse {
    page_with_status(StatusCode::OK, title, body)
}

/// A complete page with an explicit status.
pub fn page_with_status(status: StatusCode, title: &str, body: &str) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(document(title, body))
}

/// Body of an error page.
pub fn error_body(message: &str, trace_id: Option<&str>) -> String {
    let trace = trace_id.map_or_else(String::new, |trace_id| {
        format!("<p>Trace id: <code>{}</code></p>", escape(trace_id))
    });
    format!("<p>{}</p>{trace}", escape(message))
}

/// A 303 redirect after a successful form post.
pub fn see_other(location: &'static str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
