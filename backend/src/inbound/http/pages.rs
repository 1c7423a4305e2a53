//! Read-only HTML pages.
//!
//! ```text
//! GET /                 navigation
//! GET /main             navigation
//! GET /types            item category tree
//! GET /addSalvage       salvage entry form
//! GET /viewSalvage      aggregated salvage view
//! GET /addSalvageType   crafting material picker
//! ```

use actix_web::{HttpResponse, get, web};

use crate::domain::{
    Error, ItemCategory, ItemData, ItemType, KnownMaterial, SalvageEntryView, SalvageOverview,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::render::{self, escape};
use crate::inbound::http::state::HttpState;

fn navigation() -> HttpResponse {
    render::page(
        "Salvage ledger",
        "<p>Record what salvaging items yields and compare the value of the \
materials against trading post prices.</p>\n<ul>\
<li><a href=\"/types\">Browse item types</a></li>\
<li><a href=\"/addSalvageType\">Choose salvage materials</a></li>\
<li><a href=\"/addSalvage\">Record a salvage</a></li>\
<li><a href=\"/viewSalvage\">View salvage results</a></li></ul>",
    )
}

#[get("/")]
pub async fn index() -> HttpResponse {
    navigation()
}

#[get("/main")]
pub async fn main_page() -> HttpResponse {
    navigation()
}

fn types_body(types: &[ItemType]) -> String {
    if types.is_empty() {
        return "<p>The item source reported no types.</p>".to_owned();
    }
    let items: String = types
        .iter()
        .map(|item_type| {
            let subtypes = if item_type.subtypes.is_empty() {
                String::new()
            } else {
                let entries: String = item_type
                    .subtypes
                    .iter()
                    .map(|sub| format!("<li>{} <small>({})</small></li>", escape(&sub.name), sub.id))
                    .collect();
                format!("<ul>{entries}</ul>")
            };
            format!(
                "<li>{} <small>({})</small>{subtypes}</li>\n",
                escape(&item_type.name),
                item_type.id
            )
        })
        .collect();
    format!("<ul>\n{items}</ul>")
}

#[get("/types")]
pub async fn item_types(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let types = state.items.item_types().await?;
    Ok(render::page("Item types", &types_body(&types)))
}

fn material_select(name: &str, materials: &[KnownMaterial]) -> String {
    let options: String = materials
        .iter()
        .map(|material| {
            format!(
                "<option value=\"{}\">{}</option>",
                material.id(),
                escape(material.name())
            )
        })
        .collect();
    format!(
        "<select name=\"{name}\" id=\"{name}\"><option value=\"\">(none)</option>{options}</select>"
    )
}

fn add_salvage_body(materials: &[KnownMaterial]) -> String {
    let mut body = String::new();
    if materials.is_empty() {
        body.push_str(
            "<p>No salvage materials are known yet. \
<a href=\"/addSalvageType\">Choose some</a> first.</p>\n",
        );
    }
    body.push_str(&format!(
        "<form method=\"post\" action=\"/lib/addSalvage\">\n\
<p><label for=\"ID\">Item id</label> <input type=\"number\" min=\"1\" name=\"ID\" id=\"ID\" required></p>\n\
<p><label for=\"SalvageCount\">Times salvaged</label> \
<input type=\"number\" min=\"1\" name=\"SalvageCount\" id=\"SalvageCount\" value=\"1\" required></p>\n\
<p>{m1} <input type=\"number\" min=\"1\" name=\"material1Count\" aria-label=\"material 1 count\"></p>\n\
<p>{m2} <input type=\"number\" min=\"1\" name=\"material2Count\" aria-label=\"material 2 count\"></p>\n\
<p><button type=\"submit\">Record</button></p>\n</form>",
        m1 = material_select("material1", materials),
        m2 = material_select("material2", materials),
    ));
    body
}

#[get("/addSalvage")]
pub async fn add_salvage_form(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let materials = state.materials_query.list_materials().await?;
    Ok(render::page("Add salvage", &add_salvage_body(&materials)))
}

fn item_cell(item: &ItemData) -> String {
    format!(
        "{}{}",
        render::icon(item.image_url.as_deref(), &item.name),
        escape(&item.name)
    )
}

fn entry_rows(entry: &SalvageEntryView) -> String {
    let span = entry.yields.len().max(1);
    let mut rows = format!(
        "<tr><td rowspan=\"{span}\">{item}</td><td rowspan=\"{span}\">{count}</td>",
        item = item_cell(&entry.item),
        count = entry.salvage_count,
    );
    let total = render::optional_coins(entry.value_per_salvage());
    if entry.yields.is_empty() {
        rows.push_str("<td colspan=\"4\">no materials recorded</td>");
    }
    for (position, material_yield) in entry.yields.iter().enumerate() {
        if position > 0 {
            rows.push_str("</tr>\n<tr>");
        }
        rows.push_str(&format!(
            "<td>{}</td><td>{}</td><td>{}</td><td>{}</td>",
            item_cell(&material_yield.material),
            material_yield.count,
            render::hundredths(material_yield.per_salvage_hundredths()),
            render::optional_coins(material_yield.value_per_salvage()),
        ));
        if position == 0 {
            rows.push_str(&format!("<td rowspan=\"{span}\">{total}</td>"));
        }
    }
    if entry.yields.is_empty() {
        rows.push_str(&format!("<td>{total}</td>"));
    }
    rows.push_str("</tr>\n");
    rows
}

fn overview_body(overview: &SalvageOverview) -> String {
    let mut body = String::new();
    if overview.entries.is_empty() {
        body.push_str("<p>No salvage recorded yet. <a href=\"/addSalvage\">Add some</a>.</p>\n");
    } else {
        body.push_str(
            "<table>\n<tr><th>Item</th><th>Salvaged</th><th>Material</th><th>Obtained</th>\
<th>Per salvage</th><th>Value per salvage</th><th>Total per salvage</th></tr>\n",
        );
        for entry in &overview.entries {
            body.push_str(&entry_rows(entry));
        }
        body.push_str("</table>\n");
    }

    if !overview.materials.is_empty() {
        body.push_str(
            "<h2>Material prices</h2>\n<table>\n<tr><th>Material</th><th>Sell listing</th>\
<th>Buy order</th></tr>\n",
        );
        for material in &overview.materials {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                item_cell(material),
                render::optional_coins(material.pricing.lowest_listing),
                render::optional_coins(material.pricing.best_offer),
            ));
        }
        body.push_str("</table>\n");
    }

    if !overview.unresolved.is_empty() {
        let ids = overview
            .unresolved
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        body.push_str(&format!(
            "<p class=\"unresolved\">Item data could not be loaded for: {ids}</p>\n"
        ));
    }
    body
}

#[get("/viewSalvage")]
pub async fn view_salvage(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let overview = state.salvage_query.salvage_overview().await?;
    Ok(render::page("Salvage results", &overview_body(&overview)))
}

fn add_salvage_type_body(items: &[ItemData], reported: usize) -> String {
    let checkboxes: String = items
        .iter()
        .map(|item| {
            format!(
                "<li><label><input type=\"checkbox\" name=\"{id}\" value=\"{name}\"> {cell}</label></li>\n",
                id = item.id,
                name = escape(&item.name),
                cell = item_cell(item),
            )
        })
        .collect();
    format!(
        "<p>Tick the materials to offer on the salvage form ({} of {reported} listed).</p>\n\
<form method=\"post\" action=\"/lib/addSalvageType\">\n<ul>\n{checkboxes}</ul>\n\
<p><button type=\"submit\">Save materials</button></p>\n</form>",
        items.len()
    )
}

#[get("/addSalvageType")]
pub async fn add_salvage_type_form(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let listing = state
        .items
        .category_items(ItemCategory::CRAFTING_MATERIAL)
        .await?;
    Ok(render::page(
        "Add salvage materials",
        &add_salvage_type_body(&listing.items, listing.reported_count),
    ))
}

/// Fallback for unknown paths.
pub async fn not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found("No page lives at this address."))
}

#[cfg(test)]
#[path = "pages_tests.rs"]
mod tests;
