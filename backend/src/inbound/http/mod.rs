//! HTTP inbound adapter serving the salvage pages.
//!
//! [`configure`] registers every page and form endpoint on an Actix
//! `ServiceConfig`; the caller supplies [`state::HttpState`] and
//! [`health::HealthState`] as app data.

pub mod error;
pub mod forms;
pub mod health;
pub mod pages;
pub mod render;
pub mod state;
pub mod submissions;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

use crate::domain::Error;

pub use error::ApiResult;

fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .error_handler(|err, _req| Error::invalid_request(format!("unreadable form: {err}")).into())
}

/// Register the page, form, and probe routes.
///
/// # Examples
/// ```no_run
/// use actix_web::App;
/// use salvage_ledger::inbound::http::{configure, pages};
///
/// let _app = App::new()
///     .configure(configure)
///     .default_service(actix_web::web::to(pages::not_found));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(form_config())
        .service(pages::index)
        .service(pages::main_page)
        .service(pages::item_types)
        .service(pages::add_salvage_form)
        .service(pages::view_salvage)
        .service(pages::add_salvage_type_form)
        .service(submissions::add_salvage)
        .service(submissions::add_salvage_type)
        .service(health::ready)
        .service(health::live);
}
