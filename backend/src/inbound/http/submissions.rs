//! Form submission endpoints.
//!
//! ```text
//! POST /lib/addSalvage       record one salvage, then 303 to /viewSalvage
//! POST /lib/addSalvageType   register known materials, then 303 to /addSalvage
//! ```

use actix_web::{HttpResponse, post, web};
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::{SalvageForm, known_materials_from_pairs};
use crate::inbound::http::render;
use crate::inbound::http::state::HttpState;

#[post("/lib/addSalvage")]
pub async fn add_salvage(
    state: web::Data<HttpState>,
    form: web::Form<SalvageForm>,
) -> ApiResult<HttpResponse> {
    let submission = form.into_inner().into_submission()?;
    state.salvage.record_salvage(submission).await?;
    Ok(render::see_other("/viewSalvage"))
}

#[post("/lib/addSalvageType")]
pub async fn add_salvage_type(
    state: web::Data<HttpState>,
    form: web::Form<Vec<(String, String)>>,
) -> ApiResult<HttpResponse> {
    let materials = known_materials_from_pairs(form.into_inner())?;
    state.materials.register_materials(materials).await?;
    Ok(render::see_other("/addSalvage"))
}

#[cfg(test)]
#[path = "submissions_tests.rs"]
mod tests;
