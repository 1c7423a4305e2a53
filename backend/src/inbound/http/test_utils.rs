//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::{App, test, web};

use crate::Trace;
use crate::domain::ports::{
    MockItemCatalogueQuery, MockMaterialCatalogueCommand, MockMaterialCatalogueQuery,
    MockSalvageCommand, MockSalvageQuery,
};
use crate::inbound::http::health::HealthState;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::inbound::http::{configure, pages};

/// One mock per driving port. Unconfigured mocks panic when called, so a
/// test only sets expectations for the ports its handler should touch.
#[derive(Default)]
pub struct MockPorts {
    pub salvage: MockSalvageCommand,
    pub salvage_query: MockSalvageQuery,
    pub materials: MockMaterialCatalogueCommand,
    pub materials_query: MockMaterialCatalogueQuery,
    pub items: MockItemCatalogueQuery,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            salvage: Arc::new(self.salvage),
            salvage_query: Arc::new(self.salvage_query),
            materials: Arc::new(self.materials),
            materials_query: Arc::new(self.materials_query),
            items: Arc::new(self.items),
        })
    }
}

/// Run one request through the fully configured app.
pub async fn send(state: HttpState, request: test::TestRequest) -> ServiceResponse {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::Data::new(HealthState::new()))
            .wrap(Trace)
            .configure(configure)
            .default_service(web::to(pages::not_found)),
    )
    .await;
    test::call_service(&app, request.to_request()).await
}

/// Read a response body as UTF-8 text.
pub async fn body_text(response: ServiceResponse) -> String {
    let bytes = test::read_body(response).await;
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}
