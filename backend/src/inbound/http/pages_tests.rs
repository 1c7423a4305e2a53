//! Handler tests for the HTML pages.

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use rstest::rstest;

use super::*;
use crate::domain::{
    Coins, ItemId, ItemListing, ItemPricing, ItemSubType, MaterialYield, TRACE_ID_HEADER,
};
use crate::inbound::http::test_utils::{MockPorts, body_text, send};

fn id(raw: u32) -> ItemId {
    ItemId::new(raw).expect("valid id")
}

fn priced(raw: u32, name: &str, listing: Option<u64>) -> ItemData {
    ItemData::new(id(raw), name).with_pricing(ItemPricing {
        lowest_listing: listing.map(Coins::from_copper),
        ..ItemPricing::default()
    })
}

#[rstest]
#[case("/")]
#[case("/main")]
#[actix_web::test]
async fn navigation_links_every_page(#[case] uri: &str) {
    let res = send(MockPorts::default().into_state(), TestRequest::get().uri(uri)).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(res).await;
    for link in ["/types", "/addSalvage", "/viewSalvage", "/addSalvageType"] {
        assert!(body.contains(&format!("href=\"{link}\"")), "missing {link}");
    }
}

#[rstest]
#[actix_web::test]
async fn types_page_lists_subtypes() {
    let mut ports = MockPorts::default();
    ports.items.expect_item_types().times(1).returning(|| {
        Ok(vec![ItemType {
            id: 18,
            name: "Weapon".to_owned(),
            subtypes: vec![ItemSubType {
                id: 6,
                name: "Greatsword".to_owned(),
            }],
        }])
    });

    let res = send(ports.into_state(), TestRequest::get().uri("/types")).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(res).await;
    assert!(body.contains(
        "<li>Weapon <small>(18)</small><ul><li>Greatsword <small>(6)</small></li></ul></li>"
    ));
}

#[rstest]
#[actix_web::test]
async fn add_salvage_form_offers_known_materials() {
    let mut ports = MockPorts::default();
    ports.materials_query.expect_list_materials().returning(|| {
        Ok(vec![
            KnownMaterial::new(id(19_721), "Glob of <Ectoplasm>", None).expect("valid"),
        ])
    });

    let res = send(ports.into_state(), TestRequest::get().uri("/addSalvage")).await;

    let body = body_text(res).await;
    assert!(body.contains("name=\"ID\""));
    assert!(body.contains("name=\"SalvageCount\""));
    assert!(body.contains("name=\"material2Count\""));
    assert!(body.contains("<option value=\"19721\">Glob of &lt;Ectoplasm&gt;</option>"));
}

#[rstest]
#[actix_web::test]
async fn view_salvage_renders_yields_and_unresolved_ids() {
    let mut ports = MockPorts::default();
    ports.salvage_query.expect_salvage_overview().returning(|| {
        let ecto = priced(19_721, "Glob of Ectoplasm", Some(2_611));
        Ok(SalvageOverview {
            entries: vec![SalvageEntryView {
                item: priced(100, "Rare Sword", None),
                salvage_count: 2,
                yields: vec![MaterialYield {
                    material: ecto.clone(),
                    count: 3,
                    salvage_count: 2,
                }],
            }],
            materials: vec![ecto],
            unresolved: vec![id(555)],
        })
    });

    let res = send(ports.into_state(), TestRequest::get().uri("/viewSalvage")).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(res).await;
    assert!(body.contains("Rare Sword"));
    assert!(body.contains("1.50"), "per-salvage yield missing: {body}");
    // 2611 * 3 / 2 = 3916 copper
    assert!(body.contains("<span class='gw2Silver'>39</span><span class='gw2Copper'>16</span>"));
    assert!(body.contains("555"));
}

#[rstest]
#[actix_web::test]
async fn view_salvage_with_nothing_recorded_says_so() {
    let mut ports = MockPorts::default();
    ports
        .salvage_query
        .expect_salvage_overview()
        .returning(|| Ok(SalvageOverview::default()));

    let res = send(ports.into_state(), TestRequest::get().uri("/viewSalvage")).await;

    assert!(body_text(res).await.contains("No salvage recorded yet"));
}

#[rstest]
#[actix_web::test]
async fn add_salvage_type_lists_crafting_materials() {
    let mut ports = MockPorts::default();
    ports
        .items
        .expect_category_items()
        .withf(|category| *category == ItemCategory::CRAFTING_MATERIAL)
        .returning(|_| {
            Ok(ItemListing {
                reported_count: 1,
                items: vec![priced(24_277, "Pile of Crystalline Dust", None)],
            })
        });

    let res = send(ports.into_state(), TestRequest::get().uri("/addSalvageType")).await;

    let body = body_text(res).await;
    assert!(body.contains("action=\"/lib/addSalvageType\""));
    assert!(body.contains("name=\"24277\" value=\"Pile of Crystalline Dust\""));
}

#[rstest]
#[actix_web::test]
async fn store_failures_render_a_redacted_500_with_trace_id() {
    let mut ports = MockPorts::default();
    ports
        .salvage_query
        .expect_salvage_overview()
        .returning(|| Err(Error::internal("salvage store error: connection refused")));

    let res = send(ports.into_state(), TestRequest::get().uri("/viewSalvage")).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let trace_id = res
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace id header")
        .to_str()
        .expect("ascii")
        .to_owned();
    let body = body_text(res).await;
    assert!(body.contains(&trace_id));
    assert!(!body.contains("connection refused"));
}

#[rstest]
#[actix_web::test]
async fn unknown_paths_are_404_pages() {
    let res = send(
        MockPorts::default().into_state(),
        TestRequest::get().uri("/nowhere"),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(body_text(res).await.contains("No page lives at this address."));
}
