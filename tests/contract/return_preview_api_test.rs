// Contract tests for POST /v1/returns/settlement, POST /v1/returns/preview
// and POST /v1/debts/summary

use actix_web::{test, web, App};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use shop_ledger::config::AllocationConfig;
use shop_ledger::middleware::json_config;
use shop_ledger::modules;
use std::str::FromStr;

fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).expect("decimal string"),
        Value::Number(n) => Decimal::from_str(&n.to_string()).expect("decimal number"),
        other => panic!("expected decimal, got {}", other),
    }
}

fn returnable_items() -> Value {
    json!([
        {
            "invoice_item_id": 10,
            "product_name": "Sơn nước",
            "unit": "thùng",
            "product_price": "50000",
            "original_quantity": "4",
            "already_returned": "1"
        },
        {
            "invoice_item_id": 11,
            "product_name": "Dây điện",
            "unit": "kg",
            "product_price": "20000",
            "original_quantity": "2.5"
        }
    ])
}

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AllocationConfig::default()))
                .app_data(json_config())
                .configure(modules::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn test_settlement_absorbed_contract() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/v1/returns/settlement")
        .set_json(json!({ "current_remaining": "200000", "refund_amount": "150000" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(decimal(&body["projected_remaining"]), Decimal::from(50000));
    assert_eq!(decimal(&body["cash_settlement_needed"]), Decimal::ZERO);
}

#[actix_web::test]
async fn test_settlement_cash_back_contract() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/v1/returns/settlement")
        .set_json(json!({ "current_remaining": "100000", "refund_amount": "150000" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(decimal(&body["projected_remaining"]), Decimal::from(-50000));
    assert_eq!(decimal(&body["cash_settlement_needed"]), Decimal::from(50000));
}

#[actix_web::test]
async fn test_negative_refund_rejected() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/v1/returns/settlement")
        .set_json(json!({ "current_remaining": "100000", "refund_amount": "-1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_return_preview_contract() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/v1/returns/preview")
        .set_json(json!({
            "current_remaining": "80000",
            "items": returnable_items(),
            "selections": [
                { "invoice_item_id": 10, "quantity_returned": "2" },
                { "invoice_item_id": 11, "quantity_returned": "1.5", "restore_inventory": false }
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    let lines = body["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(decimal(&lines[0]["subtotal"]), Decimal::from(100000));
    assert_eq!(lines[0]["restore_inventory"], true);
    assert_eq!(lines[1]["restore_inventory"], false);
    assert_eq!(decimal(&body["computed_refund"]), Decimal::from(130000));
    assert_eq!(decimal(&body["refund_amount"]), Decimal::from(130000));
    assert_eq!(body["is_full_return"], false);
    assert_eq!(
        decimal(&body["settlement"]["cash_settlement_needed"]),
        Decimal::from(50000)
    );
}

#[actix_web::test]
async fn test_return_preview_with_override() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/v1/returns/preview")
        .set_json(json!({
            "current_remaining": "80000",
            "items": returnable_items(),
            "selections": [{ "invoice_item_id": 10, "quantity_returned": "1" }],
            "refund_amount": "0"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(decimal(&body["computed_refund"]), Decimal::from(50000));
    assert_eq!(decimal(&body["refund_amount"]), Decimal::ZERO);
    assert_eq!(
        decimal(&body["settlement"]["projected_remaining"]),
        Decimal::from(80000)
    );
}

#[actix_web::test]
async fn test_return_preview_rejects_excess_quantity() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/v1/returns/preview")
        .set_json(json!({
            "current_remaining": "80000",
            "items": returnable_items(),
            "selections": [{ "invoice_item_id": 10, "quantity_returned": "4" }]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Sơn nước"));
}

#[actix_web::test]
async fn test_debt_summary_contract() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/v1/debts/summary")
        .set_json(json!({
            "as_of": "2026-04-05T09:00:00",
            "invoices": [
                {
                    "id": 3, "total": "25000", "paid_amount": "0", "remaining_amount": "25000",
                    "status": "pending", "created_at": "2026-03-28T09:00:00"
                },
                {
                    "id": 1, "total": "30000", "paid_amount": "0", "remaining_amount": "30000",
                    "status": "pending", "created_at": "2026-03-01T09:00:00"
                },
                {
                    "id": 2, "total": "50000", "paid_amount": "5000", "remaining_amount": "45000",
                    "status": "pending", "created_at": "2026-03-10T09:00:00"
                },
                {
                    "id": 4, "total": "90000", "paid_amount": "0", "remaining_amount": "90000",
                    "status": "cancelled", "created_at": "2026-02-01T09:00:00"
                }
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(decimal(&body["total_debt"]), Decimal::from(100000));
    assert_eq!(body["total_invoices"], 3);
    assert_eq!(body["unpaid_invoices"], 2);
    assert_eq!(body["partially_paid_invoices"], 1);
    assert_eq!(body["overdue_invoices"], 1);
    assert_eq!(decimal(&body["overdue_debt"]), Decimal::from(30000));
    assert_eq!(decimal(&body["total_revenue"]), Decimal::from(105000));
    assert_eq!(decimal(&body["total_refunded"]), Decimal::ZERO);
    assert_eq!(decimal(&body["total_net_revenue"]), Decimal::from(105000));

    let ids: Vec<i64> = body["invoices"]
        .as_array()
        .unwrap()
        .iter()
        .map(|inv| inv["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[actix_web::test]
async fn test_return_preview_overflow_is_rejected() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/v1/returns/preview")
        .set_json(json!({
            "current_remaining": "0",
            "items": [{
                "invoice_item_id": 1,
                "product_name": "Thép cuộn",
                "unit": "kg",
                "product_price": "10000000000000000000",
                "original_quantity": "10000000000000000000"
            }],
            "selections": [{ "invoice_item_id": 1, "quantity_returned": "10000000000000000000" }]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("out of range"));
}

#[actix_web::test]
async fn test_return_preview_rounds_computed_refund() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/v1/returns/preview")
        .set_json(json!({
            "current_remaining": "100000",
            "items": [{
                "invoice_item_id": 1,
                "product_name": "Dây điện",
                "unit": "kg",
                "product_price": "33333",
                "original_quantity": "5"
            }],
            "selections": [{ "invoice_item_id": 1, "quantity_returned": "1.5" }]
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(decimal(&body["computed_refund"]), "49999.5".parse::<Decimal>().unwrap());
    assert_eq!(decimal(&body["refund_amount"]), Decimal::from(50000));
}

#[actix_web::test]
async fn test_negative_remaining_rejected() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/v1/returns/settlement")
        .set_json(json!({
            "current_remaining": "-79228162514264337593543950335",
            "refund_amount": "1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_debt_summary_rejects_out_of_range_as_of() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/v1/debts/summary")
        .set_json(json!({ "invoices": [], "as_of": "-262143-01-01T00:00:00" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 400);
}

#[actix_web::test]
async fn test_debt_summary_nets_returned_goods() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/v1/debts/summary")
        .set_json(json!({
            "as_of": "2026-04-05T09:00:00",
            "invoices": [{
                "id": 1, "total": "32000000", "paid_amount": "9000000",
                "remaining_amount": "23000000", "total_returned_amount": "32000000",
                "status": "pending", "created_at": "2026-04-01T09:00:00"
            }]
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(decimal(&body["total_revenue"]), Decimal::from(32000000));
    assert_eq!(decimal(&body["total_refunded"]), Decimal::from(32000000));
    assert_eq!(decimal(&body["total_net_revenue"]), Decimal::ZERO);
}
