//! Integration tests for sales rules on the sales screen

use gestor::core::sales::parse_payment_amount;
use gestor::prelude::*;
use serde_json::json;

fn ventas() -> Vec<Value> {
    vec![
        json!({"id": 1, "cliente": {"nombre": "Ana"}, "total": 185000, "monto_pagado": 185000}),
        json!({"id": 2, "cliente": {"nombre": "Beto"}, "total": 42500, "monto_pagado": 0}),
        json!({"id": 3, "cliente": {"nombre": "Ana"}, "total": 120000, "monto_pagado": 20000}),
    ]
}

#[test]
fn test_balances_and_status_for_sales_rows() {
    let records = ventas();
    let page = ScreensConfig::default_config()
        .screen("ventas")
        .unwrap()
        .list_view()
        .apply(&records);

    let rows: Vec<(f64, PaymentStatus)> = page
        .rows
        .iter()
        .map(|v| {
            let total = v["total"].as_f64().unwrap();
            let pagado = v["monto_pagado"].as_f64().unwrap();
            (
                outstanding_balance(total, pagado),
                PaymentStatus::from_amounts(total, pagado),
            )
        })
        .collect();

    assert_eq!(
        rows,
        vec![
            (0.0, PaymentStatus::Pagado),
            (42500.0, PaymentStatus::Pendiente),
            (100000.0, PaymentStatus::Parcial),
        ]
    );
    assert_eq!(format_currency(rows[2].0), "$\u{a0}100.000");
}

#[test]
fn test_sale_form_checks() {
    let lines: Vec<SaleLine> = serde_json::from_value(json!([
        {"producto_id": 4, "cantidad": 2, "precio_unitario": 15000},
        {"producto_id": 9, "cantidad": 1, "precio_unitario": 42500}
    ]))
    .unwrap();

    assert!(validate_sale(Some(1), &lines).is_ok());
    assert_eq!(sale_subtotal(&lines), 72500.0);

    let err: GestorError = validate_sale(None, &lines).unwrap_err().into();
    assert_eq!(err.error_code(), "MISSING_CLIENT");
}

#[test]
fn test_payment_form_amount() {
    assert_eq!(parse_payment_amount("50000").unwrap(), 50000.0);
    assert!(matches!(
        parse_payment_amount("0"),
        Err(SalesError::InvalidPaymentAmount { .. })
    ));
    assert!(validate_payment_amount(-1.0).is_err());
}
