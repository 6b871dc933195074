use super::*;
use serde_json::json;

fn jita() -> Location {
    serde_json::from_value(json!({
        "id": 0,
        "location_type": "station",
        "location": "Jita IV - Moon 4",
        "actions": [
            { "action_type": "buy", "item": "Tritanium", "type_id": 34, "quantity": 12000, "price": 4.5 },
            { "action_type": "sell", "item": "Pyerite", "type_id": 35, "quantity": 2.5, "price": null }
        ]
    }))
    .expect("location")
}

#[test]
fn item_labels_dispatch_their_own_type_id() {
    let rows = action_rows(&jita());
    let targets: Vec<&str> = rows.iter().map(|r| r.target.as_str()).collect();
    assert_eq!(targets, vec!["34", "35"]);
    assert_eq!(rows[0].item, "Tritanium");
    assert_eq!(rows[1].item, "Pyerite");
}

#[test]
fn action_rows_format_quantity_and_price() {
    let rows = action_rows(&jita());
    assert_eq!(rows[0].kind, ActionKind::Buy);
    assert_eq!(rows[0].quantity, "12,000");
    assert_eq!(rows[0].price, "ISK 5");
    assert_eq!(rows[1].kind, ActionKind::Sell);
    assert_eq!(rows[1].quantity, "2.5");
    assert_eq!(rows[1].price, "-");
}

#[test]
fn location_without_actions_has_no_rows() {
    let bare: Location =
        serde_json::from_value(json!({ "id": 1, "location_type": "system", "location": "Perimeter" })).expect("location");
    assert!(action_rows(&bare).is_empty());
}

#[test]
fn row_class_marks_phase_and_primary() {
    assert_eq!(row_class(Phase::Entering, true), "data-view__row data-view__row--entering data-view__row--primary");
    assert_eq!(row_class(Phase::Exiting, false), "data-view__row data-view__row--exiting");
}
