//! Integration tests for ViewController page policy and screen scenarios

use chrono::Duration;
use dashview::prelude::*;
use serde_json::{Value, json};

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2024, 5, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .map(|n| n.and_utc())
        .unwrap()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
}

/// `count` tickets, one per hour starting 2024-05-01 00:00 UTC
fn tickets(count: usize) -> Vec<Ticket> {
    (0..count)
        .map(|i| {
            Ticket::new(
                format!("TCK-{:03}", i + 1),
                format!("Subject {}", i + 1),
                if i % 3 == 0 {
                    TicketStatus::Open
                } else {
                    TicketStatus::Closed
                },
                TicketPriority::Medium,
            )
            .with_created_at(at(1, 0) + Duration::hours(i as i64))
        })
        .collect()
}

fn references(items: &[Ticket]) -> Vec<String> {
    items.iter().map(|t| t.reference.clone()).collect()
}

fn tickets_view(page_size: usize) -> ViewController<Ticket> {
    let config = DashboardConfig::default_config();
    let screen = config.screen("tickets").unwrap().clone().with_page_size(page_size);
    ViewController::new(screen).unwrap()
}

#[test]
fn test_filter_change_resets_page() {
    let mut view = tickets_view(5);
    view.set_source_data(tickets(40));
    assert_eq!(view.set_page(5).page, 5);

    let snapshot = view.set_search_term("x");
    assert_eq!(snapshot.page, 1);
    assert_eq!(snapshot.total_items, 0);
}

#[test]
fn test_every_filter_setter_resets_page() {
    let mut view = tickets_view(5);
    view.set_source_data(tickets(40));

    view.set_page(3);
    assert_eq!(view.set_field_filter("status", "CLOSED").page, 1);

    view.set_page(3);
    assert_eq!(view.set_date_range(DateRange::new(Some(day(1)), None)).page, 1);

    view.set_page(3);
    assert_eq!(view.clear_filters().page, 1);
}

#[test]
fn test_data_change_preserves_valid_page() {
    let mut view = tickets_view(5);
    view.set_source_data(tickets(23));
    view.set_page(3);

    let before = view.snapshot().clone();
    assert_eq!(before.page, 3);
    assert_eq!(before.items.len(), 5);
    assert_eq!(references(&before.items), references(&view.filtered()[10..15]));

    let snapshot = view.set_source_data(tickets(20)).clone();
    assert_eq!(snapshot.page, 3);
    assert_eq!(snapshot.total_pages, 4);
    assert_eq!(references(&snapshot.items), references(&view.filtered()[10..15]));
}

#[test]
fn test_data_change_clamps_invalid_page() {
    let mut view = tickets_view(5);
    view.set_source_data(tickets(23));
    view.set_page(5);

    let snapshot = view.set_source_data(tickets(8));
    assert_eq!(snapshot.total_pages, 2);
    assert_eq!(snapshot.page, 2);
    assert_eq!(snapshot.items.len(), 3);
}

#[test]
fn test_data_change_keeps_filters_and_sort() {
    let mut view = tickets_view(5);
    view.set_source_data(tickets(10));
    view.set_field_filter("status", "OPEN");
    view.toggle_sort("reference");

    view.set_source_data(tickets(30));
    assert_eq!(view.filter_state().field_filters.get("status").map(String::as_str), Some("OPEN"));
    assert_eq!(view.sort_state(), &SortState::asc("reference"));
    assert_eq!(view.snapshot().total_items, 10);
}

#[test]
fn test_empty_result() {
    let mut view = tickets_view(5);
    view.set_source_data(tickets(12));

    let snapshot = view.set_search_term("no such ticket");
    assert_eq!(snapshot.total_items, 0);
    assert_eq!(snapshot.total_pages, 1);
    assert_eq!(snapshot.page, 1);
    assert!(snapshot.items.is_empty());
    assert!(!snapshot.has_next);
    assert!(!snapshot.has_prev);
}

#[test]
fn test_date_range_scenario() {
    // 12 records across 3 days, 4 per day
    let data: Vec<Ticket> = tickets(12)
        .into_iter()
        .enumerate()
        .map(|(i, t)| t.with_created_at(at(1 + (i / 4) as u32, 9 + (i % 4) as u32)))
        .collect();

    let mut view = tickets_view(5);
    view.set_source_data(data);
    assert_eq!(view.snapshot().total_pages, 3);
    view.set_page(3);

    let snapshot = view.set_date_range(DateRange::day(day(2)));
    assert_eq!(snapshot.total_items, 4);
    assert_eq!(snapshot.total_pages, 1);
    assert_eq!(snapshot.page, 1);
    assert_eq!(
        references(&snapshot.items),
        vec!["TCK-008", "TCK-007", "TCK-006", "TCK-005"]
    );
}

#[test]
fn test_page_size_change_resets_page() {
    let mut view = tickets_view(10);
    view.set_source_data(tickets(30));
    view.set_page(2);
    assert_eq!(
        references(&view.snapshot().items),
        references(&view.filtered()[10..20])
    );

    let snapshot = view.set_page_size(5).clone();
    assert_eq!(snapshot.page, 1);
    assert_eq!(snapshot.page_size, 5);
    assert_eq!(references(&snapshot.items), references(&view.filtered()[0..5]));
}

#[test]
fn test_search_is_case_insensitive_over_configured_fields() {
    let mut view = tickets_view(10);
    view.set_source_data(tickets(12));

    let snapshot = view.set_search_term("  tck-01 ");
    assert_eq!(snapshot.total_items, 3);

    // priority is not a search field
    assert_eq!(view.set_search_term("medium").total_items, 0);
}

#[test]
fn test_messages_screen_sentinel_and_sent_at() {
    let config = DashboardConfig::default_config();
    let mut view = ViewController::<Message>::for_screen(&config, "messages").unwrap();

    let payload = json!([
        {"id": "1f5e8a61-0d7b-4c58-8d2e-2b1a4a2f0b01", "reference": "M1", "sender": "ORANGE",
         "recipient": "+221770000001", "body": "Bonjour", "status": "SENT",
         "sent_at": "2024-05-02T10:00:00Z"},
        {"id": "1f5e8a61-0d7b-4c58-8d2e-2b1a4a2f0b02", "reference": "M2", "sender": "FREE",
         "recipient": "+221760000002", "body": "Promo", "status": "FAILED",
         "sent_at": "2024-05-03 11:00:00"},
        {"id": "1f5e8a61-0d7b-4c58-8d2e-2b1a4a2f0b03", "reference": "M3", "sender": "ORANGE",
         "recipient": "+221770000003", "body": "Rappel", "status": "SCHEDULED",
         "sent_at": "bientôt"},
        {"id": "not-a-uuid", "reference": "M4"}
    ]);

    let snapshot = view.set_source_value(payload);
    assert_eq!(snapshot.total_items, 3);
    assert_eq!(
        snapshot.items.iter().map(|m| m.reference.as_str()).collect::<Vec<_>>(),
        vec!["M2", "M1", "M3"]
    );

    assert_eq!(view.set_field_filter("status", "FAILED").total_items, 1);
    assert_eq!(view.set_field_filter("status", "TOUS").total_items, 3);

    let snapshot = view.set_date_range(DateRange::new(Some(day(1)), Some(day(31))));
    assert_eq!(snapshot.total_items, 2);
}

#[test]
fn test_date_range_uses_screen_utc_offset() {
    let screen = ScreenConfig::new("records").with_utc_offset_minutes(120);
    let mut view = ViewController::<Value>::new(screen).unwrap();
    view.set_source_data(vec![
        json!({"id": 1, "created_at": "2024-05-01T21:30:00Z"}),
        json!({"id": 2, "created_at": "2024-05-01T22:30:00Z"}),
    ]);

    let snapshot = view.set_date_range(DateRange::day(day(2)));
    assert_eq!(snapshot.total_items, 1);
    assert_eq!(snapshot.items[0]["id"], json!(2));
}

#[test]
fn test_inverted_range_matches_nothing() {
    let mut view = tickets_view(5);
    view.set_source_data(tickets(24));

    let snapshot = view.set_date_range(DateRange::new(Some(day(3)), Some(day(1))));
    assert_eq!(snapshot.total_items, 0);
    assert_eq!(snapshot.page, 1);
}

#[test]
fn test_contacts_default_sort_and_group_filter() {
    let config = DashboardConfig::default_config();
    let mut view = ViewController::<Contact>::for_screen(&config, "contacts").unwrap();

    let group = Uuid::new_v4();
    view.set_source_data(vec![
        Contact::new("moussa".into(), "+2217701".into(), None, None),
        Contact::new("Awa".into(), "+2217702".into(), None, None).in_group(group),
        Contact::new("Binta".into(), "+2217703".into(), None, None).in_group(group),
    ]);

    let names: Vec<_> = view.snapshot().items.iter().map(|c| c.name.clone()).collect();
    assert_eq!(names, vec!["Awa", "Binta", "moussa"]);

    assert_eq!(view.set_field_filter("group_id", group.to_string()).total_items, 2);
    assert_eq!(view.set_field_filter("group_id", "ALL").total_items, 3);
    assert_eq!(view.set_field_filter("group_id", "").total_items, 3);
}

#[test]
fn test_snapshot_serializes_for_presentation() {
    let mut view = ViewController::<Value>::new(ScreenConfig::new("records").with_page_size(2)).unwrap();
    view.set_source_data(vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 3})]);

    let json = serde_json::to_value(view.snapshot()).unwrap();
    assert_eq!(json["total_items"], json!(3));
    assert_eq!(json["total_pages"], json!(2));
    assert_eq!(json["page"], json!(1));
    assert_eq!(json["has_next"], json!(true));
    assert_eq!(json["items"].as_array().map(Vec::len), Some(2));
}

#[test]
fn test_contacts_sort_ignores_accents() {
    let config = DashboardConfig::default_config();
    let mut view = ViewController::<Contact>::for_screen(&config, "contacts").unwrap();

    view.set_source_data(vec![
        Contact::new("Zoé".into(), "+2217701".into(), None, None),
        Contact::new("Élodie".into(), "+2217702".into(), None, None),
        Contact::new("emma".into(), "+2217703".into(), None, None),
        Contact::new("Aïssatou".into(), "+2217704".into(), None, None),
    ]);

    let names: Vec<_> = view.snapshot().items.iter().map(|c| c.name.clone()).collect();
    assert_eq!(names, vec!["Aïssatou", "Élodie", "emma", "Zoé"]);
}

#[test]
fn test_sort_column_mixing_numbers_and_numeric_strings() {
    let screen = ScreenConfig::new("orders").with_sort("reference:asc").with_page_size(50);
    let mut view = ViewController::<Value>::new(screen).unwrap();

    let rows: Vec<Value> = (0..200)
        .map(|n| {
            let reference = if n % 3 == 0 { json!(n.to_string()) } else { json!(n) };
            json!({"id": n, "reference": reference})
        })
        .collect();

    let snapshot = view.set_source_value(Value::Array(rows));
    assert_eq!(snapshot.total_items, 200);

    // Numbers first in numeric order, then numeric strings as text
    let filtered = view.filtered();
    assert_eq!(filtered[0]["reference"], json!(1));
    assert_eq!(filtered[1]["reference"], json!(2));
    assert_eq!(filtered[2]["reference"], json!(4));
    assert!(filtered[..133].iter().all(|r| r["reference"].is_number()));
    assert!(filtered[133..].iter().all(|r| r["reference"].is_string()));
    assert_eq!(filtered[133]["reference"], json!("0"));
    assert_eq!(filtered[134]["reference"], json!("102"));
}
