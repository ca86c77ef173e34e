//! Dashboard demo: a tickets screen fed by a background poller
//!
//! Run with `RUST_LOG=dashview=debug cargo run --example dashboard` to see
//! every recompute.

use chrono::Duration as ChronoDuration;
use dashview::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn sample_tickets(count: usize) -> Vec<Ticket> {
    // 2024-05-01 08:00 UTC
    let start = DateTime::<Utc>::from_timestamp(1_714_550_400, 0).unwrap_or_default();
    let statuses = TicketStatus::ALL;
    let priorities = TicketPriority::ALL;

    (0..count)
        .map(|i| {
            Ticket::new(
                format!("TCK-{:04}", i + 1),
                format!("Incident réseau #{}", i + 1),
                statuses[i % statuses.len()],
                priorities[i % priorities.len()],
            )
            .with_created_at(start + ChronoDuration::hours(7 * i as i64))
        })
        .collect()
}

fn print_page(title: &str, page: &ViewSnapshot<Ticket>) {
    println!(
        "\n📋 {} (page {}/{}, items {}-{} of {})",
        title,
        page.page,
        page.total_pages,
        page.first_item_number(),
        page.last_item_number(),
        page.total_items
    );
    for ticket in &page.items {
        println!(
            "   {} {:<28} {:<12} {:<6} {}",
            ticket.reference,
            ticket.subject,
            ticket.status,
            ticket.priority,
            ticket
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string())
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dashview=info")),
        )
        .init();

    println!("🚀 dashview demo\n");

    let config = DashboardConfig::default_config();
    config.validate()?;

    let ctx = ClientContext::new("client-221").with_locale("fr-SN");
    let source = Arc::new(InMemoryRecordSource::with_records(sample_tickets(23)));

    let mut tickets = ViewController::<Ticket>::for_screen(&config, "tickets")?;
    tickets.refresh_from(source.as_ref(), &ctx).await?;
    print_page("Newest tickets", tickets.snapshot());

    tickets.set_field_filter("status", "OPEN");
    print_page("Open tickets", tickets.snapshot());

    tickets.set_field_filter("status", "ALL");
    tickets.toggle_sort("reference");
    tickets.set_page(3);
    print_page("By reference, page 3", tickets.snapshot());

    let range = DateRange::new(
        NaiveDate::from_ymd_opt(2024, 5, 2),
        NaiveDate::from_ymd_opt(2024, 5, 3),
    );
    tickets.set_date_range(range);
    print_page("Opened on May 2nd and 3rd", tickets.snapshot());
    tickets.clear_filters();

    // Background refresh: the poller fetches immediately, then every 200ms
    let mut handle =
        RefreshPoller::spawn("tickets", source.clone(), ctx, Duration::from_millis(200));
    handle.changed().await;
    tickets.apply_refresh(&mut handle);

    tickets.last_page();
    println!("\n🔄 Backend drops to 12 tickets while page {} is shown", tickets.snapshot().page);
    source.replace(sample_tickets(12))?;
    while tickets.source_len() != 12 && handle.changed().await {
        tickets.apply_refresh(&mut handle);
    }
    print_page("After refresh (page clamped)", tickets.snapshot());

    handle.stop();

    println!("\n🧾 Snapshot as JSON:");
    println!("{}", serde_json::to_string_pretty(&tickets.set_page_size(2))?);

    Ok(())
}
