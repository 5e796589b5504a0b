use anyhow::Context;
use chrono::{Duration as ChronoDuration, Utc};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tryline_booking::{
    CheckoutController, FareChoice, SeatGrid, SelectionChain, SubmitOutcome,
};
use tryline_core::{DateRange, FareType, PortalConfig, SearchCriteria};
use tryline_provider::{MockGdsClient, TravelProvider};
use tryline_search::{LookupMode, SearchController, SuggestEngine};

/// Scripted end-to-end portal session against the mock GDS: destination
/// autocomplete, hotel package search, flight selection chain, checkout.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tryline=debug,tryline_app=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PortalConfig::load_or_default();
    let provider = MockGdsClient::with_latency(Duration::from_millis(config.mock.latency_ms));
    tracing::info!(
        latency_ms = config.mock.latency_ms,
        "starting demo session against mock GDS"
    );

    // Destination typeahead, the way the search form drives it.
    let mut suggest = SuggestEngine::new(
        LookupMode::Hotel,
        config.autocomplete.min_query_len,
        Duration::from_millis(config.autocomplete.debounce_ms),
    );
    suggest.set_focus(true);
    suggest.run_lookup("san diego", &provider).await;
    let destination = suggest
        .select(0)
        .unwrap_or_else(|| "San Diego".to_string());
    tracing::info!(%destination, "destination picked from suggestions");

    // Hotel package search.
    let today = Utc::now().date_naive();
    let criteria = SearchCriteria {
        destination,
        dates: DateRange {
            start: Some(today + ChronoDuration::days(14)),
            end: Some(today + ChronoDuration::days(16)),
        },
        party_size: 1,
    };
    let mut search = SearchController::new(
        criteria,
        Duration::from_secs(config.business_rules.staleness_seconds),
    );
    search
        .search(&provider)
        .await
        .context("hotel search failed to dispatch")?;
    if let Some(toast) = search.take_toast() {
        println!("{}", toast);
    }
    for hotel in search.results() {
        println!(
            "  {} — ${:.2}/night ({:?})",
            hotel.name, hotel.price, hotel.package_type
        );
    }

    // Rate re-check on opening the first hotel's details.
    if let Some(hotel_id) = search.results().first().map(|h| h.id.clone()) {
        if let Some(notice) = search.recheck_rate(&hotel_id, &provider).await {
            println!(
                "Rate update for {}: ${:.2} -> ${:.2}",
                notice.hotel_id, notice.previous_price, notice.new_price
            );
        }
    }

    // Origin airport typeahead for the flight leg.
    let mut origin_suggest = SuggestEngine::new(
        LookupMode::Flight,
        config.autocomplete.min_query_len,
        Duration::from_millis(config.autocomplete.debounce_ms),
    )
    .with_airport_limit(config.autocomplete.max_local_results);
    origin_suggest.set_focus(true);
    origin_suggest.run_lookup("san", &provider).await;
    let origin = origin_suggest.select(0).unwrap_or_else(|| "SAN".to_string());
    tracing::info!(%origin, "origin airport picked");

    // Flight selection chain.
    let flights = provider
        .search_flights(&origin, "BOS", &(today + ChronoDuration::days(14)).to_string())
        .await
        .context("flight search failed")?;
    let flight = flights[0].clone();
    println!(
        "Selected {} {} — ${:.2}",
        flight.airline, flight.flight_number, flight.price
    );

    let mut chain = SelectionChain::new();
    chain.select_flight(flight.clone())?;
    let choice = chain.revalidate_fare(FareType::Economy, &provider).await?;
    debug_assert_eq!(choice, FareChoice::RevalidationRequired);
    if let Some(message) = chain.error_message() {
        anyhow::bail!("fare revalidation failed: {}", message);
    }

    let seat_map = provider.seat_map(&flight).await.context("seat map failed")?;
    let grid = SeatGrid::from_response(&seat_map);
    chain.toggle_seat(&grid, "12A")?;
    chain.confirm_seats()?;

    let catalog = provider
        .ancillaries(&flight.id)
        .await
        .context("ancillary catalog failed")?;
    chain.toggle_ancillary(catalog[0].clone())?;
    chain.confirm_ancillaries()?;

    let payload = chain.assemble_checkout(config.business_rules.taxes_and_fees)?;
    println!("Checkout total: ${:.2}", payload.total_price);

    // Checkout.
    let mut checkout = CheckoutController::new(payload, config.business_rules.taxes_and_fees);
    checkout.set_traveler("Jane Doe", "jane@example.com", "window seat if possible");
    for line in checkout.price_breakdown() {
        println!("  {:<40} ${:>8.2}", line.label, line.amount);
    }

    match checkout.submit(&provider).await? {
        SubmitOutcome::Confirmed { pnr } => {
            println!("Booking confirmed. PNR: {}", pnr);
        }
        SubmitOutcome::Rejected => {
            anyhow::bail!(
                "booking rejected: {}",
                checkout.error_message().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}
