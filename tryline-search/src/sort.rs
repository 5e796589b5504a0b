use serde::{Deserialize, Serialize};
use tryline_core::FlightSegment;

/// Sort views over the canonical result list. Views are derived
/// projections; the canonical list is never reordered in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Provider order (identity).
    Recommended,
    /// Ascending by price.
    Cheapest,
    /// Ascending by parsed duration.
    Fastest,
}

/// Parse a display duration like "7h 30m" into minutes. Unparseable
/// tokens count as zero, matching lenient display-string handling.
pub fn parse_duration_minutes(duration: &str) -> u32 {
    duration
        .split_whitespace()
        .map(|token| {
            if let Some(hours) = token.strip_suffix('h') {
                hours.parse::<u32>().unwrap_or(0) * 60
            } else if let Some(minutes) = token.strip_suffix('m') {
                minutes.parse::<u32>().unwrap_or(0)
            } else {
                0
            }
        })
        .sum()
}

/// Produce the derived ordering for a sort view. Sorts are stable, so ties
/// keep provider order, and `Recommended` is exactly the canonical order.
pub fn sorted_view(flights: &[FlightSegment], order: SortOrder) -> Vec<FlightSegment> {
    let mut view: Vec<FlightSegment> = flights.to_vec();
    match order {
        SortOrder::Recommended => {}
        SortOrder::Cheapest => view.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortOrder::Fastest => view.sort_by_key(|f| parse_duration_minutes(&f.duration)),
    }
    view
}

/// Price/duration headline for one sort tab.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FareSummary {
    pub price: f64,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortStats {
    pub cheapest: FareSummary,
    pub fastest: FareSummary,
    pub recommended: FareSummary,
}

/// Headline stats for the sort bar, or `None` with no results.
pub fn sort_stats(flights: &[FlightSegment]) -> Option<SortStats> {
    if flights.is_empty() {
        return None;
    }

    let by_price = sorted_view(flights, SortOrder::Cheapest);
    let by_duration = sorted_view(flights, SortOrder::Fastest);

    Some(SortStats {
        cheapest: FareSummary {
            price: by_price[0].price,
            duration: by_price[0].duration.clone(),
        },
        fastest: FareSummary {
            price: by_duration[0].price,
            duration: by_duration[0].duration.clone(),
        },
        recommended: FareSummary {
            price: flights[0].price,
            duration: flights[0].duration.clone(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flight(id: &str, price: f64, duration: &str) -> FlightSegment {
        FlightSegment {
            id: id.to_string(),
            airline: "Pacific Air".to_string(),
            airline_code: "PA".to_string(),
            flight_number: format!("PA {}", id),
            departure_time: "08:00".to_string(),
            arrival_time: "12:00".to_string(),
            origin: "SAN".to_string(),
            destination: "BOS".to_string(),
            duration: duration.to_string(),
            stops: 0,
            price,
            booking_code: None,
        }
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration_minutes("7h 30m"), 450);
        assert_eq!(parse_duration_minutes("45m"), 45);
        assert_eq!(parse_duration_minutes("2h"), 120);
        assert_eq!(parse_duration_minutes(""), 0);
    }

    #[test]
    fn test_cheapest_then_recommended_restores_provider_order() {
        let canonical = vec![
            flight("a", 300.0, "2h 10m"),
            flight("b", 150.0, "5h 0m"),
            flight("c", 220.0, "1h 45m"),
        ];

        let cheapest = sorted_view(&canonical, SortOrder::Cheapest);
        assert_eq!(cheapest[0].id, "b");

        // The canonical list is untouched; recommended is identity.
        let recommended = sorted_view(&canonical, SortOrder::Recommended);
        let ids: Vec<&str> = recommended.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_fastest_sort() {
        let canonical = vec![
            flight("a", 300.0, "2h 10m"),
            flight("b", 150.0, "5h 0m"),
            flight("c", 220.0, "1h 45m"),
        ];
        let fastest = sorted_view(&canonical, SortOrder::Fastest);
        assert_eq!(fastest[0].id, "c");
        assert_eq!(fastest[2].id, "b");
    }

    #[test]
    fn test_price_ties_keep_provider_order() {
        let canonical = vec![
            flight("a", 200.0, "3h 0m"),
            flight("b", 200.0, "2h 0m"),
            flight("c", 100.0, "4h 0m"),
        ];
        let cheapest = sorted_view(&canonical, SortOrder::Cheapest);
        let ids: Vec<&str> = cheapest.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_stats_headlines() {
        let canonical = vec![
            flight("a", 300.0, "2h 10m"),
            flight("b", 150.0, "5h 0m"),
        ];
        let stats = sort_stats(&canonical).unwrap();
        assert_eq!(stats.cheapest.price, 150.0);
        assert_eq!(stats.fastest.duration, "2h 10m");
        assert_eq!(stats.recommended.price, 300.0);

        assert!(sort_stats(&[]).is_none());
    }
}
