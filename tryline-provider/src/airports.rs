use serde::Serialize;

/// One entry of the local static airport index.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Airport {
    pub code: &'static str,
    pub name: &'static str,
    pub city: &'static str,
    pub country: &'static str,
}

const POPULAR_AIRPORTS: &[Airport] = &[
    // United States
    Airport { code: "JFK", name: "John F. Kennedy International", city: "New York", country: "United States" },
    Airport { code: "LGA", name: "LaGuardia Airport", city: "New York", country: "United States" },
    Airport { code: "EWR", name: "Newark Liberty International", city: "Newark", country: "United States" },
    Airport { code: "LAX", name: "Los Angeles International", city: "Los Angeles", country: "United States" },
    Airport { code: "SFO", name: "San Francisco International", city: "San Francisco", country: "United States" },
    Airport { code: "ORD", name: "O'Hare International", city: "Chicago", country: "United States" },
    Airport { code: "MDW", name: "Midway International", city: "Chicago", country: "United States" },
    Airport { code: "MIA", name: "Miami International", city: "Miami", country: "United States" },
    Airport { code: "ATL", name: "Hartsfield-Jackson Atlanta", city: "Atlanta", country: "United States" },
    Airport { code: "DFW", name: "Dallas/Fort Worth International", city: "Dallas", country: "United States" },
    Airport { code: "DEN", name: "Denver International", city: "Denver", country: "United States" },
    Airport { code: "SEA", name: "Seattle-Tacoma International", city: "Seattle", country: "United States" },
    Airport { code: "BOS", name: "Logan International", city: "Boston", country: "United States" },
    Airport { code: "LAS", name: "Harry Reid International", city: "Las Vegas", country: "United States" },
    Airport { code: "MCO", name: "Orlando International", city: "Orlando", country: "United States" },
    Airport { code: "PHX", name: "Phoenix Sky Harbor", city: "Phoenix", country: "United States" },
    Airport { code: "IAH", name: "George Bush Intercontinental", city: "Houston", country: "United States" },
    Airport { code: "CLT", name: "Charlotte Douglas International", city: "Charlotte", country: "United States" },
    Airport { code: "SAN", name: "San Diego International", city: "San Diego", country: "United States" },
    Airport { code: "DCA", name: "Ronald Reagan Washington National", city: "Washington D.C.", country: "United States" },
    Airport { code: "IAD", name: "Washington Dulles International", city: "Washington D.C.", country: "United States" },
    // Canada
    Airport { code: "YYZ", name: "Toronto Pearson International", city: "Toronto", country: "Canada" },
    Airport { code: "YVR", name: "Vancouver International", city: "Vancouver", country: "Canada" },
    Airport { code: "YUL", name: "Montréal-Pierre Elliott Trudeau", city: "Montreal", country: "Canada" },
    Airport { code: "YYC", name: "Calgary International", city: "Calgary", country: "Canada" },
    // Europe
    Airport { code: "LHR", name: "Heathrow Airport", city: "London", country: "United Kingdom" },
    Airport { code: "LGW", name: "Gatwick Airport", city: "London", country: "United Kingdom" },
    Airport { code: "CDG", name: "Charles de Gaulle Airport", city: "Paris", country: "France" },
    Airport { code: "AMS", name: "Amsterdam Airport Schiphol", city: "Amsterdam", country: "Netherlands" },
    Airport { code: "FRA", name: "Frankfurt Airport", city: "Frankfurt", country: "Germany" },
    Airport { code: "MUC", name: "Munich Airport", city: "Munich", country: "Germany" },
    Airport { code: "MAD", name: "Adolfo Suárez Madrid-Barajas", city: "Madrid", country: "Spain" },
    Airport { code: "BCN", name: "Josep Tarradellas Barcelona-El Prat", city: "Barcelona", country: "Spain" },
    Airport { code: "FCO", name: "Leonardo da Vinci-Fiumicino", city: "Rome", country: "Italy" },
    Airport { code: "ZRH", name: "Zurich Airport", city: "Zurich", country: "Switzerland" },
    Airport { code: "IST", name: "Istanbul Airport", city: "Istanbul", country: "Turkey" },
    Airport { code: "DUB", name: "Dublin Airport", city: "Dublin", country: "Ireland" },
    Airport { code: "CPH", name: "Copenhagen Airport", city: "Copenhagen", country: "Denmark" },
    Airport { code: "ARN", name: "Stockholm Arlanda", city: "Stockholm", country: "Sweden" },
    // Asia Pacific
    Airport { code: "HND", name: "Tokyo Haneda Airport", city: "Tokyo", country: "Japan" },
    Airport { code: "NRT", name: "Narita International Airport", city: "Tokyo", country: "Japan" },
    Airport { code: "SIN", name: "Singapore Changi Airport", city: "Singapore", country: "Singapore" },
    Airport { code: "HKG", name: "Hong Kong International", city: "Hong Kong", country: "Hong Kong" },
    Airport { code: "ICN", name: "Incheon International", city: "Seoul", country: "South Korea" },
    Airport { code: "BKK", name: "Suvarnabhumi Airport", city: "Bangkok", country: "Thailand" },
    Airport { code: "SYD", name: "Sydney Kingsford Smith", city: "Sydney", country: "Australia" },
    Airport { code: "MEL", name: "Melbourne Airport", city: "Melbourne", country: "Australia" },
    Airport { code: "DEL", name: "Indira Gandhi International", city: "New Delhi", country: "India" },
    Airport { code: "PEK", name: "Beijing Capital International", city: "Beijing", country: "China" },
    // Middle East
    Airport { code: "DXB", name: "Dubai International", city: "Dubai", country: "UAE" },
    Airport { code: "DOH", name: "Hamad International", city: "Doha", country: "Qatar" },
    // Latin America
    Airport { code: "GRU", name: "São Paulo/Guarulhos", city: "São Paulo", country: "Brazil" },
    Airport { code: "BOG", name: "El Dorado International", city: "Bogotá", country: "Colombia" },
    Airport { code: "EZE", name: "Ministro Pistarini International", city: "Buenos Aires", country: "Argentina" },
    Airport { code: "MEX", name: "Benito Juárez International", city: "Mexico City", country: "Mexico" },
];

/// Local airport lookup used by flight-mode autocomplete. Matches are
/// ranked with exact code matches first, then cities starting with the
/// query; ties keep index order.
#[derive(Debug, Clone)]
pub struct AirportIndex {
    airports: &'static [Airport],
    limit: usize,
}

impl AirportIndex {
    pub fn new(limit: usize) -> Self {
        Self {
            airports: POPULAR_AIRPORTS,
            limit,
        }
    }

    pub fn search(&self, query: &str) -> Vec<Airport> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<Airport> = self
            .airports
            .iter()
            .filter(|a| {
                a.code.to_lowercase().contains(&needle)
                    || a.name.to_lowercase().contains(&needle)
                    || a.city.to_lowercase().contains(&needle)
                    || a.country.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        matches.sort_by(|a, b| {
            let a_exact = a.code.to_lowercase() == needle;
            let b_exact = b.code.to_lowercase() == needle;
            if a_exact != b_exact {
                return b_exact.cmp(&a_exact);
            }
            let a_city = a.city.to_lowercase().starts_with(&needle);
            let b_city = b.city.to_lowercase().starts_with(&needle);
            b_city.cmp(&a_city)
        });

        matches.truncate(self.limit);
        matches
    }
}

impl Default for AirportIndex {
    fn default() -> Self {
        Self::new(8)
    }
}
