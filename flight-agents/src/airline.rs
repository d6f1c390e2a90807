//! Flight search and management agent.

use crate::client::{segment, McpClient};
use crate::error::AgentError;
use crate::intent::{Intent, KNOWN_AIRPORTS};
use crate::models::{Flight, FlightUpdate, Message, NewFlight, Stats};
use crate::render;
use tracing::instrument;

const RECOMMENDATION_LIMIT: i64 = 5;

pub const HELP_TEXT: &str = "I can search flights between airports, recommend flights \
or show system statistics. Try \"search flights PEK SHA\", \"recommend a cheap trip\" \
or \"show stats\".";

pub struct AirlineAgent {
    client: McpClient,
}

impl AirlineAgent {
    pub fn new(client: McpClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &McpClient {
        &self.client
    }

    #[instrument(skip(self))]
    pub async fn list_flights(&self, skip: i64, limit: i64) -> Result<Vec<Flight>, AgentError> {
        self.client
            .get_with_query("/flights", &[("skip", skip), ("limit", limit)])
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_flight(&self, id: i64) -> Result<Flight, AgentError> {
        self.client.get(&format!("/flights/{}", id)).await
    }

    #[instrument(skip(self))]
    pub async fn get_flight_by_number(&self, flight_number: &str) -> Result<Flight, AgentError> {
        self.client
            .get(&format!("/flights/number/{}", segment(flight_number)))
            .await
    }

    #[instrument(skip(self))]
    pub async fn search_flights(
        &self,
        departure: &str,
        arrival: &str,
    ) -> Result<Vec<Flight>, AgentError> {
        self.client
            .get(&format!(
                "/flights/search/{}/{}",
                segment(departure),
                segment(arrival)
            ))
            .await
    }

    #[instrument(skip(self, flight), fields(flight_number = %flight.flight_number))]
    pub async fn create_flight(&self, flight: &NewFlight) -> Result<Flight, AgentError> {
        self.client.post("/flights", flight).await
    }

    #[instrument(skip(self, update))]
    pub async fn update_flight(
        &self,
        id: i64,
        update: &FlightUpdate,
    ) -> Result<Flight, AgentError> {
        self.client.put(&format!("/flights/{}", id), update).await
    }

    #[instrument(skip(self))]
    pub async fn delete_flight(&self, id: i64) -> Result<Message, AgentError> {
        self.client.delete(&format!("/flights/{}", id)).await
    }

    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<Stats, AgentError> {
        self.client.get("/stats").await
    }

    /// Answer a free-text question using keyword routing.
    #[instrument(skip(self))]
    pub async fn respond(&self, text: &str) -> Result<String, AgentError> {
        let intent = Intent::parse(text);
        tracing::debug!(?intent, "Routed assistant question");

        match intent {
            Intent::SearchRoute { departure, arrival } => {
                let flights = self.search_flights(&departure, &arrival).await?;
                if flights.is_empty() {
                    return Ok(format!(
                        "No flights found from {} to {}.",
                        departure, arrival
                    ));
                }

                let mut out = format!("Flights from {} to {}:\n", departure, arrival);
                for flight in &flights {
                    out.push_str(&render::flight_bullet(flight));
                    out.push('\n');
                }
                out.push('\n');
                out.push_str(&recommendation(&departure, &arrival, &flights));
                Ok(out)
            }
            Intent::SearchWithoutRoute => Ok(format!(
                "Tell me where you are flying from and to, e.g. \"search PEK SHA\". \
                 Known airports: {}.",
                KNOWN_AIRPORTS.join(", ")
            )),
            Intent::Recommend => {
                let flights = self.list_flights(0, RECOMMENDATION_LIMIT).await?;
                if flights.is_empty() {
                    return Ok("No flights are available right now.".to_string());
                }

                let mut out = String::from("Recommended flights:\n");
                for flight in &flights {
                    out.push_str(&render::flight_bullet(flight));
                    out.push('\n');
                }
                if let Some(best) = cheapest(&flights) {
                    out.push_str(&format!(
                        "\nBest value: {} at ¥{}.",
                        best.flight_number, best.price
                    ));
                }
                Ok(out)
            }
            Intent::Stats => Ok(render::stats_block(&self.stats().await?)),
            Intent::Unknown => Ok(HELP_TEXT.to_string()),
        }
    }
}

/// Lowest price; the earlier flight wins ties.
pub fn cheapest(flights: &[Flight]) -> Option<&Flight> {
    flights
        .iter()
        .reduce(|best, f| if f.price < best.price { f } else { best })
}

/// Summary line for a route search.
pub fn recommendation(departure: &str, arrival: &str, flights: &[Flight]) -> String {
    let mut line = format!(
        "Found {} flights from {} to {}.",
        flights.len(),
        departure,
        arrival
    );
    if let Some(best) = cheapest(flights) {
        line.push_str(&format!(
            " Cheapest: {} at ¥{}.",
            best.flight_number, best.price
        ));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Utc};
    use rust_decimal::Decimal;

    fn flight(number: &str, price_cents: i64) -> Flight {
        Flight {
            id: 1,
            flight_number: number.to_string(),
            airline: "Air China".to_string(),
            departure_airport: "PEK".to_string(),
            arrival_airport: "SHA".to_string(),
            departure_time: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            arrival_time: NaiveTime::from_hms_opt(10, 45, 0).unwrap(),
            price: Decimal::new(price_cents, 2),
            available_seats: 10,
            aircraft_type: None,
            status: "active".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn cheapest_prefers_first_on_ties() {
        let flights = vec![flight("A", 50000), flight("B", 40000), flight("C", 40000)];
        assert_eq!(cheapest(&flights).unwrap().flight_number, "B");
        assert!(cheapest(&[]).is_none());
    }

    #[test]
    fn recommendation_text() {
        let flights = vec![flight("CA1001", 68000), flight("CA1002", 59900)];
        assert_eq!(
            recommendation("PEK", "SHA", &flights),
            "Found 2 flights from PEK to SHA. Cheapest: CA1002 at ¥599.00."
        );
        assert_eq!(
            recommendation("PEK", "SHA", &[]),
            "Found 0 flights from PEK to SHA."
        );
    }
}
