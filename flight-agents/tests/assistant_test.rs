mod common;

use common::{new_flight, TestServer};
use flight_agents::airline::HELP_TEXT;

#[tokio::test]
async fn route_search_lists_flights_and_recommendation() {
    let server = TestServer::spawn().await;
    let agent = server.airline_agent();
    agent
        .create_flight(&new_flight("CA1001", "PEK", "SHA", 68000))
        .await
        .unwrap();
    agent
        .create_flight(&new_flight("MU5101", "PEK", "SHA", 55000))
        .await
        .unwrap();

    let answer = agent.respond("search flights pek to sha").await.unwrap();
    assert!(answer.starts_with("Flights from PEK to SHA:"));
    assert!(answer.contains("- CA1001 (Air China) PEK->SHA ¥680.00"));
    assert!(answer.contains("Found 2 flights from PEK to SHA. Cheapest: MU5101 at ¥550.00."));
}

#[tokio::test]
async fn route_search_without_results() {
    let server = TestServer::spawn().await;
    let answer = server
        .airline_agent()
        .respond("查询 CTU KMG 航班")
        .await
        .unwrap();
    assert_eq!(answer, "No flights found from CTU to KMG.");
}

#[tokio::test]
async fn search_without_route_asks_for_airports() {
    let server = TestServer::spawn().await;
    let answer = server.airline_agent().respond("find a flight").await.unwrap();
    assert!(answer.contains("Known airports: PEK, SHA"));
}

#[tokio::test]
async fn recommendation_uses_first_five_flights() {
    let server = TestServer::spawn_seeded().await;
    let answer = server
        .airline_agent()
        .respond("any cheap deals?")
        .await
        .unwrap();

    assert!(answer.starts_with("Recommended flights:"));
    assert_eq!(answer.lines().filter(|l| l.starts_with("- ")).count(), 5);
    assert!(answer.ends_with("Best value: 3U4001 at ¥580.00."));
}

#[tokio::test]
async fn recommendation_on_empty_store() {
    let server = TestServer::spawn().await;
    let answer = server.airline_agent().respond("推荐").await.unwrap();
    assert_eq!(answer, "No flights are available right now.");
}

#[tokio::test]
async fn stats_and_help() {
    let server = TestServer::spawn_seeded().await;
    let agent = server.airline_agent();

    let answer = agent.respond("show me the stats").await.unwrap();
    assert!(answer.contains("- Total flights: 5"));
    assert!(answer.contains("- Confirmed bookings: 2"));

    assert_eq!(agent.respond("hello").await.unwrap(), HELP_TEXT);
}
