//! Plain-text rendering for the CLI and the assistant.

use crate::models::{Booking, Flight, Stats};
use std::fmt::Write;

pub fn booking_line(b: &Booking) -> String {
    format!(
        "{} | {} | {} | {}",
        b.id, b.passenger_name, b.flight_number, b.status
    )
}

pub fn booking_detail(b: &Booking) -> String {
    format!(
        "Booking {id}: {title}\n\
         \x20 Passenger: {passenger}\n\
         \x20 Flight:    {flight} {from} -> {to}\n\
         \x20 Departs:   {dep_date} {dep_time}\n\
         \x20 Arrives:   {arr_date} {arr_time}\n\
         \x20 Seat:      {seat}\n\
         \x20 Price:     ¥{price}\n\
         \x20 Status:    {status}\n\
         \x20 Created:   {created}",
        id = b.id,
        title = b.title,
        passenger = b.passenger_name,
        flight = b.flight_number,
        from = b.departure_airport,
        to = b.arrival_airport,
        dep_date = b.departure_date,
        dep_time = b.departure_time,
        arr_date = b.arrival_date,
        arr_time = b.arrival_time,
        seat = b.seat_number.as_deref().unwrap_or("unassigned"),
        price = b.price,
        status = b.status,
        created = b.created_at.format("%Y-%m-%d %H:%M:%S"),
    )
}

pub fn flight_line(f: &Flight) -> String {
    format!(
        "{:<4} {:<8} {:<24} {}-{:<6} ¥{:<9} {:<5} {}",
        f.id,
        f.flight_number,
        f.airline,
        f.departure_airport,
        f.arrival_airport,
        f.price,
        f.available_seats,
        f.status
    )
}

pub fn flight_detail(f: &Flight) -> String {
    format!(
        "Flight {id}: {number} ({airline})\n\
         \x20 Route:    {from} -> {to}\n\
         \x20 Time:     {dep} -> {arr}\n\
         \x20 Aircraft: {aircraft}\n\
         \x20 Price:    ¥{price}\n\
         \x20 Seats:    {seats}\n\
         \x20 Status:   {status}\n\
         \x20 Created:  {created}",
        id = f.id,
        number = f.flight_number,
        airline = f.airline,
        from = f.departure_airport,
        to = f.arrival_airport,
        dep = f.departure_time,
        arr = f.arrival_time,
        aircraft = f.aircraft_type.as_deref().unwrap_or("unspecified"),
        price = f.price,
        seats = f.available_seats,
        status = f.status,
        created = f.created_at.format("%Y-%m-%d %H:%M:%S"),
    )
}

/// One short line per flight, as used in assistant answers.
pub fn flight_bullet(f: &Flight) -> String {
    format!(
        "- {} ({}) {}->{} ¥{}",
        f.flight_number, f.airline, f.departure_airport, f.arrival_airport, f.price
    )
}

pub fn stats_block(s: &Stats) -> String {
    let mut out = String::from("System statistics:\n");
    let _ = writeln!(out, "- Total flights: {}", s.total_flights);
    let _ = writeln!(out, "- Total bookings: {}", s.total_bookings);
    let _ = write!(out, "- Confirmed bookings: {}", s.confirmed_bookings);
    out
}

pub fn booking_list(bookings: &[Booking]) -> String {
    if bookings.is_empty() {
        return "No bookings found.".to_string();
    }
    bookings
        .iter()
        .map(booking_line)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn flight_list(flights: &[Flight]) -> String {
    if flights.is_empty() {
        return "No flights found.".to_string();
    }
    flights.iter().map(flight_line).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn booking() -> Booking {
        let created = Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap();
        Booking {
            id: 7,
            title: "Zhang San business trip".to_string(),
            passenger_name: "Zhang San".to_string(),
            flight_number: "CA1001".to_string(),
            departure_date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
            departure_time: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            arrival_date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
            arrival_time: NaiveTime::from_hms_opt(10, 45, 0).unwrap(),
            departure_airport: "PEK".to_string(),
            arrival_airport: "SHA".to_string(),
            seat_number: None,
            price: Decimal::new(68000, 2),
            status: "confirmed".to_string(),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn booking_line_is_pipe_separated() {
        assert_eq!(booking_line(&booking()), "7 | Zhang San | CA1001 | confirmed");
    }

    #[test]
    fn booking_detail_mentions_missing_seat() {
        let detail = booking_detail(&booking());
        assert!(detail.starts_with("Booking 7: Zhang San business trip"));
        assert!(detail.contains("Seat:      unassigned"));
        assert!(detail.contains("¥680.00"));
        assert!(detail.contains("2024-07-01 09:00:00"));
    }

    #[test]
    fn empty_lists() {
        assert_eq!(booking_list(&[]), "No bookings found.");
        assert_eq!(flight_list(&[]), "No flights found.");
    }

    #[test]
    fn stats_block_lists_counters() {
        let stats = Stats {
            total_bookings: 2,
            total_flights: 5,
            confirmed_bookings: 1,
            timestamp: Utc::now(),
        };
        assert_eq!(
            stats_block(&stats),
            "System statistics:\n- Total flights: 5\n- Total bookings: 2\n- Confirmed bookings: 1"
        );
    }
}
