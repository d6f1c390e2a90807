use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use flight_agents::models::{BookingUpdate, FlightUpdate, NewBooking, NewFlight};
use flight_agents::{render, AgentConfig, AirlineAgent, BookingAgent, McpClient};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Command-line front end for the booking and airline agents.
#[derive(Debug, Parser)]
#[command(name = "flight-agent", version)]
struct Cli {
    /// Base URL of flight-service.
    #[arg(long, global = true, env = "MCP_SERVER_URL")]
    server_url: Option<String>,

    /// Print raw JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check that flight-service is reachable.
    Health,
    /// Manage bookings.
    #[command(subcommand)]
    Booking(BookingCommand),
    /// Search and manage flights.
    #[command(subcommand)]
    Flight(FlightCommand),
    /// Show booking and flight counters.
    Stats,
    /// Ask the airline assistant a free-text question.
    Ask {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

#[derive(Debug, Subcommand)]
enum BookingCommand {
    List(PageArgs),
    Get { id: i64 },
    /// Search by passenger name (substring, case-insensitive).
    Search { passenger_name: String },
    Create(CreateBookingArgs),
    Update(UpdateBookingArgs),
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
enum FlightCommand {
    List(PageArgs),
    Get { id: i64 },
    /// Look up a flight by its number.
    Number { flight_number: String },
    /// Search active flights by departure and arrival airport.
    Search { departure: String, arrival: String },
    Create(CreateFlightArgs),
    Update(UpdateFlightArgs),
    Delete { id: i64 },
}

#[derive(Debug, Args)]
struct PageArgs {
    #[arg(long, default_value_t = 0)]
    skip: i64,
    #[arg(long, default_value_t = 100)]
    limit: i64,
}

#[derive(Debug, Args)]
struct CreateBookingArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    passenger: String,
    #[arg(long)]
    flight_number: String,
    #[arg(long)]
    departure_date: NaiveDate,
    #[arg(long, value_parser = parse_clock_time)]
    departure_time: NaiveTime,
    #[arg(long)]
    arrival_date: NaiveDate,
    #[arg(long, value_parser = parse_clock_time)]
    arrival_time: NaiveTime,
    #[arg(long = "from")]
    departure_airport: String,
    #[arg(long = "to")]
    arrival_airport: String,
    #[arg(long)]
    seat: Option<String>,
    #[arg(long)]
    price: Decimal,
}

#[derive(Debug, Args)]
struct UpdateBookingArgs {
    id: i64,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    passenger: Option<String>,
    #[arg(long)]
    flight_number: Option<String>,
    #[arg(long)]
    departure_date: Option<NaiveDate>,
    #[arg(long, value_parser = parse_clock_time)]
    departure_time: Option<NaiveTime>,
    #[arg(long)]
    arrival_date: Option<NaiveDate>,
    #[arg(long, value_parser = parse_clock_time)]
    arrival_time: Option<NaiveTime>,
    #[arg(long = "from")]
    departure_airport: Option<String>,
    #[arg(long = "to")]
    arrival_airport: Option<String>,
    #[arg(long, conflicts_with = "clear_seat")]
    seat: Option<String>,
    /// Remove the seat assignment.
    #[arg(long)]
    clear_seat: bool,
    #[arg(long)]
    price: Option<Decimal>,
    #[arg(long)]
    status: Option<String>,
}

impl UpdateBookingArgs {
    fn to_update(&self) -> BookingUpdate {
        BookingUpdate {
            title: self.title.clone(),
            passenger_name: self.passenger.clone(),
            flight_number: self.flight_number.clone(),
            departure_date: self.departure_date,
            departure_time: self.departure_time,
            arrival_date: self.arrival_date,
            arrival_time: self.arrival_time,
            departure_airport: self.departure_airport.clone(),
            arrival_airport: self.arrival_airport.clone(),
            seat_number: if self.clear_seat {
                Some(None)
            } else {
                self.seat.clone().map(Some)
            },
            price: self.price,
            status: self.status.clone(),
        }
    }
}

#[derive(Debug, Args)]
struct CreateFlightArgs {
    #[arg(long)]
    flight_number: String,
    #[arg(long)]
    airline: String,
    #[arg(long = "from")]
    departure_airport: String,
    #[arg(long = "to")]
    arrival_airport: String,
    #[arg(long, value_parser = parse_clock_time)]
    departure_time: NaiveTime,
    #[arg(long, value_parser = parse_clock_time)]
    arrival_time: NaiveTime,
    #[arg(long)]
    price: Decimal,
    #[arg(long, default_value_t = 0)]
    seats: i32,
    #[arg(long)]
    aircraft: Option<String>,
    #[arg(long)]
    status: Option<String>,
}

#[derive(Debug, Args)]
struct UpdateFlightArgs {
    id: i64,
    #[arg(long)]
    flight_number: Option<String>,
    #[arg(long)]
    airline: Option<String>,
    #[arg(long = "from")]
    departure_airport: Option<String>,
    #[arg(long = "to")]
    arrival_airport: Option<String>,
    #[arg(long, value_parser = parse_clock_time)]
    departure_time: Option<NaiveTime>,
    #[arg(long, value_parser = parse_clock_time)]
    arrival_time: Option<NaiveTime>,
    #[arg(long)]
    price: Option<Decimal>,
    #[arg(long)]
    seats: Option<i32>,
    #[arg(long, conflicts_with = "clear_aircraft")]
    aircraft: Option<String>,
    /// Remove the aircraft type.
    #[arg(long)]
    clear_aircraft: bool,
    #[arg(long)]
    status: Option<String>,
}

impl UpdateFlightArgs {
    fn to_update(&self) -> FlightUpdate {
        FlightUpdate {
            flight_number: self.flight_number.clone(),
            airline: self.airline.clone(),
            departure_airport: self.departure_airport.clone(),
            arrival_airport: self.arrival_airport.clone(),
            departure_time: self.departure_time,
            arrival_time: self.arrival_time,
            price: self.price,
            available_seats: self.seats,
            aircraft_type: if self.clear_aircraft {
                Some(None)
            } else {
                self.aircraft.clone().map(Some)
            },
            status: self.status.clone(),
        }
    }
}

/// Accepts `HH:MM` or `HH:MM:SS`.
fn parse_clock_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| format!("invalid time '{}', expected HH:MM or HH:MM:SS", value))
}

fn emit<T: Serialize>(
    json: bool,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text(value));
    }
    Ok(())
}

async fn run_booking(
    agent: &BookingAgent,
    json: bool,
    command: BookingCommand,
) -> anyhow::Result<()> {
    match command {
        BookingCommand::List(page) => {
            let bookings = agent.list_bookings(page.skip, page.limit).await?;
            emit(json, &bookings, |b| render::booking_list(b))
        }
        BookingCommand::Get { id } => {
            let booking = agent.get_booking(id).await?;
            emit(json, &booking, render::booking_detail)
        }
        BookingCommand::Search { passenger_name } => {
            let bookings = agent.search_bookings_by_passenger(&passenger_name).await?;
            emit(json, &bookings, |b| render::booking_list(b))
        }
        BookingCommand::Create(args) => {
            let booking = agent
                .create_booking(&NewBooking {
                    title: args.title,
                    passenger_name: args.passenger,
                    flight_number: args.flight_number,
                    departure_date: args.departure_date,
                    departure_time: args.departure_time,
                    arrival_date: args.arrival_date,
                    arrival_time: args.arrival_time,
                    departure_airport: args.departure_airport,
                    arrival_airport: args.arrival_airport,
                    seat_number: args.seat,
                    price: args.price,
                })
                .await?;
            emit(json, &booking, |b| format!("Booking created with ID {}", b.id))
        }
        BookingCommand::Update(args) => {
            let booking = agent.update_booking(args.id, &args.to_update()).await?;
            emit(json, &booking, render::booking_detail)
        }
        BookingCommand::Delete { id } => {
            let message = agent.delete_booking(id).await?;
            emit(json, &message, |m| m.message.clone())
        }
    }
}

async fn run_flight(
    agent: &AirlineAgent,
    json: bool,
    command: FlightCommand,
) -> anyhow::Result<()> {
    match command {
        FlightCommand::List(page) => {
            let flights = agent.list_flights(page.skip, page.limit).await?;
            emit(json, &flights, |f| render::flight_list(f))
        }
        FlightCommand::Get { id } => {
            let flight = agent.get_flight(id).await?;
            emit(json, &flight, render::flight_detail)
        }
        FlightCommand::Number { flight_number } => {
            let flight = agent.get_flight_by_number(&flight_number).await?;
            emit(json, &flight, render::flight_detail)
        }
        FlightCommand::Search { departure, arrival } => {
            let flights = agent.search_flights(&departure, &arrival).await?;
            emit(json, &flights, |f| render::flight_list(f))
        }
        FlightCommand::Create(args) => {
            let flight = agent
                .create_flight(&NewFlight {
                    flight_number: args.flight_number,
                    airline: args.airline,
                    departure_airport: args.departure_airport,
                    arrival_airport: args.arrival_airport,
                    departure_time: args.departure_time,
                    arrival_time: args.arrival_time,
                    price: args.price,
                    available_seats: args.seats,
                    aircraft_type: args.aircraft,
                    status: args.status,
                })
                .await?;
            emit(json, &flight, |f| format!("Flight created with ID {}", f.id))
        }
        FlightCommand::Update(args) => {
            let flight = agent.update_flight(args.id, &args.to_update()).await?;
            emit(json, &flight, render::flight_detail)
        }
        FlightCommand::Delete { id } => {
            let message = agent.delete_flight(id).await?;
            emit(json, &message, |m| m.message.clone())
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AgentConfig::from_env();
    if let Some(url) = cli.server_url {
        config.server_url = url;
    }
    let client = McpClient::from_config(&config);

    match cli.command {
        Command::Health => {
            let health = client.health().await?;
            emit(cli.json, &health, |h| {
                format!("flight-service at {} is {}", client.base_url(), h.status)
            })
        }
        Command::Booking(command) => {
            run_booking(&BookingAgent::new(client), cli.json, command).await
        }
        Command::Flight(command) => {
            run_flight(&AirlineAgent::new(client), cli.json, command).await
        }
        Command::Stats => {
            let stats = AirlineAgent::new(client).stats().await?;
            emit(cli.json, &stats, render::stats_block)
        }
        Command::Ask { text } => {
            let answer = AirlineAgent::new(client).respond(&text.join(" ")).await?;
            if cli.json {
                println!("{}", serde_json::json!({ "answer": answer }));
            } else {
                println!("{}", answer);
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse()).await
}
