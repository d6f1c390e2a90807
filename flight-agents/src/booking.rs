//! Booking management agent.

use crate::client::{segment, McpClient};
use crate::error::AgentError;
use crate::models::{Booking, BookingUpdate, Message, NewBooking};
use tracing::instrument;

pub struct BookingAgent {
    client: McpClient,
}

impl BookingAgent {
    pub fn new(client: McpClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &McpClient {
        &self.client
    }

    #[instrument(skip(self, booking), fields(passenger = %booking.passenger_name))]
    pub async fn create_booking(&self, booking: &NewBooking) -> Result<Booking, AgentError> {
        self.client.post("/bookings", booking).await
    }

    #[instrument(skip(self))]
    pub async fn list_bookings(&self, skip: i64, limit: i64) -> Result<Vec<Booking>, AgentError> {
        self.client
            .get_with_query("/bookings", &[("skip", skip), ("limit", limit)])
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_booking(&self, id: i64) -> Result<Booking, AgentError> {
        self.client.get(&format!("/bookings/{}", id)).await
    }

    #[instrument(skip(self))]
    pub async fn search_bookings_by_passenger(
        &self,
        passenger_name: &str,
    ) -> Result<Vec<Booking>, AgentError> {
        self.client
            .get(&format!("/bookings/search/{}", segment(passenger_name)))
            .await
    }

    #[instrument(skip(self, update))]
    pub async fn update_booking(
        &self,
        id: i64,
        update: &BookingUpdate,
    ) -> Result<Booking, AgentError> {
        self.client.put(&format!("/bookings/{}", id), update).await
    }

    #[instrument(skip(self))]
    pub async fn delete_booking(&self, id: i64) -> Result<Message, AgentError> {
        self.client.delete(&format!("/bookings/{}", id)).await
    }
}
