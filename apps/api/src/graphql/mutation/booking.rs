//! Booking mutations
//!
//! Input is validated and normalized here; seat accounting and the insert
//! happen in one transaction in [`BookingRepository::create`].

use async_graphql::{Context, InputObject, Object, Result, ID};

use crate::error::{to_graphql_error, ApiError, ApiResult};
use crate::graphql::parse_id;
use crate::graphql::types::Booking;
use crate::models::NewBooking;
use crate::repositories::BookingRepository;

/// Maximum passenger name length
const MAX_NAME_LENGTH: usize = 100;

/// Maximum email length (RFC 5321)
const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum phone number length
const MAX_PHONE_LENGTH: usize = 32;

/// Input for createBooking
#[derive(Debug, InputObject)]
pub struct CreateBookingInput {
    pub flight_id: ID,
    pub fare_id: ID,
    pub passenger_name: String,
    pub passenger_email: String,
    pub passenger_phone: Option<String>,
    /// Seat such as "12A"
    pub seat_number: Option<String>,
}

/// Booking mutations
#[derive(Default)]
pub struct BookingMutation;

#[Object]
impl BookingMutation {
    /// Book one seat on a fare
    ///
    /// Fails with CONFLICT when the fare is sold out and NOT_FOUND when the
    /// flight or fare does not exist.
    async fn create_booking(
        &self,
        ctx: &Context<'_>,
        input: CreateBookingInput,
    ) -> Result<Booking> {
        let repo = ctx.data::<BookingRepository>()?;
        let new_booking = validate_input(input).map_err(to_graphql_error)?;
        let booking = repo.create(&new_booking).await.map_err(to_graphql_error)?;
        Ok(Booking::from(booking))
    }
}

/// Validate and normalize booking input
fn validate_input(input: CreateBookingInput) -> ApiResult<NewBooking> {
    let flight_id = parse_id(&input.flight_id, "flight")?;
    let fare_id = parse_id(&input.fare_id, "fare")?;

    let passenger_name = input.passenger_name.trim().to_string();
    if passenger_name.is_empty() {
        return Err(ApiError::ValidationError(
            "passenger name is required".to_string(),
        ));
    }
    if passenger_name.chars().count() > MAX_NAME_LENGTH {
        return Err(ApiError::ValidationError(format!(
            "passenger name must be at most {} characters",
            MAX_NAME_LENGTH
        )));
    }

    let passenger_email = input.passenger_email.trim().to_ascii_lowercase();
    if !is_valid_email(&passenger_email) {
        return Err(ApiError::ValidationError(
            "passenger email is invalid".to_string(),
        ));
    }

    let passenger_phone = non_blank(input.passenger_phone);
    if let Some(phone) = &passenger_phone {
        if phone.len() > MAX_PHONE_LENGTH {
            return Err(ApiError::ValidationError(format!(
                "passenger phone must be at most {} characters",
                MAX_PHONE_LENGTH
            )));
        }
    }

    let seat_number = non_blank(input.seat_number).map(|s| s.to_ascii_uppercase());
    if let Some(seat) = &seat_number {
        if !is_valid_seat(seat) {
            return Err(ApiError::ValidationError(format!(
                "seat number '{}' is invalid; expected a row and a letter such as 12A",
                seat
            )));
        }
    }

    Ok(NewBooking {
        flight_id,
        fare_id,
        passenger_name,
        passenger_email,
        passenger_phone,
        seat_number,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_EMAIL_LENGTH || email.contains(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Row of one to three digits followed by a single seat letter
fn is_valid_seat(seat: &str) -> bool {
    let Some(letter) = seat.chars().last() else {
        return false;
    };
    let row = &seat[..seat.len() - letter.len_utf8()];
    letter.is_ascii_uppercase()
        && (1..=3).contains(&row.len())
        && row.chars().all(|c| c.is_ascii_digit())
        && !row.starts_with('0')
}
