//! Shared SQL fragments for repositories and loaders

// ============================================================================
// SQL Column Constants
//
// These constants define the SELECT column lists for each entity type so
// repositories and batch loaders map rows the same way.
// ============================================================================

/// SQL columns for flight queries
pub const FLIGHT_COLUMNS: &str = r#"
    id, flight_number, origin, destination,
    departure_time, arrival_time, aircraft_type,
    total_seats, available_seats, status,
    created_at, updated_at
"#;

/// SQL columns for fare queries
pub const FARE_COLUMNS: &str = r#"
    id, flight_id, fare_class, price, baggage_allowance,
    is_refundable, is_changeable, available_seats,
    created_at, updated_at
"#;

/// SQL columns for booking queries
pub const BOOKING_COLUMNS: &str = r#"
    id, booking_reference, flight_id, fare_id,
    passenger_name, passenger_email, passenger_phone, seat_number,
    booking_status, total_price, booked_at,
    created_at, updated_at
"#;

/// Normalize an IATA airport code for comparison
pub fn normalize_airport_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
