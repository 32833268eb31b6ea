//! Shared pagination utilities for GraphQL resolvers

/// Maximum items per page for top-level list queries
pub const MAX_LIMIT: i32 = 100;

/// Maximum items for nested relationship resolvers
pub const MAX_NESTED_LIMIT: i32 = 100;

/// Clamp pagination limit to valid range
#[inline]
pub fn clamp_limit(limit: i32, max: i32) -> i64 {
    limit.clamp(1, max) as i64
}
