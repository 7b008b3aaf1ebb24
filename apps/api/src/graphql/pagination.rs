//! Shared pagination utilities for GraphQL resolvers

use async_graphql::InputObject;

use crate::repositories::Page;

/// Maximum items per page for top-level list queries
pub const MAX_LIMIT: i32 = 100;

/// Page size when the client does not ask for one
pub const DEFAULT_LIMIT: i32 = 20;

/// Limit/offset pagination arguments
#[derive(Debug, Clone, Copy, InputObject)]
pub struct PaginationInput {
    #[graphql(default = 20)]
    pub limit: i32,
    #[graphql(default = 0)]
    pub offset: i32,
}

impl Default for PaginationInput {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl PaginationInput {
    /// Clamp into a store page window
    pub fn to_page(self) -> Page {
        Page::new(clamp_limit(self.limit, MAX_LIMIT), clamp_offset(self.offset))
    }
}

/// Clamp pagination limit to valid range
#[inline]
pub fn clamp_limit(limit: i32, max: i32) -> i64 {
    limit.clamp(1, max) as i64
}

/// Clamp offset to non-negative
#[inline]
pub fn clamp_offset(offset: i32) -> i64 {
    offset.max(0) as i64
}
