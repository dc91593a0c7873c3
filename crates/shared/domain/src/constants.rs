//! Domain-level constants.

// =============================================================================
// Listing
// =============================================================================

/// Page size used by adapters when the caller does not supply a limit
pub const DEFAULT_LIST_LIMIT: i64 = 10;

/// Offset used by adapters when the caller does not supply one
pub const DEFAULT_LIST_OFFSET: i64 = 0;
