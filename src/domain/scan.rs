use uuid::Uuid;

use crate::domain::ScanError;

/// Prefix of the loyalty QR payload: `cafe:<user uuid>`.
pub const SCAN_PREFIX: &str = "cafe";

/// Parse a scanned identifier into a user id.
///
/// Accepts the full `cafe:<uuid>` payload or a bare UUID (staff sometimes
/// type the id in by hand). Anything else fails before any ledger lookup is
/// attempted.
pub fn parse_scan_payload(raw: &str) -> Result<Uuid, ScanError> {
    let trimmed = raw.trim();
    let candidate = trimmed
        .strip_prefix(SCAN_PREFIX)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(trimmed);

    Uuid::parse_str(candidate).map_err(|_| ScanError::InvalidIdentifierFormat)
}
