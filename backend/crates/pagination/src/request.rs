//! Normalised page/limit parameters.

use serde::{Deserialize, Serialize};

/// Page number used when the client omits one or sends garbage.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the client omits one or sends garbage.
pub const DEFAULT_LIMIT: u32 = 20;
/// Largest page size a client may request.
pub const MAX_LIMIT: u32 = 100;

/// A validated offset pagination request.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= limit <= MAX_LIMIT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a request from numeric values, clamping them into range.
    ///
    /// ```
    /// use pagination::{MAX_LIMIT, PageRequest};
    ///
    /// let request = PageRequest::new(0, 500);
    /// assert_eq!(request.page(), 1);
    /// assert_eq!(request.limit(), MAX_LIMIT);
    /// ```
    #[must_use]
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: clamp_to_u32(page, 1, u32::MAX),
            limit: clamp_to_u32(limit, 1, MAX_LIMIT),
        }
    }

    /// Build a request from raw query-string values.
    ///
    /// Values are read like `parseInt`: leading whitespace and an optional
    /// sign are accepted, then the longest run of ASCII digits. Anything that
    /// yields no digits falls back to the default for that parameter; a
    /// parsed value is clamped, so `limit=0` becomes 1.
    ///
    /// ```
    /// use pagination::{DEFAULT_LIMIT, PageRequest};
    ///
    /// let request = PageRequest::from_raw(Some("2abc"), Some("lots"));
    /// assert_eq!(request.page(), 2);
    /// assert_eq!(request.limit(), DEFAULT_LIMIT);
    /// ```
    #[must_use]
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page
            .and_then(parse_leading_int)
            .unwrap_or(i64::from(DEFAULT_PAGE));
        let limit = limit
            .and_then(parse_leading_int)
            .unwrap_or(i64::from(DEFAULT_LIMIT));
        Self::new(page, limit)
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items to skip before the page starts.
    #[must_use]
    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

fn clamp_to_u32(value: i64, min: u32, max: u32) -> u32 {
    let clamped = value.clamp(i64::from(min), i64::from(max));
    u32::try_from(clamped).unwrap_or(max)
}

fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, trimmed.get(1..)?),
        Some(b'+') => (false, trimmed.get(1..)?),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(byte - b'0'));
    }

    seen_digit.then_some(if negative { -value } else { value })
}
