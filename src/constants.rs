//! Domain constants for aggregation and indicator calculations.

/// Brand used when a request omits the brand parameter or sends a blank one
pub const DEFAULT_BRAND: &str = "Apple";

/// Lookback window in days for each period kind
pub const WEEK_WINDOW_DAYS: i64 = 7;
pub const MONTH_WINDOW_DAYS: i64 = 30;
pub const YEAR_WINDOW_DAYS: i64 = 365;

/// Trading days per year, used to annualize daily return volatility
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Calendar days per year, used to annualize the simple historical return
pub const CALENDAR_DAYS_PER_YEAR: f64 = 365.0;

/// Assumed total shares outstanding for the market value estimate.
/// A rough illustrative figure, not a per-brand float.
pub const ASSUMED_TOTAL_SHARES: f64 = 100_000_000.0;

/// Divisor for the "trillion" / "hundred million" scale labels
pub const SCALE_HUNDRED_MILLION: f64 = 100_000_000.0;
