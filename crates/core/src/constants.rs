/// Canonical calendar-date format for range bounds, series keys and storage keys.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Object store holding asset records.
pub const ASSET_STORE: &str = "Asset";

/// Object store holding liability records.
pub const LIABILITY_STORE: &str = "Liability";

/// Object store holding the computed balance sheet.
pub const BALANCE_SHEET_STORE: &str = "BalanceSheet";

/// The single well-known key of the stored balance sheet series.
/// One series per installation.
pub const BALANCE_SHEET_KEY: &str = "BalanceSheet";

/// Default upper bound on points handed to a chart.
pub const DEFAULT_CHART_MAX_POINTS: usize = 200;

/// Largest accepted valuation amount (one quadrillion). Any realistic number
/// of holdings at this amount still totals well inside `Decimal`'s range.
pub const MAX_VALUATION_AMOUNT: i64 = 1_000_000_000_000_000;

/// Longest balance sheet range, in days (one century).
pub const MAX_SERIES_DAYS: usize = 36_525;
