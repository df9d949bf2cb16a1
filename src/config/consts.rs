/// Default number of attempts for a model query (first try included)
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default fixed delay between model query attempts, in milliseconds
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1_000;
/// Default per-attempt timeout for model queries, in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
