pub mod constants;
pub mod geodesy;
pub mod category;
pub mod history;
pub mod tracker;
pub mod messages;
pub mod feed;
pub mod output;
pub mod config;
pub mod error;

/// Current wall-clock time as Unix seconds
pub fn now_secs() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
