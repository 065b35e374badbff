pub trait ClockPort: Send + Sync {
    /// Seconds since the Unix epoch.
    fn now_secs(&self) -> i64;
}
