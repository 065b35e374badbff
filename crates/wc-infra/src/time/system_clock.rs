use chrono::Utc;
use wc_core::ports::ClockPort;

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now_secs(&self) -> i64 {
        Utc::now().timestamp()
    }
}
