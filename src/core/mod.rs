pub mod add;
pub mod advisor;
pub mod backup;
pub mod calculator;
pub mod care;
pub mod export;
pub mod log;
pub mod notify;
pub mod watch;
pub mod water;
