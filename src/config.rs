//! Environment Configuration
//!
//! Per-operator synthetic durations, worker concurrency and the HTTP port,
//! all read from the environment with safe fallbacks. Invalid values fall
//! back to their defaults rather than aborting startup.

use crate::compiler::types::Op;
use std::time::Duration;

const DEFAULT_OPERATION_MS: u64 = 1000;
const DEFAULT_COMPUTING_POWER: usize = 4;
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub time_addition: Duration,
    pub time_subtraction: Duration,
    pub time_multiplication: Duration,
    pub time_division: Duration,
    /// Number of concurrent worker units.
    pub computing_power: usize,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            time_addition: env_duration_ms("TIME_ADDITION_MS", DEFAULT_OPERATION_MS),
            time_subtraction: env_duration_ms("TIME_SUBTRACTION_MS", DEFAULT_OPERATION_MS),
            time_multiplication: env_duration_ms("TIME_MULTIPLICATIONS_MS", DEFAULT_OPERATION_MS),
            time_division: env_duration_ms("TIME_DIVISIONS_MS", DEFAULT_OPERATION_MS),
            computing_power: env_usize("COMPUTING_POWER", DEFAULT_COMPUTING_POWER),
            port: env_u16("PORT", DEFAULT_PORT),
        }
    }

    /// The synthetic time budget handed to workers with each task.
    pub fn operation_time(&self, op: Op) -> Duration {
        match op {
            Op::Add => self.time_addition,
            Op::Sub => self.time_subtraction,
            Op::Mul => self.time_multiplication,
            Op::Div => self.time_division,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_addition: Duration::from_millis(DEFAULT_OPERATION_MS),
            time_subtraction: Duration::from_millis(DEFAULT_OPERATION_MS),
            time_multiplication: Duration::from_millis(DEFAULT_OPERATION_MS),
            time_division: Duration::from_millis(DEFAULT_OPERATION_MS),
            computing_power: DEFAULT_COMPUTING_POWER,
            port: DEFAULT_PORT,
        }
    }
}

fn env_duration_ms(name: &str, default_ms: u64) -> Duration {
    let ms = std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default_ms);
    Duration::from_millis(ms)
}

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(default)
}

fn env_u16(name: &str, default: u16) -> u16 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(default)
}
