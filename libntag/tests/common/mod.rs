#![allow(dead_code)]
// Shared helpers for integration tests.

pub mod fixtures;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
