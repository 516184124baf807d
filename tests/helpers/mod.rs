//! Test helpers module
//!
//! Utilities shared by the integration tests: a recording outbound sink, a
//! ready-made application context and a mock Telegram Bot API.

#![allow(dead_code)]

pub mod telegram_mock;
pub mod test_context;
pub mod test_data;

#[allow(unused_imports)]
pub use telegram_mock::*;
#[allow(unused_imports)]
pub use test_context::*;
#[allow(unused_imports)]
pub use test_data::*;
