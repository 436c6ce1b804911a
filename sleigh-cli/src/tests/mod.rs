//! Shared test harness modules for the Sleigh CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]
#![expect(
    clippy::float_arithmetic,
    reason = "Tests compare reported distances within a tolerance"
)]

use super::*;

mod helpers;
