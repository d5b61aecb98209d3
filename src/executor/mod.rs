//! Aggregators run a list of checks and turn their failures into one report.

mod concurrent;
mod parallel;
pub mod results;
mod sequential;

pub use concurrent::{
    multi_assert_async, multi_assert_async_with, AsyncCheck, MultiAssertAsync,
};
pub use parallel::{multi_assert_parallel, multi_assert_parallel_with};
pub use sequential::{multi_assert, multi_assert_with, Check, MultiAssert};
