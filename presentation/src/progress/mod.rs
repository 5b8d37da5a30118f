//! Progress reporting for comparison runs

pub mod reporter;
