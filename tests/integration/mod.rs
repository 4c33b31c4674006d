//! Integration tests for the history pager

mod test_utils;
mod window_walk;
