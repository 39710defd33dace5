//! Common test utilities for integration tests.
//!
//! Each integration test file compiles as a separate crate, so not every
//! helper is used everywhere.

#![allow(dead_code)]
#![allow(unused_imports)]

/// Return early from a test when no `git` binary is available.
macro_rules! skip_if_no_git {
    () => {
        if !common::git_available() {
            return;
        }
    };
}

pub mod test_repo;

pub use test_repo::{TestRepo, git_available};
