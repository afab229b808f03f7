//! Live server tests (run with: cargo test --test integration -- --ignored --test-threads=1)

mod api_tests;
