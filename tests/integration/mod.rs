//! Integration tests for the overrun binary
//!
//! Each test runs the compiled binary from an empty temporary directory,
//! with HOME and XDG_CONFIG_HOME pointed there so no user config leaks in.

mod cli_tests;
