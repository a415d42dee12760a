//! Integration tests for chat-archiver.

mod helpers;

mod capture_test;
mod cli_test;
mod pipeline_test;
