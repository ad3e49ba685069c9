//! Integration tests for Lumen Docs
//!
//! These tests drive complete generation runs and the external clients
//! against mock servers.

mod openai_client;
mod pipeline;
