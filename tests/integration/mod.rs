//! Integration tests against the in-process stub user service

pub mod client_test;
pub mod scenarios_test;
