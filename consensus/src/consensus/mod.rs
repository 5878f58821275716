//! GHOSTDAG consensus algorithms
//!
//! This module holds the DAG index and graph queries together with
//! the colouring, scoring and ordering rules layered on top of them.

pub mod dag;
pub mod ghostdag;
