#![allow(dead_code)]

pub mod fixtures;
pub mod strategies;
pub mod test_db;

pub use fixtures::*;
pub use test_db::*;
