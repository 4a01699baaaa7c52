#![allow(dead_code)]

pub mod admin_helpers;
pub mod in_memory_store;
pub mod utils;
