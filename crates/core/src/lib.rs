//! Domain types shared by the filedepot crates.

pub mod domain;
