#![allow(ambiguous_glob_reexports)]

pub mod create_recoup;
pub mod initialize_protocol;

pub use create_recoup::*;
pub use initialize_protocol::*;
