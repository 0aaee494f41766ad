//! Types shared between the EduOS kernel and its portable crates.

#![cfg_attr(not(test), no_std)]

pub mod error;

pub use error::{FsError, ProcessError};
