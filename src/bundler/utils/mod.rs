//! Shared file-system and hashing helpers.

pub mod checksum;
pub mod fs;
