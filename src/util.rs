//! Shared utility modules used across Sigap components.

pub mod similarity;
