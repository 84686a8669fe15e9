//! Text analysis module for Sigap.
//!
//! This module provides the deterministic text cleanup applied to every
//! survey answer before any vocabulary lookup happens: a chain of char
//! filters composed into a [`normalizer::TextNormalizer`].

pub mod char_filter;
pub mod normalizer;
