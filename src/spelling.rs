//! Vocabulary-driven typo correction for Sigap.
//!
//! Survey answers are full of dialect spellings and typos. This module maps
//! each token onto the closest domain term when the two are similar enough,
//! so the keyword rules downstream see the canonical spelling.

pub mod corrector;
