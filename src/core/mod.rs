//! Core XML parsing primitives
//!
//! This module contains the fundamental building blocks for XML parsing:
//! - Scanner: character cursor with single-slot pushback and line/column tracking
//! - Tokenizer: lexical primitives (content, tag tokens, meta tokens, CDATA)
//! - Entities: entity decoding and output escaping
//! - Attributes: insertion-ordered attribute map

pub mod attributes;
pub mod entities;
pub mod scanner;
pub mod tokenizer;
