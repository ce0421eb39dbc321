// Copyright (c) 2025 - MV Consulting
//! Property-Based Tests Module
//!
//! - `option_parsing` - closed option sets accept exactly their literals
//! - `config_resolution` - defaults, cross-field rules, idempotence and
//!   serialization of resolved configurations

mod config_resolution;
mod option_parsing;
