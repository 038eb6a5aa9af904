//! On-disk sheet formats.

pub mod json;

pub use json::{parse_json, parse_json_content, write_json, write_json_content};
