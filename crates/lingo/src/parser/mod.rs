//! Bundle and template parsers.
//!
//! This module turns JSON bundle sources into typed node trees and message
//! strings into placeholder templates. The AST is public so external tooling
//! can inspect placeholder usage.

pub mod ast;
mod bundle;
pub mod error;
mod template;

pub use ast::*;
pub(crate) use bundle::validate_key;
pub use bundle::{parse_bundle, parse_bundle_value};
pub use error::ParseError;
pub use template::parse_template;
