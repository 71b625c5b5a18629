//! # Text Transforms
//!
//! Pure string-level rules applied to already-rendered entries. None of them
//! can fail: input that matches no rule passes through unchanged.
//!
//! ## Modules
//!
//! - **`tasks`**: `TaskType` classification from the leading keyword
//! - **`properties`**: removal of `key:: value` metadata tokens
//! - **`blocks`**: `#+BEGIN_X` / `#+END_X` admonitions rewritten as blockquotes

pub mod blocks;
pub mod properties;
pub mod tasks;

pub use blocks::{AdmonitionKind, is_block, rewrite_block};
pub use properties::{has_properties, strip_properties, strip_property_tokens};
pub use tasks::TaskType;
