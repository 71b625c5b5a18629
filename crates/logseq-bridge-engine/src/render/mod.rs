//! # Entry Rendering
//!
//! Post-processing of host-rendered list entries.
//!
//! The host owns the rendered tree. It hands the engine a [`Fragment`], the
//! engine walks its entries and edits each through the [`EntryNode`]
//! capability: read text, read and replace markup, edit text children,
//! prepend decorations and add style classes.
//!
//! ## Modules
//!
//! - **`node`**: the `EntryNode` capability, `Decoration` and `StyleClass`
//! - **`hooks`**: `Fragment`, `PostProcessor` and `RenderContext`, the render hook seam
//! - **`entry`**: `EntryRenderer`, the per-entry algorithm

pub mod entry;
pub mod hooks;
pub mod node;

pub use entry::{EntryRenderer, RenderOptions};
pub use hooks::{Fragment, PostProcessor, RenderContext};
pub use node::{Decoration, EntryNode, StyleClass};
