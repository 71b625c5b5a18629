pub mod models;
pub mod overlay;
pub mod plugin;
pub mod render;
pub mod transform;

// Re-export key types for easier usage
pub use models::{DATA_LINE, Element};
pub use overlay::{
    HeadingLevel, HeadingOverlay, HeadingToken, LineCursor, LineOverlay, OverlayMode, Span,
    tokenize_line,
};
pub use plugin::{Host, HookId, HookRegistry, Plugin, PluginSettings, VERSION};
pub use render::{
    Decoration, EntryNode, EntryRenderer, Fragment, PostProcessor, RenderContext, RenderOptions,
    StyleClass,
};
pub use transform::{
    AdmonitionKind, TaskType, has_properties, is_block, rewrite_block, strip_properties,
    strip_property_tokens,
};
