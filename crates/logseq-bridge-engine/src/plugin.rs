//! Plugin lifecycle: registers the render hook and the editor overlays with
//! a host on load and removes them again on unload.

use std::sync::Arc;

use crate::overlay::{HeadingOverlay, LineOverlay, Span, tokenize_line};
use crate::render::{EntryRenderer, Fragment, PostProcessor, RenderContext, RenderOptions};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Handle for one registered hook, issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookId(pub u64);

/// Host lifecycle collaborator.
pub trait Host {
    fn register_post_processor(&mut self, processor: Arc<dyn PostProcessor>) -> HookId;
    fn register_overlay(&mut self, overlay: Arc<dyn LineOverlay>) -> HookId;
    /// Unknown ids are ignored.
    fn unregister(&mut self, id: HookId);
}

/// Which hooks the plugin registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginSettings {
    pub render: RenderOptions,
    pub heading_overlay: bool,
    pub marker_overlay: bool,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            heading_overlay: true,
            marker_overlay: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct Plugin {
    settings: PluginSettings,
    hooks: Vec<HookId>,
    loaded: bool,
}

impl Plugin {
    pub fn new(settings: PluginSettings) -> Self {
        Self {
            settings,
            hooks: Vec::new(),
            loaded: false,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Ids of the hooks currently registered with the host.
    pub fn hooks(&self) -> &[HookId] {
        &self.hooks
    }

    pub fn on_load(&mut self, host: &mut dyn Host) {
        if self.loaded {
            log::debug!("logseq-bridge plugin already loaded, skipping");
            return;
        }
        log::info!("Loading logseq-bridge plugin {VERSION}");

        let render = self.settings.render;
        if render.tasks || render.admonitions {
            let renderer = Arc::new(EntryRenderer::new(render));
            self.hooks.push(host.register_post_processor(renderer));
        } else {
            log::debug!("all render passes disabled, no post-processor registered");
        }

        if self.settings.heading_overlay {
            self.hooks
                .push(host.register_overlay(Arc::new(HeadingOverlay::full_line())));
        }
        if self.settings.marker_overlay {
            self.hooks
                .push(host.register_overlay(Arc::new(HeadingOverlay::marker())));
        }

        self.loaded = true;
    }

    pub fn on_unload(&mut self, host: &mut dyn Host) {
        if !self.loaded {
            return;
        }
        log::info!("Unloading logseq-bridge plugin {VERSION}");
        for id in self.hooks.drain(..) {
            host.unregister(id);
        }
        self.loaded = false;
    }
}

/// An in-process [`Host`] that keeps registered hooks and runs them on demand.
#[derive(Default)]
pub struct HookRegistry {
    next_id: u64,
    post_processors: Vec<(HookId, Arc<dyn PostProcessor>)>,
    overlays: Vec<(HookId, Arc<dyn LineOverlay>)>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue_id(&mut self) -> HookId {
        self.next_id += 1;
        HookId(self.next_id)
    }

    pub fn post_processor_count(&self) -> usize {
        self.post_processors.len()
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    /// Runs every post-processor over `fragment`, in registration order.
    pub fn render(&self, fragment: &mut dyn Fragment, ctx: &RenderContext) {
        for (_, processor) in &self.post_processors {
            processor.process(fragment, ctx);
        }
    }

    /// Tokenizes `line` with every overlay, lowest priority first.
    pub fn tokenize(&self, line: &str) -> Vec<(Span, String)> {
        let mut overlays: Vec<&Arc<dyn LineOverlay>> =
            self.overlays.iter().map(|(_, o)| o).collect();
        overlays.sort_by_key(|o| o.priority());
        overlays
            .into_iter()
            .flat_map(|o| tokenize_line(&**o, line))
            .collect()
    }
}

impl Host for HookRegistry {
    fn register_post_processor(&mut self, processor: Arc<dyn PostProcessor>) -> HookId {
        let id = self.issue_id();
        self.post_processors.push((id, processor));
        id
    }

    fn register_overlay(&mut self, overlay: Arc<dyn LineOverlay>) -> HookId {
        let id = self.issue_id();
        self.overlays.push((id, overlay));
        id
    }

    fn unregister(&mut self, id: HookId) {
        self.post_processors.retain(|(hook, _)| *hook != id);
        self.overlays.retain(|(hook, _)| *hook != id);
    }
}
