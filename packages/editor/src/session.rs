//! # Edit Session
//!
//! Owns everything one editing session mutates: the live tree, selection,
//! viewport, theme, assets, history and the id generator.
//!
//! ## Change flow
//!
//! ```text
//! entry point → Mutation::apply → new tree
//!     unchanged?  → MutationResult::Noop
//!     otherwise   → set_tree(Edit) → history.commit → version += 1
//! undo/redo/jump  → set_tree(HistoryRestore), nothing recorded
//! ```
//!
//! Selection is kept as an id and resolved against the live tree on every
//! read, so it can never point at a stale copy. When the selected node
//! leaves the tree the selection is cleared.

use chrono::{DateTime, Utc};
use pagecraft_document::{tree, Element, ElementPatch, IdGenerator, StyleMap, ThemeSettings, Viewport};
use pagecraft_style::RenderNode;
use std::sync::Arc;
use tracing::{debug, info};

use crate::assets::Asset;
use crate::config::EditorConfig;
use crate::drag::{self, DragContext, DragGesture, DragIntent, DragSource};
use crate::errors::EditorError;
use crate::generator::{generated_paragraph, ContentGenerator};
use crate::history::{entry_label, HistoryLog, Snapshot};
use crate::mutations::{Mutation, MutationError, MutationResult, NoopReason};
use crate::shortcuts::{EditorCommand, KeyEvent, Keymap};
use crate::storage::{self, KeyValueStore, Project};
use crate::templates::{find_template, page_templates, section_templates, Template};

/// Why the live tree is being replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// A user edit; recorded in history when the tree actually changed
    Edit,
    /// Undo, redo or jump; never recorded
    HistoryRestore,
}

/// One row of the history panel
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryItem {
    pub index: usize,
    pub label: String,
    pub timestamp: DateTime<Utc>,
    pub is_current: bool,
}

/// Single-user editing session
pub struct EditSession {
    elements: Snapshot,
    selected: Option<String>,
    viewport: Viewport,
    theme: ThemeSettings,
    assets: Vec<Asset>,
    history: HistoryLog,
    ids: IdGenerator,
    keymap: Keymap,
    /// Increments on every tree change
    version: u64,
}

impl EditSession {
    /// Empty page with the configured theme preset
    pub fn new(config: &EditorConfig) -> Result<Self, EditorError> {
        Self::from_project(
            config,
            Project {
                elements: Vec::new(),
                theme: config.theme()?,
                assets: Vec::new(),
            },
        )
    }

    /// Start from a saved project
    ///
    /// The tree is normalized first; duplicate ids are rejected.
    pub fn from_project(config: &EditorConfig, project: Project) -> Result<Self, EditorError> {
        let elements = storage::validate_elements(project.elements)?;

        let mut ids = IdGenerator::new(&config.project_key);
        ids.observe_tree(&elements);

        let elements = Arc::new(elements);
        let mut history = HistoryLog::with_config(config.history);
        history.commit(elements.clone());

        debug!(
            nodes = tree::collect_ids(&elements).len(),
            seed = ids.seed(),
            "Session started"
        );

        Ok(Self {
            elements,
            selected: None,
            viewport: config.default_viewport,
            theme: project.theme,
            assets: project.assets,
            history,
            ids,
            keymap: Keymap::default(),
            version: 0,
        })
    }

    /// Load the project held in `store`
    pub fn open<S: KeyValueStore>(config: &EditorConfig, store: &S) -> Result<Self, EditorError> {
        let project = storage::load_project(store)?;
        Self::from_project(config, project)
    }

    /// Persist elements, theme and assets
    pub fn save<S: KeyValueStore>(&self, store: &mut S) -> Result<(), EditorError> {
        storage::save_project(store, &self.project())
    }

    pub fn project(&self) -> Project {
        Project {
            elements: self.elements.to_vec(),
            theme: self.theme.clone(),
            assets: self.assets.clone(),
        }
    }

    // Tree replacement

    /// Replace the live tree
    ///
    /// Derived `parent_id` and `position` fields are recomputed first.
    /// Returns whether the tree changed. Only [`ChangeOrigin::Edit`] reaches
    /// the history log.
    pub fn set_tree(&mut self, mut elements: Vec<Element>, origin: ChangeOrigin) -> bool {
        tree::normalize(&mut elements);
        if *self.elements == elements {
            return false;
        }
        self.replace(Arc::new(elements), origin);
        true
    }

    fn replace(&mut self, snapshot: Snapshot, origin: ChangeOrigin) {
        self.elements = snapshot;
        if origin == ChangeOrigin::Edit {
            self.history.commit(self.elements.clone());
        }
        self.version += 1;
        self.reconcile_selection();
    }

    fn reconcile_selection(&mut self) {
        if let Some(id) = &self.selected {
            if !tree::contains_id(&self.elements, id) {
                debug!(node_id = %id, "Selected node left the tree, clearing selection");
                self.selected = None;
            }
        }
    }

    fn commit_edit(&mut self, next: Vec<Element>) -> MutationResult {
        if self.set_tree(next, ChangeOrigin::Edit) {
            MutationResult::Applied {
                version: self.version,
            }
        } else {
            MutationResult::noop(NoopReason::Unchanged)
        }
    }

    // Mutations

    /// Apply a serialized mutation
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        match mutation.apply(&self.elements) {
            Ok(next) => Ok(self.commit_edit(next)),
            Err(MutationError::Tree(e)) => Err(e.into()),
            Err(e) => {
                let reason = e.noop_reason().unwrap_or(NoopReason::Unchanged);
                debug!(node_id = ?mutation.node_id(), ?reason, "Mutation skipped");
                Ok(MutationResult::noop(reason))
            }
        }
    }

    pub fn update_properties(&mut self, node_id: &str, patch: ElementPatch) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::UpdateProperties {
            node_id: node_id.to_string(),
            patch,
        })
    }

    /// Set one style property on the base style (`None`) or one viewport
    pub fn set_style_property(
        &mut self,
        node_id: &str,
        property: &str,
        value: &str,
        viewport: Option<Viewport>,
    ) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::SetStyleProperty {
            node_id: node_id.to_string(),
            property: property.to_string(),
            value: value.to_string(),
            viewport,
        })
    }

    pub fn remove_style_property(
        &mut self,
        node_id: &str,
        property: &str,
        viewport: Option<Viewport>,
    ) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::RemoveStyleProperty {
            node_id: node_id.to_string(),
            property: property.to_string(),
            viewport,
        })
    }

    /// Remove a node and its subtree
    pub fn delete_node(&mut self, node_id: &str) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::RemoveNode {
            node_id: node_id.to_string(),
        })
    }

    /// Replace the whole page with a fresh copy of `template`
    pub fn apply_template(&mut self, template: &Template) -> MutationResult {
        let elements = template.instantiate(&mut self.ids);
        let result = self.commit_edit(elements);
        info!(template = %template.id, "Template applied");
        result
    }

    /// Append a fresh copy of `section` to the page
    pub fn apply_section(&mut self, section: &Template) -> Result<MutationResult, EditorError> {
        let elements = section.instantiate(&mut self.ids);
        let result = self.apply(Mutation::AppendElements { elements })?;
        info!(section = %section.id, "Section added");
        Ok(result)
    }

    /// [`Self::apply_template`] for a built-in page template
    pub fn apply_template_by_id(&mut self, template_id: &str) -> Result<MutationResult, EditorError> {
        let templates = page_templates();
        let template = find_template(&templates, template_id)
            .ok_or_else(|| EditorError::UnknownTemplate(template_id.to_string()))?;
        Ok(self.apply_template(template))
    }

    /// [`Self::apply_section`] for a built-in section
    pub fn apply_section_by_id(&mut self, section_id: &str) -> Result<MutationResult, EditorError> {
        let sections = section_templates();
        let section = find_template(&sections, section_id)
            .ok_or_else(|| EditorError::UnknownTemplate(section_id.to_string()))?;
        self.apply_section(section)
    }

    /// Append generated text as a paragraph at the end of the page
    pub fn insert_generated_content(&mut self, content: &str) -> Result<MutationResult, EditorError> {
        if content.trim().is_empty() {
            return Ok(MutationResult::noop(NoopReason::Unchanged));
        }
        let element = generated_paragraph(self.ids.new_id(), content);
        self.apply(Mutation::InsertElement {
            parent_id: None,
            index: None,
            element,
        })
    }

    /// Run `generator` and insert its text; a failure changes nothing
    pub fn generate_content<G: ContentGenerator>(
        &mut self,
        generator: &mut G,
        prompt: &str,
    ) -> Result<MutationResult, EditorError> {
        let content = generator.generate(prompt).map_err(|e| match e {
            EditorError::Generator(_) => e,
            other => EditorError::Generator(other.to_string()),
        })?;
        self.insert_generated_content(&content)
    }

    /// Carry out a finished drag
    ///
    /// A node created from the palette becomes the selection.
    pub fn handle_drag_end(&mut self, gesture: &DragGesture) -> Result<MutationResult, EditorError> {
        let mut ctx = DragContext {
            viewport: self.viewport,
            ids: &mut self.ids,
        };
        let intent = drag::interpret(&self.elements, gesture, &mut ctx);

        let Some(mutation) = intent.to_mutation() else {
            return Ok(match intent {
                DragIntent::Noop(reason) => MutationResult::noop(reason),
                _ => MutationResult::noop(NoopReason::Unchanged),
            });
        };

        let result = self.apply(mutation)?;
        if let (DragIntent::InsertNew { element, .. }, true) = (&intent, result.is_applied()) {
            self.selected = Some(element.id.clone());
        }
        Ok(result)
    }

    /// [`Self::handle_drag_end`] from raw pointer refs
    pub fn handle_drag_refs(&mut self, active: &str, over: Option<&str>) -> Result<MutationResult, EditorError> {
        let gesture = DragGesture::from_refs(active, over)?;
        self.handle_drag_end(&gesture)
    }

    pub fn drag_preview(&self, source: &DragSource) -> Option<Element> {
        drag::drag_preview(&self.elements, source, self.viewport)
    }

    // History

    fn restore(&mut self, snapshot: Option<Snapshot>) -> bool {
        match snapshot {
            Some(snapshot) => {
                self.replace(snapshot, ChangeOrigin::HistoryRestore);
                true
            }
            None => false,
        }
    }

    pub fn undo(&mut self) -> bool {
        let snapshot = self.history.undo();
        self.restore(snapshot)
    }

    pub fn redo(&mut self) -> bool {
        let snapshot = self.history.redo();
        self.restore(snapshot)
    }

    pub fn jump_to(&mut self, index: usize) -> bool {
        let snapshot = self.history.jump_to(index);
        self.restore(snapshot)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_entries(&self) -> Vec<HistoryItem> {
        self.history
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| HistoryItem {
                index,
                label: entry_label(index),
                timestamp: entry.timestamp,
                is_current: index == self.history.cursor(),
            })
            .collect()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    // Selection

    /// Select `node_id`, or clear with `None`; false when the id is unknown
    pub fn select(&mut self, node_id: Option<&str>) -> bool {
        match node_id {
            None => {
                self.selected = None;
                true
            }
            Some(id) if tree::contains_id(&self.elements, id) => {
                self.selected = Some(id.to_string());
                true
            }
            Some(id) => {
                debug!(node_id = %id, "Cannot select unknown node");
                false
            }
        }
    }

    /// The selected node as it is in the live tree
    pub fn selected(&self) -> Option<&Element> {
        self.selected
            .as_deref()
            .and_then(|id| tree::find_by_id(&self.elements, id))
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    // Views

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Shared handle to the live tree
    pub fn snapshot(&self) -> Snapshot {
        self.elements.clone()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn theme(&self) -> &ThemeSettings {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: ThemeSettings) {
        self.theme = theme;
    }

    pub fn set_theme_preset(&mut self, preset: &str) -> Result<(), EditorError> {
        let theme = ThemeSettings::preset(preset)
            .ok_or_else(|| EditorError::Config(format!("unknown theme preset `{preset}`")))?;
        self.theme = theme;
        Ok(())
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn add_asset(&mut self, asset: Asset) {
        self.assets.push(asset);
    }

    pub fn remove_asset(&mut self, asset_id: &str) -> bool {
        let before = self.assets.len();
        self.assets.retain(|a| a.id != asset_id);
        self.assets.len() != before
    }

    /// Effective style of a node at the current viewport and theme
    pub fn resolved_style(&self, node_id: &str) -> Option<StyleMap> {
        tree::find_by_id(&self.elements, node_id)
            .map(|node| pagecraft_style::resolve(node, self.viewport, &self.theme))
    }

    /// Fully resolved tree for the renderer
    pub fn render_tree(&self) -> Vec<RenderNode> {
        pagecraft_style::render_tree(&self.elements, self.viewport, &self.theme)
    }

    // Shortcuts

    pub fn keymap_mut(&mut self) -> &mut Keymap {
        &mut self.keymap
    }

    /// Run the command bound to `event`
    ///
    /// Undo and redo happen here. `Save` is returned for the caller, which
    /// owns the store.
    pub fn handle_shortcut(&mut self, event: &KeyEvent) -> Option<EditorCommand> {
        let command = self.keymap.lookup(event)?;
        match command {
            EditorCommand::Undo => {
                self.undo();
            }
            EditorCommand::Redo => {
                self.redo();
            }
            EditorCommand::Save => {}
        }
        Some(command)
    }
}
