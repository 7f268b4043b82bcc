//! Host page abstraction
//!
//! The overlay never touches a real document directly. Everything it inserts,
//! moves or removes goes through [`Page`], which a browser binding or a native
//! overlay implements. [`HeadlessPage`] is an in-memory page used by the demo
//! binary and the tests.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{Cursor, ElementId, ListenerKind, PageElement, Point, Viewport};
use crate::widget::text_editor::EditorView;
use crate::widget::toolbar::ToolbarView;

/// A node the overlay inserts into the page
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Full-viewport layer that swallows pointer events during selection
    Overlay,
    /// The raster surface
    Canvas { width: u32, height: u32 },
    Crosshair,
    Toolbar(ToolbarView),
    Stylesheet { href: String },
    TextEditor(EditorView),
}

/// Operations the overlay needs from the host page
pub trait Page {
    /// Current viewport size
    fn viewport(&self) -> Viewport;

    /// Computed CSS background color of `element`, `None` if it does not exist
    fn computed_background(&self, element: PageElement) -> Option<String>;

    fn contains(&self, id: ElementId) -> bool;

    fn mount(&mut self, id: ElementId, node: Node);

    /// Replace the content of a mounted node. Returns false if it is not mounted.
    fn update(&mut self, id: ElementId, node: Node) -> bool;

    /// Remove a node. Returns false if it was not mounted.
    fn remove(&mut self, id: ElementId) -> bool;

    fn set_visible(&mut self, id: ElementId, visible: bool);

    /// Position a node at viewport coordinates
    fn move_to(&mut self, id: ElementId, at: Point);

    fn add_listener(&mut self, kind: ListenerKind);

    /// Returns false if the listener was not installed
    fn remove_listener(&mut self, kind: ListenerKind) -> bool;

    fn set_cursor(&mut self, cursor: Cursor);

    /// Resolve an extension-local resource path to an absolute URL
    fn resolve_resource(&self, path: &str) -> String;

    /// Show a blocking notice to the user
    fn alert(&mut self, message: &str);

    /// Hand a file to the user agent as a download
    fn download(&mut self, filename: &str, bytes: Vec<u8>);
}

/// A node mounted on a [`HeadlessPage`]
#[derive(Clone, Debug, PartialEq)]
pub struct Mounted {
    pub node: Node,
    pub visible: bool,
    pub position: Option<Point>,
}

/// A download handed to a [`HeadlessPage`]
#[derive(Clone, Debug, PartialEq)]
pub struct Download {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// In-memory page that records everything done to it
#[derive(Clone, Debug)]
pub struct HeadlessPage {
    viewport: Viewport,
    body_background: Option<String>,
    root_background: Option<String>,
    resource_base: String,
    nodes: BTreeMap<ElementId, Mounted>,
    listeners: BTreeSet<ListenerKind>,
    cursor: Cursor,
    alerts: Vec<String>,
    downloads: Vec<Download>,
}

impl HeadlessPage {
    /// A page with transparent body and root backgrounds
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            body_background: Some("rgba(0, 0, 0, 0)".to_string()),
            root_background: Some("rgba(0, 0, 0, 0)".to_string()),
            resource_base: "chrome-extension://snapmark/".to_string(),
            nodes: BTreeMap::new(),
            listeners: BTreeSet::new(),
            cursor: Cursor::Default,
            alerts: Vec::new(),
            downloads: Vec::new(),
        }
    }

    pub fn with_backgrounds(mut self, body: Option<&str>, root: Option<&str>) -> Self {
        self.body_background = body.map(str::to_string);
        self.root_background = root.map(str::to_string);
        self
    }

    pub fn with_resource_base(mut self, base: impl Into<String>) -> Self {
        self.resource_base = base.into();
        self
    }

    /// Simulate a window resize
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn node(&self, id: ElementId) -> Option<&Mounted> {
        self.nodes.get(&id)
    }

    pub fn mounted_ids(&self) -> Vec<ElementId> {
        self.nodes.keys().copied().collect()
    }

    pub fn has_listener(&self, kind: ListenerKind) -> bool {
        self.listeners.contains(&kind)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn downloads(&self) -> &[Download] {
        &self.downloads
    }
}

impl Page for HeadlessPage {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn computed_background(&self, element: PageElement) -> Option<String> {
        match element {
            PageElement::Body => self.body_background.clone(),
            PageElement::Root => self.root_background.clone(),
        }
    }

    fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(&id)
    }

    fn mount(&mut self, id: ElementId, node: Node) {
        self.nodes.insert(
            id,
            Mounted {
                node,
                visible: true,
                position: None,
            },
        );
    }

    fn update(&mut self, id: ElementId, node: Node) -> bool {
        match self.nodes.get_mut(&id) {
            Some(mounted) => {
                mounted.node = node;
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, id: ElementId) -> bool {
        self.nodes.remove(&id).is_some()
    }

    fn set_visible(&mut self, id: ElementId, visible: bool) {
        if let Some(mounted) = self.nodes.get_mut(&id) {
            mounted.visible = visible;
        }
    }

    fn move_to(&mut self, id: ElementId, at: Point) {
        if let Some(mounted) = self.nodes.get_mut(&id) {
            mounted.position = Some(at);
        }
    }

    fn add_listener(&mut self, kind: ListenerKind) {
        self.listeners.insert(kind);
    }

    fn remove_listener(&mut self, kind: ListenerKind) -> bool {
        self.listeners.remove(&kind)
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    fn resolve_resource(&self, path: &str) -> String {
        format!("{}{}", self.resource_base, path.trim_start_matches('/'))
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn download(&mut self, filename: &str, bytes: Vec<u8>) {
        self.downloads.push(Download {
            filename: filename.to_string(),
            bytes,
        });
    }
}
