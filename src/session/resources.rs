//! Page resources a session has created
//!
//! Every node and listener is recorded the moment it is created. Teardown
//! releases each one independently, newest first, so a resource that already
//! vanished never blocks removal of the rest. Releasing twice is a no-op.

use crate::domain::{ElementId, ListenerKind};
use crate::page::{Node, Page};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Element(ElementId),
    Listener(ListenerKind),
}

#[derive(Debug, Default)]
pub struct SessionResources {
    held: Vec<Resource>,
}

impl SessionResources {
    /// Insert a node into the page and take ownership of it
    pub fn mount(&mut self, page: &mut impl Page, id: ElementId, node: Node) {
        log::debug!("Mounting {id}");
        page.mount(id, node);
        self.held.push(Resource::Element(id));
    }

    /// Install a listener and take ownership of it
    pub fn listen(&mut self, page: &mut impl Page, kind: ListenerKind) {
        page.add_listener(kind);
        self.held.push(Resource::Listener(kind));
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Release a single resource early. Returns false if it was not held.
    pub fn release(&mut self, page: &mut impl Page, resource: Resource) -> bool {
        let Some(pos) = self.held.iter().rposition(|r| *r == resource) else {
            return false;
        };
        self.held.remove(pos);
        release_one(page, resource);
        true
    }

    pub fn release_all(&mut self, page: &mut impl Page) {
        for resource in self.held.drain(..).rev() {
            release_one(page, resource);
        }
    }
}

fn release_one(page: &mut impl Page, resource: Resource) {
    match resource {
        Resource::Element(id) => {
            if !page.remove(id) {
                log::warn!("{id} was already gone at release");
            }
        }
        Resource::Listener(kind) => {
            if !page.remove_listener(kind) {
                log::warn!("{kind:?} listener was already gone at release");
            }
        }
    }
}
