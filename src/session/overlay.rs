//! The overlay session aggregate
//!
//! One [`OverlaySession`] owns everything a capture-and-annotate run creates:
//! the page nodes and listeners, the raster surface, the toolbar and the
//! shared tool options. It is torn down exactly once, on whichever exit path
//! comes first, and on drop if no exit path was taken.

use crate::config::OverlayConfig;
use crate::domain::{Cursor, ElementId, ListenerKind, ToolOptions};
use crate::page::{Node, Page};
use crate::render::{FontBook, RasterSurface};
use crate::session::resources::SessionResources;
use crate::session::state::{Outcome, Phase};
use crate::theme::{self, Theme};
use crate::widget::cursor::CursorPresenter;
use crate::widget::toolbar::Toolbar;

/// Result of injecting the overlay into a page
pub enum Injection<P: Page> {
    Started(OverlaySession<P>),
    /// Another session already owns the page; it is returned untouched
    AlreadyActive(P),
    /// Setup failed part way; whatever was created has been removed again
    Failed(P),
}

pub struct OverlaySession<P: Page> {
    pub(crate) page: P,
    pub(crate) config: OverlayConfig,
    pub(crate) theme: Theme,
    pub(crate) surface: RasterSurface,
    pub(crate) phase: Phase,
    pub(crate) options: ToolOptions,
    pub(crate) toolbar: Option<Toolbar>,
    pub(crate) cursor: CursorPresenter,
    pub(crate) fonts: FontBook,
    pub(crate) resources: SessionResources,
    pub(crate) outcome: Option<Outcome>,
}

impl<P: Page> OverlaySession<P> {
    /// Start a session on `page` unless one is already running there
    pub fn inject(mut page: P, config: OverlayConfig, fonts: FontBook) -> Injection<P> {
        if page.contains(ElementId::Canvas) {
            log::warn!("{} already present, not injecting again", ElementId::Canvas);
            return Injection::AlreadyActive(page);
        }

        let theme = theme::detect(&page, config.dim_opacity);
        let mut resources = SessionResources::default();

        resources.mount(&mut page, ElementId::Crosshair, Node::Crosshair);
        resources.listen(&mut page, ListenerKind::CrosshairTracking);
        let cursor = CursorPresenter::start(&mut page);
        resources.mount(&mut page, ElementId::Overlay, Node::Overlay);

        let viewport = page.viewport();
        let Some(surface) = RasterSurface::new(viewport, theme.tint) else {
            log::error!(
                "Cannot create a {}x{} raster surface",
                viewport.width,
                viewport.height
            );
            resources.release_all(&mut page);
            page.set_cursor(Cursor::Default);
            return Injection::Failed(page);
        };
        resources.mount(
            &mut page,
            ElementId::Canvas,
            Node::Canvas {
                width: viewport.width,
                height: viewport.height,
            },
        );
        resources.listen(&mut page, ListenerKind::CanvasPointer);
        resources.listen(&mut page, ListenerKind::Keyboard);

        let href = page.resolve_resource(&config.stylesheet_path);
        resources.mount(&mut page, ElementId::Stylesheet, Node::Stylesheet { href });

        log::info!(
            "Overlay injected: {}x{}, dark page: {}",
            viewport.width,
            viewport.height,
            theme.dark
        );

        let options = config.tool_options();
        Injection::Started(Self {
            page,
            config,
            theme,
            surface,
            phase: Phase::Idle,
            options,
            toolbar: None,
            cursor,
            fonts,
            resources,
            outcome: None,
        })
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn options(&self) -> &ToolOptions {
        &self.options
    }

    pub fn toolbar(&self) -> Option<&Toolbar> {
        self.toolbar.as_ref()
    }

    pub fn cursor(&self) -> &CursorPresenter {
        &self.cursor
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn is_destroyed(&self) -> bool {
        matches!(self.phase, Phase::Destroyed)
    }

    /// User-initiated abort
    pub fn cancel(&mut self) {
        self.finish(Outcome::Cancelled);
    }

    /// Tear the session down. Safe to call from any phase, any number of times.
    pub(crate) fn finish(&mut self, outcome: Outcome) {
        if self.is_destroyed() {
            return;
        }
        self.phase = Phase::Destroyed;
        self.toolbar = None;
        self.resources.release_all(&mut self.page);
        self.page.set_cursor(Cursor::Default);
        log::info!("Overlay session ended: {outcome:?}");
        self.outcome = Some(outcome);
    }
}

impl<P: Page> Drop for OverlaySession<P> {
    fn drop(&mut self) {
        self.finish(Outcome::Cancelled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Viewport;
    use crate::page::HeadlessPage;

    fn start(page: HeadlessPage) -> OverlaySession<HeadlessPage> {
        match OverlaySession::inject(page, OverlayConfig::default(), FontBook::new()) {
            Injection::Started(session) => session,
            _ => panic!("injection did not start"),
        }
    }

    #[test]
    fn test_inject_mounts_session_nodes() {
        let session = start(HeadlessPage::new(Viewport::new(640, 480)));
        let page = session.page();
        for id in [
            ElementId::Crosshair,
            ElementId::Overlay,
            ElementId::Canvas,
            ElementId::Stylesheet,
        ] {
            assert!(page.contains(id), "{id:?}");
        }
        assert!(page.has_listener(ListenerKind::CrosshairTracking));
        assert!(page.has_listener(ListenerKind::CanvasPointer));
        assert_eq!(page.cursor(), Cursor::None);
        assert_eq!(
            page.node(ElementId::Stylesheet).unwrap().node,
            Node::Stylesheet {
                href: "chrome-extension://snapmark/content/content.css".into()
            }
        );
        assert_eq!(*session.phase(), Phase::Idle);
        assert_eq!(session.surface().width(), 640);
    }

    #[test]
    fn test_second_injection_is_refused() {
        let mut page = HeadlessPage::new(Viewport::new(100, 100));
        page.mount(
            ElementId::Canvas,
            Node::Canvas {
                width: 100,
                height: 100,
            },
        );
        match OverlaySession::inject(page, OverlayConfig::default(), FontBook::new()) {
            Injection::AlreadyActive(page) => assert_eq!(page.mounted_ids(), [ElementId::Canvas]),
            _ => panic!("second session must not start"),
        }
    }

    #[test]
    fn test_failed_setup_leaves_nothing_behind() {
        let page = HeadlessPage::new(Viewport::new(0, 0));
        match OverlaySession::inject(page, OverlayConfig::default(), FontBook::new()) {
            Injection::Failed(page) => {
                assert!(page.mounted_ids().is_empty());
                assert_eq!(page.listener_count(), 0);
            }
            _ => panic!("empty viewport must fail"),
        }
    }

    #[test]
    fn test_dark_page_gets_light_tint() {
        let page = HeadlessPage::new(Viewport::new(10, 10))
            .with_backgrounds(Some("rgb(10, 10, 10)"), None);
        let session = start(page);
        assert!(session.theme().dark);
        let p = session.surface().pixel(0, 0).unwrap();
        assert_eq!((p.red(), p.alpha()), (255, 64));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut session = start(HeadlessPage::new(Viewport::new(50, 50)));
        session.cancel();
        session.cancel();
        assert!(session.is_destroyed());
        assert_eq!(session.outcome(), Some(&Outcome::Cancelled));
        assert!(session.page().mounted_ids().is_empty());
        assert_eq!(session.page().listener_count(), 0);
        assert_eq!(session.page().cursor(), Cursor::Default);
    }
}
