//! Async glue between messages and their effects

use crate::capture::{Artifact, CaptureRelay};
use crate::page::Page;
use crate::session::messages::{Effect, EditorMsg, Msg};
use crate::session::overlay::OverlaySession;

/// Deliver `msg` and run whatever follow-up work it asked for
///
/// Editor focus is deferred by one scheduler turn so the editor node exists
/// before it is focused. A save resolves to the downloaded artifact, if any.
pub async fn dispatch<P: Page, R: CaptureRelay>(
    session: &mut OverlaySession<P>,
    relay: &R,
    msg: Msg,
) -> Option<Artifact> {
    match session.update(msg) {
        Effect::None => None,
        Effect::FocusEditor => {
            tokio::task::yield_now().await;
            session.update(Msg::editor(EditorMsg::Focus));
            None
        }
        Effect::Capture => session.capture(relay).await,
    }
}

/// Deliver every message in order, stopping once the session is gone
pub async fn replay<P: Page, R: CaptureRelay>(
    session: &mut OverlaySession<P>,
    relay: &R,
    script: impl IntoIterator<Item = Msg>,
) -> Option<Artifact> {
    let mut artifact = None;
    for msg in script {
        if session.is_destroyed() {
            log::debug!("Session ended, dropping remaining messages");
            break;
        }
        if let Some(saved) = dispatch(session, relay, msg).await {
            artifact = Some(saved);
        }
    }
    artifact
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::FailingRelay;
    use crate::config::OverlayConfig;
    use crate::domain::{ElementId, Viewport};
    use crate::page::HeadlessPage;
    use crate::render::FontBook;
    use crate::session::{Injection, Outcome, ToolbarMsg};

    fn start() -> OverlaySession<HeadlessPage> {
        let config = OverlayConfig {
            capture_delay_ms: 0,
            ..OverlayConfig::default()
        };
        let page = HeadlessPage::new(Viewport::new(300, 200));
        match OverlaySession::inject(page, config, FontBook::new()) {
            Injection::Started(session) => session,
            _ => panic!("injection did not start"),
        }
    }

    #[tokio::test]
    async fn test_text_editor_is_focused_after_spawn() {
        let mut session = start();
        let relay = FailingRelay::new("unused");
        let script = [
            Msg::down(10.0, 10.0),
            Msg::moved(200.0, 150.0),
            Msg::up(200.0, 150.0),
            Msg::toolbar(ToolbarMsg::Text),
            Msg::down(50.0, 50.0),
        ];
        assert!(replay(&mut session, &relay, script).await.is_none());
        assert!(session.phase().is_typing());
        assert!(session.page().contains(ElementId::TextEditor));
        // Blur now lands after focus and closes the editor
        dispatch(&mut session, &relay, Msg::editor(EditorMsg::Blur)).await;
        assert!(!session.page().contains(ElementId::TextEditor));
    }

    #[tokio::test]
    async fn test_replay_stops_after_teardown() {
        let mut session = start();
        let relay = FailingRelay::new("denied");
        let script = [
            Msg::down(10.0, 10.0),
            Msg::moved(100.0, 100.0),
            Msg::up(100.0, 100.0),
            Msg::toolbar(ToolbarMsg::Save),
            Msg::toolbar(ToolbarMsg::Save),
        ];
        assert!(replay(&mut session, &relay, script).await.is_none());
        assert_eq!(session.outcome(), Some(&Outcome::CaptureFailed));
        assert_eq!(session.page().alerts().len(), 1);
    }
}
