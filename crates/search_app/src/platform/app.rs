use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use search_core::{update, AppState, Effect, Msg};
use search_logging::{search_info, search_warn};

use super::config::{self, AppConfig};
use super::dom::Document;
use super::effects::EffectRunner;
use super::logging;
use super::ui::layout::{initial_document, SearchElements};
use super::ui::render::render;
use super::ui::terminal::{draw, handle_key, KeyAction};

const INPUT_POLL: Duration = Duration::from_millis(50);

pub fn run_app() -> Result<()> {
    let loaded = config::load_config(Path::new("."));
    let config = loaded.as_ref().cloned().unwrap_or_else(|_| AppConfig::default());
    logging::initialize(config.log_destination);
    if let Err(err) = &loaded {
        search_warn!("Using default configuration: {}", err);
    }

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(config.backend.into(), msg_tx)?;
    let mut app = SearchApp::new(
        AppState::with_policy(config.render_policy.into()),
        SearchElements::standard(),
    );

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut app, &runner, &msg_rx);
    ratatui::restore();
    search_info!("Search UI exited");
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut SearchApp,
    runner: &EffectRunner,
    msg_rx: &mpsc::Receiver<Msg>,
) -> Result<()> {
    loop {
        while let Ok(msg) = msg_rx.try_recv() {
            runner.enqueue(app.dispatch_msg(msg));
        }

        terminal.draw(|frame| draw(frame, &app.document, &app.elements))?;

        if !event::poll(INPUT_POLL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match handle_key(&mut app.document, &app.elements, key)? {
            KeyAction::Quit => return Ok(()),
            KeyAction::Dispatch(msg) => runner.enqueue(app.dispatch_msg(msg)),
        }
    }
}

/// UI-thread state: the core state machine plus the element tree it renders into.
pub(crate) struct SearchApp {
    state: AppState,
    document: Document,
    elements: SearchElements,
}

impl SearchApp {
    pub(crate) fn new(state: AppState, elements: SearchElements) -> Self {
        let mut app = Self {
            state,
            document: initial_document(&elements),
            elements,
        };
        app.apply_render();
        app
    }

    /// Runs one message through `update`, re-renders if needed, and hands
    /// back the effects for the caller to execute.
    pub(crate) fn dispatch_msg(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        if was_dirty {
            self.apply_render();
        }
        effects
    }

    fn apply_render(&mut self) {
        let view = self.state.view();
        for cmd in render(&self.elements, &view) {
            if let Err(err) = self.document.apply(cmd) {
                search_warn!("Render command skipped: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use search_core::{Payload, RenderPolicy, SearchResult};

    use super::*;
    use crate::platform::ui::constants::*;

    fn press(app: &mut SearchApp, c: char) -> Vec<Effect> {
        let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        match handle_key(&mut app.document, &app.elements, key).unwrap() {
            KeyAction::Dispatch(msg) => app.dispatch_msg(msg),
            KeyAction::Quit => panic!("unexpected quit"),
        }
    }

    fn backspace(app: &mut SearchApp) -> Vec<Effect> {
        let key = KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE);
        match handle_key(&mut app.document, &app.elements, key).unwrap() {
            KeyAction::Dispatch(msg) => app.dispatch_msg(msg),
            KeyAction::Quit => panic!("unexpected quit"),
        }
    }

    fn result_count(app: &SearchApp) -> usize {
        app.document.children(SEARCH_RESULTS).unwrap().len()
    }

    #[test]
    fn keystrokes_drive_dispatch_and_clear() {
        let mut app = SearchApp::new(AppState::new(), SearchElements::standard());

        assert_eq!(
            press(&mut app, 'a'),
            vec![Effect::SendQuery {
                seq: 1,
                query: "a".to_string(),
            }]
        );
        assert!(app.document.has_class(SEARCH_BOX_CONTAINER, CLASS_EXPANDED));

        app.dispatch_msg(Msg::ResultsReceived {
            seq: Some(1),
            payload: Payload::Missing,
        });
        assert_eq!(result_count(&app), 1);

        assert!(backspace(&mut app).is_empty());
        assert_eq!(result_count(&app), 0);
        assert!(!app.document.has_class(SEARCH_BOX_CONTAINER, CLASS_EXPANDED));
    }

    #[test]
    fn stale_reply_leaves_document_untouched() {
        let mut app = SearchApp::new(
            AppState::with_policy(RenderPolicy::LatestOnly),
            SearchElements::standard(),
        );
        press(&mut app, 'f');
        press(&mut app, 'o');
        app.dispatch_msg(Msg::ResultsReceived {
            seq: Some(2),
            payload: Payload::Records(vec![SearchResult::new("fo", "/fo")]),
        });
        let before = app.document.clone();

        app.dispatch_msg(Msg::ResultsReceived {
            seq: Some(1),
            payload: Payload::Records(vec![SearchResult::new("f", "/f")]),
        });

        assert_eq!(app.document, before);
    }

    #[test]
    fn missing_optional_elements_do_not_break_rendering() {
        let elements = SearchElements {
            container: None,
            status: None,
            ..SearchElements::standard()
        };
        let mut app = SearchApp::new(AppState::new(), elements);
        press(&mut app, 'x');
        app.dispatch_msg(Msg::ResultsReceived {
            seq: Some(1),
            payload: Payload::Records(vec![SearchResult::new("x", "/x")]),
        });

        assert_eq!(result_count(&app), 1);
    }
}
