use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Position};
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, Paragraph};
use ratatui::Frame;
use search_core::Msg;

use crate::platform::dom::{Document, DomCommand, DomError, Node};

use super::constants::*;
use super::layout::SearchElements;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Dispatch(Msg),
}

/// Edit the search bar for a key press and report the resulting keystroke.
///
/// Every key other than the quit chords counts as a keystroke, including
/// ones that leave the value unchanged.
pub fn handle_key(
    document: &mut Document,
    elements: &SearchElements,
    key: KeyEvent,
) -> Result<KeyAction, DomError> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if key.code == KeyCode::Esc || (ctrl && key.code == KeyCode::Char('c')) {
        return Ok(KeyAction::Quit);
    }

    let mut value = document.value(elements.search_bar)?.to_string();
    match key.code {
        KeyCode::Char('u') if ctrl => value.clear(),
        KeyCode::Char(c) if !ctrl => value.push(c),
        KeyCode::Backspace => {
            value.pop();
        }
        _ => {}
    }
    document.apply(DomCommand::SetValue {
        id: elements.search_bar,
        value: value.clone(),
    })?;

    Ok(KeyAction::Dispatch(Msg::SearchInput(value)))
}

pub fn draw(frame: &mut Frame, document: &Document, elements: &SearchElements) {
    let [search_area, results_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    // Without a container there is no collapsed state to show.
    let expanded = elements
        .container
        .is_none_or(|id| document.has_class(id, CLASS_EXPANDED));
    let query = document.value(elements.search_bar).unwrap_or_default();

    // Expanded: square corners, open at the bottom so the results hang off it.
    let search_block = if expanded {
        Block::new()
            .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
            .border_type(BorderType::Plain)
    } else {
        Block::bordered().border_type(BorderType::Rounded)
    };
    frame.render_widget(
        Paragraph::new(query).block(search_block.title(" Search ")),
        search_area,
    );
    let query_width = u16::try_from(Line::raw(query).width()).unwrap_or(u16::MAX);
    let cursor_x = search_area.x.saturating_add(1).saturating_add(query_width);
    frame.set_cursor_position(Position::new(
        cursor_x.min(search_area.right().saturating_sub(2)),
        search_area.y + 1,
    ));

    if expanded {
        let items: Vec<ListItem> = document
            .children(elements.results)
            .unwrap_or_default()
            .iter()
            .map(list_item)
            .collect();
        let results_block = Block::new()
            .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
            .border_type(BorderType::Plain);
        frame.render_widget(List::new(items).block(results_block), results_area);
    }

    if let Some(status) = elements.status {
        let text = document.text(status).unwrap_or_default();
        frame.render_widget(Paragraph::new(text).dim(), status_area);
    }
}

fn list_item(node: &Node) -> ListItem<'static> {
    if node.has_class(CLASS_NO_RESULTS) {
        return ListItem::new(Line::from(node.text.clone()).italic());
    }
    let lines: Vec<Line<'static>> = node
        .children
        .iter()
        .map(|child| {
            let line = Line::from(child.text_lines().join(" "));
            match child.tag {
                "h3" => line.bold(),
                _ => line.dim(),
            }
        })
        .collect();
    ListItem::new(lines)
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::crossterm::event::KeyEventKind;
    use ratatui::Terminal;

    use super::*;
    use crate::platform::ui::layout::initial_document;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn typed(document: &mut Document, code: KeyCode) -> KeyAction {
        handle_key(document, &SearchElements::standard(), key(code)).unwrap()
    }

    #[test]
    fn typing_dispatches_the_full_value() {
        let mut document = initial_document(&SearchElements::standard());
        typed(&mut document, KeyCode::Char('f'));
        let action = typed(&mut document, KeyCode::Char('o'));

        assert_eq!(action, KeyAction::Dispatch(Msg::SearchInput("fo".to_string())));
        assert_eq!(document.value(SEARCH_BAR).unwrap(), "fo");
    }

    #[test]
    fn backspace_to_empty_dispatches_empty_value() {
        let mut document = initial_document(&SearchElements::standard());
        typed(&mut document, KeyCode::Char('x'));
        let action = typed(&mut document, KeyCode::Backspace);

        assert_eq!(action, KeyAction::Dispatch(Msg::SearchInput(String::new())));
    }

    #[test]
    fn non_editing_keys_still_count_as_keystrokes() {
        let mut document = initial_document(&SearchElements::standard());
        typed(&mut document, KeyCode::Char('a'));
        let action = typed(&mut document, KeyCode::Left);

        assert_eq!(action, KeyAction::Dispatch(Msg::SearchInput("a".to_string())));
    }

    #[test]
    fn ctrl_u_clears_and_escape_quits() {
        let elements = SearchElements::standard();
        let mut document = initial_document(&elements);
        typed(&mut document, KeyCode::Char('a'));
        let clear = KeyEvent::new_with_kind(
            KeyCode::Char('u'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        );
        assert_eq!(
            handle_key(&mut document, &elements, clear).unwrap(),
            KeyAction::Dispatch(Msg::SearchInput(String::new()))
        );
        assert_eq!(typed(&mut document, KeyCode::Esc), KeyAction::Quit);
    }

    #[test]
    fn draw_shows_results_only_when_expanded() {
        let elements = SearchElements::standard();
        let mut document = initial_document(&elements);
        document
            .apply(DomCommand::AppendChild {
                id: SEARCH_RESULTS,
                node: Node::new("div")
                    .with_child(Node::new("h3").with_text("foo.txt"))
                    .with_child(Node::new("p").with_text("/a/foo.txt")),
            })
            .unwrap();

        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal
            .draw(|frame| draw(frame, &document, &elements))
            .unwrap();
        let screen = format!("{:?}", terminal.backend().buffer());
        assert!(!screen.contains("foo.txt"));

        document
            .apply(DomCommand::SetClass {
                id: SEARCH_BOX_CONTAINER,
                class: CLASS_EXPANDED,
                enabled: true,
            })
            .unwrap();
        terminal
            .draw(|frame| draw(frame, &document, &elements))
            .unwrap();
        let screen = format!("{:?}", terminal.backend().buffer());
        assert!(screen.contains("foo.txt"));
        assert!(screen.contains("/a/foo.txt"));
    }

    #[test]
    fn draw_shows_results_without_a_container() {
        let elements = SearchElements {
            container: None,
            ..SearchElements::standard()
        };
        let mut document = initial_document(&elements);
        document
            .apply(DomCommand::AppendChild {
                id: SEARCH_RESULTS,
                node: Node::new("div")
                    .with_child(Node::new("h3").with_text("foo.txt"))
                    .with_child(Node::new("p").with_text("/a/foo.txt")),
            })
            .unwrap();

        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal
            .draw(|frame| draw(frame, &document, &elements))
            .unwrap();
        let screen = format!("{:?}", terminal.backend().buffer());
        assert!(screen.contains("foo.txt"));
    }

    #[test]
    fn very_long_query_keeps_cursor_inside_the_box() {
        let elements = SearchElements::standard();
        let mut document = initial_document(&elements);
        document
            .apply(DomCommand::SetValue {
                id: SEARCH_BAR,
                value: "x".repeat(usize::from(u16::MAX) + 10),
            })
            .unwrap();

        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal
            .draw(|frame| draw(frame, &document, &elements))
            .unwrap();
        let cursor = terminal.get_cursor_position().unwrap();
        assert!(cursor.x < 40);
    }
}
