use search_core::{BridgeStatus, ResultRowView, ResultsView, SearchViewModel};

use crate::platform::dom::{DomCommand, Node};

use super::constants::*;
use super::layout::SearchElements;

/// Translate a view model into element commands.
///
/// The results container is always cleared before it is repopulated, so
/// applying the same view twice yields the same tree.
pub fn render(elements: &SearchElements, view: &SearchViewModel) -> Vec<DomCommand> {
    let mut cmds = Vec::with_capacity(view.results.item_count() + 3);

    if let Some(container) = elements.container {
        cmds.push(DomCommand::SetClass {
            id: container,
            class: CLASS_EXPANDED,
            enabled: view.expanded,
        });
    }

    cmds.push(DomCommand::ClearChildren {
        id: elements.results,
    });
    match &view.results {
        ResultsView::Cleared => {}
        ResultsView::Placeholder { text } => cmds.push(DomCommand::AppendChild {
            id: elements.results,
            node: placeholder_node(text),
        }),
        ResultsView::Rows(rows) => {
            cmds.extend(rows.iter().map(|row| DomCommand::AppendChild {
                id: elements.results,
                node: result_node(row),
            }));
        }
    }

    if let Some(status) = elements.status {
        cmds.push(DomCommand::SetText {
            id: status,
            text: status_text(view),
        });
    }

    cmds
}

fn result_node(row: &ResultRowView) -> Node {
    Node::new("div")
        .with_class(CLASS_RESULT)
        .with_child(Node::new("h3").with_text(row.name.clone()))
        .with_child(Node::new("p").with_text(row.full_path.clone()))
}

fn placeholder_node(text: &str) -> Node {
    Node::new("div")
        .with_class(CLASS_RESULT)
        .with_class(CLASS_NO_RESULTS)
        .with_text(text)
}

fn status_text(view: &SearchViewModel) -> String {
    let backend = match view.bridge {
        BridgeStatus::Connecting => "connecting",
        BridgeStatus::Connected => "connected",
        BridgeStatus::Disconnected => "unavailable",
    };
    match &view.results {
        ResultsView::Rows(rows) => format!("Backend: {backend} | Results: {}", rows.len()),
        ResultsView::Cleared | ResultsView::Placeholder { .. } => format!("Backend: {backend}"),
    }
}
