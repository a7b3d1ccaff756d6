use crate::platform::dom::{Document, Element, ElementId};

use super::constants::*;

/// Element handles the UI works against, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchElements {
    pub search_bar: ElementId,
    pub results: ElementId,
    pub container: Option<ElementId>,
    pub status: Option<ElementId>,
}

impl SearchElements {
    pub fn standard() -> Self {
        Self {
            search_bar: SEARCH_BAR,
            results: SEARCH_RESULTS,
            container: Some(SEARCH_BOX_CONTAINER),
            status: Some(SEARCH_STATUS),
        }
    }
}

pub fn initial_document(elements: &SearchElements) -> Document {
    let mut document = Document::new();
    if let Some(container) = elements.container {
        document.insert(container, Element::default());
    }
    document.insert(elements.search_bar, Element::default());
    document.insert(elements.results, Element::default());
    if let Some(status) = elements.status {
        document.insert(status, Element::default());
    }
    document
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_document_has_the_fixed_ids() {
        let document = initial_document(&SearchElements::standard());
        for id in ["search-box-container", "search-bar", "search-results"] {
            assert!(document.contains(ElementId::new(id)), "missing {id}");
        }
    }

    #[test]
    fn optional_elements_can_be_left_out() {
        let elements = SearchElements {
            container: None,
            status: None,
            ..SearchElements::standard()
        };
        let document = initial_document(&elements);
        assert!(!document.contains(SEARCH_BOX_CONTAINER));
        assert!(!document.contains(SEARCH_STATUS));
        assert!(document.contains(SEARCH_BAR));
    }
}
