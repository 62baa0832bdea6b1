use pagecraft_model::Document;

/// Transient UI state: what is selected and what the pointer is over.
/// Never persisted and never part of history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub selected_id: Option<String>,
    pub hovered_id: Option<String>,
}

impl Selection {
    pub fn clear(&mut self) {
        self.selected_id = None;
        self.hovered_id = None;
    }

    /// Clear any field pointing at one of `removed`
    pub fn forget(&mut self, removed: &[String]) {
        let gone = |id: &Option<String>| id.as_ref().is_some_and(|id| removed.contains(id));

        if gone(&self.selected_id) {
            self.selected_id = None;
        }
        if gone(&self.hovered_id) {
            self.hovered_id = None;
        }
    }

    /// Clear any field pointing at a node that `doc` does not contain
    pub fn retain_existing(&mut self, doc: &Document) {
        let missing = |id: &Option<String>| {
            id.as_deref()
                .is_some_and(|id| crate::locator::find(&doc.components, id).is_none())
        };

        if missing(&self.selected_id) {
            self.selected_id = None;
        }
        if missing(&self.hovered_id) {
            self.hovered_id = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::ComponentNode;

    #[test]
    fn test_forget_clears_only_matching_fields() {
        let mut selection = Selection {
            selected_id: Some("a".to_string()),
            hovered_id: Some("b".to_string()),
        };

        selection.forget(&["b".to_string(), "c".to_string()]);
        assert_eq!(selection.selected_id.as_deref(), Some("a"));
        assert_eq!(selection.hovered_id, None);
    }

    #[test]
    fn test_retain_existing() {
        let doc = Document::with_components(vec![ComponentNode::new("a", "box")]);
        let mut selection = Selection {
            selected_id: Some("a".to_string()),
            hovered_id: Some("gone".to_string()),
        };

        selection.retain_existing(&doc);
        assert_eq!(selection.selected_id.as_deref(), Some("a"));
        assert_eq!(selection.hovered_id, None);
    }
}
