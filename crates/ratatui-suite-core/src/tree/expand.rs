use super::AnnotatedNode;

/// Which containers of a tree are open.
///
/// Containers are tracked by [`AnnotatedNode::id`], so two containers that share a key under
/// different parents open independently. `toggled` holds the ids the user flipped away from
/// `default_expand_all`; `expand_all`, when set, overrides both.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpandState {
    pub expand_all: Option<bool>,
    pub default_expand_all: bool,
    toggled: Vec<String>,
}

impl ExpandState {
    pub fn new(default_expand_all: bool) -> Self {
        Self {
            default_expand_all,
            ..Default::default()
        }
    }

    pub fn is_expanded<T, V>(&self, node: &AnnotatedNode<'_, T, V>) -> bool {
        if !node.has_children() {
            return false;
        }
        self.is_id_expanded(&node.id)
    }

    pub fn is_id_expanded(&self, id: &str) -> bool {
        if let Some(all) = self.expand_all {
            return all;
        }
        if self.toggled.iter().any(|k| k == id) {
            !self.default_expand_all
        } else {
            self.default_expand_all
        }
    }

    pub fn toggle(&mut self, id: &str) {
        if let Some(pos) = self.toggled.iter().position(|k| k == id) {
            self.toggled.remove(pos);
        } else {
            self.toggled.push(id.to_string());
        }
    }

    pub fn set_expanded(&mut self, id: &str, expanded: bool) {
        if self.is_id_expanded(id) != expanded {
            self.toggle(id);
        }
    }
}
