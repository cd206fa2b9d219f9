use super::AnnotatedNode;
use super::CheckStatus;
use super::ExpandState;
use crate::text::Label;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusDirection {
    Forward,
    Backward,
}

/// One visible row of a tree.
///
/// `parent` is the row index of the enclosing container in the same flattened list. Keys repeat
/// across subtrees, so sibling and parent lookups go through row indices.
#[derive(Clone, Debug, PartialEq)]
pub struct FlatNode<V> {
    pub key: String,
    pub id: String,
    pub parent: Option<usize>,
    pub layer: usize,
    pub value: V,
    pub label: Label,
    pub status: CheckStatus,
    pub has_children: bool,
    pub expanded: bool,
}

/// Depth-first rows: visible nodes whose ancestors are all expanded.
pub fn flatten<T, V: Clone>(
    nodes: &[AnnotatedNode<'_, T, V>],
    expand: &ExpandState,
) -> Vec<FlatNode<V>> {
    let mut out = Vec::new();
    flatten_into(nodes, None, expand, &mut out);
    out
}

fn flatten_into<T, V: Clone>(
    nodes: &[AnnotatedNode<'_, T, V>],
    parent: Option<usize>,
    expand: &ExpandState,
    out: &mut Vec<FlatNode<V>>,
) {
    for node in nodes.iter().filter(|n| n.visible) {
        let expanded = expand.is_expanded(node);
        let row = out.len();
        out.push(FlatNode {
            key: node.key.clone(),
            id: node.id.clone(),
            parent,
            layer: node.layer,
            value: node.value.clone(),
            label: node.label.clone(),
            status: node.status,
            has_children: node.has_children(),
            expanded,
        });
        if expanded {
            if let Some(children) = &node.children {
                flatten_into(children, Some(row), expand, out);
            }
        }
    }
}

/// Row index of the first row holding `value`.
fn row_of<V: PartialEq>(flat: &[FlatNode<V>], value: &V) -> Option<usize> {
    flat.iter().position(|n| &n.value == value)
}

/// Value to focus after moving from `current` in `direction`.
///
/// Movement wraps among the siblings of `current`. When `current` is `None` or not among the
/// rows, the first row wins. Returns `None` only for an empty list. A value that appears on
/// several rows resolves to its first row.
pub fn next_focusable<V: Clone + PartialEq>(
    flat: &[FlatNode<V>],
    current: Option<&V>,
    direction: FocusDirection,
) -> Option<V> {
    let first = flat.first()?;
    let Some(row) = current.and_then(|v| row_of(flat, v)) else {
        return Some(first.value.clone());
    };

    let parent = flat[row].parent;
    let siblings: Vec<usize> = (0..flat.len()).filter(|&i| flat[i].parent == parent).collect();
    let pos = siblings.iter().position(|&i| i == row).unwrap_or_default();
    let len = siblings.len();
    let next = match direction {
        FocusDirection::Forward => (pos + 1) % len,
        FocusDirection::Backward => (pos + len - 1) % len,
    };
    Some(flat[siblings[next]].value.clone())
}

/// Value of the row that contains `value`, if it is nested.
pub fn parent_of<V: Clone + PartialEq>(flat: &[FlatNode<V>], value: &V) -> Option<V> {
    let parent = flat[row_of(flat, value)?].parent?;
    Some(flat[parent].value.clone())
}

/// First visible child row of `value`; `None` while it is collapsed.
pub fn first_child_of<V: Clone + PartialEq>(flat: &[FlatNode<V>], value: &V) -> Option<V> {
    let row = row_of(flat, value)?;
    flat.get(row + 1)
        .filter(|n| n.parent == Some(row))
        .map(|n| n.value.clone())
}
