use super::AnnotatedNode;

/// Returns the checked values after checking (`checked = true`) or unchecking `node`.
///
/// The node's own value is always added or removed. With `cascade`, every descendant leaf follows
/// it. Values already present are not duplicated; removal drops the first equal element. The
/// caller's slice is left untouched.
pub fn toggle<T, V>(
    current: &[V],
    node: &AnnotatedNode<'_, T, V>,
    checked: bool,
    cascade: bool,
) -> Vec<V>
where
    V: Clone + PartialEq,
{
    let mut next = current.to_vec();
    let mut targets = vec![&node.value];
    if cascade {
        if let Some(children) = &node.children {
            collect_leaves(children, &mut targets);
        }
    }

    for value in targets {
        if checked {
            if !next.contains(value) {
                next.push(value.clone());
            }
        } else if let Some(pos) = next.iter().position(|v| v == value) {
            next.remove(pos);
        }
    }
    next
}

/// All leaf values of `nodes`, depth-first.
pub fn leaf_values<T, V: Clone>(nodes: &[AnnotatedNode<'_, T, V>]) -> Vec<V> {
    let mut refs = Vec::new();
    collect_leaves(nodes, &mut refs);
    refs.into_iter().cloned().collect()
}

fn collect_leaves<'n, T, V>(nodes: &'n [AnnotatedNode<'_, T, V>], out: &mut Vec<&'n V>) {
    for node in nodes {
        match &node.children {
            Some(children) => collect_leaves(children, out),
            None => out.push(&node.value),
        }
    }
}

/// First node, depth-first, whose value equals `value`.
pub fn find_node<'n, 'a, T, V: PartialEq>(
    nodes: &'n [AnnotatedNode<'a, T, V>],
    value: &V,
) -> Option<&'n AnnotatedNode<'a, T, V>> {
    for node in nodes {
        if &node.value == value {
            return Some(node);
        }
        if let Some(found) = node.children.as_deref().and_then(|c| find_node(c, value)) {
            return Some(found);
        }
    }
    None
}

/// Nodes for each checked value, in the order of `checked`. Values missing from the tree are
/// skipped.
pub fn selected_nodes<'n, 'a, T, V: PartialEq>(
    nodes: &'n [AnnotatedNode<'a, T, V>],
    checked: &[V],
) -> Vec<&'n AnnotatedNode<'a, T, V>> {
    checked.iter().filter_map(|v| find_node(nodes, v)).collect()
}
