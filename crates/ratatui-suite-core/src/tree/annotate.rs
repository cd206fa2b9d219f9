use super::CheckStatus;
use super::TreeAccessor;
use super::TreeValue;
use crate::text::Label;

/// One source node projected for a render pass.
///
/// `children` is `Some` iff the source node has a children list, even an empty one.
///
/// `key` follows the `"{layer}-{value or index}"` scheme and repeats across subtrees. `id` joins
/// the keys of the node and its ancestors with `/` and tells cousins apart.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotatedNode<'a, T, V> {
    pub key: String,
    pub id: String,
    pub layer: usize,
    pub label: Label,
    pub value: V,
    pub data: &'a T,
    pub visible: bool,
    pub status: CheckStatus,
    pub children: Option<Vec<AnnotatedNode<'a, T, V>>>,
}

impl<T, V> AnnotatedNode<'_, T, V> {
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Containers with an empty children list can never be opened.
    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }
}

/// Projects `roots` into annotated nodes, depth-first and order preserving.
///
/// Leaves are checked iff their value equals a member of `checked`. With `cascade`, containers
/// aggregate their children (all checked, all unchecked, or indeterminate) and are visible iff a
/// child is visible. Without it, containers stay unchecked and are visible if their own label
/// matches `search` or a child is visible.
///
/// A container with an empty children list is neither visible nor checked in either mode, and
/// is left out of its parent's aggregation.
pub fn annotate<'a, T, A>(
    roots: &'a [T],
    accessor: &A,
    checked: &[A::Value],
    search: &str,
    cascade: bool,
) -> Vec<AnnotatedNode<'a, T, A::Value>>
where
    A: TreeAccessor<T>,
{
    annotate_layer(roots, None, 0, accessor, checked, search, cascade)
}

fn annotate_layer<'a, T, A>(
    nodes: &'a [T],
    parent_id: Option<&str>,
    layer: usize,
    accessor: &A,
    checked: &[A::Value],
    search: &str,
    cascade: bool,
) -> Vec<AnnotatedNode<'a, T, A::Value>>
where
    A: TreeAccessor<T>,
{
    nodes
        .iter()
        .enumerate()
        .map(|(index, data)| {
            annotate_node(data, index, parent_id, layer, accessor, checked, search, cascade)
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn annotate_node<'a, T, A>(
    data: &'a T,
    index: usize,
    parent_id: Option<&str>,
    layer: usize,
    accessor: &A,
    checked: &[A::Value],
    search: &str,
    cascade: bool,
) -> AnnotatedNode<'a, T, A::Value>
where
    A: TreeAccessor<T>,
{
    let value = accessor.value(data);
    let label = accessor.label(data);
    let key = format!(
        "{layer}-{}",
        value.key_part().unwrap_or_else(|| index.to_string())
    );
    let id = match parent_id {
        Some(parent) => format!("{parent}/{key}"),
        None => key.clone(),
    };

    let children = accessor
        .children(data)
        .map(|kids| annotate_layer(kids, Some(&id), layer + 1, accessor, checked, search, cascade));

    let (visible, status) = match &children {
        None => {
            let status = if checked.contains(&value) {
                CheckStatus::Checked
            } else {
                CheckStatus::Unchecked
            };
            (label.matches(search), status)
        }
        Some(kids) if kids.is_empty() => (false, CheckStatus::Unchecked),
        Some(kids) => {
            let any_visible = kids.iter().any(|k| k.visible);
            if cascade {
                (any_visible, aggregate(kids))
            } else {
                (label.matches(search) || any_visible, CheckStatus::Unchecked)
            }
        }
    };

    AnnotatedNode {
        key,
        id,
        layer,
        label,
        value,
        data,
        visible,
        status,
        children,
    }
}

/// Empty containers hold no leaves to check and do not vote. With nothing left to vote, the
/// container is unchecked.
fn aggregate<T, V>(children: &[AnnotatedNode<'_, T, V>]) -> CheckStatus {
    let mut voters = children
        .iter()
        .filter(|c| !c.children.as_ref().is_some_and(Vec::is_empty))
        .peekable();
    if voters.peek().is_none() {
        return CheckStatus::Unchecked;
    }
    let (mut checked, mut unchecked) = (true, true);
    for child in voters {
        checked &= child.status == CheckStatus::Checked;
        unchecked &= child.status == CheckStatus::Unchecked;
    }
    if checked {
        CheckStatus::Checked
    } else if unchecked {
        CheckStatus::Unchecked
    } else {
        CheckStatus::Indeterminate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::FnAccessor;
    use crate::tree::NodeAccessor;
    use crate::tree::TreeNode;
    use crate::tree::fixtures;

    fn statuses<T, V>(nodes: &[AnnotatedNode<'_, T, V>]) -> Vec<(String, CheckStatus)> {
        let mut out = Vec::new();
        for n in nodes {
            out.push((n.key.clone(), n.status));
            if let Some(kids) = &n.children {
                out.extend(statuses(kids));
            }
        }
        out
    }

    fn visible_labels<T, V>(nodes: &[AnnotatedNode<'_, T, V>]) -> Vec<String> {
        let mut out = Vec::new();
        for n in nodes {
            if n.visible {
                out.push(n.label.text().unwrap_or_default().into_owned());
            }
            if let Some(kids) = &n.children {
                out.extend(visible_labels(kids));
            }
        }
        out
    }

    #[test]
    fn cascade_partial_selection_is_indeterminate() {
        let data = fixtures::abc();
        let tree = annotate(&data, &NodeAccessor, &["b"], "", true);
        assert_eq!(
            statuses(&tree),
            vec![
                ("0-a".to_string(), CheckStatus::Indeterminate),
                ("1-b".to_string(), CheckStatus::Checked),
                ("1-c".to_string(), CheckStatus::Unchecked),
            ]
        );
    }

    #[test]
    fn cascade_full_selection_checks_parent() {
        let data = fixtures::abc();
        let tree = annotate(&data, &NodeAccessor, &["b", "c"], "", true);
        assert_eq!(tree[0].status, CheckStatus::Checked);
    }

    #[test]
    fn without_cascade_parents_never_aggregate() {
        let data = fixtures::abc();
        let tree = annotate(&data, &NodeAccessor, &["b", "c"], "", false);
        assert_eq!(tree[0].status, CheckStatus::Unchecked);
        let kids = tree[0].children.as_ref().unwrap();
        assert!(kids.iter().all(|k| k.status == CheckStatus::Checked));
    }

    #[test]
    fn nested_cascade_bubbles_up() {
        let data = fixtures::groceries();
        let tree = annotate(&data, &NodeAccessor, &["baby-leek", "giant-leek"], "", true);
        let veg = &tree[1];
        let leek = &veg.children.as_ref().unwrap()[1];
        assert_eq!(leek.status, CheckStatus::Checked);
        assert_eq!(veg.status, CheckStatus::Indeterminate);
        assert_eq!(tree[0].status, CheckStatus::Unchecked);
    }

    #[test]
    fn search_filters_leaves_and_hides_empty_parents() {
        let data = fixtures::groceries();
        let tree = annotate(&data, &NodeAccessor, &[], "APP", true);
        assert_eq!(visible_labels(&tree), vec!["Fruit", "Apple"]);

        let tree = annotate(&data, &NodeAccessor, &[], "a", true);
        assert_eq!(
            visible_labels(&tree),
            vec!["Fruit", "Apple", "Banana", "Veg", "Carrot", "Leek", "Baby leek", "Giant leek"]
        );

        let tree = annotate(&data, &NodeAccessor, &[], "  ", true);
        assert_eq!(visible_labels(&tree).len(), 9);
    }

    #[test]
    fn non_cascade_parent_matches_on_its_own_label() {
        let data = fixtures::groceries();
        let tree = annotate(&data, &NodeAccessor, &[], "veg", false);
        assert_eq!(visible_labels(&tree), vec!["Veg"]);

        let tree = annotate(&data, &NodeAccessor, &[], "veg", true);
        assert!(visible_labels(&tree).is_empty());
    }

    #[test]
    fn empty_container_is_hidden_and_unchecked() {
        let data = vec![TreeNode::branch("x", "Empty", Vec::new())];
        for cascade in [true, false] {
            let tree = annotate(&data, &NodeAccessor, &["x"], "", cascade);
            assert!(!tree[0].visible);
            assert_eq!(tree[0].status, CheckStatus::Unchecked);
            assert!(!tree[0].is_leaf());
            assert!(!tree[0].has_children());
        }
    }

    #[test]
    fn empty_container_does_not_hold_back_its_parent() {
        let data = vec![TreeNode::branch(
            "p",
            "P",
            vec![TreeNode::leaf("a", "A"), TreeNode::branch("e", "E", Vec::new())],
        )];
        let tree = annotate(&data, &NodeAccessor, &[], "", true);
        assert_eq!(tree[0].status, CheckStatus::Unchecked);

        let checked = crate::tree::toggle(&[], &tree[0], true, true);
        assert_eq!(checked, vec!["p", "a"]);
        let tree = annotate(&data, &NodeAccessor, &checked, "", true);
        assert_eq!(tree[0].status, CheckStatus::Checked);

        let checked = crate::tree::toggle(&checked, &tree[0], false, true);
        assert!(checked.is_empty());
        let tree = annotate(&data, &NodeAccessor, &checked, "", true);
        assert_eq!(tree[0].status, CheckStatus::Unchecked);
    }

    #[test]
    fn container_of_empty_containers_is_unchecked() {
        let data = vec![TreeNode::branch(
            "p",
            "P",
            vec![TreeNode::branch("e", "E", Vec::new())],
        )];
        let tree = annotate(&data, &NodeAccessor, &["p"], "", true);
        assert_eq!(tree[0].status, CheckStatus::Unchecked);
    }

    #[test]
    fn cousins_share_keys_but_not_ids() {
        let data = fixtures::cousins();
        let tree = annotate(&data, &NodeAccessor, &[], "", true);
        let q0 = &tree[0].children.as_ref().unwrap()[0];
        let r0 = &tree[1].children.as_ref().unwrap()[0];
        assert_eq!(q0.key, "1-0");
        assert_eq!(q0.key, r0.key);
        assert_eq!(q0.id, "0-0/1-0");
        assert_eq!(r0.id, "0-1/1-0");
        let y1 = &r0.children.as_ref().unwrap()[1];
        assert_eq!(y1.id, "0-1/1-0/2-1");
    }

    #[test]
    fn char_values_name_keys_and_lists_use_the_index() {
        let data = vec![TreeNode::leaf('x', "x"), TreeNode::leaf('y', "y")];
        let tree = annotate(&data, &NodeAccessor, &[], "", true);
        assert_eq!(tree[1].key, "0-y");

        let data = vec![TreeNode::leaf(vec![1u8], "one"), TreeNode::leaf(vec![1u8], "again")];
        let tree = annotate(&data, &NodeAccessor, &[], "", true);
        assert_eq!(tree[1].key, "0-1");
    }

    #[test]
    fn structured_values_use_sibling_index_in_keys() {
        #[derive(Clone, Debug, PartialEq)]
        struct Id {
            region: &'static str,
            n: u32,
        }
        impl crate::tree::TreeValue for Id {}

        let data = vec![
            TreeNode::leaf(Id { region: "eu", n: 1 }, "one"),
            TreeNode::leaf(Id { region: "eu", n: 2 }, "two"),
        ];
        let checked = vec![Id { region: "eu", n: 2 }];
        let tree = annotate(&data, &NodeAccessor, &checked, "", true);
        assert_eq!(tree[0].key, "0-0");
        assert_eq!(tree[1].key, "0-1");
        assert_eq!(tree[1].status, CheckStatus::Checked);
    }

    #[test]
    fn annotation_is_idempotent() {
        let data = fixtures::groceries();
        let a = annotate(&data, &NodeAccessor, &["apple", "carrot"], "e", true);
        let b = annotate(&data, &NodeAccessor, &["apple", "carrot"], "e", true);
        assert_eq!(a, b);
    }

    #[test]
    fn closure_accessor_reads_host_records() {
        struct Row {
            id: u32,
            name: String,
            items: Vec<Row>,
        }
        let data = vec![Row {
            id: 1,
            name: "Root".into(),
            items: vec![Row {
                id: 2,
                name: "Child".into(),
                items: Vec::new(),
            }],
        }];
        let accessor = FnAccessor::new(
            |r: &Row| r.id,
            |r: &Row| Label::from(r.name.as_str()),
            |r: &Row| (!r.items.is_empty()).then_some(r.items.as_slice()),
        );
        let tree = annotate(&data, &accessor, &[2], "", true);
        assert_eq!(tree[0].key, "0-1");
        assert_eq!(tree[0].status, CheckStatus::Checked);
        assert_eq!(tree[0].children.as_ref().unwrap()[0].key, "1-2");
    }
}
