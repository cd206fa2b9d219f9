//! Check-state engine behind tree pickers.
//!
//! Source data of any shape is read through a [`TreeAccessor`]. Every pass projects the source
//! tree into [`AnnotatedNode`]s carrying a search visibility flag and a [`CheckStatus`]; the
//! projection is recomputed from scratch whenever the data, the checked values, the search term,
//! or the cascade flag change.
//!
//! - [`annotate`]: source tree + checked values -> annotated tree.
//! - [`toggle`]: proposes the next checked values for a check/uncheck of one node.
//! - [`flatten`] / [`next_focusable`]: keyboard traversal over the rows a picker shows.
//! - [`ExpandState`]: which containers are open.
mod annotate;
mod expand;
mod focus;
mod select;

pub use annotate::AnnotatedNode;
pub use annotate::annotate;
pub use expand::ExpandState;
pub use focus::FlatNode;
pub use focus::FocusDirection;
pub use focus::first_child_of;
pub use focus::flatten;
pub use focus::next_focusable;
pub use focus::parent_of;
pub use select::find_node;
pub use select::leaf_values;
pub use select::selected_nodes;
pub use select::toggle;

use crate::text::Label;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CheckStatus {
    #[default]
    Unchecked,
    Checked,
    Indeterminate,
}

impl CheckStatus {
    pub fn is_checked(self) -> bool {
        self == CheckStatus::Checked
    }
}

/// Identifier of a tree node.
///
/// Values are compared with `PartialEq`, so structured records work as identifiers. `key_part`
/// returns the text used in row keys for primitive values; structured values return `None` and
/// their sibling index is used instead.
pub trait TreeValue: Clone + PartialEq {
    fn key_part(&self) -> Option<String> {
        None
    }
}

impl TreeValue for String {
    fn key_part(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl TreeValue for &'static str {
    fn key_part(&self) -> Option<String> {
        Some((*self).to_string())
    }
}

macro_rules! primitive_tree_value {
    ($($t:ty),*) => {
        $(impl TreeValue for $t {
            fn key_part(&self) -> Option<String> {
                Some(self.to_string())
            }
        })*
    };
}

primitive_tree_value!(char, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl<T: TreeValue> TreeValue for Vec<T> {}

impl<T: TreeValue> TreeValue for Option<T> {
    fn key_part(&self) -> Option<String> {
        self.as_ref().and_then(TreeValue::key_part)
    }
}

/// Reads value, label, and children out of host records.
///
/// `children` returns `None` for leaves. `Some(&[])` is a container without children.
pub trait TreeAccessor<T> {
    type Value: TreeValue;

    fn value(&self, node: &T) -> Self::Value;
    fn label(&self, node: &T) -> Label;
    fn children<'a>(&self, node: &'a T) -> Option<&'a [T]>;
}

/// Ready-made source record.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeNode<V> {
    pub value: V,
    pub label: Label,
    pub children: Option<Vec<TreeNode<V>>>,
}

impl<V> TreeNode<V> {
    pub fn leaf(value: V, label: impl Into<Label>) -> Self {
        Self {
            value,
            label: label.into(),
            children: None,
        }
    }

    pub fn branch(value: V, label: impl Into<Label>, children: Vec<TreeNode<V>>) -> Self {
        Self {
            value,
            label: label.into(),
            children: Some(children),
        }
    }
}

/// Accessor for [`TreeNode`].
#[derive(Clone, Copy, Debug, Default)]
pub struct NodeAccessor;

impl<V: TreeValue> TreeAccessor<TreeNode<V>> for NodeAccessor {
    type Value = V;

    fn value(&self, node: &TreeNode<V>) -> V {
        node.value.clone()
    }

    fn label(&self, node: &TreeNode<V>) -> Label {
        node.label.clone()
    }

    fn children<'a>(&self, node: &'a TreeNode<V>) -> Option<&'a [TreeNode<V>]> {
        node.children.as_deref()
    }
}

/// Accessor built from three closures, for host records that are not [`TreeNode`]s.
pub struct FnAccessor<T, V> {
    value: Box<dyn Fn(&T) -> V>,
    label: Box<dyn Fn(&T) -> Label>,
    children: Box<dyn for<'a> Fn(&'a T) -> Option<&'a [T]>>,
}

impl<T, V> FnAccessor<T, V> {
    pub fn new(
        value: impl Fn(&T) -> V + 'static,
        label: impl Fn(&T) -> Label + 'static,
        children: impl for<'a> Fn(&'a T) -> Option<&'a [T]> + 'static,
    ) -> Self {
        Self {
            value: Box::new(value),
            label: Box::new(label),
            children: Box::new(children),
        }
    }
}

impl<T, V: TreeValue> TreeAccessor<T> for FnAccessor<T, V> {
    type Value = V;

    fn value(&self, node: &T) -> V {
        (self.value)(node)
    }

    fn label(&self, node: &T) -> Label {
        (self.label)(node)
    }

    fn children<'a>(&self, node: &'a T) -> Option<&'a [T]> {
        (self.children)(node)
    }
}

impl<T, V> std::fmt::Debug for FnAccessor<T, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnAccessor").finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::TreeNode;
    use super::TreeValue;

    /// Structured value: keys fall back to the sibling index.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct Id(pub u32);

    impl TreeValue for Id {}

    /// `P0: [Q0: [x0, x1]], P1: [R0: [y0, y1]]` as `Id(1..=8)` in depth-first order. `Q0` and
    /// `R0` share the key `1-0`, the four leaves pair up on `2-0` and `2-1`.
    pub fn cousins() -> Vec<TreeNode<Id>> {
        let branch = |id, label: &str, kids| TreeNode::branch(Id(id), label, kids);
        let leaf = |id, label: &str| TreeNode::leaf(Id(id), label);
        vec![
            branch(1, "P0", vec![branch(2, "Q0", vec![leaf(3, "x0"), leaf(4, "x1")])]),
            branch(5, "P1", vec![branch(6, "R0", vec![leaf(7, "y0"), leaf(8, "y1")])]),
        ]
    }

    /// `Fruit: [Misc: [Apple]], Veg: [Misc: [Carrot]]`; both `Misc` rows carry the value `misc`.
    pub fn repeated_misc() -> Vec<TreeNode<&'static str>> {
        vec![
            TreeNode::branch(
                "fruit",
                "Fruit",
                vec![TreeNode::branch("misc", "Misc", vec![TreeNode::leaf("apple", "Apple")])],
            ),
            TreeNode::branch(
                "veg",
                "Veg",
                vec![TreeNode::branch("misc", "Misc", vec![TreeNode::leaf("carrot", "Carrot")])],
            ),
        ]
    }

    /// `A: [B, C]`
    pub fn abc() -> Vec<TreeNode<&'static str>> {
        vec![TreeNode::branch(
            "a",
            "A",
            vec![TreeNode::leaf("b", "B"), TreeNode::leaf("c", "C")],
        )]
    }

    /// Fruit: [Apple, Banana, Cherry], Veg: [Carrot, Leek: [Baby leek, Giant leek]]
    pub fn groceries() -> Vec<TreeNode<&'static str>> {
        vec![
            TreeNode::branch(
                "fruit",
                "Fruit",
                vec![
                    TreeNode::leaf("apple", "Apple"),
                    TreeNode::leaf("banana", "Banana"),
                    TreeNode::leaf("cherry", "Cherry"),
                ],
            ),
            TreeNode::branch(
                "veg",
                "Veg",
                vec![
                    TreeNode::leaf("carrot", "Carrot"),
                    TreeNode::branch(
                        "leek",
                        "Leek",
                        vec![
                            TreeNode::leaf("baby-leek", "Baby leek"),
                            TreeNode::leaf("giant-leek", "Giant leek"),
                        ],
                    ),
                ],
            ),
        ]
    }
}
