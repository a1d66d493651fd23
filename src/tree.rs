//! Lazy tree view over parsed JSON
//!
//! Eagerly expanding an arbitrarily large or deeply nested document into
//! interactive markup is the dominant render cost and can freeze the
//! interface. This module builds the tree incrementally instead: nodes past
//! the initial expansion depth, or with too many direct children, are
//! *deferred* — only their delimiters and a child-count hint exist until the
//! user expands them, at which point children are materialized in fixed-size
//! batches with the scheduler yielding between batches.
//!
//! Per-node state machine: `Deferred → Materializing → Materialized`, then
//! pure expand/collapse visibility flips. Collapsing a node mid-flight stops
//! further batches; re-expanding resumes where it left off.

use std::collections::HashMap;

use serde_json::Value;

/// Composite nodes at this depth or deeper start deferred
pub const INITIAL_EXPANSION_DEPTH: usize = 2;
/// Composite nodes with more direct children than this start deferred
pub const DEFER_CHILD_THRESHOLD: usize = 100;
/// Children materialized per batch
pub const MATERIALIZE_BATCH_SIZE: usize = 50;
/// String scalars longer than this are displayed truncated
pub const SCALAR_DISPLAY_MAX: usize = 500;

/// Stable identifier of a node within its [`TreeView`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NodeId(pub usize);

/// Delimiter style of a composite node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeKind {
    Object,
    Array,
}

impl CompositeKind {
    pub fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            CompositeKind::Object => ("{", "}"),
            CompositeKind::Array => ("[", "]"),
        }
    }
}

/// Materialization state of a composite node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterializeState {
    /// Children exist logically but are not instantiated
    Deferred,
    /// Batched materialization is in progress
    Materializing,
    /// All children are instantiated
    Materialized,
}

/// Payload of a tree node
#[derive(Debug, Clone)]
pub enum NodeContent {
    Composite {
        kind: CompositeKind,
        /// Instantiated children, in original document order
        children: Vec<NodeId>,
        /// Logical child count, stable across materialization
        total: usize,
    },
    Scalar {
        /// Possibly truncated display text
        display: String,
        /// The untruncated value, kept when the display was cut
        full: Option<String>,
    },
}

/// One node of the lazy tree
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub id: NodeId,
    /// Object key of this node, `None` for array elements and the root
    pub key: Option<String>,
    pub depth: usize,
    pub expanded: bool,
    pub last_sibling: bool,
    pub state: MaterializeState,
    pub content: NodeContent,
    /// A batch continuation is already queued for this node
    batch_pending: bool,
}

impl TreeNode {
    pub fn is_composite(&self) -> bool {
        matches!(self.content, NodeContent::Composite { .. })
    }

    /// Logical child count (composites only)
    pub fn total_children(&self) -> usize {
        match &self.content {
            NodeContent::Composite { total, .. } => *total,
            NodeContent::Scalar { .. } => 0,
        }
    }

    /// Instantiated child count
    pub fn built_children(&self) -> usize {
        match &self.content {
            NodeContent::Composite { children, .. } => children.len(),
            NodeContent::Scalar { .. } => 0,
        }
    }
}

/// What a toggle did, so the update layer knows whether to schedule a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Nothing happened (scalar or unknown node)
    Noop,
    /// Pure visibility flip
    VisibilityOnly,
    /// First expansion of a deferred node; materialization begins
    StartMaterialize,
    /// Re-expansion of a node whose materialization was interrupted
    ResumeMaterialize,
}

/// Result of one materialization batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Node collapsed or state changed; no further batches
    Stopped,
    /// More children remain; schedule the next batch
    More,
    /// All children instantiated
    Done,
}

/// Navigable tree over a parsed JSON value
#[derive(Debug, Clone, Default)]
pub struct TreeView {
    nodes: Vec<TreeNode>,
    root: NodeId,
    /// Out-of-band index of deferred nodes' parsed values, so children can
    /// be recovered later without re-parsing the document
    deferred_values: HashMap<NodeId, Value>,
}

impl TreeView {
    /// Build the tree for a parsed document. Nodes within the initial
    /// expansion depth and below the child-count threshold are instantiated
    /// eagerly; everything else starts deferred.
    pub fn build(value: &Value) -> Self {
        let mut tree = TreeView::default();
        tree.root = tree.build_node(value, None, 0, true);
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    /// Total instantiated nodes in the arena
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Children of a node, in document order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.nodes.get(id.0).map(|n| &n.content) {
            Some(NodeContent::Composite { children, .. }) => children,
            _ => &[],
        }
    }

    fn should_defer(depth: usize, total: usize) -> bool {
        depth >= INITIAL_EXPANSION_DEPTH || total > DEFER_CHILD_THRESHOLD
    }

    fn alloc(&mut self, key: Option<String>, depth: usize, last_sibling: bool) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            id,
            key,
            depth,
            expanded: false,
            last_sibling,
            state: MaterializeState::Materialized,
            content: NodeContent::Scalar {
                display: String::new(),
                full: None,
            },
            batch_pending: false,
        });
        id
    }

    fn build_node(
        &mut self,
        value: &Value,
        key: Option<String>,
        depth: usize,
        last_sibling: bool,
    ) -> NodeId {
        let id = self.alloc(key, depth, last_sibling);
        match value {
            Value::Object(map) => {
                let total = map.len();
                if Self::should_defer(depth, total) {
                    self.defer(id, CompositeKind::Object, total, value);
                } else {
                    let mut children = Vec::with_capacity(total);
                    for (i, (k, v)) in map.iter().enumerate() {
                        children.push(self.build_node(
                            v,
                            Some(k.clone()),
                            depth + 1,
                            i + 1 == total,
                        ));
                    }
                    self.finish_composite(id, CompositeKind::Object, children, total);
                }
            }
            Value::Array(arr) => {
                let total = arr.len();
                if Self::should_defer(depth, total) {
                    self.defer(id, CompositeKind::Array, total, value);
                } else {
                    let mut children = Vec::with_capacity(total);
                    for (i, v) in arr.iter().enumerate() {
                        children.push(self.build_node(v, None, depth + 1, i + 1 == total));
                    }
                    self.finish_composite(id, CompositeKind::Array, children, total);
                }
            }
            scalar => {
                let (display, full) = format_scalar(scalar);
                let node = &mut self.nodes[id.0];
                node.content = NodeContent::Scalar { display, full };
            }
        }
        id
    }

    fn defer(&mut self, id: NodeId, kind: CompositeKind, total: usize, value: &Value) {
        let node = &mut self.nodes[id.0];
        node.content = NodeContent::Composite {
            kind,
            children: Vec::new(),
            total,
        };
        node.state = MaterializeState::Deferred;
        node.expanded = false;
        self.deferred_values.insert(id, value.clone());
    }

    fn finish_composite(
        &mut self,
        id: NodeId,
        kind: CompositeKind,
        children: Vec<NodeId>,
        total: usize,
    ) {
        let node = &mut self.nodes[id.0];
        node.content = NodeContent::Composite {
            kind,
            children,
            total,
        };
        node.state = MaterializeState::Materialized;
        node.expanded = true;
    }

    /// Toggle a node's fold state. Local, explicit, idempotent: only this
    /// node's direct child container is affected, and a deferred node
    /// triggers materialization exactly once.
    pub fn toggle(&mut self, id: NodeId) -> ToggleOutcome {
        let Some(node) = self.nodes.get_mut(id.0) else {
            return ToggleOutcome::Noop;
        };
        if !node.is_composite() {
            return ToggleOutcome::Noop;
        }
        if node.expanded {
            node.expanded = false;
            // An in-flight batch sees the collapse and stops scheduling
            return ToggleOutcome::VisibilityOnly;
        }
        node.expanded = true;
        match node.state {
            MaterializeState::Deferred => {
                node.state = MaterializeState::Materializing;
                node.batch_pending = true;
                ToggleOutcome::StartMaterialize
            }
            MaterializeState::Materializing => {
                if node.batch_pending {
                    // The queued batch carries on; only visibility changed
                    ToggleOutcome::VisibilityOnly
                } else {
                    node.batch_pending = true;
                    ToggleOutcome::ResumeMaterialize
                }
            }
            MaterializeState::Materialized => ToggleOutcome::VisibilityOnly,
        }
    }

    /// Instantiate the next batch of children for a materializing node.
    /// Order always equals the original key/array order.
    pub fn materialize_batch(&mut self, id: NodeId) -> BatchOutcome {
        let (depth, start, total, expanded, state) = match self.nodes.get_mut(id.0) {
            Some(node) => {
                node.batch_pending = false;
                (
                    node.depth,
                    node.built_children(),
                    node.total_children(),
                    node.expanded,
                    node.state,
                )
            }
            None => return BatchOutcome::Stopped,
        };
        if state != MaterializeState::Materializing {
            return BatchOutcome::Stopped;
        }
        if !expanded {
            // User collapsed the node mid-materialization; progress is
            // retained and resumes on the next expand
            return BatchOutcome::Stopped;
        }

        let Some(value) = self.deferred_values.remove(&id) else {
            tracing::warn!("no deferred value for materializing node {:?}", id);
            self.nodes[id.0].state = MaterializeState::Materialized;
            return BatchOutcome::Stopped;
        };

        let end = (start + MATERIALIZE_BATCH_SIZE).min(total);
        let mut new_children = Vec::with_capacity(end - start);
        match &value {
            Value::Object(map) => {
                for (i, (k, v)) in map.iter().enumerate().skip(start).take(end - start) {
                    new_children.push(self.build_node(
                        v,
                        Some(k.clone()),
                        depth + 1,
                        i + 1 == total,
                    ));
                }
            }
            Value::Array(arr) => {
                for (i, v) in arr.iter().enumerate().skip(start).take(end - start) {
                    new_children.push(self.build_node(v, None, depth + 1, i + 1 == total));
                }
            }
            _ => {}
        }

        let done = {
            let node = &mut self.nodes[id.0];
            if let NodeContent::Composite { children, .. } = &mut node.content {
                children.extend(new_children);
                children.len() >= total
            } else {
                true
            }
        };

        if done {
            self.nodes[id.0].state = MaterializeState::Materialized;
            BatchOutcome::Done
        } else {
            self.deferred_values.insert(id, value);
            self.nodes[id.0].batch_pending = true;
            BatchOutcome::More
        }
    }

    /// Flatten the visible portion of the tree into display lines.
    /// Deferred/collapsed composites render as delimiters plus a count hint.
    pub fn visible_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.push_lines(self.root, &mut lines);
        lines
    }

    fn push_lines(&self, id: NodeId, lines: &mut Vec<String>) {
        let Some(node) = self.node(id) else { return };
        let indent = "  ".repeat(node.depth);
        let label = match &node.key {
            Some(k) => format!("\"{}\": ", k),
            None => String::new(),
        };
        match &node.content {
            NodeContent::Scalar { display, .. } => {
                lines.push(format!("{indent}{label}{display}"));
            }
            NodeContent::Composite { kind, total, .. } => {
                let (open, close) = kind.delimiters();
                if node.expanded && node.state == MaterializeState::Materialized {
                    lines.push(format!("{indent}{label}{open}"));
                    for child in self.children(id) {
                        self.push_lines(*child, lines);
                    }
                    lines.push(format!("{indent}{close}"));
                } else {
                    let noun = if *total == 1 { "item" } else { "items" };
                    lines.push(format!("{indent}{label}{open} … {total} {noun} {close}"));
                }
            }
        }
    }
}

/// Render a scalar for display, truncating long strings but keeping the
/// full value alongside.
fn format_scalar(value: &Value) -> (String, Option<String>) {
    match value {
        Value::String(s) => {
            if s.chars().count() > SCALAR_DISPLAY_MAX {
                let cut: String = s.chars().take(SCALAR_DISPLAY_MAX).collect();
                (format!("\"{cut}…\" (truncated)"), Some(s.clone()))
            } else {
                (format!("{value}"), None)
            }
        }
        other => (other.to_string(), None),
    }
}
