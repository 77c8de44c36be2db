//! Arena-backed route tree assembled from a route root directory.
//!
//! Nodes live in a single `Vec` and refer to each other by [`NodeId`]. The
//! parent index is only consulted while marking view ancestry during assembly.

use crate::classify::{classify, Classification, Half, SlotKind, WILDCARD_SEGMENT};
use crate::error::{Result, RouteError};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

/// Index of a node inside a [`RouteTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node of every tree.
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// Files occupying one slot: at most one view file and one handler file.
///
/// Paths are relative to the route root and always use `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slot {
    pub view: Option<String>,
    pub handler: Option<String>,
}

impl Slot {
    fn set(&mut self, half: Half, file: String) {
        let target = match half {
            Half::View => &mut self.view,
            Half::Handler => &mut self.handler,
        };
        if let Some(previous) = target.replace(file) {
            tracing::warn!(%previous, "route slot provided twice, keeping the later file");
        }
    }
}

/// One directory or leaf file in the route tree.
#[derive(Debug, Clone)]
pub struct RouteNode {
    name: String,
    parent: Option<NodeId>,
    children: IndexMap<String, NodeId>,
    has_view: bool,
    leaf: Option<Slot>,
    layout: Option<Slot>,
    index: Option<Slot>,
}

impl RouteNode {
    fn new(name: String, parent: Option<NodeId>) -> Self {
        Self {
            name,
            parent,
            children: IndexMap::new(),
            has_view: false,
            leaf: None,
            layout: None,
            index: None,
        }
    }

    /// Path segment, empty for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when this node or any descendant provides a view.
    pub fn has_view(&self) -> bool {
        self.has_view
    }

    pub fn leaf(&self) -> Option<&Slot> {
        self.leaf.as_ref()
    }

    pub fn layout(&self) -> Option<&Slot> {
        self.layout.as_ref()
    }

    pub fn index(&self) -> Option<&Slot> {
        self.index.as_ref()
    }

    pub fn is_wildcard(&self) -> bool {
        self.name == WILDCARD_SEGMENT
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// A route tree for a single route root.
#[derive(Debug, Clone)]
pub struct RouteTree {
    nodes: Vec<RouteNode>,
}

impl Default for RouteTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTree {
    /// Create a tree holding only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![RouteNode::new(String::new(), None)],
        }
    }

    /// Scan `root` recursively and build its tree.
    ///
    /// Entries are visited sorted by file name so the same snapshot always
    /// produces the same insertion order.
    pub fn from_dir(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(RouteError::InvalidRoot(root.to_path_buf()));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| RouteError::scan(root, e))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(root)
                .map_err(|_| RouteError::OutsideRoot(entry.path().to_path_buf()))?;
            let segments: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            files.push(segments.join("/"));
        }

        Ok(Self::from_files(files))
    }

    /// Build a tree from root-relative `/`-separated file paths, in order.
    ///
    /// A leaf file owns its name: files inside a same-named directory are
    /// dropped, so a leaf node never carries layout, index or children.
    pub fn from_files<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut routed = Vec::new();
        for path in paths {
            let path = path.as_ref();
            let (dirs, file_name): (Vec<String>, &str) = match path.rsplit_once('/') {
                Some((dirs, file)) => (dirs.split('/').map(str::to_string).collect(), file),
                None => (Vec::new(), path),
            };
            match classify(file_name) {
                Classification::Route { slot, half } => {
                    routed.push((dirs, slot, half, path.to_string()));
                }
                Classification::Skip(reason) => {
                    tracing::debug!(path, ?reason, "skipping route file");
                }
            }
        }

        let leaf_paths: HashSet<Vec<String>> = routed
            .iter()
            .filter_map(|(dirs, slot, _, _)| match slot {
                SlotKind::Leaf(name) => {
                    let mut owned: Vec<String> = dirs.clone();
                    owned.push(name.clone());
                    Some(owned)
                }
                _ => None,
            })
            .collect();

        let mut tree = Self::new();
        for (dirs, slot, half, file) in routed {
            let shadowed = (1..=dirs.len()).any(|depth| leaf_paths.contains(&dirs[..depth]));
            if shadowed {
                tracing::debug!(%file, "skipping file below a leaf route");
                continue;
            }
            tree.insert(&dirs, slot, half, file);
        }
        tree
    }

    /// Place one classified file, creating intermediate nodes as needed.
    fn insert(&mut self, dirs: &[String], slot: SlotKind, half: Half, file: String) {
        let mut node = NodeId::ROOT;
        for dir in dirs {
            node = self.ensure_child(node, dir);
        }

        let target = match &slot {
            SlotKind::Leaf(name) => self.ensure_child(node, name),
            SlotKind::Layout | SlotKind::Index => node,
        };

        let entry = &mut self.nodes[target.0];
        let slot = match slot {
            SlotKind::Layout => &mut entry.layout,
            SlotKind::Index => &mut entry.index,
            SlotKind::Leaf(_) => &mut entry.leaf,
        };
        slot.get_or_insert_with(Slot::default).set(half, file);

        if half == Half::View {
            self.mark_view(target);
        }
    }

    fn ensure_child(&mut self, parent: NodeId, name: &str) -> NodeId {
        if let Some(&id) = self.nodes[parent.0].children.get(name) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(RouteNode::new(name.to_string(), Some(parent)));
        self.nodes[parent.0].children.insert(name.to_string(), id);
        id
    }

    /// Mark `id` and every ancestor as view-bearing.
    fn mark_view(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(node) = current {
            let entry = &mut self.nodes[node.0];
            if entry.has_view {
                break;
            }
            entry.has_view = true;
            current = entry.parent;
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn node(&self, id: NodeId) -> &RouteNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        let root = &self.nodes[0];
        root.children.is_empty() && root.index.is_none() && root.layout.is_none()
    }

    /// Look up a direct child by segment name.
    pub fn child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.nodes[id.0].children.get(name).copied()
    }

    /// Resolve a `/`-separated route path from the root.
    pub fn find(&self, path: &str) -> Option<NodeId> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(NodeId::ROOT, |node, segment| self.child(node, segment))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// The catch-all child, if the node has one.
    pub fn wildcard_child(&self, id: NodeId) -> Option<NodeId> {
        self.child(id, WILDCARD_SEGMENT)
    }

    /// Children in traversal order: insertion order with the wildcard last.
    pub fn ordered_children(&self, id: NodeId) -> Vec<NodeId> {
        let children = &self.nodes[id.0].children;
        let mut ordered: Vec<NodeId> = children
            .iter()
            .filter(|(name, _)| name.as_str() != WILDCARD_SEGMENT)
            .map(|(_, &child)| child)
            .collect();
        ordered.extend(children.get(WILDCARD_SEGMENT).copied());
        ordered
    }

    /// Pre-order walk using [`RouteTree::ordered_children`].
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.ordered_children(id).into_iter().rev());
        }
        order
    }
}
