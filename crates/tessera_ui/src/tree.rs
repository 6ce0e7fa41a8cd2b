//! Node tree for hierarchical layout.
//!
//! Every node owns one [`LayoutTransform`] and subscribes to exactly one
//! upstream source: its parent when attached, the screen otherwise. The
//! subscription relation is keyed by [`NodeId`], so detaching or removing a
//! node drops its subscription on the spot.
//!
//! Invalidation is pushed down that relation; geometry is pulled on read,
//! ancestors first. A dirty node never has a clean subscriber, so a read can
//! never observe stale geometry.

use crate::config::UiConfig;
use crate::error::{UiError, UiResult};
use crate::geometry::{Point, Rect, Vec2};
use crate::screen::Screen;
use crate::transform::{AspectRatio, Geometry, LayoutTransform, TransformType};
use std::collections::{HashMap, VecDeque};

/// Unique identifier for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Creates a new node ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// The single upstream trigger a transform listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subscription {
    /// Screen-changed notifications (node has no parent).
    Screen,
    /// The parent's recalculated notifications.
    Parent(NodeId),
}

/// Most notifications the tree keeps before dropping the oldest.
pub const EVENT_LOG_CAPACITY: usize = 1024;

/// Notifications raised by the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    /// A node was attached, detached or moved.
    ParentChanged {
        /// The node whose parent changed.
        node: NodeId,
        /// Previous parent.
        old: Option<NodeId>,
        /// New parent.
        new: Option<NodeId>,
    },
    /// The current resolution changed.
    ScreenChanged {
        /// New unscaled-to-scaled factor.
        scale: Vec2,
    },
    /// A node's transform finished recalculating.
    Recalculated(NodeId),
}

#[derive(Debug, Clone)]
struct Node {
    transform: LayoutTransform,
    parent: Option<NodeId>,
    subscription: Subscription,
    /// Nodes subscribed to this node's recalculations.
    subscribers: Vec<NodeId>,
}

/// Manages the node hierarchy and its layout.
#[derive(Debug, Clone)]
pub struct UiTree {
    /// Nodes indexed by ID.
    nodes: HashMap<NodeId, Node>,
    /// Screen subscribers, i.e. the roots.
    roots: Vec<NodeId>,
    screen: Screen,
    /// Undrained notifications, oldest first, at most [`EVENT_LOG_CAPACITY`].
    events: VecDeque<UiEvent>,
    /// ID counter for generating unique IDs.
    next_id: u64,
}

impl UiTree {
    /// Creates a new empty tree over `screen`.
    #[must_use]
    pub fn new(screen: Screen) -> Self {
        Self {
            nodes: HashMap::with_capacity(256),
            roots: Vec::with_capacity(16),
            screen,
            events: VecDeque::new(),
            next_id: 1,
        }
    }

    /// Creates a tree from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidResolution`] if a configured resolution is
    /// not positive.
    pub fn with_config(config: &UiConfig) -> UiResult<Self> {
        Ok(Self::new(config.screen()?))
    }

    /// The screen layout is scaled against.
    #[must_use]
    pub const fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Changes the current resolution.
    ///
    /// Raises [`UiEvent::ScreenChanged`] and invalidates every node if the
    /// resolution actually changed.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidResolution`] if either axis is not positive.
    pub fn set_resolution(&mut self, size: Point) -> UiResult<()> {
        if !self.screen.set_current_size(size)? {
            return Ok(());
        }
        let scale = self.screen.scale();
        tracing::debug!("Screen changed: {}x{} (scale {:?})", size.x, size.y, scale);

        self.record(UiEvent::ScreenChanged { scale });
        let roots = self.roots.clone();
        for root in roots {
            self.invalidate_from(root);
        }
        Ok(())
    }

    /// Creates a parentless node spanning the default screen size.
    pub fn create_node(&mut self) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;

        self.nodes.insert(
            id,
            Node {
                transform: LayoutTransform::spanning(self.screen.default_size()),
                parent: None,
                subscription: Subscription::Screen,
                subscribers: Vec::new(),
            },
        );
        self.roots.push(id);
        id
    }

    /// Creates a node attached to `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownNode`] if `parent` does not exist.
    pub fn create_child(&mut self, parent: NodeId) -> UiResult<NodeId> {
        self.node(parent)?;
        let id = self.create_node();
        self.set_parent(id, Some(parent))?;
        Ok(id)
    }

    /// Attaches, moves or detaches a node.
    ///
    /// Moves the node's subscription to the new upstream source, invalidates
    /// the node and its subscribers and raises [`UiEvent::ParentChanged`].
    /// Setting the current parent again does nothing.
    ///
    /// # Errors
    ///
    /// - [`UiError::UnknownNode`] if either node does not exist.
    /// - [`UiError::ParentCycle`] if `parent` is `id` or one of its descendants.
    /// - [`UiError::RelativeWithoutParent`] when detaching a relative node.
    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) -> UiResult<()> {
        let node = self.node(id)?;
        let old = node.parent;
        if old == parent {
            return Ok(());
        }

        match parent {
            Some(new_parent) => {
                self.node(new_parent)?;
                if self.is_ancestor_or_self(id, new_parent) {
                    return Err(UiError::ParentCycle {
                        node: id,
                        parent: new_parent,
                    });
                }
            }
            None => {
                if node.transform.transform_type() == TransformType::Relative {
                    return Err(UiError::RelativeWithoutParent(id));
                }
            }
        }

        self.unsubscribe(id);
        self.subscribe(id, parent);
        self.invalidate_from(id);

        tracing::debug!("Parent changed: {:?} {:?} -> {:?}", id, old, parent);
        self.record(UiEvent::ParentChanged { node: id, old, new: parent });
        Ok(())
    }

    /// Removes a node and all its descendants.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownNode`] if `id` does not exist.
    pub fn remove(&mut self, id: NodeId) -> UiResult<()> {
        self.node(id)?;
        self.unsubscribe(id);

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                stack.extend(node.subscribers);
            }
        }
        Ok(())
    }

    /// Returns true if the node exists.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Parent of a node.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownNode`] if `id` does not exist.
    pub fn parent(&self, id: NodeId) -> UiResult<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    /// The upstream source a node currently listens to.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownNode`] if `id` does not exist.
    pub fn subscription(&self, id: NodeId) -> UiResult<Subscription> {
        Ok(self.node(id)?.subscription)
    }

    /// Returns the children of a node (empty for unknown ids).
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|node| node.subscribers.as_slice())
            .unwrap_or(&[])
    }

    /// Returns all root nodes.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Returns all node IDs in depth-first order, parents before children.
    pub fn iter_dfs(&self) -> impl Iterator<Item = NodeId> + '_ {
        NodeDfsIterator {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Read access to a node's transform, possibly dirty.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownNode`] if `id` does not exist.
    pub fn transform(&self, id: NodeId) -> UiResult<&LayoutTransform> {
        Ok(&self.node(id)?.transform)
    }

    /// Drains notifications raised since the last call, oldest first.
    ///
    /// Only the latest [`EVENT_LOG_CAPACITY`] are kept, so a tree that is
    /// never drained does not grow without bound.
    pub fn drain_events(&mut self) -> Vec<UiEvent> {
        self.events.drain(..).collect()
    }

    // =========================================================================
    // Transform setters
    // =========================================================================

    /// Switches between absolute and relative positioning.
    ///
    /// Setting the current type is a no-op and schedules nothing.
    ///
    /// # Errors
    ///
    /// - [`UiError::UnknownNode`] if `id` does not exist.
    /// - [`UiError::RelativeWithoutParent`] if switching a parentless node to
    ///   [`TransformType::Relative`].
    pub fn set_transform_type(&mut self, id: NodeId, transform_type: TransformType) -> UiResult<()> {
        let node = self.node(id)?;
        if transform_type == TransformType::Relative && node.parent.is_none() {
            return Err(UiError::RelativeWithoutParent(id));
        }
        self.update(id, |t, _| Ok(t.set_transform_type(transform_type)))
    }

    /// Sets the offset as a fraction of the parent's size.
    ///
    /// # Errors
    ///
    /// [`UiError::UnknownNode`], or [`UiError::NegativeValue`] for a negative
    /// component.
    pub fn set_relative_offset(&mut self, id: NodeId, offset: Vec2) -> UiResult<()> {
        self.update(id, |t, _| t.set_relative_offset(offset))
    }

    /// Sets the size as a fraction of the parent's size.
    ///
    /// # Errors
    ///
    /// [`UiError::UnknownNode`], or [`UiError::NegativeValue`] for a negative
    /// component.
    pub fn set_relative_size(&mut self, id: NodeId, size: Vec2) -> UiResult<()> {
        self.update(id, |t, _| t.set_relative_size(size))
    }

    /// Sets the minimum unscaled size.
    ///
    /// # Errors
    ///
    /// [`UiError::UnknownNode`], [`UiError::NegativeValue`], or
    /// [`UiError::MaxBelowMin`] if `size` exceeds the current maximum.
    pub fn set_min_size(&mut self, id: NodeId, size: Point) -> UiResult<()> {
        self.update(id, |t, _| t.set_min_size(size))
    }

    /// Sets the maximum unscaled size.
    ///
    /// # Errors
    ///
    /// [`UiError::UnknownNode`], [`UiError::NegativeValue`], or
    /// [`UiError::MaxBelowMin`] if `size` is below the current minimum.
    pub fn set_max_size(&mut self, id: NodeId, size: Point) -> UiResult<()> {
        self.update(id, |t, _| t.set_max_size(size))
    }

    /// Sets the aspect-ratio constraint.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownNode`] if `id` does not exist.
    pub fn set_ratio(&mut self, id: NodeId, ratio: AspectRatio) -> UiResult<()> {
        self.update(id, |t, _| Ok(t.set_ratio(ratio)))
    }

    /// Sets the unscaled location of an absolute node.
    ///
    /// # Errors
    ///
    /// [`UiError::UnknownNode`], or [`UiError::NotAbsolute`] on a relative
    /// node.
    pub fn set_unscaled_location(&mut self, id: NodeId, location: Point) -> UiResult<()> {
        self.update(id, |t, _| t.set_unscaled_location(location))
    }

    /// Sets the unscaled size of an absolute node.
    ///
    /// # Errors
    ///
    /// [`UiError::UnknownNode`], [`UiError::NotAbsolute`] on a relative node,
    /// or [`UiError::NegativeValue`].
    pub fn set_unscaled_size(&mut self, id: NodeId, size: Point) -> UiResult<()> {
        self.update(id, |t, _| t.set_unscaled_size(size))
    }

    /// Sets the location of an absolute node in current-resolution pixels.
    ///
    /// # Errors
    ///
    /// [`UiError::UnknownNode`], or [`UiError::NotAbsolute`] on a relative
    /// node.
    pub fn set_scaled_location(&mut self, id: NodeId, location: Point) -> UiResult<()> {
        self.update(id, |t, scale| t.set_scaled_location(location, scale))
    }

    /// Sets the size of an absolute node in current-resolution pixels.
    ///
    /// # Errors
    ///
    /// [`UiError::UnknownNode`], [`UiError::NotAbsolute`] on a relative node,
    /// or [`UiError::NegativeValue`].
    pub fn set_scaled_size(&mut self, id: NodeId, size: Point) -> UiResult<()> {
        self.update(id, |t, scale| t.set_scaled_size(size, scale))
    }

    // =========================================================================
    // Geometry (pull)
    // =========================================================================

    /// Unscaled top-left corner.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownNode`] if `id` does not exist.
    pub fn unscaled_location(&mut self, id: NodeId) -> UiResult<Point> {
        Ok(self.resolve(id)?.unscaled.location())
    }

    /// Unscaled size.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownNode`] if `id` does not exist.
    pub fn unscaled_size(&mut self, id: NodeId) -> UiResult<Point> {
        Ok(self.resolve(id)?.unscaled.size())
    }

    /// Unscaled rectangle.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownNode`] if `id` does not exist.
    pub fn unscaled_rect(&mut self, id: NodeId) -> UiResult<Rect> {
        Ok(self.resolve(id)?.unscaled)
    }

    /// Top-left corner in current-resolution pixels.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownNode`] if `id` does not exist.
    pub fn scaled_location(&mut self, id: NodeId) -> UiResult<Point> {
        Ok(self.resolve(id)?.scaled.location())
    }

    /// Size in current-resolution pixels.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownNode`] if `id` does not exist.
    pub fn scaled_size(&mut self, id: NodeId) -> UiResult<Point> {
        Ok(self.resolve(id)?.scaled.size())
    }

    /// Rectangle in current-resolution pixels.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownNode`] if `id` does not exist.
    pub fn scaled_rect(&mut self, id: NodeId) -> UiResult<Rect> {
        Ok(self.resolve(id)?.scaled)
    }

    /// Recalculates a node (and any dirty ancestors) now.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownNode`] if `id` does not exist.
    pub fn recalculate_if_needed(&mut self, id: NodeId) -> UiResult<()> {
        self.resolve(id).map(|_| ())
    }

    /// Recalculates every dirty node, parents first.
    ///
    /// # Errors
    ///
    /// Only fails if the tree is internally inconsistent.
    pub fn recalculate_all(&mut self) -> UiResult<()> {
        let order: Vec<NodeId> = self.iter_dfs().collect();
        for id in order {
            self.resolve(id)?;
        }
        Ok(())
    }

    /// Brings a node up to date and returns its geometry.
    ///
    /// Dirty ancestors are recalculated top-down first. Because a clean node
    /// never has a dirty ancestor, the walk up stops at the first clean one.
    fn resolve(&mut self, id: NodeId) -> UiResult<Geometry> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id)?;
            if !node.transform.needs_recalculation() {
                break;
            }
            chain.push(node_id);
            current = node.parent;
        }

        let scale = self.screen.scale();
        for node_id in chain.into_iter().rev() {
            let node = self.node(node_id)?;
            let geometry = match node.transform.transform_type() {
                TransformType::Absolute => {
                    self.node_mut(node_id)?.transform.recalculate_absolute(scale)
                }
                TransformType::Relative => {
                    let parent = node.parent.ok_or(UiError::RelativeWithoutParent(node_id))?;
                    let parent_rect = self.node(parent)?.transform.geometry().unscaled;
                    self.node_mut(node_id)?
                        .transform
                        .recalculate_relative(parent_rect, scale)
                }
            };
            tracing::trace!("Recalculated {:?}: {:?}", node_id, geometry.scaled);
            self.record(UiEvent::Recalculated(node_id));
        }

        Ok(self.node(id)?.transform.geometry())
    }

    fn record(&mut self, event: UiEvent) {
        if self.events.len() == EVENT_LOG_CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Runs a transform setter and pushes invalidation if it changed anything.
    fn update(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut LayoutTransform, Vec2) -> UiResult<bool>,
    ) -> UiResult<()> {
        let scale = self.screen.scale();
        let changed = f(&mut self.node_mut(id)?.transform, scale)?;
        if changed {
            self.invalidate_from(id);
        }
        Ok(())
    }

    /// Marks `id` dirty and pushes dirtiness to all transitive subscribers.
    ///
    /// Already-dirty subscribers are skipped: their own subscribers are dirty
    /// too.
    fn invalidate_from(&mut self, id: NodeId) {
        let mut stack = Vec::new();
        if let Some(node) = self.nodes.get_mut(&id) {
            node.transform.invalidate();
            stack.extend(node.subscribers.iter().copied());
        }
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(&current) {
                if node.transform.invalidate() {
                    stack.extend(node.subscribers.iter().copied());
                }
            }
        }
    }

    fn subscribe(&mut self, id: NodeId, parent: Option<NodeId>) {
        match parent {
            Some(parent_id) => {
                if let Some(parent_node) = self.nodes.get_mut(&parent_id) {
                    parent_node.subscribers.push(id);
                }
            }
            None => self.roots.push(id),
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = parent;
            node.subscription = parent.map_or(Subscription::Screen, Subscription::Parent);
        }
    }

    fn unsubscribe(&mut self, id: NodeId) {
        let Some(subscription) = self.nodes.get(&id).map(|node| node.subscription) else {
            return;
        };
        match subscription {
            Subscription::Parent(parent_id) => {
                if let Some(parent_node) = self.nodes.get_mut(&parent_id) {
                    parent_node.subscribers.retain(|&c| c != id);
                }
            }
            Subscription::Screen => self.roots.retain(|&r| r != id),
        }
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.nodes.get(&id).and_then(|node| node.parent) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    fn node(&self, id: NodeId) -> UiResult<&Node> {
        self.nodes.get(&id).ok_or(UiError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> UiResult<&mut Node> {
        self.nodes.get_mut(&id).ok_or(UiError::UnknownNode(id))
    }
}

/// Depth-first iterator over the node tree.
struct NodeDfsIterator<'a> {
    tree: &'a UiTree,
    stack: Vec<NodeId>,
}

impl Iterator for NodeDfsIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;

        // Push children in reverse order so they're processed left-to-right
        for &child in self.tree.children(id).iter().rev() {
            self.stack.push(child);
        }

        Some(id)
    }
}
