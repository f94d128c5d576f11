use crate::composition::tree::AnimateTree;
use crate::foundation::error::AnimateResult;
use crate::foundation::ids::NodeId;

/// Fluent cursor over an [`AnimateTree`] for wiring nodes together.
///
/// Every step links a node relative to the cursor and then moves the cursor onto it, so a chain
/// reads in play order:
///
/// ```
/// use kinema::{AnimateTree, FlatTimeline};
///
/// let mut tree = AnimateTree::new();
/// let fade = tree.leaf(FlatTimeline::floats(300, 0.0, 1.0));
/// let slide = tree.leaf(FlatTimeline::floats(300, 0.0, 80.0));
/// let scale = tree.leaf(FlatTimeline::floats(200, 1.0, 1.2));
///
/// tree.compose(fade)?.with(slide)?.delay(100)?.next(scale)?;
/// tree.measure();
/// assert_eq!(tree.front_duration(scale)?, 400);
/// # Ok::<(), kinema::AnimateError>(())
/// ```
#[derive(Debug)]
pub struct CompositionBuilder<'t> {
    tree: &'t mut AnimateTree,
    current: NodeId,
}

impl AnimateTree {
    /// Attach `node` under the root and start a builder on it.
    pub fn compose(&mut self, node: NodeId) -> AnimateResult<CompositionBuilder<'_>> {
        let root = self.root;
        self.add_child(root, node)?;
        Ok(CompositionBuilder {
            tree: self,
            current: node,
        })
    }

    /// Attach a fresh delay node under the root and start a builder on it.
    pub fn compose_delay(&mut self, duration: u64) -> AnimateResult<CompositionBuilder<'_>> {
        let node = self.delay(duration);
        self.compose(node)
    }

    /// Start a builder on an existing node without changing any link.
    pub fn builder(&mut self, node: NodeId) -> AnimateResult<CompositionBuilder<'_>> {
        self.node(node)?;
        Ok(CompositionBuilder {
            tree: self,
            current: node,
        })
    }
}

impl<'t> CompositionBuilder<'t> {
    /// Node under the cursor.
    pub fn id(&self) -> NodeId {
        self.current
    }

    /// Move the cursor to another node of the same tree.
    pub fn at(mut self, node: NodeId) -> AnimateResult<Self> {
        self.tree.node(node)?;
        self.current = node;
        Ok(self)
    }

    /// Put `node` inside the container under the cursor.
    pub fn child(mut self, node: NodeId) -> AnimateResult<Self> {
        self.tree.add_child(self.current, node)?;
        self.current = node;
        Ok(self)
    }

    /// Play `node` in parallel with the cursor.
    pub fn with(mut self, node: NodeId) -> AnimateResult<Self> {
        self.tree.add_with(self.current, node)?;
        self.current = node;
        Ok(self)
    }

    /// Play `node` after the cursor.
    pub fn next(mut self, node: NodeId) -> AnimateResult<Self> {
        self.tree.add_next(self.current, node)?;
        self.current = node;
        Ok(self)
    }

    /// Wait `duration` milliseconds after the cursor.
    pub fn delay(self, duration: u64) -> AnimateResult<Self> {
        let node = self.tree.delay(duration);
        self.next(node)
    }

    /// Remove `node` from the container under the cursor. The cursor stays put.
    pub fn remove(self, node: NodeId) -> AnimateResult<Self> {
        self.tree.remove_child(self.current, node)?;
        Ok(self)
    }

    /// Give the tree back.
    pub fn done(self) -> &'t mut AnimateTree {
        self.tree
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/dsl.rs"]
mod tests;
