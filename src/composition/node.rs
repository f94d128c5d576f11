use smallvec::SmallVec;

use crate::animation::source::TimeSource;
use crate::composition::listener::ListenerSet;
use crate::foundation::core::TimeWindow;
use crate::foundation::ids::NodeId;

/// Whether a node animates a value itself or only groups other nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum NodeKind {
    /// Drives one value through its own time source.
    Leaf,
    /// Groups children; its duration is derived from them.
    Container,
}

/// One vertex of the composition tree.
///
/// Relations are stored as ids into the owning tree's arena. Duration fields are caches written
/// by the duration pass and are only meaningful until the next structural change.
pub(crate) struct AnimateNode {
    pub(crate) kind: NodeKind,
    pub(crate) source: Box<dyn TimeSource>,

    pub(crate) children: SmallVec<[NodeId; 4]>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) previous: Option<NodeId>,
    pub(crate) next: SmallVec<[NodeId; 2]>,

    /// Leaf: own span. Container: longest serial chain among its children (one cycle).
    pub(crate) longest_duration: u64,
    pub(crate) front_duration: u64,
    pub(crate) back_duration: u64,
    /// Own span on the parent's timeline, repeats included.
    pub(crate) span: u64,

    pub(crate) is_reverse: bool,
    pub(crate) is_running: bool,
    pub(crate) last_running: bool,
    pub(crate) remembered_repeat: u32,

    pub(crate) listeners: ListenerSet,
}

impl AnimateNode {
    pub(crate) fn new(kind: NodeKind, source: Box<dyn TimeSource>) -> Self {
        Self {
            kind,
            source,
            children: SmallVec::new(),
            parent: None,
            previous: None,
            next: SmallVec::new(),
            longest_duration: 0,
            front_duration: 0,
            back_duration: 0,
            span: 0,
            is_reverse: false,
            is_running: false,
            last_running: false,
            remembered_repeat: 0,
            listeners: ListenerSet::default(),
        }
    }

    pub(crate) fn is_container(&self) -> bool {
        self.kind == NodeKind::Container
    }

    /// Active window on the root timeline for the current direction.
    pub(crate) fn window(&self) -> TimeWindow {
        let start = if self.is_reverse {
            self.back_duration
        } else {
            self.front_duration
        };
        TimeWindow::new(start, self.span)
    }

    pub(crate) fn reset_run_state(&mut self) {
        self.is_running = false;
        self.last_running = false;
        self.remembered_repeat = 0;
    }
}

impl std::fmt::Debug for AnimateNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimateNode")
            .field("kind", &self.kind)
            .field("children", &self.children)
            .field("parent", &self.parent)
            .field("previous", &self.previous)
            .field("next", &self.next)
            .field("longest_duration", &self.longest_duration)
            .field("front_duration", &self.front_duration)
            .field("back_duration", &self.back_duration)
            .field("span", &self.span)
            .field("is_reverse", &self.is_reverse)
            .field("is_running", &self.is_running)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}
