//! Kinema composes many single-track animations into one hierarchical timeline.
//!
//! Build an [`AnimateTree`], create leaves around [`TimeSource`]s (usually [`FlatTimeline`]),
//! and wire them serially, in parallel, or inside nested containers with a
//! [`CompositionBuilder`]. The tree derives every node's offset from the structure, then drives
//! the whole composition from a single root clock:
//!
//! - [`AnimateTree::start`], [`AnimateTree::reverse`], [`AnimateTree::pause`],
//!   [`AnimateTree::resume`], [`AnimateTree::cancel`], [`AnimateTree::end`]
//! - [`AnimateTree::advance`] once per host frame
//! - per-node [`AnimateListener`]s or closures observe start/end/update/repeat events
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod composition;

pub use crate::foundation::core::{TimeWindow, clamp_local};
pub use crate::foundation::error::{AnimateError, AnimateResult};
pub use crate::foundation::ids::{ListenerId, NodeId};

pub use crate::animation::ease::Ease;
pub use crate::animation::property::{FnProperty, Property, keyframes_to, property};
pub use crate::animation::source::{PlayState, SourceEvent, TimeSource};
pub use crate::animation::timeline::{FlatTimeline, TimelineOpts};
pub use crate::animation::value::{Argb, Keyframes, Lerp, Value, ValueKind};

pub use crate::composition::dsl::CompositionBuilder;
pub use crate::composition::listener::{AnimateEvent, AnimateListener, EventFn};
pub use crate::composition::node::NodeKind;
pub use crate::composition::tree::AnimateTree;
