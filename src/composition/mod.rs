pub(crate) mod dispatch;
pub(crate) mod dsl;
pub(crate) mod duration;
pub(crate) mod listener;
pub(crate) mod node;
pub(crate) mod playback;
pub(crate) mod tree;
