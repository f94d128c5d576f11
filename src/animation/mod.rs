pub(crate) mod ease;
pub(crate) mod property;
pub(crate) mod source;
pub(crate) mod timeline;
pub(crate) mod value;
