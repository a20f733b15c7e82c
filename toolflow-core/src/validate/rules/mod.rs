pub(crate) mod catalog;
pub(crate) mod mapping;
pub(crate) mod tool;
pub(crate) mod workflow;
