pub(crate) mod flatten;
pub(crate) mod mask;
pub(crate) mod paint;
