pub(crate) mod element;
pub(crate) mod engine;
pub(crate) mod gesture;
pub(crate) mod layers;
pub(crate) mod snap;
pub(crate) mod snapshot;
