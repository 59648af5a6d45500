// This interior module is private; we reexport its contents.
#[allow(clippy::module_inception)]
mod map;

pub use map::Map;
