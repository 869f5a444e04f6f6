//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod theme_candidates;

pub(crate) use render::RenderArgs;
pub(crate) use theme_candidates::ThemeCandidatesArgs;
