//! Which transform applies to ordinary content groups.

use std::fmt;
use std::str::FromStr;

/// Treatment of object groups other than `^`.
///
/// Shape-aware culling and rescaling of content is not yet validated
/// against real maps, so content is copied unchanged unless
/// [`ContentPolicy::CullAndScale`] is selected explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentPolicy {
    /// Copy content groups into every child unchanged.
    #[default]
    PassThrough,
    /// Drop polygons/polylines outside the child area and rescale the rest.
    CullAndScale,
}

impl ContentPolicy {
    pub fn name(self) -> &'static str {
        match self {
            ContentPolicy::PassThrough => "pass-through",
            ContentPolicy::CullAndScale => "cull-and-scale",
        }
    }
}

impl fmt::Display for ContentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContentPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass-through" | "passthrough" => Ok(ContentPolicy::PassThrough),
            "cull-and-scale" | "cull" => Ok(ContentPolicy::CullAndScale),
            other => Err(format!("unknown content policy '{}'", other)),
        }
    }
}
