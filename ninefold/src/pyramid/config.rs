//! Build configuration.

use crate::objects::ContentPolicy;
use crate::raster::ScaleFilter;

/// Default deepest survey level a build descends to.
pub const DEFAULT_MAX_SURVEY: u32 = 4;

/// Options controlling a pyramid build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildConfig {
    /// Deepest survey level written. Levels beyond it are never visited
    /// even when a size is configured.
    pub max_survey: u32,

    /// Treatment of object groups other than `^`.
    pub content_policy: ContentPolicy,

    /// Resampling filter for background crops.
    pub filter: ScaleFilter,

    /// Build the nine siblings of each level on the rayon pool.
    pub parallel: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_survey: DEFAULT_MAX_SURVEY,
            content_policy: ContentPolicy::default(),
            filter: ScaleFilter::default(),
            parallel: false,
        }
    }
}

impl BuildConfig {
    pub fn with_max_survey(mut self, max_survey: u32) -> Self {
        self.max_survey = max_survey;
        self
    }

    pub fn with_content_policy(mut self, policy: ContentPolicy) -> Self {
        self.content_policy = policy;
        self
    }

    pub fn with_filter(mut self, filter: ScaleFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BuildConfig::default();
        assert_eq!(config.max_survey, 4);
        assert_eq!(config.content_policy, ContentPolicy::PassThrough);
        assert_eq!(config.filter, ScaleFilter::Nearest);
        assert!(!config.parallel);
    }

    #[test]
    fn test_builder_methods() {
        let config = BuildConfig::default()
            .with_max_survey(2)
            .with_content_policy(ContentPolicy::CullAndScale)
            .with_filter(ScaleFilter::Lanczos3)
            .with_parallel(true);
        assert_eq!(config.max_survey, 2);
        assert_eq!(config.content_policy, ContentPolicy::CullAndScale);
        assert_eq!(config.filter, ScaleFilter::Lanczos3);
        assert!(config.parallel);
    }
}
