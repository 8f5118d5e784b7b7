//! Build command - split a map into its pyramid.

use std::path::{Path, PathBuf};

use ninefold::config::ConfigFile;
use ninefold::map::MAX_LEVEL;
use ninefold::objects::ContentPolicy;
use ninefold::pyramid::{BuildConfig, BuildReport, PyramidBuilder};
use ninefold::raster::ScaleFilter;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the build command.
pub struct BuildArgs {
    pub map: PathBuf,
    pub output: Option<PathBuf>,
    pub max_survey: Option<u32>,
    pub content_policy: Option<ContentPolicy>,
    pub filter: Option<ScaleFilter>,
    pub parallel: bool,
    pub config: Option<PathBuf>,
}

/// Run the build command.
pub fn run(args: BuildArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(args.config.as_deref())?;
    runner.log_startup("build");

    let build_config = resolve_build_config(&args, runner.config())?;
    let output = resolve_output(&args.map, args.output.as_deref());

    println!("Building pyramid for {}", args.map.display());
    println!("  Output:         {}", output.display());
    println!("  Max survey:     {}", build_config.max_survey);
    println!("  Content policy: {}", build_config.content_policy);
    println!("  Filter:         {}", build_config.filter);
    println!("  Parallel:       {}", build_config.parallel);
    println!();

    let report = PyramidBuilder::new(build_config).build_file(&args.map, &output)?;
    print_summary(&report);
    Ok(())
}

/// Merge CLI flags over the configuration file.
pub fn resolve_build_config(args: &BuildArgs, config: &ConfigFile) -> Result<BuildConfig, CliError> {
    let file = config.build_config();

    let max_survey = args.max_survey.unwrap_or(file.max_survey);
    if max_survey > MAX_LEVEL {
        return Err(CliError::Config(format!(
            "max survey must be at most {}, got {}",
            MAX_LEVEL, max_survey
        )));
    }

    Ok(file
        .with_max_survey(max_survey)
        .with_content_policy(args.content_policy.unwrap_or(config.pyramid.content_policy))
        .with_filter(args.filter.unwrap_or(config.pyramid.filter))
        .with_parallel(args.parallel || config.pyramid.parallel))
}

/// The output directory defaults to the map's own directory.
pub fn resolve_output(map: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(dir) => dir.to_path_buf(),
        None => map
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    }
}

fn print_summary(report: &BuildReport) {
    println!("Pyramid complete");
    for survey in 0..=report.deepest_survey() {
        let count = report.levels_at(survey).count();
        if let Some(level) = report.levels_at(survey).next() {
            println!(
                "  Survey {}: {} map(s), {} px, extent {}",
                survey,
                count,
                level.size.pixel_size(),
                level.extent
            );
        }
    }
    println!("  Pruned branches: {}", report.pruned);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> BuildArgs {
        BuildArgs {
            map: PathBuf::from("maps/world.json"),
            output: None,
            max_survey: None,
            content_policy: None,
            filter: None,
            parallel: false,
            config: None,
        }
    }

    #[test]
    fn test_file_values_apply_without_flags() {
        let mut config = ConfigFile::default();
        config.pyramid.max_survey = 2;
        config.pyramid.filter = ScaleFilter::Triangle;

        let build = resolve_build_config(&args(), &config).unwrap();
        assert_eq!(build.max_survey, 2);
        assert_eq!(build.filter, ScaleFilter::Triangle);
    }

    #[test]
    fn test_flags_override_file() {
        let mut config = ConfigFile::default();
        config.pyramid.max_survey = 2;

        let mut args = args();
        args.max_survey = Some(3);
        args.content_policy = Some(ContentPolicy::CullAndScale);
        args.parallel = true;

        let build = resolve_build_config(&args, &config).unwrap();
        assert_eq!(build.max_survey, 3);
        assert_eq!(build.content_policy, ContentPolicy::CullAndScale);
        assert!(build.parallel);
    }

    #[test]
    fn test_max_survey_limit() {
        let mut args = args();
        args.max_survey = Some(MAX_LEVEL + 1);
        assert!(matches!(
            resolve_build_config(&args, &ConfigFile::default()),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_resolve_output() {
        assert_eq!(
            resolve_output(Path::new("maps/world.json"), None),
            PathBuf::from("maps")
        );
        assert_eq!(resolve_output(Path::new("world.json"), None), PathBuf::from("."));
        assert_eq!(
            resolve_output(Path::new("world.json"), Some(Path::new("out"))),
            PathBuf::from("out")
        );
    }
}
