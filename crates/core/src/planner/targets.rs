//! Output path planning.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::naming::{CodeGenerator, RandomCodeGenerator, CODE_LEN};
use crate::job::{SourceItem, Task};
use crate::paths::{absolutize, has_extension, normalize, replace_extension};

/// Result of one planning pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    /// One task per source, in source order.
    pub tasks: Vec<Task>,
    /// Notes about how the output argument was interpreted.
    pub warnings: Vec<String>,
}

/// Where the planner puts its targets.
enum OutputMode {
    /// Every target is generated under this root.
    Root(PathBuf),
    /// The single source is written to exactly this path.
    Fixed(PathBuf),
}

/// Plans unique target paths for a set of sources.
#[derive(Debug)]
pub struct TargetPlanner<G = RandomCodeGenerator> {
    extension: String,
    codes: G,
}

impl TargetPlanner<RandomCodeGenerator> {
    /// Creates a planner producing targets with `extension` (e.g. `.docx`).
    pub fn new(extension: impl Into<String>) -> Self {
        Self::with_generator(extension, RandomCodeGenerator)
    }
}

impl<G: CodeGenerator> TargetPlanner<G> {
    /// Creates a planner that draws its name codes from `codes`.
    pub fn with_generator(extension: impl Into<String>, codes: G) -> Self {
        let extension = extension.into();
        let extension = if extension.starts_with('.') {
            extension
        } else {
            format!(".{}", extension)
        };
        Self { extension, codes }
    }

    /// The target extension, including the leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Maps `sources` to tasks.
    ///
    /// `output_arg` is resolved against `cwd` when relative. A blank
    /// argument is treated as absent.
    pub fn plan(&mut self, sources: &[SourceItem], output_arg: Option<&Path>, cwd: &Path) -> Plan {
        let mut plan = Plan::default();
        if sources.is_empty() {
            return plan;
        }

        let output_arg = output_arg.filter(|p| !p.as_os_str().to_string_lossy().trim().is_empty());
        let mode = match output_arg {
            None => OutputMode::Root(normalize(cwd)),
            Some(arg) => {
                let abs = absolutize(cwd, arg);
                if has_extension(&abs, &self.extension) {
                    if sources.len() == 1 {
                        OutputMode::Fixed(abs)
                    } else {
                        plan.warnings.push(format!(
                            "--output={} is treated as a directory because there are multiple inputs (writing to its parent directory)",
                            arg.display()
                        ));
                        OutputMode::Root(
                            abs.parent().map(Path::to_path_buf).unwrap_or_else(|| abs.clone()),
                        )
                    }
                } else {
                    OutputMode::Root(abs)
                }
            }
        };

        let mut used: HashSet<PathBuf> = HashSet::with_capacity(sources.len());
        for source in sources {
            let target = match &mode {
                OutputMode::Fixed(path) => {
                    used.insert(path.clone());
                    path.clone()
                }
                OutputMode::Root(root) => {
                    let natural = root.join(self.natural_name(source));
                    self.unique_target(&normalize(&natural), &mut used)
                }
            };
            debug!("Planned {:?} -> {:?}", source.source_path, target);
            plan.tasks.push(Task::new(source.source_path.clone(), target));
        }

        plan
    }

    /// Relative output path before uniquing: the scan-relative path for
    /// directory inputs, the bare file name otherwise.
    fn natural_name(&self, source: &SourceItem) -> PathBuf {
        let relative = match (&source.rel_path, source.from_dir) {
            (Some(rel), true) => rel.clone(),
            _ => source
                .source_path
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("document")),
        };
        replace_extension(&relative, &self.extension)
    }

    /// Appends fresh codes to `candidate` until the result is free both in
    /// this pass and on disk.
    fn unique_target(&mut self, candidate: &Path, used: &mut HashSet<PathBuf>) -> PathBuf {
        loop {
            let code = self.codes.generate(CODE_LEN);
            let attempt = with_code(candidate, &code);
            if used.contains(&attempt) || attempt.symlink_metadata().is_ok() {
                debug!("Target {:?} is taken, drawing another code", attempt);
                continue;
            }
            used.insert(attempt.clone());
            return attempt;
        }
    }
}

/// Plans targets with a random code generator.
pub fn plan_targets(
    sources: &[SourceItem],
    output_arg: Option<&Path>,
    cwd: &Path,
    extension: &str,
) -> Plan {
    TargetPlanner::new(extension).plan(sources, output_arg, cwd)
}

/// Inserts `_<code>` between the stem and the extension of `path`.
fn with_code(path: &Path, code: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, code, ext.to_string_lossy()),
        None => format!("{}_{}", stem, code),
    };
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Hands out the given codes in order, then repeats the last one.
    fn scripted(codes: &[&str]) -> impl FnMut(usize) -> String + Send {
        let codes: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
        let mut idx = 0;
        move |_len| {
            let code = codes[idx.min(codes.len() - 1)].clone();
            idx += 1;
            code
        }
    }

    fn counter() -> impl FnMut(usize) -> String + Send {
        let mut n = 0u32;
        move |len| {
            n += 1;
            format!("{:0>width$}", n, width = len)
        }
    }

    #[test]
    fn test_empty_sources() {
        let plan = plan_targets(&[], Some(Path::new("out.docx")), Path::new("/work"), ".docx");
        assert!(plan.tasks.is_empty());
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn test_no_output_uses_cwd_and_keeps_structure() {
        let tmp = TempDir::new().unwrap();
        let sources = vec![
            SourceItem::file("/in/a.md"),
            SourceItem::scanned("/docs/sub/b.md", "/docs", "sub/b.md"),
        ];

        let mut planner = TargetPlanner::with_generator(".docx", counter());
        let plan = planner.plan(&sources, None, tmp.path());

        assert_eq!(plan.tasks[0].source_path, PathBuf::from("/in/a.md"));
        assert_eq!(plan.tasks[0].target_path, tmp.path().join("a_000001.docx"));
        assert_eq!(plan.tasks[1].target_path, tmp.path().join("sub/b_000002.docx"));
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn test_extension_appended_when_missing() {
        let tmp = TempDir::new().unwrap();
        let sources = vec![SourceItem::file("/in/README")];

        let mut planner = TargetPlanner::with_generator("docx", counter());
        let plan = planner.plan(&sources, None, tmp.path());

        assert_eq!(plan.tasks[0].target_path, tmp.path().join("README_000001.docx"));
    }

    #[test]
    fn test_single_source_fixed_output_bypasses_uniquing() {
        let tmp = TempDir::new().unwrap();
        let fixed = tmp.path().join("report.docx");
        fs::write(&fixed, "existing").unwrap();

        let mut planner = TargetPlanner::with_generator(".docx", counter());
        let plan = planner.plan(&[SourceItem::file("/in/a.md")], Some(&fixed), tmp.path());

        assert_eq!(plan.tasks.len(), 1);
        assert_eq!(plan.tasks[0].target_path, fixed);
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn test_relative_fixed_output_resolved_against_cwd() {
        let mut planner = TargetPlanner::with_generator(".docx", counter());
        let plan = planner.plan(
            &[SourceItem::file("/in/a.md")],
            Some(Path::new("out/Final.DOCX")),
            Path::new("/work"),
        );

        assert_eq!(plan.tasks[0].target_path, PathBuf::from("/work/out/Final.DOCX"));
    }

    #[test]
    fn test_multi_source_file_output_reinterpreted_as_directory() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out").join("book.docx");
        let sources = vec![SourceItem::file("/in/a.md"), SourceItem::file("/in/b.md")];

        let mut planner = TargetPlanner::with_generator(".docx", counter());
        let plan = planner.plan(&sources, Some(&out), tmp.path());

        assert_eq!(plan.warnings.len(), 1);
        assert!(plan.warnings[0].contains("treated as a directory"));
        assert_eq!(plan.tasks[0].target_path, tmp.path().join("out/a_000001.docx"));
        assert_eq!(plan.tasks[1].target_path, tmp.path().join("out/b_000002.docx"));
    }

    #[test]
    fn test_other_output_is_directory() {
        let tmp = TempDir::new().unwrap();
        let mut planner = TargetPlanner::with_generator(".docx", counter());
        let plan = planner.plan(&[SourceItem::file("/in/a.md")], Some(Path::new("build")), tmp.path());

        assert_eq!(plan.tasks[0].target_path, tmp.path().join("build/a_000001.docx"));
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn test_in_pass_collision_draws_new_code() {
        let tmp = TempDir::new().unwrap();
        // Same file name from two different input directories.
        let sources = vec![SourceItem::file("/x/a.md"), SourceItem::file("/y/a.md")];

        let mut planner = TargetPlanner::with_generator(".docx", scripted(&["AAAAAA", "AAAAAA", "BBBBBB"]));
        let plan = planner.plan(&sources, None, tmp.path());

        assert_eq!(plan.tasks[0].target_path, tmp.path().join("a_AAAAAA.docx"));
        assert_eq!(plan.tasks[1].target_path, tmp.path().join("a_BBBBBB.docx"));
    }

    #[test]
    fn test_existing_file_is_never_returned() {
        let tmp = TempDir::new().unwrap();
        let taken = tmp.path().join("a_AAAAAA.docx");
        fs::write(&taken, "x").unwrap();

        let mut planner = TargetPlanner::with_generator(".docx", scripted(&["AAAAAA", "CCCCCC"]));
        let plan = planner.plan(&[SourceItem::file("/in/a.md")], None, tmp.path());

        assert_ne!(plan.tasks[0].target_path, taken);
        assert_eq!(plan.tasks[0].target_path, tmp.path().join("a_CCCCCC.docx"));
    }

    #[test]
    fn test_random_targets_are_unique_with_extension() {
        let tmp = TempDir::new().unwrap();
        let sources: Vec<_> = (0..40).map(|_| SourceItem::file("/in/same.md")).collect();

        let plan = plan_targets(&sources, None, tmp.path(), ".docx");

        let unique: HashSet<_> = plan.tasks.iter().map(|t| t.target_path.clone()).collect();
        assert_eq!(unique.len(), sources.len());
        assert!(plan
            .tasks
            .iter()
            .all(|t| has_extension(&t.target_path, ".docx")));
    }

    #[test]
    fn test_planning_is_deterministic_with_same_codes() {
        let tmp = TempDir::new().unwrap();
        let sources = vec![
            SourceItem::file("/in/a.md"),
            SourceItem::scanned("/d/x/y.md", "/d", "x/y.md"),
        ];

        let first = TargetPlanner::with_generator(".docx", counter()).plan(&sources, None, tmp.path());
        let second = TargetPlanner::with_generator(".docx", counter()).plan(&sources, None, tmp.path());

        assert_eq!(first, second);
    }

    #[test]
    fn test_with_code() {
        assert_eq!(
            with_code(Path::new("/o/a.docx"), "xyz123"),
            PathBuf::from("/o/a_xyz123.docx")
        );
        assert_eq!(with_code(Path::new("/o/a"), "xyz123"), PathBuf::from("/o/a_xyz123"));
    }
}
