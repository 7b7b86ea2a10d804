//! External command transform
//!
//! Runs a configured program once per file. Arguments may contain
//! placeholders:
//!
//! - `{input}` - absolute source path
//! - `{output}` - destination file (same name, inside the destination dir)
//! - `{output_dir}` - destination directory
//!
//! The command is run directly, never through a shell.

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::domain::ports::{Transform, TransformError, TransformOutput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTransform {
    program: String,
    args: Vec<String>,
}

impl CommandTransform {
    /// `None` when `argv` is empty.
    pub fn new(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn expand(&self, source: &Path, dest_dir: &Path, dest: &Path) -> Vec<String> {
        let input = source.display().to_string();
        let output = dest.display().to_string();
        let output_dir = dest_dir.display().to_string();
        self.args
            .iter()
            .map(|arg| {
                arg.replace("{input}", &input)
                    .replace("{output_dir}", &output_dir)
                    .replace("{output}", &output)
            })
            .collect()
    }
}

impl Transform for CommandTransform {
    fn name(&self) -> &str {
        &self.program
    }

    fn transform(&self, source: &Path, dest_dir: &Path) -> Result<TransformOutput, TransformError> {
        let name = source
            .file_name()
            .ok_or_else(|| TransformError::NoFileName(source.to_path_buf()))?;
        let dest = dest_dir.join(name);

        fs::create_dir_all(dest_dir).map_err(|source| TransformError::Io {
            path: dest_dir.to_path_buf(),
            source,
        })?;

        let output = Command::new(&self.program)
            .args(self.expand(source, dest_dir, &dest))
            .stdin(Stdio::null())
            .output()
            .map_err(|source| TransformError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(TransformError::CommandFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let bytes = fs::metadata(&dest).ok().map(|m| m.len());
        Ok(TransformOutput { path: dest, bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_argv_is_none() {
        assert!(CommandTransform::new(&[]).is_none());
    }

    #[test]
    fn placeholders_are_substituted() {
        let transform =
            CommandTransform::new(&argv(&["magick", "{input}", "-o", "{output}", "{output_dir}"]))
                .unwrap();

        let args = transform.expand(
            Path::new("/a/x.png"),
            Path::new("/out"),
            &PathBuf::from("/out/x.png"),
        );

        assert_eq!(transform.name(), "magick");
        assert_eq!(args, vec!["/a/x.png", "-o", "/out/x.png", "/out"]);
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.png");
        fs::write(&source, b"x").unwrap();
        let transform = CommandTransform::new(&argv(&["treemirror-no-such-program"])).unwrap();

        let err = transform.transform(&source, dir.path()).unwrap_err();
        assert!(matches!(err, TransformError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn runs_command_and_reports_output_size() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.png");
        fs::write(&source, b"pixels").unwrap();
        let dest_dir = dir.path().join("out");
        let transform = CommandTransform::new(&argv(&["cp", "{input}", "{output}"])).unwrap();

        let output = transform.transform(&source, &dest_dir).unwrap();

        assert_eq!(output.path, dest_dir.join("a.png"));
        assert_eq!(output.bytes, Some(6));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_command_failed() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.png");
        fs::write(&source, b"x").unwrap();
        let transform =
            CommandTransform::new(&argv(&["sh", "-c", "echo broken >&2; exit 3"])).unwrap();

        let err = transform.transform(&source, dir.path()).unwrap_err();

        match err {
            TransformError::CommandFailed { stderr, status, .. } => {
                assert_eq!(stderr, "broken");
                assert!(status.contains('3'));
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }
}
