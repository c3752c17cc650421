use crate::kernel::services::ports::{EditorHost, OpenError};
use std::path::Path;
use std::process::{Command, Stdio};

/// Opens files by running a command template such as
/// `code --goto {path}:{line}:{column}`.
#[derive(Debug, Clone)]
pub struct CommandEditorHost {
    template: String,
}

impl CommandEditorHost {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Program and arguments for opening `path` at `line` (1-based), caret on
    /// the first column. Placeholders are substituted per argument, so paths
    /// with spaces stay a single argument.
    pub fn command_for(&self, path: &Path, line: usize) -> Result<Vec<String>, OpenError> {
        let path = path.to_string_lossy();
        let line = line.max(1).to_string();
        let argv: Vec<String> = self
            .template
            .split_whitespace()
            .map(|part| {
                part.replace("{path}", &path)
                    .replace("{line}", &line)
                    .replace("{column}", "1")
            })
            .collect();
        if argv.is_empty() {
            return Err(OpenError::NoCommand);
        }
        Ok(argv)
    }
}

impl EditorHost for CommandEditorHost {
    fn open(&self, path: &Path, line: usize) -> Result<(), OpenError> {
        if !path.is_file() {
            return Err(OpenError::NotFound(path.to_path_buf()));
        }

        let argv = self.command_for(path, line)?;
        let command = argv.join(" ");
        let (program, args) = argv.split_first().ok_or(OpenError::NoCommand)?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| OpenError::Launch {
                command: command.clone(),
                source,
            })?;

        tracing::info!(command = %command, "opened file in editor");
        // Reap in the background; the editor may outlive us.
        std::thread::spawn(move || {
            let _ = child.wait();
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/editor.rs"]
mod tests;
