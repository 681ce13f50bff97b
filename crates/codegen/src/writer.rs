use resgen_core::{GeneratorError, GeneratorResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes generated resources into a single output directory
#[derive(Debug, Clone)]
pub struct CodeWriter {
    output_dir: PathBuf,
    extension: String,
}

impl CodeWriter {
    pub fn new(output_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            extension: extension.into(),
        }
    }

    /// Create the output directory (recursively, mode 0755) if absent.
    /// Failure is fatal for the whole run.
    pub fn ensure_output_dir(&self) -> GeneratorResult<()> {
        if self.output_dir.is_dir() {
            return Ok(());
        }

        create_dir_all(&self.output_dir).map_err(|source| GeneratorError::OutputDirectoryUnavailable {
            path: self.output_dir.clone(),
            source,
        })
    }

    /// `{output_dir}/{TypeName}Resource.{ext}`
    pub fn resource_path(&self, type_name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}Resource.{}", type_name, self.extension))
    }

    pub fn write(&self, path: &Path, content: &str) -> GeneratorResult<()> {
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(unix)]
fn create_dir_all(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o755).create(path)
}

#[cfg(not(unix))]
fn create_dir_all(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resource_path() {
        let writer = CodeWriter::new("app/Http/Resources", "php");
        assert_eq!(
            writer.resource_path("Post"),
            PathBuf::from("app/Http/Resources/PostResource.php")
        );
    }

    #[test]
    fn test_ensure_output_dir_creates_nested_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("app/Http/Resources");
        let writer = CodeWriter::new(&dir, "php");

        writer.ensure_output_dir().unwrap();
        assert!(dir.is_dir());
        writer.ensure_output_dir().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_output_dir_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("Resources");
        CodeWriter::new(&dir, "php").ensure_output_dir().unwrap();

        let mode = fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode & !0o755, 0);
    }

    #[test]
    fn test_unavailable_output_dir_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("app");
        fs::write(&blocker, "not a directory").unwrap();

        let writer = CodeWriter::new(blocker.join("Http/Resources"), "php");
        let err = writer.ensure_output_dir().unwrap_err();
        assert!(matches!(err, GeneratorError::OutputDirectoryUnavailable { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_write_replaces_content() {
        let temp_dir = TempDir::new().unwrap();
        let writer = CodeWriter::new(temp_dir.path(), "php");
        let path = writer.resource_path("Post");

        writer.write(&path, "old").unwrap();
        writer.write(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }
}
