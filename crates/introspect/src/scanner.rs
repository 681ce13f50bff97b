use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// List model inputs: the regular files directly inside a directory,
/// sorted by name, or the path itself when it is a single file.
pub fn scan(model_path: &Path) -> io::Result<Vec<PathBuf>> {
    if !model_path.is_dir() {
        if !model_path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("model path {} does not exist", model_path.display()),
            ));
        }
        return Ok(vec![model_path.to_path_buf()]);
    }

    let mut inputs = Vec::new();
    for entry in fs::read_dir(model_path)? {
        let entry = entry?;
        let path = entry.path();
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));

        if path.is_file() && !hidden {
            inputs.push(path);
        }
    }

    inputs.sort();
    Ok(inputs)
}

/// File text; bytes that are not UTF-8 (e.g. Latin-1 comments) are replaced
pub fn read_source(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
