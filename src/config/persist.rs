//! In-place updates of the project JSON file

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use fs2::FileExt;
use serde::Serialize;
use serde_json::Value;

use crate::error::{WiseError, WiseResult};

/// Set `"https": true` in the config file, inserting the key when absent.
///
/// Other keys keep their order. The file is held under an exclusive lock while
/// it is rewritten.
pub fn enable_https(path: &Path) -> WiseResult<()> {
    set_key(path, "https", Value::Bool(true))
}

fn set_key(path: &Path, key: &str, value: Value) -> WiseResult<()> {
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => WiseError::ConfigNotFound {
                path: path.to_path_buf(),
            },
            _ => WiseError::Io(e),
        })?;

    FileExt::lock_exclusive(&file)?;
    let result = rewrite(&mut file, path, key, value);
    let _ = FileExt::unlock(&file);
    result
}

fn rewrite(file: &mut File, path: &Path, key: &str, value: Value) -> WiseResult<()> {
    let mut content = String::new();
    file.read_to_string(&mut content)?;

    let mut data: Value = serde_json::from_str(&content).map_err(|e| WiseError::ConfigInvalid {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let Some(object) = data.as_object_mut() else {
        return Err(WiseError::ConfigInvalid {
            path: path.to_path_buf(),
            message: "top-level value must be an object".to_string(),
        });
    };
    object.insert(key.to_string(), value);

    let mut rendered = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut rendered, formatter);
    data.serialize(&mut serializer)?;
    rendered.push(b'\n');

    file.seek(SeekFrom::Start(0))?;
    file.write_all(&rendered)?;
    file.set_len(rendered.len() as u64)?;
    file.flush()?;
    Ok(())
}
