use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tally_core::{Expense, store};

/// `$TALLY_HOME`, or `~/.tally` when unset.
pub fn tally_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("TALLY_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".tally"))
}

/// Nothing is created here; `save_expenses` makes the directory on first write.
pub fn default_data_path() -> Result<PathBuf> {
    Ok(tally_home()?.join("expenses.json"))
}

/// Read the stored collection. A missing file or undecodable contents give an
/// empty list; only I/O failures are errors.
pub fn load_expenses(path: &Path) -> Result<Vec<Expense>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no data file yet");
        return Ok(Vec::new());
    }
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(store::decode_or_empty(Some(&text))),
        Err(err) => {
            tracing::warn!(path = %path.display(), "stored expenses are not UTF-8, starting empty: {err}");
            Ok(store::decode_or_empty(None))
        }
    }
}

/// Write the whole collection, via a temp file renamed over the target.
pub fn save_expenses(path: &Path, items: &[Expense]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let json = store::encode(items).context("serialize expenses")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("replace {}", path.display()))?;
    tracing::debug!(path = %path.display(), count = items.len(), "saved expenses");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tally_core::Category;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("expenses.json");
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let items = vec![
            Expense::new("1", d, "milk", 100.0, Category::Food),
            Expense::new("2", d, "soap", 200.0, Category::Household),
        ];
        save_expenses(&path, &items).unwrap();
        assert_eq!(load_expenses(&path).unwrap(), items);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_missing_and_corrupt_files_load_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("expenses.json");
        assert!(load_expenses(&path).unwrap().is_empty());

        fs::write(&path, "[{\"id\": 42").unwrap();
        assert!(load_expenses(&path).unwrap().is_empty());
    }

    #[test]
    fn test_non_utf8_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("expenses.json");
        fs::write(&path, [0xff, 0xfe, b'[', b']']).unwrap();
        assert!(load_expenses(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_does_not_create_directories() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join("not-yet");
        assert!(load_expenses(&home.join("expenses.json")).unwrap().is_empty());
        assert!(!home.exists());
    }
}
