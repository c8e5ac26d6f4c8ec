use std::path::Path;

/// Spreadsheet formats the import workflow reads.
pub const ALLOWED_EXTENSIONS: &[&str] = &["xlsx", "xls", "csv"];

/// Check an uploaded system description before it is copied into a project.
pub fn check_upload(path: &Path) -> anyhow::Result<()> {
    let allowed = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
    if !allowed {
        anyhow::bail!(
            "file type of '{}' is not allowed (expected one of: {})",
            path.display(),
            ALLOWED_EXTENSIONS.join(", ")
        );
    }
    if !path.is_file() {
        anyhow::bail!("'{}' is not a file", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tempfile::TempDir;

    use super::check_upload;

    #[test]
    fn accepts_spreadsheets_case_insensitively() {
        let dir = TempDir::new().unwrap();
        for name in ["grid.xlsx", "grid.XLS", "grid.csv"] {
            let path = dir.path().join(name);
            std::fs::write(&path, b"data").unwrap();
            assert!(check_upload(&path).is_ok(), "{name} should be accepted");
        }
    }

    #[test]
    fn rejects_other_extensions() {
        let err = check_upload(Path::new("grid.json")).unwrap_err();
        assert!(err.to_string().contains("not allowed"));
        assert!(check_upload(Path::new("grid")).is_err());
    }

    #[test]
    fn rejects_missing_file() {
        let err = check_upload(Path::new("/nonexistent/grid.xlsx")).unwrap_err();
        assert!(err.to_string().contains("not a file"));
    }
}
