use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Appends the plain summary to the CI run log file (GITHUB_STEP_SUMMARY)
/// so the timing report shows up next to the workflow run.
pub fn append_step_summary(path: &Path, plain_text: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", plain_text)?;
    writeln!(file)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_summary_to_existing_content() {
        let file = tempfile::NamedTempFile::new().unwrap();
        append_step_summary(file.path(), "first run").unwrap();
        append_step_summary(file.path(), "second run").unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents, "first run\n\nsecond run\n\n");
    }
}
