use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use snag_config::LogConfig;
use snag_core::SnagError;
use tracing::warn;

use crate::entry::Reflection;

/// Append-only JSONL log of reflections for one project.
///
/// Records are only ever appended, one per line; nothing here rewrites the
/// file. Each call re-reads disk, so readers see whatever is committed.
#[derive(Debug, Clone)]
pub struct ReflectionLog {
    file_path: PathBuf,
}

impl ReflectionLog {
    pub fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    pub fn for_project(project_root: &Path, config: &LogConfig) -> Self {
        Self::new(config.log_path(project_root))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn exists(&self) -> bool {
        self.file_path.is_file()
    }

    pub fn append(&self, reflection: &Reflection) -> Result<()> {
        self.ensure_storage_dir()?;

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.file_path)
            .map_err(|err| SnagError::LogUnavailable {
                path: self.file_path.clone(),
                reason: err.to_string(),
            })?;

        let mut line = serde_json::to_vec(reflection).context("failed to serialize reflection")?;
        line.push(b'\n');
        // One write per record keeps concurrent appenders from interleaving mid-line.
        file.write_all(&line).with_context(|| {
            format!("failed to append reflection: {}", self.file_path.display())
        })?;
        file.flush().context("failed to flush reflection append")?;

        Ok(())
    }

    pub fn load_all(&self) -> Result<Vec<Reflection>> {
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }

        let file = OpenOptions::new()
            .read(true)
            .open(&self.file_path)
            .with_context(|| {
                format!("failed to read reflection log: {}", self.file_path.display())
            })?;
        let reader = BufReader::new(file);

        let mut reflections = Vec::new();
        for (idx, line_result) in reader.split(b'\n').enumerate() {
            let line = line_result.with_context(|| {
                format!(
                    "failed to read reflection line {} from {}",
                    idx + 1,
                    self.file_path.display()
                )
            })?;

            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            match serde_json::from_slice::<Reflection>(&line) {
                Ok(reflection) => reflections.push(reflection),
                Err(error) => {
                    warn!(
                        path = %self.file_path.display(),
                        line_number = idx + 1,
                        %error,
                        "skipping corrupt reflection jsonl line"
                    );
                }
            }
        }

        Ok(reflections)
    }

    fn ensure_storage_dir(&self) -> Result<()> {
        let Some(dir) = self.file_path.parent() else {
            return Ok(());
        };
        if dir.as_os_str().is_empty() {
            return Ok(());
        }
        fs::create_dir_all(dir).map_err(|err| SnagError::LogUnavailable {
            path: dir.to_path_buf(),
            reason: err.to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ReflectionContext;
    use chrono::Utc;
    use tempfile::tempdir;

    fn make_reflection(id: &str, kind: &str) -> Reflection {
        Reflection {
            id: id.to_string(),
            timestamp: Some(Utc::now()),
            failure_kind: kind.to_string(),
            snippet: format!("{kind}: something broke"),
            context: ReflectionContext::default(),
            signature: format!("{kind}-something"),
            analyzed: None,
        }
    }

    #[test]
    fn test_append_and_load_preserves_order() {
        let dir = tempdir().unwrap();
        let log = ReflectionLog::new(dir.path().join("memory").join("reflections.jsonl"));

        log.append(&make_reflection("a", "error")).unwrap();
        log.append(&make_reflection("b", "typeerror")).unwrap();
        log.append(&make_reflection("c", "enoent")).unwrap();

        let all = log.load_all().unwrap();
        let ids: Vec<&str> = all.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_one_record_per_line() {
        let dir = tempdir().unwrap();
        let log = ReflectionLog::new(dir.path().join("reflections.jsonl"));
        let mut reflection = make_reflection("a", "error");
        reflection.snippet = "line one\nline two\n".to_string();

        log.append(&reflection).unwrap();
        log.append(&make_reflection("b", "error")).unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let log = ReflectionLog::new(dir.path().join("absent.jsonl"));
        assert!(!log.exists());
        assert!(log.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_and_blank_line_tolerance() {
        let dir = tempdir().unwrap();
        let log = ReflectionLog::new(dir.path().join("reflections.jsonl"));

        log.append(&make_reflection("valid-one", "error")).unwrap();
        {
            let mut file = OpenOptions::new().append(true).open(log.path()).unwrap();
            writeln!(file, "{{ this is not valid json").unwrap();
            writeln!(file).unwrap();
            file.write_all(&[0xff, 0xfe, b'\n']).unwrap();
        }
        log.append(&make_reflection("valid-two", "error")).unwrap();
        {
            let mut file = OpenOptions::new().append(true).open(log.path()).unwrap();
            write!(file, "\n\n").unwrap();
        }

        let entries = log.load_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "valid-one");
        assert_eq!(entries[1].id, "valid-two");
    }

    #[test]
    fn test_for_project_uses_log_config() {
        let dir = tempdir().unwrap();
        let log = ReflectionLog::for_project(dir.path(), &LogConfig::default());
        assert_eq!(
            log.path(),
            dir.path()
                .join(".snag")
                .join("memory")
                .join("reflections.jsonl")
        );

        log.append(&make_reflection("a", "error")).unwrap();
        assert!(log.exists());
    }

    #[test]
    fn test_append_to_unwritable_location_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "file in the way").unwrap();

        let log = ReflectionLog::new(blocker.join("reflections.jsonl"));
        let err = log.append(&make_reflection("a", "error")).unwrap_err();
        assert!(err.downcast_ref::<SnagError>().is_some());
    }

    #[test]
    fn test_concurrent_appends_stay_line_atomic() {
        let dir = tempdir().unwrap();
        let log = ReflectionLog::new(dir.path().join("reflections.jsonl"));

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let log = log.clone();
                std::thread::spawn(move || {
                    for n in 0..25 {
                        let mut reflection = make_reflection(&format!("{worker}-{n}"), "error");
                        reflection.snippet = "x".repeat(2048);
                        log.append(&reflection).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let raw = fs::read_to_string(log.path()).unwrap();
        assert_eq!(raw.lines().count(), 100);
        assert_eq!(log.load_all().unwrap().len(), 100);
    }
}
