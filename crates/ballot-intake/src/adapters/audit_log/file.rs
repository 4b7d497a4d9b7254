use crate::domain::config::{AuditLogConfig, Rotation};
use crate::domain::entities::VoteRecord;
use crate::domain::errors::AuditLogError;
use crate::ports::outbound::{AuditLog, SystemTimeSource, TimeSource};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const SEGMENT_PREFIX: &str = "votes";
const SEGMENT_EXT: &str = "jsonl";

/// The segment currently receiving appends.
struct Segment {
    name: String,
    file: File,
    /// Length of the file up to the last fully written record.
    committed_len: u64,
    /// Set when a failed write could not be rolled back. The segment must be
    /// reopened (and its tail repaired) before the next append.
    poisoned: bool,
}

impl Segment {
    /// Write one encoded record. On failure the file is cut back to the last
    /// committed length so a torn record never becomes visible.
    fn write_record(&mut self, line: &[u8], sync: bool) -> Result<(), AuditLogError> {
        let result = self.file.write_all(line).and_then(|_| {
            if sync {
                self.file.sync_data()
            } else {
                Ok(())
            }
        });

        match result {
            Ok(()) => {
                self.committed_len += line.len() as u64;
                Ok(())
            }
            Err(e) => {
                if let Err(trunc) = self.file.set_len(self.committed_len) {
                    self.poisoned = true;
                    tracing::error!(
                        segment = %self.name,
                        error = %trunc,
                        "failed to truncate torn audit record"
                    );
                }
                Err(e.into())
            }
        }
    }
}

/// Append-only audit log persisted as JSON lines.
///
/// One record per line, segments named `votes_YYYY-MM-DD.jsonl` (UTC day of
/// acceptance) or `votes.jsonl` when rotation is off. A single mutex
/// serializes writes; it guards only the file, never the ledger.
pub struct FileAuditLog {
    config: AuditLogConfig,
    clock: Arc<dyn TimeSource>,
    segment: Mutex<Option<Segment>>,
}

impl FileAuditLog {
    /// Open (creating if needed) the audit directory described by `config`.
    pub fn open(config: AuditLogConfig) -> Result<Self, AuditLogError> {
        Self::with_time_source(config, Arc::new(SystemTimeSource))
    }

    /// Open with an explicit clock, used for segment naming.
    pub fn with_time_source(
        config: AuditLogConfig,
        clock: Arc<dyn TimeSource>,
    ) -> Result<Self, AuditLogError> {
        fs::create_dir_all(&config.dir)?;

        let log = Self {
            config,
            clock,
            segment: Mutex::new(None),
        };

        // A crash can leave a torn tail in any segment, not only today's.
        for path in log.segment_paths()? {
            let mut file = OpenOptions::new().read(true).write(true).open(&path)?;
            repair_torn_tail(&mut file, &path)?;
        }

        // Open eagerly so an unwritable directory fails at startup.
        let name = log.segment_name();
        *log.segment.lock() = Some(log.open_segment(&name)?);

        tracing::info!(
            dir = %log.config.dir.display(),
            segment = %name,
            "audit log opened"
        );

        Ok(log)
    }

    pub fn dir(&self) -> &Path {
        &self.config.dir
    }

    /// Path of the segment currently receiving appends.
    pub fn active_segment(&self) -> Option<PathBuf> {
        self.segment
            .lock()
            .as_ref()
            .map(|s| self.config.dir.join(&s.name))
    }

    fn segment_name(&self) -> String {
        match self.config.rotation {
            Rotation::Never => format!("{SEGMENT_PREFIX}.{SEGMENT_EXT}"),
            Rotation::Daily => {
                let day = DateTime::<Utc>::from_timestamp_millis(self.clock.now_millis() as i64)
                    .map(|dt| dt.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "1970-01-01".to_string());
                format!("{SEGMENT_PREFIX}_{day}.{SEGMENT_EXT}")
            }
        }
    }

    fn open_segment(&self, name: &str) -> Result<Segment, AuditLogError> {
        let path = self.config.dir.join(name);
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)?;

        let committed_len = repair_torn_tail(&mut file, &path)?;

        Ok(Segment {
            name: name.to_string(),
            file,
            committed_len,
            poisoned: false,
        })
    }

    /// Segment files in the directory, oldest first.
    fn segment_paths(&self) -> Result<Vec<PathBuf>, AuditLogError> {
        let mut paths: Vec<PathBuf> = fs::read_dir(&self.config.dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| is_segment(path))
            .collect();
        paths.sort();
        Ok(paths)
    }
}

fn is_segment(path: &Path) -> bool {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => return false,
    };
    name.starts_with(SEGMENT_PREFIX) && path.extension().and_then(|e| e.to_str()) == Some(SEGMENT_EXT)
}

/// Trim a trailing partial line left by a crash mid-append. Returns the
/// resulting file length.
fn repair_torn_tail(file: &mut File, path: &Path) -> Result<u64, AuditLogError> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(0);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;
    if last[0] == b'\n' {
        return Ok(len);
    }

    let mut bytes = Vec::with_capacity(len as usize);
    file.seek(SeekFrom::Start(0))?;
    file.read_to_end(&mut bytes)?;

    let keep = bytes
        .iter()
        .rposition(|b| *b == b'\n')
        .map(|pos| pos as u64 + 1)
        .unwrap_or(0);
    file.set_len(keep)?;

    tracing::warn!(
        path = %path.display(),
        dropped_bytes = len - keep,
        "trimmed torn record at end of audit segment"
    );

    Ok(keep)
}

impl AuditLog for FileAuditLog {
    fn append(&self, record: &VoteRecord) -> Result<(), AuditLogError> {
        // Encode outside the lock.
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        // Name the segment under the lock so rotation never goes backwards.
        let mut slot = self.segment.lock();
        let name = self.segment_name();

        let (current, poisoned) = slot
            .as_ref()
            .map_or((false, false), |s| (s.name == name, s.poisoned));
        if !current || poisoned {
            *slot = None;
            *slot = Some(self.open_segment(&name)?);
            if current {
                tracing::warn!(segment = %name, "audit segment reopened after failed write");
            } else {
                tracing::info!(segment = %name, "audit log rotated");
            }
        }

        match slot.as_mut() {
            Some(segment) => segment.write_record(&line, self.config.sync_on_append),
            None => Err(AuditLogError::Unavailable {
                reason: "no active audit segment".into(),
            }),
        }
    }

    fn read_all(&self) -> Result<Vec<VoteRecord>, AuditLogError> {
        // Hold the writer lock so no append is half-visible.
        let _guard = self.segment.lock();

        let mut records = Vec::new();
        for path in self.segment_paths()? {
            let reader = BufReader::new(File::open(&path)?);
            for (idx, line) in reader.lines().enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let record = serde_json::from_str(&line).map_err(|_| AuditLogError::Corrupted {
                    path: path.clone(),
                    line: idx + 1,
                })?;
                records.push(record);
            }
        }
        Ok(records)
    }
}
