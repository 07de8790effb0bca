//! Log file setup
//!
//! Each run writes `latest.log`. The previous run's file is archived as
//! `bomview-<timestamp>.log` and only the newest archives are kept.

use std::fs;
use std::fs::File;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

const LATEST: &str = "latest.log";
const ARCHIVE_PREFIX: &str = "bomview-";

/// Log directory with a retention limit.
#[derive(Debug, Clone)]
pub struct LogDir {
    dir: PathBuf,
    keep: usize,
}

impl LogDir {
    pub fn new(dir: impl Into<PathBuf>, keep: usize) -> Self {
        Self { dir: dir.into(), keep }
    }

    pub fn latest(&self) -> PathBuf {
        self.dir.join(LATEST)
    }

    /// Archives the previous log, prunes old archives and creates a fresh
    /// `latest.log`.
    pub fn open(&self) -> io::Result<File> {
        fs::create_dir_all(&self.dir)?;
        let latest = self.latest();
        if latest.exists() {
            let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            fs::rename(&latest, self.dir.join(format!("{}{}.log", ARCHIVE_PREFIX, stamp)))?;
        }
        self.prune()?;
        File::create(latest)
    }

    /// Archived logs, oldest first.
    ///
    /// Timestamps sort lexically, so file names give the age.
    fn archives(&self) -> io::Result<Vec<PathBuf>> {
        let mut archives: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| is_archive(path))
            .collect();
        archives.sort();
        Ok(archives)
    }

    /// Removes archives beyond the retention limit. Returns how many went.
    fn prune(&self) -> io::Result<usize> {
        let archives = self.archives()?;
        let excess = archives.len().saturating_sub(self.keep);
        for path in &archives[..excess] {
            fs::remove_file(path)?;
        }
        if excess > 0 {
            log::debug!("Pruned {} old log files", excess);
        }
        Ok(excess)
    }
}

fn is_archive(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(ARCHIVE_PREFIX) && name.ends_with(".log"))
}

/// Routes the `log` facade to `latest.log` in `logs`.
pub fn init(logs: &LogDir, level: LevelFilter) -> Result<(), Box<dyn std::error::Error>> {
    let file = logs.open()?;
    WriteLogger::init(level, Config::default(), file)?;
    Ok(())
}
