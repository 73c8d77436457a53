//! Collision-free output naming.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::errors::AllocationError;
use crate::models::{SegmentTask, SegmentWindow};

/// File-system existence queries, behind a trait so tests can fake them.
pub trait PathLookup {
    /// Whether a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is a directory this process can write into.
    fn is_writable_dir(&self, path: &Path) -> bool;
}

/// [`PathLookup`] backed by the real file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsPathLookup;

impl PathLookup for FsPathLookup {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_writable_dir(&self, path: &Path) -> bool {
        match fs::metadata(path) {
            Ok(meta) => meta.is_dir() && !meta.permissions().readonly(),
            Err(_) => false,
        }
    }
}

/// Derives one collision-free output path per planned window.
///
/// Candidate names are `{base}_{number}.{ext}` with the 1-based segment
/// number zero-padded to the width of the window count. When a candidate
/// already exists on disk an incrementing suffix is appended
/// (`{base}_{number}_1.{ext}`, `_2`, ...) until a free path is found.
/// Paths handed out earlier in the same allocation are treated as taken,
/// so the returned sequence never repeats a path.
///
/// The check-then-use is best effort: no lock is held between allocation
/// and extraction, which is acceptable for a single-user, single-run
/// tool.
pub struct NameAllocator<'a> {
    output_dir: &'a Path,
    base_name: &'a str,
    extension: &'a str,
    lookup: &'a dyn PathLookup,
}

impl<'a> NameAllocator<'a> {
    /// Create an allocator for one output directory and base name.
    pub fn new(
        output_dir: &'a Path,
        base_name: &'a str,
        extension: &'a str,
        lookup: &'a dyn PathLookup,
    ) -> Self {
        Self {
            output_dir,
            base_name,
            extension,
            lookup,
        }
    }

    /// Allocate one task per window, preserving window order.
    ///
    /// No files are created; this is path computation only.
    pub fn allocate(
        &self,
        windows: &[SegmentWindow],
    ) -> Result<Vec<SegmentTask>, AllocationError> {
        if !self.lookup.exists(self.output_dir) {
            return Err(AllocationError::DirectoryMissing(
                self.output_dir.to_path_buf(),
            ));
        }
        if !self.lookup.is_writable_dir(self.output_dir) {
            return Err(AllocationError::DirectoryNotWritable(
                self.output_dir.to_path_buf(),
            ));
        }

        let pad_width = num_width(windows.len());
        let mut claimed: HashSet<PathBuf> = HashSet::new();
        let mut tasks = Vec::with_capacity(windows.len());

        for window in windows {
            let path = self.free_path(window.number(), pad_width, &claimed);
            claimed.insert(path.clone());
            tasks.push(SegmentTask {
                window: *window,
                output_path: path,
            });
        }

        Ok(tasks)
    }

    fn free_path(&self, number: usize, pad_width: usize, claimed: &HashSet<PathBuf>) -> PathBuf {
        let mut candidate = self.candidate(number, pad_width, 0);
        let mut counter = 0u32;
        while self.lookup.exists(&candidate) || claimed.contains(&candidate) {
            counter += 1;
            candidate = self.candidate(number, pad_width, counter);
        }
        candidate
    }

    fn candidate(&self, number: usize, pad_width: usize, counter: u32) -> PathBuf {
        let file_name = if counter == 0 {
            format!(
                "{}_{:0pad_width$}.{}",
                self.base_name, number, self.extension
            )
        } else {
            format!(
                "{}_{:0pad_width$}_{}.{}",
                self.base_name, number, counter, self.extension
            )
        };
        self.output_dir.join(file_name)
    }
}

/// Decimal width of `value`, used to zero-pad segment numbers.
fn num_width(mut value: usize) -> usize {
    if value == 0 {
        return 1;
    }
    let mut width = 0;
    while value > 0 {
        value /= 10;
        width += 1;
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeLookup {
        existing: HashSet<PathBuf>,
    }

    impl FakeLookup {
        fn with_dir(dir: &Path) -> Self {
            let mut existing = HashSet::new();
            existing.insert(dir.to_path_buf());
            Self { existing }
        }

        fn add(&mut self, path: impl Into<PathBuf>) {
            self.existing.insert(path.into());
        }
    }

    impl PathLookup for FakeLookup {
        fn exists(&self, path: &Path) -> bool {
            self.existing.contains(path)
        }

        fn is_writable_dir(&self, path: &Path) -> bool {
            self.existing.contains(path)
        }
    }

    fn windows(count: usize) -> Vec<SegmentWindow> {
        (0..count)
            .map(|index| SegmentWindow {
                index,
                start_seconds: index as f64 * 270.0,
                length_seconds: 270.0,
            })
            .collect()
    }

    #[test]
    fn names_are_padded_and_ordered() {
        let dir = Path::new("/out");
        let lookup = FakeLookup::with_dir(dir);
        let allocator = NameAllocator::new(dir, "match", "mp4", &lookup);

        let tasks = allocator.allocate(&windows(12)).unwrap();
        assert_eq!(tasks.len(), 12);
        assert_eq!(tasks[0].output_path, Path::new("/out/match_01.mp4"));
        assert_eq!(tasks[9].output_path, Path::new("/out/match_10.mp4"));
        assert_eq!(tasks[11].window.index, 11);
    }

    #[test]
    fn collision_gets_a_counter_suffix() {
        let dir = Path::new("/out");
        let mut lookup = FakeLookup::with_dir(dir);
        lookup.add("/out/match_1.mp4");
        lookup.add("/out/match_1_1.mp4");
        let allocator = NameAllocator::new(dir, "match", "mp4", &lookup);

        let tasks = allocator.allocate(&windows(2)).unwrap();
        assert_eq!(tasks[0].output_path, Path::new("/out/match_1_2.mp4"));
        assert_eq!(tasks[1].output_path, Path::new("/out/match_2.mp4"));
    }

    #[test]
    fn allocated_paths_never_repeat() {
        let dir = Path::new("/out");
        let lookup = FakeLookup::with_dir(dir);
        let allocator = NameAllocator::new(dir, "clip", "mkv", &lookup);

        let tasks = allocator.allocate(&windows(25)).unwrap();
        let unique: HashSet<_> = tasks.iter().map(|t| &t.output_path).collect();
        assert_eq!(unique.len(), tasks.len());
    }

    #[test]
    fn missing_directory_is_rejected() {
        let lookup = FakeLookup {
            existing: HashSet::new(),
        };
        let allocator = NameAllocator::new(Path::new("/missing"), "clip", "mp4", &lookup);
        assert!(matches!(
            allocator.allocate(&windows(1)),
            Err(AllocationError::DirectoryMissing(_))
        ));
    }

    #[test]
    fn avoids_existing_files_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("clip_1.mp4"), b"previous run").unwrap();

        let lookup = FsPathLookup;
        let allocator = NameAllocator::new(dir.path(), "clip", "mp4", &lookup);
        let tasks = allocator.allocate(&windows(1)).unwrap();

        assert_eq!(tasks[0].output_path, dir.path().join("clip_1_1.mp4"));
    }

    #[test]
    fn num_width_counts_digits() {
        assert_eq!(num_width(0), 1);
        assert_eq!(num_width(9), 1);
        assert_eq!(num_width(10), 2);
        assert_eq!(num_width(100), 3);
    }
}
