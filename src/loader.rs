//! Binary process-control-block files.
//!
//! # Format
//!
//! Little-endian `u32` words, no header beyond the count and no padding:
//!
//! | Offset | Field |
//! |--------|-------|
//! | 0 | `N`, number of records |
//! | 4 + 12i | record i: `remaining_burst_time` |
//! | 8 + 12i | record i: `priority` |
//! | 12 + 12i | record i: `arrival` |
//!
//! A valid file is exactly `4 + 12N` bytes and no record has priority `0`.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::collections::{DynArray, DynArrayError};
use crate::models::ProcessControlBlock;

/// Bytes per record.
pub const RECORD_SIZE: usize = 12;

/// Upper bound on the capacity reserved from the header count alone.
const MAX_PRESIZE: usize = 4096;

/// Errors from reading or writing a process-control-block file.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be opened, read or written.
    Io(io::Error),
    /// Fewer than four bytes: no record count.
    MissingCount,
    /// The input ended inside the record table.
    Truncated {
        /// Records announced by the header.
        expected: u32,
        /// Complete records read before the input ended.
        read: u32,
    },
    /// Bytes remain after the announced records.
    TrailingData {
        /// Records announced by the header.
        expected: u32,
    },
    /// A record carries the reserved priority `0`.
    ZeroPriority {
        /// Zero-based record index.
        record: u32,
    },
    /// The container could not hold the records.
    Storage(DynArrayError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::MissingCount => write!(f, "file too short to hold a record count"),
            Self::Truncated { expected, read } => {
                write!(f, "expected {expected} records, found only {read}")
            }
            Self::TrailingData { expected } => {
                write!(f, "unexpected data after {expected} records")
            }
            Self::ZeroPriority { record } => {
                write!(f, "record {record} has reserved priority 0")
            }
            Self::Storage(e) => write!(f, "cannot store records: {e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<DynArrayError> for LoadError {
    fn from(e: DynArrayError) -> Self {
        Self::Storage(e)
    }
}

/// Reads one little-endian word; `None` on a clean or partial EOF.
fn read_word<R: Read>(reader: &mut R) -> io::Result<Option<u32>> {
    let mut buf = [0u8; 4];
    match reader.read_exact(&mut buf) {
        Ok(()) => Ok(Some(u32::from_le_bytes(buf))),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e),
    }
}

fn at_eof<R: Read>(reader: &mut R) -> io::Result<bool> {
    let mut probe = [0u8; 1];
    loop {
        match reader.read(&mut probe) {
            Ok(n) => return Ok(n == 0),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Parses a process-control-block table from any reader.
///
/// Every descriptor starts with `started = false` and
/// `times_processed = 0`. Records keep file order.
pub fn read_process_control_blocks<R: Read>(
    mut reader: R,
) -> Result<DynArray<ProcessControlBlock>, LoadError> {
    let count = read_word(&mut reader)?.ok_or(LoadError::MissingCount)?;

    // The count is untrusted until the records are actually read.
    let presize = usize::try_from(count).map_or(MAX_PRESIZE, |n| n.min(MAX_PRESIZE));
    let mut processes = DynArray::create(presize, None)?;

    for record in 0..count {
        let (Some(burst), Some(priority), Some(arrival)) = (
            read_word(&mut reader)?,
            read_word(&mut reader)?,
            read_word(&mut reader)?,
        ) else {
            return Err(LoadError::Truncated {
                expected: count,
                read: record,
            });
        };
        if priority == 0 {
            return Err(LoadError::ZeroPriority { record });
        }
        processes.push_back(ProcessControlBlock::new(burst, priority, arrival))?;
    }

    if !at_eof(&mut reader)? {
        return Err(LoadError::TrailingData { expected: count });
    }
    Ok(processes)
}

/// Loads a process-control-block file.
///
/// # Example
///
/// ```no_run
/// use u_procsched::loader::load_process_control_blocks;
///
/// let queue = load_process_control_blocks("pcb.bin").unwrap();
/// println!("{} processes", queue.size());
/// ```
pub fn load_process_control_blocks(
    path: impl AsRef<Path>,
) -> Result<DynArray<ProcessControlBlock>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let processes = read_process_control_blocks(BufReader::new(file))?;
    log::debug!(
        "loaded {} process control blocks from {}",
        processes.size(),
        path.display()
    );
    Ok(processes)
}

/// Writes `processes` in the binary format to any writer.
///
/// Only burst time, priority and arrival are stored.
pub fn write_to<W: Write>(
    mut writer: W,
    processes: &[ProcessControlBlock],
) -> Result<(), LoadError> {
    let count = u32::try_from(processes.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "more records than a u32 count can describe",
        )
    })?;

    writer.write_all(&count.to_le_bytes())?;
    for process in processes {
        writer.write_all(&process.remaining_burst_time.to_le_bytes())?;
        writer.write_all(&process.priority.to_le_bytes())?;
        writer.write_all(&process.arrival.to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `processes` to a file, replacing any previous contents.
pub fn write_process_control_blocks(
    path: impl AsRef<Path>,
    processes: &[ProcessControlBlock],
) -> Result<(), LoadError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_to(BufWriter::new(file), processes)?;
    log::debug!(
        "wrote {} process control blocks to {}",
        processes.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "u_procsched_{}_{}.bin",
            name,
            std::process::id()
        ))
    }

    fn words(values: &[u32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_missing_file() {
        let err = load_process_control_blocks(temp_file("does_not_exist")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn test_empty_file() {
        let path = temp_file("empty");
        std::fs::write(&path, b"").unwrap();
        let err = load_process_control_blocks(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, LoadError::MissingCount));
    }

    #[test]
    fn test_partial_count() {
        let err = read_process_control_blocks(&[7u8, 0][..]).unwrap_err();
        assert!(matches!(err, LoadError::MissingCount));
    }

    #[test]
    fn test_zero_records() {
        let queue = read_process_control_blocks(&words(&[0])[..]).unwrap();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_single_record() {
        let queue = read_process_control_blocks(&words(&[1, 15, 2, 7])[..]).unwrap();
        assert_eq!(queue.size(), 1);
        let process = queue.front().unwrap();
        assert_eq!(process.remaining_burst_time, 15);
        assert_eq!(process.priority, 2);
        assert_eq!(process.arrival, 7);
        assert!(!process.started);
        assert_eq!(process.times_processed, 0);
    }

    #[test]
    fn test_fewer_records_than_announced() {
        let err = read_process_control_blocks(&words(&[3, 5, 1, 0, 4, 1, 2])[..]).unwrap_err();
        match err {
            LoadError::Truncated { expected, read } => {
                assert_eq!(expected, 3);
                assert_eq!(read, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = read_process_control_blocks(&words(&[3, 5, 1, 0])[..]).unwrap_err();
        assert!(matches!(err, LoadError::Truncated { expected: 3, read: 1 }));
    }

    #[test]
    fn test_record_cut_mid_word() {
        let mut bytes = words(&[1, 5, 1]);
        bytes.extend_from_slice(&[9, 0]);
        let err = read_process_control_blocks(&bytes[..]).unwrap_err();
        assert!(matches!(err, LoadError::Truncated { read: 0, .. }));
    }

    #[test]
    fn test_more_records_than_announced() {
        let err = read_process_control_blocks(&words(&[1, 5, 1, 0, 4, 1, 2])[..]).unwrap_err();
        assert!(matches!(err, LoadError::TrailingData { expected: 1 }));

        let mut bytes = words(&[1, 5, 1, 0]);
        bytes.push(0);
        let err = read_process_control_blocks(&bytes[..]).unwrap_err();
        assert!(matches!(err, LoadError::TrailingData { .. }));
    }

    #[test]
    fn test_zero_priority_rejected() {
        let err =
            read_process_control_blocks(&words(&[2, 5, 1, 0, 4, 0, 2])[..]).unwrap_err();
        assert!(matches!(err, LoadError::ZeroPriority { record: 1 }));
    }

    #[test]
    fn test_huge_count_does_not_preallocate() {
        let err = read_process_control_blocks(&words(&[u32::MAX, 1, 1, 1])[..]).unwrap_err();
        assert!(matches!(err, LoadError::Truncated { read: 1, .. }));
    }

    #[test]
    fn test_file_round_trip() {
        let processes: Vec<_> = (0..10u32)
            .map(|i| ProcessControlBlock::new(i * 3 + 1, i % 4 + 1, i * 2))
            .collect();
        let path = temp_file("round_trip");

        write_process_control_blocks(&path, &processes).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 4 + RECORD_SIZE * processes.len());

        let first = load_process_control_blocks(&path).unwrap();
        let second = load_process_control_blocks(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(first.as_slice(), processes.as_slice());
        assert_eq!(first.as_slice(), second.as_slice());
    }

    #[test]
    fn test_write_drops_runtime_state() {
        let mut process = ProcessControlBlock::new(4, 2, 1);
        process.started = true;
        process.times_processed = 3;

        let mut bytes = Vec::new();
        write_to(&mut bytes, &[process]).unwrap();
        assert_eq!(bytes, words(&[1, 4, 2, 1]));

        let loaded = read_process_control_blocks(&bytes[..]).unwrap();
        assert_eq!(loaded.front(), Some(&ProcessControlBlock::new(4, 2, 1)));
    }

    #[test]
    fn test_error_display() {
        let err = LoadError::Truncated {
            expected: 4,
            read: 2,
        };
        assert_eq!(err.to_string(), "expected 4 records, found only 2");
        assert_eq!(
            LoadError::ZeroPriority { record: 3 }.to_string(),
            "record 3 has reserved priority 0"
        );
    }
}
