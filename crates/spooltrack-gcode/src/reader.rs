//! Streaming reader for toolpath files.
//!
//! Toolpath files can run to tens of megabytes, so the reader never
//! materializes the whole file: lines are streamed through a callback
//! with a bounded buffer, and the handle is released on every exit path.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::{AnalysisError, AnalysisResult};

/// Buffer size for reading large files (256 KB)
const READ_BUFFER_SIZE: usize = 256 * 1024;

/// Statistics for one streaming pass over a file.
#[derive(Debug, Clone)]
pub struct FileReadStats {
    /// Total bytes read, including newlines
    pub bytes_read: u64,
    /// Total lines read
    pub lines_read: u64,
    /// File size in bytes
    pub file_size: u64,
    /// Time taken to read (milliseconds)
    pub read_time_ms: u64,
}

/// Toolpath file reader with line streaming support.
pub struct GcodeFileReader {
    path: PathBuf,
    file_size: u64,
}

impl GcodeFileReader {
    /// Open a toolpath file for streaming.
    ///
    /// # Errors
    /// Returns an error if the path does not exist or is not a regular file.
    pub fn open(path: impl AsRef<Path>) -> AnalysisResult<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(AnalysisError::FileNotFound(path.display().to_string()));
        }
        if !path.is_file() {
            return Err(AnalysisError::NotAFile(path.display().to_string()));
        }

        let file_size = fs::metadata(&path)?.len();

        Ok(Self { path, file_size })
    }

    /// Get file size in bytes
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Get file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stream the file line by line through a callback.
    ///
    /// The callback is infallible: per-line problems are the parser's
    /// concern and never abort the pass. Only I/O failures do. Lines are
    /// decoded lossily, so a stray non-UTF-8 byte in an otherwise valid
    /// toolpath file degrades that byte instead of failing the request.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    pub fn read_lines<F>(&self, mut callback: F) -> AnalysisResult<FileReadStats>
    where
        F: FnMut(&str),
    {
        let start = Instant::now();
        let file = File::open(&self.path)?;
        let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);

        let mut lines_read = 0u64;
        let mut bytes_read = 0u64;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let n = reader.read_until(b'\n', &mut buf)?;
            if n == 0 {
                break;
            }
            bytes_read += n as u64;

            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }

            callback(&String::from_utf8_lossy(&buf));
            lines_read += 1;
        }

        Ok(FileReadStats {
            bytes_read,
            lines_read,
            file_size: self.file_size,
            read_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_missing_file() {
        let result = GcodeFileReader::open("/nonexistent/path/file.gcode");
        assert!(matches!(result, Err(AnalysisError::FileNotFound(_))));
    }

    #[test]
    fn test_open_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = GcodeFileReader::open(dir.path());
        assert!(matches!(result, Err(AnalysisError::NotAFile(_))));
    }

    #[test]
    fn test_read_lines_streams_every_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "G28").unwrap();
        writeln!(file, "G1 X10 E5").unwrap();
        writeln!(file, "; done").unwrap();
        file.flush().unwrap();

        let reader = GcodeFileReader::open(file.path()).unwrap();
        let mut seen = Vec::new();
        let stats = reader.read_lines(|line| seen.push(line.to_string())).unwrap();

        assert_eq!(seen, vec!["G28", "G1 X10 E5", "; done"]);
        assert_eq!(stats.lines_read, 3);
        assert!(stats.bytes_read > 0);
    }

    #[test]
    fn test_invalid_utf8_byte_is_not_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"G1 E5\n; bad \xFF comment\r\nG1 E7\n").unwrap();
        file.flush().unwrap();

        let reader = GcodeFileReader::open(file.path()).unwrap();
        let mut seen = Vec::new();
        let stats = reader.read_lines(|line| seen.push(line.to_string())).unwrap();

        assert_eq!(stats.lines_read, 3);
        assert_eq!(seen[0], "G1 E5");
        assert_eq!(seen[1], "; bad \u{FFFD} comment");
        assert_eq!(seen[2], "G1 E7");
    }
}
