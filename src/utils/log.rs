use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Default directory for the debug trail, relative to the working directory.
pub const LOG_DIR: &str = "logs";

fn open_append(dir: &Path, filename: &str) -> io::Result<(fs::File, bool)> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    let path: PathBuf = dir.join(filename);
    let existed = path.exists();
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok((file, existed))
}

/// Appends a timestamped entry to `dir/filename`.
///
/// # Arguments
///
/// * `dir` - Directory holding the log, created if missing
/// * `filename` - Name of the log file
/// * `message` - The message to log
pub fn log_to_file(dir: &Path, filename: &str, message: &str) -> io::Result<()> {
    let (mut file, _) = open_append(dir, filename)?;

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    writeln!(file, "\n--- Log entry at {} ---", timestamp)?;
    writeln!(file, "{}", message)?;
    writeln!(file, "--- End of entry ---")?;

    file.flush()
}

/// Same as [`log_to_file`] with a banner line above the message.
pub fn log_with_header(dir: &Path, filename: &str, header: &str, message: &str) -> io::Result<()> {
    let formatted_message = format!(
        "===== {} =====\n{}\n====================",
        header, message
    );
    log_to_file(dir, filename, &formatted_message)
}

/// Appends one CSV row, writing `headers` first when the file is new.
pub fn log_csv(dir: &Path, filename: &str, headers: &[&str], data: &[&str]) -> io::Result<()> {
    let (mut file, existed) = open_append(dir, filename)?;

    if !existed && !headers.is_empty() {
        writeln!(file, "{}", headers.join(","))?;
    }
    writeln!(file, "{}", data.join(","))?;

    file.flush()
}
