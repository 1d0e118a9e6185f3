use datacraft_core::container::map_file;
use datacraft_core::error::Warning;
use datacraft_core::progress::Progress;

/// Progress lines on stdout, warnings on stderr.
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn chunk(&self, id: u32, done: u64, total: u64) {
        let pct = done as f64 / total as f64 * 100.0;
        println!("[{pct:5.1}%] {}", map_file::file_name(id));
    }

    fn trimmed(&self, from: u64, to: u64) {
        println!();
        println!("Trimming padding: {from} -> {to} bytes");
    }

    fn warn(&self, warning: &Warning) {
        eprintln!("warning: {warning}");
    }
}

pub fn kib(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}
