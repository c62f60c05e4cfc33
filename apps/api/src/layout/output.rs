// Output file naming and atomic writes into the output directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tempfile::NamedTempFile;

use crate::layout::RenderError;

const DEFAULT_FILE_STEM: &str = "Resume";

/// Longest name fragment kept in a file name, in bytes.
const MAX_NAME_BYTES: usize = 100;

/// Whitespace and control characters become underscores; path separators are dropped.
/// The result is cut to `MAX_NAME_BYTES` on a char boundary.
fn sanitize_name(name: &str) -> String {
    let mut cleaned: String = name
        .trim()
        .chars()
        .filter(|c| !matches!(c, '/' | '\\'))
        .map(|c| if c.is_whitespace() || c.is_control() { '_' } else { c })
        .collect();
    truncate_at_char_boundary(&mut cleaned, MAX_NAME_BYTES);
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        DEFAULT_FILE_STEM.to_string()
    } else {
        cleaned
    }
}

fn truncate_at_char_boundary(text: &mut String, max_bytes: usize) {
    if text.len() <= max_bytes {
        return;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}

/// `resume_<sanitized-name>_<YYYYMMDD_HHMMSS>.pdf`
pub fn output_filename(name: &str, at: DateTime<Local>) -> String {
    format!(
        "resume_{}_{}.pdf",
        sanitize_name(name),
        at.format("%Y%m%d_%H%M%S")
    )
}

/// Writes `bytes` to a fresh file in `dir` named after `name` and the current time.
///
/// The bytes land in a temp file in the same directory first and are renamed into
/// place, so a reader never sees a partial PDF.
pub fn write_pdf(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf, RenderError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(output_filename(name, Local::now()));

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(&path).map_err(|e| e.error)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    #[test]
    fn test_filename_format() {
        assert_eq!(output_filename("Jane Doe", at()), "resume_Jane_Doe_20240309_140507.pdf");
    }

    #[test]
    fn test_path_separators_dropped() {
        assert_eq!(
            output_filename("../../etc/pass wd", at()),
            "resume_....etcpass_wd_20240309_140507.pdf"
        );
        assert_eq!(output_filename(" / ", at()), "resume_Resume_20240309_140507.pdf");
        assert_eq!(output_filename("..", at()), "resume_Resume_20240309_140507.pdf");
    }

    #[test]
    fn test_line_breaks_and_controls_become_underscores() {
        assert_eq!(
            output_filename("Jane Doe\n(She/Her)\t\u{7}", at()),
            "resume_Jane_Doe_(SheHer)___20240309_140507.pdf"
        );
    }

    #[test]
    fn test_long_names_are_truncated_on_char_boundary() {
        let stem = sanitize_name(&"Senior Staff Principal Engineer ".repeat(10));
        assert_eq!(stem.len(), MAX_NAME_BYTES);
        assert!(stem.starts_with("Senior_Staff_Principal_Engineer_"));

        // 'é' is two bytes; 100 bytes holds exactly 50 of them, 101 would split one.
        let accented = sanitize_name(&"é".repeat(80));
        assert_eq!(accented, "é".repeat(50));
        let odd = sanitize_name(&format!("a{}", "é".repeat(80)));
        assert_eq!(odd.len(), 99);
    }

    #[test]
    fn test_write_pdf_accepts_very_long_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pdf(dir.path(), &"Senior Staff Principal Engineer ".repeat(10), b"%PDF-1.5").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.5");
    }

    #[test]
    fn test_write_pdf_persists_into_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let path = write_pdf(&out, "Jane Doe", b"%PDF-1.5 test").unwrap();

        assert_eq!(path.parent(), Some(out.as_path()));
        let file_name = path.file_name().unwrap().to_str().unwrap();
        assert!(file_name.starts_with("resume_Jane_Doe_"));
        assert!(file_name.ends_with(".pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.5 test");
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 1);
    }
}
