use std::fs;

use manual_engine::{ensure_output_dir, AtomicFileWriter, PersistError};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out").join("nested");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn rewriting_an_export_replaces_the_previous_content() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("Site_Manual.pdf.txt", "first run").unwrap();
    assert_eq!(first.file_name().unwrap(), "Site_Manual.pdf.txt");
    assert_eq!(fs::read_to_string(&first).unwrap(), "first run");

    let second = writer.write("Site_Manual.pdf.txt", "second run").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "second run");

    // Only the export remains; temp files are gone.
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn output_path_that_is_a_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("Site_Manual.pdf.txt", "data");
    assert!(matches!(result, Err(PersistError::OutputDir(_))));
    assert!(!file_path.with_file_name("Site_Manual.pdf.txt").exists());
}

#[test]
fn filenames_with_separators_are_rejected() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    for name in ["", "..", "../escape.txt", "a\\b.txt"] {
        let result = writer.write(name, "data");
        assert!(
            matches!(result, Err(PersistError::InvalidFilename(_))),
            "{name:?} should be rejected"
        );
    }
}
