use super::*;
use crate::config::LibrarySettings;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn load_keeps_only_paths_that_still_exist() {
    let dir = tempdir().unwrap();
    let existing = dir.path().join("song.mp3");
    fs::write(&existing, b"not a real mp3").unwrap();
    let missing = dir.path().join("gone.mp3");

    let file = dir.path().join("library.txt");
    fs::write(
        &file,
        format!("{}\n{}\n", existing.display(), missing.display()),
    )
    .unwrap();

    let store = LibraryStore::new(&file);
    assert_eq!(store.load(), vec![existing]);
}

#[test]
fn load_creates_a_missing_file_and_returns_empty() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("media").join("library.txt");

    let store = LibraryStore::new(&file);
    assert!(store.load().is_empty());
    assert!(file.exists());
    assert_eq!(fs::read_to_string(&file).unwrap(), "");
}

#[test]
fn save_writes_one_path_per_line_in_order() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("library.txt");

    let store = LibraryStore::new(&file);
    store.save(&[PathBuf::from("/a/song.mp3"), PathBuf::from("/b/track.wav")]);

    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "/a/song.mp3\n/b/track.wav\n"
    );
}

#[test]
fn clear_then_load_yields_an_empty_list_and_an_empty_file() {
    let dir = tempdir().unwrap();
    let track = dir.path().join("song.mp3");
    fs::write(&track, b"x").unwrap();
    let file = dir.path().join("library.txt");

    let mut library = Library::open(LibraryStore::new(&file));
    library.add(vec![track]);
    library.save();
    assert_eq!(library.len(), 1);

    library.clear();
    assert!(library.is_empty());
    assert_eq!(fs::read_to_string(&file).unwrap(), "");
    assert!(LibraryStore::new(&file).load().is_empty());
}

#[test]
fn add_appends_without_deduplicating() {
    let dir = tempdir().unwrap();
    let library_file = dir.path().join("library.txt");
    let mut library = Library::open(LibraryStore::new(&library_file));

    library.add(vec![PathBuf::from("/a.mp3"), PathBuf::from("/a.mp3")]);
    library.add(vec![PathBuf::from("/a.mp3")]);

    assert_eq!(library.len(), 3);
    assert_eq!(library.get(2), Some(std::path::Path::new("/a.mp3")));
}

#[test]
fn collect_media_files_applies_the_extension_allow_list() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.mp3"), b"x").unwrap();
    fs::write(dir.path().join("b.FLAC"), b"x").unwrap();
    fs::write(dir.path().join("c.txt"), b"x").unwrap();

    let settings = LibrarySettings::default();
    let mut files = collect_media_files(&[dir.path().to_path_buf()], &settings);
    files.sort();

    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap())
        .collect();
    assert_eq!(names, vec!["a.mp3", "b.FLAC"]);
}

#[test]
fn collect_media_files_recurses_into_subdirectories() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("album");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("deep.ogg"), b"x").unwrap();

    let settings = LibrarySettings::default();
    let files = collect_media_files(&[dir.path().to_path_buf()], &settings);

    assert_eq!(files, vec![sub.join("deep.ogg")]);
}

#[test]
fn collect_media_files_takes_files_directly() {
    let dir = tempdir().unwrap();
    let wav = dir.path().join("take.wav");
    let text = dir.path().join("skip.txt");
    fs::write(&wav, b"x").unwrap();
    fs::write(&text, b"x").unwrap();

    let settings = LibrarySettings::default();
    let files = collect_media_files(&[wav.clone(), text], &settings);

    assert_eq!(files, vec![wav]);
}
