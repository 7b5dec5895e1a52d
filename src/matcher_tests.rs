use super::*;
use crate::test_fixtures::TempTree;

fn names(files: &[PathBuf]) -> Vec<String> {
    let mut names: Vec<String> = files
        .iter()
        .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn matches_by_regex() {
    let tree = TempTree::new();
    tree.file("a.txt", 1);
    tree.file("b.txt", 1);
    tree.file("c.log", 1);

    let files = FileMatcher::new(tree.path(), r".*\.txt").matching_files().unwrap();
    assert_eq!(names(&files), vec!["a.txt", "b.txt"]);
}

#[test]
fn matching_is_case_insensitive() {
    let tree = TempTree::new();
    tree.file("REPORT.TXT", 1);

    let files = FileMatcher::new(tree.path(), r"report\.txt").matching_files().unwrap();
    assert_eq!(names(&files), vec!["REPORT.TXT"]);
}

#[test]
fn is_not_recursive() {
    let tree = TempTree::new();
    tree.file("top.txt", 1);
    tree.file("nested/deep.txt", 1);

    let files = FileMatcher::new(tree.path(), r".*\.txt").matching_files().unwrap();
    assert_eq!(names(&files), vec!["top.txt"]);
}

#[test]
fn skips_directories() {
    let tree = TempTree::new();
    tree.dir("folder.txt");
    tree.file("file.txt", 1);

    let files = FileMatcher::new(tree.path(), r".*\.txt").matching_files().unwrap();
    assert_eq!(names(&files), vec!["file.txt"]);
}

#[test]
fn regex_match_wins_over_literal_fallback() {
    let tree = TempTree::new();
    tree.file("data[1].csv", 1);
    tree.file("data1.csv", 1);

    // as a regex this only matches data1.csv
    let files = FileMatcher::new(tree.path(), "data[1].csv").matching_files().unwrap();
    assert_eq!(names(&files), vec!["data1.csv"]);
}

#[test]
fn falls_back_to_literal_mask() {
    let tree = TempTree::new();
    tree.file("data(1).csv", 1);

    let files = FileMatcher::new(tree.path(), "data(1).csv").matching_files().unwrap();
    assert_eq!(names(&files), vec!["data(1).csv"]);
}

#[test]
fn literal_fallback_finds_metacharacter_names() {
    let tree = TempTree::new();
    tree.file("notes+draft.md", 1);

    let files = FileMatcher::new(tree.path(), "notes+draft.md").matching_files().unwrap();
    assert_eq!(names(&files), vec!["notes+draft.md"]);
}

#[test]
fn returns_canonical_paths() {
    let tree = TempTree::new();
    tree.file("a.txt", 1);

    let files = FileMatcher::new(tree.path(), r"a\.txt").matching_files().unwrap();
    assert_eq!(files, tree.canonical(&["a.txt"]));
}

#[test]
fn no_match_yields_empty_list() {
    let tree = TempTree::new();
    tree.file("a.txt", 1);

    let files = FileMatcher::new(tree.path(), r".*\.csv").matching_files().unwrap();
    assert!(files.is_empty());
}

#[test]
fn invalid_pattern_is_an_error() {
    let tree = TempTree::new();
    tree.file("a.txt", 1);

    let err = FileMatcher::new(tree.path(), "(unclosed").matching_files().unwrap_err();
    match err {
        ProbeError::InvalidPattern { pattern, search_dir, .. } => {
            assert_eq!(pattern, "(unclosed");
            assert_eq!(search_dir, tree.path());
        }
        other => panic!("unexpected error: {other}"),
    }
}
