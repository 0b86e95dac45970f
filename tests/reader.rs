use std::{collections::BTreeSet, fs, path::Path};

use burn_names::{
    data::Instance,
    datasets::names::{read_lines, Reader, ReaderConfig, ReaderError},
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn pattern(dir: &TempDir) -> String {
    format!("{}/*.txt", dir.path().display())
}

fn seeded(seed: u64) -> Reader {
    Reader::new(ReaderConfig::new().with_seed(Some(seed))).unwrap()
}

#[tokio::test]
async fn test_read_lines_strips_diacritics() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "German.txt", "Müller\nŠkoda\n");

    let lines = read_lines(&dir.path().join("German.txt")).await.unwrap();

    assert_eq!(lines, vec!["Muller".to_string(), "Skoda".to_string()]);
}

#[tokio::test]
async fn test_read_lines_keeps_interior_lines() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "Japanese.txt", "\n  Abe\n\n山田\n  Ono  \n\n");

    let lines = read_lines(&dir.path().join("Japanese.txt")).await.unwrap();

    // One name per line between the first and last non-blank lines
    assert_eq!(
        lines,
        vec![
            "Abe".to_string(),
            "".to_string(),
            "".to_string(),
            "  Ono".to_string()
        ]
    );
}

#[tokio::test]
async fn test_read_lines_blank_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "Empty.txt", " \n\n");

    let lines = read_lines(&dir.path().join("Empty.txt")).await.unwrap();

    assert!(lines.is_empty());
}

#[tokio::test]
async fn test_read_lines_missing_file() {
    let dir = tempfile::tempdir().unwrap();

    let result = read_lines(&dir.path().join("Missing.txt")).await;

    assert!(matches!(result, Err(ReaderError::Io { .. })));
}

#[tokio::test]
async fn test_read_derives_categories_from_file_names() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "French.txt", "Dubois\n");
    write(dir.path(), "German.txt", "Muller\n");

    let mut reader = seeded(7);
    let instances: Vec<Instance> = reader
        .read(&pattern(&dir))
        .await
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    let categories: BTreeSet<String> = instances
        .iter()
        .flat_map(|instance| instance.labels.as_ref().unwrap().labels().to_vec())
        .collect();

    assert_eq!(
        categories,
        BTreeSet::from(["French".to_string(), "German".to_string()])
    );
    assert_eq!(reader.categories(), &["French".to_string(), "German".to_string()]);
    assert_eq!(reader.category_lines()["French"], vec!["Dubois".to_string()]);
}

#[tokio::test]
async fn test_read_merges_files_with_the_same_category() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "German.txt", "Muller\n");
    write(dir.path(), "German.old.txt", "Weber\n");

    let mut reader = seeded(7);
    let instances: Vec<Instance> = reader
        .read(&pattern(&dir))
        .await
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(instances.iter().map(Instance::len).sum::<usize>(), 2);
    assert_eq!(reader.categories(), &["German".to_string()]);
    assert_eq!(
        reader.category_lines()["German"],
        vec!["Weber".to_string(), "Muller".to_string()]
    );
}

#[tokio::test]
async fn test_read_chunks_every_line() {
    let dir = tempfile::tempdir().unwrap();
    let french: Vec<String> = ('a'..='q').map(|c| format!("Dubois{}", c)).collect();
    let german: Vec<String> = ('a'..='h').map(|c| format!("Muller{}", c)).collect();
    write(dir.path(), "French.txt", &french.join("\n"));
    write(dir.path(), "German.txt", &german.join("\n"));

    let mut reader = seeded(7);
    let instances = reader.read(&pattern(&dir)).await.unwrap();
    assert_eq!(instances.len(), 3);

    let instances: Vec<Instance> = instances.collect::<Result<_, _>>().unwrap();
    let total: usize = instances.iter().map(Instance::len).sum();

    assert_eq!(total, 25);
    assert!(instances.iter().all(|instance| instance.len() <= 10));
    assert!(instances
        .iter()
        .all(|instance| instance.labels.as_ref().unwrap().len() == instance.len()));
}

#[tokio::test]
async fn test_seeded_reads_are_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    // Letters only, so every name survives normalization distinct from the others
    let names: Vec<String> = ('a'..='e')
        .flat_map(|first| ('a'..='h').map(move |second| format!("Nov{}{}", first, second)))
        .collect();
    write(dir.path(), "Czech.txt", &names.join("\n"));

    let read = |seed| {
        let pattern = pattern(&dir);

        async move {
            seeded(seed)
                .read(&pattern)
                .await
                .unwrap()
                .collect::<Result<Vec<_>, _>>()
                .unwrap()
        }
    };

    assert_eq!(read(3).await, read(3).await);
    assert_ne!(read(3).await, read(4).await);
}

#[tokio::test]
async fn test_pattern_without_matches_yields_nothing() {
    let dir = tempfile::tempdir().unwrap();

    let mut reader = Reader::default();
    let instances = reader.read(&pattern(&dir)).await.unwrap();

    assert_eq!(instances.count(), 0);
    assert!(reader.categories().is_empty());
}

#[tokio::test]
async fn test_invalid_pattern() {
    let mut reader = Reader::default();

    let result = reader.read("data/[*.txt").await;

    assert!(matches!(result, Err(ReaderError::Pattern(_))));
}
