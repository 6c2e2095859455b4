use mirrorsync_analyze::{DigestComparator, MetadataComparator};
use mirrorsync_scan::{ActionKind, ActionPlanner, DirectoryLevel, FolderSettings, LevelWalker};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const LEVEL_1: [(&str, &str); 3] = [
    ("file1.txt", "content file 1"),
    ("file2.txt", "content file 2"),
    ("file3.txt", "content file 3"),
];

const LEVEL_2: [(&str, &str); 2] = [
    ("sub_file1.txt", "content file 1"),
    ("sub_file2.txt", "content file 2"),
];

fn setup() -> (TempDir, FolderSettings) {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("source")).unwrap();
    fs::create_dir(temp.path().join("destination")).unwrap();
    let settings = FolderSettings::new(temp.path().join("source"), temp.path().join("destination"));
    (temp, settings)
}

/// Lay out LEVEL_1 at `root` and LEVEL_2 under `root/subfolder_1`, optionally
/// writing `override_content` into every file.
fn populate(root: &Path, override_content: Option<&str>) {
    for (name, content) in LEVEL_1 {
        fs::write(root.join(name), override_content.unwrap_or(content)).unwrap();
    }
    let sub = root.join("subfolder_1");
    fs::create_dir(&sub).unwrap();
    for (name, content) in LEVEL_2 {
        fs::write(sub.join(name), override_content.unwrap_or(content)).unwrap();
    }
}

fn walk(settings: &FolderSettings) -> Vec<DirectoryLevel> {
    LevelWalker::new(settings)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap()
}

fn plan(settings: &FolderSettings) -> HashMap<PathBuf, ActionKind> {
    let walker = LevelWalker::new(settings).unwrap();
    ActionPlanner::new(walker, DigestComparator::new(settings))
        .map(|action| {
            let action = action.unwrap();
            (action.relative_path(), action.kind)
        })
        .collect()
}

#[test]
fn test_walk_with_files_only_on_source() {
    let (_temp, settings) = setup();
    populate(&settings.source, None);

    let levels = walk(&settings);
    assert_eq!(levels.len(), 2);

    let first = &levels[0];
    assert_eq!(first.common_root, "");
    assert!(first.source.folders.contains("subfolder_1"));
    assert_eq!(first.source.folders.len(), 1);
    for (name, _) in LEVEL_1 {
        assert!(first.source.files.contains(name));
    }
    assert!(first.destination.is_empty());

    let second = &levels[1];
    assert_eq!(second.common_root, "subfolder_1");
    assert!(second.source.folders.is_empty());
    for (name, _) in LEVEL_2 {
        assert!(second.source.files.contains(name));
    }
    assert!(second.destination.is_empty());
}

#[test]
fn test_walk_with_files_on_source_and_destination() {
    let (_temp, settings) = setup();
    populate(&settings.source, None);
    populate(&settings.destination, None);

    let levels = walk(&settings);
    assert_eq!(levels.len(), 2);
    assert_eq!(levels[0].source, levels[0].destination);
    assert_eq!(levels[1].common_root, "subfolder_1");
    assert_eq!(levels[1].source, levels[1].destination);
}

#[test]
fn test_walk_with_files_only_on_destination() {
    let (_temp, settings) = setup();
    populate(&settings.destination, None);

    let levels = walk(&settings);
    assert_eq!(levels.len(), 1);
    assert_eq!(levels[0].common_root, "");
    assert!(levels[0].source.is_empty());
    assert!(levels[0].destination.folders.contains("subfolder_1"));
    for (name, _) in LEVEL_1 {
        assert!(levels[0].destination.files.contains(name));
    }
}

#[test]
fn test_walk_visits_parent_before_children() {
    let (_temp, settings) = setup();
    fs::create_dir_all(settings.source.join("a").join("b").join("c")).unwrap();
    fs::create_dir(settings.source.join("d")).unwrap();

    let roots: Vec<String> = walk(&settings)
        .into_iter()
        .map(|level| level.common_root.replace(std::path::MAIN_SEPARATOR, "/"))
        .collect();

    assert_eq!(roots, vec!["", "a", "a/b", "a/b/c", "d"]);
}

#[test]
fn test_plan_creates_when_only_on_source() {
    let (_temp, settings) = setup();
    populate(&settings.source, None);

    let actions = plan(&settings);
    let expected: HashMap<PathBuf, ActionKind> = [
        ("file1.txt", ActionKind::CreateFile),
        ("file2.txt", ActionKind::CreateFile),
        ("file3.txt", ActionKind::CreateFile),
        ("subfolder_1", ActionKind::CreateFolder),
        ("subfolder_1/sub_file1.txt", ActionKind::CreateFile),
        ("subfolder_1/sub_file2.txt", ActionKind::CreateFile),
    ]
    .into_iter()
    .map(|(path, kind)| (PathBuf::from(path), kind))
    .collect();

    assert_eq!(actions, expected);
}

#[test]
fn test_plan_deletes_when_only_on_destination() {
    let (_temp, settings) = setup();
    populate(&settings.destination, None);
    fs::create_dir(settings.destination.join("subfolder_2")).unwrap();

    let actions = plan(&settings);
    let expected: HashMap<PathBuf, ActionKind> = [
        ("file1.txt", ActionKind::DeleteFile),
        ("file2.txt", ActionKind::DeleteFile),
        ("file3.txt", ActionKind::DeleteFile),
        ("subfolder_1", ActionKind::DeleteFolder),
        ("subfolder_2", ActionKind::DeleteFolder),
    ]
    .into_iter()
    .map(|(path, kind)| (PathBuf::from(path), kind))
    .collect();

    assert_eq!(actions, expected);
}

#[test]
fn test_plan_updates_when_content_differs() {
    let (_temp, settings) = setup();
    populate(&settings.source, None);
    populate(&settings.destination, Some("other value"));

    let actions = plan(&settings);
    assert_eq!(actions.len(), 5);
    assert!(actions.values().all(|kind| *kind == ActionKind::UpdateFile));
    assert!(actions.contains_key(Path::new("subfolder_1/sub_file2.txt")));
}

#[test]
fn test_plan_is_empty_when_trees_match() {
    let (_temp, settings) = setup();
    populate(&settings.source, None);
    populate(&settings.destination, None);

    assert!(plan(&settings).is_empty());
}

#[test]
fn test_fast_plan_flags_files_written_separately() {
    let (_temp, settings) = setup();
    fs::write(settings.source.join("a.txt"), "same").unwrap();
    fs::write(settings.destination.join("a.txt"), "same").unwrap();
    let old = std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_000);
    fs::File::options()
        .write(true)
        .open(settings.destination.join("a.txt"))
        .unwrap()
        .set_modified(old)
        .unwrap();

    let walker = LevelWalker::new(&settings).unwrap();
    let actions: Vec<_> = ActionPlanner::new(walker, MetadataComparator::new(&settings))
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].kind, ActionKind::UpdateFile);
}
