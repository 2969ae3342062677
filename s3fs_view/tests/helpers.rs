mod common;

use std::sync::atomic::Ordering;

use common::{CountingStore, FIXTURE, fs_with, names, store_with};
use s3fs_view::FsError;

#[tokio::test(flavor = "multi_thread")]
async fn stat_files_directories_and_root() -> anyhow::Result<()> {
    let fs = fs_with(FIXTURE);

    let file = fs.stat("dir-a/one.json").await?;
    assert_eq!(file.name(), "one.json");
    assert_eq!(file.size(), 14);
    assert!(file.mod_time().is_some());
    assert!(!file.is_dir());

    let dir = fs.stat("deep/down/").await?;
    assert_eq!(dir.name(), "down");
    assert!(dir.is_dir());
    assert_eq!(dir.size(), 0);

    let root = fs.stat(".").await?;
    assert_eq!(root.name(), ".");
    assert!(root.is_dir());

    assert!(fs.stat("deep/up").await.unwrap_err().is_not_found());
    assert!(matches!(fs.stat("/").await, Err(FsError::InvalidName(_))));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn stat_probes_object_before_listing() -> anyhow::Result<()> {
    let store = CountingStore::new(store_with(FIXTURE, 1000));
    let fs = store.filesystem();

    fs.stat("dir-a").await?;
    assert_eq!(store.heads.load(Ordering::SeqCst), 1);
    assert_eq!(store.lists.load(Ordering::SeqCst), 1);
    assert_eq!(store.gets.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn stat_reports_ambiguity_like_open() {
    let fs = fs_with(&[("foo", "1"), ("foo/bar", "2")]);
    assert!(matches!(fs.stat("foo").await, Err(FsError::AmbiguousPath(_))));
    assert!(matches!(fs.open("foo").await, Err(FsError::AmbiguousPath(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn stat_rejects_directory_marker_like_open() {
    let fs = fs_with(&[("weird/", r#"{"data":"weird"}"#)]);

    for path in ["weird", "weird/"] {
        let stat_err = fs.stat(path).await.unwrap_err();
        assert!(
            matches!(stat_err, FsError::InvalidName(ref key) if key == "weird/"),
            "got {stat_err}"
        );
        let open_err = fs.open(path).await.unwrap_err();
        assert!(
            matches!(open_err, FsError::InvalidName(ref key) if key == "weird/"),
            "got {open_err}"
        );
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn read_dir_sorts_by_name() -> anyhow::Result<()> {
    let fs = fs_with(FIXTURE);

    assert_eq!(
        names(&fs.read_dir("dir-a").await?),
        vec!["one.json", "three.json", "two.json"]
    );
    assert_eq!(
        names(&fs.read_dir(".").await?),
        vec!["deep", "dir-a", "dir-b", "top.json"]
    );
    assert!(matches!(
        fs.read_dir("top.json").await,
        Err(FsError::NotADirectory(_))
    ));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn read_file_returns_whole_body() -> anyhow::Result<()> {
    let fs = fs_with(FIXTURE);

    let body = fs.read_file("dir-b/foo.json").await?;
    assert_eq!(&body[..], br#"{"data":"bar"}"#);
    assert!(matches!(
        fs.read_file("dir-b").await,
        Err(FsError::IsADirectory(_))
    ));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn walk_visits_every_node_in_name_order() -> anyhow::Result<()> {
    let fs = fs_with(FIXTURE);

    let walked = fs.walk(".").await?;
    let paths: Vec<&str> = walked.iter().map(|w| w.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            ".",
            "deep",
            "deep/down",
            "deep/down/top.json",
            "dir-a",
            "dir-a/one.json",
            "dir-a/three.json",
            "dir-a/two.json",
            "dir-b",
            "dir-b/foo.json",
            "top.json",
        ]
    );
    let dirs = walked.iter().filter(|w| w.metadata.is_dir()).count();
    assert_eq!(dirs, 5);

    // every walked file reads back
    for entry in walked.iter().filter(|w| !w.metadata.is_dir()) {
        let body = fs.read_file(&entry.path).await?;
        assert_eq!(body.len() as u64, entry.metadata.size(), "{}", entry.path);
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn walk_from_a_subdirectory_or_file() -> anyhow::Result<()> {
    let fs = fs_with(FIXTURE);

    let sub: Vec<String> = fs.walk("deep").await?.into_iter().map(|w| w.path).collect();
    assert_eq!(sub, vec!["deep", "deep/down", "deep/down/top.json"]);

    let single = fs.walk("./top.json").await?;
    assert_eq!(single.len(), 1);
    assert_eq!(single[0].path, "top.json");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn walk_descends_into_directory_shadowed_by_a_file() -> anyhow::Result<()> {
    let fs = fs_with(&[("foo", "1"), ("foo/bar", "2")]);

    let paths: Vec<String> = fs.walk(".").await?.into_iter().map(|w| w.path).collect();
    assert_eq!(paths, vec![".", "foo", "foo", "foo/bar"]);
    Ok(())
}
