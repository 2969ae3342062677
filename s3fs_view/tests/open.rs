mod common;

use std::sync::atomic::Ordering;

use common::{BUCKET, CountingStore, FIXTURE, fs_paged, fs_with, names, store_with};
use s3fs_view::{FsError, Node, NodeKind};

#[tokio::test(flavor = "multi_thread")]
async fn opens_top_level_file_and_directory() -> anyhow::Result<()> {
    let fs = fs_with(FIXTURE);

    let mut file = fs.open("top.json").await?.into_file()?;
    assert_eq!(file.stat().name(), "top.json");
    assert!(!file.stat().is_dir());
    assert_eq!(&file.read_to_end().await?[..], br#"{"data":"top"}"#);
    file.close()?;

    let mut dir = fs.open("dir-a").await?.into_directory()?;
    assert_eq!(dir.stat().name(), "dir-a");
    assert!(dir.stat().is_dir());
    let batch = dir.read_entries(0)?;
    let mut got = names(&batch.entries);
    got.sort_unstable();
    assert_eq!(got, vec!["one.json", "three.json", "two.json"]);
    assert!(batch.entries.iter().all(|e| !e.is_dir()));

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn nested_paths_resolve_through_prefixes() -> anyhow::Result<()> {
    let fs = fs_with(FIXTURE);

    let deep = fs.open("deep").await?;
    assert_eq!(deep.kind(), NodeKind::Directory);

    let mut down = fs.open("deep/down").await?.into_directory()?;
    let batch = down.read_entries(0)?;
    assert_eq!(names(&batch.entries), vec!["top.json"]);

    let liar = fs.read_file("deep/down/top.json").await?;
    assert_eq!(&liar[..], br#"{"data":"liar"}"#);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn equivalent_spellings_open_the_same_node() -> anyhow::Result<()> {
    let fs = fs_with(FIXTURE);

    for spelling in ["dir-a", "./dir-a", "dir-a/", "./dir-a/"] {
        let node = fs.open(spelling).await?;
        assert_eq!(node.kind(), NodeKind::Directory, "{spelling}");
        assert_eq!(node.stat().name(), "dir-a");
    }
    for spelling in ["top.json", "./top.json"] {
        let node = fs.open(spelling).await?;
        assert_eq!(node.kind(), NodeKind::File, "{spelling}");
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn file_and_directory_with_same_name_is_ambiguous() {
    let fs = fs_with(&[("foo", r#"{"data":"foo"}"#), ("foo/bar", r#"{"data":"bar"}"#)]);

    let err = fs.open("foo").await.unwrap_err();
    assert!(matches!(err, FsError::AmbiguousPath(ref p) if p == "foo"));
    assert!(err.to_string().contains("directory name matches file name"));

    // the child is still reachable
    assert_eq!(&fs.read_file("foo/bar").await.unwrap()[..], br#"{"data":"bar"}"#);
}

#[tokio::test(flavor = "multi_thread")]
async fn ambiguity_is_found_on_a_later_page() -> anyhow::Result<()> {
    let store = CountingStore::new(store_with(
        &[("foo", "f"), ("foo-1", "x"), ("foo.x", "y"), ("foo/bar", "z")],
        1,
    ));
    let fs = store.filesystem();

    let err = fs.open("foo").await.unwrap_err();
    assert!(matches!(err, FsError::AmbiguousPath(_)), "got {err}");
    assert_eq!(store.lists.load(Ordering::SeqCst), 4);
    assert_eq!(store.gets.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn sibling_with_shared_prefix_is_not_a_match() -> anyhow::Result<()> {
    let fs = fs_with(&[("foobar", "1"), ("foo-dir/x", "2")]);

    assert!(fs.open("foo").await.unwrap_err().is_not_found());
    assert_eq!(fs.open("foobar").await?.kind(), NodeKind::File);
    assert_eq!(fs.open("foo-dir").await?.kind(), NodeKind::Directory);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_bucket_root_is_an_empty_directory() -> anyhow::Result<()> {
    let fs = fs_with(&[]);

    for root in [".", "", "./"] {
        let mut node = fs.open(root).await?;
        assert_eq!(node.kind(), NodeKind::Directory);
        assert_eq!(node.stat().name(), ".");
        let batch = node.read_entries(0)?;
        assert!(batch.entries.is_empty());
        assert!(batch.end);
    }

    // nothing to hand out, so a bounded read reports the end right away
    let mut root = fs.open(".").await?.into_directory()?;
    assert!(root.read_entries(1).unwrap_err().is_end_of_directory());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn root_lists_top_level_children() -> anyhow::Result<()> {
    let fs = fs_with(FIXTURE);
    let mut root = fs.open(".").await?.into_directory()?;
    let entries = root.read_entries(-1)?.entries;

    // objects first, then common prefixes
    assert_eq!(names(&entries), vec!["top.json", "deep", "dir-a", "dir-b"]);
    assert!(!entries[0].is_dir());
    assert!(entries[1..].iter().all(|e| e.is_dir() && e.size() == 0));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_paths_are_not_found() {
    let fs = fs_with(FIXTURE);

    for path in ["nonexistent/path", "nonexistent", "dir-a/four.json", "top"] {
        let err = fs.open(path).await.unwrap_err();
        assert!(err.is_not_found(), "{path}: {err}");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_names_fail_before_any_store_call() {
    let store = CountingStore::new(store_with(FIXTURE, 1000));
    let fs = store.filesystem();

    for raw in ["/", "./.", "/top.json", "dir-a//one.json", "dir-a/../top.json", "..", "dir-a//"] {
        let err = fs.open(raw).await.unwrap_err();
        assert!(matches!(err, FsError::InvalidName(_)), "{raw}: {err}");
    }
    assert_eq!(store.total(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn directory_marker_key_is_an_invalid_name() {
    // an object stored under a key ending in the separator
    let fs = fs_with(&[("weird/", r#"{"data":"weird"}"#)]);

    let err = fs.open("weird/").await.unwrap_err();
    assert!(matches!(err, FsError::InvalidName(ref key) if key == "weird/"), "got {err}");
    assert!(err.to_string().contains("invalid name"));
}

#[tokio::test(flavor = "multi_thread")]
async fn open_file_costs_one_listing_and_one_get() -> anyhow::Result<()> {
    let store = CountingStore::new(store_with(FIXTURE, 1000));
    let fs = store.filesystem();

    let node = fs.open("dir-b/foo.json").await?;
    assert!(matches!(node, Node::File(_)));
    assert_eq!(store.lists.load(Ordering::SeqCst), 1);
    assert_eq!(store.gets.load(Ordering::SeqCst), 1);
    assert_eq!(store.heads.load(Ordering::SeqCst), 0);

    // root skips resolution entirely
    fs.open(".").await?;
    assert_eq!(store.lists.load(Ordering::SeqCst), 2);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn clones_share_the_store() -> anyhow::Result<()> {
    let fs = fs_with(FIXTURE);
    let other = fs.clone();
    assert_eq!(other.bucket(), BUCKET);

    let (a, b) = tokio::join!(fs.read_dir("dir-a"), other.read_dir("dir-a"));
    assert_eq!(a?, b?);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn many_pages_are_merged() -> anyhow::Result<()> {
    let objects: Vec<(String, String)> = (0..25)
        .map(|i| (format!("big/file-{i:02}.txt"), format!("{i}")))
        .chain((0..5).map(|i| (format!("big/sub-{i}/x"), String::new())))
        .collect();
    let borrowed: Vec<(&str, &str)> = objects
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    let fs = fs_paged(&borrowed, 4);

    let entries = fs.read_dir("big").await?;
    assert_eq!(entries.len(), 30);
    assert_eq!(entries.iter().filter(|e| e.is_dir()).count(), 5);
    assert_eq!(entries[0].name(), "file-00.txt");
    assert_eq!(entries[29].name(), "sub-4");
    Ok(())
}
