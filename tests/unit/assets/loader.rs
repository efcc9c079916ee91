use super::*;

#[test]
fn normalize_rel_path_cleans_and_rejects() {
    assert_eq!(normalize_rel_path("a/./b//c.png").unwrap(), "a/b/c.png");
    assert_eq!(normalize_rel_path("a\\b.jpg").unwrap(), "a/b.jpg");
    assert!(normalize_rel_path("/etc/passwd").is_err());
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn fs_loader_resolves_relative_references_under_root() {
    let loader = FsImageLoader::new("photos");
    assert_eq!(
        loader.resolve("trip/./a.jpg").unwrap(),
        PathBuf::from("photos").join("trip/a.jpg")
    );
}

#[test]
fn fs_loader_rejects_file_uris_with_a_host() {
    let loader = FsImageLoader::new("photos");
    let err = loader.resolve("file://trip/a.jpg").unwrap_err();
    assert!(matches!(err, CarouselError::Validation(_)));
    assert!(loader.resolve("file://").is_err());
}

#[cfg(unix)]
#[test]
fn fs_loader_reads_absolute_file_uris() {
    let dir = std::env::current_dir()
        .unwrap()
        .join("target")
        .join("loader_file_uri");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("my photo.png");
    std::fs::write(&path, [7u8, 8, 9]).unwrap();

    let uri = format!("file://{}", path.display()).replace(' ', "%20");
    assert!(uri.starts_with("file:///"));

    // The root plays no part for absolute URIs.
    let mut loader = FsImageLoader::new("somewhere/else");
    assert_eq!(loader.resolve(&uri).unwrap(), path);
    assert_eq!(loader.load(&uri).unwrap(), vec![7, 8, 9]);

    let localhost = uri.replacen("file://", "file://localhost", 1);
    assert_eq!(loader.load(&localhost).unwrap(), vec![7, 8, 9]);
}

#[test]
fn fs_loader_missing_file_is_decode_error() {
    let mut loader = FsImageLoader::new("target/does-not-exist");
    let err = loader.load("missing.png").unwrap_err();
    assert!(matches!(err, CarouselError::Decode(_)));
    assert!(err.to_string().contains("missing.png"));
}

#[test]
fn memory_loader_serves_registered_bytes() {
    let mut loader = MemoryImageLoader::new();
    loader.insert("a", vec![1, 2, 3]);
    assert_eq!(loader.load("a").unwrap(), vec![1, 2, 3]);
    assert!(loader.load("b").is_err());
}
