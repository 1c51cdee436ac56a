use super::bare_fs;
use mirrorfs::coordinator::SideOutcome;
use mirrorfs::FsError;

#[test]
fn create_makes_both_paths_empty_files() {
    let fs = bare_fs();
    fs.create("/cat/item").unwrap();

    for path in ["/cat/item", "/item/cat"] {
        let attrs = fs.attributes(path).unwrap();
        assert!(!attrs.is_dir(), "{} should be a file", path);
        assert_eq!(attrs.size, 0);
    }
}

#[test]
fn write_through_original_is_readable_through_mirror() {
    let fs = bare_fs();
    fs.create("/cat/item").unwrap();
    assert_eq!(fs.write("/cat/item", b"hello", 0).unwrap(), 5);
    assert_eq!(fs.read("/item/cat", 5, 0).unwrap(), b"hello");
}

#[test]
fn write_through_mirror_is_readable_through_original() {
    let fs = bare_fs();
    fs.create("/genre/title").unwrap();
    fs.write("/title/genre", b"notes", 0).unwrap();
    fs.write("/title/genre", b"N", 0).unwrap();
    assert_eq!(fs.read("/genre/title", 64, 0).unwrap(), b"Notes");
    assert_eq!(fs.attributes("/genre/title").unwrap().size, 5);
}

#[test]
fn far_offset_write_keeps_existing_bytes() {
    let fs = bare_fs();
    fs.create("/cat/item").unwrap();
    fs.write("/cat/item", b"head", 0).unwrap();
    fs.write("/cat/item", b"tail", 1000).unwrap();

    for path in ["/cat/item", "/item/cat"] {
        assert_eq!(fs.attributes(path).unwrap().size, 1004);
        assert_eq!(fs.read(path, 4, 0).unwrap(), b"head");
        assert_eq!(fs.read(path, 4, 1000).unwrap(), b"tail");
        let capacity = fs.store().find(path).unwrap().capacity().unwrap();
        assert!(capacity >= 1004);
    }
}

#[test]
fn unlink_leaves_mirror_in_place() {
    let fs = bare_fs();
    fs.create("/cat/item").unwrap();
    fs.write("/cat/item", b"data", 0).unwrap();
    fs.unlink("/cat/item").unwrap();

    assert!(fs.attributes("/cat/item").is_err());
    assert_eq!(fs.read("/item/cat", 4, 0).unwrap(), b"data");

    // The surviving side still accepts writes; the missing mirror is ignored.
    assert_eq!(fs.write("/item/cat", b"more", 4).unwrap(), 4);
    assert_eq!(fs.read("/item/cat", 8, 0).unwrap(), b"datamore");
}

#[test]
fn mknod_does_not_mirror() {
    let fs = bare_fs();
    fs.mknod("/cat/item").unwrap();
    assert!(fs.attributes("/item/cat").is_err());
    assert_eq!(fs.write("/cat/item", b"solo", 0).unwrap(), 4);
    assert_eq!(fs.read("/cat/item", 4, 0).unwrap(), b"solo");
}

#[test]
fn create_on_existing_path_keeps_content() {
    let fs = bare_fs();
    fs.create("/cat/item").unwrap();
    fs.write("/cat/item", b"keep", 0).unwrap();

    let outcome = fs.create("/cat/item").unwrap();
    assert!(matches!(outcome.primary, SideOutcome::Skipped(_)));
    assert!(matches!(outcome.secondary, SideOutcome::Skipped(_)));
    assert_eq!(fs.read("/item/cat", 4, 0).unwrap(), b"keep");
}

#[test]
fn create_recreates_missing_mirror_side() {
    let fs = bare_fs();
    fs.create("/cat/item").unwrap();
    fs.unlink("/item/cat").unwrap();

    let outcome = fs.create("/cat/item").unwrap();
    assert!(!outcome.primary.applied());
    assert!(outcome.secondary.applied());
    assert_eq!(fs.attributes("/item/cat").unwrap().size, 0);
}

#[test]
fn top_level_create_has_no_mirror() {
    let fs = bare_fs();
    let outcome = fs.create("/readme").unwrap();
    assert_eq!(outcome.secondary, SideOutcome::NoMirror);
    assert_eq!(fs.write("/readme", b"hi", 0).unwrap(), 2);
    assert_eq!(fs.store().paths(), vec!["/", "/readme"]);
}

#[test]
fn deep_create_mirrors_by_moving_first_segment() {
    let fs = bare_fs();
    let outcome = fs.create("/a/b/c").unwrap();
    assert_eq!(outcome.mirror.as_deref(), Some("/b/c/a"));
    fs.write("/a/b/c", b"x", 0).unwrap();
    assert_eq!(fs.read("/b/c/a", 1, 0).unwrap(), b"x");
}

#[test]
fn oversized_offset_write_is_rejected_on_both_sides() {
    let fs = bare_fs();
    fs.create("/cat/item").unwrap();
    fs.write("/cat/item", b"data", 0).unwrap();

    for offset in [i64::MAX as usize, usize::MAX] {
        let err = fs.write("/cat/item", b"a", offset).unwrap_err();
        assert_eq!(
            err,
            FsError::FileTooLarge {
                path: "/cat/item".to_string()
            }
        );
        assert_eq!(err.errno(), libc::EFBIG);
    }

    for path in ["/cat/item", "/item/cat"] {
        assert_eq!(fs.attributes(path).unwrap().size, 4);
        assert_eq!(fs.read(path, 8, 0).unwrap(), b"data");
    }
}
