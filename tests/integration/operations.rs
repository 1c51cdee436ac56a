use super::bare_fs;
use mirrorfs::journal::JournalConfig;
use mirrorfs::types::NodeKind;
use mirrorfs::{FsError, MirrorFs};

#[test]
fn attributes_report_kind_and_size() {
    let fs = bare_fs();
    fs.mkdir("/cat").unwrap();
    fs.create("/cat/item").unwrap();
    fs.write("/cat/item", b"12345", 0).unwrap();

    let dir = fs.attributes("/cat").unwrap();
    assert_eq!(dir.kind, NodeKind::Directory);
    assert_eq!(dir.size, 0);

    let file = fs.attributes("/cat/item").unwrap();
    assert_eq!(file.kind, NodeKind::File);
    assert_eq!(file.size, 5);
}

#[test]
fn missing_paths_map_to_enoent() {
    let fs = bare_fs();
    let errors = [
        fs.attributes("/x").unwrap_err(),
        fs.open("/x").unwrap_err(),
        fs.read("/x", 1, 0).unwrap_err(),
        fs.write("/x", b"a", 0).unwrap_err(),
        fs.rmdir("/x").unwrap_err(),
        fs.unlink("/x").unwrap_err(),
        fs.list("/x").unwrap_err(),
    ];
    for err in errors {
        assert_eq!(err, FsError::NotFound);
        assert_eq!(err.errno(), libc::ENOENT);
    }
}

#[test]
fn duplicate_structural_inserts_map_to_eexist() {
    let fs = bare_fs();
    fs.mkdir("/cat").unwrap();
    fs.mknod("/file").unwrap();

    assert_eq!(fs.mkdir("/cat"), Err(FsError::AlreadyExists));
    assert_eq!(fs.mkdir("/file"), Err(FsError::AlreadyExists));
    assert_eq!(fs.mknod("/cat"), Err(FsError::AlreadyExists));
    assert_eq!(FsError::AlreadyExists.errno(), libc::EEXIST);

    // Nothing was replaced.
    assert!(fs.attributes("/cat").unwrap().is_dir());
    assert!(!fs.attributes("/file").unwrap().is_dir());
    assert_eq!(fs.store().len(), 3);
}

#[test]
fn read_past_end_is_empty() {
    let fs = bare_fs();
    fs.mknod("/file").unwrap();
    fs.write("/file", b"abc", 0).unwrap();
    assert_eq!(fs.read("/file", 10, 1).unwrap(), b"bc");
    assert!(fs.read("/file", 10, 3).unwrap().is_empty());
    assert!(fs.read("/file", 10, 300).unwrap().is_empty());
}

#[test]
fn open_release_and_touch_succeed_on_existing_file() {
    let fs = bare_fs();
    fs.mknod("/file").unwrap();
    fs.open("/file").unwrap();
    fs.touch_timestamps("/file").unwrap();
    fs.release("/file").unwrap();
    assert_eq!(fs.attributes("/file").unwrap().size, 0);
}

#[test]
fn erase_affects_only_target() {
    let fs = bare_fs();
    for path in ["/a", "/a-b", "/ab"] {
        fs.mknod(path).unwrap();
    }
    fs.unlink("/a").unwrap();
    assert_eq!(fs.store().paths(), vec!["/", "/a-b", "/ab"]);
}

#[test]
fn journal_records_operations_and_mirror_targets() {
    let fs = MirrorFs::new(&JournalConfig::default());
    fs.create("/cat/item").unwrap();
    fs.write("/item/cat", b"x", 0).unwrap();
    fs.list("/").unwrap();

    let journal = fs.journal().unwrap().contents();
    assert!(journal.contains("create\t/cat/item\n"));
    assert!(journal.contains("create: mirror path\t/item/cat\n"));
    assert!(journal.contains("write\t/item/cat\n"));
    assert!(journal.contains("write: mirror path\t/cat/item\n"));
    assert!(journal.contains("readdir\t/\tlog_file\n"));
}

#[test]
fn journal_path_reused_after_unlink_holds_user_data() {
    let fs = MirrorFs::new(&JournalConfig::default());
    fs.unlink("/log_file").unwrap();
    fs.mknod("/log_file").unwrap();

    assert_eq!(fs.write("/log_file", b"user data", 0).unwrap(), 9);
    assert_eq!(fs.read("/log_file", 64, 0).unwrap(), b"user data");
    assert_eq!(fs.attributes("/log_file").unwrap().size, 9);

    // Recording continues even though the journal is no longer reachable.
    let journal = fs.journal().unwrap().contents();
    assert!(journal.contains("write\t/log_file\n"));
}
