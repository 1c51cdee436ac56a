use super::bare_fs;
use mirrorfs::FsError;

#[test]
fn root_excludes_nested_entries() {
    let fs = bare_fs();
    fs.mkdir("/cat").unwrap();
    fs.mknod("/cat/item").unwrap();
    assert_eq!(fs.list("/").unwrap(), vec![".", "..", "cat"]);
    assert_eq!(fs.list("/cat").unwrap(), vec![".", "..", "item"]);
}

#[test]
fn both_schemes_are_browsable() {
    let fs = bare_fs();
    for dir in ["/jazz", "/rock", "/alice", "/bob"] {
        fs.mkdir(dir).unwrap();
    }
    fs.create("/jazz/alice").unwrap();
    fs.create("/rock/alice").unwrap();
    fs.create("/jazz/bob").unwrap();

    assert_eq!(fs.list("/alice").unwrap(), vec![".", "..", "jazz", "rock"]);
    assert_eq!(fs.list("/bob").unwrap(), vec![".", "..", "jazz"]);
    assert_eq!(fs.list("/jazz").unwrap(), vec![".", "..", "alice", "bob"]);
    assert_eq!(
        fs.list("/").unwrap(),
        vec![".", "..", "alice", "bob", "jazz", "rock"]
    );
}

#[test]
fn names_follow_byte_order_not_creation_order() {
    let fs = bare_fs();
    fs.mkdir("/d").unwrap();
    for name in ["zeta", "Alpha", "beta", "_x"] {
        fs.mknod(&format!("/d/{}", name)).unwrap();
    }
    assert_eq!(
        fs.list("/d").unwrap(),
        vec![".", "..", "Alpha", "_x", "beta", "zeta"]
    );
}

#[test]
fn listing_a_file_or_missing_path_fails() {
    let fs = bare_fs();
    fs.mknod("/file").unwrap();
    assert_eq!(fs.list("/file"), Err(FsError::NotFound));
    assert_eq!(fs.list("/missing"), Err(FsError::NotFound));
    assert_eq!(FsError::NotFound.errno(), libc::ENOENT);
}

#[test]
fn rmdir_keeps_contents_reachable() {
    let fs = bare_fs();
    fs.mkdir("/cat").unwrap();
    fs.mknod("/cat/item").unwrap();
    fs.rmdir("/cat").unwrap();

    assert!(fs.attributes("/cat/item").is_ok());
    assert_eq!(fs.list("/cat"), Err(FsError::NotFound));
    assert_eq!(fs.list("/").unwrap(), vec![".", ".."]);
    assert_eq!(fs.rmdir("/cat"), Err(FsError::NotFound));
}

#[test]
fn journal_file_appears_at_root() {
    let fs = mirrorfs::MirrorFs::new(&mirrorfs::journal::JournalConfig::default());
    fs.mkdir("/cat").unwrap();
    assert_eq!(fs.list("/").unwrap(), vec![".", "..", "cat", "log_file"]);
}
