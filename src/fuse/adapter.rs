//! FUSE adapter
//!
//! Maps kernel requests onto `MirrorFs` operations. Inodes are translated to
//! paths through `InodeTable`; every failure is reported with the errno of the
//! underlying `FsError`.

use super::inodes::{child_path, parent_path, InodeTable};
use crate::config::MountConfig;
use crate::error::ApiError;
use crate::fs::MirrorFs;
use crate::types::{NodeAttributes, NodeKind};
use fuser::consts::FOPEN_DIRECT_IO;
use fuser::{
    FileAttr, FileType, MountOption, ReplyAttr, ReplyCreate, ReplyData, ReplyDirectory,
    ReplyEmpty, ReplyEntry, ReplyOpen, ReplyWrite, Request, TimeOrNow,
};
use libc::{c_int, EINVAL, ENOENT, ENOSYS};
use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::{debug, info};

const BLOCK_SIZE: u32 = 512;

/// FUSE filesystem over a shared `MirrorFs`
pub struct MirrorFsFuse {
    fs: Arc<MirrorFs>,
    inodes: InodeTable,
    ttl: Duration,
    started: SystemTime,
    next_fh: u64,
}

impl MirrorFsFuse {
    pub fn new(fs: Arc<MirrorFs>, mount: &MountConfig) -> Self {
        Self {
            fs,
            inodes: InodeTable::new(),
            ttl: mount.attr_ttl(),
            started: SystemTime::now(),
            next_fh: 1,
        }
    }

    fn alloc_fh(&mut self) -> u64 {
        let fh = self.next_fh;
        self.next_fh += 1;
        fh
    }

    fn to_file_attr(&self, req: &Request, ino: u64, attributes: NodeAttributes) -> FileAttr {
        let (kind, perm, nlink) = match attributes.kind {
            NodeKind::Directory => (FileType::Directory, 0o755, 2),
            NodeKind::File => (FileType::RegularFile, 0o444, 1),
        };
        FileAttr {
            ino,
            size: attributes.size,
            blocks: attributes.size.div_ceil(BLOCK_SIZE as u64),
            atime: self.started,
            mtime: self.started,
            ctime: self.started,
            crtime: self.started,
            kind,
            perm,
            nlink,
            uid: req.uid(),
            gid: req.gid(),
            rdev: 0,
            blksize: BLOCK_SIZE,
            flags: 0,
        }
    }

    fn path_of(&self, ino: u64) -> Result<String, c_int> {
        self.inodes.path(ino).map(str::to_string).ok_or(ENOENT)
    }

    fn resolve_child(&self, parent: u64, name: &OsStr) -> Result<String, c_int> {
        let parent = self.path_of(parent)?;
        let name = name.to_str().ok_or(EINVAL)?;
        Ok(child_path(&parent, name))
    }

    /// Attributes for `path`, allocating its inode on success
    fn entry_for(&mut self, req: &Request, path: &str) -> Result<FileAttr, c_int> {
        let attributes = self.fs.attributes(path).map_err(|e| e.errno())?;
        let ino = self.inodes.get_or_alloc(path);
        Ok(self.to_file_attr(req, ino, attributes))
    }

    fn kind_of(&self, path: &str) -> Option<FileType> {
        self.fs.store().find(path).map(|node| match node.kind() {
            NodeKind::Directory => FileType::Directory,
            NodeKind::File => FileType::RegularFile,
        })
    }
}

impl fuser::Filesystem for MirrorFsFuse {
    fn init(&mut self, _req: &Request, _config: &mut fuser::KernelConfig) -> Result<(), c_int> {
        info!(ttl_ms = self.ttl.as_millis() as u64, "FUSE adapter initialized");
        Ok(())
    }

    fn destroy(&mut self) {
        info!("FUSE adapter destroyed");
    }

    fn forget(&mut self, _req: &Request, ino: u64, _nlookup: u64) {
        self.inodes.forget(ino);
    }

    fn lookup(&mut self, req: &Request, parent: u64, name: &OsStr, reply: ReplyEntry) {
        let result = self
            .resolve_child(parent, name)
            .and_then(|path| self.entry_for(req, &path));
        match result {
            Ok(attr) => reply.entry(&self.ttl, &attr, 0),
            Err(errno) => reply.error(errno),
        }
    }

    fn getattr(&mut self, req: &Request, ino: u64, _fh: Option<u64>, reply: ReplyAttr) {
        let result = self.path_of(ino).and_then(|path| {
            self.fs
                .attributes(&path)
                .map(|attributes| self.to_file_attr(req, ino, attributes))
                .map_err(|e| e.errno())
        });
        match result {
            Ok(attr) => reply.attr(&self.ttl, &attr),
            Err(errno) => reply.error(errno),
        }
    }

    fn setattr(
        &mut self,
        req: &Request,
        ino: u64,
        _mode: Option<u32>,
        _uid: Option<u32>,
        _gid: Option<u32>,
        size: Option<u64>,
        _atime: Option<TimeOrNow>,
        _mtime: Option<TimeOrNow>,
        _ctime: Option<SystemTime>,
        _fh: Option<u64>,
        _crtime: Option<SystemTime>,
        _chgtime: Option<SystemTime>,
        _bkuptime: Option<SystemTime>,
        _flags: Option<u32>,
        reply: ReplyAttr,
    ) {
        // No truncate: content only ever grows through writes.
        if size.is_some() {
            reply.error(ENOSYS);
            return;
        }
        let result = self.path_of(ino).and_then(|path| {
            self.fs
                .touch_timestamps(&path)
                .and_then(|_| self.fs.attributes(&path))
                .map(|attributes| self.to_file_attr(req, ino, attributes))
                .map_err(|e| e.errno())
        });
        match result {
            Ok(attr) => reply.attr(&self.ttl, &attr),
            Err(errno) => reply.error(errno),
        }
    }

    fn mknod(
        &mut self,
        req: &Request,
        parent: u64,
        name: &OsStr,
        _mode: u32,
        _umask: u32,
        _rdev: u32,
        reply: ReplyEntry,
    ) {
        let result = self.resolve_child(parent, name).and_then(|path| {
            self.fs.mknod(&path).map_err(|e| e.errno())?;
            self.entry_for(req, &path)
        });
        match result {
            Ok(attr) => reply.entry(&self.ttl, &attr, 0),
            Err(errno) => reply.error(errno),
        }
    }

    fn mkdir(
        &mut self,
        req: &Request,
        parent: u64,
        name: &OsStr,
        _mode: u32,
        _umask: u32,
        reply: ReplyEntry,
    ) {
        let result = self.resolve_child(parent, name).and_then(|path| {
            self.fs.mkdir(&path).map_err(|e| e.errno())?;
            self.entry_for(req, &path)
        });
        match result {
            Ok(attr) => reply.entry(&self.ttl, &attr, 0),
            Err(errno) => reply.error(errno),
        }
    }

    fn unlink(&mut self, _req: &Request, parent: u64, name: &OsStr, reply: ReplyEmpty) {
        let result = self.resolve_child(parent, name).and_then(|path| {
            self.fs.unlink(&path).map_err(|e| e.errno())?;
            self.inodes.remove_path(&path);
            Ok(())
        });
        match result {
            Ok(()) => reply.ok(),
            Err(errno) => reply.error(errno),
        }
    }

    fn rmdir(&mut self, _req: &Request, parent: u64, name: &OsStr, reply: ReplyEmpty) {
        let result = self.resolve_child(parent, name).and_then(|path| {
            self.fs.rmdir(&path).map_err(|e| e.errno())?;
            self.inodes.remove_path(&path);
            Ok(())
        });
        match result {
            Ok(()) => reply.ok(),
            Err(errno) => reply.error(errno),
        }
    }

    fn open(&mut self, _req: &Request, ino: u64, _flags: i32, reply: ReplyOpen) {
        let result = self
            .path_of(ino)
            .and_then(|path| self.fs.open(&path).map_err(|e| e.errno()));
        match result {
            // Direct I/O keeps the kernel from caching pages that a mirrored
            // write may change behind its back.
            Ok(()) => {
                let fh = self.alloc_fh();
                reply.opened(fh, FOPEN_DIRECT_IO)
            }
            Err(errno) => reply.error(errno),
        }
    }

    fn read(
        &mut self,
        _req: &Request,
        ino: u64,
        _fh: u64,
        offset: i64,
        size: u32,
        _flags: i32,
        _lock_owner: Option<u64>,
        reply: ReplyData,
    ) {
        if offset < 0 {
            reply.error(EINVAL);
            return;
        }
        let result = self.path_of(ino).and_then(|path| {
            self.fs
                .read(&path, size as usize, offset as usize)
                .map_err(|e| e.errno())
        });
        match result {
            Ok(data) => reply.data(&data),
            Err(errno) => reply.error(errno),
        }
    }

    fn write(
        &mut self,
        _req: &Request,
        ino: u64,
        _fh: u64,
        offset: i64,
        data: &[u8],
        _write_flags: u32,
        _flags: i32,
        _lock_owner: Option<u64>,
        reply: ReplyWrite,
    ) {
        if offset < 0 {
            reply.error(EINVAL);
            return;
        }
        let result = self.path_of(ino).and_then(|path| {
            self.fs
                .write(&path, data, offset as usize)
                .map_err(|e| e.errno())
        });
        match result {
            Ok(written) => reply.written(written as u32),
            Err(errno) => reply.error(errno),
        }
    }

    fn release(
        &mut self,
        _req: &Request,
        ino: u64,
        _fh: u64,
        _flags: i32,
        _lock_owner: Option<u64>,
        _flush: bool,
        reply: ReplyEmpty,
    ) {
        if let Some(path) = self.inodes.path(ino) {
            let _ = self.fs.release(path);
        }
        reply.ok();
    }

    fn readdir(
        &mut self,
        _req: &Request,
        ino: u64,
        _fh: u64,
        offset: i64,
        mut reply: ReplyDirectory,
    ) {
        let path = match self.path_of(ino) {
            Ok(path) => path,
            Err(errno) => {
                reply.error(errno);
                return;
            }
        };
        let names = match self.fs.list(&path) {
            Ok(names) => names,
            Err(err) => {
                reply.error(err.errno());
                return;
            }
        };

        for (i, name) in names.iter().enumerate().skip(offset.max(0) as usize) {
            let (entry_ino, kind) = match name.as_str() {
                "." => (ino, FileType::Directory),
                ".." => {
                    let parent = parent_path(&path).to_string();
                    (self.inodes.get_or_alloc(&parent), FileType::Directory)
                }
                _ => {
                    let child = child_path(&path, name);
                    let Some(kind) = self.kind_of(&child) else {
                        continue;
                    };
                    (self.inodes.get_or_alloc(&child), kind)
                }
            };
            if reply.add(entry_ino, (i + 1) as i64, kind, name) {
                break;
            }
        }
        reply.ok();
    }

    fn create(
        &mut self,
        req: &Request,
        parent: u64,
        name: &OsStr,
        _mode: u32,
        _umask: u32,
        _flags: i32,
        reply: ReplyCreate,
    ) {
        let result = self.resolve_child(parent, name).and_then(|path| {
            let outcome = self.fs.create(&path).map_err(|e| e.errno())?;
            debug!(path = %path, mirror = ?outcome.mirror, "create");
            self.entry_for(req, &path)
        });
        match result {
            Ok(attr) => {
                let fh = self.alloc_fh();
                reply.created(&self.ttl, &attr, 0, fh, FOPEN_DIRECT_IO)
            }
            Err(errno) => reply.error(errno),
        }
    }
}

/// Mount `fs` at `mount_point` and serve requests until unmounted.
pub fn mount(fs: Arc<MirrorFs>, mount_point: &Path, config: &MountConfig) -> Result<(), ApiError> {
    let mut options = vec![
        MountOption::FSName(config.fs_name.clone()),
        MountOption::Subtype("mirrorfs".to_string()),
        MountOption::RW,
    ];
    if config.allow_other {
        options.push(MountOption::AllowOther);
    }
    if config.auto_unmount {
        options.push(MountOption::AutoUnmount);
    }

    info!(mount_point = %mount_point.display(), fs_name = %config.fs_name, "Mounting filesystem");
    fuser::mount2(MirrorFsFuse::new(fs, config), mount_point, &options)?;
    info!("Filesystem unmounted");
    Ok(())
}
