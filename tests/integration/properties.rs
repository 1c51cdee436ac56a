use super::bare_fs;
use mirrorfs::store::PathStore;
use mirrorfs::tree::mirror::mirror_path;
use mirrorfs::tree::node::Node;
use mirrorfs::FsError;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn segment() -> impl Strategy<Value = String> {
    "[a-z0-9_.-]{1,8}"
}

proptest! {
    #[test]
    fn mirror_is_an_involution_on_two_segments(a in segment(), b in segment()) {
        let path = format!("/{}/{}", a, b);
        let mirrored = mirror_path(&path).unwrap();
        prop_assert_eq!(&mirrored, &format!("/{}/{}", b, a));
        prop_assert_eq!(mirror_path(&mirrored).unwrap(), path);
    }

    #[test]
    fn mirror_moves_first_segment_last(segments in prop::collection::vec(segment(), 2..6)) {
        let path = format!("/{}", segments.join("/"));
        let expected = format!("/{}/{}", segments[1..].join("/"), segments[0]);
        prop_assert_eq!(mirror_path(&path).unwrap(), expected);
    }

    #[test]
    fn store_is_ordered_and_unique(names in prop::collection::vec(segment(), 1..40)) {
        let store = PathStore::new();
        let mut expected = BTreeSet::new();
        for name in &names {
            let path = format!("/{}", name);
            let fresh = expected.insert(path.clone());
            let result = store.insert(Node::file(path.as_str()));
            if fresh {
                prop_assert!(result.is_ok());
            } else {
                prop_assert!(matches!(result, Err(FsError::AlreadyExists)));
            }
        }
        let stored = store.paths();
        prop_assert_eq!(stored, expected.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn both_copies_match_a_flat_model(
        writes in prop::collection::vec((0usize..2048, prop::collection::vec(any::<u8>(), 0..64), any::<bool>()), 1..20)
    ) {
        let fs = bare_fs();
        fs.create("/tag/file").unwrap();

        let mut model: Vec<u8> = Vec::new();
        for (offset, bytes, via_mirror) in &writes {
            let path = if *via_mirror { "/file/tag" } else { "/tag/file" };
            prop_assert_eq!(fs.write(path, bytes, *offset).unwrap(), bytes.len());
            let end = offset + bytes.len();
            if end > model.len() {
                model.resize(end, 0);
            }
            model[*offset..end].copy_from_slice(bytes);
        }

        prop_assert_eq!(fs.attributes("/tag/file").unwrap().size as usize, model.len());
        prop_assert_eq!(fs.read("/tag/file", 4096, 0).unwrap(), model.clone());
        prop_assert_eq!(fs.read("/file/tag", 4096, 0).unwrap(), model);
    }

    #[test]
    fn root_lists_each_top_level_name_once(
        pairs in prop::collection::vec((segment(), segment()), 1..15)
    ) {
        let fs = bare_fs();
        let mut top = BTreeSet::new();
        for (a, b) in &pairs {
            if a == b {
                continue;
            }
            fs.create(&format!("/{}/{}", a, b)).unwrap();
            top.insert(a.clone());
            top.insert(b.clone());
        }
        for name in &top {
            fs.mkdir(&format!("/{}", name)).unwrap();
        }

        let listed = fs.list("/").unwrap();
        prop_assert_eq!(&listed[..2], &[".".to_string(), "..".to_string()]);
        prop_assert_eq!(listed[2..].to_vec(), top.into_iter().collect::<Vec<_>>());
    }
}
