use sensorfs::{
    NamespaceTree, ReadOrder, SENSORFS_DYNAMIC_FIRST, SENSORFS_ROOT_INO, SensorFs,
};
use vfs::{DirStep, FileMode, FsError, InodeType};

#[test]
fn test_register_then_lookup() {
    let tree = NamespaceTree::new();
    let root = tree.root();

    let gps = tree.create_file(root, "gps", ReadOrder::Storage).unwrap();
    let found = tree.lookup(root, "gps").unwrap();

    assert_eq!(found, gps);
    assert_eq!(tree.metadata(found).unwrap().inode_type, InodeType::File);
}

#[test]
fn test_lookup_length_mismatch() {
    let fs = SensorFs::new();
    fs.init_tree().unwrap();
    let tree = fs.tree();

    assert!(tree.lookup(fs.root(), "lumi").is_ok());
    assert_eq!(tree.lookup(fs.root(), "lumi2"), Err(FsError::NotFound));
    assert_eq!(tree.lookup(fs.root(), "lum"), Err(FsError::NotFound));
}

#[test]
fn test_invalid_names_leave_children_unchanged() {
    let tree = NamespaceTree::new();
    let root = tree.root();

    assert_eq!(
        tree.create_file(root, "", ReadOrder::Storage),
        Err(FsError::InvalidArgument)
    );
    let long_name: String = core::iter::repeat('x').take(129).collect();
    assert_eq!(
        tree.create_file(root, &long_name, ReadOrder::Storage),
        Err(FsError::NameTooLong)
    );

    // 失败的注册没有留下部分状态
    let mut names = Vec::new();
    let mut position = 2;
    tree.read_dir(root, &mut position, |entry| {
        names.push(entry.name.clone());
        DirStep::Continue
    })
    .unwrap();
    assert!(names.is_empty());
}

#[test]
fn test_name_at_bound_is_accepted() {
    let tree = NamespaceTree::new();
    let name: String = core::iter::repeat('y').take(128).collect();
    assert!(tree.create_file(tree.root(), &name, ReadOrder::Storage).is_ok());
}

#[test]
fn test_inode_numbers_distinct_and_partitioned() {
    let fs = SensorFs::new();
    fs.init_tree().unwrap();
    let tree = fs.tree();

    let root_ino = tree.metadata(fs.root()).unwrap().inode_no;
    assert_eq!(root_ino, SENSORFS_ROOT_INO);

    let mut inos = vec![root_ino];
    for name in ["gps", "lumi", "prox", "linaccel"] {
        let handle = tree.lookup(fs.root(), name).unwrap();
        let ino = tree.metadata(handle).unwrap().inode_no;
        // 动态编号位于保留区间之上
        assert!(ino >= SENSORFS_DYNAMIC_FIRST);
        inos.push(ino);
    }
    inos.sort_unstable();
    inos.dedup();
    assert_eq!(inos.len(), 5);
}

#[test]
fn test_duplicate_name_shadowing() {
    let tree = NamespaceTree::new();
    let root = tree.root();

    let older = tree.create_file(root, "dup", ReadOrder::Storage).unwrap();
    let newer = tree.create_file(root, "dup", ReadOrder::Storage).unwrap();
    assert_ne!(older, newer);

    // 后注册者遮蔽先注册者
    assert_eq!(tree.lookup(root, "dup").unwrap(), newer);

    // 两个同名节点都留在目录里
    let mut count = 0;
    let mut position = 2;
    tree.read_dir(root, &mut position, |entry| {
        if entry.name == "dup" {
            count += 1;
        }
        DirStep::Continue
    })
    .unwrap();
    assert_eq!(count, 2);
}

#[test]
fn test_subdirectory_bumps_parent_nlink() {
    let tree = NamespaceTree::new();
    let root = tree.root();
    assert_eq!(tree.metadata(root).unwrap().nlinks, 2);

    let sub = tree
        .create_dir(root, "calibration", FileMode::from_bits_truncate(0o555))
        .unwrap();
    assert_eq!(tree.metadata(root).unwrap().nlinks, 3);
    assert_eq!(tree.metadata(sub).unwrap().nlinks, 2);

    // 子目录下也可以继续注册和解析
    let nested = tree.create_file(sub, "gps", ReadOrder::Storage).unwrap();
    assert_eq!(tree.lookup(sub, "gps").unwrap(), nested);
    // 文件的注册不影响父目录链接数
    assert_eq!(tree.metadata(sub).unwrap().nlinks, 2);
}

#[test]
fn test_symlink_roundtrip() {
    let tree = NamespaceTree::new();
    let root = tree.root();

    let link = tree.create_symlink(root, "latest", "gps").unwrap();
    assert_eq!(tree.readlink(link).unwrap(), "gps");

    let meta = tree.metadata(link).unwrap();
    assert_eq!(meta.inode_type, InodeType::Symlink);
    assert_eq!(meta.size, 3);

    let file = tree.create_file(root, "gps", ReadOrder::Storage).unwrap();
    assert_eq!(tree.readlink(file), Err(FsError::InvalidArgument));
}

#[test]
fn test_lookup_into_file_is_not_found() {
    let tree = NamespaceTree::new();
    let file = tree
        .create_file(tree.root(), "gps", ReadOrder::Storage)
        .unwrap();

    // 文件没有子节点，解析扫描空列表
    assert_eq!(tree.lookup(file, "anything"), Err(FsError::NotFound));
}

#[test]
fn test_register_under_file_is_rejected() {
    let tree = NamespaceTree::new();
    let file = tree
        .create_file(tree.root(), "gps", ReadOrder::Storage)
        .unwrap();

    assert_eq!(
        tree.create_file(file, "child", ReadOrder::Storage),
        Err(FsError::NotDirectory)
    );
}

#[test]
fn test_read_at_on_directory() {
    let tree = NamespaceTree::new();
    let mut buf = [0u8; 8];
    assert_eq!(
        tree.read_at(tree.root(), 0, &mut buf),
        Err(FsError::IsDirectory)
    );
}

#[test]
fn test_root_metadata() {
    let tree = NamespaceTree::new();
    let meta = tree.metadata(tree.root()).unwrap();

    assert_eq!(meta.inode_no, 0);
    assert_eq!(meta.inode_type, InodeType::Directory);
    assert!(meta.mode.contains(FileMode::S_IFDIR));
    assert!(meta.mode.can_read());
    assert!(!meta.mode.can_write());
    assert_eq!(meta.uid, 0);
    assert_eq!(meta.gid, 0);
}
