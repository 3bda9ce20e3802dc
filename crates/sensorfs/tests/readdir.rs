use sensorfs::{NamespaceTree, ReadOrder, SensorFs};
use vfs::{DirEntry, DirStep, InodeType, ReadDirStatus};

/// 收集一次遍历产出的全部记录
fn collect(tree: &NamespaceTree, dir: sensorfs::EntryHandle, position: &mut u64) -> Vec<DirEntry> {
    let mut entries = Vec::new();
    let status = tree
        .read_dir(dir, position, |entry| {
            entries.push(entry.clone());
            DirStep::Continue
        })
        .unwrap();
    assert_eq!(status, ReadDirStatus::Complete);
    entries
}

#[test]
fn test_empty_directory_yields_dot_entries_only() {
    let tree = NamespaceTree::new();
    let mut position = 0;

    let entries = collect(&tree, tree.root(), &mut position);

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, ".");
    assert_eq!(entries[0].position, 0);
    assert_eq!(entries[0].inode_type, InodeType::Directory);
    assert_eq!(entries[1].name, "..");
    assert_eq!(entries[1].position, 1);
    // 根节点的父节点是它自己
    assert_eq!(entries[0].inode_no, entries[1].inode_no);
}

#[test]
fn test_children_in_reverse_registration_order() {
    let tree = NamespaceTree::new();
    let root = tree.root();
    for name in ["a", "b", "c"] {
        tree.create_file(root, name, ReadOrder::Storage).unwrap();
    }

    let mut position = 0;
    let entries = collect(&tree, root, &mut position);
    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();

    assert_eq!(names, [".", "..", "c", "b", "a"]);
}

#[test]
fn test_sensor_files_enumeration() {
    let fs = SensorFs::new();
    fs.init_tree().unwrap();

    // 从位置 2 开始，跳过合成的 . 和 ..
    let mut position = 2;
    let entries = collect(fs.tree(), fs.root(), &mut position);
    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();

    assert_eq!(names, ["linaccel", "prox", "lumi", "gps"]);
    assert!(entries.iter().all(|e| e.inode_type == InodeType::File));
    // 记录携带的位置与遍历游标一致
    assert_eq!(
        entries.iter().map(|e| e.position).collect::<Vec<_>>(),
        [2, 3, 4, 5]
    );
    assert_eq!(position, 6);
}

#[test]
fn test_early_stop_keeps_position() {
    let fs = SensorFs::new();
    fs.init_tree().unwrap();
    let tree = fs.tree();

    let mut position = 0;
    let mut seen = Vec::new();
    let status = tree
        .read_dir(fs.root(), &mut position, |entry| {
            seen.push(entry.name.clone());
            if seen.len() == 3 {
                DirStep::Stop
            } else {
                DirStep::Continue
            }
        })
        .unwrap();

    // 第三条记录（linaccel）被产出后立即停止，位置不越过它
    assert_eq!(status, ReadDirStatus::Stopped);
    assert_eq!(seen, [".", "..", "linaccel"]);
    assert_eq!(position, 2);

    // 从同一位置恢复会重新观察该记录
    let entries = collect(tree, fs.root(), &mut position);
    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["linaccel", "prox", "lumi", "gps"]);
}

#[test]
fn test_stop_on_dot_does_not_advance() {
    let tree = NamespaceTree::new();
    let mut position = 0;

    let status = tree
        .read_dir(tree.root(), &mut position, |_| DirStep::Stop)
        .unwrap();

    assert_eq!(status, ReadDirStatus::Stopped);
    assert_eq!(position, 0);
}

#[test]
fn test_position_past_end_is_complete() {
    let fs = SensorFs::new();
    fs.init_tree().unwrap();

    let mut position = 100;
    let mut emitted = 0;
    let status = fs
        .tree()
        .read_dir(fs.root(), &mut position, |_| {
            emitted += 1;
            DirStep::Continue
        })
        .unwrap();

    assert_eq!(status, ReadDirStatus::Complete);
    assert_eq!(emitted, 0);
    assert_eq!(position, 100);
}

#[test]
fn test_read_dir_on_file_is_rejected() {
    let tree = NamespaceTree::new();
    let file = tree
        .create_file(tree.root(), "gps", ReadOrder::Storage)
        .unwrap();

    let mut position = 0;
    let result = tree.read_dir(file, &mut position, |_| DirStep::Continue);
    assert_eq!(result, Err(vfs::FsError::NotDirectory));
}

#[test]
fn test_entries_registered_between_steps_are_visible() {
    let tree = NamespaceTree::new();
    let root = tree.root();
    tree.create_file(root, "first", ReadOrder::Storage).unwrap();

    // 枚举中途注册的节点出现在后续步骤里：每一步都从头重新推导，
    // 最新注册者优先意味着新节点会被先看到
    let mut position = 2;
    let mut names = Vec::new();
    let mut registered = false;
    tree.read_dir(root, &mut position, |entry| {
        names.push(entry.name.clone());
        if !registered {
            registered = true;
            tree.create_file(root, "second", ReadOrder::Storage).unwrap();
        }
        DirStep::Continue
    })
    .unwrap();

    // 第一步看到 first（当时唯一的节点），第二步重新推导后
    // second 排在最前，位置 3 对应的是被挤到后面的 first
    assert_eq!(names, ["first", "first"]);
}
