//! 命名空间树 - 目录项 arena 与注册 / 解析 / 遍历操作
//!
//! 树对所有节点拥有唯一所有权（arena），结构性读写全部由一把
//! 全局自旋锁串行化：注册时的重名扫描与插入、每一次名称解析扫描、
//! 目录遍历的每一步推进。锁绝不跨越调用者提供的 emit 回调持有。
//!
//! 子节点按注册顺序存放，遍历与解析都按"最新注册者优先"的顺序
//! 进行，因此重名时后注册的节点会遮蔽先注册的节点。

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use sync::SpinLock;
use vfs::{DirEntry, DirStep, FileMode, FsError, InodeMetadata, InodeType, ReadDirStatus};

use crate::content::{ContentBuffer, ReadOrder};
use crate::entry::{EntryHandle, Node, NodeContent, validate_name};
use crate::inum::InumAllocator;

/// 普通文件节点的默认权限（只读）
const SENSORFS_DEFAULT_MODE: u32 = 0o444;

/// 节点 arena：所有节点的唯一属主，句柄即槽位索引
struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    fn node(&self, handle: EntryHandle) -> Result<&Node, FsError> {
        self.nodes.get(handle.index()).ok_or(FsError::InvalidArgument)
    }

    fn node_mut(&mut self, handle: EntryHandle) -> Result<&mut Node, FsError> {
        self.nodes
            .get_mut(handle.index())
            .ok_or(FsError::InvalidArgument)
    }

    /// 校验句柄指向目录后返回节点
    fn dir_node(&self, handle: EntryHandle) -> Result<&Node, FsError> {
        let node = self.node(handle)?;
        match node.content {
            NodeContent::Directory(_) => Ok(node),
            _ => Err(FsError::NotDirectory),
        }
    }

    /// 按"最新注册优先"顺序取目录的第 `n` 个子节点
    fn nth_newest(&self, dir: &Node, n: usize) -> Option<EntryHandle> {
        dir.children().iter().rev().nth(n).copied()
    }
}

/// 命名空间树
///
/// 根节点在 [`NamespaceTree::new`] 中一次性建立，随树一起销毁；
/// 动态节点一经注册即在树的生命周期内永久存在，没有注销路径。
pub struct NamespaceTree {
    arena: SpinLock<Arena>,
    inum: InumAllocator,
}

impl NamespaceTree {
    /// 创建只含根节点的空树
    pub fn new() -> Self {
        NamespaceTree {
            arena: SpinLock::new(Arena {
                nodes: alloc::vec![Node::new_root()],
            }),
            inum: InumAllocator::new(),
        }
    }

    /// 根节点句柄
    pub fn root(&self) -> EntryHandle {
        EntryHandle::ROOT
    }

    /// 在 `parent` 下注册一个普通文件节点
    ///
    /// 名称校验失败时立即返回，不产生任何部分状态。
    pub fn create_file(
        &self,
        parent: EntryHandle,
        name: &str,
        order: ReadOrder,
    ) -> Result<EntryHandle, FsError> {
        validate_name(name)?;
        let node = Node {
            name: String::from(name),
            ino: 0,
            mode: FileMode::S_IFREG | FileMode::from_bits_truncate(SENSORFS_DEFAULT_MODE),
            uid: 0,
            gid: 0,
            nlink: 1,
            parent,
            content: NodeContent::File(Arc::new(ContentBuffer::new(order))),
        };
        self.register(parent, node)
    }

    /// 在 `parent` 下注册一个子目录节点
    pub fn create_dir(
        &self,
        parent: EntryHandle,
        name: &str,
        mode: FileMode,
    ) -> Result<EntryHandle, FsError> {
        validate_name(name)?;
        let node = Node {
            name: String::from(name),
            ino: 0,
            mode: (mode - FileMode::S_IFMT) | FileMode::S_IFDIR,
            uid: 0,
            gid: 0,
            nlink: 2,
            parent,
            content: NodeContent::Directory(Vec::new()),
        };
        self.register(parent, node)
    }

    /// 在 `parent` 下注册一个符号链接节点
    pub fn create_symlink(
        &self,
        parent: EntryHandle,
        name: &str,
        target: &str,
    ) -> Result<EntryHandle, FsError> {
        validate_name(name)?;
        let node = Node {
            name: String::from(name),
            ino: 0,
            mode: FileMode::S_IFLNK | FileMode::from_bits_truncate(0o777),
            uid: 0,
            gid: 0,
            nlink: 1,
            parent,
            content: NodeContent::Symlink(String::from(target)),
        };
        self.register(parent, node)
    }

    /// 把一个构造好的节点挂到 `parent` 下
    ///
    /// 编号分配失败时节点直接丢弃，arena 不消耗槽位；
    /// 之后的失败不会归还已分配的编号（接受的泄漏，树中无注销路径）。
    fn register(&self, parent: EntryHandle, mut node: Node) -> Result<EntryHandle, FsError> {
        node.ino = self.inum.allocate()?;

        // 按 mode 分类：目录会增加父目录的链接数；
        // 普通文件必须在注册前就挂好内容缓冲区；
        // 其余类型到达此处属于程序不变量被破坏
        let file_type = node.mode.file_type();
        let is_dir = if file_type == FileMode::S_IFDIR {
            true
        } else if file_type == FileMode::S_IFLNK {
            false
        } else if file_type == FileMode::S_IFREG {
            assert!(
                matches!(node.content, NodeContent::File(_)),
                "sensorfs: regular file registered without content buffer"
            );
            false
        } else {
            unreachable!("sensorfs: unsupported mode {:?}", node.mode)
        };

        let mut arena = self.arena.lock();

        // 重名扫描：同长度且逐字节相等。只发告警不拒绝，
        // 插入后新节点会遮蔽旧节点（最新注册者优先）
        for &child in arena.dir_node(parent)?.children() {
            let existing = arena.node(child)?;
            if existing.name.len() == node.name.len()
                && existing.name.as_bytes() == node.name.as_bytes()
            {
                log::warn!(
                    "sensorfs: entry '{}/{}' already registered",
                    arena.node(parent)?.name,
                    node.name
                );
                break;
            }
        }

        let handle = EntryHandle::from_index(arena.nodes.len());
        node.parent = parent;
        arena.nodes.push(node);

        let parent_node = arena.node_mut(parent)?;
        if is_dir {
            parent_node.nlink += 1;
        }
        if let NodeContent::Directory(children) = &mut parent_node.content {
            children.push(handle);
        }
        Ok(handle)
    }

    /// 在目录 `dir` 下解析一个路径分量
    ///
    /// 在全局树锁下按"最新注册者优先"的顺序扫描子节点；
    /// 长度不同直接短路，不做字节比较。文件和符号链接没有子节点，
    /// 对它们解析任何名称都得到 [`FsError::NotFound`]。
    ///
    /// 未命中的结果不可被任何一侧缓存：两次调用之间树可能变化，
    /// 且不会发出任何失效信号。解析不会改变树。
    pub fn lookup(&self, dir: EntryHandle, name: &str) -> Result<EntryHandle, FsError> {
        let arena = self.arena.lock();
        for &child in arena.node(dir)?.children().iter().rev() {
            let node = arena.node(child)?;
            if node.name.len() != name.len() {
                continue;
            }
            if node.name.as_bytes() == name.as_bytes() {
                return Ok(child);
            }
        }
        Err(FsError::NotFound)
    }

    /// 节点元数据快照
    pub fn metadata(&self, handle: EntryHandle) -> Result<InodeMetadata, FsError> {
        let arena = self.arena.lock();
        let node = arena.node(handle)?;
        Ok(InodeMetadata {
            inode_no: node.ino,
            inode_type: node.kind(),
            mode: node.mode,
            uid: node.uid,
            gid: node.gid,
            size: node.size(),
            nlinks: node.nlink,
        })
    }

    /// 读取符号链接的目标路径
    pub fn readlink(&self, handle: EntryHandle) -> Result<String, FsError> {
        let arena = self.arena.lock();
        match &arena.node(handle)?.content {
            NodeContent::Symlink(target) => Ok(target.clone()),
            _ => Err(FsError::InvalidArgument),
        }
    }

    /// 从文件内容缓冲区的 `offset` 处读取字节到 `buf`
    ///
    /// 内容的 Arc 在树锁下取出，实际拷贝只在缓冲区自己的锁下进行，
    /// 因此内容读取与树的结构操作互不阻塞。
    pub fn read_at(
        &self,
        handle: EntryHandle,
        offset: usize,
        buf: &mut [u8],
    ) -> Result<usize, FsError> {
        let content = {
            let arena = self.arena.lock();
            match &arena.node(handle)?.content {
                NodeContent::File(buffer) => buffer.clone(),
                NodeContent::Directory(_) => return Err(FsError::IsDirectory),
                NodeContent::Symlink(_) => return Err(FsError::InvalidArgument),
            }
        };
        Ok(content.read_at(offset, buf))
    }

    /// 向文件内容缓冲区追加一条读数（生产者侧接口）
    pub fn append(&self, handle: EntryHandle, bytes: &[u8]) -> Result<(), FsError> {
        let content = {
            let arena = self.arena.lock();
            match &arena.node(handle)?.content {
                NodeContent::File(buffer) => buffer.clone(),
                NodeContent::Directory(_) => return Err(FsError::IsDirectory),
                NodeContent::Symlink(_) => return Err(FsError::InvalidArgument),
            }
        };
        content.append(bytes);
        Ok(())
    }

    /// 从整数游标 `position` 开始枚举目录 `dir` 的内容
    ///
    /// 位置 0 和 1 分别产出合成的 `.` 与 `..`；从位置 2 开始按
    /// "最新注册者优先"的顺序产出子节点。每一步都在树锁下从头
    /// 重新推导目标（代价与目录大小成平方关系），绝不保存节点引用，
    /// 也绝不在持锁状态下调用 `emit`。
    ///
    /// `emit` 返回 [`DirStep::Stop`] 时立即停止，`position` 停留在
    /// 当前记录上，之后可以从同一位置继续（并会重新观察该记录）。
    /// 两步之间树可能发生结构变化，枚举不提供时间点一致性。
    pub fn read_dir<F>(
        &self,
        dir: EntryHandle,
        position: &mut u64,
        mut emit: F,
    ) -> Result<ReadDirStatus, FsError>
    where
        F: FnMut(&DirEntry) -> DirStep,
    {
        if *position == 0 {
            let record = {
                let arena = self.arena.lock();
                let node = arena.dir_node(dir)?;
                DirEntry {
                    name: String::from("."),
                    position: 0,
                    inode_no: node.ino,
                    inode_type: InodeType::Directory,
                }
            };
            if emit(&record) == DirStep::Stop {
                return Ok(ReadDirStatus::Stopped);
            }
            *position = 1;
        }

        if *position == 1 {
            let record = {
                let arena = self.arena.lock();
                let node = arena.dir_node(dir)?;
                DirEntry {
                    name: String::from(".."),
                    position: 1,
                    inode_no: arena.node(node.parent)?.ino,
                    inode_type: InodeType::Directory,
                }
            };
            if emit(&record) == DirStep::Stop {
                return Ok(ReadDirStatus::Stopped);
            }
            *position = 2;
        }

        loop {
            let record = {
                let arena = self.arena.lock();
                let node = arena.dir_node(dir)?;
                let skip = (*position - 2) as usize;
                match arena.nth_newest(node, skip) {
                    // 走到子节点列表末尾是唯一的终止条件
                    None => return Ok(ReadDirStatus::Complete),
                    Some(child) => {
                        let child_node = arena.node(child)?;
                        DirEntry {
                            name: child_node.name.clone(),
                            position: *position,
                            inode_no: child_node.ino,
                            inode_type: child_node.kind(),
                        }
                    }
                }
            };
            // emit 可能阻塞或向调用方存储拷贝，锁已在此之前释放
            if emit(&record) == DirStep::Stop {
                return Ok(ReadDirStatus::Stopped);
            }
            *position += 1;
        }
    }
}
