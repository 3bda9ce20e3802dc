//! 目录项节点定义
//!
//! 所有节点由 [`crate::NamespaceTree`] 的 arena 独占持有，外部通过
//! [`EntryHandle`] 这种可拷贝的稳定索引访问。父节点与子节点之间的
//! 链接全部是句柄（只用于查找，不延长生命周期），不存在侵入式指针。

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use vfs::{FileMode, FsError, InodeType};

use crate::content::ContentBuffer;

/// 文件名最大长度（字节）
pub const NAME_MAX: usize = 128;

/// 根节点的保留 inode 编号
pub const SENSORFS_ROOT_INO: u32 = 0;

/// 根节点的保留名称
pub const SENSORFS_ROOT_NAME: &str = "/sensorfs";

/// 目录项句柄 - 指向节点 arena 的稳定索引
///
/// 句柄只能由创建该节点的 [`crate::NamespaceTree`] 产出；
/// 它不承载所有权，节点在树的生命周期内永久有效。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryHandle(u32);

impl EntryHandle {
    /// 根节点句柄（arena 的 0 号槽位）
    pub(crate) const ROOT: EntryHandle = EntryHandle(0);

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> EntryHandle {
        EntryHandle(index as u32)
    }
}

/// 节点的内容形态，决定了节点可用的操作集合
///
/// 文件和符号链接不持有子节点，对它们做子项解析会扫描空列表。
pub(crate) enum NodeContent {
    /// 目录（子节点句柄，按注册顺序存放，遍历时最新注册者优先）
    Directory(Vec<EntryHandle>),
    /// 普通文件（定容内容缓冲区，自带独立锁）
    File(Arc<ContentBuffer>),
    /// 符号链接（目标路径）
    Symlink(String),
}

/// 树中的一个目录项节点
pub(crate) struct Node {
    /// 名称（字节序列，长度由 String 显式携带，上限 [`NAME_MAX`]）
    pub(crate) name: String,
    /// inode 编号，全树唯一
    pub(crate) ino: u32,
    /// 类型与权限位
    pub(crate) mode: FileMode,
    /// 属主用户 ID（未设置时为 0）
    pub(crate) uid: u32,
    /// 属主组 ID（未设置时为 0）
    pub(crate) gid: u32,
    /// 硬链接数；目录下每注册一个子目录，父目录加一
    pub(crate) nlink: u32,
    /// 父节点句柄；根节点的父节点是它自己
    pub(crate) parent: EntryHandle,
    /// 内容形态
    pub(crate) content: NodeContent,
}

impl Node {
    /// 构造根节点（ino 0，`/sensorfs`，0o555 目录，nlink 2）
    pub(crate) fn new_root() -> Self {
        Node {
            name: String::from(SENSORFS_ROOT_NAME),
            ino: SENSORFS_ROOT_INO,
            mode: FileMode::S_IFDIR | FileMode::from_bits_truncate(0o555),
            uid: 0,
            gid: 0,
            nlink: 2,
            parent: EntryHandle::ROOT,
            content: NodeContent::Directory(Vec::new()),
        }
    }

    /// 节点类型
    pub(crate) fn kind(&self) -> InodeType {
        match self.content {
            NodeContent::Directory(_) => InodeType::Directory,
            NodeContent::File(_) => InodeType::File,
            NodeContent::Symlink(_) => InodeType::Symlink,
        }
    }

    /// 节点的子节点句柄；文件和符号链接没有子节点，返回空切片
    pub(crate) fn children(&self) -> &[EntryHandle] {
        match &self.content {
            NodeContent::Directory(children) => children,
            _ => &[],
        }
    }

    /// 对外呈现的文件大小
    pub(crate) fn size(&self) -> usize {
        match &self.content {
            NodeContent::Directory(_) => 0,
            NodeContent::File(buffer) => buffer.capacity(),
            NodeContent::Symlink(target) => target.len(),
        }
    }
}

/// 校验待注册的名称：空名称与超长名称在分配任何状态之前被拒绝
pub(crate) fn validate_name(name: &str) -> Result<(), FsError> {
    if name.is_empty() {
        return Err(FsError::InvalidArgument);
    }
    if name.len() > NAME_MAX {
        return Err(FsError::NameTooLong);
    }
    Ok(())
}
