//! Inode 接口类型 - 节点元数据与目录遍历契约
//!
//! sensorfs 的节点由核心层 arena 独占持有，宿主一侧只能拿到
//! 元数据快照和目录遍历时逐条产出的 [`DirEntry`] 记录。
//!
//! 目录遍历采用"emit 回调"模型：核心每快照出一条记录就调用一次
//! 回调，回调通过 [`DirStep`] 决定继续还是提前停止。

use alloc::string::String;

/// 文件类型
///
/// sensorfs 只会创建这三种节点。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InodeType {
    /// 普通文件
    File,
    /// 目录
    Directory,
    /// 符号链接
    Symlink,
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// 文件权限和类型（与 POSIX 兼容）
    pub struct FileMode: u32 {
        // 文件类型掩码
        /// 文件类型掩码
        const S_IFMT   = 0o170000;
        /// 普通文件
        const S_IFREG  = 0o100000;
        /// 目录
        const S_IFDIR  = 0o040000;
        /// 符号链接
        const S_IFLNK  = 0o120000;

        // 用户权限
        /// 用户读
        const S_IRUSR  = 0o400;
        /// 用户写
        const S_IWUSR  = 0o200;
        /// 用户执行
        const S_IXUSR  = 0o100;

        // 组权限
        /// 组读
        const S_IRGRP  = 0o040;
        /// 组写
        const S_IWGRP  = 0o020;
        /// 组执行
        const S_IXGRP  = 0o010;

        // 其他用户权限
        /// 其他读
        const S_IROTH  = 0o004;
        /// 其他写
        const S_IWOTH  = 0o002;
        /// 其他执行
        const S_IXOTH  = 0o001;
    }
}

impl FileMode {
    /// 检查是否有读权限（暂时只检查用户权限）
    pub fn can_read(&self) -> bool {
        self.contains(FileMode::S_IRUSR)
    }

    /// 检查是否有写权限
    pub fn can_write(&self) -> bool {
        self.contains(FileMode::S_IWUSR)
    }

    /// 检查是否有执行权限
    pub fn can_execute(&self) -> bool {
        self.contains(FileMode::S_IXUSR)
    }

    /// 取出文件类型位
    pub fn file_type(&self) -> FileMode {
        self.intersection(FileMode::S_IFMT)
    }
}

/// 轻量级目录项（目录遍历时逐条 emit）
#[derive(Debug, Clone)]
pub struct DirEntry {
    /// 文件名
    pub name: String,
    /// 该记录对应的遍历位置
    pub position: u64,
    /// Inode 编号
    pub inode_no: u32,
    /// 文件类型
    pub inode_type: InodeType,
}

/// emit 回调的返回值：继续遍历或提前停止
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirStep {
    /// 继续产出下一条记录
    Continue,
    /// 停止遍历，位置停留在当前记录上
    Stop,
}

/// 一次目录遍历调用的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadDirStatus {
    /// 已走到目录末尾
    Complete,
    /// emit 回调要求提前停止，之后可从同一位置继续
    Stopped,
}

/// 文件元数据快照
///
/// sensorfs 节点不记录时间戳，相关字段不在此出现。
#[derive(Debug, Clone)]
pub struct InodeMetadata {
    /// Inode 编号
    pub inode_no: u32,
    /// 文件类型
    pub inode_type: InodeType,
    /// 权限位
    pub mode: FileMode,
    /// 用户 ID
    pub uid: u32,
    /// 组 ID
    pub gid: u32,
    /// 文件大小（字节）
    pub size: usize,
    /// 硬链接数
    pub nlinks: u32,
}
