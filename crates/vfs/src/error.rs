//! VFS 错误类型
//!
//! 定义了与 POSIX 兼容的文件系统错误码，可通过 [`FsError::to_errno()`] 转换为系统调用错误码。
//! 只保留 sensorfs 实际会产生的错误码。

/// VFS 错误类型
///
/// 各错误码对应标准 POSIX errno 值。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    // 文件/目录相关
    /// 文件不存在 (-ENOENT)
    NotFound,
    /// 不是目录 (-ENOTDIR)
    NotDirectory,
    /// 是目录 (-EISDIR)
    IsDirectory,

    // 权限相关
    /// 权限被拒绝 (-EACCES)
    PermissionDenied,

    // 参数相关
    /// 无效参数 (-EINVAL)
    InvalidArgument,
    /// 文件名过长 (-ENAMETOOLONG)
    NameTooLong,

    // 文件系统相关
    /// 编号空间耗尽 (-ENOSPC)
    NoSpace,
    /// I/O 错误 (-EIO)
    IoError,

    // 其他
    /// 操作不支持 (-ENOTSUP)
    NotSupported,
}

impl FsError {
    /// 转换为系统调用错误码（负数）
    pub fn to_errno(&self) -> isize {
        match self {
            FsError::NotFound => -2,
            FsError::IoError => -5,
            FsError::PermissionDenied => -13,
            FsError::NotDirectory => -20,
            FsError::IsDirectory => -21,
            FsError::InvalidArgument => -22,
            FsError::NoSpace => -28,
            FsError::NameTooLong => -36,
            FsError::NotSupported => -95,
        }
    }
}
