//! 宿主接口类型层
//!
//! 定义 sensorfs 与宿主虚拟文件系统之间交换的数据类型：
//!
//! - [`FsError`] - POSIX 兼容的错误码
//! - [`FileMode`] - 文件类型与权限位
//! - [`InodeType`] / [`InodeMetadata`] - 节点类型与元数据快照
//! - [`DirEntry`] / [`DirStep`] / [`ReadDirStatus`] - 目录遍历的 emit 契约
//!
//! 超级块、挂载点与 inode 缓存等宿主生命周期不在本层范围内，
//! 宿主只通过这些类型与 sensorfs 的核心交互。

#![no_std]
#![allow(clippy::module_inception)]

extern crate alloc;

mod error;
mod inode;

// Re-export error
pub use error::FsError;

// Re-export inode
pub use inode::{DirEntry, DirStep, FileMode, InodeMetadata, InodeType, ReadDirStatus};
