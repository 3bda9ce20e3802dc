//! # sensorfs - 只读传感器伪文件系统
//!
//! 本 crate 以纯内存目录树的形式导出一组固定的传感器读数源
//! （gps / lumi / prox / linaccel），供宿主作为特殊文件系统挂载。
//! 客户端可以解析路径分量、枚举目录内容、按偏移读取定长字节缓冲区；
//! 不支持写入、持久化或用户发起的结构变更。
//!
//! ## 结构
//!
//! - [`NamespaceTree`]: arena 式目录项树，注册 / 解析 / 遍历操作
//! - [`InumAllocator`]: 动态 inode 编号分配器
//! - [`ContentBuffer`]: 每个普通文件节点的定容内容缓冲区
//! - [`SensorFs`]: 文件系统对象与进程级单例生命周期
//!
//! ## 并发模型
//!
//! 单一全局自旋锁串行化所有结构性树操作；每个内容缓冲区自带独立的锁，
//! 内容读取与树操作互不阻塞。树锁绝不跨越调用者提供的 emit 回调持有，
//! 因此目录遍历不提供时间点一致性快照。
//!
//! 节点一经注册即在树的生命周期内永久存在，没有注销路径。

#![no_std]
#![allow(clippy::module_inception)]

extern crate alloc;

mod content;
mod entry;
mod inum;
mod sensorfs;
mod tree;

pub use content::{CONTENTS_BUFFER_SIZE, ContentBuffer, ReadOrder};
pub use entry::{EntryHandle, NAME_MAX, SENSORFS_ROOT_INO, SENSORFS_ROOT_NAME};
pub use inum::{InumAllocator, SENSORFS_DYNAMIC_FIRST};
pub use sensorfs::{
    SENSORFS_GPS_FILENAME, SENSORFS_LINACCEL_FILENAME, SENSORFS_LUMI_FILENAME,
    SENSORFS_PROX_FILENAME, SensorFs, init, instance, teardown,
};
pub use tree::NamespaceTree;
