//! SensorFS 文件系统对象与进程级生命周期
//!
//! 固定的初始命名空间在 [`SensorFs::init_tree`] 中建立：
//! 根目录下注册四个传感器读数文件。进程级单例通过显式的
//! [`init`] / [`teardown`] 管理，没有加载期副作用。

use alloc::sync::Arc;

use lazy_static::lazy_static;
use sync::SpinLock;
use vfs::FsError;

use crate::content::ReadOrder;
use crate::entry::EntryHandle;
use crate::tree::NamespaceTree;

/// GPS 读数源的保留文件名
pub const SENSORFS_GPS_FILENAME: &str = "gps";
/// 光照度读数源的保留文件名
pub const SENSORFS_LUMI_FILENAME: &str = "lumi";
/// 接近传感器读数源的保留文件名
pub const SENSORFS_PROX_FILENAME: &str = "prox";
/// 线性加速度读数源的保留文件名
pub const SENSORFS_LINACCEL_FILENAME: &str = "linaccel";

/// 固定初始文件集，按注册顺序排列
const SENSOR_FILENAMES: [&str; 4] = [
    SENSORFS_GPS_FILENAME,
    SENSORFS_LUMI_FILENAME,
    SENSORFS_PROX_FILENAME,
    SENSORFS_LINACCEL_FILENAME,
];

/// SensorFS 文件系统对象（提供 `/sensorfs` 目录树）。
pub struct SensorFs {
    tree: NamespaceTree,
}

impl SensorFs {
    /// 创建新的 SensorFS 实例，只含根目录
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            tree: NamespaceTree::new(),
        })
    }

    /// 初始化固定的命名空间内容
    ///
    /// 在根目录下按 gps、lumi、prox、linaccel 的顺序注册四个
    /// 传感器读数文件，每个文件持有自己的内容缓冲区。
    pub fn init_tree(&self) -> Result<(), FsError> {
        let root = self.tree.root();
        for name in SENSOR_FILENAMES {
            self.tree.create_file(root, name, ReadOrder::Storage)?;
        }
        Ok(())
    }

    /// 命名空间树
    pub fn tree(&self) -> &NamespaceTree {
        &self.tree
    }

    /// 根节点句柄
    pub fn root(&self) -> EntryHandle {
        self.tree.root()
    }

    /// 向名为 `name` 的传感器文件追加一条读数（生产者侧接口）
    pub fn record(&self, name: &str, reading: &[u8]) -> Result<(), FsError> {
        let handle = self.tree.lookup(self.root(), name)?;
        self.tree.append(handle, reading)
    }
}

lazy_static! {
    /// 进程级单例槽位；只通过显式的 init/teardown 读写
    static ref SENSORFS: SpinLock<Option<Arc<SensorFs>>> = SpinLock::new(None);
}

/// 初始化进程级 SensorFS 单例
///
/// 可重复调用：已初始化时直接返回现有实例。
pub fn init() -> Result<Arc<SensorFs>, FsError> {
    let mut slot = SENSORFS.lock();
    if let Some(fs) = slot.as_ref() {
        return Ok(fs.clone());
    }
    let fs = SensorFs::new();
    fs.init_tree()?;
    *slot = Some(fs.clone());
    Ok(fs)
}

/// 当前的进程级单例（未初始化或已销毁时为 None）
pub fn instance() -> Option<Arc<SensorFs>> {
    SENSORFS.lock().clone()
}

/// 销毁进程级单例
///
/// 释放槽位中的引用；最后一个外部引用消失时整个 arena 随之释放。
pub fn teardown() {
    SENSORFS.lock().take();
}
