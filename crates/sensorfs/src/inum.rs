//! inode 编号分配器
//!
//! 静态区间 `[0, SENSORFS_DYNAMIC_FIRST)` 保留给固定节点（根节点为 0），
//! 动态注册的节点从 `[SENSORFS_DYNAMIC_FIRST, u32::MAX]` 取号，
//! 两个区间永不重叠。

use alloc::collections::BTreeSet;

use sync::SpinLock;
use vfs::FsError;

/// 动态 inode 编号区间的起点
pub const SENSORFS_DYNAMIC_FIRST: u32 = 0xF000_0000;

/// 内部编号池：单调递增计数器 + 有序空闲集合，总是优先取最小可用编号
struct IdPool {
    next: u32,
    free: BTreeSet<u32>,
}

impl IdPool {
    const fn new() -> Self {
        IdPool {
            next: 0,
            free: BTreeSet::new(),
        }
    }

    fn draw(&mut self) -> u32 {
        if let Some(&id) = self.free.iter().next() {
            self.free.remove(&id);
            return id;
        }
        let id = self.next;
        self.next += 1;
        id
    }

    fn release(&mut self, id: u32) {
        self.free.insert(id);
    }
}

/// 动态 inode 编号分配器
///
/// 分配出的编号已经偏移进动态区间。编号空间耗尽时分配失败，
/// 取出的原始编号会被对称地放回池中；注册流程后续步骤的失败
/// 不会触发放回（沿用原设计接受的泄漏，树中也不存在注销路径）。
pub struct InumAllocator {
    pool: SpinLock<IdPool>,
}

impl InumAllocator {
    /// 创建一个空的分配器
    pub const fn new() -> Self {
        InumAllocator {
            pool: SpinLock::new(IdPool::new()),
        }
    }

    /// 分配下一个动态 inode 编号
    ///
    /// 原始编号偏移进动态区间后若超出 u32 可表示范围，
    /// 将原始编号放回池中并返回 [`FsError::NoSpace`]。
    pub fn allocate(&self) -> Result<u32, FsError> {
        let raw = self.pool.lock().draw();

        if raw > u32::MAX - SENSORFS_DYNAMIC_FIRST {
            // 对称回滚：只有在区间检查这一步失败时放回
            self.pool.lock().release(raw);
            return Err(FsError::NoSpace);
        }
        Ok(SENSORFS_DYNAMIC_FIRST + raw)
    }

    /// 从指定原始编号开始分配 (仅用于测试)
    #[cfg(test)]
    fn with_next(next: u32) -> Self {
        InumAllocator {
            pool: SpinLock::new(IdPool {
                next,
                free: BTreeSet::new(),
            }),
        }
    }
}
