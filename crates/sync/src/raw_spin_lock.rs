//! 自旋锁实现
//!
//! 基于原子操作实现自旋锁机制。

use core::{
    hint,
    sync::atomic::{AtomicBool, Ordering},
};

/// 自旋锁结构体，提供互斥访问临界区的能力。
///
/// 基于原子操作实现自旋锁机制。
/// 不可重入 (即不能嵌套调用 RawSpinLock::lock())。
///
/// # 示例
/// ```ignore
/// let lock = RawSpinLock::new();
/// {
///   let guard = lock.lock(); // 获取锁
///   // 临界区代码
/// } // 离开作用域，自动释放锁
/// ```
#[derive(Debug)]
pub struct RawSpinLock {
    lock: AtomicBool,
}

impl RawSpinLock {
    /// 创建一个新的 RawSpinLock 实例。
    pub const fn new() -> Self {
        RawSpinLock {
            lock: AtomicBool::new(false),
        }
    }

    /// 获取自旋锁，并返回一个 RAII 保护器。
    ///
    /// 锁被占用时忙等，直到获取成功。
    pub fn lock(&self) -> RawSpinLockGuard<'_> {
        while self
            .lock
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            hint::spin_loop();
        }

        RawSpinLockGuard { lock: self }
    }

    /// 尝试获取自旋锁，如果成功则返回 RAII 保护器，否则返回 None。
    pub fn try_lock(&self) -> Option<RawSpinLockGuard<'_>> {
        if self
            .lock
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
        {
            Some(RawSpinLockGuard { lock: self })
        } else {
            None
        }
    }

    /// 仅释放锁标志。
    fn unlock(&self) {
        self.lock.store(false, Ordering::Release);
    }

    /// 检查锁是否被占用 (仅用于调试/测试)
    ///
    /// # 返回值
    /// 锁是否被占用
    #[cfg(test)]
    pub fn is_locked(&self) -> bool {
        self.lock.load(Ordering::Relaxed)
    }
}

/// 自动释放自旋锁的 RAII 结构体
pub struct RawSpinLockGuard<'a> {
    lock: &'a RawSpinLock,
}

impl Drop for RawSpinLockGuard<'_> {
    /// 退出作用域时自动释放自旋锁标志。
    fn drop(&mut self) {
        self.lock.unlock();
    }
}
