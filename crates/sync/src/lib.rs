//! 同步原语
//!
//! 向 sensorfs 的各个模块提供基本的自旋锁原语。
//!
//! 与内核环境不同，宿主进程没有需要保存和恢复的中断状态，
//! 因此锁的实现只依赖原子操作与忙等，临界区必须保持短小。

#![no_std]

mod raw_spin_lock;
mod spin_lock;

pub use raw_spin_lock::*;
pub use spin_lock::*;
