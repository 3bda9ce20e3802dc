//! 传感器内容缓冲区
//!
//! 每个普通文件节点持有一个定容字节缓冲区和一把独立的自旋锁。
//! 该锁只保护缓冲区自身的一致性，与全局树锁无关：
//! 内容读取与树的结构操作互不阻塞。

use alloc::vec::Vec;
use core::cmp::min;

use sync::SpinLock;

/// 内容缓冲区的默认容量（字节）
pub const CONTENTS_BUFFER_SIZE: usize = 4096;

/// 缓冲区内容对读者的呈现顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOrder {
    /// 按物理存储顺序呈现平坦字节区间（默认行为）
    Storage,
    /// 按"最旧读数在前"的逻辑环呈现，与物理写入位置无关（可选扩展）
    OldestFirst,
}

/// 写游标与数据区，整体处于缓冲区锁的保护下
struct ContentInner {
    data: Vec<u8>,
    /// 环形写入位置；也是逻辑环中最旧读数所在的偏移
    write_pos: usize,
}

/// 定容内容缓冲区
///
/// 创建时整块清零。读取按字节偏移进行，流式游标的推进是调用方的约定，
/// 缓冲区自身不保存读游标。
pub struct ContentBuffer {
    order: ReadOrder,
    capacity: usize,
    inner: SpinLock<ContentInner>,
}

impl ContentBuffer {
    /// 以默认容量创建缓冲区
    pub fn new(order: ReadOrder) -> Self {
        Self::with_capacity(order, CONTENTS_BUFFER_SIZE)
    }

    /// 以指定容量创建缓冲区
    pub fn with_capacity(order: ReadOrder, capacity: usize) -> Self {
        let mut data = Vec::new();
        data.resize(capacity, 0);
        ContentBuffer {
            order,
            capacity,
            inner: SpinLock::new(ContentInner { data, write_pos: 0 }),
        }
    }

    /// 缓冲区容量（字节）
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 从 `offset` 处读取至多 `buf.len()` 字节，返回实际拷贝的字节数
    ///
    /// 拷贝 `min(buf.len(), capacity - offset)` 字节；
    /// `offset` 达到或超过容量时返回 0。
    pub fn read_at(&self, offset: usize, buf: &mut [u8]) -> usize {
        if offset >= self.capacity {
            return 0;
        }

        let inner = self.inner.lock();
        let count = min(buf.len(), self.capacity - offset);

        match self.order {
            ReadOrder::Storage => {
                buf[..count].copy_from_slice(&inner.data[offset..offset + count]);
            }
            ReadOrder::OldestFirst => {
                // 逻辑视图: data[write_pos..] ++ data[..write_pos]，
                // 最旧的读数出现在文件开头
                let mut view = Vec::new();
                view.resize(self.capacity, 0);
                let older = self.capacity - inner.write_pos;
                view[..older].copy_from_slice(&inner.data[inner.write_pos..]);
                view[older..].copy_from_slice(&inner.data[..inner.write_pos]);
                buf[..count].copy_from_slice(&view[offset..offset + count]);
            }
        }
        count
    }

    /// 在环形写入位置追加一条读数，必要时回绕覆盖最旧的数据
    ///
    /// 超过容量的输入只保留末尾的容量窗口。
    pub fn append(&self, bytes: &[u8]) {
        if self.capacity == 0 {
            return;
        }

        let src = if bytes.len() > self.capacity {
            &bytes[bytes.len() - self.capacity..]
        } else {
            bytes
        };

        let mut inner = self.inner.lock();
        let write_pos = inner.write_pos;
        let first = min(src.len(), self.capacity - write_pos);
        inner.data[write_pos..write_pos + first].copy_from_slice(&src[..first]);
        inner.data[..src.len() - first].copy_from_slice(&src[first..]);
        inner.write_pos = (write_pos + src.len()) % self.capacity;
    }
}
