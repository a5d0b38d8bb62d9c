//! 可定位二叉最小堆
//!
//! 每个元素插入时获得一个 [`Locator`]，堆内任何交换都会同步更新定位器指向的
//! 数组下标，因此外部可以在任意次重排之后按定位器修改元素的键。

use crate::error::{Error, Result};

/// 堆元素定位器
///
/// 只在签发它的那个堆上有意义，不记录来源堆；交给别的堆使用的结果无定义。
/// 同一个堆内定位器永不复用，取出后的定位器总是报 `StaleLocator`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locator(usize);

/// 堆数组中的一项
#[derive(Debug, Clone)]
struct Entry<T> {
    item: T,
    locator: Locator,
}

/// 可定位最小堆
///
/// 元素只需 `PartialOrd`；相等元素之间不做额外排序，先后只取决于数组位置。
///
/// 定位器表随插入次数增长、取出时不回收，适合作为单次算法运行的临时结构，
/// 不适合长期反复插入删除。
#[derive(Debug, Clone)]
pub struct AdaptableHeap<T> {
    /// 满足堆序的数组
    entries: Vec<Entry<T>>,
    /// 定位器 -> 当前数组下标（已取出为 None）
    positions: Vec<Option<usize>>,
}

impl<T: PartialOrd> AdaptableHeap<T> {
    /// 创建空堆
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            positions: Vec::new(),
        }
    }

    /// 创建指定容量的空堆
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            positions: Vec::with_capacity(capacity),
        }
    }

    /// 自底向上建堆，定位器按输入顺序分配
    pub fn from_vec(items: Vec<T>) -> Self {
        let positions = (0..items.len()).map(Some).collect();
        let entries = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| Entry {
                item,
                locator: Locator(i),
            })
            .collect();
        let mut heap = Self { entries, positions };

        if heap.entries.len() > 1 {
            for j in (0..=Self::parent(heap.entries.len() - 1)).rev() {
                heap.downheap(j);
            }
        }
        heap
    }

    /// 元素个数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 插入元素，从末尾上浮
    pub fn insert(&mut self, item: T) -> Locator {
        let locator = Locator(self.positions.len());
        let index = self.entries.len();
        self.positions.push(Some(index));
        self.entries.push(Entry { item, locator });
        self.upheap(index);
        locator
    }

    /// 查看最小元素
    pub fn peek(&self) -> Result<&T> {
        self.entries
            .first()
            .map(|entry| &entry.item)
            .ok_or(Error::EmptyHeap)
    }

    /// 取出最小元素
    pub fn pop(&mut self) -> Result<T> {
        self.pop_with_locator().map(|(_, item)| item)
    }

    /// 取出最小元素及其定位器，之后该定位器失效
    pub fn pop_with_locator(&mut self) -> Result<(Locator, T)> {
        if self.entries.is_empty() {
            return Err(Error::EmptyHeap);
        }
        let last = self.entries.len() - 1;
        self.swap(0, last);

        let entry = self.entries.pop().ok_or(Error::EmptyHeap)?;
        self.positions[entry.locator.0] = None;

        if !self.entries.is_empty() {
            self.downheap(0);
        }
        Ok((entry.locator, entry.item))
    }

    /// 按定位器替换元素并恢复堆序
    pub fn update(&mut self, locator: Locator, item: T) -> Result<()> {
        let index = self.position(locator)?;
        self.entries[index].item = item;
        self.reheapify(index);
        Ok(())
    }

    /// 按定位器查看元素
    pub fn get(&self, locator: Locator) -> Option<&T> {
        let index = self.position(locator).ok()?;
        self.entries.get(index).map(|entry| &entry.item)
    }

    /// 定位器指向的元素是否仍在堆中
    pub fn contains(&self, locator: Locator) -> bool {
        self.position(locator).is_ok()
    }

    fn position(&self, locator: Locator) -> Result<usize> {
        self.positions
            .get(locator.0)
            .copied()
            .flatten()
            .ok_or(Error::StaleLocator(locator.0))
    }

    fn parent(j: usize) -> usize {
        (j - 1) / 2
    }

    fn left(j: usize) -> usize {
        2 * j + 1
    }

    fn right(j: usize) -> usize {
        2 * j + 2
    }

    fn less(&self, i: usize, j: usize) -> bool {
        self.entries[i].item < self.entries[j].item
    }

    /// 交换两项，同时改写双方的定位器下标
    fn swap(&mut self, i: usize, j: usize) {
        self.entries.swap(i, j);
        self.positions[self.entries[i].locator.0] = Some(i);
        self.positions[self.entries[j].locator.0] = Some(j);
    }

    fn upheap(&mut self, mut j: usize) {
        while j > 0 {
            let parent = Self::parent(j);
            if !self.less(j, parent) {
                break;
            }
            self.swap(j, parent);
            j = parent;
        }
    }

    fn downheap(&mut self, mut j: usize) {
        let len = self.entries.len();
        loop {
            let left = Self::left(j);
            if left >= len {
                break;
            }
            let mut child = left;
            let right = Self::right(j);
            if right < len && self.less(right, left) {
                child = right;
            }
            if !self.less(child, j) {
                break;
            }
            self.swap(j, child);
            j = child;
        }
    }

    /// 单个键变化后只需一个方向的修复
    fn reheapify(&mut self, j: usize) {
        if j > 0 && self.less(j, Self::parent(j)) {
            self.upheap(j);
        } else {
            self.downheap(j);
        }
    }
}

impl<T: PartialOrd> Default for AdaptableHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}
