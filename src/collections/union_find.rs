//! 并查集
//!
//! 扁平数组表示的不相交集合森林：按大小合并，查找时完全路径压缩。
//! 根节点满足 `parent == 自身下标`；`size` 只在根节点上有效。

use crate::error::{Error, Result};
use tracing::trace;

/// 并查集节点句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SetNode(usize);

#[derive(Debug, Clone)]
struct Record<T> {
    item: T,
    parent: usize,
    size: usize,
}

/// 不相交集合森林
#[derive(Debug, Clone)]
pub struct DisjointSet<T> {
    records: Vec<Record<T>>,
    /// 当前集合个数
    sets: usize,
}

impl<T> DisjointSet<T> {
    /// 创建空森林
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            sets: 0,
        }
    }

    /// 创建指定容量的空森林
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            sets: 0,
        }
    }

    /// 新建只含 item 的单元素集合
    pub fn make_set(&mut self, item: T) -> SetNode {
        let index = self.records.len();
        self.records.push(Record {
            item,
            parent: index,
            size: 1,
        });
        self.sets += 1;
        SetNode(index)
    }

    /// 节点总数
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// 是否没有任何节点
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 集合个数
    pub fn set_count(&self) -> usize {
        self.sets
    }

    /// 获取节点携带的元素
    pub fn item(&self, node: SetNode) -> Result<&T> {
        self.records
            .get(node.0)
            .map(|record| &record.item)
            .ok_or(Error::InvalidSetNode(node.0))
    }

    fn validate(&self, node: SetNode) -> Result<usize> {
        if node.0 < self.records.len() {
            Ok(node.0)
        } else {
            Err(Error::InvalidSetNode(node.0))
        }
    }

    /// 查找代表元，并把沿途节点直接挂到代表元下
    pub fn find(&mut self, node: SetNode) -> Result<SetNode> {
        let mut current = self.validate(node)?;
        let mut root = current;
        while self.records[root].parent != root {
            root = self.records[root].parent;
        }

        while self.records[current].parent != root {
            let next = self.records[current].parent;
            self.records[current].parent = root;
            current = next;
        }

        Ok(SetNode(root))
    }

    /// 合并 a、b 所在集合，返回新的代表元
    ///
    /// 已在同一集合时不做任何修改。较小的树挂到较大的树下，大小相同时 a 挂到 b 下。
    pub fn union(&mut self, a: SetNode, b: SetNode) -> Result<SetNode> {
        let ra = self.find(a)?.0;
        let rb = self.find(b)?.0;
        if ra == rb {
            return Ok(SetNode(ra));
        }

        let (child, root) = if self.records[ra].size > self.records[rb].size {
            (rb, ra)
        } else {
            (ra, rb)
        };
        self.records[child].parent = root;
        self.records[root].size += self.records[child].size;
        self.sets -= 1;

        trace!(child, root, size = self.records[root].size, "sets merged");
        Ok(SetNode(root))
    }

    /// a、b 是否在同一集合
    pub fn same_set(&mut self, a: SetNode, b: SetNode) -> Result<bool> {
        Ok(self.find(a)? == self.find(b)?)
    }

    /// node 所在集合的大小
    pub fn size(&mut self, node: SetNode) -> Result<usize> {
        let root = self.find(node)?;
        Ok(self.records[root.0].size)
    }
}

impl<T> Default for DisjointSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parents<T>(set: &DisjointSet<T>) -> Vec<usize> {
        set.records.iter().map(|r| r.parent).collect()
    }

    #[test]
    fn test_make_set() {
        let mut set = DisjointSet::new();
        let a = set.make_set("a");
        let b = set.make_set("b");

        assert_eq!(set.len(), 2);
        assert_eq!(set.set_count(), 2);
        assert_eq!(set.find(a).unwrap(), a);
        assert_eq!(set.size(b).unwrap(), 1);
        assert_eq!(*set.item(b).unwrap(), "b");
        assert!(!set.same_set(a, b).unwrap());
    }

    #[test]
    fn test_union_by_size() {
        let mut set = DisjointSet::new();
        let nodes: Vec<SetNode> = (0..5).map(|i| set.make_set(i)).collect();

        // 大小相同：前者挂到后者下
        let r = set.union(nodes[0], nodes[1]).unwrap();
        assert_eq!(r, nodes[1]);

        // 较小的集合挂到较大的下
        let r = set.union(nodes[1], nodes[2]).unwrap();
        assert_eq!(r, nodes[1]);
        let r = set.union(nodes[3], nodes[0]).unwrap();
        assert_eq!(r, nodes[1]);

        assert_eq!(set.size(nodes[3]).unwrap(), 4);
        assert_eq!(set.size(nodes[4]).unwrap(), 1);
        assert_eq!(set.set_count(), 2);
        assert!(set.same_set(nodes[0], nodes[3]).unwrap());
        assert!(!set.same_set(nodes[0], nodes[4]).unwrap());
    }

    #[test]
    fn test_union_idempotent() {
        let mut set = DisjointSet::new();
        let a = set.make_set('a');
        let b = set.make_set('b');
        let c = set.make_set('c');
        set.union(b, c).unwrap();

        let first = set.union(a, b).unwrap();
        assert_eq!(set.find(a).unwrap(), set.find(b).unwrap());
        let shape = parents(&set);
        let count = set.set_count();

        let second = set.union(a, b).unwrap();
        assert_eq!(first, second);
        assert_eq!(set.find(a).unwrap(), set.find(b).unwrap());
        assert_eq!(parents(&set), shape);
        assert_eq!(set.set_count(), count);
    }

    #[test]
    fn test_path_compression() {
        let mut set = DisjointSet::new();
        let nodes: Vec<SetNode> = (0..4).map(|i| set.make_set(i)).collect();

        // 手工构造一条链 0 -> 1 -> 2 -> 3
        set.records[0].parent = 1;
        set.records[1].parent = 2;
        set.records[2].parent = 3;
        set.records[3].size = 4;
        set.sets = 1;

        assert_eq!(set.find(nodes[0]).unwrap(), nodes[3]);
        assert_eq!(parents(&set), vec![3, 3, 3, 3]);
        assert_eq!(set.size(nodes[1]).unwrap(), 4);
    }

    #[test]
    fn test_invalid_node() {
        let mut set: DisjointSet<()> = DisjointSet::new();
        let mut other = DisjointSet::new();
        other.make_set(());
        let foreign = other.make_set(());

        assert_eq!(set.find(foreign).unwrap_err(), Error::InvalidSetNode(1));
        assert!(set.item(foreign).is_err());
    }
}
