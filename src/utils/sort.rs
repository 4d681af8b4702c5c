use crate::error::{Error, Result};
use crate::utils::datastruct::heap::ArrayHeap;
use crate::utils::datastruct::list::DoubleLinkedList;

/// Top-K selection.
/// `input` の上位 k 件 (大きい方から k 個) を昇順で返す
///
/// The heap never holds more than `k + 1` items: once it is full, an element
/// only gets in if it is strictly greater than the current minimum, which is
/// then evicted. Draining the heap yields the survivors smallest first.
/// `input` is only borrowed; survivors are cloned.
///
/// # Arguments
/// * `k` - 取り出す件数。入力長より大きければ入力長に丸める
/// * `input` - 比較可能な要素の列
///
/// # Returns
/// * `DoubleLinkedList<T>` - 長さ `min(k, input.len())`、昇順
///
/// # Errors
/// * `Error::InvalidArgument` - 自身と比較できない要素 (NaNなど) を含む
pub fn top_k_sort<'a, T, I>(k: usize, input: I) -> Result<DoubleLinkedList<T>>
where
    T: PartialOrd + Clone + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut result = DoubleLinkedList::new();
    if k == 0 {
        return Ok(result);
    }

    let mut heap = ArrayHeap::new();
    for item in input {
        if item.partial_cmp(item).is_none() {
            return Err(Error::InvalidArgument("top-k input is not comparable with itself"));
        }
        if heap.len() < k {
            heap.insert(item.clone())?;
        } else if heap.peek_min()? < item {
            heap.insert(item.clone())?;
            heap.remove_min()?;
        }
    }

    result.extend(heap.into_sorted_vec());
    Ok(result)
}
