//! Overlap resolution shared by the sub-extractors and the period extractor.

/// Keep a non-overlapping subset of `items`.
///
/// Longer spans win. Between equally long spans the lower `rank` wins, then
/// the earlier start. The result is in acceptance order, not text order.
pub fn keep_longest<T, B, R>(mut items: Vec<T>, bounds: B, rank: R) -> Vec<T>
where
    B: Fn(&T) -> (usize, usize),
    R: Fn(&T) -> u8,
{
    items.sort_by(|a, b| {
        let (a_start, a_end) = bounds(a);
        let (b_start, b_end) = bounds(b);
        (b_end - b_start)
            .cmp(&(a_end - a_start))
            .then_with(|| rank(a).cmp(&rank(b)))
            .then_with(|| a_start.cmp(&b_start))
    });

    let mut kept: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        let (start, end) = bounds(&item);
        let clashes = kept.iter().any(|k| {
            let (k_start, k_end) = bounds(k);
            start < k_end && k_start < end
        });
        if !clashes {
            kept.push(item);
        }
    }
    kept
}
