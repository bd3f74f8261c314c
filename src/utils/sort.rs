/// Co-sort column indices and their values by ascending column.
/// - Sorts `inds` ascending
/// - Reorders `vals` accordingly
/// - Stable: equal columns keep their original relative order
///
/// Small inputs use insertion sort; larger ones an LSD radix sort
/// with 4 byte passes, each O(n + 256).
#[inline]
pub fn sort_by_index_soa<N: Copy>(inds: &mut [u32], vals: &mut [N]) {
    assert_eq!(inds.len(), vals.len());
    let n = inds.len();
    if n <= 1 {
        return;
    }
    if n <= 32 {
        insertion_sort_soa(inds, vals);
        return;
    }
    radix_sort_soa(inds, vals);
}

fn radix_sort_soa<N: Copy>(inds: &mut [u32], vals: &mut [N]) {
    let mut src: Vec<(u32, N)> = inds.iter().copied().zip(vals.iter().copied()).collect();
    let mut dst: Vec<(u32, N)> = src.clone();

    for shift in [0u32, 8, 16, 24] {
        let mut count = [0usize; 256];
        for &(k, _) in &src {
            count[((k >> shift) & 0xFF) as usize] += 1;
        }
        // skip passes where every key shares the byte
        if count.iter().any(|&c| c == src.len()) {
            continue;
        }

        let mut sum = 0usize;
        for c in count.iter_mut() {
            let tmp = *c;
            *c = sum;
            sum += tmp;
        }

        for &entry in &src {
            let b = ((entry.0 >> shift) & 0xFF) as usize;
            dst[count[b]] = entry;
            count[b] += 1;
        }
        std::mem::swap(&mut src, &mut dst);
    }

    for (pos, (k, v)) in src.into_iter().enumerate() {
        inds[pos] = k;
        vals[pos] = v;
    }
}

fn insertion_sort_soa<N: Copy>(inds: &mut [u32], vals: &mut [N]) {
    for i in 1..inds.len() {
        let mut j = i;
        while j > 0 && inds[j] < inds[j - 1] {
            inds.swap(j, j - 1);
            vals.swap(j, j - 1);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// stable baseline: sort by (key, original_index)
    fn baseline_stable_sort<N: Copy>(inds: &[u32], vals: &[N]) -> (Vec<u32>, Vec<N>) {
        let mut pairs: Vec<(u32, usize, N)> = inds
            .iter()
            .copied()
            .enumerate()
            .map(|(i, k)| (k, i, vals[i]))
            .collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        pairs.into_iter().map(|(k, _, v)| (k, v)).unzip()
    }

    fn assert_sorted(keys: &[u32]) {
        for i in 1..keys.len() {
            assert!(keys[i - 1] <= keys[i], "not sorted at {i}: {} > {}", keys[i - 1], keys[i]);
        }
    }

    /// tiny deterministic PRNG (xorshift32)
    struct Rng(u32);
    impl Rng {
        fn next_u32(&mut self) -> u32 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            self.0 = x;
            x
        }
    }

    #[test]
    fn handles_empty_and_single() {
        let mut inds: Vec<u32> = vec![];
        let mut vals: Vec<f64> = vec![];
        sort_by_index_soa(&mut inds, &mut vals);
        assert!(inds.is_empty());

        let mut inds = vec![42u32];
        let mut vals = vec![0.5f64];
        sort_by_index_soa(&mut inds, &mut vals);
        assert_eq!(inds, vec![42]);
        assert_eq!(vals, vec![0.5]);
    }

    #[test]
    fn keeps_pairing_with_duplicates() {
        let mut inds = vec![3u32, 1, 3, 2, 1, 3, 0];
        let mut vals: Vec<u32> = (0..inds.len() as u32).collect();
        let (base_k, base_v) = baseline_stable_sort(&inds, &vals);

        sort_by_index_soa(&mut inds, &mut vals);

        assert_sorted(&inds);
        assert_eq!(inds, base_k);
        assert_eq!(vals, base_v);
    }

    #[test]
    fn matches_baseline_across_sizes() {
        let mut rng = Rng(0x1234_5678);
        for &n in &[2usize, 3, 31, 32, 33, 64, 129, 1024] {
            let mut inds = Vec::with_capacity(n);
            let mut vals = Vec::with_capacity(n);
            for i in 0..n {
                inds.push(rng.next_u32() & 0x00FF_FFFF);
                vals.push((i as u32) ^ 0xA5A5_5A5A);
            }
            let (base_k, base_v) = baseline_stable_sort(&inds, &vals);

            sort_by_index_soa(&mut inds, &mut vals);

            assert_sorted(&inds);
            assert_eq!(inds, base_k, "keys mismatch at n={n}");
            assert_eq!(vals, base_v, "vals mismatch at n={n}");
        }
    }

    #[test]
    fn extremes() {
        let mut inds: Vec<u32> = vec![0, u32::MAX, 1, u32::MAX - 1, 0, 2, u32::MAX];
        inds.extend((0..40).rev());
        let mut vals: Vec<u32> = (0..inds.len() as u32).collect();
        let (base_k, base_v) = baseline_stable_sort(&inds, &vals);

        sort_by_index_soa(&mut inds, &mut vals);

        assert_eq!(inds, base_k);
        assert_eq!(vals, base_v);
    }
}
