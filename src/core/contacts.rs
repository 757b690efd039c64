use std::collections::HashMap;

/// Symmetric index of residue-residue contacts in structural numbering.
/// Built once per chain from unordered pairs; `neighbors` answers with an
/// empty slice for residues without contacts, so lookups never fail.
#[derive(Clone, Debug, Default)]
pub struct ContactIndex {
    neighbors: HashMap<i64, Vec<i64>>,
}

impl ContactIndex {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (i64, i64)>) -> Self {
        let mut neighbors: HashMap<i64, Vec<i64>> = HashMap::new();
        for (a, b) in pairs {
            if a == b {
                continue;
            }
            neighbors.entry(a).or_default().push(b);
            neighbors.entry(b).or_default().push(a);
        }
        for list in neighbors.values_mut() {
            list.sort_unstable();
            list.dedup();
        }
        ContactIndex { neighbors }
    }

    /// Residues in contact with `position`, excluding `position` itself.
    pub fn neighbors(&self, position: i64) -> &[i64] {
        self.neighbors.get(&position).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.neighbors.values().map(Vec::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}
