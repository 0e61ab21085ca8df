use crate::error::{ScatterError, ScatterResult};

/// Connected components of an undirected graph over `n` particles given as
/// explicit edges (typically the bond table). Returns one label per
/// particle; labels are compact and assigned in order of first appearance,
/// so every isolated particle gets its own label.
pub fn connected_components(n: usize, edges: &[[u32; 2]]) -> ScatterResult<Vec<u32>> {
    let mut parent: Vec<u32> = (0..n as u32).collect();

    fn find(parent: &mut [u32], mut i: u32) -> u32 {
        while parent[i as usize] != i {
            // Path halving keeps the trees shallow.
            parent[i as usize] = parent[parent[i as usize] as usize];
            i = parent[i as usize];
        }
        i
    }

    for edge in edges {
        let [a, b] = *edge;
        if a as usize >= n || b as usize >= n {
            return Err(ScatterError::Mismatch(format!(
                "edge ({a}, {b}) out of range for {n} particles"
            )));
        }
        let ra = find(&mut parent, a);
        let rb = find(&mut parent, b);
        if ra != rb {
            parent[rb as usize] = ra;
        }
    }

    let mut labels = vec![0u32; n];
    let mut next = 0u32;
    let mut relabel = vec![u32::MAX; n];
    for i in 0..n {
        let root = find(&mut parent, i as u32) as usize;
        if relabel[root] == u32::MAX {
            relabel[root] = next;
            next += 1;
        }
        labels[i] = relabel[root];
    }
    Ok(labels)
}
