use nalgebra::Vector3;

/// Sorted absolute components of the six generating bond vectors of the classic
/// simple-cubic BFM. Every permutation and sign combination of these is allowed.
const CLASSIC_GENERATORS: [[i32; 3]; 6] = [
    [0, 0, 2],
    [0, 1, 2],
    [1, 1, 2],
    [1, 2, 2],
    [0, 0, 3],
    [0, 1, 3],
];

/// The set of allowed bond vectors between bonded monomers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BondVectorSet {
    vectors: Vec<Vector3<i32>>,
}

impl BondVectorSet {
    /// Builds the 108 bond vectors of the classic BFM bond set.
    ///
    /// The set excludes every vector that would allow two bonds to cross during a local
    /// move, which is what makes the model's topology conserving.
    pub fn bfm_classic() -> Self {
        let mut vectors = Vec::with_capacity(108);
        for x in -3..=3 {
            for y in -3..=3 {
                for z in -3..=3 {
                    let mut abs = [i32::abs(x), i32::abs(y), i32::abs(z)];
                    abs.sort_unstable();
                    if CLASSIC_GENERATORS.contains(&abs) {
                        vectors.push(Vector3::new(x, y, z));
                    }
                }
            }
        }
        Self { vectors }
    }

    pub fn vectors(&self) -> &[Vector3<i32>] {
        &self.vectors
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn contains(&self, bond: &Vector3<i32>) -> bool {
        self.vectors.contains(bond)
    }
}
