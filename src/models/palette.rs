use rand::{seq::SliceRandom, Rng};

/// Slot colors. Order is irrelevant; each wheel gets its own shuffle.
pub const PALETTE: [&str; 13] = [
    "#1abc9c", "#3498db", "#9b59b6", "#e67e22", "#ff7675", "#fd79a8", "#55efc4", "#9AECDB",
    "#55E6C1", "#D6A2E8", "#706fd3", "#218c74", "#34ace0",
];

/// Shuffles the palette and hands out one color per slot by index, wrapping
/// when a wheel has more slots than colors.
pub fn assign_colors<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<String> {
    let mut shuffled = PALETTE.to_vec();
    shuffled.shuffle(rng);
    (0..count)
        .map(|i| shuffled[i % shuffled.len()].to_string())
        .collect()
}
