/// Picks the thumbnail that best matches `requested`.
///
/// An exact width wins. Otherwise the smallest larger width, then the
/// largest smaller one. Ties go to the earliest entry. `None` when there is
/// nothing to choose from.
pub fn select_thumbnail(widths: &[u32], requested: u32) -> Option<usize> {
    if let Some(index) = widths.iter().position(|&w| w == requested) {
        return Some(index);
    }

    let bigger = widths
        .iter()
        .enumerate()
        .filter(|&(_, &w)| w > requested)
        .min_by_key(|&(_, &w)| w)
        .map(|(index, _)| index);
    if bigger.is_some() {
        return bigger;
    }

    widths
        .iter()
        .enumerate()
        .filter(|&(_, &w)| w < requested)
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
        .map(|(index, _)| index)
}
