use super::point::POINT_COUNT;

/// Display label for point `index`: the highest index is `'a'`.
///
/// Returns `None` for indices outside `0..POINT_COUNT`.
pub fn label(index: usize) -> Option<char> {
    if index >= POINT_COUNT {
        return None;
    }
    Some(char::from(b'a' + (POINT_COUNT - 1 - index) as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_run_backwards_from_d() {
        let labels: Vec<char> = (0..POINT_COUNT).filter_map(label).collect();
        assert_eq!(labels, vec!['d', 'c', 'b', 'a']);
    }

    #[test]
    fn out_of_range_has_no_label() {
        assert_eq!(label(POINT_COUNT), None);
    }
}
