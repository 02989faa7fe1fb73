#[derive(Debug, Clone, PartialEq)]
pub enum BorderMode<T> {
    Constant(T),
    /// Half-sample symmetric: `d c b a | a b c d | d c b a`.
    Reflect,
}

/// Maps a possibly out-of-range index onto `0..len`.
///
/// Returns `None` for [`BorderMode::Constant`] (caller substitutes the fill
/// value) and for empty signals.
pub fn map_index<T>(i: isize, len: usize, mode: &BorderMode<T>) -> Option<usize> {
    if len == 0 {
        return None;
    }
    if i >= 0 && (i as usize) < len {
        return Some(i as usize);
    }

    match mode {
        BorderMode::Constant(_) => None,
        BorderMode::Reflect => {
            let period = (2 * len) as isize;
            let r = i.rem_euclid(period) as usize;
            if r < len {
                Some(r)
            } else {
                Some(2 * len - 1 - r)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BorderMode, map_index};

    #[test]
    fn reflect_repeats_edge_sample() {
        let mode = BorderMode::<f32>::Reflect;

        let cases = [
            (-6, 4),
            (-5, 4),
            (-4, 3),
            (-3, 2),
            (-2, 1),
            (-1, 0),
            (0, 0),
            (4, 4),
            (5, 4),
            (6, 3),
            (9, 0),
            (10, 0),
        ];
        for (i, expected) in cases {
            assert_eq!(map_index(i, 5, &mode), Some(expected), "i = {i}");
        }

        for i in -4..=4 {
            assert_eq!(map_index(i, 1, &mode), Some(0));
        }
    }

    #[test]
    fn constant_and_empty_do_not_map() {
        assert_eq!(map_index(-1, 5, &BorderMode::Constant(0.0f32)), None);
        assert_eq!(map_index(3, 5, &BorderMode::Constant(0.0f32)), Some(3));
        assert_eq!(map_index(0, 0, &BorderMode::<f32>::Reflect), None);
    }
}
