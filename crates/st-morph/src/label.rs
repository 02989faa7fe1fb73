use st_core::Image;

const DX: [isize; 8] = [1, 0, -1, 0, 1, -1, -1, 1];
const DY: [isize; 8] = [0, -1, 0, 1, -1, -1, 1, 1];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    /// Axis-aligned neighbors only.
    C4,
    /// Axis-aligned and diagonal neighbors.
    C8,
}

impl Connectivity {
    fn num_neighbors(self) -> usize {
        match self {
            Self::C4 => 4,
            Self::C8 => 8,
        }
    }
}

/// Result of [`label_components`].
///
/// `labels` holds `0` for background and `1..=sizes.len()` for foreground
/// regions, numbered in row-major order of their first pixel.
#[derive(Debug, Clone)]
pub struct Components {
    pub labels: Image<u32>,
    pub sizes: Vec<usize>,
}

impl Components {
    pub fn num_components(&self) -> usize {
        self.sizes.len()
    }
}

pub fn label_components(mask: &Image<bool>, connectivity: Connectivity) -> Components {
    let (w, h) = mask.shape();
    let mut labels = Image::new_fill(w, h, 0u32);
    let mut sizes = Vec::new();
    let mut stack = Vec::new();
    let fg = mask.data();

    for seed in 0..fg.len() {
        if !fg[seed] || labels.data()[seed] != 0 {
            continue;
        }

        let label = sizes.len() as u32 + 1;
        let lab = labels.data_mut();
        lab[seed] = label;
        stack.push(seed);
        let mut size = 0usize;

        while let Some(idx) = stack.pop() {
            size += 1;
            let x = (idx % w) as isize;
            let y = (idx / w) as isize;

            for k in 0..connectivity.num_neighbors() {
                let nx = x + DX[k];
                let ny = y + DY[k];
                if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                    continue;
                }
                let nidx = ny as usize * w + nx as usize;
                if fg[nidx] && lab[nidx] == 0 {
                    lab[nidx] = label;
                    stack.push(nidx);
                }
            }
        }

        sizes.push(size);
    }

    Components { labels, sizes }
}

/// Clears every connected region with fewer than `min_size` pixels.
pub fn remove_small_objects(
    mask: &Image<bool>,
    min_size: usize,
    connectivity: Connectivity,
) -> Image<bool> {
    if min_size <= 1 {
        return mask.clone();
    }

    let components = label_components(mask, connectivity);
    components
        .labels
        .map(|&l| l > 0 && components.sizes[l as usize - 1] >= min_size)
}

#[cfg(test)]
mod tests {
    use st_core::Image;

    use super::{Connectivity, label_components, remove_small_objects};

    fn mask_from(rows: &[&str]) -> Image<bool> {
        let w = rows[0].len();
        let data = rows
            .iter()
            .flat_map(|r| r.chars().map(|c| c == '#'))
            .collect();
        Image::from_vec(w, rows.len(), data).expect("rectangular mask")
    }

    #[test]
    fn diagonal_pixels_join_only_with_c8() {
        let mask = mask_from(&["#..", ".#.", "..#"]);

        let c4 = label_components(&mask, Connectivity::C4);
        assert_eq!(c4.num_components(), 3);
        assert_eq!(c4.sizes, vec![1, 1, 1]);

        let c8 = label_components(&mask, Connectivity::C8);
        assert_eq!(c8.num_components(), 1);
        assert_eq!(c8.sizes, vec![3]);
        assert_eq!(c8.labels.get(1, 0), Some(&0));
    }

    #[test]
    fn labels_follow_row_major_first_pixel() {
        let mask = mask_from(&["..##", "#...", "#..#"]);
        let c = label_components(&mask, Connectivity::C4);

        assert_eq!(c.labels.data(), &[0, 0, 1, 1, 2, 0, 0, 0, 2, 0, 0, 3]);
        assert_eq!(c.sizes, vec![2, 2, 1]);
    }

    #[test]
    fn small_objects_are_removed() {
        let mask = mask_from(&["##...#", "##....", "....##"]);

        let kept = remove_small_objects(&mask, 3, Connectivity::C4);
        assert_eq!(kept, mask_from(&["##....", "##....", "......"]));

        let kept_c8 = remove_small_objects(&mask, 3, Connectivity::C8);
        assert_eq!(kept_c8, mask_from(&["##....", "##....", "......"]));

        assert_eq!(remove_small_objects(&mask, 1, Connectivity::C4), mask);
        assert!(!remove_small_objects(&mask, 5, Connectivity::C8).any());
    }
}
