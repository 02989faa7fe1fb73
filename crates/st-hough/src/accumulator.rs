use st_core::Image;

/// Vote counts over `(theta, rho)` for a fixed band of angles.
///
/// Rho bins are 1 px wide and centered on integers in
/// `[-max_rho, max_rho]`, where `max_rho` is the image diagonal rounded up.
#[derive(Debug, Clone)]
pub struct HoughAccumulator {
    thetas: Vec<f32>,
    cos_table: Vec<f32>,
    sin_table: Vec<f32>,
    max_rho: usize,
    rho_bins: usize,
    votes: Vec<u32>,
}

impl HoughAccumulator {
    /// `thetas` are normal angles in radians.
    pub fn new(width: usize, height: usize, thetas: Vec<f32>) -> Self {
        let diag = ((width * width + height * height) as f64).sqrt();
        let max_rho = diag.ceil() as usize;
        let rho_bins = 2 * max_rho + 1;
        let (sin_table, cos_table) = thetas.iter().map(|t| t.sin_cos()).unzip();

        Self {
            votes: vec![0; rho_bins * thetas.len()],
            thetas,
            cos_table,
            sin_table,
            max_rho,
            rho_bins,
        }
    }

    pub fn vote_mask(&mut self, mask: &Image<bool>) {
        for y in 0..mask.height() {
            for (x, _) in mask.row(y).iter().enumerate().filter(|(_, v)| **v) {
                self.vote_point(x as f32, y as f32);
            }
        }
    }

    pub fn vote_point(&mut self, x: f32, y: f32) {
        for t in 0..self.thetas.len() {
            let rho = x * self.cos_table[t] + y * self.sin_table[t];
            let bin = self.rho_to_index(rho);
            let idx = t * self.rho_bins + bin;
            self.votes[idx] = self.votes[idx].saturating_add(1);
        }
    }

    #[inline]
    fn rho_to_index(&self, rho: f32) -> usize {
        let idx = (rho + self.max_rho as f32).round() as isize;
        idx.clamp(0, self.rho_bins as isize - 1) as usize
    }

    #[inline]
    pub fn index_to_rho(&self, index: usize) -> f32 {
        index as f32 - self.max_rho as f32
    }

    pub fn num_thetas(&self) -> usize {
        self.thetas.len()
    }

    pub fn rho_bins(&self) -> usize {
        self.rho_bins
    }

    pub fn theta(&self, theta_idx: usize) -> f32 {
        self.thetas[theta_idx]
    }

    pub fn votes(&self, theta_idx: usize, rho_idx: usize) -> u32 {
        self.votes[theta_idx * self.rho_bins + rho_idx]
    }

    pub fn max_votes(&self) -> u32 {
        self.votes.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use st_core::Image;

    use super::HoughAccumulator;

    #[test]
    fn horizontal_row_collects_all_votes_at_ninety_degrees() {
        let mask = Image::from_fn(40, 20, |_, y| y == 7);
        let thetas = vec![88f32.to_radians(), 90f32.to_radians(), 92f32.to_radians()];
        let mut acc = HoughAccumulator::new(40, 20, thetas);
        acc.vote_mask(&mask);

        let rho_idx = (0..acc.rho_bins())
            .find(|&r| (acc.index_to_rho(r) - 7.0).abs() < 0.5)
            .expect("rho bin for row 7");
        assert_eq!(acc.votes(1, rho_idx), 40);
        assert_eq!(acc.max_votes(), 40);
        assert!(acc.votes(0, rho_idx) < 40);
    }

    #[test]
    fn empty_mask_has_no_votes() {
        let mask = Image::new_fill(10, 10, false);
        let mut acc = HoughAccumulator::new(10, 10, vec![0.0]);
        acc.vote_mask(&mask);
        assert_eq!(acc.max_votes(), 0);
    }
}
