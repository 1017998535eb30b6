use std::fmt::Display;

/// `[=====>....] 42.0%`
pub struct PercentBar {
    pub percent: f32,
    pub width: usize,
}

impl Display for PercentBar {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let percent = self.percent.clamp(0.0, 1.0);
        let filled = ((self.width - 1) as f32 * percent).round() as usize;
        write!(
            f,
            "[{empty:=>width_left$}>{empty:.<width_right$}] {percent:.1}%",
            empty = "",
            width_left = filled,
            width_right = self.width - 1 - filled,
            percent = 100. * percent
        )
    }
}
