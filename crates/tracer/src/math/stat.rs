use crate::color::Rgb;

/// Running statistics of a serie of samples.
///
/// Uses Welford's update so the variance stays accurate when the samples are large and
/// close together (the usual sum / square sum formulation cancels catastrophically).
#[derive(Debug, Default, Clone, Copy)]
pub struct VarianceSeries {
    count: u32,
    mean: f32,
    m2: f32,
}

impl VarianceSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sample(&mut self, sample: f32) {
        self.count += 1;
        let delta = sample - self.mean;
        self.mean += delta / self.count as f32;
        self.m2 += delta * (sample - self.mean);
    }

    /// Chan et al. parallel combination
    pub fn merge(lhs: Self, rhs: Self) -> Self {
        if lhs.count == 0 {
            return rhs;
        }
        if rhs.count == 0 {
            return lhs;
        }
        let count = lhs.count + rhs.count;
        let delta = rhs.mean - lhs.mean;
        let weight = rhs.count as f32 / count as f32;
        Self {
            count,
            mean: lhs.mean + delta * weight,
            m2: lhs.m2 + rhs.m2 + delta * delta * lhs.count as f32 * weight,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn mean(&self) -> f32 {
        self.mean
    }

    /// Unbiased sample variance, infinite with less than two samples
    pub fn variance(&self) -> f32 {
        if self.count < 2 {
            return f32::INFINITY;
        }
        self.m2 / (self.count - 1) as f32
    }

    /// Standard error of the mean
    pub fn standard_error(&self) -> f32 {
        if self.count < 2 {
            return f32::INFINITY;
        }
        (self.variance() / self.count as f32).sqrt()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RgbSeries {
    r: VarianceSeries,
    g: VarianceSeries,
    b: VarianceSeries,
}

impl RgbSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sample(&mut self, rgb: Rgb) {
        self.r.add_sample(rgb.0[0]);
        self.g.add_sample(rgb.0[1]);
        self.b.add_sample(rgb.0[2]);
    }

    pub fn count(&self) -> u32 {
        self.r.count()
    }

    pub fn mean(&self) -> Rgb {
        Rgb::from_array([self.r.mean(), self.g.mean(), self.b.mean()])
    }

    pub fn variance(&self) -> Rgb {
        Rgb::from_array([self.r.variance(), self.g.variance(), self.b.variance()])
    }

    /// How far the mean may still be from the true pixel value.
    ///
    /// This is the worst standard error over the three channels; lower is more mature.
    pub fn maturity(&self) -> f32 {
        self.r
            .standard_error()
            .max(self.g.standard_error())
            .max(self.b.standard_error())
    }

    pub fn merge(lhs: Self, rhs: Self) -> Self {
        Self {
            r: VarianceSeries::merge(lhs.r, rhs.r),
            g: VarianceSeries::merge(lhs.g, rhs.g),
            b: VarianceSeries::merge(lhs.b, rhs.b),
        }
    }
}
