/// Linear axis: snapped range, major/minor ticks, data-to-pixel mapping.
#[derive(Debug, Clone)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub label: String,
    pub tick_positions: Vec<f64>,
    pub tick_labels: Vec<String>,
    pub minor_ticks: Vec<f64>,
}

const MINOR_PER_MAJOR: usize = 5;

impl Axis {
    /// Linear axis whose bounds snap outward to a round tick step.
    ///
    /// A unit range with `target_ticks = 11` lands on major ticks every 0.1,
    /// the standard frame for efficiency plots.
    pub fn linear(data_min: f64, data_max: f64, target_ticks: usize) -> Self {
        let (min, max, step) = snapped_range(data_min, data_max, target_ticks);

        let n_intervals = ((max - min) / step).round() as usize;
        let decimals = label_decimals(step);
        let mut ticks = Vec::with_capacity(n_intervals + 1);
        let mut labels = Vec::with_capacity(n_intervals + 1);
        for i in 0..=n_intervals {
            let v = min + i as f64 * step;
            ticks.push(v);
            labels.push(tick_label(v, decimals));
        }

        // Minors subdivide each major interval; they can never coincide
        // with a major by construction.
        let minor_step = step / MINOR_PER_MAJOR as f64;
        let mut minors = Vec::with_capacity(n_intervals * (MINOR_PER_MAJOR - 1));
        for i in 0..n_intervals {
            let base = min + i as f64 * step;
            for j in 1..MINOR_PER_MAJOR {
                minors.push(base + j as f64 * minor_step);
            }
        }

        Self {
            min,
            max,
            label: String::new(),
            tick_positions: ticks,
            tick_labels: labels,
            minor_ticks: minors,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Map a data value into pixel space.
    pub fn to_px(&self, value: f64, px_lo: f64, px_hi: f64) -> f64 {
        let frac = (value - self.min) / (self.max - self.min);
        px_lo + frac * (px_hi - px_lo)
    }
}

fn snapped_range(data_min: f64, data_max: f64, target_ticks: usize) -> (f64, f64, f64) {
    if (data_max - data_min).abs() < 1e-15 {
        return (data_min - 1.0, data_max + 1.0, 1.0);
    }
    let rough = (data_max - data_min) / (target_ticks.max(2) - 1) as f64;
    let step = round_step(rough);
    let min = (data_min / step).floor() * step;
    let max = (data_max / step).ceil() * step;
    (min, max, step)
}

/// Smallest of 1, 2, 5 (times a power of ten) that covers `rough`.
fn round_step(rough: f64) -> f64 {
    let magnitude = 10.0_f64.powf(rough.abs().log10().floor());
    for mult in [1.0, 2.0, 5.0] {
        let candidate = mult * magnitude;
        if candidate >= rough - magnitude * 1e-9 {
            return candidate;
        }
    }
    10.0 * magnitude
}

fn label_decimals(step: f64) -> usize {
    if step >= 1.0 { 0 } else { (-step.log10().floor()) as usize }
}

fn tick_label(value: f64, decimals: usize) -> String {
    if decimals == 0 {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.decimals$}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_range_has_tenth_ticks() {
        let ax = Axis::linear(0.0, 1.0, 11);
        assert!((ax.min - 0.0).abs() < 1e-12);
        assert!((ax.max - 1.0).abs() < 1e-12);
        assert_eq!(ax.tick_positions.len(), 11);
        assert_eq!(ax.tick_labels.first().map(String::as_str), Some("0.0"));
        assert_eq!(ax.tick_labels.last().map(String::as_str), Some("1.0"));
    }

    #[test]
    fn to_px_is_linear() {
        let ax = Axis::linear(0.0, 100.0, 5);
        let px = ax.to_px(50.0, 0.0, 500.0);
        assert!((px - 250.0).abs() < 1.0);
    }

    #[test]
    fn minors_sit_between_majors() {
        let ax = Axis::linear(0.0, 1.0, 11);
        assert_eq!(ax.minor_ticks.len(), 40);
        for m in &ax.minor_ticks {
            assert!(ax.tick_positions.iter().all(|t| (t - m).abs() > 1e-6));
        }
    }

    #[test]
    fn round_step_covers_rough() {
        assert!((round_step(0.1) - 0.1).abs() < 1e-12);
        assert!((round_step(3.2) - 5.0).abs() < 1e-9);
        assert!((round_step(0.7) - 1.0).abs() < 1e-9);
        assert!((round_step(15.0) - 20.0).abs() < 1e-9);
        assert!((round_step(2.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_range_widens() {
        let ax = Axis::linear(0.5, 0.5, 11);
        assert!(ax.min < 0.5);
        assert!(ax.max > 0.5);
    }
}
