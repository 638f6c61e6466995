/// Nice 1-2-5 progression of tick intervals in seconds, from 0.1 ms to 10 min.
const TICK_INTERVALS: &[f64] = &[
    0.0001, 0.0002, 0.0005,         // sub-ms
    0.001, 0.002, 0.005,             // 1–5 ms
    0.01, 0.02, 0.05,               // 10–50 ms
    0.1, 0.2, 0.5,                  // 100–500 ms
    1.0, 2.0, 5.0,                  // 1–5 s
    10.0, 30.0, 60.0,               // 10 s – 1 min
    120.0, 300.0, 600.0,            // 2–10 min
];

/// A tick on the time axis.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeTick {
    /// Horizontal position in pixels from the left edge.
    pub x: f64,
    pub seconds: f64,
    /// Major ticks carry a label; minor ticks have `None`.
    pub label: Option<String>,
}

/// Format a time value as a compact label whose precision matches the tick interval.
pub fn format_time_label(seconds: f64, interval: f64) -> String {
    if interval < 0.001 {
        // Sub-millisecond: "X.Xms"
        format!("{:.1}ms", seconds * 1000.0)
    } else if interval < 1.0 {
        let ms = seconds * 1000.0;
        if interval >= 0.01 {
            format!("{:.0}ms", ms)
        } else {
            format!("{:.1}ms", ms)
        }
    } else if interval < 60.0 {
        if (seconds - seconds.round()).abs() < 0.001 {
            format!("{:.0}s", seconds)
        } else {
            format!("{:.1}s", seconds)
        }
    } else {
        let mins = (seconds / 60.0).floor() as u32;
        let secs = (seconds % 60.0).round() as u32;
        if secs == 0 {
            format!("{}m", mins)
        } else {
            format!("{}m{:02}s", mins, secs)
        }
    }
}

/// Smallest nice interval whose ticks are at least `min_spacing_px` apart.
pub fn pick_interval(px_per_sec: f64, min_spacing_px: f64) -> f64 {
    let min_interval = min_spacing_px / px_per_sec;
    TICK_INTERVALS
        .iter()
        .copied()
        .find(|&i| i >= min_interval)
        .unwrap_or(TICK_INTERVALS[TICK_INTERVALS.len() - 1])
}

/// Lay out time ticks for `duration` seconds drawn across `width_px` pixels.
///
/// Major ticks are labelled and spaced at least `min_spacing_px` apart;
/// four unlabelled minor ticks sit between majors when there is room
/// (at least 4 px apart).
pub fn time_ticks(duration: f64, width_px: f64, min_spacing_px: f64) -> Vec<TimeTick> {
    if duration <= 0.0 || width_px <= 0.0 || !duration.is_finite() {
        return Vec::new();
    }

    let px_per_sec = width_px / duration;
    let interval = pick_interval(px_per_sec, min_spacing_px.max(1.0));
    let minor_interval = interval / 5.0;
    let with_minor = minor_interval * px_per_sec >= 4.0;
    let step = if with_minor { minor_interval } else { interval };

    let mut ticks = Vec::new();
    let mut n = 0u64;
    loop {
        let t = n as f64 * step;
        if t > duration + step * 0.01 {
            break;
        }
        let is_major = !with_minor || n % 5 == 0;
        ticks.push(TimeTick {
            x: (t * px_per_sec).min(width_px),
            seconds: t,
            label: is_major.then(|| format_time_label(t, interval)),
        });
        n += 1;
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(format_time_label(0.25, 0.05), "250ms");
        assert_eq!(format_time_label(0.0005, 0.0001), "0.5ms");
        assert_eq!(format_time_label(3.0, 1.0), "3s");
        assert_eq!(format_time_label(150.0, 60.0), "2m30s");
        assert_eq!(format_time_label(120.0, 60.0), "2m");
    }

    #[test]
    fn test_pick_interval() {
        // 1000 px for 1 s: 100 px minimum → 0.1 s
        assert_eq!(pick_interval(1000.0, 100.0), 0.1);
        // Very zoomed out: falls back to the largest interval
        assert_eq!(pick_interval(0.001, 100.0), 600.0);
    }

    #[test]
    fn test_time_ticks_one_second() {
        let ticks = time_ticks(1.0, 1000.0, 100.0);
        let majors: Vec<_> = ticks.iter().filter(|t| t.label.is_some()).collect();
        assert_eq!(majors.len(), 11);
        assert_eq!(majors[0].label.as_deref(), Some("0ms"));
        assert_eq!(majors[10].label.as_deref(), Some("1000ms"));
        // Minor ticks every 20 ms = 20 px
        assert_eq!(ticks.len(), 51);
        assert!(ticks.iter().all(|t| t.x >= 0.0 && t.x <= 1000.0));
    }

    #[test]
    fn test_time_ticks_degenerate() {
        assert!(time_ticks(0.0, 500.0, 100.0).is_empty());
        assert!(time_ticks(1.0, 0.0, 100.0).is_empty());
    }
}
