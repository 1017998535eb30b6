use std::time::{Duration, Instant};

/// The value returned by a closure along with how long it took
pub struct Timed<T> {
    pub res: T,
    pub elapsed: Duration,
}

pub fn timed_scope<R, F: FnOnce() -> R>(f: F) -> Timed<R> {
    let begin = Instant::now();
    let res = f();
    Timed {
        res,
        elapsed: begin.elapsed(),
    }
}

/// Like [`timed_scope`], and logs the elapsed time under `label`
pub fn timed_scope_log<R, F: FnOnce() -> R>(label: &str, f: F) -> R {
    let timed = timed_scope(f);
    log::info!(target: "timer", "{label}: {}", format_elapsed(timed.elapsed));
    timed.res
}

pub fn format_elapsed(elapsed: Duration) -> String {
    if elapsed < Duration::from_millis(1) {
        format!("{}µs", elapsed.as_micros())
    } else if elapsed < Duration::from_secs(1) {
        format!("{:.2}ms", elapsed.as_secs_f32() * 1000.)
    } else if elapsed < Duration::from_secs(60) {
        format!("{:.3}s", elapsed.as_secs_f32())
    } else {
        let secs = elapsed.as_secs();
        format!("{}h{}m{}s", secs / 3600, (secs / 60) % 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{format_elapsed, timed_scope};

    #[test]
    fn formats() {
        assert_eq!(format_elapsed(Duration::from_micros(12)), "12µs");
        assert_eq!(format_elapsed(Duration::from_millis(250)), "250.00ms");
        assert_eq!(format_elapsed(Duration::from_millis(1500)), "1.500s");
        assert_eq!(format_elapsed(Duration::from_secs(3725)), "1h2m5s");
    }

    #[test]
    fn returns_closure_value() {
        assert_eq!(timed_scope(|| 41 + 1).res, 42);
    }
}
