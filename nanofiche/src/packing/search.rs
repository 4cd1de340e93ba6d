use crate::entities::SearchOutcome;

/// Progress reported while a [`BinarySearch`] runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchProgress {
    /// A size was tested
    Probe { size: f64, fits: bool },
    /// A failing and a fitting size enclose the minimum
    Bracketed { lower: f64, upper: f64 },
}

/// No fitting size was found before running into the bracket cap or the maximum size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchExhausted {
    pub last_size: f64,
}

/// Bisection on a single size parameter of an envelope.
///
/// Assumes larger sizes fit at least as well as smaller ones.
/// The returned size is always one that was actually tested and found to fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinarySearch {
    pub tolerance: f64,
    pub max_iterations: usize,
    pub max_bracket_steps: usize,
    pub growth: f64,
    pub max_size: f64,
}

impl BinarySearch {
    /// Finds a near-minimal size for which `place_fn` succeeds, starting from the lower bound `lower`.
    ///
    /// If `lower` fails, the bracket is grown by `growth` until a size fits.
    /// If it fits, it is shrunk by the same factor until a size fails.
    /// The bracket is then bisected until narrower than `tolerance` or `max_iterations` is reached.
    pub fn minimize<T>(
        &self,
        lower: f64,
        mut place_fn: impl FnMut(f64) -> Option<T>,
        mut observer: impl FnMut(SearchProgress),
    ) -> Result<(SearchOutcome, T), SearchExhausted> {
        let mut probe = |size: f64, observer: &mut dyn FnMut(SearchProgress)| {
            let result = place_fn(size);
            observer(SearchProgress::Probe {
                size,
                fits: result.is_some(),
            });
            result
        };

        let lower = f64::max(lower, self.tolerance);
        if lower > self.max_size {
            return Err(SearchExhausted { last_size: lower });
        }

        let (mut lo, mut hi, mut best) = match probe(lower, &mut observer) {
            Some(payload) => {
                //lower bound already fits, shrink until something fails
                let (mut lo, mut hi, mut best) = (0.0, lower, payload);
                for _ in 0..self.max_bracket_steps {
                    let candidate = hi / self.growth;
                    match probe(candidate, &mut observer) {
                        Some(payload) => {
                            hi = candidate;
                            best = payload;
                        }
                        None => {
                            lo = candidate;
                            break;
                        }
                    }
                }
                (lo, hi, best)
            }
            None => {
                //grow until something fits
                let mut lo = lower;
                let mut fitting = None;
                for _ in 0..self.max_bracket_steps {
                    if lo >= self.max_size {
                        break;
                    }
                    let candidate = f64::min(lo * self.growth, self.max_size);
                    match probe(candidate, &mut observer) {
                        Some(payload) => {
                            fitting = Some((candidate, payload));
                            break;
                        }
                        None => lo = candidate,
                    }
                }
                match fitting {
                    Some((hi, payload)) => (lo, hi, payload),
                    None => return Err(SearchExhausted { last_size: lo }),
                }
            }
        };
        observer(SearchProgress::Bracketed {
            lower: lo,
            upper: hi,
        });

        let mut iterations = 0;
        while hi - lo >= self.tolerance && iterations < self.max_iterations {
            let mid = (lo + hi) / 2.0;
            iterations += 1;
            match probe(mid, &mut observer) {
                Some(payload) => {
                    hi = mid;
                    best = payload;
                }
                None => lo = mid,
            }
        }

        let outcome = SearchOutcome {
            size: hi,
            failed_size: lo,
            iterations,
        };
        Ok((outcome, best))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn search(tolerance: f64) -> BinarySearch {
        BinarySearch {
            tolerance,
            max_iterations: 50,
            max_bracket_steps: 40,
            growth: 2.0,
            max_size: 1e6,
        }
    }

    #[test_case(10.0, 137.3; "grows from below")]
    #[test_case(500.0, 137.3; "shrinks from above")]
    #[test_case(137.3, 137.3; "starts at the threshold")]
    fn converges_to_threshold(lower: f64, threshold: f64) {
        let (outcome, payload) = search(0.1)
            .minimize(lower, |s| (s >= threshold).then_some(s), |_| {})
            .unwrap();
        assert_eq!(outcome.size, payload);
        assert!(outcome.size >= threshold);
        assert!(outcome.failed_size < threshold);
        assert!(outcome.size - outcome.failed_size < 0.1);
    }

    #[test]
    fn returns_last_fitting_payload() {
        let mut tested = vec![];
        let (outcome, payload) = search(1.0)
            .minimize(
                1.0,
                |s| {
                    tested.push(s);
                    (s >= 40.0).then(|| format!("fits at {s}"))
                },
                |_| {},
            )
            .unwrap();
        assert_eq!(payload, format!("fits at {}", outcome.size));
        assert!(tested.contains(&outcome.size));
        assert!(tested.contains(&outcome.failed_size));
    }

    #[test]
    fn exhausts_at_max_size() {
        let err = search(0.1)
            .minimize(10.0, |_| None::<()>, |_| {})
            .unwrap_err();
        assert_eq!(err.last_size, 1e6);
    }

    #[test]
    fn reports_progress() {
        let mut probes = 0;
        let mut bracket = None;
        search(1.0)
            .minimize(
                3.0,
                |s| (s >= 20.0).then_some(()),
                |p| match p {
                    SearchProgress::Probe { .. } => probes += 1,
                    SearchProgress::Bracketed { lower, upper } => bracket = Some((lower, upper)),
                },
            )
            .unwrap();
        assert_eq!(bracket, Some((12.0, 24.0)));
        assert!(probes > 4);
    }
}
