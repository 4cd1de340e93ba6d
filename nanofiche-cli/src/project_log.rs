//! Plain-text report of a single run of the tool.

use std::fmt::{Display, Formatter};
use std::time::Duration;

use jiff::Zoned;
use nanofiche::entities::{PackRequest, PackingResult};
use nanofiche::{PackError, Result};
use thousands::Separable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    Failed,
}

impl Display for RunStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Success => write!(f, "SUCCESS"),
            RunStatus::Failed => write!(f, "FAILED"),
        }
    }
}

pub struct ProjectLog<'a> {
    pub project_name: &'a str,
    pub started: &'a Zoned,
    pub request: &'a PackRequest,
    pub outcome: &'a Result<PackingResult>,
    pub processing_time: Duration,
}

impl ProjectLog<'_> {
    /// `<project>_<YYYYmmdd_HHMMSS>_layout.log`
    pub fn file_name(&self) -> String {
        format!("{}_{}_layout.log", self.project_name, self.started.strftime("%Y%m%d_%H%M%S"))
    }

    pub fn status(&self) -> RunStatus {
        match self.outcome {
            Ok(result) if result.n_placed() == self.request.n => RunStatus::Success,
            _ => RunStatus::Failed,
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Display for ProjectLog<'_> {
    fn fmt(&self, log: &mut Formatter<'_>) -> std::fmt::Result {
        let request = self.request;
        let placed = self.outcome.as_ref().map_or(0, |r| r.n_placed());

        writeln!(log, "NanoFiche - Project Log")?;
        writeln!(log, "{}", "=".repeat(50))?;
        writeln!(log)?;
        writeln!(log, "Project Information:")?;
        writeln!(log, "    Project Name: {}", self.project_name)?;
        writeln!(log, "    Timestamp: {}", self.started.strftime("%Y-%m-%d %H:%M:%S"))?;
        writeln!(log)?;
        writeln!(log, "Input Parameters:")?;
        writeln!(log, "    Bin Dimensions: {} x {} pixels", request.bin.width, request.bin.height)?;
        writeln!(log, "    Envelope Shape: {}", request.envelope.shape)?;
        if let Some(reserve) = request.envelope.active_reserve() {
            match reserve.auto_size {
                true => writeln!(log, "    Reserve: auto-sized, {:?}", reserve.position)?,
                false => writeln!(log, "    Reserve: {} x {} pixels, {:?}", reserve.width, reserve.height, reserve.position)?,
            }
        }
        writeln!(log, "    Bins Requested: {}", request.n.separate_with_commas())?;
        writeln!(log)?;

        if let Ok(result) = self.outcome {
            writeln!(log, "Layout:")?;
            writeln!(log, "    Grid: {} rows x {} columns", result.rows, result.columns)?;
            writeln!(log, "    Canvas Size: {} x {} pixels", result.canvas_width, result.canvas_height)?;
            writeln!(log, "    Total Pixels: {}", result.canvas_pixels().separate_with_commas())?;
            writeln!(log, "    Envelope Density: {:.2}%", result.density() * 100.0)?;
            writeln!(log, "    Canvas Density: {:.2}%", result.canvas_density() * 100.0)?;
            if let Some(reserve) = &result.reserve {
                writeln!(
                    log,
                    "    Reserve: {} x {} pixels at ({}, {}), {} slots excluded",
                    reserve.spec.width, reserve.spec.height, reserve.rect.x_min, reserve.rect.y_min, reserve.excluded_slots
                )?;
            }
            writeln!(log)?;
        }

        writeln!(log, "Process Information:")?;
        writeln!(log, "    Processing Time: {:.2} seconds", self.processing_time.as_secs_f64())?;
        writeln!(log)?;

        if let Err(err) = self.outcome {
            writeln!(log, "Error Information:")?;
            writeln!(log, "    Error: {err}")?;
            writeln!(log, "    Kind: {}", error_kind(err))?;
            writeln!(log)?;
        }

        writeln!(log, "Summary:")?;
        writeln!(log, "    Project: {}", self.project_name)?;
        writeln!(log, "    Bins Placed: {}/{}", placed.separate_with_commas(), request.n.separate_with_commas())?;
        writeln!(log, "    Final Status: {}", self.status())
    }
}

fn error_kind(err: &PackError) -> &'static str {
    match err {
        PackError::InvalidInput(_) => "invalid input",
        PackError::SizeSearchExhausted { .. } => "size search exhausted",
        PackError::ReserveInfeasible { .. } => "reserve infeasible",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use jiff::tz::TimeZone;
    use nanofiche::entities::{BinDimensions, EnvelopeShape};

    fn request(n: usize) -> PackRequest {
        PackRequest {
            bin: BinDimensions::try_new(1300, 1900).unwrap(),
            n,
            envelope: EnvelopeShape::Square.into(),
        }
    }

    fn started() -> Zoned {
        date(2026, 10, 19).at(14, 3, 5, 0).to_zoned(TimeZone::UTC).unwrap()
    }

    #[test]
    fn successful_run() {
        let request = request(100);
        let outcome = nanofiche::pack(1300, 1900, 100, &request.envelope);
        let started = started();
        let log = ProjectLog {
            project_name: "roll_7",
            started: &started,
            request: &request,
            outcome: &outcome,
            processing_time: Duration::from_millis(1250),
        };
        assert_eq!(log.file_name(), "roll_7_20261019_140305_layout.log");
        assert_eq!(log.status(), RunStatus::Success);
        let text = log.render();
        assert!(text.contains("Canvas Size: 16900 x 16900 pixels"));
        assert!(text.contains("Total Pixels: 285,610,000"));
        assert!(text.contains("Processing Time: 1.25 seconds"));
        assert!(text.contains("Final Status: SUCCESS"));
        assert!(text.starts_with("NanoFiche - Project Log\n"));
        assert_eq!(format!("{log}"), text);
    }

    #[test]
    fn failed_run() {
        let request = request(100);
        let outcome = Err(PackError::invalid("bin dimensions must be positive"));
        let started = started();
        let log = ProjectLog {
            project_name: "roll_7",
            started: &started,
            request: &request,
            outcome: &outcome,
            processing_time: Duration::ZERO,
        };
        assert_eq!(log.status(), RunStatus::Failed);
        let text = log.render();
        assert!(text.contains("Error: invalid input: bin dimensions must be positive"));
        assert!(text.contains("Bins Placed: 0/100"));
        assert!(text.contains("Final Status: FAILED"));
        assert!(!text.contains("Canvas Size"));
    }
}
