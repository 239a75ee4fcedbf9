use sp_steps::StepResult;

pub const TOLERANCE_MM: f64 = 0.5;

/// Step whose range and height lie within `tol` of the expected platform.
pub fn find_step(
    steps: &[StepResult],
    start: f64,
    end: f64,
    height: f64,
    tol: f64,
) -> Option<&StepResult> {
    steps.iter().find(|s| {
        (s.start - start).abs() <= tol
            && (s.end - end).abs() <= tol
            && (s.height - height).abs() <= tol
    })
}

pub fn describe(steps: &[StepResult]) -> String {
    sp_steps::format_report(steps)
}
