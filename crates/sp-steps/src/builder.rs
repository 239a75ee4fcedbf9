use log::debug;
use sp_core::{Error, Point2, Profile, Result};

/// Staircase cross-section used by the demo: a flat run at 0 mm, a steep rise
/// onto a gently sloped top, a drop, and a flat run at 5 mm.
pub fn demo_staircase() -> Vec<Point2> {
    vec![
        Point2::new(0.0, 0.0),
        Point2::new(15.0, 0.0),
        Point2::new(15.5, 10.0),
        Point2::new(25.0, 10.5),
        Point2::new(27.0, 5.0),
        Point2::new(35.0, 5.0),
    ]
}

/// Largest profile the builder will allocate.
pub const MAX_SAMPLE_COUNT: usize = 10_000_000;

/// Number of samples covering the polygon's X extent at `samples_per_mm`,
/// endpoints included. Counts above [`MAX_SAMPLE_COUNT`] are rejected.
pub fn sample_count_for_resolution(vertices: &[Point2], samples_per_mm: usize) -> Result<usize> {
    if samples_per_mm == 0 {
        return Err(Error::InvalidArgument(
            "sample resolution must be positive".to_string(),
        ));
    }
    let (min_x, max_x) = validate_polyline(vertices)?;

    let intervals = ((max_x - min_x) * samples_per_mm as f64).round();
    if !intervals.is_finite() || intervals >= MAX_SAMPLE_COUNT as f64 {
        return Err(Error::InvalidArgument(format!(
            "{samples_per_mm} samples/mm over {} mm exceeds {MAX_SAMPLE_COUNT} samples",
            max_x - min_x
        )));
    }
    let count = (intervals as usize)
        .checked_add(1)
        .filter(|&c| c <= MAX_SAMPLE_COUNT)
        .ok_or_else(|| {
            Error::InvalidArgument(format!("sample count exceeds {MAX_SAMPLE_COUNT}"))
        })?;
    Ok(count.max(2))
}

/// Samples an open polyline, monotonic in X, at `sample_count` evenly spaced
/// X positions over `[min_x, max_x]` by linear interpolation of Y.
///
/// Vertical segments are allowed; at a repeated X the first vertex reached
/// along the path wins.
pub fn build_from_polygon(vertices: &[Point2], sample_count: usize) -> Result<Profile> {
    let (min_x, max_x) = validate_polyline(vertices)?;
    if sample_count < 2 {
        return Err(Error::InvalidArgument(format!(
            "polygon needs at least 2 samples, got {sample_count}"
        )));
    }
    if sample_count > MAX_SAMPLE_COUNT {
        return Err(Error::InvalidArgument(format!(
            "{sample_count} samples exceeds {MAX_SAMPLE_COUNT}"
        )));
    }
    if !(max_x - min_x).is_finite() {
        return Err(Error::InvalidArgument(
            "polygon X extent is not finite".to_string(),
        ));
    }

    let step = (max_x - min_x) / (sample_count - 1) as f64;
    let last_seg = vertices.len() - 2;

    let mut positions = Vec::with_capacity(sample_count);
    let mut values = Vec::with_capacity(sample_count);
    let mut seg = 0usize;
    for k in 0..sample_count {
        let x = if k + 1 == sample_count {
            max_x
        } else {
            min_x + step * k as f64
        };
        while seg < last_seg && vertices[seg + 1].x < x {
            seg += 1;
        }

        let (a, b) = (vertices[seg], vertices[seg + 1]);
        let y = if b.x > a.x {
            a.lerp(b, ((x - a.x) / (b.x - a.x)).clamp(0.0, 1.0)).y
        } else {
            a.y
        };
        positions.push(x);
        values.push(y);
    }

    debug!(
        "build_from_polygon: {} vertices -> {} samples over [{min_x}, {max_x}] mm",
        vertices.len(),
        sample_count
    );
    Profile::from_samples(values, positions)
}

/// Re-samples a built profile onto `sample_count` evenly spaced points.
pub fn resample_profile(profile: &Profile, sample_count: usize) -> Result<Profile> {
    if sample_count > MAX_SAMPLE_COUNT {
        return Err(Error::InvalidArgument(format!(
            "{sample_count} samples exceeds {MAX_SAMPLE_COUNT}"
        )));
    }
    let out = profile.resample(sample_count)?;
    debug!(
        "resample_profile: {} -> {} samples",
        profile.len(),
        out.len()
    );
    Ok(out)
}

fn validate_polyline(vertices: &[Point2]) -> Result<(f64, f64)> {
    if vertices.len() < 2 {
        return Err(Error::InvalidArgument(format!(
            "polygon needs at least 2 vertices, got {}",
            vertices.len()
        )));
    }
    if let Some(i) = vertices.iter().position(|v| !v.is_finite()) {
        return Err(Error::InvalidArgument(format!(
            "vertex {i} has non-finite coordinates"
        )));
    }
    if let Some(i) = vertices.windows(2).position(|w| w[1].x < w[0].x) {
        return Err(Error::InvalidArgument(format!(
            "polygon X must be non-decreasing (vertex {} -> {})",
            i,
            i + 1
        )));
    }

    let min_x = vertices[0].x;
    let max_x = vertices[vertices.len() - 1].x;
    if max_x <= min_x {
        return Err(Error::InvalidArgument(
            "polygon has zero X extent".to_string(),
        ));
    }
    Ok((min_x, max_x))
}
