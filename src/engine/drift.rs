//! Deterministic drift engine.
//!
//! A stand-in for a full plate-reconstruction engine, used by the CLI and in
//! tests: it drifts the site latitude with age and adds seeded Gaussian
//! noise, so runs are reproducible given the same seed and inputs. The
//! uncertainty bounds come from evaluating the drift at both edges of the
//! record's age window.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{PaleoLatitudeResult, ReconstructionParameters};
use crate::engine::{EngineError, ReconstructionEngine};
use crate::error::{AppError, ErrorKind};

/// Configuration for [`DriftEngine`].
#[derive(Debug, Clone)]
pub struct DriftConfig {
    /// Latitudinal drift applied per Myr, degrees. Positive values drift the
    /// site southwards going back in time.
    pub drift_deg_per_myr: f64,
    /// Standard deviation of the per-record noise, degrees. 0 disables noise.
    pub noise_deg: f64,
    /// Base seed, mixed with each record's fields.
    pub seed: u64,
    /// Plate id reported when the sample id carries no numeric plate id.
    pub default_plate_id: u32,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            drift_deg_per_myr: 0.25,
            noise_deg: 1.5,
            seed: 42,
            default_plate_id: 701,
        }
    }
}

#[derive(Debug)]
pub struct DriftEngine {
    config: DriftConfig,
}

impl DriftEngine {
    pub fn new(config: DriftConfig) -> Result<Self, AppError> {
        if !config.drift_deg_per_myr.is_finite() {
            return Err(AppError::new(ErrorKind::Load, "Invalid drift rate setting."));
        }
        if !(config.noise_deg.is_finite() && config.noise_deg >= 0.0) {
            return Err(AppError::new(ErrorKind::Load, "Invalid noise setting."));
        }
        Ok(Self { config })
    }

    fn palat_at(&self, site_latitude: f64, age: u32, noise: f64) -> f64 {
        (site_latitude - self.config.drift_deg_per_myr * age as f64 + noise).clamp(-90.0, 90.0)
    }
}

impl ReconstructionEngine for DriftEngine {
    fn reconstruct(
        &self,
        params: &ReconstructionParameters,
    ) -> Result<PaleoLatitudeResult, EngineError> {
        validate(params)?;

        let plate_id = params
            .sample_id
            .trim()
            .parse()
            .unwrap_or(self.config.default_plate_id);

        let noise = if self.config.noise_deg > 0.0 {
            let mut rng = StdRng::seed_from_u64(record_seed(self.config.seed, params));
            let normal = Normal::new(0.0, self.config.noise_deg)
                .map_err(|e| EngineError::new(format!("Noise distribution error: {e}")))?;
            normal.sample(&mut rng)
        } else {
            0.0
        };

        let palat = self.palat_at(params.site_latitude, params.age, noise);

        // The drift is monotone in age, so the window edges bracket the
        // estimate; order them in case the drift rate is negative.
        let at_min_age = self.palat_at(params.site_latitude, params.age_min, noise);
        let at_max_age = self.palat_at(params.site_latitude, params.age_max, noise);
        let (palat_min, palat_max) = if at_min_age <= at_max_age {
            (at_min_age, at_max_age)
        } else {
            (at_max_age, at_min_age)
        };

        Ok(PaleoLatitudeResult {
            palat,
            palat_min,
            palat_max,
            computed_using_plate_id: plate_id,
        })
    }
}

fn validate(params: &ReconstructionParameters) -> Result<(), EngineError> {
    if !(params.site_latitude.is_finite() && (-90.0..=90.0).contains(&params.site_latitude)) {
        return Err(EngineError::new(format!(
            "Site latitude {} outside [-90, 90].",
            params.site_latitude
        )));
    }
    if !(params.site_longitude.is_finite() && (-180.0..=180.0).contains(&params.site_longitude)) {
        return Err(EngineError::new(format!(
            "Site longitude {} outside [-180, 180].",
            params.site_longitude
        )));
    }
    if params.age_min > params.age || params.age > params.age_max {
        return Err(EngineError::new(format!(
            "Inconsistent age window: min={} age={} max={}.",
            params.age_min, params.age, params.age_max
        )));
    }
    Ok(())
}

fn record_seed(base: u64, params: &ReconstructionParameters) -> u64 {
    let mut hasher = DefaultHasher::new();
    base.hash(&mut hasher);
    params.sample_id.hash(&mut hasher);
    params.site_latitude.to_bits().hash(&mut hasher);
    params.site_longitude.to_bits().hash(&mut hasher);
    params.age.hash(&mut hasher);
    params.age_min.hash(&mut hasher);
    params.age_max.hash(&mut hasher);
    hasher.finish()
}
