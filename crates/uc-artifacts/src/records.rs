//! Concrete checkpoint/result record types.
//!
//! These are the state shapes an external runner persists between runs:
//! the evidence summary of a finished (or interrupted) run and the
//! sampler settings needed to resume it.

use uc_core::{Array, Result};

use crate::state::{
    field_array, field_f64, field_i64, field_record, Fields, StateRecord, StateValue,
};
use crate::registry::TypeRegistry;

/// Evidence and effective-sample-size summary of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceSummary {
    /// Posterior mean of the log-evidence.
    pub log_z_mean: f64,
    /// Standard uncertainty of the log-evidence.
    pub log_z_uncert: f64,
    /// Effective sample size of the weighted posterior samples.
    pub ess: f64,
    /// Total likelihood evaluations consumed.
    pub num_likelihood_evaluations: i64,
    /// Live-point population size.
    pub num_live_points: i64,
    /// Per-sample posterior log-weights.
    pub log_dp_mean: Array,
}

impl StateRecord for EvidenceSummary {
    const CLASS: &'static str = "unitcube.artifacts.EvidenceSummary";

    fn to_fields(&self) -> Fields {
        let mut f = Fields::new();
        f.insert("log_z_mean".to_string(), StateValue::Float(self.log_z_mean));
        f.insert("log_z_uncert".to_string(), StateValue::Float(self.log_z_uncert));
        f.insert("ess".to_string(), StateValue::Float(self.ess));
        f.insert(
            "num_likelihood_evaluations".to_string(),
            StateValue::Int(self.num_likelihood_evaluations),
        );
        f.insert("num_live_points".to_string(), StateValue::Int(self.num_live_points));
        f.insert("log_dp_mean".to_string(), StateValue::Array(self.log_dp_mean.clone()));
        f
    }

    fn from_fields(fields: &Fields) -> Result<Self> {
        Ok(Self {
            log_z_mean: field_f64(fields, "log_z_mean")?,
            log_z_uncert: field_f64(fields, "log_z_uncert")?,
            ess: field_f64(fields, "ess")?,
            num_likelihood_evaluations: field_i64(fields, "num_likelihood_evaluations")?,
            num_live_points: field_i64(fields, "num_live_points")?,
            log_dp_mean: field_array(fields, "log_dp_mean")?.clone(),
        })
    }
}

/// Settings needed to reproduce or resume a run.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerSettings {
    /// Live-point population size.
    pub num_live_points: i64,
    /// Hard cap on collected samples.
    pub max_samples: i64,
    /// Termination threshold on the remaining evidence fraction.
    pub evidence_tolerance: f64,
    /// RNG seed of the run.
    pub seed: i64,
}

impl StateRecord for SamplerSettings {
    const CLASS: &'static str = "unitcube.artifacts.SamplerSettings";

    fn to_fields(&self) -> Fields {
        let mut f = Fields::new();
        f.insert("num_live_points".to_string(), StateValue::Int(self.num_live_points));
        f.insert("max_samples".to_string(), StateValue::Int(self.max_samples));
        f.insert("evidence_tolerance".to_string(), StateValue::Float(self.evidence_tolerance));
        f.insert("seed".to_string(), StateValue::Int(self.seed));
        f
    }

    fn from_fields(fields: &Fields) -> Result<Self> {
        Ok(Self {
            num_live_points: field_i64(fields, "num_live_points")?,
            max_samples: field_i64(fields, "max_samples")?,
            evidence_tolerance: field_f64(fields, "evidence_tolerance")?,
            seed: field_i64(fields, "seed")?,
        })
    }
}

/// Full checkpoint: settings plus the running evidence summary.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointState {
    /// Settings of the run being checkpointed.
    pub settings: SamplerSettings,
    /// Evidence accumulated so far.
    pub evidence: EvidenceSummary,
    /// Shrinkage steps completed.
    pub step: i64,
}

impl StateRecord for CheckpointState {
    const CLASS: &'static str = "unitcube.artifacts.CheckpointState";

    fn to_fields(&self) -> Fields {
        let mut f = Fields::new();
        f.insert("settings".to_string(), self.settings.to_state());
        f.insert("evidence".to_string(), self.evidence.to_state());
        f.insert("step".to_string(), StateValue::Int(self.step));
        f
    }

    fn from_fields(fields: &Fields) -> Result<Self> {
        let settings = field_record(fields, "settings", SamplerSettings::CLASS)?;
        let evidence = field_record(fields, "evidence", EvidenceSummary::CLASS)?;
        Ok(Self {
            settings: SamplerSettings::from_fields(settings)?,
            evidence: EvidenceSummary::from_fields(evidence)?,
            step: field_i64(fields, "step")?,
        })
    }
}

/// Register every record type in this module.
pub fn register_all(registry: &mut TypeRegistry) {
    registry.register::<EvidenceSummary>();
    registry.register::<SamplerSettings>();
    registry.register::<CheckpointState>();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_evidence() -> EvidenceSummary {
        EvidenceSummary {
            log_z_mean: -42.7,
            log_z_uncert: 0.31,
            ess: 812.5,
            num_likelihood_evaluations: 190_344,
            num_live_points: 500,
            log_dp_mean: Array::vector_f64(vec![-3.1, -2.4, f64::NEG_INFINITY]),
        }
    }

    #[test]
    fn test_fields_roundtrip() {
        let e = sample_evidence();
        let back = EvidenceSummary::from_fields(&e.to_fields()).unwrap();
        assert_eq!(back, e);
    }

    #[test]
    fn test_missing_field_rejected() {
        let mut fields = sample_evidence().to_fields();
        fields.remove("ess");
        assert!(EvidenceSummary::from_fields(&fields).is_err());
    }

    #[test]
    fn test_nested_checkpoint_roundtrip() {
        let state = CheckpointState {
            settings: SamplerSettings {
                num_live_points: 500,
                max_samples: 100_000,
                evidence_tolerance: 1e-4,
                seed: 1234,
            },
            evidence: sample_evidence(),
            step: 77,
        };
        let back = CheckpointState::from_fields(&state.to_fields()).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_wrong_nested_class_rejected() {
        let state = CheckpointState {
            settings: SamplerSettings {
                num_live_points: 1,
                max_samples: 1,
                evidence_tolerance: 0.1,
                seed: 0,
            },
            evidence: sample_evidence(),
            step: 0,
        };
        let mut fields = state.to_fields();
        // Swap the two nested records: classes no longer match.
        let settings = fields.remove("settings").unwrap();
        let evidence = fields.remove("evidence").unwrap();
        fields.insert("settings".to_string(), evidence);
        fields.insert("evidence".to_string(), settings);
        assert!(CheckpointState::from_fields(&fields).is_err());
    }
}
