use super::domain::{
    AccreditationPeriod, CareerId, FacultySnapshot, ModalityId, NewPeriod, PeriodId,
};

/// Storage abstraction so the classifier and workflow can be exercised
/// in isolation.
///
/// Unknown career or modality ids surface as `StoreError::NotFound`
/// here; a known career with no periods returns an empty history and
/// classifies as not accredited.
pub trait PeriodStore: Send + Sync {
    /// Faculty directory with careers attached, for reporting.
    fn faculties(&self) -> Result<Vec<FacultySnapshot>, StoreError>;

    /// Every period for a career across modalities. `standard` narrows
    /// to modalities whose name matches (case-insensitive substring).
    fn career_periods(
        &self,
        career: CareerId,
        standard: Option<&str>,
    ) -> Result<Vec<AccreditationPeriod>, StoreError>;

    /// Period history for one (career, modality) pair.
    fn pair_periods(
        &self,
        career: CareerId,
        modality: ModalityId,
    ) -> Result<Vec<AccreditationPeriod>, StoreError>;

    fn fetch(&self, id: PeriodId) -> Result<Option<AccreditationPeriod>, StoreError>;

    /// Persist a freshly opened cycle. Rejects a duplicate
    /// (career, modality, process_start) with `StoreError::Conflict`.
    fn insert(&self, period: NewPeriod) -> Result<AccreditationPeriod, StoreError>;

    fn update(&self, period: AccreditationPeriod) -> Result<(), StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("period already exists for the career, modality, and process start")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
