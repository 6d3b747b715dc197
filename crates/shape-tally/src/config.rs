use shape_core::SphereVolumeRule;

/// How records with an unrecognised kind are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownKindPolicy {
    /// Skip the record silently.
    #[default]
    Ignore,
    /// Fail with [`crate::TallyError::UnknownKind`].
    Reject,
}

/// Driver settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TallyConfig {
    pub unknown_kinds: UnknownKindPolicy,
    pub sphere_volume: SphereVolumeRule,
}

impl TallyConfig {
    pub fn new(unknown_kinds: UnknownKindPolicy, sphere_volume: SphereVolumeRule) -> Self {
        Self {
            unknown_kinds,
            sphere_volume,
        }
    }
}
