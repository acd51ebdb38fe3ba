/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub quota: u32,
    pub answered: u32,
    pub remaining: u32,
    pub is_complete: bool,
}
