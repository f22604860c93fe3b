// src/progress.rs
/// Progress reporting for a search run.
/// The CLI implements this to surface status; library code stays silent.
pub trait Progress {
    /// Called at the start with the number of sources to search.
    fn begin(&mut self, _sources: usize) {}

    /// A source finished; `found` is its deduplicated count.
    fn source_done(&mut self, _label: &str, _found: usize) {}

    /// A source contributed nothing because it failed as a whole.
    fn source_failed(&mut self, _label: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}
