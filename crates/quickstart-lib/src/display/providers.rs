//! Display provider traits for dependency injection
//!
//! Every stage reports through these traits so the pipeline can be exercised
//! with a recording mock instead of a real console.

/// Provider trait for all user-facing communication
pub trait DisplayProvider {
    /// Leveled status reporter
    fn status(&self) -> Box<dyn StatusProvider>;
}

/// Provider trait for leveled status lines
pub trait StatusProvider {
    fn info(&self, message: &str);

    fn success(&self, message: &str);

    fn warning(&self, message: &str);

    fn error(&self, message: &str);

    /// Section heading for a pipeline stage
    fn header(&self, message: &str);

    /// Untagged line
    fn message(&self, text: &str);

    fn blank(&self);

    /// Indented raw output, e.g. captured command streams
    fn detail(&self, text: &str);

    fn banner(&self, title: &str);
}
