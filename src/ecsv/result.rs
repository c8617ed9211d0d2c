/// Convenience type to make error mapping cleaner across readers and detection
pub type Result<T = ()> = anyhow::Result<T>;
