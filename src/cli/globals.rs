use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub base_url: String,
    pub session_file: PathBuf,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(base_url: String, session_file: PathBuf) -> Self {
        Self {
            base_url,
            session_file,
        }
    }
}
