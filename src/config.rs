use crate::infer;

pub const DEFAULT_PROMPT: &str = "kb> ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub engine: infer::Config,
    pub prompt: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { engine: infer::Config::default(), prompt: DEFAULT_PROMPT.to_owned() }
    }
}
