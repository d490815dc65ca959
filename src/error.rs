use thiserror::Error;

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Display I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Canvas is {got_w}x{got_h}, display expects {want_w}x{want_h}")]
    SizeMismatch {
        got_w: usize,
        got_h: usize,
        want_w: usize,
        want_h: usize,
    },
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Input device read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Input device closed")]
    Closed,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Failed to present frame: {0}")]
    Display(#[from] DisplayError),
    #[error("Failed to spawn input sampler: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("Input sampler thread panicked")]
    SamplerPanicked,
}
