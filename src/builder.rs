use std::path::PathBuf;

use crate::{BranchEditor, Config, Result};

#[derive(Default)]
pub struct EditorBuilder {
    config: Option<Config>,
    config_path: Option<PathBuf>,
}

impl EditorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(
        mut self,
        config: Config,
    ) -> Self {
        self.config = Some(config);
        self
    }

    /// Load the config from a TOML file when building. An explicit [`EditorBuilder::config`] takes precedence.
    pub fn config_file(
        mut self,
        path: impl Into<PathBuf>,
    ) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn build(&self) -> Result<BranchEditor> {
        let config = match (&self.config, &self.config_path) {
            (Some(config), _) => config.clone(),
            (None, Some(path)) => Config::create(path)?,
            (None, None) => Config::default(),
        };

        Ok(BranchEditor::new(config))
    }
}
