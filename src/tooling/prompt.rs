//! Interactive prompts for the root directory and output file.
//!
//! Only the raw answers come from here. Defaulting a blank output name is done by
//! [`crate::merger::resolve_output_path`].

use crate::error::MergeError;

/// Source of interactive answers
pub trait Prompter {
    /// Ask for the manifest root directory. The answer is never blank.
    fn root_dir(&self) -> Result<String, MergeError>;

    /// Ask for the output file name. Blank means the default.
    fn output_file(&self) -> Result<String, MergeError>;
}

/// Terminal prompts backed by `dialoguer`
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn root_dir(&self) -> Result<String, MergeError> {
        use dialoguer::Input;

        Input::<String>::new()
            .with_prompt("Root directory containing the manifest subdirectories")
            .validate_with(|input: &String| -> Result<(), &'static str> {
                if input.trim().is_empty() {
                    Err("a directory is required")
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .map(|s| s.trim().to_string())
            .map_err(|e| MergeError::Prompt(e.to_string()))
    }

    fn output_file(&self) -> Result<String, MergeError> {
        use dialoguer::Input;

        Input::<String>::new()
            .with_prompt("Output file name (default: manifest.yaml)")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| MergeError::Prompt(e.to_string()))
    }
}
