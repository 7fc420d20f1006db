//! Interactive input abstraction
//!
//! The wizard asks its questions through [`Prompter`]; the terminal
//! implementation lives in the `tui` module.

use anyhow::Result;

/// Checks a text answer; `Err` carries the message shown to the user
pub type Validator = fn(&str) -> Result<(), String>;

pub trait Prompter {
    /// Free-form text. `default` is used when the user submits nothing.
    fn ask_text(
        &mut self,
        prompt: &str,
        default: Option<&str>,
        validator: Option<Validator>,
    ) -> Result<String>;

    fn ask_confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

    /// Pick one of `options`, returning its index
    fn ask_choice(&mut self, prompt: &str, options: &[String], default: usize) -> Result<usize>;

    fn info(&mut self, message: &str);

    fn warning(&mut self, message: &str);

    /// Show a titled block of text
    fn note(&mut self, title: &str, body: &str);
}
