//! File content rendering
//!
//! Every function here is pure: a package name (or nothing) in, file text out.

pub mod license;
pub mod readme;
pub mod stubs;
pub mod workflows;

pub use license::render_license;
pub use readme::render_readme;
pub use stubs::{render_gitignore, render_index, render_mocharc, render_test_stub, render_tsconfig};
pub use workflows::{render_ci_workflows, WORKFLOWS_DIR};
