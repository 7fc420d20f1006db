//! README.md rendering

use crate::config::options::PackageManager;

/// Render the README for `name`.
///
/// Sections are fixed: title, description placeholder, one install block per
/// package manager, usage placeholder.
pub fn render_readme(name: &str) -> String {
    let mut out = String::new();
    let mut add_line = |line: &str, newlines: usize| {
        out.push_str(line);
        out.push_str(&"\n".repeat(newlines));
    };

    add_line(&format!("# {}", name), 2);
    add_line("A brief description of your package goes here", 2);

    add_line("## 📦 Installation", 2);
    for manager in PackageManager::ALL {
        add_line("```bash", 1);
        add_line(
            &format!("{} {} {}", manager.binary(), install_verb(manager), name),
            1,
        );
        add_line("```", 2);
    }

    add_line("## 🚀 Usage", 2);
    add_line("...", 1);

    out
}

fn install_verb(manager: PackageManager) -> &'static str {
    match manager {
        PackageManager::Npm => "install",
        PackageManager::Yarn | PackageManager::Pnpm => "add",
    }
}
