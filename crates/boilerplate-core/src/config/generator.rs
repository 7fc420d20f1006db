//! Package manager detection

use crate::config::options::PackageManager;
use crate::runtime::shell::ShellRunner;

/// Package managers in order of preference
const MANAGER_PRIORITY: &[PackageManager] = &[
    PackageManager::Pnpm,
    PackageManager::Yarn,
    PackageManager::Npm,
];

/// Detect the preferred package manager available on the host
pub fn detect_package_manager<S: ShellRunner>(shell: &S) -> PackageManager {
    for manager in MANAGER_PRIORITY {
        if shell.detect(manager.binary()).unwrap_or(false) {
            return *manager;
        }
    }
    // Nothing found: npm, so the install step reports where to get Node.js
    PackageManager::Npm
}
