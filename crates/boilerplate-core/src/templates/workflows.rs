//! GitHub Actions workflow rendering

use std::collections::BTreeMap;

/// Directory the workflow files live in, relative to the package root
pub const WORKFLOWS_DIR: &str = ".github/workflows";

const NODE_VERSION: &str = "20";
const PNPM_VERSION: &str = "9";

/// Render both workflow files, keyed by file name
pub fn render_ci_workflows() -> BTreeMap<&'static str, String> {
    let mut files = BTreeMap::new();
    files.insert("ci.yml", render_ci());
    files.insert("publish.yml", render_publish());
    files
}

fn setup_steps() -> String {
    format!(
        "      - uses: actions/checkout@v4
      - uses: pnpm/action-setup@v4
        with:
          version: {pnpm}
      - uses: actions/setup-node@v4
        with:
          node-version: {node}
      - run: pnpm install
",
        pnpm = PNPM_VERSION,
        node = NODE_VERSION,
    )
}

fn render_ci() -> String {
    format!(
        "name: CI
on:
  push:
    branches:
      - \"**\"

jobs:
  build:
    runs-on: ubuntu-latest
    steps:
{setup}      - run: pnpm run lint
      - run: pnpm test
      - run: pnpm run build
",
        setup = setup_steps(),
    )
}

fn render_publish() -> String {
    format!(
        "name: Publish
on:
  push:
    branches:
      - \"main\"

concurrency: ${{{{ github.workflow }}}}-${{{{ github.ref }}}}

jobs:
  publish:
    runs-on: ubuntu-latest
    permissions:
      contents: write
      pull-requests: write
    steps:
{setup}      - run: pnpm run build
      - name: Create Release Pull Request or Publish
        id: changesets
        uses: changesets/action@v1
        with:
          publish: pnpm publish --no-git-checks
        env:
          GITHUB_TOKEN: ${{{{ secrets.GITHUB_TOKEN }}}}
          NPM_TOKEN: ${{{{ secrets.NPM_TOKEN }}}}
",
        setup = setup_steps(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_workflows() {
        let files = render_ci_workflows();
        let names: Vec<_> = files.keys().copied().collect();
        assert_eq!(names, ["ci.yml", "publish.yml"]);
    }

    #[test]
    fn test_publish_runs_on_main_with_expressions_intact() {
        let files = render_ci_workflows();
        let publish = &files["publish.yml"];
        assert!(publish.contains("      - \"main\"\n"));
        assert!(publish.contains("concurrency: ${{ github.workflow }}-${{ github.ref }}"));
        assert!(publish.contains("GITHUB_TOKEN: ${{ secrets.GITHUB_TOKEN }}"));
        assert!(publish.contains("node-version: 20"));
    }

    #[test]
    fn test_ci_runs_lint_test_build() {
        let ci = &render_ci_workflows()["ci.yml"];
        let lint = ci.find("pnpm run lint").unwrap();
        let test = ci.find("pnpm test").unwrap();
        let build = ci.find("pnpm run build").unwrap();
        assert!(lint < test && test < build);
    }

    #[test]
    fn test_install_works_without_a_pnpm_lockfile() {
        for (file, contents) in render_ci_workflows() {
            assert!(contents.contains("      - run: pnpm install\n"), "{}", file);
            assert!(!contents.contains("--frozen-lockfile"), "{}", file);
            assert!(!contents.contains("cache: \"pnpm\""), "{}", file);
        }
    }
}
