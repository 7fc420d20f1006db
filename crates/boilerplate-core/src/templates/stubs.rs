//! Source, test and tooling config stubs

/// Ignore-file contents: dependency cache and build output
pub fn render_gitignore() -> String {
    "node_modules/\ndist/\n".to_string()
}

/// Entry point, intentionally empty
pub fn render_index() -> String {
    String::new()
}

/// A mocha (tdd ui) test with one trivial assertion
pub fn render_test_stub() -> String {
    "import { assert } from 'chai';

suite('index', () => {
    test('runs the test suite', () => {
        assert.strictEqual(1 + 1, 2);
    });
});
"
    .to_string()
}

/// `.mocharc.json`: run TypeScript tests through ts-node
pub fn render_mocharc() -> String {
    "{
  \"extension\": [\"ts\"],
  \"spec\": \"test/**/*.test.ts\",
  \"require\": \"ts-node/register\"
}
"
    .to_string()
}

/// Base `tsconfig.json`, before its module settings are patched
pub fn render_tsconfig() -> String {
    "{
  \"compilerOptions\": {
    \"target\": \"es2020\",
    \"module\": \"esnext\",
    \"moduleResolution\": \"bundler\",
    \"declaration\": true,
    \"outDir\": \"dist\",
    \"strict\": true,
    \"esModuleInterop\": true,
    \"skipLibCheck\": true,
    \"forceConsistentCasingInFileNames\": true
  },
  \"include\": [\"src\", \"test\"]
}
"
    .to_string()
}
