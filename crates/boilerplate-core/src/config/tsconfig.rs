//! Post-generation patching of `tsconfig.json`

use crate::error::ScaffoldError;
use serde_json::Value;
use std::path::Path;
use tokio::fs;

/// Settings that let ts-node run the mocha suite
pub const MODULE: &str = "commonjs";
pub const MODULE_RESOLUTION: &str = "node";

/// Rewrite the module settings in tsconfig text, keeping everything else
pub fn patch_module_resolution(contents: &str) -> Result<String, serde_json::Error> {
    let mut config: Value = serde_json::from_str(contents)?;
    let Some(root) = config.as_object_mut() else {
        return Err(serde::de::Error::custom("tsconfig must be a JSON object"));
    };

    let options = root
        .entry("compilerOptions")
        .or_insert_with(|| Value::Object(Default::default()));
    if !options.is_object() {
        *options = Value::Object(Default::default());
    }
    if let Some(options) = options.as_object_mut() {
        options.insert("module".to_string(), Value::from(MODULE));
        options.insert("moduleResolution".to_string(), Value::from(MODULE_RESOLUTION));
    }

    let mut out = serde_json::to_string_pretty(&config)?;
    out.push('\n');
    Ok(out)
}

/// Patch the tsconfig file at `path` in place
pub async fn patch_tsconfig_file(path: &Path) -> Result<(), ScaffoldError> {
    let contents = fs::read_to_string(path)
        .await
        .map_err(|e| ScaffoldError::fs("read", path, e))?;
    let patched = patch_module_resolution(&contents).map_err(|source| ScaffoldError::Config {
        file: path.to_path_buf(),
        source,
    })?;
    fs::write(path, patched)
        .await
        .map_err(|e| ScaffoldError::fs("write", path, e))
}
