/// Writing scripts back to disk
///
/// Always writes the `{ "scripts": [...] }` shape, pretty-printed with
/// two-space indentation.

use crate::error::Result;
use crate::host::fs::FileSystem;
use crate::scripts::models::ScriptRecord;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// On-disk shape: `{ "scripts": [...] }`
#[derive(Serialize)]
struct ScriptsFile<'a> {
    scripts: Vec<FileEntry<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum FileEntry<'a> {
    Script(&'a ScriptRecord),
    Unrecognized(&'a Value),
}

/// Serialize a script list into file content
///
/// `unrecognized` entries go after the scripts, exactly as they were read.
pub fn serialize_scripts(scripts: &[ScriptRecord], unrecognized: &[Value]) -> Result<String> {
    let file = ScriptsFile {
        scripts: scripts
            .iter()
            .map(FileEntry::Script)
            .chain(unrecognized.iter().map(FileEntry::Unrecognized))
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Write the full script list to `path`
pub fn save_scripts<F: FileSystem + ?Sized>(
    fs: &F,
    path: &Path,
    scripts: &[ScriptRecord],
    unrecognized: &[Value],
) -> Result<()> {
    let content = serialize_scripts(scripts, unrecognized)?;
    fs.write_text(path, &content)?;

    info!(
        path = %path.display(),
        count = scripts.len(),
        kept = unrecognized.len(),
        "saved scripts"
    );
    Ok(())
}

/// Content for a freshly created scripts file
pub fn default_file_content() -> Result<String> {
    let example = ScriptRecord::new("ejemplo", "echo 'Hola Mundo'")
        .with_description("Script de ejemplo");
    serialize_scripts(&[example], &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fs::MemoryFileSystem;
    use crate::scripts::parser::{parse_scripts, parse_scripts_file};
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_round_trip() {
        let scripts = vec![
            ScriptRecord::new("build", "cargo build --release").with_category("build"),
            ScriptRecord::new("hello", "echo \"hi\"").with_description("Says hi"),
        ];

        let content = serialize_scripts(&scripts, &[]).unwrap();
        assert_eq!(parse_scripts(&content), scripts);
    }

    #[test]
    fn test_unrecognized_entries_written_after_scripts() {
        let kept = vec![json!({ "name": "todo" }), json!(7)];

        let content = serialize_scripts(&[ScriptRecord::new("a", "x")], &kept).unwrap();

        let parsed = parse_scripts_file(&content);
        assert_eq!(parsed.scripts, vec![ScriptRecord::new("a", "x")]);
        assert_eq!(parsed.unrecognized, kept);
    }

    mod strategies {
        use crate::scripts::models::ScriptRecord;
        use proptest::prelude::*;
        use serde_json::Value;

        // Quotes, backslashes, control characters, unicode and the empty string
        pub fn text() -> impl Strategy<Value = String> {
            prop_oneof![
                Just(String::new()),
                "[a-z0-9 _:-]{1,16}",
                "[\"'\\\\ \\n\\tñé日本語🚀]{0,12}",
                any::<String>(),
            ]
        }

        pub fn script_record() -> impl Strategy<Value = ScriptRecord> {
            (
                text(),
                text(),
                proptest::option::of(text()),
                proptest::option::of(text()),
                proptest::collection::btree_map("x-[a-z]{1,6}", text(), 0..3),
            )
                .prop_map(|(name, command, description, category, extra)| {
                    let mut script = ScriptRecord::new(name, command);
                    script.description = description;
                    script.category = category;
                    script.extra = extra
                        .into_iter()
                        .map(|(key, value)| (key, Value::String(value)))
                        .collect();
                    script
                })
        }
    }

    proptest! {
        #[test]
        fn property_wrapped_file_round_trips(
            scripts in proptest::collection::vec(strategies::script_record(), 0..8),
        ) {
            let content = serialize_scripts(&scripts, &[]).unwrap();
            let parsed = parse_scripts(&content);
            prop_assert_eq!(&parsed, &scripts);

            // Writing what was read gives the same file again
            let rewritten = serialize_scripts(&parsed, &[]).unwrap();
            prop_assert_eq!(&rewritten, &content);
        }

        #[test]
        fn property_bare_array_round_trips(
            scripts in proptest::collection::vec(strategies::script_record(), 0..8),
        ) {
            let bare = serde_json::to_string(&scripts).unwrap();

            let first = parse_scripts(&bare);
            let second = parse_scripts(&serialize_scripts(&first, &[]).unwrap());

            prop_assert_eq!(&first, &scripts);
            prop_assert_eq!(&second, &first);
        }
    }

    #[test]
    fn test_default_file_content() {
        let expected = r#"{
  "scripts": [
    {
      "name": "ejemplo",
      "command": "echo 'Hola Mundo'",
      "description": "Script de ejemplo"
    }
  ]
}"#;
        assert_eq!(default_file_content().unwrap(), expected);
    }

    #[test]
    fn test_save_writes_wrapped_shape() {
        let fs = MemoryFileSystem::new();
        let path = Path::new("/ws/.scriptsrc");

        save_scripts(&fs, path, &[ScriptRecord::new("a", "true")], &[]).unwrap();

        let written = fs.contents(path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["scripts"][0]["name"], "a");
        assert_eq!(fs.write_count(), 1);
    }
}
