#![allow(non_snake_case)]

use super::*;
use crate::DEFAULT_ICON_BASE_URL;
use serde_json::json;

const FOO_MANIFEST: &str = r#"{
  "Name": "Foo Plugin",
  "Punchline": "Does things.",
  "InternalName": "Foo",
  "IconUrl": "http://x/old.png",
  "Author": "bob"
}"#;

// Parsing tests

#[test]
fn PluginManifest___from_json___parses_object() {
    let manifest = PluginManifest::from_json(FOO_MANIFEST).unwrap();

    assert_eq!(manifest.name().unwrap(), "Foo Plugin");
    assert_eq!(manifest.internal_name().unwrap(), "Foo");
    assert_eq!(manifest.get("Author"), Some(&json!("bob")));
}

#[test]
fn PluginManifest___from_json___malformed___returns_json_error() {
    let result = PluginManifest::from_json("{ \"Name\": ");

    assert!(matches!(result, Err(BundleError::Json(_))));
}

#[test]
fn PluginManifest___from_json___array___returns_invalid_manifest() {
    let err = PluginManifest::from_json("[1, 2]").unwrap_err();

    assert!(matches!(err, BundleError::InvalidManifest(_)));
    assert!(err.to_string().contains("an array"));
}

#[test]
fn PluginManifest___from_file___missing___returns_missing_file() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("Foo.json");

    let result = PluginManifest::from_file(&path);

    assert!(matches!(result, Err(BundleError::MissingFile(_))));
}

#[test]
fn PluginManifest___from_file___reads_disk() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("Foo.json");
    fs::write(&path, FOO_MANIFEST).unwrap();

    let manifest = PluginManifest::from_file(&path).unwrap();

    assert_eq!(manifest.name().unwrap(), "Foo Plugin");
}

// Transformation tests

#[test]
fn PluginManifest___into_unofficial___rewrites_four_fields() {
    let manifest = PluginManifest::from_json(FOO_MANIFEST).unwrap();

    let unofficial = manifest.into_unofficial(DEFAULT_ICON_BASE_URL).unwrap();

    let expected = json!({
        "Name": "Foo Plugin (Unofficial)",
        "Punchline": "Unofficial/uncertified build of Foo Plugin. Does things.",
        "InternalName": "FooUnofficial",
        "IconUrl": "https://raw.githubusercontent.com/WorkingRobot/MyDalamudPlugins/main/icons/FooUnofficial.png",
        "Author": "bob"
    });
    assert_eq!(serde_json::to_value(&unofficial).unwrap(), expected);
}

#[test]
fn PluginManifest___into_unofficial___preserves_key_order() {
    let manifest = PluginManifest::from_json(
        r#"{"Author":"bob","Punchline":"p","Tags":["a"],"Name":"n","InternalName":"i","IconUrl":"u"}"#,
    )
    .unwrap();

    let unofficial = manifest.into_unofficial("https://icons").unwrap();
    let keys: Vec<&str> = unofficial.fields.keys().map(String::as_str).collect();

    assert_eq!(
        keys,
        vec!["Author", "Punchline", "Tags", "Name", "InternalName", "IconUrl"]
    );
}

#[test]
fn PluginManifest___into_unofficial___passes_unknown_fields_through() {
    let manifest = PluginManifest::from_json(
        r#"{"Name":"n","Punchline":"p","InternalName":"i","IconUrl":"u",
            "DalamudApiLevel":9,"Tags":["craft","solver"],"Extra":{"nested":true}}"#,
    )
    .unwrap();

    let unofficial = manifest.clone().into_unofficial("https://icons").unwrap();

    for key in ["DalamudApiLevel", "Tags", "Extra"] {
        assert_eq!(unofficial.get(key), manifest.get(key));
    }
}

#[test]
fn PluginManifest___into_unofficial___missing_icon_url___appends_it() {
    let manifest =
        PluginManifest::from_json(r#"{"Name":"n","Punchline":"p","InternalName":"Bar"}"#).unwrap();

    let unofficial = manifest.into_unofficial("https://icons/").unwrap();

    assert_eq!(
        unofficial.get("IconUrl"),
        Some(&json!("https://icons/BarUnofficial.png"))
    );
    assert_eq!(unofficial.fields.keys().last().unwrap(), "IconUrl");
}

#[test]
fn PluginManifest___into_unofficial___missing_name___returns_error() {
    let manifest = PluginManifest::from_json(r#"{"Punchline":"p","InternalName":"i"}"#).unwrap();

    let err = manifest.into_unofficial("https://icons").unwrap_err();

    assert!(matches!(err, BundleError::InvalidManifest(_)));
    assert!(err.to_string().contains("Name"));
}

#[test]
fn PluginManifest___into_unofficial___non_string_punchline___returns_error() {
    let manifest =
        PluginManifest::from_json(r#"{"Name":"n","Punchline":3,"InternalName":"i"}"#).unwrap();

    let err = manifest.into_unofficial("https://icons").unwrap_err();

    assert!(err.to_string().contains("Punchline must be a string"));
}

// Serialization tests

#[test]
fn PluginManifest___to_json___uses_two_space_indent() {
    let manifest = PluginManifest::from_json(r#"{"Name":"n","Tags":["a"]}"#).unwrap();

    let json = manifest.to_json().unwrap();

    assert_eq!(json, "{\n  \"Name\": \"n\",\n  \"Tags\": [\n    \"a\"\n  ]\n}");
}

#[test]
fn PluginManifest___to_json___roundtrips() {
    let manifest = PluginManifest::from_json(FOO_MANIFEST).unwrap();

    let reparsed = PluginManifest::from_json(&manifest.to_json().unwrap()).unwrap();

    assert_eq!(reparsed, manifest);
}

#[test]
fn PluginManifest___to_json___escapes_non_ascii() {
    let manifest = PluginManifest::from_json(r#"{"Café ☕":"naïve 𝄞"}"#).unwrap();

    let json = manifest.to_json().unwrap();

    assert_eq!(
        json,
        "{\n  \"Caf\\u00e9 \\u2615\": \"na\\u00efve \\ud834\\udd1e\"\n}"
    );
    assert!(json.is_ascii());
    assert_eq!(PluginManifest::from_json(&json).unwrap(), manifest);
}

#[test]
fn PluginManifest___to_json___keeps_ascii_escapes() {
    let manifest = PluginManifest::from_json(r#"{"Punchline":"say \"hi\"\n\tnow"}"#).unwrap();

    let json = manifest.to_json().unwrap();

    assert_eq!(json, "{\n  \"Punchline\": \"say \\\"hi\\\"\\n\\tnow\"\n}");
}
