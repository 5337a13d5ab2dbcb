// crates/helpp/tests/advanced/mod.rs
use super::common::*;
use helpp::{HelppError, Settings};
use pretty_assertions::assert_eq;
use std::fs;

#[test]
fn test_process_file_writes_out_file() {
    let mut setup = TestSetup::new();
    let input = write_file(setup.temp_dir.path(), "hello.txt", HELLO_WORLD);

    let (output, expansion) = setup.preprocessor.process_file(&input).unwrap();
    assert_eq!(output, out_path(&input));
    assert_eq!(expansion.text, "Hello, World!");
    assert_eq!(fs::read_to_string(&output).unwrap(), "Hello, World!\n");
}

#[test]
fn test_text_without_directives_is_trimmed() {
    let mut setup = TestSetup::new();
    let input = write_file(setup.temp_dir.path(), "plain.txt", "\n  keep  me \n\n");

    let (output, _) = setup.preprocessor.process_file(&input).unwrap();
    assert_eq!(fs::read_to_string(output).unwrap(), "keep  me\n");
}

#[test]
fn test_blank_file_writes_single_line_feed() {
    let mut setup = TestSetup::new();
    let input = write_file(setup.temp_dir.path(), "blank.txt", "   \n\n");

    let (output, expansion) = setup.preprocessor.process_file(&input).unwrap();
    assert_eq!(expansion.text, "");
    assert_eq!(fs::read_to_string(output).unwrap(), "\n");
}

#[test]
fn test_help_macros_apply_to_generated_text() {
    let setup = TestSetup::new();
    let dir = setup.temp_dir.path();
    write_file(dir, ".txt.help", SHARED_HELP);
    let input = write_file(dir, "credits.txt", "#credit := PROJECT by AUTHOR\ncredit\n");

    let expansion = setup.preprocessor.expand_file(&input).unwrap();
    assert_eq!(expansion.text, "helpp by the maintainers");
}

#[test]
fn test_multi_line_macro() {
    let setup = TestSetup::new();
    let input = write_file(setup.temp_dir.path(), "letter.txt", MULTI_LINE_MACRO);

    let expansion = setup.preprocessor.expand_file(&input).unwrap();
    assert_eq!(
        expansion.text,
        "Thanks for writing.\nRegards,\nThe Team\n(automated)"
    );
}

#[test]
fn test_macro_names_are_patterns() {
    let setup = TestSetup::new();
    let input = write_file(setup.temp_dir.path(), "notes.txt", PATTERN_NAMES);

    let expansion = setup.preprocessor.expand_file(&input).unwrap();
    assert_eq!(
        expansion.text,
        "Running version 1 (patch 4) and version 2 (patch 10).\nFIXME: TODOS stay."
    );
}

#[test]
fn test_include_relative_to_input() {
    let setup = TestSetup::new();
    let dir = setup.temp_dir.path();
    write_file(dir, "parts/greetings.txt", GREETINGS);
    let input = write_file(dir, "main.txt", MAIN_WITH_INCLUDE);

    let expansion = setup.preprocessor.expand_file(&input).unwrap();
    assert_eq!(expansion.text, "hi, friend.");
}

#[test]
fn test_missing_include() {
    let setup = TestSetup::new();
    let input = write_file(setup.temp_dir.path(), "main.txt", "#include nope.txt\ntext");

    match setup.preprocessor.expand_file(&input) {
        Err(HelppError::Load { path, .. }) => {
            assert_eq!(path, setup.temp_dir.path().join("nope.txt"));
        }
        other => panic!("Expected Load error, got {:?}", other),
    }
}

#[test]
fn test_help_file_is_loaded() {
    let setup = TestSetup::new();
    let dir = setup.temp_dir.path();
    let help = write_file(dir, ".txt.help", SHARED_HELP);
    let input = write_file(dir, "about.txt", USES_HELP);

    let expansion = setup.preprocessor.expand_file(&input).unwrap();
    assert_eq!(expansion.text, "helpp is written by the maintainers.");
    assert_eq!(expansion.help_file, Some(help));
}

#[test]
fn test_help_file_only_matches_extension() {
    let setup = TestSetup::new();
    let dir = setup.temp_dir.path();
    write_file(dir, ".md.help", SHARED_HELP);
    let input = write_file(dir, "about.txt", USES_HELP);

    let expansion = setup.preprocessor.expand_file(&input).unwrap();
    assert_eq!(expansion.text, "PROJECT is written by AUTHOR.");
    assert_eq!(expansion.help_file, None);
}

#[test]
fn test_non_convergent_expansion() {
    let setup = TestSetup::with_settings(Settings {
        max_passes: 10,
        ..Settings::default()
    });
    let input = write_file(setup.temp_dir.path(), "loop.txt", NON_CONVERGENT);

    match setup.preprocessor.expand_file(&input) {
        Err(HelppError::NonConvergent { passes }) => assert_eq!(passes, 10),
        other => panic!("Expected NonConvergent error, got {:?}", other),
    }
}

#[test]
fn test_second_run_is_stable() {
    let mut setup = TestSetup::new();
    let input = write_file(setup.temp_dir.path(), "notes.txt", PATTERN_NAMES);
    let (output, first) = setup.preprocessor.process_file(&input).unwrap();

    let again = setup.preprocessor.expand_file(&output).unwrap();
    assert_eq!(again.text, first.text);
    // the first pass only drops the trailing line feed
    assert_eq!(again.passes, 2);
}
