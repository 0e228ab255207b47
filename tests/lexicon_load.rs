// tests/lexicon_load.rs
use article_metrics::{EngineError, Lexicon, LexiconPaths};
use std::fs;

fn layout(root: &std::path::Path) -> LexiconPaths {
    let dict = root.join("MasterDictionary");
    let stop = root.join("StopWords");
    fs::create_dir_all(&dict).unwrap();
    fs::create_dir_all(&stop).unwrap();
    LexiconPaths {
        positive: dict.join("positive-words.txt"),
        negative: dict.join("negative-words.txt"),
        stop_words_dir: stop,
    }
}

#[test]
fn loads_sets_and_unions_stop_word_files() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = layout(tmp.path());
    fs::write(&paths.positive, "Good\n\n  great \n").unwrap();
    // latin-1 byte inside a word is dropped, the rest of the file survives
    fs::write(&paths.negative, b"bad\nab\xe9use\npoor\n").unwrap();
    fs::write(paths.stop_words_dir.join("StopWords_Generic.txt"), "THE\nand\n").unwrap();
    fs::write(paths.stop_words_dir.join("StopWords_Names.txt"), "smith\n").unwrap();

    let lx = Lexicon::from_paths(&paths).unwrap();
    assert!(lx.is_positive("good"));
    assert!(lx.is_positive("great"));
    assert_eq!(lx.positive_words().len(), 2);
    assert!(lx.is_negative("bad"));
    assert!(lx.is_negative("poor"));
    assert_eq!(lx.negative_words().len(), 3);
    assert!(lx.is_stop_word("the"));
    assert!(lx.is_stop_word("smith"));
    assert_eq!(lx.stop_words().len(), 3);
}

#[test]
fn missing_dictionary_reports_its_path() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = layout(tmp.path());
    fs::write(&paths.positive, "good\n").unwrap();

    let err = Lexicon::from_paths(&paths).unwrap_err();
    match &err {
        EngineError::LexiconLoad { path, .. } => assert_eq!(path, &paths.negative),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("negative-words.txt"));
}

#[test]
fn missing_stop_word_dir_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = layout(tmp.path());
    fs::write(&paths.positive, "good\n").unwrap();
    fs::write(&paths.negative, "bad\n").unwrap();
    fs::remove_dir(&paths.stop_words_dir).unwrap();

    assert!(matches!(
        Lexicon::from_paths(&paths),
        Err(EngineError::LexiconLoad { .. })
    ));
}
