// tests/config_env.rs
use article_metrics::config::{AppConfig, ENV_CONCURRENCY, ENV_CONFIG_PATH, ENV_INPUT, ENV_OUTPUT};
use std::path::PathBuf;
use std::{env, fs};

fn clear_env() {
    for k in [ENV_CONFIG_PATH, ENV_INPUT, ENV_OUTPUT, ENV_CONCURRENCY] {
        env::remove_var(k);
    }
}

#[serial_test::serial]
#[test]
fn default_uses_env_then_fallbacks() {
    // Isolate CWD so the repo's own config/ is never read
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    clear_env();

    // 1) Nothing on disk -> built-in defaults
    let cfg = AppConfig::load_default().unwrap();
    assert_eq!(cfg, AppConfig::default());

    // 2) Default file under ./config/
    fs::create_dir_all(tmp.path().join("config")).unwrap();
    fs::write(
        tmp.path().join("config/article_metrics.toml"),
        "[batch]\ninput = \"from_default.csv\"\n",
    )
    .unwrap();
    let cfg = AppConfig::load_default().unwrap();
    assert_eq!(cfg.batch.input, PathBuf::from("from_default.csv"));

    // 3) Env path wins over the default file
    let p_env = tmp.path().join("other.toml");
    fs::write(&p_env, "[batch]\ninput = \"from_env.csv\"\nconcurrency = 2\n").unwrap();
    env::set_var(ENV_CONFIG_PATH, p_env.display().to_string());
    let cfg = AppConfig::load_default().unwrap();
    assert_eq!(cfg.batch.input, PathBuf::from("from_env.csv"));
    assert_eq!(cfg.batch.concurrency, 2);

    // 4) Field overrides on top
    env::set_var(ENV_INPUT, "override.json");
    env::set_var(ENV_OUTPUT, "out/report.jsonl");
    env::set_var(ENV_CONCURRENCY, "nope");
    let cfg = AppConfig::load_default().unwrap();
    assert_eq!(cfg.batch.input, PathBuf::from("override.json"));
    assert_eq!(cfg.batch.output, PathBuf::from("out/report.jsonl"));
    assert_eq!(cfg.batch.concurrency, 2);

    clear_env();
    env::set_current_dir(&old).unwrap();
}

#[serial_test::serial]
#[test]
fn missing_env_config_path_is_an_error() {
    clear_env();
    env::set_var(ENV_CONFIG_PATH, "__article_metrics_missing__.toml");
    let err = AppConfig::load_default().unwrap_err();
    assert!(err.to_string().contains(ENV_CONFIG_PATH));
    clear_env();
}
