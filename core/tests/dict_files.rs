// Loading dictionaries and configuration from disk.

use libjieba_core::{decode_runes, split_dict_paths, Config, DictTrie, Dictionary, UserWordWeight};
use std::path::PathBuf;

fn temp_dir(tag: &str) -> PathBuf {
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("libjieba_core_{}_{}_{}", tag, std::process::id(), stamp));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

const MAIN_DICT: &str = "\
我 50 r
来到 20 v
北京 30 ns
清华 5 nz
清华大学 20 nt
大学 25 n
";

#[test]
fn load_main_and_user_dictionaries() {
    let dir = temp_dir("load");
    let main = dir.join("jieba.dict.utf8");
    let user_a = dir.join("a.dict.utf8");
    let user_b = dir.join("b.dict.utf8");
    std::fs::write(&main, MAIN_DICT).unwrap();
    std::fs::write(&user_a, "云计算 n\n").unwrap();
    std::fs::write(&user_b, "韩玉赏鉴 10 nz\n嗯\n").unwrap();

    let joined = format!("{}|{}", user_a.display(), user_b.display());
    let dict = DictTrie::load(&main, &split_dict_paths(&joined), UserWordWeight::Median).unwrap();

    assert_eq!(dict.freq_sum(), 150.0);
    assert_eq!(dict.lookup("云计算").unwrap().tag, "n");
    assert!((dict.lookup("韩玉赏鉴").unwrap().weight - (10.0f64 / 150.0).ln()).abs() < 1e-12);
    assert!(dict.is_user_dict_single_chinese_word('嗯'));

    let runes = decode_runes("云计算");
    let dag = dict.find(&runes, 8);
    assert_eq!(dag[0].edges.last().unwrap().next, 2);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_dictionary_file_reports_path() {
    let err = DictTrie::load("/nonexistent/jieba.dict.utf8", &[] as &[PathBuf], UserWordWeight::Median).unwrap_err();
    assert!(format!("{:#}", err).contains("/nonexistent/jieba.dict.utf8"));
}

#[test]
fn config_file_selects_artifacts() {
    let dir = temp_dir("config");
    let main = dir.join("jieba.dict.utf8");
    std::fs::write(&main, MAIN_DICT).unwrap();
    let artifacts = dir.join("compiled");
    DictTrie::load(&main, &[] as &[PathBuf], UserWordWeight::Median)
        .unwrap()
        .save_artifacts(&artifacts)
        .unwrap();

    let user = dir.join("user.dict.utf8");
    std::fs::write(&user, "清华园 ns\n").unwrap();

    let mut cfg = Config::default();
    cfg.artifacts_dir = Some(artifacts);
    cfg.user_dict_paths = vec![user];
    cfg.max_word_len = 6;
    let cfg_path = dir.join("libjieba.toml");
    cfg.save_toml(&cfg_path).unwrap();

    let loaded = Config::load_toml(&cfg_path).unwrap();
    assert_eq!(loaded, cfg);
    let dict = loaded.load_dictionary().unwrap();
    assert!(dict.lookup("清华大学").is_some());
    assert_eq!(dict.lookup("清华园").unwrap().tag, "ns");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn artifacts_honor_configured_user_word_weight() {
    let dir = temp_dir("weight");
    let main = dir.join("jieba.dict.utf8");
    std::fs::write(&main, MAIN_DICT).unwrap();
    let artifacts = dir.join("compiled");
    DictTrie::load(&main, &[] as &[PathBuf], UserWordWeight::Median)
        .unwrap()
        .save_artifacts(&artifacts)
        .unwrap();
    let user = dir.join("user.dict.utf8");
    std::fs::write(&user, "云计算 n\n").unwrap();

    let mut from_text = Config::default();
    from_text.dict_path = Some(main.clone());
    from_text.user_dict_paths = vec![user.clone()];
    from_text.user_word_weight = UserWordWeight::Max;
    let mut from_artifacts = from_text.clone();
    from_artifacts.dict_path = None;
    from_artifacts.artifacts_dir = Some(artifacts);

    let text = from_text.load_dictionary().unwrap();
    let compiled = from_artifacts.load_dictionary().unwrap();
    assert_eq!(compiled.user_word_default_weight(), compiled.max_weight());
    assert_eq!(
        text.lookup("云计算").unwrap().weight,
        compiled.lookup("云计算").unwrap().weight
    );
    assert_eq!(compiled.lookup("云计算").unwrap().weight, text.max_weight());

    let _ = std::fs::remove_dir_all(&dir);
}
