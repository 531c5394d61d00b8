mod utils;

use scaffolder::config::ConfigStore;
use scaffolder::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use utils::write_project_config;

#[test]
fn cascade_orders_nearest_first_and_always_includes_global() {
    let tmp = tempfile::tempdir().unwrap();
    let a = tmp.path().join("a");
    let b = a.join("b");
    let c = b.join("c");
    std::fs::create_dir_all(&c).unwrap();
    write_project_config(&a, "sources: []");
    write_project_config(&b, "");
    write_project_config(&c, "sources: []");
    let global = tmp.path().join("global");
    std::fs::create_dir_all(&global).unwrap();

    let mut store = ConfigStore::new();
    store.load_from_path(&c, &global).unwrap();

    let keys: Vec<_> = store.all().keys().cloned().collect();
    assert_eq!(
        keys,
        vec![
            c.join(CONFIG_DIR_NAME),
            b.join(CONFIG_DIR_NAME),
            a.join(CONFIG_DIR_NAME),
            global.clone(),
        ]
    );
}

#[test]
fn global_entry_is_present_even_without_a_config_file() {
    let tmp = tempfile::tempdir().unwrap();
    let global = tmp.path().join("never-created");

    let mut store = ConfigStore::new();
    store.load_from_path(tmp.path(), &global).unwrap();

    let config = &store.all()[&global];
    assert!(config.sources.is_empty());
    assert!(config.features.is_empty());
}

#[test]
fn global_dir_coinciding_with_an_ancestor_is_not_duplicated() {
    let tmp = tempfile::tempdir().unwrap();
    write_project_config(tmp.path(), "sources: []");
    let global = tmp.path().join(CONFIG_DIR_NAME);

    let mut store = ConfigStore::new();
    store.load_from_path(tmp.path(), &global).unwrap();

    assert_eq!(store.all().len(), 1);
    assert!(store.all().contains_key(&global));
}

#[test]
fn directories_without_config_subdir_do_not_participate() {
    let tmp = tempfile::tempdir().unwrap();
    let nested = tmp.path().join("x/y");
    std::fs::create_dir_all(&nested).unwrap();
    write_project_config(tmp.path(), "");
    let global = tmp.path().join("global");

    let mut store = ConfigStore::new();
    store.load_from_path(&nested, &global).unwrap();

    let keys: Vec<_> = store.all().keys().cloned().collect();
    assert_eq!(keys, vec![tmp.path().join(CONFIG_DIR_NAME), global]);
}

#[test]
fn global_config_file_is_loaded_and_validated() {
    let tmp = tempfile::tempdir().unwrap();
    let global = tmp.path().join("global");
    std::fs::create_dir_all(&global).unwrap();
    std::fs::write(global.join(CONFIG_FILE_NAME), "nonsense_key: 1").unwrap();

    let mut store = ConfigStore::new();
    assert!(store.load_from_path(tmp.path(), &global).is_err());
}
