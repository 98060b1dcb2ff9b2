use anyhow::Result;
use cm_admin::payload::PayloadSource;
use cm_admin::{ConfigurationCommands, ConfigurationRecord, MemoryStore, Properties};
use cm_core::error::CmError;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

fn props(entries: &[(&str, &str)]) -> Properties {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn memory_commands() -> ConfigurationCommands<MemoryStore> {
    ConfigurationCommands::new(MemoryStore::new())
}

#[test]
fn test_singleton_end_to_end() -> Result<()> {
    let commands = memory_commands();

    let pid = commands.install("myservice.cfg", props(&[("host", "localhost"), ("port", "8080")]))?;
    assert_eq!(pid, "myservice");

    let shown = commands.show("myservice")?.expect("installed configuration");
    assert_eq!(shown, props(&[("host", "localhost"), ("port", "8080")]));

    assert_eq!(commands.delete("myservice")?, Some("myservice".to_string()));
    assert_eq!(commands.show("myservice")?, None);
    Ok(())
}

#[test]
fn test_factory_reinstall_updates_in_place() -> Result<()> {
    let commands = memory_commands();

    let first = commands.install("db-pool1.cfg", props(&[("size", "5"), ("idle", "2")]))?;
    let second = commands.install("db-pool1.cfg", props(&[("size", "10")]))?;
    assert_eq!(first, second);

    let listed = commands.list()?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].pid, first);

    let shown = commands.show("db-pool1")?.expect("factory instance");
    assert_eq!(shown, props(&[("size", "10"), ("_alias_pid", "pool1")]));
    Ok(())
}

#[test]
fn test_distinct_aliases_make_distinct_instances() -> Result<()> {
    let commands = memory_commands();

    let pool1 = commands.install("db-pool1.cfg", props(&[("size", "5")]))?;
    let pool2 = commands.install("db-pool2.cfg", props(&[("size", "7")]))?;
    assert_ne!(pool1, pool2);
    assert_eq!(commands.list()?.len(), 2);

    assert_eq!(commands.show("db-pool2")?.map(|p| p["size"].clone()), Some("7".to_string()));
    Ok(())
}

#[test]
fn test_same_alias_under_other_factory_is_separate() -> Result<()> {
    let commands = memory_commands();

    let db = commands.install("db-main.cfg", props(&[("a", "1")]))?;
    let cache = commands.install("cache-main.cfg", props(&[("b", "2")]))?;
    assert_ne!(db, cache);
    assert_eq!(commands.show("cache-main")?, Some(props(&[("b", "2"), ("_alias_pid", "main")])));
    Ok(())
}

#[test]
fn test_singleton_reinstall_is_idempotent() -> Result<()> {
    let commands = memory_commands();

    let first = commands.install("http://host/conf/web.properties", props(&[("a", "1"), ("b", "2")]))?;
    let second = commands.install("web.properties", props(&[("c", "3")]))?;
    assert_eq!(first, "web");
    assert_eq!(second, "web");
    assert_eq!(commands.list()?.len(), 1);
    assert_eq!(commands.show("web")?, Some(props(&[("c", "3")])));
    Ok(())
}

#[test]
fn test_multi_hyphen_source_uses_last_hyphen() -> Result<()> {
    let commands = memory_commands();

    commands.install("org-example-db-replica.cfg", props(&[("x", "1")]))?;
    let listed = commands.list()?;
    assert_eq!(listed[0].factory_pid.as_deref(), Some("org-example-db"));
    assert_eq!(listed[0].alias_pid.as_deref(), Some("replica"));
    Ok(())
}

#[test]
fn test_resolve_prefers_exact_pid() -> Result<()> {
    let store = MemoryStore::new();
    let mut literal = ConfigurationRecord::singleton("db-pool1");
    literal.properties.insert("kind".into(), "literal".into());
    store.insert(literal)?;

    let commands = ConfigurationCommands::new(store);
    let factory_pid = commands.install("db-pool1.cfg", props(&[("kind", "factory")]))?;
    assert_ne!(factory_pid, "db-pool1");

    let resolved = commands.resolve("db-pool1")?.expect("a match");
    assert_eq!(resolved.pid, "db-pool1");
    assert_eq!(resolved.properties["kind"], "literal");

    // The factory instance is still reachable through its own PID.
    let by_instance_pid = commands.resolve(&factory_pid)?.expect("instance");
    assert_eq!(by_instance_pid.properties["kind"], "factory");
    Ok(())
}

#[test]
fn test_delete_unknown_leaves_store_untouched() -> Result<()> {
    let commands = memory_commands();
    commands.install("myservice.cfg", props(&[("a", "1")]))?;
    commands.install("db-pool1.cfg", props(&[("b", "2")]))?;
    let before = commands.store().snapshot()?;

    assert_eq!(commands.delete("nothing")?, None);
    assert_eq!(commands.delete("db-pool9")?, None);
    assert_eq!(commands.store().snapshot()?, before);
    Ok(())
}

#[test]
fn test_delete_factory_instance_by_alias_token() -> Result<()> {
    let commands = memory_commands();
    let pool1 = commands.install("db-pool1.cfg", props(&[("b", "2")]))?;
    let pool2 = commands.install("db-pool2.cfg", props(&[("b", "3")]))?;

    assert_eq!(commands.delete("db-pool1")?, Some(pool1));
    let remaining: Vec<_> = commands.list()?.into_iter().map(|s| s.pid).collect();
    assert_eq!(remaining, [pool2]);
    Ok(())
}

#[test]
fn test_list_empty_store() -> Result<()> {
    let commands = memory_commands();
    assert!(commands.list()?.is_empty());
    Ok(())
}

#[test]
fn test_unavailable_store_reports_error() {
    let store = MemoryStore::new();
    store.set_available(false);
    let commands = ConfigurationCommands::new(store);

    assert!(matches!(commands.list(), Err(CmError::StoreUnavailable)));
    assert!(matches!(commands.show("x"), Err(CmError::StoreUnavailable)));
    assert!(matches!(commands.delete("x"), Err(CmError::StoreUnavailable)));
    assert!(matches!(
        commands.install("x.cfg", Properties::new()),
        Err(CmError::StoreUnavailable)
    ));
}

#[test]
fn test_filter_metacharacters_surface_as_syntax_error() {
    let commands = memory_commands();
    let err = commands.show("bad(pid").unwrap_err();
    assert!(matches!(err, CmError::FilterSyntax { .. }));
}

#[test]
fn test_install_from_file_source() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("db-pool1.cfg");
    fs::write(&path, "# pool settings\nsize=5\nurl = jdbc:h2:mem\\:test\n")?;

    let commands = memory_commands();
    let source = PayloadSource::parse(&path.display().to_string())?;
    let pid = commands.install_from(&source, Duration::from_secs(5))?;

    let shown = commands.show(&pid)?.expect("installed");
    assert_eq!(
        shown,
        props(&[("size", "5"), ("url", "jdbc:h2:mem:test"), ("_alias_pid", "pool1")])
    );
    Ok(())
}

#[test]
fn test_failed_fetch_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let commands = memory_commands();
    let source = PayloadSource::parse(&temp_dir.path().join("missing.cfg").display().to_string())?;

    let err = commands
        .install_from(&source, Duration::from_secs(5))
        .unwrap_err();
    assert!(matches!(err, CmError::PayloadFetch { .. }));
    assert!(commands.list()?.is_empty());
    Ok(())
}
