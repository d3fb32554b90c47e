//! End-to-end tests for configuration discovery and the `config` command.

use anyhow::Result;

use crate::common::{FileAssert, TestProject};
use crate::fixtures::ConfigFixture;

#[test]
fn config_show_reports_defaults_without_a_file() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run(&["config", "show"])?;
    output
        .assert_success()
        .assert_stdout_contains("Config file: none (built-in defaults)")
        .assert_stdout_contains("data-dir (unset)")
        .assert_stdout_contains("base-url (unset)")
        .assert_stdout_contains("Tables: directory ");
    Ok(())
}

#[test]
fn config_show_reports_the_configured_http_source() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config(&ConfigFixture::base_url("http://localhost:9000/exports").content)?;

    let output = project.run(&["config", "show"])?;
    output
        .assert_success()
        .assert_stdout_contains("base-url = http://localhost:9000/exports")
        .assert_stdout_contains("Tables: base URL http://localhost:9000/exports");
    Ok(())
}

#[test]
fn config_set_then_get_round_trips() -> Result<()> {
    let project = TestProject::new()?;

    project
        .run(&["config", "set", "data-dir", "exports"])?
        .assert_success()
        .assert_stdout_contains("Set data-dir = exports");
    FileAssert::contains(project.config_path(), "data_dir = \"exports\"");

    let output = project.run(&["config", "get", "data-dir"])?;
    output.assert_success();
    assert_eq!(output.stdout.trim(), "exports");
    Ok(())
}

#[test]
fn config_set_clears_the_counterpart_and_keeps_comments() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config("# where the tables live\n[source]\nbase_url = \"http://old.example.com\"\n")?;

    project.run(&["config", "set", "data-dir", "exports"])?.assert_success();

    FileAssert::contains(project.config_path(), "# where the tables live");
    FileAssert::contains(project.config_path(), "data_dir = \"exports\"");
    FileAssert::not_contains(project.config_path(), "base_url");
    Ok(())
}

#[test]
fn config_set_unknown_key_fails() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run(&["config", "set", "font", "big"])?;
    output.assert_failure().assert_stderr_contains("unknown config key 'font'");
    Ok(())
}

#[test]
fn config_get_unset_key_prints_nothing() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run(&["config", "get", "base-url"])?;
    output.assert_success();
    assert!(output.stdout.is_empty(), "stdout: {}", output.stdout);
    Ok(())
}

#[test]
fn config_set_global_writes_the_user_file() -> Result<()> {
    let project = TestProject::new()?;

    project
        .run(&["config", "set", "--global", "base-url", "http://localhost:9000/exports"])?
        .assert_success();

    FileAssert::exists(project.user_config_path());
    FileAssert::contains(
        project.user_config_path(),
        "base_url = \"http://localhost:9000/exports\"",
    );

    // With no project file, discovery falls through to the user-level config.
    let output = project.run(&["config", "show"])?;
    output
        .assert_success()
        .assert_stdout_contains(".rpcfinder")
        .assert_stdout_contains("base-url = http://localhost:9000/exports");
    Ok(())
}

#[test]
fn project_config_wins_over_the_user_file() -> Result<()> {
    let project = TestProject::new()?;
    project
        .run(&["config", "set", "--global", "base-url", "http://localhost:9000/exports"])?
        .assert_success();
    project.write_config(&ConfigFixture::data_dir("exports").content)?;

    let output = project.run(&["config", "show"])?;
    output
        .assert_success()
        .assert_stdout_contains("data-dir = exports")
        .assert_stdout_contains("base-url (unset)");
    Ok(())
}

#[test]
fn config_path_prints_the_discovered_file() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config(&ConfigFixture::data_dir("data").content)?;

    let output = project.run(&["config", "path"])?;
    output.assert_success();
    assert!(
        output.stdout.trim().ends_with("rpcfinder.toml"),
        "stdout: {}",
        output.stdout
    );
    Ok(())
}

#[test]
fn search_from_a_nested_directory_finds_the_project_config() -> Result<()> {
    let project = TestProject::with_basic_tables()?;
    let nested = project.create_dir("src/deeply/nested")?;

    // data_dir is relative to the config file, not to the working directory.
    let output = project.run_in(&nested, &["search", "jp.co.testRIclass"], &[])?;
    output.assert_success().assert_stdout_contains("TestRIImpl");
    Ok(())
}

#[test]
fn explicit_config_flag_overrides_discovery() -> Result<()> {
    let project = TestProject::with_basic_tables()?;
    project.create_file(
        "alt.toml",
        &ConfigFixture::data_dir("altdata").content,
    )?;
    project.create_file(
        "altdata/rpc-mappings.csv",
        "rpc_name,rpc_class\naltRI,jp.co.altOnlyClass\n",
    )?;
    project.create_file(
        "altdata/js-mappings.csv",
        "rpc_name,js_class,file_path\naltRI,AltImpl,src/rpc/alt.js\n",
    )?;

    let output = project.run(&["search", "jp.co.altOnlyClass", "--config", "alt.toml"])?;
    output.assert_success().assert_stdout_contains("AltImpl");
    Ok(())
}

#[test]
fn explicit_missing_config_is_an_error() -> Result<()> {
    let project = TestProject::with_basic_tables()?;

    let output = project.run(&["--config", "missing.toml", "config", "show"])?;
    output.assert_failure().assert_stderr_contains("does not exist");
    Ok(())
}

#[test]
fn env_var_selects_the_config() -> Result<()> {
    let project = TestProject::new()?;
    project.create_file("alt.toml", &ConfigFixture::data_dir("data").content)?;
    let alt = project.project_path().join("alt.toml");

    let output = project.run_with_env(
        &["config", "path"],
        &[("RPCFINDER_CONFIG", alt.to_str().unwrap())],
    )?;
    output.assert_success();
    assert!(output.stdout.trim().ends_with("alt.toml"), "stdout: {}", output.stdout);
    Ok(())
}
